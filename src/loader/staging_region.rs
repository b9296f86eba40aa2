//! Fixed-capacity staging region between a byte source and the loader.

// =#========================================================================#=
// STAGING REGION
// =#========================================================================#=
/// A fixed-capacity byte region with a read cursor and a limit.
///
/// Bytes in `cursor..limit` are staged but not yet consumed; bytes in
/// `limit..capacity` are free for the next fill. The region never grows:
/// it is only compacted (unread bytes slid to the front) and refilled in place.
#[derive(Debug)]
pub(crate) struct StagingRegion {
    data: Box<[u8]>,
    cursor: usize,
    limit: usize,
}

impl StagingRegion {
    /// Creates an empty region (`cursor == limit == 0`) of the given capacity.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity].into_boxed_slice(),
            cursor: 0,
            limit: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of staged bytes ahead of the read cursor.
    #[inline]
    pub(crate) fn available(&self) -> usize {
        self.limit - self.cursor
    }

    /// Byte `offset` positions ahead of the read cursor, if staged.
    #[inline]
    pub(crate) fn byte_at(&self, offset: usize) -> Option<u8> {
        if offset < self.available() {
            Some(self.data[self.cursor + offset])
        } else {
            None
        }
    }

    /// Current read cursor, used as a mark by non-consuming refills.
    #[inline]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    /// Restores a cursor previously obtained from [StagingRegion::cursor].
    #[inline]
    pub(crate) fn reset(&mut self, mark: usize) {
        debug_assert!(mark <= self.limit);
        self.cursor = mark;
    }

    /// Moves the read cursor past one staged byte.
    #[inline]
    pub(crate) fn advance(&mut self) {
        debug_assert!(self.cursor < self.limit);
        self.cursor += 1;
    }

    /// Slides the unread bytes to the front, discarding consumed ones.
    pub(crate) fn compact(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.data.copy_within(self.cursor..self.limit, 0);
        self.limit -= self.cursor;
        self.cursor = 0;
    }

    /// The free tail of the region a source may write into.
    #[inline]
    pub(crate) fn writable(&mut self) -> &mut [u8] {
        &mut self.data[self.limit..]
    }

    /// Marks `written` bytes of the free tail as staged.
    pub(crate) fn commit(&mut self, written: usize) {
        debug_assert!(written <= self.data.len() - self.limit);
        self.limit = (self.limit + written).min(self.data.len());
    }

    /// Drops every staged byte.
    pub(crate) fn clear(&mut self) {
        self.cursor = 0;
        self.limit = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(capacity: usize, bytes: &[u8]) -> StagingRegion {
        let mut region = StagingRegion::new(capacity);
        region.writable()[..bytes.len()].copy_from_slice(bytes);
        region.commit(bytes.len());
        region
    }

    #[test]
    fn test_new_region_is_empty() {
        let region = StagingRegion::new(4);
        assert_eq!(region.capacity(), 4);
        assert_eq!(region.available(), 0);
        assert_eq!(region.byte_at(0), None);
    }

    #[test]
    fn test_byte_at_respects_limit() {
        let region = staged(8, b"abc");
        assert_eq!(region.byte_at(0), Some(b'a'));
        assert_eq!(region.byte_at(2), Some(b'c'));
        assert_eq!(region.byte_at(3), None);
    }

    #[test]
    fn test_compact_keeps_unread_bytes() {
        let mut region = staged(4, b"wxyz");
        region.advance();
        region.advance();
        assert!(region.writable().is_empty());

        region.compact();
        assert_eq!(region.cursor(), 0);
        assert_eq!(region.available(), 2);
        assert_eq!(region.byte_at(0), Some(b'y'));
        assert_eq!(region.writable().len(), 2);
    }

    #[test]
    fn test_mark_and_reset() {
        let mut region = staged(4, b"ab");
        let mark = region.cursor();
        region.advance();
        assert_eq!(region.byte_at(0), Some(b'b'));
        region.reset(mark);
        assert_eq!(region.byte_at(0), Some(b'a'));
    }

    #[test]
    fn test_clear() {
        let mut region = staged(4, b"abcd");
        region.clear();
        assert_eq!(region.available(), 0);
        assert_eq!(region.writable().len(), 4);
    }
}
