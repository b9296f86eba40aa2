//! Lookahead byte loader over a fixed-capacity staging region.
//!
//! This module provides [ByteLoader], which stages bytes from any [ByteSource]
//! and hands them out one at a time, with bounded peeking ahead of the read
//! position. It is the foundation a tokenizer can build on when it needs to
//! look at the next few bytes before deciding what to consume.

use log::{debug, trace, warn};

use crate::loader::byte_sequence::ByteSequenceIterator;
use crate::loader::loading_error::{LoadingError, LoadingErrorKind, Result};
use crate::loader::staging_region::StagingRegion;
use crate::source::byte_source::ByteSource;

/// Capacity of the staging region unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 1024;

// =#========================================================================#=
// BYTE LOADER
// =#========================================================================#=
/// A byte-by-byte loader with bounded lookahead over a [ByteSource].
///
/// [ByteLoader] owns a staging region of fixed capacity. Reads are served from
/// that region; whenever a read needs more bytes than are staged, the region is
/// compacted and the source is asked to fill the free tail.
///
/// # Features
/// - Peek up to `capacity - 1` bytes ahead without consuming
/// - Pop one byte at a time
/// - Check-then-consume iteration via [ByteSequenceIterator]
/// - Explicit, idempotent [close](ByteLoader::close); released on drop otherwise
///
/// # Example
/// ```
/// use byteloader::{ByteLoader, ByteSequenceIterator};
/// use byteloader::source::ByteArraySource;
///
/// let source = ByteArraySource::new(b"BEGIN".to_vec());
/// let mut loader = ByteLoader::with_capacity(source, 3)?;
///
/// assert_eq!(loader.peek_at(2)?, Some(b'G'));
/// assert_eq!(loader.pop()?, Some(b'B'));
/// assert_eq!(loader.drain_all()?, b"EGIN");
/// assert!(!loader.has_next_byte()?);
/// # Ok::<(), byteloader::LoadingError>(())
/// ```
pub struct ByteLoader<S: ByteSource> {
    source: S,
    region: StagingRegion,
    /// Lookahead of `has_next_byte`: `None` unknown, `Some(None)` known end.
    cached: Option<Option<u8>>,
    /// Number of bytes consumed so far
    position: u64,
    exhausted: bool,
    released: bool,
}

impl<S: ByteSource> ByteLoader<S> {
    /// Creates a loader with a staging region of [DEFAULT_CAPACITY] bytes.
    ///
    /// # Errors
    /// Returns `InvalidCapacity` if the source needs larger units than the default.
    pub fn new(source: S) -> Result<Self> {
        Self::with_capacity(source, DEFAULT_CAPACITY)
    }

    /// Creates a loader with a staging region of `capacity` bytes.
    ///
    /// # Arguments
    /// * `source` - The source to stage bytes from
    /// * `capacity` - Fixed size of the staging region, and thereby the
    ///   exclusive upper bound of lookahead offsets
    ///
    /// # Errors
    /// Returns `InvalidCapacity` if `capacity` is zero or smaller than
    /// [ByteSource::min_unit_size].
    pub fn with_capacity(source: S, capacity: usize) -> Result<Self> {
        let minimum = source.min_unit_size();
        if capacity == 0 || capacity < minimum {
            return Err(LoadingError::invalid_capacity(capacity, minimum));
        }

        Ok(Self {
            source,
            region: StagingRegion::new(capacity),
            cached: None,
            position: 0,
            exhausted: false,
            released: false,
        })
    }

    /// Capacity of the staging region.
    pub fn capacity(&self) -> usize {
        self.region.capacity()
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Whether [close](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.released
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data
    #[inline]
    pub fn peek(&mut self) -> Result<Option<u8>> {
        self.get(0, false)
    }

    /// Peeks at the byte `offset` positions ahead without consuming anything.
    ///
    /// Calling this repeatedly with the same offset yields the same byte.
    ///
    /// # Arguments
    /// * `offset` - Lookahead distance, `0 <= offset < capacity`
    ///
    /// # Returns
    /// The byte at `offset`, or `None` if the data ends before it
    ///
    /// # Errors
    /// `OffsetOutOfRange` for `offset >= capacity`; `Io` if the source fails.
    pub fn peek_at(&mut self, offset: usize) -> Result<Option<u8>> {
        self.get(offset, false)
    }

    /// Gets the current byte and advances the position (consumes it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data
    #[inline]
    pub fn pop(&mut self) -> Result<Option<u8>> {
        self.get(0, true)
    }

    /// Looks `offset` bytes ahead and consumes exactly one byte.
    ///
    /// The offset only decides how far the loader has to look before it
    /// consumes; the read position always advances by a single byte. Callers
    /// wanting to skip further pop repeatedly. Nothing is consumed if the data
    /// ends before `offset`.
    ///
    /// # Arguments
    /// * `offset` - Lookahead distance, `0 <= offset < capacity`
    ///
    /// # Returns
    /// The byte at `offset` before consuming, or `None` if the data ends before it
    ///
    /// # Errors
    /// `OffsetOutOfRange` for `offset >= capacity`; `Io` if the source fails.
    pub fn pop_at(&mut self, offset: usize) -> Result<Option<u8>> {
        self.get(offset, true)
    }

    /// Whether no further byte is available.
    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.peek()?.is_none())
    }

    /// Releases the source. Idempotent; every read afterwards reports end of data.
    ///
    /// # Errors
    /// `Release` if the source fails to free its resource. The loader counts
    /// as closed regardless.
    pub fn close(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.cached = None;
        self.region.clear();

        debug!("releasing byte source at position {}", self.position);
        self.source
            .release()
            .map_err(|err| LoadingError::new(LoadingErrorKind::Release(err), self.position))
    }

    /// Looks up the byte at `offset`, refilling as often as needed.
    fn get(&mut self, offset: usize, consume: bool) -> Result<Option<u8>> {
        let capacity = self.region.capacity();
        if offset >= capacity {
            return Err(LoadingError::offset_out_of_range(offset, capacity, self.position));
        }
        if consume {
            // A cached lookahead would be stale once the cursor moves
            self.cached = None;
        }
        if self.released {
            return Ok(None);
        }

        while self.region.available() <= offset {
            if !self.refill(consume)? {
                if !self.exhausted {
                    debug!("byte source exhausted at position {}", self.position);
                    self.exhausted = true;
                }
                return Ok(None);
            }
        }

        let byte = self.region.byte_at(offset);
        if consume {
            self.region.advance();
            self.position += 1;
        }
        Ok(byte)
    }

    /// Compacts the region and lets the source fill its free tail.
    ///
    /// # Returns
    /// `true` if the source appended at least one byte
    fn refill(&mut self, consume: bool) -> Result<bool> {
        self.region.compact();
        let mark = if consume { None } else { Some(self.region.cursor()) };

        let dest = self.region.writable();
        let requested = dest.len();
        let written = self
            .source
            .fill(dest)
            .map_err(|err| LoadingError::io(err, self.position))?
            .min(requested);
        self.region.commit(written);

        if let Some(mark) = mark {
            self.region.reset(mark);
        }

        trace!("refill requested {requested} bytes, source appended {written}");
        if written > 0 {
            self.exhausted = false;
        }
        Ok(written > 0)
    }
}

impl<S: ByteSource> ByteSequenceIterator for ByteLoader<S> {
    fn has_next_byte(&mut self) -> Result<bool> {
        let cached = match self.cached {
            Some(cached) => cached,
            None => {
                let peeked = self.peek()?;
                self.cached = Some(peeked);
                peeked
            }
        };
        Ok(cached.is_some())
    }

    fn next_byte(&mut self) -> Result<u8> {
        if self.cached.is_none() {
            self.has_next_byte()?;
        }

        let Some(expected) = self.cached.take().flatten() else {
            return Err(LoadingError::no_more_elements(self.position));
        };

        let popped = self.pop()?;
        if popped != Some(expected) {
            return Err(LoadingError::new(
                LoadingErrorKind::Inconsistent { cached: expected, popped },
                self.position,
            ));
        }
        Ok(expected)
    }
}

impl<S: ByteSource> Iterator for ByteLoader<S> {
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.has_next_byte() {
            Ok(true) => Some(self.next_byte()),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

impl<S: ByteSource> Drop for ByteLoader<S> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!("{err}");
        }
    }
}
