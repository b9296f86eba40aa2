//! Byte source over fixed-width numeric units.
//!
//! Every unit is split into its big-endian bytes, most significant byte first,
//! independent of the platform. Covers arrays as well as lazily produced
//! streams of 16, 32 and 64 bit values.

use std::io;
use std::vec;

use crate::source::byte_source::ByteSource;

// =#========================================================================#=
// BIG ENDIAN UNIT
// =#========================================================================#=
/// A fixed-width value that can be split into big-endian bytes.
pub trait BigEndianUnit: Copy {
    /// Width of one unit in bytes.
    const WIDTH: usize;

    /// Writes the big-endian bytes of `self` to the front of `dest`.
    ///
    /// `dest` must be at least [WIDTH](Self::WIDTH) bytes long.
    fn write_be(self, dest: &mut [u8]);
}

macro_rules! impl_big_endian_unit {
    ($($ty:ty),*) => {
        $(
            impl BigEndianUnit for $ty {
                const WIDTH: usize = size_of::<$ty>();

                #[inline]
                fn write_be(self, dest: &mut [u8]) {
                    dest[..Self::WIDTH].copy_from_slice(&self.to_be_bytes());
                }
            }
        )*
    };
}

impl_big_endian_unit!(u16, i16, u32, i32, u64, i64);

// =#========================================================================#=
// UNIT SOURCE
// =#========================================================================#=
/// A byte source emitting big-endian units pulled from an iterator.
///
/// Units are written whole as long as they fit into the region handed to
/// [fill](ByteSource::fill). When less than one unit of space is left, the
/// next unit is parked and its bytes are handed out over the following fills,
/// so the byte sequence is the same for every staging capacity.
#[derive(Debug)]
pub struct UnitSource<I: Iterator> {
    input: I,
    /// Bytes of a parked unit, valid in `parked_pos..parked_len`
    parked: [u8; 8],
    parked_pos: usize,
    parked_len: usize,
}

/// Source over 16 bit units, e.g. the UTF-16 code units of a text.
pub type CharArraySource = UnitSource<vec::IntoIter<u16>>;
/// Source over signed 16 bit units.
pub type ShortArraySource = UnitSource<vec::IntoIter<i16>>;
/// Source over signed 32 bit units.
pub type IntArraySource = UnitSource<vec::IntoIter<i32>>;
/// Source over signed 64 bit units.
pub type LongArraySource = UnitSource<vec::IntoIter<i64>>;

impl<I> UnitSource<I>
where
    I: Iterator,
    I::Item: BigEndianUnit,
{
    /// Creates a new unit source from anything iterable, e.g. a `Vec<i32>` or
    /// a lazily computed stream of `u64` values.
    pub fn new<T>(input: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            input: input.into_iter(),
            parked: [0; 8],
            parked_pos: 0,
            parked_len: 0,
        }
    }

    /// Hands out bytes of the parked unit, if any.
    fn drain_parked(&mut self, dest: &mut [u8]) -> usize {
        let len = dest.len().min(self.parked_len - self.parked_pos);
        dest[..len].copy_from_slice(&self.parked[self.parked_pos..self.parked_pos + len]);
        self.parked_pos += len;
        len
    }
}

impl CharArraySource {
    /// Creates a source over the UTF-16 code units of `text`.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.encode_utf16().collect::<Vec<_>>())
    }
}

impl<I> ByteSource for UnitSource<I>
where
    I: Iterator,
    I::Item: BigEndianUnit,
{
    fn min_unit_size(&self) -> usize {
        I::Item::WIDTH
    }

    fn fill(&mut self, dest: &mut [u8]) -> io::Result<usize> {
        let width = I::Item::WIDTH;
        let mut written = self.drain_parked(dest);

        while dest.len() - written >= width {
            let Some(unit) = self.input.next() else {
                return Ok(written);
            };
            unit.write_be(&mut dest[written..]);
            written += width;
        }

        if written < dest.len() && self.parked_pos == self.parked_len {
            if let Some(unit) = self.input.next() {
                unit.write_be(&mut self.parked);
                self.parked_pos = 0;
                self.parked_len = width;
                written += self.drain_parked(&mut dest[written..]);
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_unit_size_is_width() {
        assert_eq!(ShortArraySource::new(vec![1i16]).min_unit_size(), 2);
        assert_eq!(IntArraySource::new(vec![1]).min_unit_size(), 4);
        assert_eq!(LongArraySource::new(vec![1]).min_unit_size(), 8);
    }

    #[test]
    fn test_units_are_big_endian() {
        let mut source = IntArraySource::new(vec![0x12345678]);
        let mut dest = [0u8; 4];
        assert_eq!(source.fill(&mut dest).unwrap(), 4);
        assert_eq!(dest, [0x12, 0x34, 0x56, 0x78]);
        assert_eq!(source.fill(&mut dest).unwrap(), 0);
    }

    #[test]
    fn test_unit_split_across_fills() {
        let mut source = UnitSource::new(vec![0x0102u16, 0x0304]);
        let mut dest = [0u8; 3];
        assert_eq!(source.fill(&mut dest).unwrap(), 3);
        assert_eq!(dest, [0x01, 0x02, 0x03]);

        let mut rest = [0u8; 3];
        assert_eq!(source.fill(&mut rest).unwrap(), 1);
        assert_eq!(rest[0], 0x04);
    }

    #[test]
    fn test_stream_of_units() {
        let mut source = UnitSource::new((1u64..=2).map(|i| i << 56));
        let mut dest = [0u8; 16];
        assert_eq!(source.fill(&mut dest).unwrap(), 16);
        assert_eq!(dest[0], 1);
        assert_eq!(dest[8], 2);
    }

    #[test]
    fn test_text_as_utf16() {
        let mut source = CharArraySource::from_text("Hé");
        let mut dest = [0u8; 4];
        assert_eq!(source.fill(&mut dest).unwrap(), 4);
        assert_eq!(dest, [0x00, b'H', 0x00, 0xE9]);
    }
}
