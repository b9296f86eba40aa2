//! Check-then-consume iteration over a sequence of bytes.

use crate::loader::loading_error::Result;

/// Iterator over `u8` values with a separate, side-effect free "has next" check.
///
/// Unlike [Iterator], asking whether a further byte exists can be repeated
/// any number of times without consuming it; only
/// [next_byte](ByteSequenceIterator::next_byte) moves forward.
pub trait ByteSequenceIterator {
    /// Whether a further byte is available.
    ///
    /// # Errors
    /// Returns an error if the underlying source fails while looking ahead.
    fn has_next_byte(&mut self) -> Result<bool>;

    /// Consumes and returns the next byte.
    ///
    /// # Errors
    /// [NoMoreElements](crate::LoadingErrorKind::NoMoreElements) if there is
    /// no further byte, or any error raised while loading it.
    fn next_byte(&mut self) -> Result<u8>;

    /// Consumes every remaining byte into a vector.
    ///
    /// # Returns
    /// All remaining bytes in order; empty if the sequence is already exhausted
    ///
    /// # Errors
    /// The first error raised by `has_next_byte` or `next_byte`
    fn drain_all(&mut self) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        while self.has_next_byte()? {
            content.push(self.next_byte()?);
        }
        Ok(content)
    }
}
