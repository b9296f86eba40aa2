//! Error types for the byte loader.
//!
//! This module provides [LoadingError] and [LoadingErrorKind] for representing
//! and reporting errors that occur while staging bytes from a source.

use std::fmt;
use std::io;

use thiserror::Error;

/// Result alias used throughout the loader.
pub type Result<T> = std::result::Result<T, LoadingError>;

// =#========================================================================#=
// LOADING ERROR KIND
// =#========================================================================#=
/// Kinds of errors that can occur while loading bytes.
///
/// Only [LoadingErrorKind::NoMoreElements] is part of normal operation; it is
/// the end-of-data signal of [next_byte](crate::ByteSequenceIterator::next_byte).
/// Everything else terminates the current read.
#[derive(Debug, Error)]
pub enum LoadingErrorKind {
    /// Lookahead offset outside `[0, capacity)`; always a caller bug.
    #[error("offset {offset} out of range [0, {capacity})")]
    OffsetOutOfRange { offset: usize, capacity: usize },

    /// Staging region capacity is zero or smaller than the source's unit size.
    #[error("capacity {capacity} must be non-zero and at least {minimum}")]
    InvalidCapacity { capacity: usize, minimum: usize },

    /// The source failed while filling the staging region.
    #[error("failed to load byte data")]
    Io(#[source] io::Error),

    /// The source failed while releasing its resource.
    #[error("failed to release byte source")]
    Release(#[source] io::Error),

    /// `next_byte` was called with no further byte available.
    #[error("there is no next element")]
    NoMoreElements,

    /// The cached lookahead disagrees with the byte actually popped.
    #[error("cached byte {cached:#04x} does not match popped byte {popped:?}")]
    Inconsistent { cached: u8, popped: Option<u8> },
}

// =#========================================================================#=
// LOADING ERROR
// =#========================================================================#=
/// Loading error together with the logical read position it occurred at.
///
/// The position counts the bytes consumed from the loader before the failing
/// operation, so it points at the byte the caller was trying to reach. Errors
/// raised before any read (opening a file, validating the capacity) carry no
/// position.
#[derive(Debug)]
pub struct LoadingError {
    kind: LoadingErrorKind,
    position: Option<u64>,
}

impl LoadingError {
    /// Create a LoadingError from a kind and the loader position
    pub fn new(kind: LoadingErrorKind, position: u64) -> Self {
        Self { kind, position: Some(position) }
    }

    /// Create a LoadingError without a read position (for construction errors)
    pub fn without_position(kind: LoadingErrorKind) -> Self {
        Self { kind, position: None }
    }

    /// Convenience constructor for OffsetOutOfRange
    pub fn offset_out_of_range(offset: usize, capacity: usize, position: u64) -> Self {
        Self::new(LoadingErrorKind::OffsetOutOfRange { offset, capacity }, position)
    }

    /// Convenience constructor for InvalidCapacity
    pub fn invalid_capacity(capacity: usize, minimum: usize) -> Self {
        Self::without_position(LoadingErrorKind::InvalidCapacity { capacity, minimum })
    }

    /// Convenience constructor for Io
    pub fn io(err: io::Error, position: u64) -> Self {
        Self::new(LoadingErrorKind::Io(err), position)
    }

    /// Convenience constructor for NoMoreElements
    pub fn no_more_elements(position: u64) -> Self {
        Self::new(LoadingErrorKind::NoMoreElements, position)
    }

    /// Get the error kind
    pub fn kind(&self) -> &LoadingErrorKind {
        &self.kind
    }

    /// Get the position where the error occurred, if it occurred during a read
    pub fn position(&self) -> Option<u64> {
        self.position
    }

    /// Returns `true` for the regular end-of-data signal.
    pub fn is_end_of_data(&self) -> bool {
        matches!(self.kind, LoadingErrorKind::NoMoreElements)
    }
}

impl fmt::Display for LoadingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} at position {}", self.kind, position),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for LoadingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<io::Error> for LoadingError {
    fn from(err: io::Error) -> Self {
        // No position for errors raised outside of a read
        Self::without_position(LoadingErrorKind::Io(err))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_display_includes_position() {
        let err = LoadingError::offset_out_of_range(8, 8, 3);
        assert_eq!(err.to_string(), "offset 8 out of range [0, 8) at position 3");
    }

    #[test]
    fn test_io_cause_is_preserved() {
        let cause = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err = LoadingError::io(cause, 12);

        let source = err.source().expect("io error keeps its cause");
        let source = source.downcast_ref::<io::Error>().unwrap();
        assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(err.position(), Some(12));
    }

    #[test]
    fn test_display_without_position() {
        let err = LoadingError::from(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        assert_eq!(err.position(), None);
        assert_eq!(err.to_string(), "failed to load byte data");

        let err = LoadingError::invalid_capacity(0, 2);
        assert_eq!(err.to_string(), "capacity 0 must be non-zero and at least 2");
    }

    #[test]
    fn test_end_of_data_detection() {
        assert!(LoadingError::no_more_elements(0).is_end_of_data());
        assert!(!LoadingError::invalid_capacity(0, 2).is_end_of_data());
    }
}
