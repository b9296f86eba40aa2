//! The buffering engine: staging region, lookahead loader and its errors.

pub mod byte_loader;
pub mod byte_sequence;
pub mod loading_error;
mod staging_region;

pub use byte_loader::{ByteLoader, DEFAULT_CAPACITY};
pub use byte_sequence::ByteSequenceIterator;
pub use loading_error::{LoadingError, LoadingErrorKind, Result};
