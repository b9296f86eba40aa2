//! Byteloader is a library to read bytes one at a time with bounded lookahead
//! from many kinds of input.
//!
//! This crate offers the buffering primitive beneath a tokenizer or parser that
//! needs to peek a few bytes ahead before deciding what to consume.
//! Core functionality provided:
//! - [ByteLoader]: Fixed-capacity staging region, refilled on demand, with
//!   `peek`/`pop` at a lookahead offset below the capacity.
//! - [ByteSequenceIterator]: Check-then-consume iteration
//!   (`has_next_byte`/`next_byte`) with a side-effect free "has next".
//! - Sources: byte arrays, [bytes::Buf] buffers, 16/32/64 bit units split
//!   big-endian, UTF-8 character readers emitting UTF-16 units, byte streams,
//!   files and channels. See [crate::source] for details.
//! - Construction: [ByteLoaderBuilder] picks the source for an input value and
//!   configures the capacity (default [DEFAULT_CAPACITY]).
//!
//! Limitations:
//! - Lookahead is bounded by the capacity; the region never grows
//! - No text decoding beyond splitting fixed-width units into big-endian bytes
//! - A loader is meant for a single reader; it is not synchronized
//!
//! # Usage patterns
//! 1. The quick functions below create a loader with default settings.
//! 2. Configure a loader using [ByteLoaderBuilder] for full control.
//!
//! ## Example Default Configuration
//! ```
//! use byteloader::ByteSequenceIterator;
//!
//! let mut loader = byteloader::from_bytes(b"Hello, World!".to_vec())?;
//! assert_eq!(loader.peek_at(4)?, Some(b'o'));
//! assert_eq!(loader.drain_all()?, b"Hello, World!");
//! # Ok::<(), byteloader::LoadingError>(())
//! ```
//!
//! ## Example Builder Configuration
//! ```
//! use byteloader::{ByteLoaderBuilder, ByteSequenceIterator};
//!
//! let mut loader = ByteLoaderBuilder::of("Hello").with_capacity(3).build()?;
//! while loader.has_next_byte()? {
//!     let byte = loader.next_byte()?;
//!     print!("{byte:02x} ");
//! }
//! # Ok::<(), byteloader::LoadingError>(())
//! ```

pub mod factory;
pub mod loader;
pub mod source;

pub use factory::{ByteLoaderBuilder, IntoByteSource, TextEncoding};
pub use loader::{
    ByteLoader, ByteSequenceIterator, DEFAULT_CAPACITY, LoadingError, LoadingErrorKind, Result,
};
pub use source::ByteSource;

use std::fs::File;
use std::path::Path;

use crate::source::{ByteArraySource, CharArraySource, ReaderSource};

// ============================================================================
// Quick API
// ============================================================================
/// Creates a loader over a byte vector using the default capacity.
///
/// # Errors
/// Never fails for byte arrays; returns `Result` for API consistency.
pub fn from_bytes(bytes: Vec<u8>) -> Result<ByteLoader<ByteArraySource>> {
    ByteLoaderBuilder::of(bytes).build()
}

/// Creates a loader over the UTF-16 code units of `text`, two bytes each,
/// using the default capacity.
///
/// See [TextEncoding] and [ByteLoaderBuilder::for_text] to load other encodings.
pub fn from_str(text: &str) -> Result<ByteLoader<CharArraySource>> {
    ByteLoaderBuilder::of(text).build()
}

/// Creates a loader streaming a file using the default capacity.
///
/// # Errors
/// Returns an I/O error if the file cannot be opened.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ByteLoader<ReaderSource<File>>> {
    ByteLoaderBuilder::for_file(path)?.build()
}
