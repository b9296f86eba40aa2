//! Construction of byte loaders for the supported kinds of input.
//!
//! This module provides the [ByteLoaderBuilder], which configures and creates a
//! [ByteLoader], and the [IntoByteSource] trait, which picks the matching
//! [ByteSource] for a given input value.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::vec;

use bytes::{Bytes, BytesMut};
use crossbeam_channel::Receiver;

use crate::loader::byte_loader::{ByteLoader, DEFAULT_CAPACITY};
use crate::loader::loading_error::Result;
use crate::source::{
    BufSource, ByteArraySource, ByteSource, ChannelSource, CharArraySource, CharReaderSource,
    IntArraySource, LongArraySource, ReaderSource, ShortArraySource, UnitSource,
};

// =#========================================================================#=
// INTO BYTE SOURCE
// =#========================================================================#=
/// Conversion of an input value into the byte source that loads it.
///
/// | Input                        | Source                            |
/// |------------------------------|-----------------------------------|
/// | `Vec<u8>`, `&[u8]`           | [ByteArraySource]                 |
/// | `&str`, `String`, `Vec<u16>` | [CharArraySource] (UTF-16 units)  |
/// | `Vec<i16>`                   | [ShortArraySource]                |
/// | `Vec<i32>`, `Vec<u32>`       | 4 byte [UnitSource]               |
/// | `Vec<i64>`, `Vec<u64>`       | 8 byte [UnitSource]               |
/// | `Bytes`, `BytesMut`          | [BufSource]                       |
/// | `File`                       | [ReaderSource]                    |
/// | `Receiver<Vec<u8>>`          | [ChannelSource]                   |
///
/// Text is loaded as UTF-16 code units, two bytes each. Use
/// [ByteLoaderBuilder::for_text] to load the bytes of a specific encoding instead.
pub trait IntoByteSource {
    /// The source loading this input.
    type Source: ByteSource;

    /// Converts the input into its byte source.
    fn into_byte_source(self) -> Self::Source;
}

impl IntoByteSource for Vec<u8> {
    type Source = ByteArraySource;

    fn into_byte_source(self) -> Self::Source {
        ByteArraySource::new(self)
    }
}

impl IntoByteSource for &[u8] {
    type Source = ByteArraySource;

    fn into_byte_source(self) -> Self::Source {
        ByteArraySource::new(self.to_vec())
    }
}

impl IntoByteSource for &str {
    type Source = CharArraySource;

    fn into_byte_source(self) -> Self::Source {
        CharArraySource::from_text(self)
    }
}

impl IntoByteSource for String {
    type Source = CharArraySource;

    fn into_byte_source(self) -> Self::Source {
        CharArraySource::from_text(&self)
    }
}

impl IntoByteSource for Bytes {
    type Source = BufSource<Bytes>;

    fn into_byte_source(self) -> Self::Source {
        BufSource::new(self)
    }
}

impl IntoByteSource for BytesMut {
    type Source = BufSource<BytesMut>;

    fn into_byte_source(self) -> Self::Source {
        BufSource::new(self)
    }
}

impl IntoByteSource for File {
    type Source = ReaderSource<File>;

    fn into_byte_source(self) -> Self::Source {
        ReaderSource::new(self)
    }
}

impl IntoByteSource for Receiver<Vec<u8>> {
    type Source = ChannelSource;

    fn into_byte_source(self) -> Self::Source {
        ChannelSource::new(self)
    }
}

macro_rules! impl_into_unit_source {
    ($($ty:ty => $source:ty),* $(,)?) => {
        $(
            impl IntoByteSource for Vec<$ty> {
                type Source = $source;

                fn into_byte_source(self) -> Self::Source {
                    UnitSource::new(self)
                }
            }
        )*
    };
}

impl_into_unit_source!(
    u16 => CharArraySource,
    i16 => ShortArraySource,
    u32 => UnitSource<vec::IntoIter<u32>>,
    i32 => IntArraySource,
    u64 => UnitSource<vec::IntoIter<u64>>,
    i64 => LongArraySource,
);

// =#========================================================================#=
// TEXT ENCODING
// =#========================================================================#=
/// Encoding applied once to a text before its bytes are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8, one to four bytes per character.
    #[default]
    Utf8,
    /// UTF-16, high byte first.
    Utf16Be,
    /// UTF-16, low byte first.
    Utf16Le,
}

impl TextEncoding {
    /// Encodes `text` into bytes.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            TextEncoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        }
    }
}

// =#========================================================================#=
// BYTE LOADER BUILDER
// =#========================================================================#=
/// Builder for configuring and creating a [ByteLoader].
///
/// # Configuration Options
/// * **Capacity**: [`with_capacity()`](Self::with_capacity): size of the
///   staging region and bound on lookahead (default: [DEFAULT_CAPACITY])
///
/// The capacity is validated on [`build()`](Self::build): it must be non-zero
/// and at least the source's [min_unit_size](ByteSource::min_unit_size).
///
/// # Example
/// ```
/// use byteloader::{ByteLoaderBuilder, ByteSequenceIterator};
///
/// let mut loader = ByteLoaderBuilder::of(vec![0x12345678i32])
///     .with_capacity(4)
///     .build()?;
///
/// assert_eq!(loader.drain_all()?, vec![0x12, 0x34, 0x56, 0x78]);
/// # Ok::<(), byteloader::LoadingError>(())
/// ```
#[derive(Debug)]
pub struct ByteLoaderBuilder<S: ByteSource> {
    source: S,
    capacity: usize,
}

impl<S: ByteSource> ByteLoaderBuilder<S> {
    /// Creates a builder for an already constructed source.
    pub fn for_source(source: S) -> Self {
        Self { source, capacity: DEFAULT_CAPACITY }
    }

    /// Creates a builder for any input with an [IntoByteSource] conversion.
    pub fn of<T: IntoByteSource<Source = S>>(input: T) -> Self {
        Self::for_source(input.into_byte_source())
    }

    /// Sets the capacity of the staging region.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Creates the configured loader.
    ///
    /// # Errors
    /// `InvalidCapacity` if the capacity is zero or too small for the source.
    pub fn build(self) -> Result<ByteLoader<S>> {
        ByteLoader::with_capacity(self.source, self.capacity)
    }
}

impl ByteLoaderBuilder<ByteArraySource> {
    /// Creates a builder loading the bytes of `text` in the given encoding.
    pub fn for_text(text: &str, encoding: TextEncoding) -> Self {
        Self::for_source(ByteArraySource::new(encoding.encode(text)))
    }
}

impl ByteLoaderBuilder<ReaderSource<File>> {
    /// Creates a builder streaming the bytes of a file.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be opened
    pub fn for_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::for_source(ReaderSource::open(path)?))
    }
}

impl<R: Read> ByteLoaderBuilder<ReaderSource<R>> {
    /// Creates a builder streaming the bytes of a reader.
    pub fn for_reader(reader: R) -> Self {
        Self::for_source(ReaderSource::new(reader))
    }
}

impl<R: Read> ByteLoaderBuilder<CharReaderSource<R>> {
    /// Creates a builder decoding the UTF-8 text of a reader into UTF-16 units.
    pub fn for_char_reader(reader: R) -> Self {
        Self::for_source(CharReaderSource::new(reader))
    }
}

impl ByteLoaderBuilder<ChannelSource> {
    /// Creates a builder receiving byte chunks from a channel.
    pub fn for_channel(receiver: Receiver<Vec<u8>>) -> Self {
        Self::for_source(ChannelSource::new(receiver))
    }
}
