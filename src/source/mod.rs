//! Byte sources a [ByteLoader](crate::ByteLoader) can stage bytes from.
//!
//! All sources implement [ByteSource]; the loader never depends on a concrete
//! source type.

pub mod byte_source;
pub mod channel_byte_source;
pub mod in_memory_byte_source;
pub mod stream_byte_source;
pub mod unit_source;

pub use byte_source::ByteSource;
pub use channel_byte_source::ChannelSource;
pub use in_memory_byte_source::{BufSource, ByteArraySource};
pub use stream_byte_source::{CharReaderSource, ReaderSource};
pub use unit_source::{
    BigEndianUnit, CharArraySource, IntArraySource, LongArraySource, ShortArraySource, UnitSource,
};
