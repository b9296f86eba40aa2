//! In-memory implementations of byte source.
//!
//! This module provides [ByteArraySource], which owns a byte vector, and
//! [BufSource], which drains any [bytes::Buf].

use std::io;

use bytes::Buf;

use crate::source::byte_source::ByteSource;

// =#========================================================================#=
// BYTE ARRAY SOURCE
// =#========================================================================#=
/// A byte source that owns its data.
///
/// This is the most efficient byte source for input that fits entirely in memory.
#[derive(Debug, Clone)]
pub struct ByteArraySource {
    /// The owned byte data being loaded
    input: Vec<u8>,
    /// Position of the next byte to hand out
    pos: usize,
}

impl ByteArraySource {
    /// Creates a new in-memory byte source from a Vec of bytes.
    ///
    /// # Arguments
    /// * `bytes` - The byte vector to load
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { input: bytes, pos: 0 }
    }

    /// Number of bytes not yet handed to the loader.
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }
}

impl From<Vec<u8>> for ByteArraySource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl ByteSource for ByteArraySource {
    #[inline]
    fn fill(&mut self, dest: &mut [u8]) -> io::Result<usize> {
        let len = dest.len().min(self.remaining());
        dest[..len].copy_from_slice(&self.input[self.pos..self.pos + len]);
        self.pos += len;
        Ok(len)
    }
}

// =#========================================================================#=
// BUF SOURCE
// =#========================================================================#=
/// A byte source draining a [bytes::Buf], e.g. [bytes::Bytes] or a chain of buffers.
///
/// Only the bytes remaining in the buffer are loaded; the buffer is advanced as
/// the loader consumes them.
#[derive(Debug)]
pub struct BufSource<B: Buf> {
    input: B,
}

impl<B: Buf> BufSource<B> {
    /// Creates a new byte source over the remaining bytes of `input`.
    pub fn new(input: B) -> Self {
        Self { input }
    }

    /// The wrapped buffer.
    pub fn get_ref(&self) -> &B {
        &self.input
    }
}

impl<B: Buf> ByteSource for BufSource<B> {
    fn fill(&mut self, dest: &mut [u8]) -> io::Result<usize> {
        let len = dest.len().min(self.input.remaining());
        self.input.copy_to_slice(&mut dest[..len]);
        Ok(len)
    }
}
