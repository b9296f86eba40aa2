//! Channel implementation of byte source.
//!
//! [ChannelSource] receives chunks of bytes from a producer over a
//! [crossbeam_channel] and stages them for the loader. Fills block until the
//! producer sends a chunk or hangs up.

use std::io;

use crossbeam_channel::{Receiver, TryRecvError};
use log::debug;

use crate::source::byte_source::ByteSource;

// =#========================================================================#=
// CHANNEL SOURCE
// =#========================================================================#=
/// A byte source fed by chunks received from a channel.
///
/// A disconnected channel marks the permanent end of data. Chunks larger than
/// the free space of the staging region are handed out over several fills.
#[derive(Debug)]
pub struct ChannelSource {
    input: Option<Receiver<Vec<u8>>>,
    /// Chunk currently being handed out
    pending: PendingChunk,
}

/// Received chunk together with how much of it was handed out.
#[derive(Debug, Default)]
struct PendingChunk {
    bytes: Vec<u8>,
    pos: usize,
}

impl PendingChunk {
    fn copy_into(&mut self, dest: &mut [u8]) -> usize {
        let len = dest.len().min(self.bytes.len() - self.pos);
        dest[..len].copy_from_slice(&self.bytes[self.pos..self.pos + len]);
        self.pos += len;
        len
    }

    fn replace(&mut self, bytes: Vec<u8>) {
        self.bytes = bytes;
        self.pos = 0;
    }

    fn clear(&mut self) {
        self.replace(Vec::new());
    }
}

impl ChannelSource {
    /// Creates a new byte source receiving from `input`.
    pub fn new(input: Receiver<Vec<u8>>) -> Self {
        Self {
            input: Some(input),
            pending: PendingChunk::default(),
        }
    }
}

impl ByteSource for ChannelSource {
    fn fill(&mut self, dest: &mut [u8]) -> io::Result<usize> {
        let mut written = self.pending.copy_into(dest);
        if written == dest.len() {
            return Ok(written);
        }
        let Some(input) = self.input.as_ref() else {
            return Ok(written);
        };

        // Block only while nothing could be handed out yet
        while written == 0 {
            match input.recv() {
                Ok(chunk) => {
                    self.pending.replace(chunk);
                    written = self.pending.copy_into(dest);
                }
                Err(_) => {
                    debug!("channel disconnected");
                    return Ok(0);
                }
            }
        }

        while written < dest.len() {
            match input.try_recv() {
                Ok(chunk) => {
                    self.pending.replace(chunk);
                    written += self.pending.copy_into(&mut dest[written..]);
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        Ok(written)
    }

    fn release(&mut self) -> io::Result<()> {
        if self.input.take().is_some() {
            debug!("channel receiver released");
        }
        self.pending.clear();
        Ok(())
    }
}
