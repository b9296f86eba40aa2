//! Streaming implementations of byte source.
//!
//! This module provides [ReaderSource], which loads raw bytes from any
//! [Read] (files, sockets, pipes), and [CharReaderSource], which reads UTF-8
//! text and emits every UTF-16 code unit as two big-endian bytes.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

use log::debug;

use crate::source::byte_source::ByteSource;

/// Size of the scratch buffer [CharReaderSource] reads raw text into.
const TEXT_CHUNK_SIZE: usize = 512;

/// Reads once from `input`, retrying reads that were interrupted.
fn read_retrying<R: Read + ?Sized>(input: &mut R, dest: &mut [u8]) -> io::Result<usize> {
    loop {
        match input.read(dest) {
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

// =#========================================================================#=
// READER SOURCE
// =#========================================================================#=
/// A byte source streaming from a reader.
///
/// The reader is owned by the source and dropped on [release](ByteSource::release),
/// which closes files and sockets.
#[derive(Debug)]
pub struct ReaderSource<R: Read> {
    input: Option<R>,
}

impl<R: Read> ReaderSource<R> {
    /// Creates a new byte source reading from `input`.
    pub fn new(input: R) -> Self {
        Self { input: Some(input) }
    }

    /// Whether the reader has been released.
    pub fn is_released(&self) -> bool {
        self.input.is_none()
    }
}

impl ReaderSource<File> {
    /// Creates a new byte source from a file path.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn fill(&mut self, dest: &mut [u8]) -> io::Result<usize> {
        match self.input.as_mut() {
            Some(input) => read_retrying(input, dest),
            None => Ok(0),
        }
    }

    fn release(&mut self) -> io::Result<()> {
        if self.input.take().is_some() {
            debug!("reader released");
        }
        Ok(())
    }
}

// =#========================================================================#=
// CHAR READER SOURCE
// =#========================================================================#=
/// A byte source reading UTF-8 text and emitting big-endian UTF-16 code units.
///
/// Each code unit expands to exactly two bytes, high byte first, so `"Hi"`
/// loads as `0x00 'H' 0x00 'i'`. Characters outside the basic multilingual
/// plane become a surrogate pair (four bytes).
///
/// # Errors
/// Fills fail with [ErrorKind::InvalidData] on malformed UTF-8, including a
/// stream ending in the middle of a character.
#[derive(Debug)]
pub struct CharReaderSource<R: Read> {
    input: Option<R>,
    /// Raw bytes read but not yet decoded (an incomplete UTF-8 sequence)
    raw: Vec<u8>,
    /// Decoded code units not yet handed out
    units: VecDeque<u16>,
    /// Low byte of a code unit whose high byte ended the previous fill
    parked: Option<u8>,
}

impl<R: Read> CharReaderSource<R> {
    /// Creates a new byte source decoding the text read from `input`.
    pub fn new(input: R) -> Self {
        Self {
            input: Some(input),
            raw: Vec::new(),
            units: VecDeque::new(),
            parked: None,
        }
    }

    /// Reads until at least one more code unit is decoded.
    ///
    /// # Returns
    /// `false` at the end of the text
    fn decode_more(&mut self) -> io::Result<bool> {
        let Some(input) = self.input.as_mut() else {
            return Ok(false);
        };

        let mut chunk = [0u8; TEXT_CHUNK_SIZE];
        loop {
            let read = read_retrying(input, &mut chunk)?;
            if read == 0 {
                if self.raw.is_empty() {
                    return Ok(false);
                }
                return Err(io::Error::new(
                    ErrorKind::InvalidData,
                    "text ends inside a UTF-8 sequence",
                ));
            }
            self.raw.extend_from_slice(&chunk[..read]);

            let valid = match std::str::from_utf8(&self.raw) {
                Ok(text) => text.len(),
                Err(err) if err.error_len().is_some() => {
                    return Err(io::Error::new(ErrorKind::InvalidData, err));
                }
                // Incomplete trailing sequence, wait for more bytes
                Err(err) => err.valid_up_to(),
            };
            if valid == 0 {
                continue;
            }

            let text = std::str::from_utf8(&self.raw[..valid])
                .map_err(|err| io::Error::new(ErrorKind::InvalidData, err))?;
            self.units.extend(text.encode_utf16());
            self.raw.drain(..valid);
            return Ok(true);
        }
    }
}

impl<R: Read> ByteSource for CharReaderSource<R> {
    fn min_unit_size(&self) -> usize {
        2
    }

    fn fill(&mut self, dest: &mut [u8]) -> io::Result<usize> {
        let mut written = 0;
        if !dest.is_empty() {
            if let Some(low) = self.parked.take() {
                dest[0] = low;
                written = 1;
            }
        }

        while written < dest.len() {
            let Some(unit) = self.units.pop_front() else {
                // Hand out what we have rather than block for more
                if written > 0 || !self.decode_more()? {
                    break;
                }
                continue;
            };

            let [high, low] = unit.to_be_bytes();
            dest[written] = high;
            written += 1;
            if written < dest.len() {
                dest[written] = low;
                written += 1;
            } else {
                self.parked = Some(low);
            }
        }
        Ok(written)
    }

    fn release(&mut self) -> io::Result<()> {
        if self.input.take().is_some() {
            debug!("character reader released");
        }
        self.raw.clear();
        self.units.clear();
        self.parked = None;
        Ok(())
    }
}
