//! Byte source abstraction for the loader.
//!
//! This module provides the [ByteSource] trait, the single seam between the
//! [ByteLoader](crate::ByteLoader) and the concrete data it reads from.

use std::io;

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================#=
/// Trait defining the interface for the sources a ByteLoader stages bytes from.
///
/// This trait abstracts over different kinds of input:
/// - In-memory byte arrays and [bytes::Buf] buffers
/// - Fixed-width numeric units split into big-endian bytes
/// - Character readers, byte streams, files and channels
///
/// The loader only ever asks a source to append bytes into the free tail of its
/// staging region; where those bytes come from is up to the source.
pub trait ByteSource {
    /// Smallest staging capacity this source needs to make progress.
    ///
    /// `0` for byte-granular sources, the unit width (2, 4 or 8) for sources
    /// emitting fixed-width big-endian units.
    fn min_unit_size(&self) -> usize {
        0
    }

    /// Appends as many bytes as fit into `dest`.
    ///
    /// # Arguments
    /// * `dest` - The free tail of the staging region
    ///
    /// # Returns
    /// The number of bytes written to the front of `dest`. Fewer than
    /// `dest.len()` means the source is temporarily or permanently drained;
    /// `0` with a non-empty `dest` is treated as end of data.
    ///
    /// # Errors
    /// Any failure of the underlying source. Retrying is the source's business;
    /// the loader wraps and surfaces the error as is.
    fn fill(&mut self, dest: &mut [u8]) -> io::Result<usize>;

    /// Releases the resource owned by this source.
    ///
    /// Must be safe to call more than once. Sources without a closable
    /// resource keep the default no-op.
    fn release(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn min_unit_size(&self) -> usize {
        (**self).min_unit_size()
    }

    fn fill(&mut self, dest: &mut [u8]) -> io::Result<usize> {
        (**self).fill(dest)
    }

    fn release(&mut self) -> io::Result<()> {
        (**self).release()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn min_unit_size(&self) -> usize {
        (**self).min_unit_size()
    }

    fn fill(&mut self, dest: &mut [u8]) -> io::Result<usize> {
        (**self).fill(dest)
    }

    fn release(&mut self) -> io::Result<()> {
        (**self).release()
    }
}
