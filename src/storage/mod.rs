//! Storage backings for score package containers.
//!
//! A container is physically either a single ZIP archive or a plain
//! directory tree holding the same relative layout. Both are hidden behind
//! the [`Storage`] trait so the reader never branches on the physical form.

mod dir;
mod zip;

pub use self::dir::DirStorage;
pub use self::zip::ZipStorage;

use crate::error::Result;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::error;

/// Byte streams an archive backing can read from.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// A byte stream together with its ownership tag.
///
/// Dropping an `Owned` stream releases it; dropping a `Borrowed` stream only
/// ends the borrow, leaving the caller responsible for the stream itself.
/// Release behavior is decided by the tag alone.
pub enum SourceStream<'s> {
    Owned(Box<dyn ReadSeek + 's>),
    Borrowed(&'s mut dyn ReadSeek),
}

impl<'s> SourceStream<'s> {
    /// Adopt a stream, transferring ownership to the reader.
    pub fn owned(stream: impl ReadSeek + 's) -> Self {
        SourceStream::Owned(Box::new(stream))
    }

    /// Lend a stream; the caller keeps responsibility for its lifetime.
    pub fn borrowed(stream: &'s mut dyn ReadSeek) -> Self {
        SourceStream::Borrowed(stream)
    }

    /// True when dropping this stream releases it.
    pub fn is_owned(&self) -> bool {
        matches!(self, SourceStream::Owned(_))
    }
}

impl Read for SourceStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            SourceStream::Owned(stream) => stream.read(buf),
            SourceStream::Borrowed(stream) => stream.read(buf),
        }
    }
}

impl Seek for SourceStream<'_> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        match self {
            SourceStream::Owned(stream) => stream.seek(pos),
            SourceStream::Borrowed(stream) => stream.seek(pos),
        }
    }
}

/// Unified view over the physical backing of a container.
///
/// Implementations enumerate relative, forward-slash entry paths and read
/// whole entries by exact path. Reads through [`Storage::read_bytes`] are
/// deliberately permissive: a missing or unreadable entry degrades to empty
/// bytes, because absent optional assets are a normal container state.
pub trait Storage {
    /// Prepare the backing for reading. Idempotent.
    fn open(&mut self) -> Result<()>;

    /// Release the backing's handles. The backing can be opened again.
    fn close(&mut self);

    /// Whether the backing is currently readable.
    fn is_open(&self) -> bool;

    /// Logical root of the container.
    fn root(&self) -> PathBuf;

    /// Every file entry, in backend enumeration order. Directories excluded.
    fn entries(&mut self) -> Result<Vec<String>>;

    /// Read one entry's bytes by exact relative path.
    fn try_read(&mut self, relative_path: &str) -> Result<Vec<u8>>;

    /// Rebind the backing to a new path, discarding any live handle.
    fn rebind_path(&mut self, path: &Path);

    /// Permissive read: any failure is logged and degrades to empty bytes.
    ///
    /// Callers that must distinguish an absent entry from a present but
    /// zero-byte one use [`Storage::try_read`] instead.
    fn read_bytes(&mut self, relative_path: &str) -> Vec<u8> {
        match self.try_read(relative_path) {
            Ok(bytes) => bytes,
            Err(err) => {
                error!("failed to read entry '{}': {}", relative_path, err);
                Vec::new()
            }
        }
    }
}
