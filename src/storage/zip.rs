//! ZIP-archive backing.

use super::{SourceStream, Storage};
use crate::error::{PackageError, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

/// Container backing for a single compressed archive.
///
/// Bound either to an archive file on disk (opened lazily by [`open`]) or to
/// a caller-supplied [`SourceStream`]. The archive handle is materialized on
/// first enumeration or read and owns the stream; [`close`] recovers the
/// stream so the backing can be opened again.
///
/// [`open`]: Storage::open
/// [`close`]: Storage::close
pub struct ZipStorage<'s> {
    path: Option<PathBuf>,
    stream: Option<SourceStream<'s>>,
    // The stream was opened from `path` by us; close() releases it and a
    // later open() reopens from the path.
    stream_from_path: bool,
    archive: Option<ZipArchive<SourceStream<'s>>>,
    opened: bool,
}

impl<'s> ZipStorage<'s> {
    /// Bind to an archive file on disk. No I/O happens until [`Storage::open`].
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        ZipStorage {
            path: Some(path.into()),
            stream: None,
            stream_from_path: false,
            archive: None,
            opened: false,
        }
    }

    /// Adopt an in-memory or caller-provided stream.
    pub fn from_stream(stream: SourceStream<'s>) -> Self {
        ZipStorage {
            path: None,
            stream: Some(stream),
            stream_from_path: false,
            archive: None,
            opened: false,
        }
    }

    fn archive(&mut self) -> Result<&mut ZipArchive<SourceStream<'s>>> {
        match &mut self.archive {
            Some(archive) => Ok(archive),
            slot @ None => {
                let stream = self.stream.take().ok_or(PackageError::NotOpen)?;
                Ok(slot.insert(ZipArchive::new(stream)?))
            }
        }
    }
}

impl Storage for ZipStorage<'_> {
    fn open(&mut self) -> Result<()> {
        if self.opened {
            return Ok(());
        }
        if self.stream.is_none() && self.archive.is_none() {
            let Some(path) = self.path.clone() else {
                return Err(PackageError::NotOpen);
            };
            let file = File::open(&path)
                .map_err(|source| PackageError::OpenFailed { path, source })?;
            self.stream = Some(SourceStream::owned(file));
            self.stream_from_path = true;
        }
        self.opened = true;
        Ok(())
    }

    fn close(&mut self) {
        if let Some(archive) = self.archive.take() {
            self.stream = Some(archive.into_inner());
        }
        if self.stream_from_path {
            self.stream = None;
            self.stream_from_path = false;
        }
        self.opened = false;
    }

    fn is_open(&self) -> bool {
        self.opened
    }

    fn root(&self) -> PathBuf {
        PathBuf::from("/")
    }

    fn entries(&mut self) -> Result<Vec<String>> {
        let archive = self.archive()?;
        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index)?;
            if entry.is_file() {
                entries.push(entry.name().to_string());
            }
        }
        Ok(entries)
    }

    fn try_read(&mut self, relative_path: &str) -> Result<Vec<u8>> {
        debug!("reading '{}' from archive", relative_path);
        let archive = self.archive()?;
        let mut entry = match archive.by_name(relative_path) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(PackageError::MissingEntry(relative_path.to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    fn rebind_path(&mut self, path: &Path) {
        self.archive = None;
        if self.stream_from_path {
            self.stream = None;
            self.stream_from_path = false;
        }
        self.path = Some(path.to_path_buf());
    }
}
