//! Public container reader.

use crate::error::{PackageError, Result};
use crate::format::{AUDIO_PATH, AUDIO_SETTINGS_PATH, IMAGES_PREFIX, THUMBNAIL_PATH};
use crate::meta::PackageMeta;
use crate::storage::{DirStorage, SourceStream, Storage, ZipStorage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Physical backing of a container.
///
/// Fixed at construction; the only transition is the `Dir` to `Zip` upgrade
/// performed by [`PackageReader::rebind_stream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// A single compressed archive.
    Zip,
    /// An unpacked directory tree with the same relative layout.
    Dir,
}

/// Read-only accessor for a score package container.
///
/// Role-based reads resolve entries either through a cached metadata
/// snapshot (the score document, embedded images) or through the fixed
/// well-known paths of [`crate::format`] (thumbnail, audio, audio
/// settings). A missing optional asset is a normal container state and
/// degrades to empty bytes; reading before a successful [`open`] is a
/// programming error and fails with [`PackageError::NotOpen`].
///
/// Methods take `&mut self`: a reader is single-owner, sequential state.
/// Confine an instance to one thread or guard it with a caller-side mutex.
///
/// # Examples
///
/// ```rust,no_run
/// use scorepack::{Mode, PackageReader};
///
/// # fn main() -> scorepack::Result<()> {
/// let mut package = PackageReader::from_path("song.mscz", Mode::Zip);
/// package.open()?;
///
/// let score = package.read_score()?;
/// for name in package.image_file_names()? {
///     let image = package.read_image(&name)?;
/// }
/// # Ok(())
/// # }
/// ```
///
/// [`open`]: Self::open
pub struct PackageReader<'s> {
    mode: Mode,
    path: Option<PathBuf>,
    storage: Box<dyn Storage + 's>,
    meta: Option<PackageMeta>,
    opened: bool,
}

impl<'s> PackageReader<'s> {
    /// Bind to a container at `path` with an explicit physical mode.
    ///
    /// No I/O happens until [`open`](Self::open).
    pub fn from_path(path: impl Into<PathBuf>, mode: Mode) -> Self {
        let path = path.into();
        let storage: Box<dyn Storage + 's> = match mode {
            Mode::Zip => Box::new(ZipStorage::from_path(path.clone())),
            Mode::Dir => Box::new(DirStorage::from_path(path.clone())),
        };
        PackageReader {
            mode,
            path: Some(path),
            storage,
            meta: None,
            opened: false,
        }
    }

    /// Adopt a byte stream holding a zipped container.
    ///
    /// Always [`Mode::Zip`]. The [`SourceStream`] variant decides whether
    /// the reader releases the stream on drop or the caller keeps it.
    pub fn from_stream(stream: SourceStream<'s>) -> Self {
        PackageReader {
            mode: Mode::Zip,
            path: None,
            storage: Box::new(ZipStorage::from_stream(stream)),
            meta: None,
            opened: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Path the reader was bound to, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Logical container root: `/` in zip mode, the bound path's absolute
    /// parent directory in dir mode.
    pub fn root_path(&self) -> PathBuf {
        self.storage.root()
    }

    /// Prepare the container for reading. Idempotent.
    pub fn open(&mut self) -> Result<()> {
        self.storage.open()?;
        self.opened = true;
        Ok(())
    }

    /// Release the backing's handles. Cached metadata survives; only a
    /// rebind invalidates it.
    pub fn close(&mut self) {
        self.storage.close();
        self.opened = false;
    }

    /// Whether the backing is currently readable. In dir mode this re-checks
    /// that the root still exists.
    pub fn is_open(&self) -> bool {
        self.storage.is_open()
    }

    /// Replace the data source with `stream` and switch to zip mode.
    ///
    /// The previous backing is dropped: an owned stream is released, a
    /// borrowed one returns to its caller. Cached metadata is invalidated
    /// and the reader must be opened again before reading.
    pub fn rebind_stream(&mut self, stream: SourceStream<'s>) {
        if self.mode == Mode::Dir {
            warn!("container mode changed to zip");
            self.mode = Mode::Zip;
        }
        self.storage = Box::new(ZipStorage::from_stream(stream));
        self.meta = None;
        self.opened = false;
    }

    /// Rebind to a new path without changing mode.
    ///
    /// Discards any live archive handle, invalidates cached metadata, and
    /// requires the reader to be opened again before reading.
    pub fn rebind_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.storage.rebind_path(&path);
        self.path = Some(path);
        self.meta = None;
        self.opened = false;
    }

    /// Classified entry snapshot, computed on first call and cached until a
    /// rebind invalidates it.
    pub fn meta(&mut self) -> Result<&PackageMeta> {
        self.ensure_open()?;
        match &mut self.meta {
            Some(meta) => Ok(meta),
            slot @ None => Ok(slot.insert(PackageMeta::scan(self.storage.as_mut()))),
        }
    }

    /// Bytes of the primary score document; empty if the container has none.
    pub fn read_score(&mut self) -> Result<Vec<u8>> {
        let Some(path) = self.meta()?.score_path.clone() else {
            warn!("container has no score entry");
            return Ok(Vec::new());
        };
        debug!("reading score '{}'", path);
        Ok(self.storage.read_bytes(&path))
    }

    /// Bytes of the fixed thumbnail entry; empty if absent.
    pub fn read_thumbnail(&mut self) -> Result<Vec<u8>> {
        self.ensure_open()?;
        Ok(self.storage.read_bytes(THUMBNAIL_PATH))
    }

    /// Bytes of one embedded image, addressed by file name; empty if absent.
    pub fn read_image(&mut self, name: &str) -> Result<Vec<u8>> {
        self.ensure_open()?;
        Ok(self.storage.read_bytes(&format!("{IMAGES_PREFIX}{name}")))
    }

    /// File names of every embedded image, in enumeration order.
    pub fn image_file_names(&mut self) -> Result<Vec<String>> {
        Ok(self.meta()?.image_file_names())
    }

    /// Bytes of the fixed audio rendering entry; empty if absent.
    pub fn read_audio(&mut self) -> Result<Vec<u8>> {
        self.ensure_open()?;
        Ok(self.storage.read_bytes(AUDIO_PATH))
    }

    /// Bytes of the fixed audio settings entry (JSON); empty if absent.
    pub fn read_audio_settings(&mut self) -> Result<Vec<u8>> {
        self.ensure_open()?;
        Ok(self.storage.read_bytes(AUDIO_SETTINGS_PATH))
    }

    fn ensure_open(&self) -> Result<()> {
        if self.opened {
            Ok(())
        } else {
            Err(PackageError::NotOpen)
        }
    }
}
