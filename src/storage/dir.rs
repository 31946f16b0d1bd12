//! Plain-directory backing.

use super::Storage;
use crate::error::{PackageError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Container backing for an unpacked directory tree.
///
/// Bound to a file inside the container (typically the score document); the
/// file's parent directory is the container root. No handle is held between
/// calls, so openness is re-checked against the filesystem every time.
pub struct DirStorage {
    bound: PathBuf,
}

impl DirStorage {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        DirStorage { bound: path.into() }
    }
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

impl Storage for DirStorage {
    fn open(&mut self) -> Result<()> {
        let root = self.root();
        if !root.exists() {
            return Err(PackageError::RootNotFound(root));
        }
        Ok(())
    }

    fn close(&mut self) {
        // no persistent handle held
    }

    fn is_open(&self) -> bool {
        self.root().exists()
    }

    fn root(&self) -> PathBuf {
        let bound = std::path::absolute(&self.bound).unwrap_or_else(|_| self.bound.clone());
        match bound.parent() {
            Some(parent) => parent.to_path_buf(),
            None => bound,
        }
    }

    fn entries(&mut self) -> Result<Vec<String>> {
        let root = self.root();
        let mut entries = Vec::new();
        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry under {}: {}", root.display(), err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
            entries.push(relative.to_string_lossy().replace('\\', "/"));
        }
        Ok(entries)
    }

    fn try_read(&mut self, relative_path: &str) -> Result<Vec<u8>> {
        let path = self.root().join(relative_path);
        debug!("reading '{}' from directory", path.display());
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(PackageError::MissingEntry(relative_path.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn rebind_path(&mut self, path: &Path) {
        self.bound = path.to_path_buf();
    }
}
