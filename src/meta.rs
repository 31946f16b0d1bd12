//! Single-pass classification of container entries into roles.

use crate::format::{IMAGES_PREFIX, SCORE_SUFFIX};
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Classified view of a container's entry list.
///
/// `score_path` is the last `*.mscx` entry in enumeration order and
/// `image_paths` collects every entry under `Pictures/`, preserving that
/// order. Audio, audio settings, and thumbnail entries are never scanned
/// for; the format reserves fixed names for them (see [`crate::format`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMeta {
    /// Relative path of the primary score document, if the container has one.
    pub score_path: Option<String>,

    /// Relative paths of all embedded images, in enumeration order.
    pub image_paths: Vec<String>,
}

impl PackageMeta {
    /// Classify the backing's full entry list into a fresh snapshot.
    ///
    /// Never merges with a previous run. Enumeration failure degrades to an
    /// empty snapshot.
    pub(crate) fn scan(storage: &mut dyn Storage) -> Self {
        let entries = match storage.entries() {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to enumerate container entries: {}", err);
                Vec::new()
            }
        };

        let mut meta = PackageMeta::default();
        for path in entries {
            if path.ends_with(SCORE_SUFFIX) {
                // Multiple candidates: the last one enumerated wins.
                meta.score_path = Some(path);
            } else if path.starts_with(IMAGES_PREFIX) {
                meta.image_paths.push(path);
            }
        }
        meta
    }

    /// Final path component of each image entry, in enumeration order.
    pub fn image_file_names(&self) -> Vec<String> {
        self.image_paths
            .iter()
            .map(|path| path.rsplit('/').next().unwrap_or(path).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PackageError, Result};
    use std::path::{Path, PathBuf};

    struct FakeStorage {
        entries: Vec<String>,
    }

    impl FakeStorage {
        fn new(entries: &[&str]) -> Self {
            FakeStorage {
                entries: entries.iter().map(|e| e.to_string()).collect(),
            }
        }
    }

    impl Storage for FakeStorage {
        fn open(&mut self) -> Result<()> {
            Ok(())
        }

        fn close(&mut self) {}

        fn is_open(&self) -> bool {
            true
        }

        fn root(&self) -> PathBuf {
            PathBuf::from("/")
        }

        fn entries(&mut self) -> Result<Vec<String>> {
            Ok(self.entries.clone())
        }

        fn try_read(&mut self, relative_path: &str) -> Result<Vec<u8>> {
            Err(PackageError::MissingEntry(relative_path.to_string()))
        }

        fn rebind_path(&mut self, _path: &Path) {}
    }

    #[test]
    fn classifies_score_and_images() {
        let mut storage = FakeStorage::new(&[
            "Score.mscx",
            "Pictures/a.png",
            "Pictures/b.png",
            "Thumbnails/thumbnail.png",
            "audio.ogg",
        ]);

        let meta = PackageMeta::scan(&mut storage);
        assert_eq!(meta.score_path.as_deref(), Some("Score.mscx"));
        assert_eq!(meta.image_paths, vec!["Pictures/a.png", "Pictures/b.png"]);
    }

    #[test]
    fn last_score_candidate_wins() {
        let mut storage = FakeStorage::new(&["First.mscx", "Second.mscx"]);

        let meta = PackageMeta::scan(&mut storage);
        assert_eq!(meta.score_path.as_deref(), Some("Second.mscx"));
    }

    #[test]
    fn score_suffix_beats_images_prefix() {
        // An .mscx under Pictures/ classifies as the score, not as an image.
        let mut storage = FakeStorage::new(&["Pictures/odd.mscx", "Pictures/a.png"]);

        let meta = PackageMeta::scan(&mut storage);
        assert_eq!(meta.score_path.as_deref(), Some("Pictures/odd.mscx"));
        assert_eq!(meta.image_paths, vec!["Pictures/a.png"]);
    }

    #[test]
    fn empty_list_yields_empty_snapshot() {
        let mut storage = FakeStorage::new(&[]);

        let meta = PackageMeta::scan(&mut storage);
        assert_eq!(meta, PackageMeta::default());
    }

    #[test]
    fn image_file_names_are_basenames_in_order() {
        let mut storage = FakeStorage::new(&["Pictures/b.png", "Pictures/nested/a.png"]);

        let meta = PackageMeta::scan(&mut storage);
        assert_eq!(meta.image_file_names(), vec!["b.png", "a.png"]);
    }
}
