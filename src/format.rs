//! Well-known paths inside a score package container.
//!
//! The layout is fixed, case-sensitive, and uses forward-slash separators
//! relative to the container root: the score body is the `*.mscx` entry,
//! embedded images live under `Pictures/`, and the thumbnail, audio
//! rendering, and audio settings sit at reserved names.

/// Suffix of the primary score document entry.
pub const SCORE_SUFFIX: &str = ".mscx";

/// Top-level folder holding embedded images, including the separator.
pub const IMAGES_PREFIX: &str = "Pictures/";

/// Fixed thumbnail entry.
pub const THUMBNAIL_PATH: &str = "Thumbnails/thumbnail.png";

/// Fixed audio rendering entry.
pub const AUDIO_PATH: &str = "audio.ogg";

/// Fixed audio settings entry (JSON).
pub const AUDIO_SETTINGS_PATH: &str = "audiosettings.json";
