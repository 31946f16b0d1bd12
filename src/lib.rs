//! # Scorepack - Read-Only Score Package Accessor
//!
//! `scorepack` reads the compressed-container format used for music
//! documents: a package bundling the primary score document (`*.mscx`),
//! embedded images under `Pictures/`, an optional audio rendering, optional
//! audio settings, and a thumbnail. A package is physically stored either as
//! a single ZIP archive or as an equivalent plain directory tree;
//! [`PackageReader`] presents the same logical view over both.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scorepack::{Mode, PackageReader, Result};
//!
//! # fn main() -> Result<()> {
//! let mut package = PackageReader::from_path("song.mscz", Mode::Zip);
//! package.open()?;
//!
//! let score = package.read_score()?;
//! let thumbnail = package.read_thumbnail()?;
//!
//! for name in package.image_file_names()? {
//!     let image = package.read_image(&name)?;
//!     println!("{name}: {} bytes", image.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading from memory
//!
//! A package held in a buffer (or any `Read + Seek` stream) is always
//! treated as a ZIP archive. [`SourceStream`] records whether the reader
//! owns the stream or merely borrows it:
//!
//! ```rust,no_run
//! use scorepack::{PackageReader, SourceStream};
//! use std::io::Cursor;
//!
//! # fn main() -> scorepack::Result<()> {
//! # let bytes: Vec<u8> = Vec::new();
//! let mut package = PackageReader::from_stream(SourceStream::owned(Cursor::new(bytes)));
//! package.open()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Missing entries
//!
//! A container without a thumbnail or audio rendering is a normal, expected
//! state: the corresponding reads return empty bytes rather than an error.
//! The one hard failure is reading before a successful
//! [`open`](PackageReader::open), which fails with
//! [`PackageError::NotOpen`] to catch programming errors early.
//!
//! Readers are single-owner, sequential state - all operations take
//! `&mut self`. Share one across threads only behind a caller-side mutex.

pub mod error;
pub mod format;
pub mod meta;
pub mod reader;
pub mod storage;

pub use error::{PackageError, Result};
pub use meta::PackageMeta;
pub use reader::{Mode, PackageReader};
pub use storage::{DirStorage, ReadSeek, SourceStream, Storage, ZipStorage};
