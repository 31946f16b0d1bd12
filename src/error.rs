use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("failed to open package at {}: {source}", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("package root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("archive backend error: {0}")]
    Backend(#[from] zip::result::ZipError),

    #[error("no such entry in package: {0}")]
    MissingEntry(String),

    #[error("package is not open")]
    NotOpen,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PackageError>;
