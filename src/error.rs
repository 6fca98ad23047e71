use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for all operations in the `photorestore` crate.
///
/// Variants split into two classes: fatal errors that abort the whole run
/// ([`RestoreError::MalformedArchive`], archive-level I/O) and per-file errors
/// that are collected into the batch report while processing continues
/// ([`RestoreError::MalformedSidecar`], [`RestoreError::UnsupportedFileFormat`],
/// [`RestoreError::CorruptMetadataBlock`]).
#[derive(Debug, Error)]
pub enum RestoreError {
    /// The source archive is unreadable or not a valid zip container.
    #[error("malformed archive: {0}")]
    MalformedArchive(#[from] zip::result::ZipError),

    /// A sidecar file exists but its JSON could not be parsed.
    #[error("malformed sidecar '{}': {source}", .path.display())]
    MalformedSidecar {
        source: serde_json::Error,
        path: PathBuf,
    },

    /// The media file's container cannot host an embedded metadata block.
    #[error("unsupported file format: '{}'", .0.display())]
    UnsupportedFileFormat(PathBuf),

    /// The file's existing embedded metadata block could not be parsed,
    /// so it cannot be patched without risking the rest of its tags.
    #[error("corrupt metadata block in '{}': {detail}", .path.display())]
    CorruptMetadataBlock { path: PathBuf, detail: String },

    /// An I/O error occurred, typically while reading or writing a file.
    /// Includes the path where the error happened.
    #[error("I/O error on path '{}': {source}", .path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

impl RestoreError {
    /// Wraps an I/O error together with the path it occurred on.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        RestoreError::Io {
            source,
            path: path.into(),
        }
    }
}

impl From<std::io::Error> for RestoreError {
    fn from(err: std::io::Error) -> Self {
        RestoreError::Io {
            source: err,
            path: PathBuf::new(), // Generic path
        }
    }
}
