//! # photorestore Core Library
//!
//! This crate provides the core functionality for the `photorestore` tool:
//! it unpacks a media export archive, restores each file's capture timestamp
//! from its sidecar JSON, and rewrites each file's embedded GPS tags to match
//! the sidecar's recorded coordinates.
//!
//! ## Key Modules
//!
//! - [`extract`]: Unpacks the archive and restores capture timestamps.
//! - [`reconcile`]: Walks the extracted tree and patches GPS tags per file.
//! - [`geotag`]: DMS coordinate encoding and the metadata-codec seam.
//! - [`sidecar`]: Sidecar JSON schema and media/sidecar pairing.
//! - [`fsx`]: Cross-platform file-timestamp wrapper.

pub mod cli;
pub mod error;
pub mod extract;
pub mod fsx;
pub mod geotag;
pub mod reconcile;
pub mod sidecar;

pub use error::RestoreError;
