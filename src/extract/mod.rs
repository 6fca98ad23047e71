//! # Extraction & Timestamp Restore Module
//!
//! Unpacks the source archive into an extraction root next to it, then walks
//! the extracted tree and restores each file's capture timestamp from its
//! sidecar. Extraction always completes fully before the timestamp pass
//! starts, so a sidecar stored after its media file in the zip is still seen.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::RestoreError;
use crate::{fsx, sidecar};

/// Unpacks `archive_path` and restores capture timestamps.
///
/// Every entry lands under `<archive_dir>/<archive_stem>_extracted` with its
/// relative path preserved. Afterwards, every extracted regular file whose
/// sidecar exists and carries `photoTakenTime.timestamp` gets its creation
/// time set to that value; directories and files without a sidecar keep
/// whatever the extraction left them with.
///
/// Returns the extraction root, the input for the geotag reconciler.
pub fn extract_archive(archive_path: &Path) -> Result<PathBuf, RestoreError> {
    let file = File::open(archive_path).map_err(|e| RestoreError::io(e, archive_path))?;
    let mut archive = ZipArchive::new(file)?;

    let root = extraction_root(archive_path);
    info!(
        archive = %archive_path.display(),
        root = %root.display(),
        entries = archive.len(),
        "extracting archive"
    );

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            warn!(name = entry.name(), "skipping entry with unsafe path");
            continue;
        };
        let out_path = root.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| RestoreError::io(e, &out_path))?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent).map_err(|e| RestoreError::io(e, parent))?;
            }
            let mut out = File::create(&out_path).map_err(|e| RestoreError::io(e, &out_path))?;
            io::copy(&mut entry, &mut out).map_err(|e| RestoreError::io(e, &out_path))?;
        }
    }

    restore_timestamps(&root)?;
    Ok(root)
}

/// The extraction root is a sibling of the archive, named after its stem so
/// two archives in one directory do not collide.
fn extraction_root(archive_path: &Path) -> PathBuf {
    let stem = archive_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string());
    archive_path.with_file_name(format!("{stem}_extracted"))
}

/// Second pass over the extracted tree: set each paired file's creation time
/// from its sidecar's `photoTakenTime.timestamp`.
///
/// A sidecar that fails to parse only costs that one file its timestamp; the
/// pass logs a warning and continues.
fn restore_timestamps(root: &Path) -> Result<(), RestoreError> {
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry during timestamp restore");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(sidecar_path) = sidecar::sidecar_for(path) else {
            continue;
        };

        let metadata = match sidecar::load(&sidecar_path) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(error = %e, "skipping timestamp restore");
                continue;
            }
        };
        let Some(timestamp) = metadata.photo_taken_time.and_then(|t| t.timestamp) else {
            continue;
        };

        fsx::set_creation_time(path, timestamp).map_err(|e| RestoreError::io(e, path))?;
        debug!(
            path = %path.display(),
            taken = %chrono::DateTime::from_timestamp(timestamp, 0)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| timestamp.to_string()),
            "restored capture time"
        );
    }
    Ok(())
}
