//! EXIF-backed implementation of the [`GpsTagCodec`] contract, built on the
//! `little_exif` crate.
//!
//! The patch never touches the original file directly: the file is copied to a
//! temporary sibling, the GPS tags are written into the copy, and the copy is
//! atomically renamed over the original. A failure at any stage leaves the
//! original byte-identical.

use std::fs;
use std::io;
use std::path::Path;

use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata;
use little_exif::rational::uR64;
use tracing::debug;

use crate::error::RestoreError;
use crate::fsx;
use crate::geotag::{Dms, GpsTagCodec, GpsTags};

/// File extensions whose containers can host an EXIF block.
const SUPPORTED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "tiff", "tif", "heic", "heif", "jxl",
];

/// Writes GPS tags through `little_exif`, preserving all non-GPS tags.
pub struct ExifGpsCodec;

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

fn to_ur64(dms: &Dms) -> Vec<uR64> {
    dms.iter()
        .map(|r| uR64 {
            nominator: r.numerator,
            denominator: r.denominator,
        })
        .collect()
}

impl GpsTagCodec for ExifGpsCodec {
    fn patch_gps(&self, path: &Path, tags: &GpsTags) -> Result<(), RestoreError> {
        if !is_supported(path) {
            return Err(RestoreError::UnsupportedFileFormat(path.to_path_buf()));
        }

        // Load the existing block first so every non-GPS tag survives the
        // rewrite. A file that simply has no EXIF block yet gets a fresh one;
        // only a block that exists but cannot be parsed is corrupt.
        let mut metadata = match Metadata::new_from_path(path) {
            Ok(metadata) => metadata,
            Err(e) if format!("{e:?}").contains("No EXIF data") => Metadata::new(),
            Err(e) => {
                return Err(RestoreError::CorruptMetadataBlock {
                    path: path.to_path_buf(),
                    detail: format!("{e:?}"),
                })
            }
        };

        metadata.set_tag(ExifTag::GPSLatitudeRef(tags.latitude_ref.to_string()));
        metadata.set_tag(ExifTag::GPSLatitude(to_ur64(&tags.latitude)));
        metadata.set_tag(ExifTag::GPSLongitudeRef(tags.longitude_ref.to_string()));
        metadata.set_tag(ExifTag::GPSLongitude(to_ur64(&tags.longitude)));

        // No altitude in the sidecar leaves whatever altitude tags the file
        // already carries exactly as they are.
        if let Some(alt) = &tags.altitude {
            metadata.set_tag(ExifTag::GPSAltitudeRef(vec![alt.sea_level_ref]));
            metadata.set_tag(ExifTag::GPSAltitude(vec![uR64 {
                nominator: alt.meters.numerator,
                denominator: alt.meters.denominator,
            }]));
        }

        // Patch a temporary copy in the same directory, then atomically
        // replace the original. `little_exif` keys its container handling off
        // the extension, so the copy keeps it.
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let suffix = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        let tmp = tempfile::Builder::new()
            .prefix(".photorestore-")
            .suffix(&suffix)
            .tempfile_in(dir)
            .map_err(|e| RestoreError::io(e, dir))?;

        // The replace swaps the underlying file, so snapshot its timestamps
        // first: the restorer may already have set the capture time.
        let times = fs::metadata(path).map_err(|e| RestoreError::io(e, path))?;

        fs::copy(path, tmp.path()).map_err(|e| RestoreError::io(e, path))?;
        metadata
            .write_to_file(tmp.path())
            .map_err(|e| RestoreError::io(io::Error::other(format!("{e:?}")), path))?;
        tmp.persist(path)
            .map_err(|e| RestoreError::io(e.error, path))?;
        fsx::restore_file_times(path, &times).map_err(|e| RestoreError::io(e, path))?;

        debug!(path = %path.display(), "patched GPS tags");
        Ok(())
    }
}
