//! # Geotag Reconciliation Module
//!
//! Walks an extraction root, pairs sidecars with their media files, and
//! patches GPS tags through a [`GpsTagCodec`]. Each file's reconciliation is
//! independent: a failure is recorded in the report and the walk continues.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::RestoreError;
use crate::geotag::{GpsTagCodec, GpsTags};
use crate::sidecar;

/// What happened to one paired media file during reconciliation.
#[derive(Debug)]
pub enum Outcome {
    /// GPS tags were written into the file.
    Updated,
    /// The sidecar carried no `geoData`; nothing to do.
    NoGeoData,
    /// The update failed; the file is unchanged.
    Failed(RestoreError),
}

/// Per-file outcomes of one reconciliation run, in traversal order.
///
/// Files without a sidecar and orphan sidecars never appear here; only
/// paired media files get an entry.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub outcomes: Vec<(PathBuf, Outcome)>,
}

impl ReconcileReport {
    pub fn updated_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, Outcome::Updated))
            .count()
    }

    /// The files whose update failed, with the failure for each.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &RestoreError)> {
        self.outcomes.iter().filter_map(|(path, outcome)| match outcome {
            Outcome::Failed(err) => Some((path.as_path(), err)),
            _ => None,
        })
    }
}

/// Visits every sidecar under `root` and patches its media file's GPS tags
/// where the sidecar carries `geoData`.
///
/// Unreadable directory entries and per-file patch failures never abort the
/// run; everything that could not be updated ends up in the report.
pub fn reconcile_tree(
    root: &Path,
    codec: &dyn GpsTagCodec,
) -> Result<ReconcileReport, RestoreError> {
    let mut report = ReconcileReport::default();
    info!(root = %root.display(), "reconciling geotags");

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry during reconciliation");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(media) = sidecar::media_for(entry.path()) else {
            continue;
        };

        let outcome = reconcile_file(entry.path(), &media, codec);
        if let Outcome::Failed(err) = &outcome {
            warn!(media = %media.display(), error = %err, "geotag update failed");
        }
        report.outcomes.push((media, outcome));
    }

    info!(
        updated = report.updated_count(),
        failed = report.failures().count(),
        "reconciliation finished"
    );
    Ok(report)
}

fn reconcile_file(sidecar_path: &Path, media: &Path, codec: &dyn GpsTagCodec) -> Outcome {
    let metadata = match sidecar::load(sidecar_path) {
        Ok(metadata) => metadata,
        Err(err) => return Outcome::Failed(err),
    };
    let Some(geo) = metadata.geo_data else {
        return Outcome::NoGeoData;
    };

    let tags = GpsTags::from_geo_data(&geo);
    match codec.patch_gps(media, &tags) {
        Ok(()) => {
            debug!(media = %media.display(), "geotags updated");
            Outcome::Updated
        }
        Err(err) => Outcome::Failed(err),
    }
}
