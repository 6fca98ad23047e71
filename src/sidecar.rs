//! Sidecar JSON schema and the filename-convention pairing between media
//! files and their sidecars.
//!
//! A sidecar is named by appending `.json` to the media file's full name
//! (`IMG_1.jpg` -> `IMG_1.jpg.json`). The pairing is purely filename-derived;
//! no content-based matching happens. Both lookup directions return an
//! `Option` so the "no partner" case is an ordinary branch, not an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::error::RestoreError;

/// Suffix appended to a media file name to form its sidecar name.
pub const SIDECAR_SUFFIX: &str = ".json";

/// Per-file metadata as exported in a sidecar JSON file.
///
/// Only the fields the restore pipeline consumes are modeled; everything else
/// in the export is ignored. A missing field contributes no update for that
/// file and is not an error.
#[derive(Debug, Clone, Deserialize)]
pub struct SidecarMetadata {
    #[serde(default, rename = "photoTakenTime")]
    pub photo_taken_time: Option<PhotoTakenTime>,
    #[serde(default, rename = "geoData")]
    pub geo_data: Option<GeoData>,
}

/// The capture-time record inside a sidecar.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoTakenTime {
    /// Unix epoch seconds. Exports encode this as a JSON string, but an
    /// integer is accepted too; fractional values are truncated to whole
    /// seconds.
    #[serde(default, deserialize_with = "deserialize_epoch_seconds")]
    pub timestamp: Option<i64>,
}

/// Recorded geolocation of the capture.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoData {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude: Option<f64>,
}

fn deserialize_epoch_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(v)) => Ok(Some(v)),
        Some(Raw::Float(v)) => Ok(Some(v.trunc() as i64)),
        Some(Raw::Str(s)) => {
            let s = s.trim();
            if let Ok(v) = s.parse::<i64>() {
                Ok(Some(v))
            } else {
                s.parse::<f64>()
                    .map(|v| Some(v.trunc() as i64))
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}

/// Reads and parses a sidecar file.
pub fn load(path: &Path) -> Result<SidecarMetadata, RestoreError> {
    let bytes = fs::read(path).map_err(|e| RestoreError::io(e, path))?;
    serde_json::from_slice(&bytes).map_err(|e| RestoreError::MalformedSidecar {
        source: e,
        path: path.to_path_buf(),
    })
}

/// Returns the sidecar path for a media file, if one exists on disk next to it.
pub fn sidecar_for(media: &Path) -> Option<PathBuf> {
    let mut name = media.file_name()?.to_os_string();
    name.push(SIDECAR_SUFFIX);
    let candidate = media.with_file_name(name);
    candidate.is_file().then_some(candidate)
}

/// Returns the media path a sidecar belongs to, if that media file exists.
///
/// Returns `None` for paths that are not sidecars at all (no `.json` suffix),
/// for a bare `.json` with an empty stem, and for orphan sidecars whose media
/// partner is missing from the tree.
pub fn media_for(sidecar: &Path) -> Option<PathBuf> {
    let name = sidecar.file_name()?.to_str()?;
    let stem = name.strip_suffix(SIDECAR_SUFFIX)?;
    if stem.is_empty() {
        return None;
    }
    let candidate = sidecar.with_file_name(stem);
    candidate.is_file().then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn parses_timestamp_as_string() {
        let meta: SidecarMetadata =
            serde_json::from_str(r#"{"photoTakenTime":{"timestamp":"1609459200"}}"#).unwrap();
        assert_eq!(meta.photo_taken_time.unwrap().timestamp, Some(1609459200));
        assert!(meta.geo_data.is_none());
    }

    #[test]
    fn parses_timestamp_as_integer() {
        let meta: SidecarMetadata =
            serde_json::from_str(r#"{"photoTakenTime":{"timestamp":1609459200}}"#).unwrap();
        assert_eq!(meta.photo_taken_time.unwrap().timestamp, Some(1609459200));
    }

    #[test]
    fn truncates_fractional_timestamp() {
        let meta: SidecarMetadata =
            serde_json::from_str(r#"{"photoTakenTime":{"timestamp":"1609459200.75"}}"#).unwrap();
        assert_eq!(meta.photo_taken_time.unwrap().timestamp, Some(1609459200));
    }

    #[test]
    fn ignores_unknown_fields() {
        let meta: SidecarMetadata = serde_json::from_str(
            r#"{"title":"IMG_1.jpg","imageViews":"42",
                "geoData":{"latitude":1.5,"longitude":-2.5,"altitude":10.0},
                "geoDataExif":{"latitude":0.0,"longitude":0.0}}"#,
        )
        .unwrap();
        let geo = meta.geo_data.unwrap();
        assert_eq!(geo.latitude, 1.5);
        assert_eq!(geo.longitude, -2.5);
        assert_eq!(geo.altitude, Some(10.0));
    }

    #[test]
    fn altitude_is_optional() {
        let meta: SidecarMetadata =
            serde_json::from_str(r#"{"geoData":{"latitude":1.0,"longitude":2.0}}"#).unwrap();
        assert_eq!(meta.geo_data.unwrap().altitude, None);
    }

    #[test]
    fn load_reports_malformed_sidecar() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("IMG_1.jpg.json");
        std::fs::write(&path, b"{\"geoData\": {\"latit").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, RestoreError::MalformedSidecar { .. }));
    }

    #[test]
    fn pairing_is_filename_derived() {
        let dir = tempdir().unwrap();
        let media = dir.path().join("IMG_1.jpg");
        let sidecar = dir.path().join("IMG_1.jpg.json");
        File::create(&media).unwrap();
        File::create(&sidecar).unwrap();

        assert_eq!(sidecar_for(&media), Some(sidecar.clone()));
        assert_eq!(media_for(&sidecar), Some(media));
    }

    #[test]
    fn missing_partner_is_none() {
        let dir = tempdir().unwrap();
        let lonely_media = dir.path().join("IMG_2.jpg");
        let orphan_sidecar = dir.path().join("ghost.jpg.json");
        File::create(&lonely_media).unwrap();
        File::create(&orphan_sidecar).unwrap();

        assert_eq!(sidecar_for(&lonely_media), None);
        assert_eq!(media_for(&orphan_sidecar), None);
    }

    #[test]
    fn non_sidecar_names_are_rejected() {
        let dir = tempdir().unwrap();
        let media = dir.path().join("IMG_1.jpg");
        File::create(&media).unwrap();

        assert_eq!(media_for(&media), None);
        assert_eq!(media_for(&dir.path().join(".json")), None);
    }
}
