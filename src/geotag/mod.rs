//! # Geotag Encoding Module
//!
//! Converts decimal geographic coordinates from a sidecar into the
//! fixed-point rational values the EXIF GPS IFD stores, and defines the
//! [`GpsTagCodec`] seam through which those values are persisted into a file.
//!
//! The numeric contract matters here: coordinates are decomposed into
//! degrees/minutes/seconds with every stage *floored*, and seconds held as
//! ten-thousandths of an arc second. Flooring instead of rounding drops up to
//! one ten-thousandth of an arc second per coordinate; that truncation is
//! kept bit-for-bit compatible with existing archives written this way.

mod exif;

pub use exif::ExifGpsCodec;

use std::path::Path;

use crate::error::RestoreError;
use crate::sidecar::GeoData;

/// An unsigned EXIF rational, numerator over denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Rational {
            numerator,
            denominator,
        }
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

/// Degrees, minutes and seconds of one coordinate magnitude.
/// Degrees and minutes carry denominator 1; seconds carry denominator 10000.
pub type Dms = [Rational; 3];

/// Altitude in meters above or below sea level, millimeter precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AltitudeTag {
    pub meters: Rational,
    /// `0` above sea level, `1` below, per the EXIF GPSAltitudeRef convention.
    pub sea_level_ref: u8,
}

/// The full set of GPS IFD values computed for one media file.
///
/// Signs never appear in the magnitudes; hemispheres and the below-sea-level
/// flag carry them. `altitude` is `None` when the sidecar recorded none, in
/// which case any pre-existing altitude tags in the file must stay untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct GpsTags {
    pub latitude: Dms,
    pub latitude_ref: &'static str,
    pub longitude: Dms,
    pub longitude_ref: &'static str,
    pub altitude: Option<AltitudeTag>,
}

impl GpsTags {
    /// Encodes a sidecar's `geoData` into GPS IFD values.
    ///
    /// Zero latitude or longitude lands in the positive hemisphere
    /// (`N` / `E`) by convention.
    pub fn from_geo_data(geo: &GeoData) -> Self {
        GpsTags {
            latitude: to_dms(geo.latitude.abs()),
            latitude_ref: if geo.latitude >= 0.0 { "N" } else { "S" },
            longitude: to_dms(geo.longitude.abs()),
            longitude_ref: if geo.longitude >= 0.0 { "E" } else { "W" },
            altitude: geo.altitude.map(|alt| AltitudeTag {
                meters: Rational::new((alt.abs() * 1000.0).round() as u32, 1000),
                sea_level_ref: if alt >= 0.0 { 0 } else { 1 },
            }),
        }
    }
}

/// Decomposes a non-negative coordinate magnitude into DMS rationals.
///
/// Each stage floors: whole degrees, whole minutes of the remainder, then the
/// remaining arc seconds scaled to ten-thousandths and floored again.
pub fn to_dms(value: f64) -> Dms {
    let degrees = value as u32;
    let minutes = ((value - f64::from(degrees)) * 60.0) as u32;
    let seconds =
        ((value - f64::from(degrees) - f64::from(minutes) / 60.0) * 3600.0 * 10000.0) as u32;
    [
        Rational::new(degrees, 1),
        Rational::new(minutes, 1),
        Rational::new(seconds, 10000),
    ]
}

/// Capability contract for persisting GPS tags into a file's embedded
/// metadata block.
///
/// Implementations must replace only the GPS tags present in `tags`, leave
/// every other embedded tag untouched, and guarantee that on failure the file
/// is byte-identical to before the attempt.
pub trait GpsTagCodec {
    fn patch_gps(&self, path: &Path, tags: &GpsTags) -> Result<(), RestoreError>;
}
