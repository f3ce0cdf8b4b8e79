//! Track sample definition

use geo::geometry::Point;
use time::format_description::well_known;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::GeotagError;

/// A timestamped position of the tracklog
///
/// Built once by a source and never changed afterwards, the matcher hands
/// out copies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoSample {
    coordinates: Point,
    time: OffsetDateTime,
    elevation: f64,
}

impl GeoSample {
    pub fn new(coordinates: Point, time: OffsetDateTime, elevation: f64) -> Self {
        Self {
            coordinates,
            time,
            elevation,
        }
    }

    /// Longitude and latitude, as `x` and `y`
    pub fn coordinates(&self) -> Point {
        self.coordinates
    }

    pub fn lat(&self) -> f64 {
        self.coordinates.y()
    }

    pub fn lon(&self) -> f64 {
        self.coordinates.x()
    }

    pub fn time(&self) -> OffsetDateTime {
        self.time
    }

    /// Meters
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Short human readable form, used on the photo comment
    pub fn summary(&self) -> String {
        format!(
            "Lat: {:.6} Lon: {:.6} Alt: {}m",
            self.lat(),
            self.lon(),
            self.elevation.trunc() as i64
        )
    }
}

/// Unvalidated sample, as read by the text based sources
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSample {
    pub time: String,
    pub lat: String,
    pub lon: String,
    pub ele: String,
}

impl TryFrom<RawSample> for GeoSample {
    type Error = GeotagError;

    fn try_from(raw: RawSample) -> Result<Self, Self::Error> {
        let time = parse_track_time(&raw.time)?;

        let lat = parse_coordinate("lat", &raw.lat, 90.0)?;
        let lon = parse_coordinate("lon", &raw.lon, 180.0)?;

        let ele = raw.ele.trim();
        if ele.is_empty() {
            return Err(GeotagError::malformed("ele", "missing value"));
        }
        let elevation = ele
            .parse::<f64>()
            .map_err(|e| GeotagError::malformed("ele", e))?;
        if !elevation.is_finite() {
            return Err(GeotagError::malformed("ele", "not a finite number"));
        }

        Ok(GeoSample::new(Point::new(lon, lat), time, elevation))
    }
}

fn parse_coordinate(field: &'static str, raw: &str, limit: f64) -> Result<f64, GeotagError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(GeotagError::malformed(field, "missing value"));
    }

    let value = raw
        .parse::<f64>()
        .map_err(|e| GeotagError::malformed(field, e))?;

    if !value.is_finite() || value.abs() > limit {
        return Err(GeotagError::malformed(
            field,
            format!("{} out of range [-{}, {}]", value, limit, limit),
        ));
    }

    Ok(value)
}

/// Parse a tracklog time: RFC3339 or the same without any zone
/// suffix, which is taken as UTC
pub fn parse_track_time(raw: &str) -> Result<OffsetDateTime, GeotagError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(GeotagError::malformed("time", "missing value"));
    }

    if let Ok(time) = OffsetDateTime::parse(raw, &well_known::Rfc3339) {
        return Ok(time);
    }

    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
    );

    PrimitiveDateTime::parse(raw, format)
        .map(|t| t.assume_utc())
        .map_err(|e| GeotagError::malformed("time", e))
}
