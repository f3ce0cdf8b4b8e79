//! Track and photo sources API

use serde::Deserialize;

use crate::{GeoSample, GeotagError, Photo};

/// Tracklog source
pub trait SampleSource {
    /// Fetch every usable sample. Malformed samples are skipped, only a
    /// source that can't be read at all is an error.
    fn fetch(&mut self) -> Result<Vec<GeoSample>, GeotagError>;
}

/// Photos to be located
pub trait PhotoSource {
    /// One result per photo, so a bad photo doesn't stop the others
    fn fetch(&mut self) -> Vec<Result<Photo, GeotagError>>;
}

/// Column names of the text based track sources
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldsConfiguration {
    pub time: String,
    pub lat: String,
    pub lon: String,
    pub elevation: String,
}

impl Default for FieldsConfiguration {
    fn default() -> Self {
        Self {
            time: "time".to_string(),
            lat: "lat".to_string(),
            lon: "lon".to_string(),
            elevation: "elevation".to_string(),
        }
    }
}

mod gpx_file;
pub use gpx_file::GpxSource;

#[cfg(feature = "csv")]
mod csv_file;
#[cfg(feature = "csv")]
pub use csv_file::CsvSource;

#[cfg(feature = "exif")]
mod exif;
#[cfg(feature = "exif")]
pub use exif::{jpegs_in_dir, ExifReader};

/// Photos with known times
impl PhotoSource for Vec<Photo> {
    fn fetch(&mut self) -> Vec<Result<Photo, GeotagError>> {
        self.drain(..).map(Ok).collect()
    }
}
