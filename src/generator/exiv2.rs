//! Photo metadata update through the `exiv2` command line tool

use std::process::Command;

use log::debug;

use super::dms::{dec_to_dms, format_as_rational};
use super::PositionSink;
use crate::{GeoSample, GeotagError, Photo};

/// Writes the GPSInfo EXIF tags, plus a comment with the same
/// information, running `exiv2 -M ...` for each photo
pub struct Exiv2Writer {
    program: String,
}

impl Exiv2Writer {
    pub fn new() -> Self {
        Self {
            program: "exiv2".to_string(),
        }
    }

    /// Alternative exiv2 executable
    pub fn program(&mut self, program: String) -> &mut Self {
        self.program = program;

        self
    }
}

impl Default for Exiv2Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionSink for Exiv2Writer {
    fn persist(&mut self, photo: &Photo, sample: &GeoSample) -> Result<(), GeotagError> {
        let args = exiv2_args(photo, sample);
        debug!("{} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| GeotagError::Sink {
                path: photo.path.clone(),
                reason: format!("Failed on run {}: {}", self.program, e),
            })?;

        if !output.status.success() {
            return Err(GeotagError::Sink {
                path: photo.path.clone(),
                reason: format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(())
    }
}

/// Arguments of the exiv2 call that embeds `sample` into the photo
pub fn exiv2_args(photo: &Photo, sample: &GeoSample) -> Vec<String> {
    let lat_ref = if sample.lat() < 0.0 { "S" } else { "N" };
    let lon_ref = if sample.lon() < 0.0 { "W" } else { "E" };
    let alt_ref = if sample.elevation() < 0.0 { 1 } else { 0 };

    let commands = [
        format!("set Exif.Photo.UserComment charset=Ascii {}", sample.summary()),
        "set Exif.GPSInfo.GPSVersionID 2 2 0 0".to_string(),
        format!("set Exif.GPSInfo.GPSLatitudeRef {}", lat_ref),
        format!("set Exif.GPSInfo.GPSLatitude {}", rational_dms(sample.lat())),
        format!("set Exif.GPSInfo.GPSAltitudeRef {}", alt_ref),
        format!(
            "set Exif.GPSInfo.GPSAltitude {}",
            format_as_rational(sample.elevation().abs())
        ),
        "set Exif.GPSInfo.GPSMapDatum WGS-84".to_string(),
        format!("set Exif.GPSInfo.GPSLongitudeRef {}", lon_ref),
        format!("set Exif.GPSInfo.GPSLongitude {}", rational_dms(sample.lon())),
    ];

    let mut args = vec!["-k".to_string()];
    for cmd in commands {
        args.push("-M".to_string());
        args.push(cmd);
    }
    args.push(photo.path.to_string_lossy().to_string());

    args
}

/// `deg min sec` rationals of the absolute value
fn rational_dms(degrees: f64) -> String {
    let (deg, min, sec) = dec_to_dms(degrees.abs());

    format!(
        "{} {} {}",
        format_as_rational(deg as f64),
        format_as_rational(min as f64),
        format_as_rational(sec)
    )
}
