//! Outputs: waypoints, photo metadata updates

use crate::{GeoSample, GeotagError, Photo};

pub mod dms;
pub mod exiv2;
pub mod geotagger;
pub mod waypoints;

/// Receives the position found for each photo
pub trait PositionSink {
    fn persist(&mut self, photo: &Photo, sample: &GeoSample) -> Result<(), GeotagError>;
}
