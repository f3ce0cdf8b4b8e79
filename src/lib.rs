//! photo2gpx - Geotag photos from a GPS tracklog

mod error;
mod generator;
mod photo;
pub mod sources;
mod track;

pub use error::GeotagError;
pub use generator::dms::{dec_to_dms, dms_to_dec, format_as_rational};
pub use generator::exiv2::{exiv2_args, Exiv2Writer};
pub use generator::geotagger::{GeotagReport, Geotagger, MatchOptions};
pub use generator::waypoints::WaypointGenerator;
pub use generator::PositionSink;
pub use photo::{Photo, PhotoAssociation};
pub use sources::{FieldsConfiguration, PhotoSource, SampleSource};
pub use track::matcher::{MatchMode, Matcher, Threshold};
pub use track::sample::{parse_track_time, GeoSample, RawSample};
pub use track::series::TrackSeries;
pub use track::sphere::interpolate;
