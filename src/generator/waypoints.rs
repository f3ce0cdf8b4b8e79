//! GPX waypoints generator API

use geo::{BoundingRect, MultiPoint, Rect};
use gpx::{Gpx, GpxVersion, Metadata, Waypoint};
use time::OffsetDateTime;

use crate::PhotoAssociation;

/// One waypoint per located photo
pub struct WaypointGenerator {
    pub associations: Vec<PhotoAssociation>,
    /// Document time, now when not set
    pub time: Option<OffsetDateTime>,
}

impl WaypointGenerator {
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn new(associations: Vec<PhotoAssociation>) -> Self {
        Self {
            associations,
            time: None,
        }
    }

    pub fn generate(self) -> Result<Gpx, String> {
        let mut metadata = Metadata::default();
        metadata.time = Some(self.time.unwrap_or_else(OffsetDateTime::now_utc).into());
        metadata.bounds = bounds(&self.associations);

        let mut gpx: Gpx = Default::default();
        gpx.version = GpxVersion::Gpx11;
        gpx.creator = Some("photo2gpx".to_string());
        gpx.metadata = Some(metadata);

        for assoc in self.associations {
            let name = assoc.photo.short_name();

            let mut wp = Waypoint::new(assoc.sample.coordinates());
            wp.elevation = Some(assoc.sample.elevation());
            wp.time = Some(assoc.photo.time.into());
            wp.name = Some(name.clone());
            wp.comment = Some(name.clone());
            wp.description = Some(name);

            gpx.waypoints.push(wp);
        }

        Ok(gpx)
    }
}

/// Min/max latitude and longitude of all the waypoints
fn bounds(associations: &[PhotoAssociation]) -> Option<Rect> {
    let points: MultiPoint = associations
        .iter()
        .map(|a| a.sample.coordinates())
        .collect();

    points.bounding_rect()
}
