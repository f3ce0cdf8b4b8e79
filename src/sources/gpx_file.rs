//! GPX file source integration

use std::io::Read;

use log::{debug, warn};
use time::OffsetDateTime;

use super::SampleSource;
use crate::{GeoSample, GeotagError};

/// Every track point of a GPX document, irrespective of its track
/// or segment
pub struct GpxSource<R>
where
    R: Read,
{
    reader: R,
}

impl<R> GpxSource<R>
where
    R: Read,
{
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R> SampleSource for GpxSource<R>
where
    R: Read,
{
    fn fetch(&mut self) -> Result<Vec<GeoSample>, GeotagError> {
        let doc = gpx::read(&mut self.reader)?;

        let mut samples = vec![];
        let mut skipped = 0;

        let points = doc
            .tracks
            .iter()
            .flat_map(|t| t.segments.iter())
            .flat_map(|s| s.points.iter());

        for point in points {
            let time = match point.time.clone() {
                Some(tm) => OffsetDateTime::from(tm),
                None => {
                    skipped += 1;
                    continue;
                }
            };

            let elevation = match point.elevation {
                Some(ele) => ele,
                None => {
                    warn!("Skipping track point at {}: no elevation", time);
                    skipped += 1;
                    continue;
                }
            };

            samples.push(GeoSample::new(point.point(), time, elevation));
        }

        debug!("{} track points read, {} skipped", samples.len(), skipped);

        Ok(samples)
    }
}
