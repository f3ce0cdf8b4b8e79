//! Photos to track positions

use std::path::PathBuf;

use log::{info, warn};
use serde::Deserialize;

use super::PositionSink;
use crate::{
    GeoSample, GeotagError, MatchMode, Matcher, Photo, PhotoAssociation, PhotoSource,
    SampleSource, Threshold, TrackSeries,
};

/// Matching configuration
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Max seconds between the photo and the track sample, negative for no limit
    pub threshold: i64,
    /// Blend the samples around the photo time instead of taking the closest one
    pub interpolate: bool,
    /// Hours added to the photo times
    pub time_offset: i64,
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matcher(&self) -> Matcher {
        Matcher::new(
            MatchMode::from_flag(self.interpolate),
            Threshold::from_seconds(self.threshold),
        )
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: 300, // 5 minutes
            interpolate: false,
            time_offset: 0,
        }
    }
}

/// Outcome of a batch
#[derive(Debug, Default)]
pub struct GeotagReport {
    pub associations: Vec<PhotoAssociation>,
    /// Photos without any track sample close enough
    pub unmatched: Vec<PathBuf>,
    /// Unreadable photos and failed metadata updates
    pub failures: Vec<GeotagError>,
}

/// Locates photos on a tracklog
pub struct Geotagger {
    series: TrackSeries,
    matcher: Matcher,
}

impl Geotagger {
    pub fn new(series: TrackSeries, matcher: Matcher) -> Self {
        Self { series, matcher }
    }

    /// Build the track series once from the source
    pub fn from_source<SO>(mut source: SO, matcher: Matcher) -> Result<Self, GeotagError>
    where
        SO: SampleSource,
    {
        let series = TrackSeries::new(source.fetch()?);
        if series.is_empty() {
            warn!("The tracklog has no usable samples, no photo will be located");
        }

        Ok(Self::new(series, matcher))
    }

    pub fn series(&self) -> &TrackSeries {
        &self.series
    }

    pub fn locate(&self, photo: &Photo) -> Option<GeoSample> {
        self.matcher.match_time(&self.series, photo.time)
    }

    /// Locate every photo of the source, updating them on the sink when
    /// provided. A failed photo never stops the batch.
    pub fn run<PS>(&self, mut photos: PS, mut sink: Option<&mut dyn PositionSink>) -> GeotagReport
    where
        PS: PhotoSource,
    {
        let mut report = GeotagReport::default();

        for photo in photos.fetch() {
            let photo = match photo {
                Ok(photo) => photo,
                Err(e) => {
                    warn!("{}", e);
                    report.failures.push(e);
                    continue;
                }
            };

            let sample = match self.locate(&photo) {
                Some(sample) => sample,
                None => {
                    warn!("{}: no track point close to {}", photo.path.display(), photo.time);
                    report.unmatched.push(photo.path);
                    continue;
                }
            };
            info!("{}: {}", photo.path.display(), sample.summary());

            if let Some(sink) = sink.as_mut() {
                if let Err(e) = sink.persist(&photo, &sample) {
                    warn!("{}", e);
                    report.failures.push(e);
                }
            }

            report.associations.push(PhotoAssociation { photo, sample });
        }

        report
    }
}
