//! Time ordered tracklog

use time::OffsetDateTime;

use super::sample::GeoSample;

/// All the samples of a tracklog, ascending by time
#[derive(Debug, Clone, Default)]
pub struct TrackSeries {
    samples: Vec<GeoSample>,
}

impl TrackSeries {
    /// Build the series, sorting the samples. Samples sharing a
    /// timestamp keep the input order.
    pub fn new(mut samples: Vec<GeoSample>) -> Self {
        samples.sort_by_key(|s| s.time());

        Self { samples }
    }

    pub fn samples(&self) -> &[GeoSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&GeoSample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&GeoSample> {
        self.samples.last()
    }

    /// Samples around `time`: the latest one strictly before it and the
    /// earliest one at or after it
    pub fn bracket(&self, time: OffsetDateTime) -> (Option<&GeoSample>, Option<&GeoSample>) {
        let idx = self.samples.partition_point(|s| s.time() < time);

        let before = match idx {
            0 => None,
            i => self.samples.get(i - 1),
        };
        let after = self.samples.get(idx);

        (before, after)
    }
}

impl FromIterator<GeoSample> for TrackSeries {
    fn from_iter<I: IntoIterator<Item = GeoSample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
