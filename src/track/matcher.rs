//! Photo time to track position matching

use time::OffsetDateTime;

use super::sample::GeoSample;
use super::series::TrackSeries;
use super::sphere;

/// How the position is taken from the samples around the query time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// The closest sample in time
    #[default]
    Nearest,
    /// Blend of the samples before and after, weighted by time proximity
    Interpolate,
}

impl MatchMode {
    pub fn from_flag(interpolate: bool) -> Self {
        if interpolate {
            Self::Interpolate
        } else {
            Self::Nearest
        }
    }
}

/// Max time distance between the query and a usable sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Unbounded,
    /// Seconds
    Within(f64),
}

impl Threshold {
    /// Negative values mean unbounded
    pub fn from_seconds(seconds: i64) -> Self {
        if seconds < 0 {
            Self::Unbounded
        } else {
            Self::Within(seconds as f64)
        }
    }

    pub fn accepts(&self, delta: f64) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Within(max) => delta <= *max,
        }
    }
}

impl Default for Threshold {
    /// 5 minutes
    fn default() -> Self {
        Self::Within(300.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Matcher {
    pub mode: MatchMode,
    pub threshold: Threshold,
}

impl Matcher {
    pub fn new(mode: MatchMode, threshold: Threshold) -> Self {
        Self { mode, threshold }
    }

    /// Estimated position at `time`, or `None` when no sample is within
    /// the threshold.
    ///
    /// Out of the track bounds only one side is available and that
    /// sample is returned as is, the position is never extrapolated.
    pub fn match_time(&self, series: &TrackSeries, time: OffsetDateTime) -> Option<GeoSample> {
        let (before, after) = series.bracket(time);

        let before = before.filter(|s| self.threshold.accepts(delta(s, time)));
        let after = after.filter(|s| self.threshold.accepts(delta(s, time)));

        let (before, after) = match (before, after) {
            (None, None) => return None,
            (Some(b), None) => (b, b),
            (None, Some(a)) => (a, a),
            (Some(b), Some(a)) => (b, a),
        };

        let delta_before = delta(before, time);
        let delta_after = delta(after, time);

        match self.mode {
            MatchMode::Nearest => {
                if delta_after < delta_before {
                    Some(*after)
                } else {
                    Some(*before)
                }
            }
            MatchMode::Interpolate if std::ptr::eq(before, after) => Some(*before),
            MatchMode::Interpolate => {
                let (weight_before, weight_after) = weights(delta_before, delta_after);

                let coordinates = if weight_after == 0.0 {
                    before.coordinates()
                } else if weight_before == 0.0 {
                    after.coordinates()
                } else {
                    sphere::interpolate(before, after, weight_before, weight_after)
                };
                let elevation =
                    weight_before * before.elevation() + weight_after * after.elevation();

                Some(GeoSample::new(coordinates, time, elevation))
            }
        }
    }
}

/// Seconds between the sample and the query
fn delta(sample: &GeoSample, time: OffsetDateTime) -> f64 {
    (sample.time() - time).abs().as_seconds_f64()
}

/// Normalized inverse distance weights. An exact hit takes all the weight.
fn weights(delta_before: f64, delta_after: f64) -> (f64, f64) {
    if delta_before == 0.0 {
        return (1.0, 0.0);
    }
    if delta_after == 0.0 {
        return (0.0, 1.0);
    }

    let before = 1.0 / delta_before;
    let after = 1.0 / delta_after;
    let sum = before + after;

    (before / sum, after / sum)
}
