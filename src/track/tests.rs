
use geo::Point;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use super::matcher::{MatchMode, Matcher, Threshold};
use super::sample::GeoSample;
use super::series::TrackSeries;

const EPS: f64 = 1e-9;

fn t0() -> OffsetDateTime {
    datetime!(2021-05-24 0:00 UTC)
}

fn at(secs: i64) -> OffsetDateTime {
    t0() + Duration::seconds(secs)
}

fn sample(secs: i64, lat: f64, lon: f64, ele: f64) -> GeoSample {
    GeoSample::new(Point::new(lon, lat), at(secs), ele)
}

/// (t=0, 0, 0, 0) and (t=100, 0, 10, 100)
fn two_points() -> TrackSeries {
    TrackSeries::new(vec![sample(0, 0.0, 0.0, 0.0), sample(100, 0.0, 10.0, 100.0)])
}

fn joinville() -> TrackSeries {
    TrackSeries::new(vec![
        sample(600, -26.3185861, -48.8619871, 7.0),
        sample(0, -26.31832, -48.8702222, 3.0),
        sample(300, -26.3185919, -48.8619776, 5.0),
        sample(900, -26.3201, -48.8590, 9.0),
    ])
}

#[test]
fn series_is_sorted() {
    let series = joinville();

    let times: Vec<OffsetDateTime> = series.samples().iter().map(|s| s.time()).collect();
    assert_eq!(vec![at(0), at(300), at(600), at(900)], times);
    assert_eq!(4, series.len());
    assert_eq!(Some(at(0)), series.first().map(|s| s.time()));
    assert_eq!(Some(at(900)), series.last().map(|s| s.time()));
}

#[test]
fn bracket_lookup() {
    let series = joinville();
    let time_of = |s: Option<&GeoSample>| s.map(|s| s.time());

    let (before, after) = series.bracket(at(-10));
    assert_eq!((None, Some(at(0))), (time_of(before), time_of(after)));

    let (before, after) = series.bracket(at(0));
    assert_eq!((None, Some(at(0))), (time_of(before), time_of(after)));

    let (before, after) = series.bracket(at(301));
    assert_eq!((Some(at(300)), Some(at(600))), (time_of(before), time_of(after)));

    let (before, after) = series.bracket(at(600));
    assert_eq!((Some(at(300)), Some(at(600))), (time_of(before), time_of(after)));

    // Out of order queries must not matter
    let (before, after) = series.bracket(at(10));
    assert_eq!((Some(at(0)), Some(at(300))), (time_of(before), time_of(after)));

    let (before, after) = series.bracket(at(901));
    assert_eq!((Some(at(900)), None), (time_of(before), time_of(after)));

    let empty = TrackSeries::default();
    assert_eq!((None, None), empty.bracket(at(0)));
}

#[test]
fn interpolated_midpoint() -> Result<(), String> {
    let matcher = Matcher::new(MatchMode::Interpolate, Threshold::Within(1000.0));

    let found = matcher
        .match_time(&two_points(), at(50))
        .ok_or("Expected a match")?;

    assert!(found.lat().abs() < EPS, "{:?}", found);
    assert!((found.lon() - 5.0).abs() < EPS, "{:?}", found);
    assert!((found.elevation() - 50.0).abs() < EPS, "{:?}", found);
    assert_eq!(at(50), found.time());

    Ok(())
}

#[test]
fn interpolation_weights_closer_sample() -> Result<(), String> {
    let matcher = Matcher::new(MatchMode::Interpolate, Threshold::Unbounded);

    let found = matcher
        .match_time(&two_points(), at(25))
        .ok_or("Expected a match")?;

    // weights 1/25 and 1/75, normalized to 3/4 and 1/4
    assert!((found.elevation() - 25.0).abs() < EPS, "{:?}", found);
    assert!(found.lon() > 2.4 && found.lon() < 2.6, "{:?}", found);

    Ok(())
}

#[test]
fn exact_hit_is_the_sample() -> Result<(), String> {
    let series = joinville();

    for mode in [MatchMode::Interpolate, MatchMode::Nearest] {
        let matcher = Matcher::new(mode, Threshold::Within(60.0));

        for s in series.samples() {
            let found = matcher
                .match_time(&series, s.time())
                .ok_or("Expected a match")?;

            assert_eq!(s.coordinates(), found.coordinates());
            assert_eq!(s.elevation(), found.elevation());
        }
    }

    Ok(())
}

#[test]
fn outside_threshold() {
    let series = two_points();

    for mode in [MatchMode::Interpolate, MatchMode::Nearest] {
        let matcher = Matcher::new(mode, Threshold::Within(50.0));

        assert_eq!(None, matcher.match_time(&series, at(200)));
        assert_eq!(None, matcher.match_time(&series, at(-51)));
        assert_eq!(None, matcher.match_time(&series, at(151)));
        assert!(matcher.match_time(&series, at(-50)).is_some());
        assert!(matcher.match_time(&series, at(150)).is_some());
    }
}

#[test]
fn gap_larger_than_threshold() -> Result<(), String> {
    let matcher = Matcher::new(MatchMode::Interpolate, Threshold::Within(30.0));

    // Only the t=100 sample is within threshold, no blending with t=0
    let found = matcher
        .match_time(&two_points(), at(80))
        .ok_or("Expected a match")?;

    assert_eq!(Point::new(10.0, 0.0), found.coordinates());
    assert_eq!(100.0, found.elevation());
    assert_eq!(at(100), found.time());

    assert_eq!(None, matcher.match_time(&two_points(), at(50)));

    Ok(())
}

#[test]
fn unbounded_clamps_to_track_ends() -> Result<(), String> {
    let series = two_points();

    for mode in [MatchMode::Interpolate, MatchMode::Nearest] {
        let matcher = Matcher::new(mode, Threshold::from_seconds(-1));

        let found = matcher.match_time(&series, at(200)).ok_or("Expected a match")?;
        assert_eq!(series.samples()[1], found);

        let found = matcher
            .match_time(&series, at(-100_000))
            .ok_or("Expected a match")?;
        assert_eq!(series.samples()[0], found);
    }

    Ok(())
}

#[test]
fn nearest_is_an_existing_sample() -> Result<(), String> {
    let series = joinville();
    let matcher = Matcher::new(MatchMode::Nearest, Threshold::default());

    for secs in (-200..1100).step_by(37) {
        let found = matcher
            .match_time(&series, at(secs))
            .ok_or(format!("Expected a match at {}", secs))?;

        assert!(series.samples().contains(&found), "{:?}", found);
    }

    let found = matcher.match_time(&series, at(140)).ok_or("Expected a match")?;
    assert_eq!(at(0), found.time());
    let found = matcher.match_time(&series, at(160)).ok_or("Expected a match")?;
    assert_eq!(at(300), found.time());

    Ok(())
}

#[test]
fn nearest_tie_prefers_before() -> Result<(), String> {
    let matcher = Matcher::new(MatchMode::Nearest, Threshold::Unbounded);

    let found = matcher.match_time(&two_points(), at(50)).ok_or("Expected a match")?;
    assert_eq!(at(0), found.time());

    Ok(())
}

#[test]
fn empty_series() {
    let series = TrackSeries::new(vec![]);

    for mode in [MatchMode::Interpolate, MatchMode::Nearest] {
        let matcher = Matcher::new(mode, Threshold::Unbounded);
        assert_eq!(None, matcher.match_time(&series, t0()));
    }
}

#[test]
fn thresholds() {
    assert_eq!(Threshold::Unbounded, Threshold::from_seconds(-1));
    assert_eq!(Threshold::Within(0.0), Threshold::from_seconds(0));
    assert_eq!(Threshold::Within(300.0), Threshold::default());
    assert!(Threshold::Within(10.0).accepts(10.0));
    assert!(!Threshold::Within(10.0).accepts(10.5));
    assert!(Threshold::Unbounded.accepts(f64::MAX));

    assert_eq!(MatchMode::Interpolate, MatchMode::from_flag(true));
    assert_eq!(MatchMode::Nearest, MatchMode::from_flag(false));
}
