use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use solar_engine::radiation::solar_max;
use solar_engine::sunshine::*;
use solar_engine::types::{Algorithm, RadiationSample, SunshineSettings};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn settings() -> SunshineSettings {
    SunshineSettings {
        algorithm: Algorithm::Bras,
        latitude: 51.5,
        longitude: -0.1,
        threshold_percent: 70.0,
        minimum_radiation: 10.0,
        ..SunshineSettings::default()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Ten-minute samples over whole UTC days, with radiation from `observed`.
fn series<F>(start: DateTime<Utc>, days: i64, observed: F) -> Vec<(RadiationSample, NaiveDate)>
where
    F: Fn(DateTime<Utc>) -> f64,
{
    (0..days * 144)
        .map(|i| {
            let timestamp = start + Duration::minutes(10 * i);
            let sample = RadiationSample {
                timestamp,
                observed_radiation: observed(timestamp),
                sample_interval: 600.0,
            };
            (sample, timestamp.date_naive())
        })
        .collect()
}

fn clear_sky(at: DateTime<Utc>) -> f64 {
    let s = settings();
    solar_max(s.algorithm, &at, s.latitude, s.longitude, &s.atmosphere)
}

fn midsummer() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap()
}

// ── Threshold test ──

#[test]
fn test_is_bright_sunshine() {
    let s = settings();
    assert!(is_bright_sunshine(800.0, 1000.0, &s));
    assert!(!is_bright_sunshine(700.0, 1000.0, &s));
    // Above the threshold but under the floor.
    assert!(!is_bright_sunshine(5.0, 2.0, &s));
    assert!(is_bright_sunshine(10.0, 2.0, &s));
}

// ── Aggregation ──

#[test]
fn test_dark_sensor_counts_possible_hours_only() {
    let summary = aggregate(settings(), series(midsummer(), 1, |_| 0.0));
    assert_eq!(summary.days.len(), 1);
    assert_eq!(summary.totals.total_sunshine_hours, 0.0);
    // Roughly 16.5 hours of daylight in London at midsummer.
    assert!(summary.totals.total_possible_hours > 15.0, "{}", summary.totals.total_possible_hours);
    assert!(summary.totals.total_possible_hours < 18.0, "{}", summary.totals.total_possible_hours);
    assert_eq!(summary.totals.percentage(), 0.0);
}

#[test]
fn test_clear_sky_is_all_sunshine() {
    let no_floor = SunshineSettings {
        minimum_radiation: 0.0,
        ..settings()
    };
    let summary = aggregate(no_floor, series(midsummer(), 1, clear_sky));
    let day = summary.days[0];
    assert_approx!(day.total_sunshine_hours, day.total_possible_hours, 1e-9);
    assert_approx!(day.percentage(), 100.0, 1e-9);
}

#[test]
fn test_floor_excludes_low_sun() {
    let summary = aggregate(settings(), series(midsummer(), 1, clear_sky));
    let day = summary.days[0];
    // Clear-sky values under 10 W/m² near sunrise and sunset don't count.
    assert!(day.total_sunshine_hours < day.total_possible_hours);
    assert!(day.total_sunshine_hours > day.total_possible_hours - 3.0);
}

#[test]
fn test_one_bucket_per_date() {
    let samples = series(midsummer(), 3, clear_sky);
    let summary = aggregate(settings(), samples);
    let dates: Vec<NaiveDate> = summary.days.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![date(2024, 6, 21), date(2024, 6, 22), date(2024, 6, 23)]);
    for day in &summary.days {
        assert_eq!(day.sample_count, 144);
    }
    assert_eq!(summary.totals.sample_count, 432);
    assert_eq!(summary.latest_timestamp, Some(midsummer() + Duration::minutes(10 * 431)));
}

#[test]
fn test_push_emits_on_date_change() {
    let mut aggregator = SunshineAggregator::new(settings());
    let samples = series(midsummer(), 2, |_| 0.0);

    let mut closed = Vec::new();
    for (sample, d) in &samples {
        if let Some(bucket) = aggregator.push(sample, *d).closed {
            closed.push((bucket, sample.timestamp));
        }
    }
    assert_eq!(closed.len(), 1);
    let (bucket, at) = closed[0];
    assert_eq!(bucket.date, date(2024, 6, 21));
    assert_eq!(at, Utc.with_ymd_and_hms(2024, 6, 22, 0, 0, 0).unwrap());
    assert_eq!(aggregator.days().len(), 1);

    let summary = aggregator.finish();
    assert_eq!(summary.days.len(), 2);
}

#[test]
fn test_outcome_reports_max_and_hours() {
    let mut aggregator = SunshineAggregator::new(settings());
    let noon = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
    let sample = RadiationSample {
        timestamp: noon,
        observed_radiation: 900.0,
        sample_interval: 300.0,
    };
    let outcome = aggregator.push(&sample, noon.date_naive());
    assert_approx!(outcome.max_radiation, clear_sky(noon), 1e-9);
    assert_approx!(outcome.sunshine_hours, 300.0 / 3600.0, 1e-12);
    assert!(outcome.closed.is_none());
}

#[test]
fn test_caller_dates_define_days() {
    // Everything attributed to one local date stays in one bucket.
    let local = date(2024, 6, 21);
    let samples: Vec<_> = series(midsummer(), 2, |_| 0.0)
        .into_iter()
        .map(|(s, _)| (s, local))
        .collect();
    let summary = aggregate(settings(), samples);
    assert_eq!(summary.days.len(), 1);
}

#[test]
fn test_empty_series() {
    let summary = aggregate(settings(), Vec::new());
    assert!(summary.days.is_empty());
    assert_eq!(summary.totals.sample_count, 0);
    assert!(summary.latest_timestamp.is_none());
}

// ── Placeholders ──

#[test]
fn test_placeholder_rows() {
    assert_eq!(placeholder_rows(date(2024, 1, 1), date(2024, 1, 5), 3), 2);
    assert_eq!(placeholder_rows(date(2024, 1, 1), date(2024, 1, 5), 5), 0);
    assert_eq!(placeholder_rows(date(2024, 1, 1), date(2024, 1, 5), 9), 0);
    assert_eq!(placeholder_rows(date(2024, 1, 5), date(2024, 1, 1), 0), 0);
}

#[test]
fn test_placeholder_rows_capped() {
    assert_eq!(placeholder_rows(date(2024, 1, 1), date(2024, 12, 31), 1), MAX_PLACEHOLDER_ROWS);
    assert_eq!(MAX_PLACEHOLDER_ROWS, 59);
}

// ── Conservation ──

proptest! {
    #[test]
    fn daily_totals_sum_to_grand_total(
        observed in prop::collection::vec(0.0f64..1100.0, 1..400),
        start_secs in 1_600_000_000i64..1_800_000_000i64,
        step_minutes in 1i64..60,
    ) {
        let start = DateTime::from_timestamp(start_secs, 0).unwrap();
        let samples: Vec<_> = observed
            .iter()
            .enumerate()
            .map(|(i, &radiation)| {
                let timestamp = start + Duration::minutes(step_minutes * i as i64);
                let sample = RadiationSample {
                    timestamp,
                    observed_radiation: radiation,
                    sample_interval: (step_minutes * 60) as f64,
                };
                (sample, timestamp.date_naive())
            })
            .collect();

        let summary = aggregate(settings(), samples);
        let sunshine: f64 = summary.days.iter().map(|d| d.total_sunshine_hours).sum();
        let possible: f64 = summary.days.iter().map(|d| d.total_possible_hours).sum();
        let count: usize = summary.days.iter().map(|d| d.sample_count).sum();
        prop_assert!((sunshine - summary.totals.total_sunshine_hours).abs() < 1e-6);
        prop_assert!((possible - summary.totals.total_possible_hours).abs() < 1e-6);
        prop_assert_eq!(count, observed.len());
    }
}
