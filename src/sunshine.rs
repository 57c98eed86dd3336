//! Bright sunshine hours from observed solar radiation.
//!
//! A sample counts as bright sunshine when the observed radiation exceeds a
//! percentage of the clear-sky maximum for that instant and is at least the
//! configured floor. Samples are folded in timestamp order into one bucket per
//! local calendar date; a bucket is emitted whenever the date changes and once
//! more when the series ends.

use chrono::{DateTime, NaiveDate, Utc};

use crate::radiation::solar_max;
use crate::types::{RadiationSample, SunshineBucket, SunshineSettings, SunshineTotals};

/// Upper bound on blank rows inserted for days with no samples.
pub const MAX_PLACEHOLDER_ROWS: usize = 59;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleOutcome {
    pub max_radiation: f64,
    pub sunshine_hours: f64,
    /// The previous day's bucket, when this sample started a new date.
    pub closed: Option<SunshineBucket>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SunshineSummary {
    pub days: Vec<SunshineBucket>,
    pub totals: SunshineTotals,
    pub latest_timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    AwaitingFirstSample,
    Accumulating(SunshineBucket),
}

pub fn is_bright_sunshine(observed: f64, max_radiation: f64, settings: &SunshineSettings) -> bool {
    observed > max_radiation * settings.threshold_percent / 100.0
        && observed >= settings.minimum_radiation
}

#[derive(Debug, Clone)]
pub struct SunshineAggregator {
    settings: SunshineSettings,
    state: State,
    days: Vec<SunshineBucket>,
    totals: SunshineTotals,
    latest: Option<DateTime<Utc>>,
}

impl SunshineAggregator {
    pub fn new(settings: SunshineSettings) -> Self {
        Self {
            settings,
            state: State::AwaitingFirstSample,
            days: Vec::new(),
            totals: SunshineTotals::default(),
            latest: None,
        }
    }

    pub fn settings(&self) -> &SunshineSettings {
        &self.settings
    }

    pub fn days(&self) -> &[SunshineBucket] {
        &self.days
    }

    pub fn push(&mut self, sample: &RadiationSample, date: NaiveDate) -> SampleOutcome {
        let s = &self.settings;
        let max_radiation = solar_max(
            s.algorithm,
            &sample.timestamp,
            s.latitude,
            s.longitude,
            &s.atmosphere,
        );
        let interval_hours = sample.sample_interval / 3600.0;
        let sunshine_hours = if is_bright_sunshine(sample.observed_radiation, max_radiation, s) {
            interval_hours
        } else {
            0.0
        };
        let possible_hours = if max_radiation > 0.0 { interval_hours } else { 0.0 };

        let (mut bucket, closed) = match self.state {
            State::Accumulating(current) if current.date == date => (current, None),
            previous => {
                let closed = match previous {
                    State::Accumulating(done) => Some(done),
                    State::AwaitingFirstSample => None,
                };
                let fresh = SunshineBucket {
                    date,
                    first_timestamp: sample.timestamp,
                    total_sunshine_hours: 0.0,
                    total_possible_hours: 0.0,
                    sample_count: 0,
                };
                (fresh, closed)
            }
        };
        if let Some(done) = closed {
            self.days.push(done);
        }

        bucket.total_sunshine_hours += sunshine_hours;
        bucket.total_possible_hours += possible_hours;
        bucket.sample_count += 1;
        self.state = State::Accumulating(bucket);

        self.totals.total_sunshine_hours += sunshine_hours;
        self.totals.total_possible_hours += possible_hours;
        self.totals.sample_count += 1;
        if self.latest.map_or(true, |latest| sample.timestamp > latest) {
            self.latest = Some(sample.timestamp);
        }

        SampleOutcome {
            max_radiation,
            sunshine_hours,
            closed,
        }
    }

    pub fn finish(mut self) -> SunshineSummary {
        if let State::Accumulating(last) = self.state {
            self.days.push(last);
        }
        SunshineSummary {
            days: self.days,
            totals: self.totals,
            latest_timestamp: self.latest,
        }
    }
}

pub fn aggregate<I>(settings: SunshineSettings, samples: I) -> SunshineSummary
where
    I: IntoIterator<Item = (RadiationSample, NaiveDate)>,
{
    samples
        .into_iter()
        .fold(SunshineAggregator::new(settings), |mut aggregator, (sample, date)| {
            aggregator.push(&sample, date);
            aggregator
        })
        .finish()
}

/// Blank rows needed so that a period from `start` to `latest` shows one row
/// per day, given `emitted` real rows. Capped at [`MAX_PLACEHOLDER_ROWS`].
pub fn placeholder_rows(start: NaiveDate, latest: NaiveDate, emitted: usize) -> usize {
    let day_count = (latest - start).num_days() + 1;
    if day_count <= 0 {
        return 0;
    }
    (day_count as usize).saturating_sub(emitted).min(MAX_PLACEHOLDER_ROWS)
}
