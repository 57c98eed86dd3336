use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use serde::Serialize;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidLatitude { value: latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidLongitude { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
            altitude: None,
        })
    }

    pub fn with_altitude(self, altitude: f64) -> Self {
        Self {
            altitude: Some(altitude),
            ..self
        }
    }
}

/// Apparent position of the sun for one instant. All angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarPosition {
    pub right_ascension: f64,
    pub declination: f64,
    /// Measured eastward from north.
    pub azimuth: f64,
    pub altitude: f64,
    pub corrected_altitude: f64,
    /// Earth-sun distance in AU.
    pub distance: f64,
    pub hour_angle: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Bras,
    RyanStolzenbach,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Bras => f.write_str("bras"),
            Algorithm::RyanStolzenbach => f.write_str("ryan_stolzenbach"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "bras" | "0" => Ok(Algorithm::Bras),
            "ryan_stolzenbach" | "ryanstolzenbach" | "1" => Ok(Algorithm::RyanStolzenbach),
            _ => Err(Error::UnknownAlgorithm {
                selector: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtmosphereParams {
    /// Bras only. 2 = clear, 4-5 = smoggy.
    pub turbidity: f64,
    /// Ryan-Stolzenbach only. Typically 0.7-0.91.
    pub transmission_coefficient: f64,
    /// Ryan-Stolzenbach only, meters above sea level.
    pub altitude_m: f64,
}

impl Default for AtmosphereParams {
    fn default() -> Self {
        Self {
            turbidity: 2.0,
            transmission_coefficient: 0.8,
            altitude_m: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadiationEstimate {
    pub max_possible_radiation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiationSample {
    pub timestamp: DateTime<Utc>,
    /// W/m²
    pub observed_radiation: f64,
    /// Seconds
    pub sample_interval: f64,
}

/// Sun events for one local calendar date. Event times are `None` when the sun
/// does not cross the corresponding altitude that day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySolarEvents {
    pub date: NaiveDate,
    pub solar_noon: DateTime<FixedOffset>,
    pub sunrise: Option<DateTime<FixedOffset>>,
    pub sunset: Option<DateTime<FixedOffset>>,
    pub civil_dawn: Option<DateTime<FixedOffset>>,
    pub civil_dusk: Option<DateTime<FixedOffset>>,
    pub nautical_dawn: Option<DateTime<FixedOffset>>,
    pub nautical_dusk: Option<DateTime<FixedOffset>>,
    pub astronomical_dawn: Option<DateTime<FixedOffset>>,
    pub astronomical_dusk: Option<DateTime<FixedOffset>>,
    pub day_length: Duration,
    pub utc_offset: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOverDay {
    pub day_length_change: String,
    /// Minutes
    pub offset_change: i32,
    pub offset_change_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunshineSettings {
    pub algorithm: Algorithm,
    pub latitude: f64,
    pub longitude: f64,
    pub atmosphere: AtmosphereParams,
    pub threshold_percent: f64,
    /// W/m²
    pub minimum_radiation: f64,
}

impl Default for SunshineSettings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bras,
            latitude: 0.0,
            longitude: 0.0,
            atmosphere: AtmosphereParams::default(),
            threshold_percent: 70.0,
            minimum_radiation: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunshineBucket {
    pub date: NaiveDate,
    pub first_timestamp: DateTime<Utc>,
    pub total_sunshine_hours: f64,
    pub total_possible_hours: f64,
    pub sample_count: usize,
}

impl SunshineBucket {
    pub fn percentage(&self) -> f64 {
        percentage(self.total_sunshine_hours, self.total_possible_hours)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SunshineTotals {
    pub total_sunshine_hours: f64,
    pub total_possible_hours: f64,
    pub sample_count: usize,
}

impl SunshineTotals {
    pub fn percentage(&self) -> f64 {
        percentage(self.total_sunshine_hours, self.total_possible_hours)
    }
}

fn percentage(hours: f64, possible: f64) -> f64 {
    if possible > 0.0 {
        hours / possible * 100.0
    } else {
        0.0
    }
}
