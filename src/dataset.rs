//! Tabular blocks exchanged with the reporting tool, and the typed report
//! criteria that accompany them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{Error, Result};
use crate::types::{Algorithm, AtmosphereParams, GeoCoordinate, SunshineSettings};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub column_names: Vec<String>,
    #[serde(default)]
    pub row_data: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn new(name: &str, column_names: &[&str], row_data: Vec<Vec<Value>>) -> Self {
        Self {
            name: name.to_string(),
            column_names: column_names.iter().map(|c| c.to_string()).collect(),
            row_data,
        }
    }

    pub fn optional_column(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Result<usize> {
        self.optional_column(name).ok_or_else(|| Error::missing_column(name))
    }
}

/// Later blocks win when a name is repeated.
pub fn find_dataset<'a>(datasets: &'a [Dataset], name: &str) -> Result<&'a Dataset> {
    datasets
        .iter()
        .rev()
        .find(|d| d.name == name)
        .ok_or_else(|| Error::MissingDataset { name: name.to_string() })
}

/// Either unix seconds or a date/time string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Unix(f64),
    Text(String),
}

impl RawTimestamp {
    pub fn resolve(&self, tz: &Tz) -> Result<DateTime<Utc>> {
        match self {
            RawTimestamp::Unix(secs) => unix_timestamp(*secs),
            RawTimestamp::Text(text) => parse_timestamp(text, tz),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default, alias = "start_t")]
    pub start: Option<RawTimestamp>,
    #[serde(default, alias = "end_t")]
    pub end: Option<RawTimestamp>,
    #[serde(default, rename = "timeZone", alias = "time_zone")]
    pub time_zone: Option<String>,
    /// Kept as sent so the report can echo it unchanged.
    #[serde(default)]
    pub threshold: Option<Number>,
    #[serde(default)]
    pub minimum_solar: Option<f64>,
    #[serde(default)]
    pub atmospheric_turbidity: Option<f64>,
    #[serde(default)]
    pub atmospheric_transmission_coefficient: Option<f64>,
    #[serde(default)]
    pub alg_ryan_stolzenbach: bool,
    /// Overrides `alg_ryan_stolzenbach` when present.
    #[serde(default)]
    pub algorithm: Option<String>,
}

fn required(value: Option<f64>, name: &str) -> Result<f64> {
    value.ok_or_else(|| Error::MissingCriterion { name: name.to_string() })
}

impl Criteria {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn latitude(&self) -> Result<f64> {
        required(self.latitude, "latitude")
    }

    pub fn longitude(&self) -> Result<f64> {
        required(self.longitude, "longitude")
    }

    pub fn location(&self) -> Result<GeoCoordinate> {
        let location = GeoCoordinate::new(self.latitude()?, self.longitude()?)?;
        Ok(match self.altitude {
            Some(altitude) => location.with_altitude(altitude),
            None => location,
        })
    }

    pub fn time_zone(&self) -> Result<Tz> {
        match &self.time_zone {
            None => Ok(Tz::UTC),
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| Error::InvalidTimeZone { name: name.clone() }),
        }
    }

    pub fn start(&self) -> Result<DateTime<Utc>> {
        self.start
            .as_ref()
            .ok_or_else(|| Error::MissingCriterion { name: "start".to_string() })?
            .resolve(&self.time_zone()?)
    }

    pub fn end(&self) -> Result<DateTime<Utc>> {
        self.end
            .as_ref()
            .ok_or_else(|| Error::MissingCriterion { name: "end".to_string() })?
            .resolve(&self.time_zone()?)
    }

    pub fn algorithm(&self) -> Result<Algorithm> {
        match &self.algorithm {
            Some(selector) => selector.parse(),
            None if self.alg_ryan_stolzenbach => Ok(Algorithm::RyanStolzenbach),
            None => Ok(Algorithm::Bras),
        }
    }

    pub fn atmosphere(&self) -> AtmosphereParams {
        let defaults = AtmosphereParams::default();
        AtmosphereParams {
            turbidity: self.atmospheric_turbidity.unwrap_or(defaults.turbidity),
            transmission_coefficient: self
                .atmospheric_transmission_coefficient
                .unwrap_or(defaults.transmission_coefficient),
            altitude_m: self.altitude.unwrap_or(defaults.altitude_m),
        }
    }

    pub fn sunshine_settings(&self) -> Result<SunshineSettings> {
        let location = self.location()?;
        Ok(SunshineSettings {
            algorithm: self.algorithm()?,
            latitude: location.latitude,
            longitude: location.longitude,
            atmosphere: self.atmosphere(),
            threshold_percent: required(
                self.threshold.as_ref().and_then(Number::as_f64),
                "threshold",
            )?,
            minimum_radiation: required(self.minimum_solar, "minimum_solar")?,
        })
    }
}

fn unix_timestamp(secs: f64) -> Result<DateTime<Utc>> {
    let millis = (secs * 1000.0).round() as i64;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| Error::InvalidTimestamp {
        value: secs.to_string(),
    })
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS[.fff]][±hh:mm]` and bare dates.
/// Strings without an offset are read as local time in `tz`.
pub fn parse_timestamp(text: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    let text = text.trim();
    let invalid = || Error::InvalidTimestamp { value: text.to_string() };

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .ok_or_else(invalid)?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(invalid)
}

/// A timestamp cell: unix seconds or a string.
pub fn timestamp_from_value(value: &Value, tz: &Tz) -> Result<DateTime<Utc>> {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(secs) => unix_timestamp(secs),
            None => Err(Error::InvalidTimestamp { value: n.to_string() }),
        },
        Value::String(s) => parse_timestamp(s, tz),
        other => Err(Error::InvalidTimestamp { value: other.to_string() }),
    }
}

/// Numbers, and numeric strings as the reporting tool sometimes sends them.
/// Null yields `None`.
pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
