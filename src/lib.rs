pub mod angles;
pub mod dataset;
pub mod error;
pub mod events;
pub mod format;
pub mod position;
pub mod radiation;
pub mod reports;
pub mod sunshine;
pub mod types;

pub use angles::{
    cos_d, deg_to_rad, normalize_angle, normalize_hour_angle, rad_to_deg, sin_d, tan_d,
    DEGREES_PER_HOUR,
};

pub use dataset::{
    find_dataset, number_from_value, parse_timestamp, timestamp_from_value, Criteria, Dataset,
    RawTimestamp,
};

pub use error::{Error, Result};

pub use events::{
    cos_hour_angle, date_series, day_length_change, declination_and_equation_of_time,
    hour_angle_for_zenith, julian_century, julian_date, offset_change_message,
    solar_events_for_date, solar_events_for_range, utc_offset_at, ASTRONOMICAL_ZENITH,
    CIVIL_ZENITH, NAUTICAL_ZENITH, SUNRISE_ZENITH,
};

pub use format::{
    clock_time, dms, dms_parts, duration_hh_mm, fixed, latitude_dms, longitude_dms, pad_start,
    short_time,
};

pub use position::{epoch_days, refraction_correction, sidereal_time_degrees, solar_position};

pub use radiation::{
    bras_radiation, estimate, max_radiation, ryan_stolzenbach_radiation, solar_max,
    SOLAR_CONSTANT,
};

pub use reports::{lat_long_dataset, solar_dataset, sunshine_report};

pub use sunshine::{
    aggregate, is_bright_sunshine, placeholder_rows, SampleOutcome, SunshineAggregator,
    SunshineSummary, MAX_PLACEHOLDER_ROWS,
};

pub use types::{
    Algorithm, AtmosphereParams, DailySolarEvents, DayOverDay, GeoCoordinate, RadiationEstimate,
    RadiationSample, SolarPosition, SunshineBucket, SunshineSettings, SunshineTotals,
};
