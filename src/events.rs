use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use tracing::debug;

use crate::angles::{cos_d, rad_to_deg, sin_d, tan_d};
use crate::types::{DailySolarEvents, DayOverDay};

pub const SUNRISE_ZENITH: f64 = 90.833;
pub const CIVIL_ZENITH: f64 = 96.0;
pub const NAUTICAL_ZENITH: f64 = 102.0;
pub const ASTRONOMICAL_ZENITH: f64 = 108.0;

const SECONDS_PER_DAY: f64 = 86400.0;
const MINUTES_PER_DAY: f64 = 1440.0;

pub fn julian_date<Tz: TimeZone>(at: &DateTime<Tz>) -> f64 {
    at.timestamp() as f64 / SECONDS_PER_DAY + 2440587.5
}

pub fn julian_century(julian_date: f64) -> f64 {
    (julian_date - 2451545.0) / 36525.0
}

/// Solar declination (degrees) and equation of time (minutes) for a Julian century.
pub fn declination_and_equation_of_time(jcentury: f64) -> (f64, f64) {
    let obliquity_arcseconds =
        21.448 - jcentury * (46.815 + jcentury * (0.00059 - jcentury * 0.001813));
    let mean_obliquity = 23.0 + (26.0 + obliquity_arcseconds / 60.0) / 60.0;
    let obliquity = mean_obliquity + 0.00256 * cos_d(125.04 - 1934.136 * jcentury);
    let mean_longitude = (280.46646 + jcentury * (36000.76983 + jcentury * 0.0003032)) % 360.0;
    let mean_anomaly = 357.52911 + jcentury * (35999.05029 - 0.0001537 * jcentury);
    let eccentricity = 0.016708634 - jcentury * (0.000042037 + 0.0000001267 * jcentury);

    let equation_of_center = sin_d(mean_anomaly)
        * (1.914602 - jcentury * (0.004817 + 0.000014 * jcentury))
        + sin_d(2.0 * mean_anomaly) * (0.019993 - 0.000101 * jcentury)
        + sin_d(3.0 * mean_anomaly) * 0.000289;
    let true_longitude = mean_longitude + equation_of_center;
    let apparent_longitude =
        true_longitude - 0.00569 - 0.00478 * sin_d(125.04 - 1934.136 * jcentury);
    let declination = rad_to_deg((sin_d(obliquity) * sin_d(apparent_longitude)).asin());

    let y = tan_d(obliquity / 2.0).powi(2);
    let l0 = mean_longitude;
    let m = mean_anomaly;
    let e = eccentricity;
    let equation_of_time = 4.0
        * rad_to_deg(
            y * sin_d(2.0 * l0) - 2.0 * e * sin_d(m) + 4.0 * e * y * sin_d(m) * cos_d(2.0 * l0)
                - 0.5 * y * y * sin_d(4.0 * l0)
                - 1.25 * e * e * sin_d(2.0 * m),
        );

    (declination, equation_of_time)
}

/// Cosine of the hour angle at which the sun's zenith distance equals `zenith`.
/// Outside [-1, 1] the sun never reaches that zenith distance on this day.
pub fn cos_hour_angle(zenith: f64, latitude: f64, declination: f64) -> f64 {
    cos_d(zenith) / (cos_d(latitude) * cos_d(declination)) - tan_d(latitude) * tan_d(declination)
}

pub fn hour_angle_for_zenith(zenith: f64, latitude: f64, declination: f64) -> Option<f64> {
    let cos_ha = cos_hour_angle(zenith, latitude, declination);
    if (-1.0..=1.0).contains(&cos_ha) {
        Some(rad_to_deg(cos_ha.acos()))
    } else {
        None
    }
}

fn fixed_offset(utc_offset_minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
}

fn seconds(value: f64) -> Duration {
    Duration::nanoseconds((value * 1e9).round() as i64)
}

pub fn solar_events_for_date(
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
    utc_offset_minutes: i32,
) -> DailySolarEvents {
    let offset = fixed_offset(utc_offset_minutes);
    let midnight_local = date.and_time(NaiveTime::MIN);
    let midnight = DateTime::<FixedOffset>::from_naive_utc_and_offset(
        midnight_local - Duration::seconds(offset.local_minus_utc() as i64),
        offset,
    );

    let jcentury = julian_century(julian_date(&midnight));
    let (declination, equation_of_time) = declination_and_equation_of_time(jcentury);

    let noon_minutes = 720.0 - 4.0 * longitude - equation_of_time + utc_offset_minutes as f64;
    let at_minutes = |minutes: f64| midnight + seconds(minutes / MINUTES_PER_DAY * SECONDS_PER_DAY);

    let pair = |zenith: f64| match hour_angle_for_zenith(zenith, latitude, declination) {
        Some(ha) => (
            Some(at_minutes(noon_minutes - ha * 4.0)),
            Some(at_minutes(noon_minutes + ha * 4.0)),
        ),
        None => (None, None),
    };

    let (sunrise, sunset) = pair(SUNRISE_ZENITH);
    let (civil_dawn, civil_dusk) = pair(CIVIL_ZENITH);
    let (nautical_dawn, nautical_dusk) = pair(NAUTICAL_ZENITH);
    let (astronomical_dawn, astronomical_dusk) = pair(ASTRONOMICAL_ZENITH);

    let day_length = match (sunrise, sunset) {
        (Some(rise), Some(set)) => set - rise,
        _ if cos_hour_angle(SUNRISE_ZENITH, latitude, declination) < -1.0 => Duration::days(1),
        _ => Duration::zero(),
    };

    DailySolarEvents {
        date,
        solar_noon: at_minutes(noon_minutes),
        sunrise,
        sunset,
        civil_dawn,
        civil_dusk,
        nautical_dawn,
        nautical_dusk,
        astronomical_dawn,
        astronomical_dusk,
        day_length,
        utc_offset: utc_offset_minutes,
    }
}

/// Inclusive.
pub fn date_series(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// UTC offset in minutes that `tz` applies at local `time` on `date`.
pub fn utc_offset_at<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time: NaiveTime) -> i32 {
    let local = date.and_time(time);
    let offset = match tz.from_local_datetime(&local).earliest() {
        Some(dt) => dt.offset().fix(),
        // Skipped by a clock change; the UTC reading is as close as we get.
        None => tz.offset_from_utc_datetime(&local).fix(),
    };
    offset.local_minus_utc() / 60
}

/// `+mm:ss` / `-mm:ss`, or `0:0` when unchanged.
pub fn day_length_change(previous: Duration, current: Duration) -> String {
    let sign = if current > previous {
        "+"
    } else if current < previous {
        "-"
    } else {
        return "0:0".to_string();
    };
    let delta = (current - previous).abs().num_seconds();
    format!("{sign}{:02}:{:02}", (delta / 60) % 60, delta % 60)
}

pub fn offset_change_message(change_minutes: i32) -> Option<String> {
    if change_minutes == 0 {
        return None;
    }
    let magnitude = change_minutes.unsigned_abs();
    let hours = (magnitude / 60) % 24;
    let minutes = magnitude % 60;

    let hours_str = match hours {
        0 => String::new(),
        1 => "1 hour".to_string(),
        h => format!("{h} hours"),
    };
    let minutes_str = match minutes {
        0 => String::new(),
        m => format!("{m} minutes"),
    };
    let joiner = if !hours_str.is_empty() && !minutes_str.is_empty() {
        " and "
    } else {
        ""
    };
    let direction = if change_minutes < 0 { "backward" } else { "forward" };

    Some(format!(
        "Note: hours shift because clocks change {direction} {hours_str}{joiner}{minutes_str}."
    ))
}

/// Events for every date from `start` to `end` inclusive, each paired with its
/// change from the day before. The first date is compared against `start - 1`.
pub fn solar_events_for_range<Tz: TimeZone>(
    start: NaiveDate,
    end: NaiveDate,
    latitude: f64,
    longitude: f64,
    tz: &Tz,
) -> Vec<(DailySolarEvents, DayOverDay)> {
    let events_on = |date: NaiveDate| {
        solar_events_for_date(date, latitude, longitude, utc_offset_at(tz, date, NaiveTime::MIN))
    };
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);

    let series = date_series(start, end);
    debug!(start = %start, end = %end, days = series.len(), "generating solar events");

    let Some(before_start) = start.pred_opt() else {
        return Vec::new();
    };
    let mut previous_length = events_on(before_start).day_length;
    let mut previous_offset = utc_offset_at(tz, before_start, noon);

    series
        .into_iter()
        .map(|date| {
            let events = events_on(date);
            let offset = utc_offset_at(tz, date, noon);
            let offset_change = offset - previous_offset;
            let change = DayOverDay {
                day_length_change: day_length_change(previous_length, events.day_length),
                offset_change,
                offset_change_message: offset_change_message(offset_change),
            };
            previous_length = events.day_length;
            previous_offset = offset;
            (events, change)
        })
        .collect()
}
