use chrono::{DateTime, Duration, TimeZone};

/// Whole degrees, minutes and seconds of the absolute value.
pub fn dms_parts(value: f64) -> (u32, u32, u32) {
    let abs = value.abs();
    let mut degrees = abs.floor() as u32;
    let fraction = abs - abs.floor();
    let mut minutes = (60.0 * fraction).floor() as u32;
    let mut seconds = (3600.0 * fraction - 60.0 * minutes as f64).round() as u32;
    if seconds == 60 {
        seconds = 0;
        minutes += 1;
    }
    if minutes == 60 {
        minutes = 0;
        degrees += 1;
    }
    (degrees, minutes, seconds)
}

/// `DD° MM' SS"`, right aligned to 12 characters. The sign is dropped.
pub fn dms(value: f64) -> String {
    let (d, m, s) = dms_parts(value);
    pad_start(&format!("{d}° {m}' {s}\""), 12)
}

pub fn latitude_dms(latitude: f64) -> String {
    let hemisphere = if latitude < 0.0 { "S" } else { "N" };
    format!("{} {hemisphere}", dms(latitude))
}

pub fn longitude_dms(longitude: f64) -> String {
    let hemisphere = if longitude < 0.0 { "W" } else { "E" };
    format!("{} {hemisphere}", dms(longitude))
}

pub fn pad_start(text: &str, width: usize) -> String {
    format!("{text:>width$}")
}

pub fn fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// `h:mm:ss am`
pub fn clock_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%-I:%M:%S %P").to_string()
}

/// `" 5:23a"`, `"10:14p"`
pub fn short_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let suffix = if at.format("%P").to_string() == "am" { "a" } else { "p" };
    pad_start(&format!("{}{suffix}", at.format("%-I:%M")), 6)
}

/// `HH:mm`. Hours are not wrapped, so a full day reads `24:00`.
pub fn duration_hh_mm(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
