//! Apparent position of the sun for an instant and an observer.
//!
//! Low-precision reduction: a linear sidereal time model, two-term equation of
//! center and linear obliquity. Good to a few hundredths of a degree between
//! 1900-03-01 and 2100-02-28, which is plenty for clear-sky radiation estimates.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

use crate::angles::{
    cos_d, deg_to_rad, normalize_angle, normalize_hour_angle, rad_to_deg, sin_d, tan_d,
    DEGREES_PER_HOUR,
};
use crate::types::SolarPosition;

pub const DAYS_PER_CENTURY: f64 = 36525.0;
pub const TROPICAL_YEAR_DAYS: f64 = 365.2422;

/// Days from J2000.0 (2000-01-01 12h UT) to 0h UT on the given date.
/// Valid from 1900-03-01 to 2100-02-28.
pub fn epoch_days(year: i32, month: u32, day: u32) -> f64 {
    let y = year as f64;
    let m = month as f64;
    367.0 * y - ((7.0 / 4.0) * (y + ((m + 9.0) / 12.0).floor())).floor()
        + (275.0 * m / 9.0).floor()
        + day as f64
        - 730531.5
}

/// Local sidereal time in degrees, reduced into [0, 360).
pub fn sidereal_time_degrees(epoch_days: f64, utc_hours: f64, longitude: f64) -> f64 {
    let centuries = epoch_days / DAYS_PER_CENTURY;
    let gmst_midnight_hours = 6.6974 + 2400.0513 * centuries;
    let gmst_hours = gmst_midnight_hours + (366.2422 / TROPICAL_YEAR_DAYS) * utc_hours;
    normalize_angle(gmst_hours * DEGREES_PER_HOUR + longitude)
}

/// Refraction correction in degrees to add to a geometric altitude.
pub fn refraction_correction(altitude: f64) -> f64 {
    let arcseconds = if altitude <= -0.575 {
        -20.774 / tan_d(altitude)
    } else if altitude <= 5.0 {
        1735.0 - 518.2 * altitude + 103.4 * altitude.powi(2) - 12.79 * altitude.powi(3)
            + 0.711 * altitude.powi(4)
    } else if altitude <= 85.0 {
        let tan_alt = tan_d(altitude);
        58.1 / tan_alt - 0.07 / tan_alt.powi(3) + 0.000086 / tan_alt.powi(5)
    } else {
        0.0
    };
    arcseconds / 3600.0
}

pub fn solar_position<Tz: TimeZone>(
    at: &DateTime<Tz>,
    latitude: f64,
    longitude: f64,
) -> SolarPosition {
    let utc = at.with_timezone(&Utc);
    let utc_hours = utc.hour() as f64 + utc.minute() as f64 / 60.0 + utc.second() as f64 / 3600.0;
    let days = epoch_days(utc.year(), utc.month(), utc.day());

    let local_sidereal_time = sidereal_time_degrees(days, utc_hours, longitude);

    let centuries = (days + utc_hours / 24.0) / DAYS_PER_CENTURY;

    let mean_longitude = 280.466 + 36000.770 * centuries;
    let mean_anomaly = 357.52911 + 35999.05029 * centuries;
    let equation_of_center =
        (1.915 - 0.005 * centuries) * sin_d(mean_anomaly) + 0.020 * sin_d(2.0 * mean_anomaly);
    let eccentricity = 0.016708634 - centuries * (0.000042037 + 0.0000001267 * centuries);

    let true_anomaly = mean_anomaly + equation_of_center;
    let distance = (1.000001018 * (1.0 - eccentricity * eccentricity))
        / (1.0 + eccentricity * cos_d(true_anomaly));

    let true_longitude = mean_longitude + equation_of_center;
    let obliquity = 23.439 - 0.013 * centuries;

    // Same quadrant as the true longitude.
    let ra_rad = (cos_d(obliquity) * sin_d(true_longitude)).atan2(cos_d(true_longitude));
    // Uses the right ascension angle, not the ecliptic longitude.
    let decl_rad = (ra_rad.sin() * sin_d(obliquity)).asin();

    let hour_angle = normalize_hour_angle(local_sidereal_time - rad_to_deg(ra_rad));
    let ha_rad = deg_to_rad(hour_angle);

    let sin_altitude =
        sin_d(latitude) * decl_rad.sin() + cos_d(latitude) * decl_rad.cos() * ha_rad.cos();
    let altitude = rad_to_deg(sin_altitude.clamp(-1.0, 1.0).asin());

    SolarPosition {
        right_ascension: rad_to_deg(ra_rad),
        declination: rad_to_deg(decl_rad),
        azimuth: azimuth(latitude, decl_rad, ha_rad),
        altitude,
        corrected_altitude: altitude + refraction_correction(altitude),
        distance,
        hour_angle,
    }
}

fn azimuth(latitude: f64, decl_rad: f64, ha_rad: f64) -> f64 {
    let nominator = -ha_rad.sin();
    let denominator = decl_rad.tan() * cos_d(latitude) - sin_d(latitude) * ha_rad.cos();
    let mut azimuth = (nominator / denominator).atan();
    if denominator < 0.0 {
        azimuth += std::f64::consts::PI;
    } else if nominator < 0.0 {
        azimuth += 2.0 * std::f64::consts::PI;
    }
    rad_to_deg(azimuth)
}
