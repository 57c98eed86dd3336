use chrono::{NaiveDate, TimeZone};
use chrono_tz::Pacific::Auckland;

use solar_engine::{
    dms, max_radiation, solar_events_for_date, solar_position, utc_offset_at, Algorithm,
    AtmosphereParams,
};

fn main() {
    let latitude = -41.289;
    let longitude = 174.777;

    let dt = Auckland
        .with_ymd_and_hms(2024, 12, 21, 16, 0, 0)
        .single()
        .expect("unambiguous local time");

    let pos = solar_position(&dt, latitude, longitude);
    let params = AtmosphereParams::default();
    let bras = max_radiation(Algorithm::Bras, &pos, &params);
    let ryan = max_radiation(Algorithm::RyanStolzenbach, &pos, &params);

    println!("=== Solar Position Calculation Example ===");
    println!("Location: Wellington ({}S, {}E)", dms(latitude), dms(longitude));
    println!("Date/Time: {}", dt);
    println!();
    println!("--- Solar Position ---");
    println!("Right ascension: {:.2}°", pos.right_ascension);
    println!("Declination: {:.2}°", pos.declination);
    println!("Hour Angle: {:.2}°", pos.hour_angle);
    println!("Altitude: {:.2}° ({:.2}° refracted)", pos.altitude, pos.corrected_altitude);
    println!("Azimuth: {:.2}° (0°=N, 90°=E, 180°=S)", pos.azimuth);
    println!("Distance: {:.5} AU", pos.distance);
    println!();
    println!("--- Clear-sky Radiation ---");
    println!("Bras (turbidity {}): {:.1} W/m²", params.turbidity, bras);
    println!(
        "Ryan-Stolzenbach (transmission {}): {:.1} W/m²",
        params.transmission_coefficient, ryan
    );

    let date = NaiveDate::from_ymd_opt(2024, 12, 21).expect("valid date");
    let offset = utc_offset_at(&Auckland, date, chrono::NaiveTime::MIN);
    let events = solar_events_for_date(date, latitude, longitude, offset);
    println!();
    println!("--- Sun Events ---");
    println!("Solar noon: {}", events.solar_noon.format("%H:%M:%S"));
    if let (Some(rise), Some(set)) = (events.sunrise, events.sunset) {
        println!("Sunrise: {}", rise.format("%H:%M:%S"));
        println!("Sunset: {}", set.format("%H:%M:%S"));
    }
    println!("Day length: {} minutes", events.day_length.num_minutes());
}
