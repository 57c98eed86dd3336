use chrono::{DateTime, Duration, FixedOffset};
use rstest::rstest;

use solar_engine::format::*;

fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

// ── DMS ──

#[test]
fn test_dms_wellington_latitude() {
    assert_eq!(dms_parts(-41.289), (41, 17, 20));
    assert_eq!(dms(-41.289), " 41° 17' 20\"");
    assert_eq!(latitude_dms(-41.289), " 41° 17' 20\" S");
}

#[test]
fn test_dms_padding() {
    assert_eq!(dms(0.5), "   0° 30' 0\"");
    assert_eq!(dms(0.5).chars().count(), 12);
    // Wider values are not truncated.
    assert_eq!(dms(174.777), "174° 46' 37\"");
}

#[test]
fn test_dms_carries_rounded_seconds() {
    assert_eq!(dms_parts(10.99999), (11, 0, 0));
    assert_eq!(dms_parts(45.0 + 29.9999 / 60.0), (45, 30, 0));
}

#[rstest]
#[case(51.5, "  51° 30' 0\" N")]
#[case(0.0, "    0° 0' 0\" N")]
#[case(-0.0001, "    0° 0' 0\" S")]
fn test_latitude_hemisphere(#[case] latitude: f64, #[case] expected: &str) {
    assert_eq!(latitude_dms(latitude), expected);
}

#[test]
fn test_longitude_hemisphere() {
    assert_eq!(longitude_dms(-0.1), "    0° 6' 0\" W");
    assert_eq!(longitude_dms(174.777), "174° 46' 37\" E");
}

// ── Numbers ──

#[test]
fn test_fixed_and_pad() {
    assert_eq!(fixed(-41.289, 6), "-41.289000");
    assert_eq!(fixed(16.6666, 1), "16.7");
    assert_eq!(pad_start("1.5", 4), " 1.5");
    assert_eq!(pad_start("123.4", 4), "123.4");
}

// ── Times ──

#[rstest]
#[case("2024-06-21T04:53:12+12:00", "4:53:12 am", " 4:53a")]
#[case("2024-06-21T16:05:09+12:00", "4:05:09 pm", " 4:05p")]
#[case("2024-06-21T22:14:00+00:00", "10:14:00 pm", "10:14p")]
#[case("2024-06-21T00:30:00+00:00", "12:30:00 am", "12:30a")]
#[case("2024-06-21T12:00:00-05:00", "12:00:00 pm", "12:00p")]
fn test_clock_times(#[case] time: &str, #[case] long: &str, #[case] short: &str) {
    assert_eq!(clock_time(&at(time)), long);
    assert_eq!(short_time(&at(time)), short);
}

#[test]
fn test_duration_hh_mm() {
    assert_eq!(duration_hh_mm(Duration::seconds(56220)), "15:37");
    assert_eq!(duration_hh_mm(Duration::minutes(59)), "00:59");
    assert_eq!(duration_hh_mm(Duration::days(1)), "24:00");
    assert_eq!(duration_hh_mm(Duration::zero()), "00:00");
}
