//! Report blocks handed back to the reporting tool.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::dataset::{find_dataset, number_from_value, timestamp_from_value, Criteria, Dataset};
use crate::error::Result;
use crate::events::solar_events_for_range;
use crate::format::{
    clock_time, duration_hh_mm, fixed, latitude_dms, longitude_dms, pad_start, short_time,
};
use crate::sunshine::{placeholder_rows, SunshineAggregator};
use crate::types::{DailySolarEvents, DayOverDay, RadiationSample};

pub const SUN_DATA: &str = "sun_data";
/// Rows of `sun_data` echoed back. Larger blocks slow the reporting tool down.
pub const MAX_ECHOED_ROWS: usize = 1000;

pub const SOLAR_COLUMNS: [&str; 25] = [
    "date",
    "rise_time",
    "set_time",
    "daylength",
    "daylength_difference",
    "solar_noon",
    "civil_dawn",
    "civil_dusk",
    "nautical_dawn",
    "nautical_dusk",
    "astronomical_dawn",
    "astronomical_dusk",
    "today",
    "Offset",
    "Offset Change",
    "offset_change_message",
    "date_ddmmyy",
    "astro_dawn_short",
    "naut_dawn_short",
    "civil_dawn_short",
    "sunrise_short",
    "sunset_short",
    "civil_dusk_short",
    "naut_dusk_short",
    "astro_dusk_short",
];

const NO_EVENT: &str = "--";
const BLANK_DAY: &str = "  ----";

pub fn lat_long_dataset(criteria: &Criteria) -> Result<Dataset> {
    let location = criteria.location()?;
    Ok(Dataset::new(
        "lat_long",
        &["lat", "long", "lat_dec", "long_dec"],
        vec![vec![
            json!(latitude_dms(location.latitude)),
            json!(longitude_dms(location.longitude)),
            json!(fixed(location.latitude, 6)),
            json!(fixed(location.longitude, 6)),
        ]],
    ))
}

fn local_date(at: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    at.with_timezone(tz).date_naive()
}

fn solar_row(
    events: &DailySolarEvents,
    change: &DayOverDay,
    tz: &Tz,
    today: NaiveDate,
) -> Vec<Value> {
    let long = |event: &Option<DateTime<chrono::FixedOffset>>| match event {
        Some(at) => clock_time(&at.with_timezone(tz)),
        None => NO_EVENT.to_string(),
    };
    let short = |event: &Option<DateTime<chrono::FixedOffset>>| match event {
        Some(at) => short_time(&at.with_timezone(tz)),
        None => pad_start(NO_EVENT, 6),
    };

    vec![
        json!(events.date.format("%Y-%m-%d").to_string()),
        json!(long(&events.sunrise)),
        json!(long(&events.sunset)),
        json!(duration_hh_mm(events.day_length)),
        json!(change.day_length_change),
        json!(clock_time(&events.solar_noon.with_timezone(tz))),
        json!(long(&events.civil_dawn)),
        json!(long(&events.civil_dusk)),
        json!(long(&events.nautical_dawn)),
        json!(long(&events.nautical_dusk)),
        json!(long(&events.astronomical_dawn)),
        json!(long(&events.astronomical_dusk)),
        json!(events.date == today),
        json!(events.utc_offset),
        json!(change.offset_change),
        json!(change.offset_change_message.clone().unwrap_or_default()),
        json!(events.date.format("%d/%m/%y").to_string()),
        json!(short(&events.astronomical_dawn)),
        json!(short(&events.nautical_dawn)),
        json!(short(&events.civil_dawn)),
        json!(short(&events.sunrise)),
        json!(short(&events.sunset)),
        json!(short(&events.civil_dusk)),
        json!(short(&events.nautical_dusk)),
        json!(short(&events.astronomical_dusk)),
    ]
}

/// One row per local date from the criteria start date to the end date.
pub fn solar_dataset(criteria: &Criteria, now: DateTime<Utc>) -> Result<Dataset> {
    let tz = criteria.time_zone()?;
    let location = criteria.location()?;
    let start = local_date(&criteria.start()?, &tz);
    let end = local_date(&criteria.end()?, &tz);
    let today = local_date(&now, &tz);
    debug!(
        latitude = location.latitude,
        longitude = location.longitude,
        %start,
        %end,
        time_zone = %tz,
        "running solar report"
    );

    let rows = solar_events_for_range(start, end, location.latitude, location.longitude, &tz)
        .iter()
        .map(|(events, change)| solar_row(events, change, &tz, today))
        .collect();

    Ok(Dataset::new("solar", &SOLAR_COLUMNS, rows))
}

/// Bright sunshine hours for the `sun_data` block.
///
/// Fills the `max_solar_radiation` and `bright_sunshine_hours` cells of every
/// processed row when those columns exist, and adds the daily, plain-text,
/// info and location blocks.
pub fn sunshine_report(
    criteria: &Criteria,
    datasets: &[Dataset],
    now: DateTime<Utc>,
) -> Result<Vec<Dataset>> {
    let mut sun_data = find_dataset(datasets, SUN_DATA)?.clone();
    let idx_time_stamp = sun_data.column("time_stamp")?;
    let idx_radiation = sun_data.column("solar_radiation")?;
    let idx_interval = sun_data.column("sample_interval")?;
    let idx_max = sun_data.optional_column("max_solar_radiation");
    let idx_hours = sun_data.optional_column("bright_sunshine_hours");

    let tz = criteria.time_zone()?;
    let settings = criteria.sunshine_settings()?;
    let start = local_date(&criteria.start()?, &tz);
    debug!(?settings, %start, rows = sun_data.row_data.len(), "running sunshine report");

    let mut aggregator = SunshineAggregator::new(settings);
    let mut skipped = 0usize;

    for (row_number, row) in sun_data.row_data.iter_mut().enumerate() {
        let Some(time_stamp) = row.get(idx_time_stamp) else {
            warn!(row = row_number, "skipping sample without a time_stamp cell");
            skipped += 1;
            continue;
        };
        let timestamp = timestamp_from_value(time_stamp, &tz)?;
        let radiation = row.get(idx_radiation).and_then(number_from_value);
        let interval = row.get(idx_interval).and_then(number_from_value);
        let (Some(observed_radiation), Some(sample_interval)) = (radiation, interval) else {
            warn!(row = row_number, %timestamp, "skipping sample without radiation or interval");
            skipped += 1;
            continue;
        };
        let valid_interval = sample_interval.is_finite() && sample_interval >= 0.0;
        if !valid_interval || !observed_radiation.is_finite() {
            warn!(
                row = row_number,
                %timestamp,
                sample_interval,
                "skipping sample with invalid radiation or interval"
            );
            skipped += 1;
            continue;
        }

        let sample = RadiationSample {
            timestamp,
            observed_radiation,
            sample_interval,
        };
        let outcome = aggregator.push(&sample, local_date(&timestamp, &tz));

        let filled = [
            (idx_max, outcome.max_radiation),
            (idx_hours, outcome.sunshine_hours),
        ];
        for (idx, value) in filled {
            if let Some(cell) = idx.and_then(|i| row.get_mut(i)) {
                *cell = json!(value);
            }
        }
    }

    let summary = aggregator.finish();
    let totals = summary.totals;
    let end = summary
        .latest_timestamp
        .map(|latest| local_date(&latest, &tz))
        .unwrap_or(start);

    let daily_rows: Vec<Vec<Value>> = summary
        .days
        .iter()
        .map(|day| {
            vec![
                json!(day.date.format("%d-%b-%Y").to_string()),
                json!(day.date.format("%Y-%m-%d").to_string()),
                json!(fixed(day.total_sunshine_hours, 1)),
                json!(fixed(day.total_possible_hours, 1)),
                json!(fixed(day.percentage(), 1)),
            ]
        })
        .collect();

    let mut txt_rows: Vec<Vec<Value>> = summary
        .days
        .iter()
        .map(|day| {
            vec![
                json!(day.date.format("%d/%m/%y").to_string()),
                json!(pad_start(&fixed(day.total_sunshine_hours, 1), 4)),
            ]
        })
        .collect();
    let blanks = placeholder_rows(start, end, txt_rows.len());
    txt_rows.extend((0..blanks).map(|_| vec![json!(BLANK_DAY), json!("")]));

    info!(
        days = summary.days.len(),
        samples = totals.sample_count,
        skipped,
        sunshine_hours = totals.total_sunshine_hours,
        possible_hours = totals.total_possible_hours,
        "sunshine report complete"
    );

    let info_row = vec![
        json!(local_date(&now, &tz).format("%d/%m/%y").to_string()),
        json!(pad_start(&fixed(totals.total_sunshine_hours, 1), 6)),
        json!(start.format("%d/%m/%y").to_string()),
        json!(end.format("%d/%m/%y").to_string()),
        json!(criteria.threshold),
        json!(txt_rows.len()),
        json!(fixed(totals.total_possible_hours, 1)),
        json!(fixed(totals.percentage(), 1)),
    ];

    sun_data.row_data.truncate(MAX_ECHOED_ROWS);

    Ok(vec![
        sun_data,
        Dataset::new(
            "daily_summary",
            &["date", "sortable_date", "total_sun_hours", "max_sun_hours", "percentage"],
            daily_rows,
        ),
        Dataset::new("txt_day_summary", &["date", "total_sun_hours"], txt_rows),
        Dataset::new(
            "info",
            &[
                "run_date",
                "total_hours",
                "start_date",
                "end_date",
                "threshold",
                "count",
                "total_max_hours",
                "total_percent",
            ],
            vec![info_row],
        ),
        Dataset::new(
            "lat_long",
            &["lat", "long"],
            vec![vec![
                json!(latitude_dms(settings.latitude)),
                json!(longitude_dms(settings.longitude)),
            ]],
        ),
    ])
}
