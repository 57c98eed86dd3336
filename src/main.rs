use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, FixedOffset, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use solar_engine::{
    estimate, lat_long_dataset, solar_dataset, solar_position, sunshine_report, Algorithm,
    AtmosphereParams, Criteria, Dataset, GeoCoordinate, RadiationEstimate, SolarPosition,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sun position and clear-sky radiation for one instant
    Position {
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,
        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,
        /// RFC 3339, e.g. 2024-06-21T12:00:00+12:00
        #[arg(long)]
        at: DateTime<FixedOffset>,
        #[arg(long, default_value = "bras")]
        algorithm: String,
        #[arg(long, default_value_t = 2.0)]
        turbidity: f64,
        #[arg(long, default_value_t = 0.8)]
        transmission: f64,
        #[arg(long, default_value_t = 0.0)]
        altitude: f64,
    },
    /// Formatted latitude/longitude block
    LatLong {
        #[arg(long)]
        criteria: PathBuf,
    },
    /// Sunrise, sunset and twilight times for each day in the criteria range
    Solar {
        #[arg(long)]
        criteria: PathBuf,
    },
    /// Bright sunshine hours from a sun_data block
    Sunshine {
        #[arg(long)]
        criteria: PathBuf,
        #[arg(long)]
        datasets: PathBuf,
    },
}

#[derive(Serialize)]
struct PositionOutput {
    location: GeoCoordinate,
    algorithm: Algorithm,
    position: SolarPosition,
    radiation: RadiationEstimate,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_criteria(path: &PathBuf) -> anyhow::Result<Criteria> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Criteria::from_json(&json).with_context(|| format!("parsing criteria {}", path.display()))
}

fn read_datasets(path: &PathBuf) -> anyhow::Result<Vec<Dataset>> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing datasets {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let now = Utc::now();

    match cli.command {
        Command::Position {
            latitude,
            longitude,
            at,
            algorithm,
            turbidity,
            transmission,
            altitude,
        } => {
            let location = GeoCoordinate::new(latitude, longitude)?.with_altitude(altitude);
            let algorithm: Algorithm = algorithm.parse()?;
            let params = AtmosphereParams {
                turbidity,
                transmission_coefficient: transmission,
                altitude_m: altitude,
            };
            let position = solar_position(&at, latitude, longitude);
            let radiation = estimate(algorithm, &position, &params);
            info!(%at, %algorithm, "computed solar position");
            print_json(&PositionOutput {
                location,
                algorithm,
                position,
                radiation,
            })
        }
        Command::LatLong { criteria } => {
            let criteria = read_criteria(&criteria)?;
            print_json(&vec![lat_long_dataset(&criteria)?])
        }
        Command::Solar { criteria } => {
            let criteria = read_criteria(&criteria)?;
            print_json(&vec![solar_dataset(&criteria, now)?])
        }
        Command::Sunshine { criteria, datasets } => {
            let criteria = read_criteria(&criteria)?;
            let datasets = read_datasets(&datasets)?;
            print_json(&sunshine_report(&criteria, &datasets, now)?)
        }
    }
}
