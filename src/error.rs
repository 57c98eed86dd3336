use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("dataset \"{name}\" not found")]
    MissingDataset { name: String },
    #[error("missing column \"{column}\"")]
    MissingColumn { column: String },
    #[error("missing report criterion \"{name}\"")]
    MissingCriterion { name: String },
    #[error("unknown radiation algorithm \"{selector}\"")]
    UnknownAlgorithm { selector: String },
    #[error("could not parse timestamp \"{value}\"")]
    InvalidTimestamp { value: String },
    #[error("unknown time zone \"{name}\"")]
    InvalidTimeZone { name: String },
    #[error("invalid latitude {value}° (must be between -90° and +90°)")]
    InvalidLatitude { value: f64 },
    #[error("invalid longitude {value}° (must be between -180° and +180°)")]
    InvalidLongitude { value: f64 },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn missing_column(column: &str) -> Self {
        Error::MissingColumn {
            column: column.to_string(),
        }
    }
}
