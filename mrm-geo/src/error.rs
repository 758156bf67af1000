use thiserror::Error;

/// Everything that can make a dataset unusable.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid project CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("project CSV row {row}: {message}")]
    CsvField { row: usize, message: String },

    #[error("dataset contains no basins")]
    Empty,

    #[error("invalid {kind} id `{id}` (expected a lowercase slug)")]
    InvalidId { kind: &'static str, id: String },

    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },

    #[error("basin `{id}` has {codes} state codes but {names} state names")]
    StatesMismatch { id: String, codes: usize, names: usize },

    #[error("basin `{id}` geometry: {reason}")]
    InvalidGeometry { id: String, reason: String },

    #[error("basin `{id}` call-to-action `{url}` must point at /contact?basin={id}")]
    InvalidCta { id: String, url: String },

    #[error("basin `{id}` {field} {value} exceeds {max}")]
    OutOfRange {
        id: String,
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("project `{project}` references unknown basin `{basin}`")]
    UnknownBasin { project: String, basin: String },

    #[error("project `{id}`: {reason}")]
    InvalidProject { id: String, reason: String },
}
