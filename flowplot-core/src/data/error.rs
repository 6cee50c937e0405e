use std::path::PathBuf;
use thiserror::Error;

/// Errors from the loading layer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("missing required field '{field}'")]
    MissingField { field: String },

    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("historical trajectory is empty")]
    EmptyTrajectory,
}

impl DataError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::FileAccess {
            path: path.into(),
            source,
        }
    }
}
