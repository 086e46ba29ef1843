use std::io;
use thiserror::Error;

/// Crate-wide error type covering every stage of a review analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Input data is unusable: missing required columns, empty data set,
    /// unsupported file format. Fatal before any analysis starts.
    #[error("data validation failed: {0}")]
    DataValidation(String),

    /// A stage inside one dimension's analysis failed. Aborts that
    /// dimension; the driver records it and continues with the rest.
    #[error("{stage} failed: {message}")]
    Processing {
        stage: &'static str,
        message: String,
    },

    /// A collaborator could not be initialized (cache directory, output
    /// directory). Fatal to constructing the component.
    #[error("resource initialization failed: {0}")]
    Resource(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl AnalysisError {
    pub fn processing(stage: &'static str, err: impl std::fmt::Display) -> Self {
        AnalysisError::Processing {
            stage,
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for AnalysisError {
    fn from(err: serde_yaml::Error) -> Self {
        AnalysisError::Config(format!("YAML error: {}", err))
    }
}

impl From<csv::Error> for AnalysisError {
    fn from(err: csv::Error) -> Self {
        AnalysisError::DataValidation(format!("CSV error: {}", err))
    }
}

impl From<calamine::Error> for AnalysisError {
    fn from(err: calamine::Error) -> Self {
        AnalysisError::DataValidation(format!("spreadsheet error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
