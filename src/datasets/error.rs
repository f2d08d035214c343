use crate::types::dataset::Dataset;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Why the dashboard data could not be loaded. Any one of these fails the
/// whole load; no table is handed out on error.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The {dataset} file '{path}' does not exist")]
    MissingFile { dataset: Dataset, path: PathBuf },

    #[error("Failed to read the {dataset} file '{path}'")]
    Unreadable {
        dataset: Dataset,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parsing error reading the {dataset} file '{path}'")]
    CsvRead {
        dataset: Dataset,
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("The {dataset} table needs at least {expected} columns, found {found}")]
    TooFewColumns {
        dataset: Dataset,
        expected: usize,
        found: usize,
    },

    #[error("The {dataset} table must have exactly {expected} columns, found {found}")]
    ColumnCount {
        dataset: Dataset,
        expected: usize,
        found: usize,
    },

    #[error("Missing required column '{column}' in the {dataset} table")]
    MissingColumn { dataset: Dataset, column: String },

    #[error("Empty index value in row {row} of the {dataset} table")]
    EmptyIndexValue { dataset: Dataset, row: usize },

    #[error("Unparsable date '{value}' in row {row} of the {dataset} table")]
    InvalidDate {
        dataset: Dataset,
        row: usize,
        value: String,
    },

    #[error("Column '{column}' of the {dataset} table is not numeric ({dtype})")]
    NonNumericColumn {
        dataset: Dataset,
        column: String,
        dtype: String,
    },

    #[error("Polars operation failed for the {dataset} table: {source}")]
    Frame {
        dataset: Dataset,
        #[source]
        source: PolarsError,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl LoadError {
    /// Distinguishes an absent resource from one that exists but could not be used.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, LoadError::MissingFile { .. })
    }

    /// The resource the failure belongs to, if it can be attributed to one.
    pub fn dataset(&self) -> Option<Dataset> {
        match self {
            LoadError::MissingFile { dataset, .. }
            | LoadError::Unreadable { dataset, .. }
            | LoadError::CsvRead { dataset, .. }
            | LoadError::TooFewColumns { dataset, .. }
            | LoadError::ColumnCount { dataset, .. }
            | LoadError::MissingColumn { dataset, .. }
            | LoadError::EmptyIndexValue { dataset, .. }
            | LoadError::InvalidDate { dataset, .. }
            | LoadError::NonNumericColumn { dataset, .. }
            | LoadError::Frame { dataset, .. } => Some(*dataset),
            LoadError::TaskJoin(_) => None,
        }
    }
}
