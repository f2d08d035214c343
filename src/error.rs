use crate::datasets::error::LoadError;
use crate::types::dataset::Dataset;
use crate::types::parameter::Parameter;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Unknown parameter code '{0}'")]
    UnknownParameter(String),

    #[error("Parameter {parameter} is not a column of the {dataset} table")]
    MissingParameter {
        parameter: Parameter,
        dataset: Dataset,
    },

    #[error("{year:04}-{month:02} is not a valid calendar month")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Could not resolve the requested date range")]
    DateParsingError,

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Failed to serialize series to JSON")]
    Json(#[from] serde_json::Error),
}

impl DashboardError {
    /// True for both flavours of a bad parameter request: a code outside the
    /// catalog, or a catalog code missing from the table being read.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            DashboardError::UnknownParameter(_) | DashboardError::MissingParameter { .. }
        )
    }
}
