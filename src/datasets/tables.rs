//! The loaded, read-only tables and the trivial key lookups over them.

use crate::error::DashboardError;
use crate::types::dataset::{
    Dataset, IndexKind, DATE_COLUMN, LABEL_COLUMN, PARAMETER_COLUMN, VALUE_COLUMN,
};
use crate::types::parameter::Parameter;
use crate::types::traits::types::DateRange;
use polars::prelude::*;
use serde::Serialize;

pub(crate) fn get_opt_float(column: &Column, idx: usize) -> Option<f64> {
    column.f64().ok().and_then(|ca| ca.get(idx))
}

/// Pre-computed evaluation scores of the model for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelMetrics {
    pub rmse: Option<f64>,
    pub mae: Option<f64>,
    pub r2: Option<f64>,
}

/// One row of the model metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataEntry {
    pub label: String,
    pub value: Option<String>,
}

/// The six dashboard tables, fully loaded and validated.
///
/// Instances are produced by [`crate::DatasetLoader::load`] and never mutated
/// afterwards; share them behind the returned `Arc`.
///
/// Shapes:
/// * historical, forecast, actual test, predicted test: a `date` column of
///   dtype `Date` followed by one `Float64` column per parameter code found in the file.
/// * metrics: `parameter` (string) followed by `RMSE`, `MAE`, `R2` (`Float64`).
/// * metadata: `label` and `value`, both strings, in file order.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub(crate) historical: DataFrame,
    pub(crate) forecast: DataFrame,
    pub(crate) metrics: DataFrame,
    pub(crate) metadata: DataFrame,
    pub(crate) actual_test: DataFrame,
    pub(crate) predicted_test: DataFrame,
}

impl Datasets {
    pub fn table(&self, dataset: Dataset) -> &DataFrame {
        match dataset {
            Dataset::Historical => &self.historical,
            Dataset::Forecast => &self.forecast,
            Dataset::Metrics => &self.metrics,
            Dataset::Metadata => &self.metadata,
            Dataset::ActualTest => &self.actual_test,
            Dataset::PredictedTest => &self.predicted_test,
        }
    }

    pub fn historical(&self) -> &DataFrame {
        &self.historical
    }

    pub fn forecast(&self) -> &DataFrame {
        &self.forecast
    }

    pub fn actual_test(&self) -> &DataFrame {
        &self.actual_test
    }

    pub fn predicted_test(&self) -> &DataFrame {
        &self.predicted_test
    }

    /// The metadata table exactly as loaded, for tabular display.
    pub fn metadata(&self) -> &DataFrame {
        &self.metadata
    }

    /// Returns the table if it has a column for `parameter`.
    pub(crate) fn require_parameter(
        &self,
        dataset: Dataset,
        parameter: Parameter,
    ) -> Result<&DataFrame, DashboardError> {
        let frame = self.table(dataset);
        match frame.get_column_index(parameter.code()) {
            Some(_) => Ok(frame),
            None => Err(DashboardError::MissingParameter { parameter, dataset }),
        }
    }

    /// First and last date of a date-indexed table, or `None` for key-indexed
    /// and empty tables.
    pub fn date_span(&self, dataset: Dataset) -> Option<DateRange> {
        if dataset.index_kind() != IndexKind::Date {
            return None;
        }
        let dates = self.table(dataset).column(DATE_COLUMN).ok()?.date().ok()?;
        let start = dates.as_date_iter().flatten().min()?;
        let end = dates.as_date_iter().flatten().max()?;
        Some(DateRange::new(start, end))
    }

    /// The range a dashboard opens with: first historical month through last forecast month.
    pub fn default_range(&self) -> Option<DateRange> {
        let historical = self.date_span(Dataset::Historical)?;
        let forecast = self.date_span(Dataset::Forecast)?;
        Some(DateRange::new(historical.start, forecast.end))
    }

    pub fn forecast_span(&self) -> Option<DateRange> {
        self.date_span(Dataset::Forecast)
    }

    /// Looks up the evaluation metrics for `parameter`.
    ///
    /// Returns `Ok(None)` when the metrics table has no row for it; the metrics
    /// table is keyed independently of the date-indexed tables.
    pub fn metrics(&self, parameter: Parameter) -> Result<Option<ModelMetrics>, DashboardError> {
        let found = self
            .metrics
            .clone()
            .lazy()
            .filter(col(PARAMETER_COLUMN).eq(lit(parameter.code())))
            .collect()?;

        if found.height() == 0 {
            return Ok(None);
        }

        Ok(Some(ModelMetrics {
            rmse: get_opt_float(found.column("RMSE")?, 0),
            mae: get_opt_float(found.column("MAE")?, 0),
            r2: get_opt_float(found.column("R2")?, 0),
        }))
    }

    pub fn metadata_entries(&self) -> Result<Vec<MetadataEntry>, DashboardError> {
        let labels = self.metadata.column(LABEL_COLUMN)?.str()?;
        let values = self.metadata.column(VALUE_COLUMN)?.str()?;

        Ok(labels
            .into_iter()
            .zip(values)
            .map(|(label, value)| MetadataEntry {
                label: label.unwrap_or_default().to_string(),
                value: value.map(str::to_string),
            })
            .collect())
    }
}
