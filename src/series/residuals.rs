//! Residual diagnostics over the held-out test period.

use crate::datasets::tables::Datasets;
use crate::error::DashboardError;
use crate::types::dataset::{Dataset, DATE_COLUMN};
use crate::types::parameter::Parameter;
use chrono::NaiveDate;
use log::debug;
use polars::prelude::*;
use serde::Serialize;

const ACTUAL_COLUMN: &str = "actual";
const PREDICTED_COLUMN: &str = "predicted";
const RESIDUAL_COLUMN: &str = "residual";
const ROW_COLUMN: &str = "row";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResidualPoint {
    pub date: NaiveDate,
    pub actual: Option<f64>,
    pub predicted: Option<f64>,
    /// `actual - predicted`; `None` if either side is missing.
    pub residual: Option<f64>,
}

/// Per-month prediction errors of one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidualSeries {
    pub parameter: Parameter,
    pub points: Vec<ResidualPoint>,
}

impl ResidualSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResidualPoint> {
        self.points.iter()
    }

    /// The residual values alone, skipping months where one side was missing.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().filter_map(|p| p.residual)
    }

    pub fn to_json(&self) -> Result<String, DashboardError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn test_column(
    data: &Datasets,
    dataset: Dataset,
    parameter: Parameter,
    alias: &str,
) -> Result<LazyFrame, DashboardError> {
    let frame = data.require_parameter(dataset, parameter)?;
    Ok(frame
        .clone()
        .lazy()
        .select([col(DATE_COLUMN), col(parameter.code()).alias(alias)])
        .unique_stable(Some(vec![DATE_COLUMN.into()]), UniqueKeepStrategy::First))
}

/// Computes `actual - predicted` for `parameter` at every date present in both
/// test tables, in the row order of the actual table. Dates found in only one
/// of the two tables are dropped. If a table repeats a date, its first row for
/// that date is used.
///
/// # Errors
///
/// Returns [`DashboardError::MissingParameter`] if either test table lacks a
/// column for `parameter`.
pub fn residuals(data: &Datasets, parameter: Parameter) -> Result<ResidualSeries, DashboardError> {
    let actual = test_column(data, Dataset::ActualTest, parameter, ACTUAL_COLUMN)?;
    let predicted = test_column(data, Dataset::PredictedTest, parameter, PREDICTED_COLUMN)?;

    let joined = actual
        .with_row_index(ROW_COLUMN, None)
        .join(
            predicted,
            [col(DATE_COLUMN)],
            [col(DATE_COLUMN)],
            JoinArgs::new(JoinType::Inner),
        )
        .with_column((col(ACTUAL_COLUMN) - col(PREDICTED_COLUMN)).alias(RESIDUAL_COLUMN))
        .sort([ROW_COLUMN], SortMultipleOptions::default())
        .collect()?;

    let dates = joined.column(DATE_COLUMN)?.date()?;
    let actual = joined.column(ACTUAL_COLUMN)?.f64()?;
    let predicted = joined.column(PREDICTED_COLUMN)?.f64()?;
    let residual = joined.column(RESIDUAL_COLUMN)?.f64()?;

    let points: Vec<ResidualPoint> = dates
        .as_date_iter()
        .zip(actual)
        .zip(predicted)
        .zip(residual)
        .filter_map(|(((date, actual), predicted), residual)| {
            Some(ResidualPoint {
                date: date?,
                actual,
                predicted,
                residual,
            })
        })
        .collect();

    debug!("Residuals for {}: {} points", parameter, points.len());
    Ok(ResidualSeries { parameter, points })
}
