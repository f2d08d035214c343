use crate::datasets::tables::{get_opt_float, Datasets};
use crate::error::DashboardError;
use crate::filtering::ForecastFrameFilterExt;
use crate::types::dataset::Dataset;
use crate::types::parameter::Parameter;
use crate::types::traits::types::Month;
use chrono::NaiveDate;
use log::debug;
use polars::prelude::{col, IntoLazy};
use serde::Serialize;

/// The forecast value of one parameter for one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointPrediction {
    pub parameter: Parameter,
    /// First day of the requested month, the row key in the forecast table.
    pub date: NaiveDate,
    pub value: f64,
}

/// Resolves the forecast value of `parameter` for `year`/`month`.
///
/// Returns `Ok(None)` when the forecast table has no row for the first day of
/// that month, or the cell is empty. That is the normal answer for a month
/// outside the forecast horizon. If the table holds several rows for the same
/// month the first one wins.
///
/// # Errors
///
/// * [`DashboardError::InvalidMonth`] if `month` is not in 1..=12 or the year is out of range.
/// * [`DashboardError::MissingParameter`] if the forecast table has no column for `parameter`.
pub fn predict_month(
    data: &Datasets,
    parameter: Parameter,
    year: i32,
    month: u32,
) -> Result<Option<PointPrediction>, DashboardError> {
    let date = Month::new(month, year)
        .first_day()
        .ok_or(DashboardError::InvalidMonth { year, month })?;
    let forecast = data.require_parameter(Dataset::Forecast, parameter)?;
    let code = parameter.code();

    let rows = forecast
        .clone()
        .lazy()
        .filter_date(date)
        .select([col(code)])
        .collect()?;

    if rows.height() == 0 {
        debug!("No forecast row for {} on {}", parameter, date);
        return Ok(None);
    }

    Ok(get_opt_float(rows.column(code)?, 0).map(|value| PointPrediction {
        parameter,
        date,
        value,
    }))
}
