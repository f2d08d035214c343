//! The handle a presentation layer holds for the lifetime of a process.
//!
//! A [`Dashboard`] wraps the loaded tables behind an `Arc` and answers every
//! per-interaction request (point prediction, chart series, residuals, export)
//! as a pure read over them. Clone it freely across sessions.

use crate::datasets::data_loader::{DataFiles, DatasetLoader};
use crate::datasets::tables::{Datasets, MetadataEntry, ModelMetrics};
use crate::error::DashboardError;
use crate::series::export::{forecast_export, ForecastExport};
use crate::series::merged_series::{merged_series, MergedSeries};
use crate::series::point_lookup::{predict_month, PointPrediction};
use crate::series::residuals::{residuals, ResidualSeries};
use crate::types::parameter::Parameter;
use crate::types::traits::any::any_date::AnyDate;
use crate::types::traits::types::DateRange;
use bon::bon;
use polars::prelude::DataFrame;
use std::path::PathBuf;
use std::sync::Arc;

/// Read-only access to the forecast dashboard data.
///
/// # Examples
///
/// ```no_run
/// # use meteoforecaster::{Dashboard, DashboardError, Parameter};
/// # #[tokio::main]
/// # async fn main() -> Result<(), DashboardError> {
/// let dashboard = Dashboard::with_data_dir("data").await?;
///
/// match dashboard
///     .point_prediction()
///     .parameter(Parameter::MinTemperature)
///     .year(2030)
///     .month(6)
///     .call()?
/// {
///     Some(p) => println!("{} in 2030-06: {:.2}", p.parameter.label(), p.value),
///     None => println!("No data for this period."),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Dashboard {
    data: Arc<Datasets>,
}

#[bon]
impl Dashboard {
    /// Loads the six tables from the working directory using the default file names.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Load`] if any table is missing or malformed.
    pub async fn new() -> Result<Self, DashboardError> {
        Self::with_data_dir(".").await
    }

    /// Loads the six tables from `data_dir` using the default file names.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Load`] if any table is missing or malformed.
    pub async fn with_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self, DashboardError> {
        let loader = DatasetLoader::new(DataFiles::in_dir(data_dir));
        Self::from_loader(&loader).await
    }

    /// Uses (and if needed populates) the cache of an existing loader.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Load`] if any table is missing or malformed.
    pub async fn from_loader(loader: &DatasetLoader) -> Result<Self, DashboardError> {
        Ok(Self::from_datasets(loader.load().await?))
    }

    pub fn from_datasets(data: Arc<Datasets>) -> Self {
        Self { data }
    }

    pub fn datasets(&self) -> &Datasets {
        &self.data
    }

    /// The selectable parameters, in catalog order.
    pub fn parameters(&self) -> &'static [Parameter] {
        &Parameter::ALL
    }

    pub fn metrics(&self, parameter: Parameter) -> Result<Option<ModelMetrics>, DashboardError> {
        self.data.metrics(parameter)
    }

    pub fn metadata(&self) -> &DataFrame {
        self.data.metadata()
    }

    pub fn metadata_entries(&self) -> Result<Vec<MetadataEntry>, DashboardError> {
        self.data.metadata_entries()
    }

    /// First historical date through last forecast date.
    pub fn default_range(&self) -> Option<DateRange> {
        self.data.default_range()
    }

    pub fn forecast_span(&self) -> Option<DateRange> {
        self.data.forecast_span()
    }

    /// Looks up the forecast of one parameter for one month.
    ///
    /// `Ok(None)` means the month lies outside the forecast (or its cell is empty).
    ///
    /// # Errors
    ///
    /// * [`DashboardError::InvalidMonth`] for a month number outside 1..=12.
    /// * [`DashboardError::MissingParameter`] if the forecast table has no such column.
    #[builder]
    pub fn point_prediction(
        &self,
        parameter: Parameter,
        year: i32,
        month: u32,
    ) -> Result<Option<PointPrediction>, DashboardError> {
        predict_month(&self.data, parameter, year, month)
    }

    /// Historical and forecast values of `parameter` between `start` and `end`, inclusive.
    ///
    /// `start` resolves to the beginning of its span and `end` to the end of its span,
    /// so `series(p, Year(2020), Year(2030))` covers 2020-01-01 through 2030-12-31.
    ///
    /// # Errors
    ///
    /// * [`DashboardError::DateParsingError`] if a bound cannot be resolved to a date.
    /// * [`DashboardError::MissingParameter`] if either table lacks the column.
    pub fn series(
        &self,
        parameter: Parameter,
        start: impl AnyDate,
        end: impl AnyDate,
    ) -> Result<MergedSeries, DashboardError> {
        let start = start
            .get_date_range()
            .ok_or(DashboardError::DateParsingError)?
            .start;
        let end = end
            .get_date_range()
            .ok_or(DashboardError::DateParsingError)?
            .end;
        merged_series(&self.data, parameter, DateRange::new(start, end))
    }

    /// The merged series over [`Dashboard::default_range`]; empty if either table has no rows.
    pub fn full_series(&self, parameter: Parameter) -> Result<MergedSeries, DashboardError> {
        match self.default_range() {
            Some(range) => merged_series(&self.data, parameter, range),
            None => Ok(MergedSeries::empty(parameter)),
        }
    }

    pub fn residuals(&self, parameter: Parameter) -> Result<ResidualSeries, DashboardError> {
        residuals(&self.data, parameter)
    }

    pub fn forecast_export(&self, parameter: Parameter) -> Result<ForecastExport, DashboardError> {
        forecast_export(&self.data, parameter)
    }
}
