//! Joins the observed past and the forecast future of one parameter into a
//! single chart series, clipped to a date range.

use crate::datasets::tables::Datasets;
use crate::error::DashboardError;
use crate::filtering::ForecastFrameFilterExt;
use crate::types::dataset::{Dataset, DATE_COLUMN, VALUE_COLUMN};
use crate::types::parameter::Parameter;
use crate::types::traits::types::DateRange;
use chrono::NaiveDate;
use log::debug;
use polars::prelude::*;
use serde::Serialize;
use std::fmt;

const SOURCE_COLUMN: &str = "source";

/// Which table a merged point came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SeriesSource {
    Historical,
    Forecast,
}

impl SeriesSource {
    pub fn tag(self) -> &'static str {
        match self {
            SeriesSource::Historical => "Historical",
            SeriesSource::Forecast => "Forecast",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Historical" => Some(SeriesSource::Historical),
            "Forecast" => Some(SeriesSource::Forecast),
            _ => None,
        }
    }

    fn dataset(self) -> Dataset {
        match self {
            SeriesSource::Historical => Dataset::Historical,
            SeriesSource::Forecast => Dataset::Forecast,
        }
    }
}

impl fmt::Display for SeriesSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    /// `None` where the source table has an empty cell.
    pub value: Option<f64>,
    pub source: SeriesSource,
}

/// Historical and forecast values of one parameter, in date order.
///
/// Rows sharing a date are not deduplicated; on a tie the historical row comes first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedSeries {
    pub parameter: Parameter,
    pub points: Vec<SeriesPoint>,
}

impl MergedSeries {
    pub fn empty(parameter: Parameter) -> Self {
        Self {
            parameter,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter()
    }

    /// Points from one source only, still in date order.
    pub fn from_source(&self, source: SeriesSource) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter().filter(move |p| p.source == source)
    }

    pub fn to_json(&self) -> Result<String, DashboardError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn tagged_frame(
    data: &Datasets,
    parameter: Parameter,
    source: SeriesSource,
) -> Result<LazyFrame, DashboardError> {
    let frame = data.require_parameter(source.dataset(), parameter)?;
    Ok(frame.clone().lazy().select([
        col(DATE_COLUMN),
        col(parameter.code()).alias(VALUE_COLUMN),
        lit(source.tag()).alias(SOURCE_COLUMN),
    ]))
}

/// Builds the merged series of `parameter` restricted to `range` (inclusive,
/// calendar dates). A reversed range yields an empty series.
///
/// # Errors
///
/// Returns [`DashboardError::MissingParameter`] if either the historical or the
/// forecast table lacks a column for `parameter`.
pub fn merged_series(
    data: &Datasets,
    parameter: Parameter,
    range: DateRange,
) -> Result<MergedSeries, DashboardError> {
    let historical = tagged_frame(data, parameter, SeriesSource::Historical)?;
    let forecast = tagged_frame(data, parameter, SeriesSource::Forecast)?;

    let merged = concat([historical, forecast], UnionArgs::default())?
        .filter_date_range(range.start, range.end)
        .sort(
            [DATE_COLUMN],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;

    let dates = merged.column(DATE_COLUMN)?.date()?;
    let values = merged.column(VALUE_COLUMN)?.f64()?;
    let sources = merged.column(SOURCE_COLUMN)?.str()?;

    let points: Vec<SeriesPoint> = dates
        .as_date_iter()
        .zip(values)
        .zip(sources)
        .filter_map(|((date, value), source)| {
            Some(SeriesPoint {
                date: date?,
                value,
                source: SeriesSource::from_tag(source?)?,
            })
        })
        .collect();

    debug!(
        "Merged series for {} between {} and {}: {} points",
        parameter,
        range.start,
        range.end,
        points.len()
    );
    Ok(MergedSeries { parameter, points })
}
