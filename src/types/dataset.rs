//! Defines the six tabular resources the dashboard reads and how each one is indexed.

use std::fmt;

/// Name of the parsed index column in every date-indexed table.
pub const DATE_COLUMN: &str = "date";
/// Name of the key column in the metrics table.
pub const PARAMETER_COLUMN: &str = "parameter";
/// Name of the key column in the metadata table.
pub const LABEL_COLUMN: &str = "label";
/// Name of the value column in the metadata table.
pub const VALUE_COLUMN: &str = "value";

/// Metric columns the metrics table must provide, in display order.
pub(crate) const METRIC_COLUMNS: [&str; 3] = ["RMSE", "MAE", "R2"];

/// Identifies one of the six CSV resources backing the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// Observed monthly values (the past).
    Historical,
    /// Model forecast, roughly 20 years ahead (the future).
    Forecast,
    /// Evaluation metrics (RMSE, MAE, R2) indexed by parameter code.
    Metrics,
    /// Free-form model metadata: one label and one value per row, no header.
    Metadata,
    /// Actual values over the held-out test period.
    ActualTest,
    /// Model predictions over the held-out test period.
    PredictedTest,
}

/// How the first column of a resource is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Parsed into a calendar date column named [`DATE_COLUMN`].
    Date,
    /// Kept as a plain string key.
    Key,
}

impl Dataset {
    /// All resources, in loading order.
    pub const ALL: [Dataset; 6] = [
        Dataset::Historical,
        Dataset::Forecast,
        Dataset::Metrics,
        Dataset::Metadata,
        Dataset::ActualTest,
        Dataset::PredictedTest,
    ];

    /// File name the resource is published under by the training pipeline.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Dataset::Historical => "data processed_data monthly.csv",
            Dataset::Forecast => "data forecast_peramalan 20 tahun semua parameter.csv",
            Dataset::Metrics => "evaluation model_metrics.csv",
            Dataset::Metadata => "metadata_model metadata.csv",
            Dataset::ActualTest => "data dashboard_data aktual test.csv",
            Dataset::PredictedTest => "data dashboard_data prediksi test.csv",
        }
    }

    pub fn index_kind(&self) -> IndexKind {
        match self {
            Dataset::Historical
            | Dataset::Forecast
            | Dataset::ActualTest
            | Dataset::PredictedTest => IndexKind::Date,
            Dataset::Metrics | Dataset::Metadata => IndexKind::Key,
        }
    }

    /// Whether the CSV carries a header row. Only the metadata file does not.
    pub(crate) fn has_header(&self) -> bool {
        !matches!(self, Dataset::Metadata)
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Dataset::Historical => "historical",
            Dataset::Forecast => "forecast",
            Dataset::Metrics => "metrics",
            Dataset::Metadata => "metadata",
            Dataset::ActualTest => "actual test",
            Dataset::PredictedTest => "predicted test",
        }
    }
}

/// Formats a `Dataset` by its short name.
///
/// # Examples
///
/// ```
/// use meteoforecaster::Dataset;
///
/// assert_eq!(Dataset::ActualTest.to_string(), "actual test");
/// assert_eq!(format!("{}", Dataset::Forecast), "forecast");
/// ```
impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_kinds() {
        let date_indexed: Vec<Dataset> = Dataset::ALL
            .into_iter()
            .filter(|d| d.index_kind() == IndexKind::Date)
            .collect();
        assert_eq!(
            date_indexed,
            [
                Dataset::Historical,
                Dataset::Forecast,
                Dataset::ActualTest,
                Dataset::PredictedTest
            ]
        );
        assert!(Dataset::ALL.iter().filter(|d| !d.has_header()).eq([&Dataset::Metadata]));
    }

    #[test]
    fn test_default_file_names_are_distinct() {
        let mut names: Vec<&str> = Dataset::ALL.iter().map(|d| d.default_file_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Dataset::ALL.len());
    }
}
