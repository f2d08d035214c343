mod dashboard;
mod datasets;
mod error;
mod filtering;
mod series;
mod types;

#[cfg(test)]
mod test_support;

pub use dashboard::Dashboard;
pub use error::DashboardError;

pub use datasets::data_loader::{DataFiles, DatasetLoader};
pub use datasets::error::LoadError;
pub use datasets::tables::{Datasets, MetadataEntry, ModelMetrics};

pub use types::dataset::{
    Dataset, IndexKind, DATE_COLUMN, LABEL_COLUMN, PARAMETER_COLUMN, VALUE_COLUMN,
};
pub use types::parameter::{label_for, Parameter};

pub use types::traits::any::any_date::AnyDate;
pub use types::traits::types::DateRange;
pub use types::traits::types::Month;
pub use types::traits::types::Year;

pub use filtering::ForecastFrameFilterExt;

pub use series::export::{forecast_export, ForecastExport};
pub use series::merged_series::{merged_series, MergedSeries, SeriesPoint, SeriesSource};
pub use series::point_lookup::{predict_month, PointPrediction};
pub use series::residuals::{residuals, ResidualPoint, ResidualSeries};
