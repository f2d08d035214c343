use crate::datasets::error::LoadError;
use crate::datasets::tables::Datasets;
use crate::types::dataset::{
    Dataset, IndexKind, DATE_COLUMN, LABEL_COLUMN, METRIC_COLUMNS, PARAMETER_COLUMN,
    VALUE_COLUMN,
};
use crate::types::traits::utils::parse_calendar_date;
use bon::Builder;
use chrono::NaiveDate;
use log::{debug, info, warn};
use polars::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tokio::{fs, task};

/// Where the six CSV resources live.
///
/// Every file name defaults to the name the training pipeline publishes it
/// under, relative to `data_dir` (itself defaulting to the working directory).
///
/// # Examples
///
/// ```
/// use meteoforecaster::{DataFiles, Dataset};
/// use std::path::Path;
///
/// let files = DataFiles::builder()
///     .data_dir("/srv/palembang")
///     .forecast("forecast_2025_2044.csv")
///     .build();
///
/// assert_eq!(files.path(Dataset::Forecast), Path::new("/srv/palembang/forecast_2025_2044.csv"));
/// assert_eq!(
///     files.path(Dataset::Metrics),
///     Path::new("/srv/palembang/evaluation model_metrics.csv")
/// );
/// ```
#[derive(Debug, Clone, Builder)]
pub struct DataFiles {
    #[builder(into, default = PathBuf::from("."))]
    data_dir: PathBuf,
    #[builder(into, default = Dataset::Historical.default_file_name().to_string())]
    historical: String,
    #[builder(into, default = Dataset::Forecast.default_file_name().to_string())]
    forecast: String,
    #[builder(into, default = Dataset::Metrics.default_file_name().to_string())]
    metrics: String,
    #[builder(into, default = Dataset::Metadata.default_file_name().to_string())]
    metadata: String,
    #[builder(into, default = Dataset::ActualTest.default_file_name().to_string())]
    actual_test: String,
    #[builder(into, default = Dataset::PredictedTest.default_file_name().to_string())]
    predicted_test: String,
}

impl DataFiles {
    /// Default file names inside `data_dir`.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self::builder().data_dir(data_dir).build()
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path(&self, dataset: Dataset) -> PathBuf {
        let file_name = match dataset {
            Dataset::Historical => &self.historical,
            Dataset::Forecast => &self.forecast,
            Dataset::Metrics => &self.metrics,
            Dataset::Metadata => &self.metadata,
            Dataset::ActualTest => &self.actual_test,
            Dataset::PredictedTest => &self.predicted_test,
        };
        self.data_dir.join(file_name)
    }
}

impl Default for DataFiles {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Loads the six dashboard tables once and hands out the cached result.
///
/// Loading is all-or-nothing: either every table parses and validates, or
/// [`DatasetLoader::load`] returns the first [`LoadError`] encountered and
/// nothing is cached. A successful load is kept for the lifetime of the
/// loader; later calls return the same `Arc` without touching the filesystem.
pub struct DatasetLoader {
    files: DataFiles,
    cache: OnceCell<Arc<Datasets>>,
}

impl DatasetLoader {
    pub fn new(files: DataFiles) -> Self {
        Self {
            files,
            cache: OnceCell::new(),
        }
    }

    pub fn files(&self) -> &DataFiles {
        &self.files
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.initialized()
    }

    pub async fn load(&self) -> Result<Arc<Datasets>, LoadError> {
        if let Some(cached) = self.cache.get() {
            debug!("Dashboard tables already loaded from {:?}", self.files.data_dir);
            return Ok(Arc::clone(cached));
        }

        let loaded = self
            .cache
            .get_or_try_init(|| self.read_all())
            .await
            .inspect_err(|e| warn!("Loading dashboard tables failed: {}", e))?;
        Ok(Arc::clone(loaded))
    }

    async fn read_all(&self) -> Result<Arc<Datasets>, LoadError> {
        let (historical, forecast, metrics, metadata, actual_test, predicted_test) = tokio::try_join!(
            self.read_table(Dataset::Historical),
            self.read_table(Dataset::Forecast),
            self.read_table(Dataset::Metrics),
            self.read_table(Dataset::Metadata),
            self.read_table(Dataset::ActualTest),
            self.read_table(Dataset::PredictedTest),
        )?;

        info!(
            "Loaded dashboard tables from {:?}: {} historical, {} forecast, {} test rows",
            self.files.data_dir,
            historical.height(),
            forecast.height(),
            actual_test.height()
        );

        Ok(Arc::new(Datasets {
            historical,
            forecast,
            metrics,
            metadata,
            actual_test,
            predicted_test,
        }))
    }

    /// Checks the file exists, then parses and validates it on a blocking thread.
    async fn read_table(&self, dataset: Dataset) -> Result<DataFrame, LoadError> {
        let path = self.files.path(dataset);

        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => {
                return Err(LoadError::Unreadable {
                    dataset,
                    path,
                    source: io::Error::other("not a regular file"),
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::MissingFile { dataset, path })
            }
            Err(e) => {
                return Err(LoadError::Unreadable {
                    dataset,
                    path,
                    source: e,
                })
            }
        }

        let task_path = path.clone();
        let frame = task::spawn_blocking(move || parse_table(dataset, &task_path)).await??;
        info!(
            "Loaded {} table from {:?} ({} rows, {} columns)",
            dataset,
            path,
            frame.height(),
            frame.width()
        );
        Ok(frame)
    }
}

fn parse_table(dataset: Dataset, path: &Path) -> Result<DataFrame, LoadError> {
    // Metadata is surfaced verbatim, so every cell stays text.
    let infer_schema_length = match dataset {
        Dataset::Metadata => Some(0),
        _ => None,
    };
    let raw = CsvReadOptions::default()
        .with_has_header(dataset.has_header())
        .with_infer_schema_length(infer_schema_length)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| LoadError::CsvRead {
            dataset,
            path: path.to_path_buf(),
            source: e,
        })?;

    match (dataset, dataset.index_kind()) {
        (_, IndexKind::Date) => date_indexed_table(dataset, &raw),
        (Dataset::Metrics, _) => metrics_table(dataset, &raw),
        _ => metadata_table(dataset, &raw),
    }
}

/// First column parsed into `date`, every other column cast to `Float64`.
fn date_indexed_table(dataset: Dataset, raw: &DataFrame) -> Result<DataFrame, LoadError> {
    let columns = raw.get_columns();
    let Some((index, values)) = columns.split_first().filter(|(_, values)| !values.is_empty())
    else {
        return Err(LoadError::TooFewColumns {
            dataset,
            expected: 2,
            found: raw.width(),
        });
    };

    let dates = parse_date_index(dataset, index)?;
    let mut parsed = Vec::with_capacity(columns.len());
    parsed.push(Series::new(DATE_COLUMN.into(), dates).into_column());
    for column in values {
        parsed.push(numeric_column(dataset, column)?);
    }

    DataFrame::new(parsed).map_err(|e| LoadError::Frame { dataset, source: e })
}

fn parse_date_index(dataset: Dataset, index: &Column) -> Result<Vec<NaiveDate>, LoadError> {
    let frame_err = |e| LoadError::Frame { dataset, source: e };
    let text = index.cast(&DataType::String).map_err(frame_err)?;

    text.str()
        .map_err(frame_err)?
        .into_iter()
        .enumerate()
        .map(|(i, cell)| {
            let row = i + 1;
            let cell = cell.ok_or(LoadError::EmptyIndexValue { dataset, row })?;
            parse_calendar_date(cell).ok_or_else(|| LoadError::InvalidDate {
                dataset,
                row,
                value: cell.to_string(),
            })
        })
        .collect()
}

/// Casts a value column to `Float64`, rejecting text. An all-empty column is
/// inferred as text by the CSV reader and is accepted as all-null.
fn numeric_column(dataset: Dataset, column: &Column) -> Result<Column, LoadError> {
    let all_null = column.null_count() == column.len();
    match column.dtype() {
        DataType::Float64
        | DataType::Float32
        | DataType::Int64
        | DataType::Int32
        | DataType::Null => {}
        DataType::String if all_null => {}
        other => {
            debug!("Rejecting {} column '{}' of dtype {}", dataset, column.name(), other);
            return Err(LoadError::NonNumericColumn {
                dataset,
                column: column.name().to_string(),
                dtype: other.to_string(),
            });
        }
    }
    column
        .cast(&DataType::Float64)
        .map_err(|e| LoadError::Frame { dataset, source: e })
}

fn metrics_table(dataset: Dataset, raw: &DataFrame) -> Result<DataFrame, LoadError> {
    let frame_err = |e| LoadError::Frame { dataset, source: e };
    let Some(index) = raw.get_columns().first() else {
        return Err(LoadError::TooFewColumns {
            dataset,
            expected: METRIC_COLUMNS.len() + 1,
            found: 0,
        });
    };

    let mut parsed = vec![index
        .cast(&DataType::String)
        .map_err(frame_err)?
        .with_name(PARAMETER_COLUMN.into())];
    for name in METRIC_COLUMNS {
        let column = raw.column(name).map_err(|_| LoadError::MissingColumn {
            dataset,
            column: name.to_string(),
        })?;
        parsed.push(numeric_column(dataset, column)?);
    }

    DataFrame::new(parsed).map_err(frame_err)
}

fn metadata_table(dataset: Dataset, raw: &DataFrame) -> Result<DataFrame, LoadError> {
    let frame_err = |e| LoadError::Frame { dataset, source: e };
    let [label, value] = raw.get_columns() else {
        return Err(LoadError::ColumnCount {
            dataset,
            expected: 2,
            found: raw.width(),
        });
    };

    DataFrame::new(vec![
        label
            .cast(&DataType::String)
            .map_err(frame_err)?
            .with_name(LABEL_COLUMN.into()),
        value
            .cast(&DataType::String)
            .map_err(frame_err)?
            .with_name(VALUE_COLUMN.into()),
    ])
    .map_err(frame_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{monthly_csv, Fixture};

    #[tokio::test]
    async fn test_load_all_tables() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new()?;
        let data = fixture.loader().load().await?;

        for dataset in [
            Dataset::Historical,
            Dataset::Forecast,
            Dataset::ActualTest,
            Dataset::PredictedTest,
        ] {
            let frame = data.table(dataset);
            assert_eq!(frame.width(), 9, "{} should have date + 8 parameters", dataset);
            assert_eq!(frame.column(DATE_COLUMN)?.dtype(), &DataType::Date);
            assert_eq!(frame.column("TN")?.dtype(), &DataType::Float64);
        }
        assert_eq!(data.historical().height(), 3);
        assert_eq!(data.forecast().height(), 4);

        let metrics = data.table(Dataset::Metrics);
        let names: Vec<&str> = metrics.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, [PARAMETER_COLUMN, "RMSE", "MAE", "R2"]);
        assert_eq!(data.metadata().width(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_is_cached() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new()?;
        let loader = fixture.loader();
        assert!(!loader.is_loaded());

        let first = loader.load().await?;
        assert!(loader.is_loaded());

        // Removing the files must not matter once the tables are cached.
        fixture.remove(Dataset::Historical)?;
        fixture.remove(Dataset::Forecast)?;
        let second = loader.load().await?;

        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.historical().equals_missing(second.historical()));
        Ok(())
    }

    #[tokio::test]
    async fn test_two_loaders_read_identical_tables() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new()?;
        let first = fixture.loader().load().await?;
        let second = fixture.loader().load().await?;

        for dataset in Dataset::ALL {
            assert!(
                first.table(dataset).equals_missing(second.table(dataset)),
                "{} differs between loads",
                dataset
            );
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_fails_whole_load() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new()?;
        fixture.remove(Dataset::PredictedTest)?;
        let loader = fixture.loader();

        let err = loader.load().await.unwrap_err();
        assert!(err.is_missing_file());
        assert_eq!(err.dataset(), Some(Dataset::PredictedTest));
        assert!(!loader.is_loaded());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_load_can_be_retried() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new()?;
        fixture.remove(Dataset::Metadata)?;
        let loader = fixture.loader();
        assert!(loader.load().await.is_err());

        fixture.write(Dataset::Metadata, "Model,LSTM\n")?;
        let data = loader.load().await?;
        assert_eq!(data.metadata().height(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_unparsable_date_is_malformed() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new()?;
        fixture.write(
            Dataset::Historical,
            &monthly_csv(&[("2020-01-01", 10.0), ("January 2020", 11.0)]),
        )?;

        let err = fixture.loader().load().await.unwrap_err();
        assert!(!err.is_missing_file());
        match err {
            LoadError::InvalidDate {
                dataset,
                row,
                value,
            } => {
                assert_eq!(dataset, Dataset::Historical);
                assert_eq!(row, 2);
                assert_eq!(value, "January 2020");
            }
            other => panic!("expected InvalidDate, got {:?}", other),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_timestamp_index_is_truncated_to_date() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new()?;
        fixture.write(
            Dataset::ActualTest,
            ",TN\n2019-10-01 00:00:00,20.5\n2019-11-01 06:30:00,21.5\n",
        )?;
        let data = fixture.loader().load().await?;

        let dates: Vec<Option<NaiveDate>> = data
            .actual_test()
            .column(DATE_COLUMN)?
            .date()?
            .as_date_iter()
            .collect();
        assert_eq!(
            dates,
            [
                NaiveDate::from_ymd_opt(2019, 10, 1),
                NaiveDate::from_ymd_opt(2019, 11, 1)
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_text_value_column_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new()?;
        fixture.write(Dataset::Forecast, ",TN,RR\n2020-04-01,13,heavy\n")?;

        let err = fixture.loader().load().await.unwrap_err();
        assert!(
            matches!(err, LoadError::NonNumericColumn { dataset: Dataset::Forecast, ref column, .. } if column == "RR"),
            "unexpected error {:?}",
            err
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_index_only_table_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new()?;
        fixture.write(Dataset::PredictedTest, "date\n2019-10-01\n")?;

        let err = fixture.loader().load().await.unwrap_err();
        assert!(matches!(
            err,
            LoadError::TooFewColumns {
                dataset: Dataset::PredictedTest,
                expected: 2,
                found: 1
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cells_load_as_nulls() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new()?;
        fixture.write(
            Dataset::Historical,
            ",TN,SS\n2020-01-01,10,\n2020-02-01,,\n2020-03-01,12,\n",
        )?;
        let data = fixture.loader().load().await?;

        let historical = data.historical();
        assert_eq!(historical.column("TN")?.null_count(), 1);
        assert_eq!(historical.column("SS")?.null_count(), 3);
        assert_eq!(historical.column("SS")?.dtype(), &DataType::Float64);
        Ok(())
    }

    #[tokio::test]
    async fn test_metrics_require_metric_columns() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new()?;
        fixture.write(Dataset::Metrics, ",RMSE,MAE\nTN,0.5,0.4\n")?;

        let err = fixture.loader().load().await.unwrap_err();
        assert!(
            matches!(err, LoadError::MissingColumn { dataset: Dataset::Metrics, ref column } if column == "R2"),
            "unexpected error {:?}",
            err
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_metadata_needs_two_columns() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new()?;
        fixture.write(Dataset::Metadata, "Model,LSTM,v2\nEpochs,100,v2\n")?;

        let err = fixture.loader().load().await.unwrap_err();
        assert!(matches!(
            err,
            LoadError::ColumnCount {
                dataset: Dataset::Metadata,
                expected: 2,
                found: 3
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_metadata_values_are_kept_as_written() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new()?;
        fixture.write(
            Dataset::Metadata,
            "Model,LSTM\nEpochs,100\nLearning rate,0.001\nDropout,\n",
        )?;
        let data = fixture.loader().load().await?;

        let values: Vec<Option<String>> = data
            .metadata_entries()?
            .into_iter()
            .map(|entry| entry.value)
            .collect();
        assert_eq!(
            values,
            [
                Some("LSTM".to_string()),
                Some("100".to_string()),
                Some("0.001".to_string()),
                None
            ]
        );
        assert_eq!(data.metadata().column(VALUE_COLUMN)?.dtype(), &DataType::String);
        Ok(())
    }

    #[tokio::test]
    async fn test_custom_file_names() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = Fixture::new()?;
        std::fs::rename(
            fixture.files().path(Dataset::Forecast),
            fixture.dir().join("forecast.csv"),
        )?;

        let files = DataFiles::builder()
            .data_dir(fixture.dir())
            .forecast("forecast.csv")
            .build();
        let data = DatasetLoader::new(files).load().await?;
        assert_eq!(data.forecast().height(), 4);
        Ok(())
    }
}
