//! CSV fixtures for the unit tests, written into a throwaway directory.

use crate::datasets::data_loader::{DataFiles, DatasetLoader};
use crate::types::dataset::Dataset;
use crate::types::parameter::Parameter;
use std::io;
use std::path::Path;
use tempfile::TempDir;

/// Offset added per catalog position, so TX = TN + 10, RH_AVG = TN + 20, ...
pub(crate) const PARAMETER_OFFSET: f64 = 10.0;

/// A monthly table with all eight parameter columns and a blank index header,
/// the way the training pipeline writes them. `value` is the TN value; every
/// other parameter is shifted by its catalog position times [`PARAMETER_OFFSET`].
pub(crate) fn monthly_csv(rows: &[(&str, f64)]) -> String {
    let mut csv = String::new();
    for parameter in Parameter::ALL {
        csv.push(',');
        csv.push_str(parameter.code());
    }
    csv.push('\n');
    for (date, value) in rows {
        csv.push_str(date);
        for (i, _) in Parameter::ALL.iter().enumerate() {
            csv.push_str(&format!(",{}", value + i as f64 * PARAMETER_OFFSET));
        }
        csv.push('\n');
    }
    csv
}

const METRICS_CSV: &str = ",RMSE,MAE,R2
TN,0.5123,0.4011,0.9132
TX,0.6210,0.4876,0.8820
RH_AVG,2.4100,1.9005,0.7741
RR,95.3100,71.2200,0.4120
SS,0.8800,0.6710,0.6005
FF_X,0.7002,0.5501,0.5530
FF_AVG,0.3300,0.2601,0.6102
";

const METADATA_CSV: &str = "Model,LSTM
Look back,12
Epochs,100
Optimizer,Adam
";

/// Historical: 2020-01..2020-03 (TN 10, 11, 12).
/// Forecast: 2020-04..2020-06 (TN 13, 14, 15) and 2030-06 (TN 25.4).
/// Test period: 2019-10..2019-12 for both actual and predicted.
pub(crate) struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub(crate) fn new() -> io::Result<Self> {
        let fixture = Self {
            dir: TempDir::new()?,
        };
        fixture.write(
            Dataset::Historical,
            &monthly_csv(&[("2020-01-01", 10.0), ("2020-02-01", 11.0), ("2020-03-01", 12.0)]),
        )?;
        fixture.write(
            Dataset::Forecast,
            &monthly_csv(&[
                ("2020-04-01", 13.0),
                ("2020-05-01", 14.0),
                ("2020-06-01", 15.0),
                ("2030-06-01", 25.4),
            ]),
        )?;
        fixture.write(Dataset::Metrics, METRICS_CSV)?;
        fixture.write(Dataset::Metadata, METADATA_CSV)?;
        fixture.write(
            Dataset::ActualTest,
            &monthly_csv(&[("2019-10-01", 20.0), ("2019-11-01", 21.5), ("2019-12-01", 19.0)]),
        )?;
        fixture.write(
            Dataset::PredictedTest,
            &monthly_csv(&[("2019-10-01", 19.5), ("2019-11-01", 22.0), ("2019-12-01", 19.0)]),
        )?;
        Ok(fixture)
    }

    pub(crate) fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn files(&self) -> DataFiles {
        DataFiles::in_dir(self.dir.path())
    }

    pub(crate) fn loader(&self) -> DatasetLoader {
        DatasetLoader::new(self.files())
    }

    pub(crate) fn write(&self, dataset: Dataset, contents: &str) -> io::Result<()> {
        std::fs::write(self.files().path(dataset), contents)
    }

    pub(crate) fn remove(&self, dataset: Dataset) -> io::Result<()> {
        std::fs::remove_file(self.files().path(dataset))
    }
}
