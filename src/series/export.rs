use crate::datasets::tables::Datasets;
use crate::error::DashboardError;
use crate::types::dataset::{Dataset, DATE_COLUMN};
use crate::types::parameter::Parameter;
use polars::prelude::*;
use std::io::Write;

/// The full forecast of one parameter, ready to be offered as a download.
///
/// The frame has two columns: `date` and the parameter code.
#[derive(Debug, Clone)]
pub struct ForecastExport {
    pub parameter: Parameter,
    pub frame: DataFrame,
}

impl ForecastExport {
    /// Suggested download name, e.g. `forecast_TN.csv`.
    pub fn file_name(&self) -> String {
        format!("forecast_{}.csv", self.parameter.code())
    }

    /// Writes the frame as CSV with a header row and ISO dates.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), DashboardError> {
        let mut frame = self.frame.clone();
        CsvWriter::new(writer)
            .include_header(true)
            .finish(&mut frame)?;
        Ok(())
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, DashboardError> {
        let mut bytes = Vec::new();
        self.write_csv(&mut bytes)?;
        Ok(bytes)
    }
}

/// Extracts the forecast column of `parameter` for export.
///
/// # Errors
///
/// Returns [`DashboardError::MissingParameter`] if the forecast table has no
/// column for `parameter`.
pub fn forecast_export(
    data: &Datasets,
    parameter: Parameter,
) -> Result<ForecastExport, DashboardError> {
    let forecast = data.require_parameter(Dataset::Forecast, parameter)?;
    let frame = forecast.select([DATE_COLUMN, parameter.code()])?;
    Ok(ForecastExport { parameter, frame })
}
