//! The fixed catalog of climate parameters the dashboard works with.
//!
//! Every table column the crate reads or computes over is named by one of
//! these eight codes. The set is closed: anything else is rejected with
//! [`DashboardError::UnknownParameter`].

use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight monthly climate variables produced by the forecasting model.
///
/// The variants are listed in catalog order, which is also the order of
/// [`Parameter::ALL`]. Each variant maps to exactly one column code (as found in
/// the CSV headers) and one display label.
///
/// # Examples
///
/// ```
/// use meteoforecaster::Parameter;
///
/// let rain: Parameter = "RR".parse().unwrap();
/// assert_eq!(rain, Parameter::Rainfall);
/// assert_eq!(rain.label(), "Rainfall (RR)");
/// assert!("XX".parse::<Parameter>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Parameter {
    /// Monthly minimum temperature (°C).
    #[serde(rename = "TN")]
    MinTemperature,
    /// Monthly maximum temperature (°C).
    #[serde(rename = "TX")]
    MaxTemperature,
    /// Average relative humidity (%).
    #[serde(rename = "RH_AVG")]
    AvgRelativeHumidity,
    /// Rainfall total (mm).
    #[serde(rename = "RR")]
    Rainfall,
    /// Sunshine duration (hours).
    #[serde(rename = "SS")]
    SunshineDuration,
    /// Maximum wind speed (m/s).
    #[serde(rename = "FF_X")]
    MaxWindSpeed,
    /// Average wind speed (m/s).
    #[serde(rename = "FF_AVG")]
    AvgWindSpeed,
    /// Sine component of the direction of the maximum wind.
    #[serde(rename = "DDD_X_sin")]
    MaxWindDirectionSin,
}

impl Parameter {
    /// All parameters in catalog order.
    pub const ALL: [Parameter; 8] = [
        Parameter::MinTemperature,
        Parameter::MaxTemperature,
        Parameter::AvgRelativeHumidity,
        Parameter::Rainfall,
        Parameter::SunshineDuration,
        Parameter::MaxWindSpeed,
        Parameter::AvgWindSpeed,
        Parameter::MaxWindDirectionSin,
    ];

    /// The column code used in every date-indexed table and in the metrics index.
    pub fn code(self) -> &'static str {
        match self {
            Parameter::MinTemperature => "TN",
            Parameter::MaxTemperature => "TX",
            Parameter::AvgRelativeHumidity => "RH_AVG",
            Parameter::Rainfall => "RR",
            Parameter::SunshineDuration => "SS",
            Parameter::MaxWindSpeed => "FF_X",
            Parameter::AvgWindSpeed => "FF_AVG",
            Parameter::MaxWindDirectionSin => "DDD_X_sin",
        }
    }

    /// Human-readable label, suffixed with the code.
    pub fn label(self) -> &'static str {
        match self {
            Parameter::MinTemperature => "Minimum Temperature (TN)",
            Parameter::MaxTemperature => "Maximum Temperature (TX)",
            Parameter::AvgRelativeHumidity => "Average Relative Humidity (RH_AVG)",
            Parameter::Rainfall => "Rainfall (RR)",
            Parameter::SunshineDuration => "Sunshine Duration (SS)",
            Parameter::MaxWindSpeed => "Maximum Wind Speed (FF_X)",
            Parameter::AvgWindSpeed => "Average Wind Speed (FF_AVG)",
            Parameter::MaxWindDirectionSin => "Maximum Wind Direction Component (DDD_X_sin)",
        }
    }

    /// Resolves a column code to its parameter.
    ///
    /// Codes are matched exactly (case-sensitive), the same way the CSV headers are.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::UnknownParameter`] if `code` is not in the catalog.
    pub fn from_code(code: &str) -> Result<Self, DashboardError> {
        Parameter::ALL
            .into_iter()
            .find(|p| p.code() == code)
            .ok_or_else(|| DashboardError::UnknownParameter(code.to_string()))
    }
}

/// Looks up the display label for a raw column code.
///
/// # Errors
///
/// Returns [`DashboardError::UnknownParameter`] if `code` is not in the catalog.
pub fn label_for(code: &str) -> Result<&'static str, DashboardError> {
    Parameter::from_code(code).map(Parameter::label)
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Parameter {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parameter::from_code(s)
    }
}
