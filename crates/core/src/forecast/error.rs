//! Forecast error types.

use thiserror::Error;

/// Errors that abort a single forecast call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForecastError {
    /// A smoothing factor or the seasonality period is out of domain.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A historical row breaks the normalized-row contract.
    #[error("Invalid row '{description}' ({year}): {reason}")]
    InvalidRow {
        /// Line item description.
        description: String,
        /// Fiscal year of the row.
        year: i32,
        /// Which check failed.
        reason: String,
    },

    /// Rows passed for one department belong to another.
    #[error("Row for department '{found}' passed while forecasting '{expected}'")]
    DepartmentMismatch {
        /// Department being forecast.
        expected: String,
        /// Department found on the row.
        found: String,
    },
}

impl From<ForecastError> for fiscast_shared::AppError {
    fn from(err: ForecastError) -> Self {
        Self::Validation(err.to_string())
    }
}
