//! Variance error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Variance classification errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VarianceError {
    /// Override for a department absent from the current variance data.
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    /// Thresholds are negative or the approval band exceeds the review band.
    #[error("Invalid thresholds: approve {approve}% must be between 0 and review {review}%")]
    InvalidThresholds {
        /// Approval threshold.
        approve: Decimal,
        /// Review threshold.
        review: Decimal,
    },
}

impl From<VarianceError> for fiscast_shared::AppError {
    fn from(err: VarianceError) -> Self {
        match err {
            VarianceError::UnknownDepartment(_) => Self::NotFound(err.to_string()),
            VarianceError::InvalidThresholds { .. } => Self::Configuration(err.to_string()),
        }
    }
}
