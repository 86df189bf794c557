//! Report error types.

use thiserror::Error;

/// Errors raised while parsing report identifiers and filter values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// Report type id is not one of the six known ids.
    #[error("Unknown report type: {0}")]
    UnknownReportType(String),

    /// Quarter is not Q1 to Q4.
    #[error("Unknown quarter: {0}")]
    UnknownQuarter(String),

    /// Status is not Approved, For Review or Disapproved.
    #[error("Unknown status: {0}")]
    UnknownStatus(String),
}

impl From<ReportError> for fiscast_shared::AppError {
    fn from(err: ReportError) -> Self {
        Self::Validation(err.to_string())
    }
}
