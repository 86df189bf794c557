//! Export error types.

use thiserror::Error;

use crate::reports::ReportType;

/// Errors raised while building a CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The report has no rows.
    #[error("No data to export for {}", .0.label())]
    EmptyReport(ReportType),

    /// The CSV writer rejected a record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The output buffer could not be flushed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not valid UTF-8.
    #[error("Invalid UTF-8 in export: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl From<ExportError> for fiscast_shared::AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::EmptyReport(_) => Self::EmptyReport(err.to_string()),
            ExportError::Csv(_) | ExportError::Io(_) | ExportError::Utf8(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}
