//! Session error types.

use fiscast_shared::AppError;
use thiserror::Error;

use crate::export::ExportError;
use crate::forecast::ForecastError;
use crate::variance::VarianceError;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Forecasting failed; prior forecasts are kept.
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// Classification or override failed.
    #[error(transparent)]
    Variance(#[from] VarianceError),

    /// Export failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Forecast(e) => e.into(),
            SessionError::Variance(e) => e.into(),
            SessionError::Export(e) => e.into(),
        }
    }
}
