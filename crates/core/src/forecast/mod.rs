//! Quarterly budget forecasting.
//!
//! Projects the next occurrence of each quarter for every historical line
//! item using additive triple exponential smoothing.

pub mod engine;
pub mod error;
pub mod types;


pub use engine::{ForecastEngine, SeriesProjection};
pub use error::ForecastError;
pub use types::{
    ForecastOutcome, ForecastParams, ForecastRow, ForecastSummary, ForecastWarning, LineItemKey,
    NormalizedRow, QUARTERS,
};
