//! Report generation.
//!
//! Projects forecasts and variance rows into six fixed report shapes:
//! - Quarterly Variance
//! - Quarterly Forecast
//! - Annual Variance Summary
//! - Annual Forecast Summary
//! - Approved Consolidated Budget
//! - Approved per-Department Budget

pub mod error;
pub mod options;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use options::FilterOptions;
pub use service::ReportService;
pub use types::*;
