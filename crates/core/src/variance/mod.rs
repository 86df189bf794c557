//! Variance classification.
//!
//! Aggregates forecasts per department, compares them against the
//! historical actual and assigns a review status from percentage
//! thresholds.

mod board;
mod error;
mod service;
mod types;


pub use board::VarianceBoard;
pub use error::VarianceError;
pub use service::VarianceClassifier;
pub use types::{StatusAssignment, StatusChange, Thresholds, VarianceAnalysisRow, VarianceStatus};
