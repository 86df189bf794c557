//! Core business logic for Fiscast.
//!
//! This crate contains pure forecasting logic with ZERO web or database dependencies.
//! Data flows one way: historical rows are forecast, forecasts are classified
//! per department, and both are projected into reports and CSV exports.
//!
//! # Modules
//!
//! - `forecast` - Holt-Winters quarterly projections per line item
//! - `variance` - Department variance and review status
//! - `reports` - Six filterable report shapes
//! - `export` - CSV serialization with currency and percentage formatting
//! - `notifications` - Status-change events and an in-memory inbox
//! - `session` - Keyed forecast store tying the pipeline together

pub mod export;
pub mod forecast;
pub mod notifications;
pub mod reports;
pub mod session;
pub mod variance;
