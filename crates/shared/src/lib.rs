//! Shared types, errors, and configuration for Fiscast.
//!
//! This crate provides common types used across all other crates:
//! - Money types with decimal precision
//! - Fiscal quarter identifiers
//! - Application-wide error types
//! - Configuration and deployment settings

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, Settings, SettingsProvider};
pub use error::{AppError, AppResult};
