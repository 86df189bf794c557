//! Application configuration management.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::types::Currency;

/// Review threshold used when no deployment setting is available.
pub const DEFAULT_REVIEW_THRESHOLD: Decimal = dec!(15.0);

/// Approval threshold used when no deployment setting is available.
pub const DEFAULT_APPROVE_THRESHOLD: Decimal = dec!(5.0);

/// Inflation rate shown in export preambles when settings cannot be read.
pub const FALLBACK_INFLATION_RATE: Decimal = dec!(3.5);

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Forecast model defaults.
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Variance classification thresholds.
    #[serde(default)]
    pub variance: VarianceConfig,
    /// CSV export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Default smoothing parameters for the forecast model.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    /// Quarters per season.
    #[serde(default = "default_seasonality_period")]
    pub seasonality_period: usize,
    /// Level smoothing factor.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Trend smoothing factor.
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Seasonal smoothing factor.
    #[serde(default = "default_gamma")]
    pub gamma: f64,
}

fn default_seasonality_period() -> usize {
    4
}

fn default_alpha() -> f64 {
    0.5
}

fn default_beta() -> f64 {
    0.3
}

fn default_gamma() -> f64 {
    0.2
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            seasonality_period: default_seasonality_period(),
            alpha: default_alpha(),
            beta: default_beta(),
            gamma: default_gamma(),
        }
    }
}

/// Percentage thresholds for variance status.
#[derive(Debug, Clone, Deserialize)]
pub struct VarianceConfig {
    /// Deviations at or below this percentage are approved.
    #[serde(default = "default_approve_threshold")]
    pub approve_threshold: Decimal,
    /// Deviations at or below this percentage go to review.
    #[serde(default = "default_review_threshold")]
    pub review_threshold: Decimal,
}

fn default_approve_threshold() -> Decimal {
    DEFAULT_APPROVE_THRESHOLD
}

fn default_review_threshold() -> Decimal {
    DEFAULT_REVIEW_THRESHOLD
}

impl Default for VarianceConfig {
    fn default() -> Self {
        Self {
            approve_threshold: default_approve_threshold(),
            review_threshold: default_review_threshold(),
        }
    }
}

/// CSV export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Declared inflation rate written into the CSV preamble.
    #[serde(default)]
    pub inflation_rate: Option<Decimal>,
    /// Currency used to render amounts.
    #[serde(default)]
    pub currency: Currency,
    /// Directory CSV files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            inflation_rate: None,
            currency: Currency::default(),
            output_dir: default_output_dir(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mode_file = format!("config/{run_mode}");

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&mode_file).required(false))
            .add_source(
                config::Environment::with_prefix("FISCAST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

/// Deployment settings consumed by variance classification and export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Approval threshold in percent.
    pub approve_percentage: Decimal,
    /// Review threshold in percent.
    pub variance_percentage: Decimal,
    /// Declared inflation rate, if any.
    pub inflation_rate: Option<Decimal>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            approve_percentage: DEFAULT_APPROVE_THRESHOLD,
            variance_percentage: DEFAULT_REVIEW_THRESHOLD,
            inflation_rate: Some(FALLBACK_INFLATION_RATE),
        }
    }
}

/// Source of the current deployment settings.
///
/// Implementations are queried on every classification pass, so a changed
/// threshold takes effect on the next recomputation.
pub trait SettingsProvider {
    /// Returns the settings in effect right now.
    fn settings(&self) -> Settings;
}

impl SettingsProvider for AppConfig {
    fn settings(&self) -> Settings {
        Settings {
            approve_percentage: self.variance.approve_threshold,
            variance_percentage: self.variance.review_threshold,
            inflation_rate: self.export.inflation_rate,
        }
    }
}

impl SettingsProvider for Settings {
    fn settings(&self) -> Settings {
        self.clone()
    }
}
