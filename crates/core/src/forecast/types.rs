//! Forecast data types.

use fiscast_shared::config::ForecastConfig;
use fiscast_shared::types::Quarter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ForecastError;

/// Number of quarters projected for every line item.
pub const QUARTERS: usize = 4;

/// One budgeted line item for one fiscal year, as supplied by the upload
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRow {
    /// Free-text label.
    pub description: String,
    /// Optional justification text.
    #[serde(default)]
    pub justification: Option<String>,
    /// Classification tag.
    pub category: String,
    /// Owning department.
    pub department: String,
    /// Fiscal year.
    pub year: i32,
    /// First quarter actual.
    pub q1: Decimal,
    /// Second quarter actual.
    pub q2: Decimal,
    /// Third quarter actual.
    pub q3: Decimal,
    /// Fourth quarter actual.
    pub q4: Decimal,
    /// Sum of the four quarters.
    pub total: Decimal,
}

impl NormalizedRow {
    /// Builds a row and derives `total` from the quarters.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        category: impl Into<String>,
        department: impl Into<String>,
        year: i32,
        quarters: [Decimal; QUARTERS],
    ) -> Self {
        let [q1, q2, q3, q4] = quarters;
        Self {
            description: description.into(),
            justification: None,
            category: category.into(),
            department: department.into(),
            year,
            q1,
            q2,
            q3,
            q4,
            total: q1 + q2 + q3 + q4,
        }
    }

    /// Quarter actuals in fiscal order.
    #[must_use]
    pub const fn quarters(&self) -> [Decimal; QUARTERS] {
        [self.q1, self.q2, self.q3, self.q4]
    }

    /// Actual amount for one quarter.
    #[must_use]
    pub const fn quarter(&self, quarter: Quarter) -> Decimal {
        self.quarters()[quarter.index()]
    }

    /// Key identifying the same line item across fiscal years.
    #[must_use]
    pub fn line_item(&self) -> LineItemKey<'_> {
        LineItemKey {
            department: &self.department,
            category: &self.category,
            description: &self.description,
        }
    }

    /// Checks the normalized-row contract.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InvalidRow` for blank labels, negative
    /// quarters, or a `total` that differs from the quarter sum.
    pub fn validate(&self) -> Result<(), ForecastError> {
        let fail = |reason: &str| ForecastError::InvalidRow {
            description: self.description.clone(),
            year: self.year,
            reason: reason.to_string(),
        };

        if self.description.trim().is_empty() {
            return Err(fail("description is empty"));
        }
        if self.category.trim().is_empty() {
            return Err(fail("category is empty"));
        }
        if self.department.trim().is_empty() {
            return Err(fail("department is empty"));
        }
        if self.quarters().iter().any(Decimal::is_sign_negative) {
            return Err(fail("quarter amounts cannot be negative"));
        }
        let sum: Decimal = self.quarters().iter().copied().sum();
        if sum != self.total {
            return Err(fail(&format!("total {} does not equal quarter sum {sum}", self.total)));
        }
        Ok(())
    }
}

/// Identity of a line item: the same description and category within a
/// department, across years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineItemKey<'a> {
    /// Owning department.
    pub department: &'a str,
    /// Classification tag.
    pub category: &'a str,
    /// Free-text label.
    pub description: &'a str,
}

/// A historical row extended with its projection for the next period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRow {
    /// The historical row the projection was made from.
    #[serde(flatten)]
    pub row: NormalizedRow,
    /// Projected first quarter.
    pub forecasted_q1: Decimal,
    /// Projected second quarter.
    pub forecasted_q2: Decimal,
    /// Projected third quarter.
    pub forecasted_q3: Decimal,
    /// Projected fourth quarter.
    pub forecasted_q4: Decimal,
    /// Sum of the four projected quarters.
    pub forecasted_total: Decimal,
}

impl ForecastRow {
    /// Attaches projected quarters to a row; the total is their exact sum.
    #[must_use]
    pub fn new(row: NormalizedRow, forecast: [Decimal; QUARTERS]) -> Self {
        let [forecasted_q1, forecasted_q2, forecasted_q3, forecasted_q4] = forecast;
        Self {
            row,
            forecasted_q1,
            forecasted_q2,
            forecasted_q3,
            forecasted_q4,
            forecasted_total: forecasted_q1 + forecasted_q2 + forecasted_q3 + forecasted_q4,
        }
    }

    /// Owning department.
    #[must_use]
    pub fn department(&self) -> &str {
        &self.row.department
    }

    /// Classification tag.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.row.category
    }

    /// Fiscal year of the historical row.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.row.year
    }

    /// Projected quarters in fiscal order.
    #[must_use]
    pub const fn forecasted(&self) -> [Decimal; QUARTERS] {
        [
            self.forecasted_q1,
            self.forecasted_q2,
            self.forecasted_q3,
            self.forecasted_q4,
        ]
    }

    /// Projected amount for one quarter.
    #[must_use]
    pub const fn forecasted_quarter(&self, quarter: Quarter) -> Decimal {
        self.forecasted()[quarter.index()]
    }
}

/// Smoothing model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastParams {
    /// Quarters per season.
    pub seasonality_period: usize,
    /// Level smoothing factor.
    pub alpha: f64,
    /// Trend smoothing factor.
    pub beta: f64,
    /// Seasonal smoothing factor.
    pub gamma: f64,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self::from(&ForecastConfig::default())
    }
}

impl From<&ForecastConfig> for ForecastParams {
    fn from(config: &ForecastConfig) -> Self {
        Self {
            seasonality_period: config.seasonality_period,
            alpha: config.alpha,
            beta: config.beta,
            gamma: config.gamma,
        }
    }
}

impl ForecastParams {
    /// Validates every parameter.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InvalidParameter` for a smoothing factor
    /// outside `[0, 1]` or a seasonality period of zero.
    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.seasonality_period < 1 {
            return Err(ForecastError::InvalidParameter {
                name: "seasonality_period",
                reason: "must be at least 1".to_string(),
            });
        }
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ForecastError::InvalidParameter {
                    name,
                    reason: format!("{value} is outside [0, 1]"),
                });
            }
        }
        Ok(())
    }
}

/// Non-fatal condition raised while forecasting one line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForecastWarning {
    /// Fewer observations than one season; the projection is zero.
    InsufficientHistory {
        /// Line item description.
        line_item: String,
        /// Fiscal year of the affected row.
        year: i32,
        /// Observations needed.
        required: usize,
        /// Observations available.
        available: usize,
    },
    /// Every observation is zero; the projection is zero.
    NoActivity {
        /// Line item description.
        line_item: String,
        /// Fiscal year of the affected row.
        year: i32,
    },
}

impl std::fmt::Display for ForecastWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientHistory {
                line_item,
                year,
                required,
                available,
            } => write!(
                f,
                "Insufficient history for '{line_item}' ({year}): {available} of {required} quarters available, forecast set to zero"
            ),
            Self::NoActivity { line_item, year } => write!(
                f,
                "No spending recorded for '{line_item}' ({year}), forecast set to zero"
            ),
        }
    }
}

/// Department-level series for charting a forecast run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastSummary {
    /// Actual totals per quarter across all line items.
    pub actual_totals: [Decimal; QUARTERS],
    /// Forecast totals per quarter across all line items.
    pub forecast_totals: [Decimal; QUARTERS],
    /// Projected spend for the next quarter.
    pub next_quarter: Decimal,
    /// Year-over-year seasonal effect of the first line item (forecast Q1 - actual Q1).
    pub seasonal_effect: Decimal,
}

/// Result of forecasting one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastOutcome {
    /// One forecast per input row, in input order.
    pub rows: Vec<ForecastRow>,
    /// Degenerate line items.
    pub warnings: Vec<ForecastWarning>,
    /// Chart series.
    pub summary: ForecastSummary,
}
