//! Report data types.

use fiscast_shared::types::Quarter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ReportError;
use crate::variance::VarianceStatus;

/// The six report shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// Forecast against actual per department and quarter.
    QuarterlyVariance,
    /// Forecast quarters per department.
    QuarterlyForecast,
    /// Department variance rows as classified.
    AnnualVarianceSummary,
    /// Forecast quarters per department for one year.
    AnnualForecastSummary,
    /// Approved forecasts per category and department.
    ApprovedConsolidatedBudget,
    /// Approved forecasts per department and category.
    #[serde(rename = "approved_per_dept_budget")]
    ApprovedPerDeptBudget,
}

impl ReportType {
    /// All report types in catalogue order.
    pub const ALL: [Self; 6] = [
        Self::QuarterlyVariance,
        Self::QuarterlyForecast,
        Self::AnnualVarianceSummary,
        Self::AnnualForecastSummary,
        Self::ApprovedConsolidatedBudget,
        Self::ApprovedPerDeptBudget,
    ];

    /// Stable identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QuarterlyVariance => "quarterly_variance",
            Self::QuarterlyForecast => "quarterly_forecast",
            Self::AnnualVarianceSummary => "annual_variance_summary",
            Self::AnnualForecastSummary => "annual_forecast_summary",
            Self::ApprovedConsolidatedBudget => "approved_consolidated_budget",
            Self::ApprovedPerDeptBudget => "approved_per_dept_budget",
        }
    }

    /// Parses a stable identifier.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s.trim())
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::QuarterlyVariance => "Quarterly Variance per Department",
            Self::QuarterlyForecast => "Quarterly Forecasted per Department",
            Self::AnnualVarianceSummary => "Annual Variance Summary",
            Self::AnnualForecastSummary => "Annual Forecast Summary",
            Self::ApprovedConsolidatedBudget => "Approved Annual Consolidated Budget",
            Self::ApprovedPerDeptBudget => "Approved per Department Budget",
        }
    }

    /// One-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::QuarterlyVariance => {
                "Shows variance between forecasted and actual spending by quarter and department"
            }
            Self::QuarterlyForecast => {
                "Displays forecasted spending amounts for each quarter by department"
            }
            Self::AnnualVarianceSummary => {
                "Annual variance totals and approval status by department"
            }
            Self::AnnualForecastSummary => "Annual forecasted spending totals by department",
            Self::ApprovedConsolidatedBudget => {
                "Consolidated budget for all approved departments by category"
            }
            Self::ApprovedPerDeptBudget => {
                "Approved budgets broken down by department and category"
            }
        }
    }

    /// File name stem for CSV exports.
    #[must_use]
    pub const fn base_name(self) -> &'static str {
        match self {
            Self::QuarterlyVariance => "Quarterly_Variance",
            Self::QuarterlyForecast => "Quarterly_Forecast",
            Self::AnnualVarianceSummary => "Annual_Variance_Summary",
            Self::AnnualForecastSummary => "Annual_Forecast_Summary",
            Self::ApprovedConsolidatedBudget => "Approved_Consolidated_Budget",
            Self::ApprovedPerDeptBudget => "Approved_Per_Department_Budget",
        }
    }

    /// CSV header row.
    #[must_use]
    pub const fn headers(self) -> &'static [&'static str] {
        match self {
            Self::QuarterlyVariance => &[
                "Department",
                "Quarter",
                "Forecast",
                "Actual",
                "Variance",
                "Variance %",
                "Status",
            ],
            Self::QuarterlyForecast => {
                &["Department", "Description", "Q1", "Q2", "Q3", "Q4", "Total"]
            }
            Self::AnnualVarianceSummary => &[
                "Department",
                "Total Forecast",
                "Total Actual",
                "Variance",
                "Variance %",
                "Status",
            ],
            Self::AnnualForecastSummary => &["Department", "Year", "Q1", "Q2", "Q3", "Q4", "Total"],
            Self::ApprovedConsolidatedBudget => {
                &["Category", "Department", "Q1", "Q2", "Q3", "Q4", "Total"]
            }
            Self::ApprovedPerDeptBudget => {
                &["Department", "Category", "Q1", "Q2", "Q3", "Q4", "Total"]
            }
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ReportError::UnknownReportType(s.to_string()))
    }
}

/// Optional restrictions on a report. `None` leaves a dimension open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilters {
    /// Only this department.
    pub department: Option<String>,
    /// Only this quarter (quarterly variance).
    pub quarter: Option<Quarter>,
    /// Only this fiscal year.
    pub year: Option<i32>,
    /// Only rows with this status (reports that carry a status).
    pub status: Option<VarianceStatus>,
}

impl ReportFilters {
    /// No restrictions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Restricts to one quarter.
    #[must_use]
    pub const fn with_quarter(mut self, quarter: Quarter) -> Self {
        self.quarter = Some(quarter);
        self
    }

    /// Restricts to one fiscal year.
    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn with_status(mut self, status: VarianceStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Parses a quarter filter value.
    pub fn parse_quarter(s: &str) -> Result<Quarter, ReportError> {
        Quarter::parse(s).ok_or_else(|| ReportError::UnknownQuarter(s.to_string()))
    }

    /// Parses a status filter value.
    pub fn parse_status(s: &str) -> Result<VarianceStatus, ReportError> {
        VarianceStatus::parse(s).ok_or_else(|| ReportError::UnknownStatus(s.to_string()))
    }

    pub(crate) fn allows_department(&self, department: &str) -> bool {
        self.department.as_deref().is_none_or(|d| d == department)
    }

    pub(crate) fn allows_year(&self, year: i32) -> bool {
        self.year.is_none_or(|y| y == year)
    }

    pub(crate) fn allows_quarter(&self, quarter: Quarter) -> bool {
        self.quarter.is_none_or(|q| q == quarter)
    }

    pub(crate) fn allows_status(&self, status: VarianceStatus) -> bool {
        self.status.is_none_or(|s| s == status)
    }
}

/// Quarterly variance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlyVarianceRow {
    /// Department.
    pub department: String,
    /// Quarter.
    pub quarter: Quarter,
    /// Summed forecast for the quarter.
    pub forecast: Decimal,
    /// Summed actual for the quarter.
    pub actual: Decimal,
    /// `forecast - actual`.
    pub variance: Decimal,
    /// Variance as a percentage of the actual.
    pub percentage: Decimal,
    /// Threshold status for the quarter.
    pub status: VarianceStatus,
}

/// Quarterly forecast row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlyForecastRow {
    /// Department.
    pub department: String,
    /// `"<department> Department Forecast"`.
    pub description: String,
    /// Summed forecast quarters.
    pub quarters: [Decimal; 4],
    /// Sum of the quarters.
    pub total: Decimal,
}

/// Annual variance summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualVarianceRow {
    /// Department.
    pub department: String,
    /// Total forecast.
    pub total_forecast: Decimal,
    /// Total actual.
    pub total_actual: Decimal,
    /// `total_forecast - total_actual`.
    pub variance: Decimal,
    /// Variance percentage.
    pub percentage: Decimal,
    /// Effective status, overrides included.
    pub status: VarianceStatus,
}

/// Annual forecast summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualForecastRow {
    /// Department.
    pub department: String,
    /// Fiscal year.
    pub year: i32,
    /// Summed forecast quarters.
    pub quarters: [Decimal; 4],
    /// Sum of the quarters.
    pub total: Decimal,
}

/// Approved budget row, keyed by category and department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedBudgetRow {
    /// Category.
    pub category: String,
    /// Department.
    pub department: String,
    /// Summed forecast quarters.
    pub quarters: [Decimal; 4],
    /// Sum of the quarters.
    pub total: Decimal,
}

/// A generated report: one variant per report type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "report_type", content = "rows", rename_all = "snake_case")]
pub enum Report {
    /// Quarterly variance.
    QuarterlyVariance(Vec<QuarterlyVarianceRow>),
    /// Quarterly forecast.
    QuarterlyForecast(Vec<QuarterlyForecastRow>),
    /// Annual variance summary.
    AnnualVarianceSummary(Vec<AnnualVarianceRow>),
    /// Annual forecast summary.
    AnnualForecastSummary(Vec<AnnualForecastRow>),
    /// Approved consolidated budget, sorted by category then department.
    ApprovedConsolidatedBudget(Vec<ApprovedBudgetRow>),
    /// Approved per-department budget, sorted by department then category.
    #[serde(rename = "approved_per_dept_budget")]
    ApprovedPerDeptBudget(Vec<ApprovedBudgetRow>),
}

impl Report {
    /// Report type of this variant.
    #[must_use]
    pub const fn report_type(&self) -> ReportType {
        match self {
            Self::QuarterlyVariance(_) => ReportType::QuarterlyVariance,
            Self::QuarterlyForecast(_) => ReportType::QuarterlyForecast,
            Self::AnnualVarianceSummary(_) => ReportType::AnnualVarianceSummary,
            Self::AnnualForecastSummary(_) => ReportType::AnnualForecastSummary,
            Self::ApprovedConsolidatedBudget(_) => ReportType::ApprovedConsolidatedBudget,
            Self::ApprovedPerDeptBudget(_) => ReportType::ApprovedPerDeptBudget,
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::QuarterlyVariance(rows) => rows.len(),
            Self::QuarterlyForecast(rows) => rows.len(),
            Self::AnnualVarianceSummary(rows) => rows.len(),
            Self::AnnualForecastSummary(rows) => rows.len(),
            Self::ApprovedConsolidatedBudget(rows) | Self::ApprovedPerDeptBudget(rows) => {
                rows.len()
            }
        }
    }

    /// Returns true if the report has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
