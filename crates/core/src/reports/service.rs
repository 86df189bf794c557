//! Report generation service.

use std::collections::{BTreeMap, HashSet};

use fiscast_shared::types::Quarter;
use rust_decimal::Decimal;

use super::types::{
    AnnualForecastRow, AnnualVarianceRow, ApprovedBudgetRow, QuarterlyForecastRow,
    QuarterlyVarianceRow, Report, ReportFilters, ReportType,
};
use crate::forecast::{ForecastRow, QUARTERS};
use crate::variance::{Thresholds, VarianceAnalysisRow, VarianceClassifier, VarianceStatus};

/// Per-department quarter sums, in order of first appearance.
struct DepartmentTotals<'a> {
    department: &'a str,
    forecast: [Decimal; QUARTERS],
    actual: [Decimal; QUARTERS],
}

/// Service for projecting forecasts and variance rows into reports.
pub struct ReportService;

impl ReportService {
    /// Generates a report of the given type.
    ///
    /// An empty report is a valid result and signals that nothing matched.
    #[must_use]
    pub fn generate(
        report_type: ReportType,
        forecasts: &[ForecastRow],
        variance_rows: &[VarianceAnalysisRow],
        filters: &ReportFilters,
        thresholds: &Thresholds,
    ) -> Report {
        match report_type {
            ReportType::QuarterlyVariance => {
                Report::QuarterlyVariance(Self::quarterly_variance(forecasts, filters, thresholds))
            }
            ReportType::QuarterlyForecast => {
                Report::QuarterlyForecast(Self::quarterly_forecast(forecasts, filters))
            }
            ReportType::AnnualVarianceSummary => {
                Report::AnnualVarianceSummary(Self::annual_variance_summary(variance_rows, filters))
            }
            ReportType::AnnualForecastSummary => {
                Report::AnnualForecastSummary(Self::annual_forecast_summary(forecasts, filters))
            }
            ReportType::ApprovedConsolidatedBudget => Report::ApprovedConsolidatedBudget(
                Self::approved_consolidated(forecasts, variance_rows, filters),
            ),
            ReportType::ApprovedPerDeptBudget => Report::ApprovedPerDeptBudget(
                Self::approved_per_department(forecasts, variance_rows, filters),
            ),
        }
    }

    /// Forecast against actual per department and quarter.
    ///
    /// Each quarter is classified with the same percentage rule and
    /// thresholds as the department-level variance.
    #[must_use]
    pub fn quarterly_variance(
        forecasts: &[ForecastRow],
        filters: &ReportFilters,
        thresholds: &Thresholds,
    ) -> Vec<QuarterlyVarianceRow> {
        let mut rows = Vec::new();

        for totals in Self::department_totals(forecasts, filters) {
            for quarter in Quarter::ALL {
                if !filters.allows_quarter(quarter) {
                    continue;
                }
                let forecast = totals.forecast[quarter.index()];
                let actual = totals.actual[quarter.index()];
                let variance = forecast - actual;
                let percentage = VarianceClassifier::percentage(variance, actual);
                let status = VarianceClassifier::classify(percentage, thresholds);

                if !filters.allows_status(status) {
                    continue;
                }
                rows.push(QuarterlyVarianceRow {
                    department: totals.department.to_string(),
                    quarter,
                    forecast,
                    actual,
                    variance,
                    percentage,
                    status,
                });
            }
        }

        rows
    }

    /// Forecast quarters summed per department.
    #[must_use]
    pub fn quarterly_forecast(
        forecasts: &[ForecastRow],
        filters: &ReportFilters,
    ) -> Vec<QuarterlyForecastRow> {
        Self::department_totals(forecasts, filters)
            .into_iter()
            .map(|totals| QuarterlyForecastRow {
                department: totals.department.to_string(),
                description: format!("{} Department Forecast", totals.department),
                quarters: totals.forecast,
                total: totals.forecast.iter().copied().sum(),
            })
            .collect()
    }

    /// Department variance rows with their effective status.
    #[must_use]
    pub fn annual_variance_summary(
        variance_rows: &[VarianceAnalysisRow],
        filters: &ReportFilters,
    ) -> Vec<AnnualVarianceRow> {
        variance_rows
            .iter()
            .filter(|row| filters.allows_department(&row.department))
            .filter(|row| filters.allows_status(row.status()))
            .map(|row| AnnualVarianceRow {
                department: row.department.clone(),
                total_forecast: row.forecast,
                total_actual: row.proposal,
                variance: row.variance,
                percentage: row.percentage,
                status: row.status(),
            })
            .collect()
    }

    /// Forecast quarters per department for one year.
    ///
    /// Uses the filter year, or the latest year present. Departments whose
    /// total for that year is zero are left out.
    #[must_use]
    pub fn annual_forecast_summary(
        forecasts: &[ForecastRow],
        filters: &ReportFilters,
    ) -> Vec<AnnualForecastRow> {
        let latest = || forecasts.iter().map(ForecastRow::year).max();
        let Some(year) = filters.year.or_else(latest) else {
            return Vec::new();
        };
        let scope = ReportFilters {
            year: Some(year),
            ..filters.clone()
        };

        Self::department_totals(forecasts, &scope)
            .into_iter()
            .filter_map(|totals| {
                let total: Decimal = totals.forecast.iter().copied().sum();
                (total > Decimal::ZERO).then(|| AnnualForecastRow {
                    department: totals.department.to_string(),
                    year,
                    quarters: totals.forecast,
                    total,
                })
            })
            .collect()
    }

    /// Forecasts of approved departments, summed per category and
    /// department and sorted by category then department.
    #[must_use]
    pub fn approved_consolidated(
        forecasts: &[ForecastRow],
        variance_rows: &[VarianceAnalysisRow],
        filters: &ReportFilters,
    ) -> Vec<ApprovedBudgetRow> {
        Self::approved_totals(forecasts, variance_rows, filters, |row| {
            (row.category().to_string(), row.department().to_string())
        })
        .into_iter()
        .map(|((category, department), quarters)| Self::budget_row(category, department, quarters))
        .collect()
    }

    /// Forecasts of approved departments, summed per department and
    /// category and sorted by department then category.
    #[must_use]
    pub fn approved_per_department(
        forecasts: &[ForecastRow],
        variance_rows: &[VarianceAnalysisRow],
        filters: &ReportFilters,
    ) -> Vec<ApprovedBudgetRow> {
        Self::approved_totals(forecasts, variance_rows, filters, |row| {
            (row.department().to_string(), row.category().to_string())
        })
        .into_iter()
        .map(|((department, category), quarters)| Self::budget_row(category, department, quarters))
        .collect()
    }

    fn budget_row(
        category: String,
        department: String,
        quarters: [Decimal; QUARTERS],
    ) -> ApprovedBudgetRow {
        ApprovedBudgetRow {
            category,
            department,
            total: quarters.iter().copied().sum(),
            quarters,
        }
    }

    fn approved_totals<F>(
        forecasts: &[ForecastRow],
        variance_rows: &[VarianceAnalysisRow],
        filters: &ReportFilters,
        key: F,
    ) -> BTreeMap<(String, String), [Decimal; QUARTERS]>
    where
        F: Fn(&ForecastRow) -> (String, String),
    {
        let approved: HashSet<&str> = variance_rows
            .iter()
            .filter(|row| row.status() == VarianceStatus::Approved)
            .map(|row| row.department.as_str())
            .collect();

        let mut totals: BTreeMap<(String, String), [Decimal; QUARTERS]> = BTreeMap::new();
        for row in forecasts {
            if !approved.contains(row.department())
                || !filters.allows_department(row.department())
                || !filters.allows_year(row.year())
            {
                continue;
            }
            let sums = totals.entry(key(row)).or_insert([Decimal::ZERO; QUARTERS]);
            for (sum, amount) in sums.iter_mut().zip(row.forecasted()) {
                *sum += amount;
            }
        }
        totals
    }

    fn department_totals<'a>(
        forecasts: &'a [ForecastRow],
        filters: &ReportFilters,
    ) -> Vec<DepartmentTotals<'a>> {
        let mut groups: Vec<DepartmentTotals<'a>> = Vec::new();

        for row in forecasts {
            if !filters.allows_department(row.department()) || !filters.allows_year(row.year()) {
                continue;
            }
            let index = match groups.iter().position(|g| g.department == row.department()) {
                Some(index) => index,
                None => {
                    groups.push(DepartmentTotals {
                        department: row.department(),
                        forecast: [Decimal::ZERO; QUARTERS],
                        actual: [Decimal::ZERO; QUARTERS],
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[index];
            for (i, amount) in row.forecasted().into_iter().enumerate() {
                group.forecast[i] += amount;
            }
            for (i, amount) in row.row.quarters().into_iter().enumerate() {
                group.actual[i] += amount;
            }
        }

        groups
    }
}
