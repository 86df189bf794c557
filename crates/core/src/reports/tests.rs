//! Scenario and property tests for report generation.

use fiscast_shared::types::Quarter;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::forecast::{ForecastRow, NormalizedRow};
use crate::variance::{
    Thresholds, VarianceAnalysisRow, VarianceBoard, VarianceClassifier, VarianceStatus,
};

fn forecast_row(
    department: &str,
    category: &str,
    description: &str,
    year: i32,
    actual: u32,
    forecast: u32,
) -> ForecastRow {
    let actual = [Decimal::from(actual); 4];
    let row = NormalizedRow::new(description, category, department, year, actual);
    ForecastRow::new(row, [Decimal::from(forecast); 4])
}

/// IT is disapproved (21.6%), HR and Finance are approved.
fn forecasts() -> Vec<ForecastRow> {
    vec![
        forecast_row("IT", "Infrastructure", "Cloud hosting", 2024, 25000, 30400),
        forecast_row("HR", "Personnel", "Training", 2024, 10000, 10250),
        forecast_row("HR", "Operations", "Recruitment", 2024, 2000, 2000),
        forecast_row("Finance", "Operations", "Audit", 2023, 4000, 4000),
        forecast_row("Finance", "Operations", "Audit", 2024, 5000, 5100),
    ]
}

fn variance_rows(forecasts: &[ForecastRow]) -> Vec<VarianceAnalysisRow> {
    VarianceClassifier::analyze(forecasts, &Thresholds::default())
}

fn generate(report_type: ReportType, filters: &ReportFilters) -> Report {
    let forecasts = forecasts();
    ReportService::generate(
        report_type,
        &forecasts,
        &variance_rows(&forecasts),
        filters,
        &Thresholds::default(),
    )
}

#[test]
fn test_quarterly_variance_department_and_quarter_filter() {
    let filters = ReportFilters::new()
        .with_department("IT")
        .with_quarter(Quarter::Q2);
    let Report::QuarterlyVariance(rows) = generate(ReportType::QuarterlyVariance, &filters) else {
        panic!("wrong report variant");
    };

    assert_eq!(
        rows,
        vec![QuarterlyVarianceRow {
            department: "IT".to_string(),
            quarter: Quarter::Q2,
            forecast: dec!(30400),
            actual: dec!(25000),
            variance: dec!(5400),
            percentage: dec!(21.6),
            status: VarianceStatus::Disapproved,
        }]
    );
}

#[test]
fn test_quarterly_variance_status_filter() {
    let filters = ReportFilters::new().with_status(VarianceStatus::Approved);
    let report = generate(ReportType::QuarterlyVariance, &filters);
    let Report::QuarterlyVariance(rows) = report else {
        panic!("wrong report variant");
    };

    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|r| r.department != "IT"));
    assert_eq!(rows[0].department, "HR");
    assert_eq!(rows[0].quarter, Quarter::Q1);
}

#[test]
fn test_quarterly_forecast_department_filter() {
    let filters = ReportFilters::new().with_department("IT");
    let Report::QuarterlyForecast(rows) = generate(ReportType::QuarterlyForecast, &filters) else {
        panic!("wrong report variant");
    };

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].department, "IT");
    assert_eq!(rows[0].description, "IT Department Forecast");
    assert_eq!(rows[0].total, dec!(121600));
}

#[test]
fn test_quarterly_forecast_encounter_order() {
    let Report::QuarterlyForecast(rows) =
        generate(ReportType::QuarterlyForecast, &ReportFilters::new())
    else {
        panic!("wrong report variant");
    };

    let departments: Vec<_> = rows.iter().map(|r| r.department.as_str()).collect();
    assert_eq!(departments, vec!["IT", "HR", "Finance"]);
    assert_eq!(rows[1].quarters, [dec!(12250); 4]);
}

#[test]
fn test_annual_variance_summary_status_filter() {
    let filters = ReportFilters::new().with_status(VarianceStatus::Approved);
    let Report::AnnualVarianceSummary(rows) =
        generate(ReportType::AnnualVarianceSummary, &filters)
    else {
        panic!("wrong report variant");
    };

    let departments: Vec<_> = rows.iter().map(|r| r.department.as_str()).collect();
    assert_eq!(departments, vec!["HR", "Finance"]);
    assert!(rows.iter().all(|r| r.status == VarianceStatus::Approved));
}

#[test]
fn test_annual_forecast_summary_defaults_to_latest_year() {
    let Report::AnnualForecastSummary(rows) =
        generate(ReportType::AnnualForecastSummary, &ReportFilters::new())
    else {
        panic!("wrong report variant");
    };

    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.year == 2024));
    assert_eq!(rows[2].department, "Finance");
    assert_eq!(rows[2].total, dec!(20400));
}

#[test]
fn test_annual_forecast_summary_omits_empty_departments() {
    let filters = ReportFilters::new().with_year(2023);
    let Report::AnnualForecastSummary(rows) =
        generate(ReportType::AnnualForecastSummary, &filters)
    else {
        panic!("wrong report variant");
    };

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].department, "Finance");
    assert_eq!(rows[0].total, dec!(16000));
}

#[test]
fn test_approved_consolidated_sorted_by_category_then_department() {
    let filters = ReportFilters::new();
    let Report::ApprovedConsolidatedBudget(rows) =
        generate(ReportType::ApprovedConsolidatedBudget, &filters)
    else {
        panic!("wrong report variant");
    };

    let keys: Vec<_> = rows
        .iter()
        .map(|r| (r.category.as_str(), r.department.as_str(), r.total))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("Operations", "Finance", dec!(36400)),
            ("Operations", "HR", dec!(8000)),
            ("Personnel", "HR", dec!(41000)),
        ]
    );
}

#[test]
fn test_approved_per_department_sorted_by_department_then_category() {
    let Report::ApprovedPerDeptBudget(rows) =
        generate(ReportType::ApprovedPerDeptBudget, &ReportFilters::new())
    else {
        panic!("wrong report variant");
    };

    let keys: Vec<_> = rows
        .iter()
        .map(|r| (r.department.as_str(), r.category.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("Finance", "Operations"),
            ("HR", "Operations"),
            ("HR", "Personnel"),
        ]
    );
}

#[test]
fn test_approved_reports_follow_overrides() {
    let forecasts = forecasts();
    let mut board = VarianceBoard::new();
    board.recompute(&forecasts, &Thresholds::default());
    for (department, status) in [
        ("HR", VarianceStatus::Disapproved),
        ("IT", VarianceStatus::Approved),
    ] {
        board.override_status(department, status).unwrap();
    }

    let filters = ReportFilters::new();
    let rows = ReportService::approved_consolidated(&forecasts, board.rows(), &filters);

    let departments: Vec<_> = rows.iter().map(|r| r.department.as_str()).collect();
    assert_eq!(departments, vec!["IT", "Finance"]);
}

#[test]
fn test_no_forecasts_is_empty_not_error() {
    for report_type in ReportType::ALL {
        let report = ReportService::generate(
            report_type,
            &[],
            &[],
            &ReportFilters::new(),
            &Thresholds::default(),
        );
        assert!(report.is_empty());
        assert_eq!(report.report_type(), report_type);
    }
}

#[test]
fn test_report_type_catalogue() {
    for report_type in ReportType::ALL {
        assert_eq!(ReportType::parse(report_type.as_str()), Some(report_type));
        assert!(!report_type.headers().is_empty());
    }
    assert_eq!(
        "approved_per_dept_budget".parse::<ReportType>(),
        Ok(ReportType::ApprovedPerDeptBudget)
    );
    assert_eq!(
        "balance_sheet".parse::<ReportType>(),
        Err(ReportError::UnknownReportType("balance_sheet".to_string()))
    );
    assert_eq!(
        ReportType::ApprovedPerDeptBudget.base_name(),
        "Approved_Per_Department_Budget"
    );
}

#[test]
fn test_filter_options() {
    let forecasts = forecasts();
    assert_eq!(
        FilterOptions::departments(&forecasts),
        vec!["Finance", "HR", "IT"]
    );
    assert_eq!(FilterOptions::years(&forecasts), vec![2024, 2023]);
    assert_eq!(FilterOptions::quarters().len(), 4);
    assert_eq!(FilterOptions::statuses().len(), 3);
}

const DEPARTMENTS: [&str; 4] = ["IT", "HR", "Finance", "Legal"];

fn arb_forecasts() -> impl Strategy<Value = Vec<ForecastRow>> {
    let item = (0usize..4, 0u32..50_000, 0u32..50_000, 2022i32..2025);
    prop::collection::vec(item, 0..24).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (dept, actual, forecast, year))| {
                let name = format!("Item {i}");
                forecast_row(DEPARTMENTS[dept], "General", &name, year, actual, forecast)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_department_filter_keeps_only_that_department(
        forecasts in arb_forecasts(),
        dept in 0usize..4,
    ) {
        let variance = variance_rows(&forecasts);
        let filters = ReportFilters::new().with_department(DEPARTMENTS[dept]);

        for report_type in ReportType::ALL {
            let report = ReportService::generate(
                report_type, &forecasts, &variance, &filters, &Thresholds::default(),
            );
            let departments: Vec<&str> = match &report {
                Report::QuarterlyVariance(rows) => {
                    rows.iter().map(|r| r.department.as_str()).collect()
                }
                Report::QuarterlyForecast(rows) => {
                    rows.iter().map(|r| r.department.as_str()).collect()
                }
                Report::AnnualVarianceSummary(rows) => {
                    rows.iter().map(|r| r.department.as_str()).collect()
                }
                Report::AnnualForecastSummary(rows) => {
                    rows.iter().map(|r| r.department.as_str()).collect()
                }
                Report::ApprovedConsolidatedBudget(rows) | Report::ApprovedPerDeptBudget(rows) => {
                    rows.iter().map(|r| r.department.as_str()).collect()
                }
            };
            prop_assert!(departments.iter().all(|d| *d == DEPARTMENTS[dept]));
        }
    }

    #[test]
    fn prop_status_filter_matches_exactly(forecasts in arb_forecasts(), status in 0usize..3) {
        let variance = variance_rows(&forecasts);
        let wanted = VarianceStatus::ALL[status];
        let filters = ReportFilters::new().with_status(wanted);

        let rows = ReportService::annual_variance_summary(&variance, &filters);
        let expected = variance.iter().filter(|r| r.status() == wanted).count();

        prop_assert_eq!(rows.len(), expected);
        prop_assert!(rows.iter().all(|r| r.status == wanted));
    }

    #[test]
    fn prop_approved_reports_only_contain_approved_departments(forecasts in arb_forecasts()) {
        let variance = variance_rows(&forecasts);
        let filters = ReportFilters::new();
        let rows = ReportService::approved_per_department(&forecasts, &variance, &filters);

        for row in &rows {
            let status = variance
                .iter()
                .find(|v| v.department == row.department)
                .map(VarianceAnalysisRow::status);
            prop_assert_eq!(status, Some(VarianceStatus::Approved));
            let sum: Decimal = row.quarters.iter().copied().sum();
            prop_assert_eq!(row.total, sum);
        }
        let keys: Vec<_> = rows.iter().map(|r| (&r.department, &r.category)).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_filter_value_parsing() {
    assert_eq!(ReportFilters::parse_quarter("q3"), Ok(Quarter::Q3));
    assert_eq!(
        ReportFilters::parse_quarter("Q5"),
        Err(ReportError::UnknownQuarter("Q5".to_string()))
    );
    assert_eq!(
        ReportFilters::parse_status("For Review"),
        Ok(VarianceStatus::ForReview)
    );
    assert!(ReportFilters::parse_status("Rejected").is_err());
}
