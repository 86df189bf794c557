//! Department-level variance classification.

use rust_decimal::Decimal;

use super::types::{StatusAssignment, Thresholds, VarianceAnalysisRow, VarianceStatus};
use crate::forecast::ForecastRow;

/// Variance classifier.
pub struct VarianceClassifier;

impl VarianceClassifier {
    /// Variance as a percentage of the proposal, rounded to one decimal place
    /// with midpoints going toward positive infinity (`-6.25` becomes `-6.2`).
    ///
    /// Returns zero when the proposal is zero.
    #[must_use]
    pub fn percentage(variance: Decimal, proposal: Decimal) -> Decimal {
        if proposal.is_zero() {
            return Decimal::ZERO;
        }
        let tenths = (variance / proposal * Decimal::ONE_THOUSAND + Decimal::new(5, 1)).floor();
        let mut rounded = tenths / Decimal::TEN;
        rounded.rescale(1);
        rounded
    }

    /// Status for a percentage, judged on its magnitude.
    #[must_use]
    pub fn classify(percentage: Decimal, thresholds: &Thresholds) -> VarianceStatus {
        let magnitude = percentage.abs();
        if magnitude <= thresholds.approve {
            VarianceStatus::Approved
        } else if magnitude <= thresholds.review {
            VarianceStatus::ForReview
        } else {
            VarianceStatus::Disapproved
        }
    }

    /// Builds one row from department totals.
    #[must_use]
    pub fn row(
        department: impl Into<String>,
        forecast: Decimal,
        proposal: Decimal,
        thresholds: &Thresholds,
    ) -> VarianceAnalysisRow {
        let variance = forecast - proposal;
        let percentage = Self::percentage(variance, proposal);
        VarianceAnalysisRow {
            department: department.into(),
            forecast,
            proposal,
            variance,
            percentage,
            assignment: StatusAssignment::Computed {
                status: Self::classify(percentage, thresholds),
            },
        }
    }

    /// Aggregates forecasts into one row per department, in order of first
    /// appearance.
    #[must_use]
    pub fn analyze(forecasts: &[ForecastRow], thresholds: &Thresholds) -> Vec<VarianceAnalysisRow> {
        let mut totals: Vec<(&str, Decimal, Decimal)> = Vec::new();

        for forecast in forecasts {
            let department = forecast.department();
            match totals.iter_mut().find(|(d, _, _)| *d == department) {
                Some((_, predicted, actual)) => {
                    *predicted += forecast.forecasted_total;
                    *actual += forecast.row.total;
                }
                None => totals.push((department, forecast.forecasted_total, forecast.row.total)),
            }
        }

        totals
            .into_iter()
            .map(|(department, predicted, actual)| {
                Self::row(department, predicted, actual, thresholds)
            })
            .collect()
    }
}
