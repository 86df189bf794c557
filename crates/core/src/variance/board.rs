//! Current variance rows with manual status overrides.

use tracing::info;

use super::error::VarianceError;
use super::service::VarianceClassifier;
use super::types::{StatusAssignment, StatusChange, Thresholds, VarianceAnalysisRow, VarianceStatus};
use crate::forecast::ForecastRow;

/// The variance rows in effect for a session.
///
/// Recomputation rebuilds every row from the forecasts and discards
/// overrides. Both recomputation and overrides report the status changes
/// they cause.
#[derive(Debug, Clone, Default)]
pub struct VarianceBoard {
    rows: Vec<VarianceAnalysisRow>,
}

impl VarianceBoard {
    /// Creates an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Replaces all rows with a fresh classification of `forecasts`.
    ///
    /// Returns one change per department whose effective status differs
    /// from its status before the call. Departments seen for the first
    /// time produce no change.
    pub fn recompute(
        &mut self,
        forecasts: &[ForecastRow],
        thresholds: &Thresholds,
    ) -> Vec<StatusChange> {
        let fresh = VarianceClassifier::analyze(forecasts, thresholds);

        let changes = fresh
            .iter()
            .filter_map(|row| {
                let previous = self.get(&row.department)?.status();
                (previous != row.status()).then(|| StatusChange {
                    department: row.department.clone(),
                    percentage: row.percentage,
                    previous,
                    current: row.status(),
                })
            })
            .collect();

        self.rows = fresh;
        changes
    }

    /// Sets a department's status by hand.
    ///
    /// Returns the change if the effective status moved.
    ///
    /// # Errors
    ///
    /// Returns `VarianceError::UnknownDepartment` if no row exists for the
    /// department.
    pub fn override_status(
        &mut self,
        department: &str,
        status: VarianceStatus,
    ) -> Result<Option<StatusChange>, VarianceError> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.department == department)
            .ok_or_else(|| VarianceError::UnknownDepartment(department.to_string()))?;

        let previous = row.status();
        let computed = match row.assignment {
            StatusAssignment::Computed { status: computed }
            | StatusAssignment::Overridden { computed, .. } => computed,
        };
        row.assignment = StatusAssignment::Overridden { status, computed };

        info!(department, from = %previous, to = %status, "Variance status overridden");

        Ok((previous != status).then(|| StatusChange {
            department: row.department.clone(),
            percentage: row.percentage,
            previous,
            current: status,
        }))
    }

    /// All rows, in order of first appearance.
    #[must_use]
    pub fn rows(&self) -> &[VarianceAnalysisRow] {
        &self.rows
    }

    /// Rows that are not approved.
    pub fn flagged(&self) -> impl Iterator<Item = &VarianceAnalysisRow> {
        self.rows
            .iter()
            .filter(|row| row.status() != VarianceStatus::Approved)
    }

    /// Row for one department.
    #[must_use]
    pub fn get(&self, department: &str) -> Option<&VarianceAnalysisRow> {
        self.rows.iter().find(|row| row.department == department)
    }

    /// Returns true if the board holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drops every row.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
