//! Forecast session: keyed forecast store, variance board and
//! notification delivery.

use chrono::NaiveDateTime;
use fiscast_shared::SettingsProvider;
use fiscast_shared::types::Currency;
use tracing::{debug, info, warn};

use super::error::SessionError;
use super::store::ForecastStore;
use crate::export::{CsvExport, CsvSerializer, ExportOptions};
use crate::forecast::{
    ForecastEngine, ForecastError, ForecastOutcome, ForecastParams, ForecastRow, NormalizedRow,
};
use crate::notifications::{NotificationEvent, NotificationSink};
use crate::reports::{Report, ReportFilters, ReportService, ReportType};
use crate::variance::{StatusChange, Thresholds, VarianceAnalysisRow, VarianceBoard, VarianceStatus};

/// Application-level state for one user's forecasting work.
///
/// Settings are read from `S` on every classification and export. Status
/// transitions are delivered to `N`. The session is single-writer: two
/// regenerations of the same department simply leave the later one in
/// place.
pub struct ForecastSession<S, N> {
    settings: S,
    sink: N,
    currency: Currency,
    store: ForecastStore,
    board: VarianceBoard,
}

impl<S, N> ForecastSession<S, N>
where
    S: SettingsProvider,
    N: NotificationSink,
{
    /// Creates an empty session.
    pub fn new(settings: S, sink: N) -> Self {
        Self {
            settings,
            sink,
            currency: Currency::default(),
            store: ForecastStore::new(),
            board: VarianceBoard::new(),
        }
    }

    /// Sets the currency used in exports.
    #[must_use]
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Forecasts `department` from `rows`, replaces its previous forecasts
    /// and reclassifies every department.
    ///
    /// Nothing is replaced when forecasting fails.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Forecast` for invalid parameters or rows,
    /// including rows of another department, and `SessionError::Variance`
    /// for invalid configured thresholds.
    pub fn regenerate(
        &mut self,
        department: &str,
        rows: &[NormalizedRow],
        params: &ForecastParams,
    ) -> Result<ForecastOutcome, SessionError> {
        if let Some(row) = rows.iter().find(|row| row.department != department) {
            return Err(ForecastError::DepartmentMismatch {
                expected: department.to_string(),
                found: row.department.clone(),
            }
            .into());
        }

        let thresholds = self.thresholds()?;
        let outcome = ForecastEngine::forecast(rows, params)?;

        for warning in &outcome.warnings {
            warn!(department, %warning, "Degenerate forecast");
        }

        self.store.replace(department, outcome.rows.clone());
        info!(
            department,
            rows = outcome.rows.len(),
            warnings = outcome.warnings.len(),
            "Forecast regenerated"
        );

        self.apply_recompute(&thresholds);
        Ok(outcome)
    }

    /// Reclassifies every department from the current forecasts with the
    /// current settings, discarding overrides.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Variance` for invalid configured thresholds.
    pub fn recompute_variance(&mut self) -> Result<Vec<StatusChange>, SessionError> {
        let thresholds = self.thresholds()?;
        Ok(self.apply_recompute(&thresholds))
    }

    /// Sets a department's status by hand.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Variance` if the department has no variance row.
    pub fn override_status(
        &mut self,
        department: &str,
        status: VarianceStatus,
    ) -> Result<Option<StatusChange>, SessionError> {
        let change = self.board.override_status(department, status)?;
        if let Some(change) = &change {
            self.notify(change);
        }
        Ok(change)
    }

    /// Drops every forecast and variance row.
    pub fn clear_all(&mut self) {
        self.store.clear();
        self.board.clear();
        info!("Forecasts cleared");
    }

    /// Current forecasts.
    #[must_use]
    pub fn forecasts(&self) -> &[ForecastRow] {
        self.store.rows()
    }

    /// Current forecasts of one department.
    #[must_use]
    pub fn department_forecasts(&self, department: &str) -> Vec<&ForecastRow> {
        self.store.department(department).collect()
    }

    /// Current variance rows.
    #[must_use]
    pub fn variance_rows(&self) -> &[VarianceAnalysisRow] {
        self.board.rows()
    }

    /// Variance rows that are not approved.
    #[must_use]
    pub fn flagged_rows(&self) -> Vec<&VarianceAnalysisRow> {
        self.board.flagged().collect()
    }

    /// Generates a report over the current state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Variance` for invalid configured thresholds.
    pub fn generate_report(
        &self,
        report_type: ReportType,
        filters: &ReportFilters,
    ) -> Result<Report, SessionError> {
        let thresholds = self.thresholds()?;
        let report = ReportService::generate(
            report_type,
            self.store.rows(),
            self.board.rows(),
            filters,
            &thresholds,
        );
        debug!(report_type = %report_type, rows = report.len(), "Report generated");
        Ok(report)
    }

    /// Generates a report and serializes it to CSV, named for `at`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Export` with `ExportError::EmptyReport` when
    /// no rows match.
    pub fn export_report(
        &self,
        report_type: ReportType,
        filters: &ReportFilters,
        at: NaiveDateTime,
    ) -> Result<CsvExport, SessionError> {
        let report = self.generate_report(report_type, filters)?;
        let options = ExportOptions {
            inflation_rate: self.settings.settings().inflation_rate,
            currency: self.currency,
        };
        let export = CsvSerializer::export(&report, &options, at)?;
        info!(filename = %export.filename, bytes = export.bytes.len(), "Report exported");
        Ok(export)
    }

    /// Settings provider.
    pub const fn settings(&self) -> &S {
        &self.settings
    }

    /// Mutable settings provider.
    pub const fn settings_mut(&mut self) -> &mut S {
        &mut self.settings
    }

    /// Notification sink.
    pub const fn sink(&self) -> &N {
        &self.sink
    }

    /// Mutable notification sink.
    pub const fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }

    fn thresholds(&self) -> Result<Thresholds, SessionError> {
        let thresholds = Thresholds::from(&self.settings.settings());
        thresholds.validate()?;
        Ok(thresholds)
    }

    fn apply_recompute(&mut self, thresholds: &Thresholds) -> Vec<StatusChange> {
        let changes = self.board.recompute(self.store.rows(), thresholds);
        for change in &changes {
            self.notify(change);
        }
        changes
    }

    fn notify(&mut self, change: &StatusChange) {
        info!(
            department = %change.department,
            percentage = %change.percentage,
            from = %change.previous,
            to = %change.current,
            "Variance status changed"
        );
        self.sink.publish(NotificationEvent::from_change(change));
    }
}
