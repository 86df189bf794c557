//! Latest forecasts per department.

use crate::forecast::ForecastRow;

/// Forecast rows keyed by department.
///
/// Replacing a department drops its previous rows and appends the new
/// ones, so departments stay in order of their latest regeneration.
#[derive(Debug, Clone, Default)]
pub struct ForecastStore {
    rows: Vec<ForecastRow>,
}

impl ForecastStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Replaces every row of `department` with `rows`.
    pub fn replace(&mut self, department: &str, rows: Vec<ForecastRow>) {
        self.rows.retain(|row| row.department() != department);
        self.rows.extend(rows);
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    /// Rows of one department.
    pub fn department<'a, 'b>(
        &'a self,
        department: &'b str,
    ) -> impl Iterator<Item = &'a ForecastRow> + use<'a, 'b> {
        self.rows
            .iter()
            .filter(move |row| row.department() == department)
    }

    /// Returns true if no forecasts are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drops every row.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
