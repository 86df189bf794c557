//! Values offered for each report filter.

use std::collections::BTreeSet;

use fiscast_shared::types::Quarter;

use crate::forecast::ForecastRow;
use crate::variance::VarianceStatus;

/// Filter choices derived from the current forecasts.
pub struct FilterOptions;

impl FilterOptions {
    /// Distinct departments, sorted.
    #[must_use]
    pub fn departments(forecasts: &[ForecastRow]) -> Vec<String> {
        forecasts
            .iter()
            .map(ForecastRow::department)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Distinct years, most recent first.
    #[must_use]
    pub fn years(forecasts: &[ForecastRow]) -> Vec<i32> {
        forecasts
            .iter()
            .map(ForecastRow::year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .rev()
            .collect()
    }

    /// `Q1` to `Q4`.
    #[must_use]
    pub const fn quarters() -> [Quarter; 4] {
        Quarter::ALL
    }

    /// Every status.
    #[must_use]
    pub const fn statuses() -> [VarianceStatus; 3] {
        VarianceStatus::ALL
    }
}
