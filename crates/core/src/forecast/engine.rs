//! Seasonal exponential smoothing (additive Holt-Winters).
//!
//! Amounts enter and leave as `Decimal`; the recurrence runs in `f64` and
//! every projected quarter is clamped at zero and rounded to a whole unit
//! before it is stored.

#![allow(
    clippy::float_arithmetic,
    clippy::float_cmp,
    clippy::cast_precision_loss
)]

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use super::error::ForecastError;
use super::types::{
    ForecastOutcome, ForecastParams, ForecastRow, ForecastSummary, ForecastWarning, LineItemKey,
    NormalizedRow, QUARTERS,
};

/// Projection of a single quarterly series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesProjection {
    /// Smoothed values for the next four quarters, before rounding.
    Projected([f64; QUARTERS]),
    /// Fewer observations than one season.
    InsufficientHistory {
        /// Observations needed.
        required: usize,
        /// Observations available.
        available: usize,
    },
    /// All observations are zero.
    NoActivity,
}

/// Engine producing per-line-item quarterly forecasts.
pub struct ForecastEngine;

impl ForecastEngine {
    /// Forecasts every row of one department.
    ///
    /// Each row is projected from the history of its line item (same
    /// department, category and description) up to and including the row's
    /// year, so the latest row of a line item carries the full-history
    /// forecast. Degenerate series produce zero forecasts and a warning.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InvalidParameter` for out-of-domain parameters,
    /// `ForecastError::InvalidRow` for rows breaking the normalized contract,
    /// and `ForecastError::DepartmentMismatch` when rows span departments.
    pub fn forecast(
        rows: &[NormalizedRow],
        params: &ForecastParams,
    ) -> Result<ForecastOutcome, ForecastError> {
        params.validate()?;

        let Some(first) = rows.first() else {
            return Ok(ForecastOutcome {
                rows: Vec::new(),
                warnings: Vec::new(),
                summary: Self::summarize(&[], &[]),
            });
        };

        for row in rows {
            row.validate()?;
            if row.department != first.department {
                return Err(ForecastError::DepartmentMismatch {
                    expected: first.department.clone(),
                    found: row.department.clone(),
                });
            }
        }

        let mut history: HashMap<LineItemKey<'_>, Vec<&NormalizedRow>> = HashMap::new();
        for row in rows {
            history.entry(row.line_item()).or_default().push(row);
        }
        for item_rows in history.values_mut() {
            item_rows.sort_by_key(|r| r.year);
        }

        let mut forecasts = Vec::with_capacity(rows.len());
        let mut warnings = Vec::new();

        for row in rows {
            let series: Vec<f64> = history[&row.line_item()]
                .iter()
                .filter(|r| r.year <= row.year)
                .flat_map(|r| r.quarters())
                .map(|amount| amount.to_f64().unwrap_or(0.0))
                .collect();

            let projected = match Self::project_series(&series, params) {
                SeriesProjection::Projected(values) => values.map(Self::to_amount),
                SeriesProjection::InsufficientHistory {
                    required,
                    available,
                } => {
                    warnings.push(ForecastWarning::InsufficientHistory {
                        line_item: row.description.clone(),
                        year: row.year,
                        required,
                        available,
                    });
                    [Decimal::ZERO; QUARTERS]
                }
                SeriesProjection::NoActivity => {
                    warnings.push(ForecastWarning::NoActivity {
                        line_item: row.description.clone(),
                        year: row.year,
                    });
                    [Decimal::ZERO; QUARTERS]
                }
            };

            forecasts.push(ForecastRow::new(row.clone(), projected));
        }

        let summary = Self::summarize(rows, &forecasts);
        Ok(ForecastOutcome {
            rows: forecasts,
            warnings,
            summary,
        })
    }

    /// Projects the next four quarters of one series.
    ///
    /// The level starts at the mean of the first season. With at least two
    /// seasons the trend starts at the difference of the first two season
    /// means divided by the period, and each seasonal index at the first
    /// season's value minus the series mean; otherwise both start at zero.
    /// The recurrence then runs over every observation after the first
    /// season. When all three smoothing factors are zero the projection is
    /// a flat repeat of the last season's mean level.
    #[must_use]
    pub fn project_series(series: &[f64], params: &ForecastParams) -> SeriesProjection {
        let period = params.seasonality_period;
        let n = series.len();

        if period == 0 || n < period {
            return SeriesProjection::InsufficientHistory {
                required: period,
                available: n,
            };
        }
        if series.iter().all(|value| *value == 0.0) {
            return SeriesProjection::NoActivity;
        }
        if params.alpha == 0.0 && params.beta == 0.0 && params.gamma == 0.0 {
            let level = mean(&series[n - period..]);
            return SeriesProjection::Projected([level; QUARTERS]);
        }

        let ForecastParams {
            alpha, beta, gamma, ..
        } = *params;

        let mut level = mean(&series[..period]);
        let (mut trend, mut seasonal) = if n >= 2 * period {
            let trend = (mean(&series[period..2 * period]) - level) / period as f64;
            let series_mean = mean(series);
            let seasonal: Vec<f64> = series[..period].iter().map(|x| x - series_mean).collect();
            (trend, seasonal)
        } else {
            (0.0, vec![0.0; period])
        };

        for (t, &value) in series.iter().enumerate().skip(period) {
            let slot = t % period;
            let prev_level = level;
            let prev_seasonal = seasonal[slot];

            level = alpha * (value - prev_seasonal) + (1.0 - alpha) * (level + trend);
            trend = beta * (level - prev_level) + (1.0 - beta) * trend;
            seasonal[slot] = gamma * (value - level) + (1.0 - gamma) * prev_seasonal;
        }

        let mut projected = [0.0; QUARTERS];
        for (h, value) in projected.iter_mut().enumerate() {
            let steps = (h + 1) as f64;
            *value = level + steps * trend + seasonal[(n + h) % period];
        }
        SeriesProjection::Projected(projected)
    }

    /// Clamps at zero and rounds to the nearest whole unit.
    fn to_amount(value: f64) -> Decimal {
        let rounded = value.round();
        if rounded.is_nan() || rounded <= 0.0 {
            return Decimal::ZERO;
        }
        Decimal::from_f64(rounded).unwrap_or(Decimal::ZERO)
    }

    fn summarize(rows: &[NormalizedRow], forecasts: &[ForecastRow]) -> ForecastSummary {
        let mut actual_totals = [Decimal::ZERO; QUARTERS];
        for row in rows {
            for (total, amount) in actual_totals.iter_mut().zip(row.quarters()) {
                *total += amount;
            }
        }

        let mut forecast_totals = [Decimal::ZERO; QUARTERS];
        for forecast in forecasts {
            for (total, amount) in forecast_totals.iter_mut().zip(forecast.forecasted()) {
                *total += amount;
            }
        }

        let seasonal_effect = forecasts
            .first()
            .map_or(Decimal::ZERO, |f| f.forecasted_q1 - f.row.q1);

        ForecastSummary {
            actual_totals,
            forecast_totals,
            next_quarter: forecast_totals[0],
            seasonal_effect,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn params(period: usize, alpha: f64, beta: f64, gamma: f64) -> ForecastParams {
        ForecastParams {
            seasonality_period: period,
            alpha,
            beta,
            gamma,
        }
    }

    fn it_row(description: &str, year: i32, quarters: [u32; 4]) -> NormalizedRow {
        let quarters = quarters.map(Decimal::from);
        NormalizedRow::new(description, "Equipment", "IT", year, quarters)
    }

    #[test]
    fn test_single_season_is_pure_level_forecast() {
        let rows = vec![
            it_row("Laptops", 2024, [15000, 18000, 12000, 20000]),
            it_row("Servers", 2024, [25000, 0, 0, 0]),
        ];

        let outcome = ForecastEngine::forecast(&rows, &params(4, 0.5, 0.3, 0.2)).unwrap();

        assert_eq!(outcome.rows.len(), 2);
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.rows[0].forecasted(), [dec!(16250); 4]);
        assert_eq!(outcome.rows[0].forecasted_total, dec!(65000));
        assert_eq!(outcome.rows[1].forecasted(), [dec!(6250); 4]);
        assert_eq!(outcome.rows[1].forecasted_total, dec!(25000));
    }

    #[test]
    fn test_empty_rows_return_empty_outcome() {
        let outcome = ForecastEngine::forecast(&[], &ForecastParams::default()).unwrap();
        assert!(outcome.rows.is_empty());
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.summary.next_quarter, Decimal::ZERO);
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let rows = vec![it_row("Laptops", 2024, [1; 4])];

        let err = ForecastEngine::forecast(&rows, &params(4, 1.5, 0.3, 0.2)).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter { name: "alpha", .. }));

        let err = ForecastEngine::forecast(&rows, &params(4, 0.5, -0.1, 0.2)).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter { name: "beta", .. }));

        let err = ForecastEngine::forecast(&rows, &params(4, 0.5, 0.3, f64::NAN)).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter { name: "gamma", .. }));

        let err = ForecastEngine::forecast(&rows, &params(0, 0.5, 0.3, 0.2)).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InvalidParameter {
                name: "seasonality_period",
                ..
            }
        ));
    }

    #[test]
    fn test_period_longer_than_history_warns_and_zeroes() {
        let rows = vec![it_row("Laptops", 2024, [100, 200, 300, 400])];

        let outcome = ForecastEngine::forecast(&rows, &params(8, 0.5, 0.3, 0.2)).unwrap();

        assert_eq!(outcome.rows[0].forecasted(), [Decimal::ZERO; 4]);
        assert_eq!(outcome.rows[0].forecasted_total, Decimal::ZERO);
        assert_eq!(
            outcome.warnings,
            vec![ForecastWarning::InsufficientHistory {
                line_item: "Laptops".to_string(),
                year: 2024,
                required: 8,
                available: 4,
            }]
        );
    }

    #[test]
    fn test_all_zero_history_warns_and_zeroes() {
        let rows = vec![it_row("Idle", 2024, [0; 4])];

        let outcome = ForecastEngine::forecast(&rows, &ForecastParams::default()).unwrap();

        assert_eq!(outcome.rows[0].forecasted_total, Decimal::ZERO);
        assert!(matches!(
            outcome.warnings[0],
            ForecastWarning::NoActivity { year: 2024, .. }
        ));
    }

    #[test]
    fn test_zero_smoothing_repeats_last_level() {
        let rows = vec![
            it_row("Laptops", 2023, [100, 200, 300, 400]),
            it_row("Laptops", 2024, [500, 700, 900, 1100]),
        ];

        let outcome = ForecastEngine::forecast(&rows, &params(4, 0.0, 0.0, 0.0)).unwrap();

        assert_eq!(outcome.rows[0].forecasted(), [dec!(250); 4]);
        assert_eq!(outcome.rows[1].forecasted(), [dec!(800); 4]);
    }

    #[test]
    fn test_row_uses_history_up_to_its_year() {
        let rows = vec![
            it_row("Laptops", 2024, [500, 700, 900, 1100]),
            it_row("Laptops", 2023, [100, 200, 300, 400]),
        ];

        let outcome = ForecastEngine::forecast(&rows, &params(4, 0.5, 0.3, 0.2)).unwrap();

        // 2023 sees one season only: flat mean.
        assert_eq!(outcome.rows[1].forecasted(), [dec!(250); 4]);
        // 2024 sees both seasons: trend pushes the projection upward.
        assert!(outcome.rows[0].forecasted_total > dec!(3200));
    }

    fn assert_projection(projection: SeriesProjection, expected: [f64; QUARTERS]) {
        let SeriesProjection::Projected(values) = projection else {
            panic!("expected a projection, got {projection:?}");
        };
        for (value, want) in values.iter().zip(expected) {
            assert!((value - want).abs() < 1e-9, "{values:?} != {expected:?}");
        }
    }

    #[test]
    fn test_two_season_recurrence_matches_hand_computation() {
        let series = [10.0, 20.0, 10.0, 20.0, 14.0, 24.0, 14.0, 24.0];

        // level0 = 15, trend0 = (15 - 15) / 2 = 0, series mean = 17,
        // seasonal = [-7, 3]; the recurrence then consumes t = 2..7.
        assert_projection(
            ForecastEngine::project_series(&series, &params(2, 0.5, 0.5, 0.5)),
            [
                15.628_417_968_75,
                25.582_519_531_25,
                16.930_175_781_25,
                26.884_277_343_75,
            ],
        );
    }

    #[test]
    fn test_partial_season_uses_shifted_seasonal_slots() {
        let series = [10.0, 20.0, 10.0, 20.0, 14.0, 24.0, 14.0, 24.0, 30.0, 5.0];

        assert_projection(
            ForecastEngine::project_series(&series, &params(4, 0.5, 0.3, 0.2)),
            [
                8.981_713_439_062_496,
                17.439_134_331_249_996,
                8.037_324_660_937_497,
                11.723_645_606_249_997,
            ],
        );
    }

    #[test]
    fn test_multi_year_rows_round_recurrence_output() {
        let rows = vec![
            it_row("Laptops", 2022, [100, 200, 300, 400]),
            it_row("Laptops", 2023, [500, 700, 900, 1100]),
            it_row("Laptops", 2024, [800, 1000, 1300, 1500]),
        ];

        let outcome = ForecastEngine::forecast(&rows, &params(4, 0.5, 0.3, 0.2)).unwrap();

        assert_eq!(outcome.rows[0].forecasted(), [dec!(250); 4]);
        // 1141.92, 1409.60, 1694.36, 1990.91
        assert_eq!(
            outcome.rows[1].forecasted(),
            [dec!(1142), dec!(1410), dec!(1694), dec!(1991)]
        );
        assert_eq!(outcome.rows[1].forecasted_total, dec!(6237));
        // 1405.52, 1603.79, 1826.88, 2044.43
        assert_eq!(
            outcome.rows[2].forecasted(),
            [dec!(1406), dec!(1604), dec!(1827), dec!(2044)]
        );
        assert_eq!(outcome.rows[2].forecasted_total, dec!(6881));
    }

    #[test]
    fn test_negative_projection_is_clamped() {
        let rows = vec![
            it_row("Wind-down", 2023, [9000, 6000, 3000, 1000]),
            it_row("Wind-down", 2024, [500, 100, 0, 0]),
        ];

        let outcome = ForecastEngine::forecast(&rows, &params(4, 0.9, 0.9, 0.2)).unwrap();

        for forecast in &outcome.rows {
            assert!(forecast.forecasted().iter().all(|q| *q >= Decimal::ZERO));
        }
    }

    #[test]
    fn test_invalid_row_total_is_rejected() {
        let mut row = it_row("Laptops", 2024, [1, 2, 3, 4]);
        row.total = dec!(11);

        let err = ForecastEngine::forecast(&[row], &ForecastParams::default()).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidRow { year: 2024, .. }));
    }

    #[test]
    fn test_mixed_departments_are_rejected() {
        let rows = vec![
            it_row("Laptops", 2024, [1; 4]),
            NormalizedRow::new("Ads", "Media", "Marketing", 2024, [dec!(1); 4]),
        ];

        let err = ForecastEngine::forecast(&rows, &ForecastParams::default()).unwrap_err();
        assert_eq!(
            err,
            ForecastError::DepartmentMismatch {
                expected: "IT".to_string(),
                found: "Marketing".to_string(),
            }
        );
    }

    #[test]
    fn test_summary_series() {
        let rows = vec![
            it_row("Laptops", 2024, [15000, 18000, 12000, 20000]),
            it_row("Servers", 2024, [25000, 0, 0, 0]),
        ];

        let outcome = ForecastEngine::forecast(&rows, &ForecastParams::default()).unwrap();

        assert_eq!(
            outcome.summary.actual_totals,
            [dec!(40000), dec!(18000), dec!(12000), dec!(20000)]
        );
        assert_eq!(outcome.summary.forecast_totals, [dec!(22500); 4]);
        assert_eq!(outcome.summary.next_quarter, dec!(22500));
        assert_eq!(outcome.summary.seasonal_effect, dec!(1250));
    }
}
