//! Cell formatting for exported amounts and percentages.

use fiscast_shared::types::{Currency, Money};
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with symbol, thousands separators and two decimals.
#[must_use]
pub fn currency(amount: Decimal, currency: Currency) -> String {
    Money::new(amount, currency).to_string()
}

/// Formats a percentage with an explicit sign and one decimal, e.g. `+5.5%`.
#[must_use]
pub fn percentage(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(1);
    let sign = if rounded.is_sign_negative() { "" } else { "+" };
    format!("{sign}{rounded}%")
}
