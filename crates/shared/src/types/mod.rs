//! Common types used across the application.

pub mod money;
pub mod quarter;

pub use money::{Currency, Money};
pub use quarter::Quarter;
