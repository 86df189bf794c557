//! Variance data types.

use fiscast_shared::Settings;
use fiscast_shared::config::{DEFAULT_APPROVE_THRESHOLD, DEFAULT_REVIEW_THRESHOLD};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::VarianceError;

/// Review status of a department's variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VarianceStatus {
    /// Within the approval threshold.
    Approved,
    /// Above approval but within the review threshold.
    #[serde(rename = "For Review")]
    ForReview,
    /// Above the review threshold.
    Disapproved,
}

impl VarianceStatus {
    /// All statuses in severity order.
    pub const ALL: [Self; 3] = [Self::Approved, Self::ForReview, Self::Disapproved];

    /// Returns the display form of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::ForReview => "For Review",
            Self::Disapproved => "Disapproved",
        }
    }

    /// Parses a status from its display form, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "approved" => Some(Self::Approved),
            "for review" | "for_review" => Some(Self::ForReview),
            "disapproved" => Some(Self::Disapproved),
            _ => None,
        }
    }
}

impl fmt::Display for VarianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a row's status was assigned.
///
/// Recomputation always yields `Computed`; a manual override keeps the
/// computed value alongside so the override can be inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum StatusAssignment {
    /// Derived from the thresholds.
    Computed {
        /// Effective status.
        status: VarianceStatus,
    },
    /// Set by a reviewer.
    Overridden {
        /// Effective status.
        status: VarianceStatus,
        /// What the thresholds produced.
        computed: VarianceStatus,
    },
}

impl StatusAssignment {
    /// Effective status.
    #[must_use]
    pub const fn status(self) -> VarianceStatus {
        match self {
            Self::Computed { status } | Self::Overridden { status, .. } => status,
        }
    }

    /// Returns true if a reviewer set the status.
    #[must_use]
    pub const fn is_overridden(self) -> bool {
        matches!(self, Self::Overridden { .. })
    }
}

/// Department-level comparison of forecast against the historical actual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceAnalysisRow {
    /// Department.
    pub department: String,
    /// Sum of forecasted totals.
    pub forecast: Decimal,
    /// Sum of historical actual totals.
    pub proposal: Decimal,
    /// `forecast - proposal`.
    pub variance: Decimal,
    /// Variance as a percentage of the proposal, one decimal place.
    pub percentage: Decimal,
    /// Status and how it was assigned.
    pub assignment: StatusAssignment,
}

impl VarianceAnalysisRow {
    /// Effective status.
    #[must_use]
    pub const fn status(&self) -> VarianceStatus {
        self.assignment.status()
    }
}

/// Percentage thresholds, evaluated against the absolute variance percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// At or below: approved.
    pub approve: Decimal,
    /// At or below: for review; above: disapproved.
    pub review: Decimal,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            approve: DEFAULT_APPROVE_THRESHOLD,
            review: DEFAULT_REVIEW_THRESHOLD,
        }
    }
}

impl From<&Settings> for Thresholds {
    fn from(settings: &Settings) -> Self {
        Self {
            approve: settings.approve_percentage,
            review: settings.variance_percentage,
        }
    }
}

impl Thresholds {
    /// Creates thresholds.
    #[must_use]
    pub const fn new(approve: Decimal, review: Decimal) -> Self {
        Self { approve, review }
    }

    /// Checks `0 <= approve <= review`.
    ///
    /// # Errors
    ///
    /// Returns `VarianceError::InvalidThresholds` otherwise.
    pub fn validate(&self) -> Result<(), VarianceError> {
        if self.approve.is_sign_negative() || self.approve > self.review {
            return Err(VarianceError::InvalidThresholds {
                approve: self.approve,
                review: self.review,
            });
        }
        Ok(())
    }
}

/// A status change on one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// Department.
    pub department: String,
    /// Variance percentage at the time of the change.
    pub percentage: Decimal,
    /// Status before the change.
    pub previous: VarianceStatus,
    /// Status after the change.
    pub current: VarianceStatus,
}
