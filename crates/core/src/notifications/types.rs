//! Notification event types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::variance::{StatusChange, VarianceStatus};

/// Notification category, keyed by the destination status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Department moved to Approved.
    VarianceApproved,
    /// Department moved to For Review.
    VarianceFlagged,
    /// Department moved to Disapproved.
    VarianceReviewed,
}

impl NotificationKind {
    /// Kind for a destination status.
    #[must_use]
    pub const fn for_status(status: VarianceStatus) -> Self {
        match status {
            VarianceStatus::Approved => Self::VarianceApproved,
            VarianceStatus::ForReview => Self::VarianceFlagged,
            VarianceStatus::Disapproved => Self::VarianceReviewed,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VarianceApproved => "variance_approved",
            Self::VarianceFlagged => "variance_flagged",
            Self::VarianceReviewed => "variance_reviewed",
        }
    }

    /// Display title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::VarianceApproved => "Variance Approved",
            Self::VarianceFlagged => "Variance Flagged for Review",
            Self::VarianceReviewed => "Variance Marked as Disapproved",
        }
    }
}

/// A status transition, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Unique id.
    pub id: Uuid,
    /// Category.
    pub kind: NotificationKind,
    /// Short title.
    pub title: String,
    /// Human-readable message.
    pub message: String,
    /// Department whose status changed.
    pub department: String,
    /// Variance percentage at the time of the change.
    pub percentage: Decimal,
    /// New status.
    pub status: VarianceStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl NotificationEvent {
    /// Builds the event for a status change.
    #[must_use]
    pub fn from_change(change: &StatusChange) -> Self {
        let kind = NotificationKind::for_status(change.current);
        let department = &change.department;
        let pct = change.percentage.normalize();
        let message = match kind {
            NotificationKind::VarianceApproved => {
                format!("{department} variance ({pct}%) has been approved.")
            }
            NotificationKind::VarianceFlagged => {
                format!("{department} variance ({pct}%) requires review.")
            }
            NotificationKind::VarianceReviewed => {
                format!("{department} variance ({pct}%) has been marked as disapproved.")
            }
        };

        Self {
            id: Uuid::new_v4(),
            kind,
            title: kind.title().to_string(),
            message,
            department: change.department.clone(),
            percentage: change.percentage,
            status: change.current,
            created_at: Utc::now(),
        }
    }
}

/// Receiver of notification events.
pub trait NotificationSink {
    /// Delivers one event.
    fn publish(&mut self, event: NotificationEvent);
}

impl NotificationSink for Vec<NotificationEvent> {
    fn publish(&mut self, event: NotificationEvent) {
        self.push(event);
    }
}
