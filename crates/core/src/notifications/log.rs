//! In-memory notification inbox.

use uuid::Uuid;

use super::types::{NotificationEvent, NotificationSink};

/// A stored notification with its read flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedNotification {
    /// The delivered event.
    pub event: NotificationEvent,
    /// Whether the user has seen it.
    pub is_read: bool,
}

/// Newest-first notification inbox.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Vec<LoggedNotification>,
}

impl NotificationLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Notifications, newest first.
    #[must_use]
    pub fn entries(&self) -> &[LoggedNotification] {
        &self.entries
    }

    /// Number of unread notifications.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.is_read).count()
    }

    /// Marks one notification read. Returns false if the id is unknown.
    pub fn mark_read(&mut self, id: Uuid) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|n| n.event.id == id) else {
            return false;
        };
        entry.is_read = true;
        true
    }

    /// Marks every notification read.
    pub fn mark_all_read(&mut self) {
        for entry in &mut self.entries {
            entry.is_read = true;
        }
    }

    /// Removes one notification. Returns false if the id is unknown.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.event.id != id);
        self.entries.len() != before
    }

    /// Removes every notification.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl NotificationSink for NotificationLog {
    fn publish(&mut self, event: NotificationEvent) {
        self.entries.insert(
            0,
            LoggedNotification {
                event,
                is_read: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::NotificationKind;
    use crate::variance::{StatusChange, VarianceStatus};
    use rust_decimal_macros::dec;

    fn change(department: &str, current: VarianceStatus) -> StatusChange {
        StatusChange {
            department: department.to_string(),
            percentage: dec!(21.6),
            previous: VarianceStatus::Approved,
            current,
        }
    }

    #[test]
    fn test_event_text_follows_destination_status() {
        let event = NotificationEvent::from_change(&change("IT", VarianceStatus::Disapproved));
        assert_eq!(event.kind, NotificationKind::VarianceReviewed);
        assert_eq!(event.title, "Variance Marked as Disapproved");
        assert_eq!(
            event.message,
            "IT variance (21.6%) has been marked as disapproved."
        );

        let event = NotificationEvent::from_change(&change("HR", VarianceStatus::ForReview));
        assert_eq!(event.kind.as_str(), "variance_flagged");
        assert_eq!(event.message, "HR variance (21.6%) requires review.");
    }

    #[test]
    fn test_log_is_newest_first_with_read_tracking() {
        let mut log = NotificationLog::new();
        log.publish(NotificationEvent::from_change(&change("IT", VarianceStatus::Disapproved)));
        log.publish(NotificationEvent::from_change(&change("HR", VarianceStatus::Approved)));

        assert_eq!(log.entries()[0].event.department, "HR");
        assert_eq!(log.unread_count(), 2);

        let id = log.entries()[1].event.id;
        assert!(log.mark_read(id));
        assert_eq!(log.unread_count(), 1);

        log.mark_all_read();
        assert_eq!(log.unread_count(), 0);

        assert!(log.dismiss(id));
        assert!(!log.dismiss(id));
        assert_eq!(log.entries().len(), 1);

        log.clear();
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&NotificationKind::VarianceApproved).unwrap();
        assert_eq!(json, "\"variance_approved\"");
    }
}
