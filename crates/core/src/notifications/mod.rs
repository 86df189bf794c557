//! Status-change notifications.

mod log;
mod types;

pub use log::{LoggedNotification, NotificationLog};
pub use types::{NotificationEvent, NotificationKind, NotificationSink};
