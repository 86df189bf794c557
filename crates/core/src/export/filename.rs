//! Export file naming.

use chrono::{NaiveDateTime, Timelike};

use crate::reports::ReportType;

/// `<BaseName>_<YYYY-MM-DD>_<H>-<MM>.csv` for the given local time.
#[must_use]
pub fn export_filename(report_type: ReportType, at: NaiveDateTime) -> String {
    format!(
        "{}_{}_{}-{:02}.csv",
        report_type.base_name(),
        at.format("%Y-%m-%d"),
        at.hour(),
        at.minute()
    )
}
