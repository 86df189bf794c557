//! CSV export of generated reports.

mod error;
mod filename;
pub mod format;
mod serializer;

pub use error::ExportError;
pub use filename::export_filename;
pub use serializer::{CsvExport, CsvSerializer, ExportOptions};
