//! CSV serialization of reports.

use chrono::NaiveDateTime;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use fiscast_shared::types::Currency;
use rust_decimal::Decimal;

use super::error::ExportError;
use super::filename::export_filename;
use super::format;
use crate::reports::Report;

const BOM: &str = "\u{FEFF}";

/// Serialization settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Declared inflation rate for the preamble; `None` omits it.
    pub inflation_rate: Option<Decimal>,
    /// Currency for amount cells.
    pub currency: Currency,
}

/// A finished export: file name and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested file name.
    pub filename: String,
    /// UTF-8 payload, BOM included.
    pub bytes: Vec<u8>,
}

impl CsvExport {
    /// Payload as text.
    pub fn as_str(&self) -> Result<&str, ExportError> {
        Ok(std::str::from_utf8(&self.bytes)?)
    }
}

/// Serializer for report rows.
pub struct CsvSerializer;

impl CsvSerializer {
    /// Serializes a report to CSV bytes.
    ///
    /// The payload starts with a byte-order mark, then the inflation
    /// preamble and a blank line when a rate is set, then the header row
    /// and one record per row. Lines are separated by `\n` with no
    /// trailing newline.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::EmptyReport` for a report with no rows.
    pub fn serialize(report: &Report, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
        if report.is_empty() {
            return Err(ExportError::EmptyReport(report.report_type()));
        }

        let mut buffer = Vec::from(BOM.as_bytes());
        if let Some(rate) = options.inflation_rate {
            buffer.extend_from_slice(
                format!("Declared Inflation Rate (NCR),{}%\n\n", rate.normalize()).as_bytes(),
            );
        }

        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(buffer);

        writer.write_record(report.report_type().headers())?;
        for record in Self::records(report, options.currency) {
            writer.write_record(&record)?;
        }

        let mut bytes = writer
            .into_inner()
            .map_err(|e| ExportError::Io(e.into_error()))?;
        // Records are joined by newlines; the last one carries no terminator.
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
        }
        Ok(bytes)
    }

    /// Serializes a report and names the file after its type and `at`.
    ///
    /// # Errors
    ///
    /// Same as [`CsvSerializer::serialize`].
    pub fn export(
        report: &Report,
        options: &ExportOptions,
        at: NaiveDateTime,
    ) -> Result<CsvExport, ExportError> {
        Ok(CsvExport {
            filename: export_filename(report.report_type(), at),
            bytes: Self::serialize(report, options)?,
        })
    }

    /// Formatted cells, one vector per row, in header order.
    #[must_use]
    pub fn records(report: &Report, currency: Currency) -> Vec<Vec<String>> {
        let money = |amount: Decimal| format::currency(amount, currency);
        let quarters = |quarters: &[Decimal; 4], total: Decimal| {
            quarters
                .iter()
                .copied()
                .chain(std::iter::once(total))
                .map(money)
                .collect::<Vec<_>>()
        };

        match report {
            Report::QuarterlyVariance(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        r.department.clone(),
                        r.quarter.to_string(),
                        money(r.forecast),
                        money(r.actual),
                        money(r.variance),
                        format::percentage(r.percentage),
                        r.status.to_string(),
                    ]
                })
                .collect(),
            Report::QuarterlyForecast(rows) => rows
                .iter()
                .map(|r| {
                    let mut cells = vec![r.department.clone(), r.description.clone()];
                    cells.extend(quarters(&r.quarters, r.total));
                    cells
                })
                .collect(),
            Report::AnnualVarianceSummary(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        r.department.clone(),
                        money(r.total_forecast),
                        money(r.total_actual),
                        money(r.variance),
                        format::percentage(r.percentage),
                        r.status.to_string(),
                    ]
                })
                .collect(),
            Report::AnnualForecastSummary(rows) => rows
                .iter()
                .map(|r| {
                    let mut cells = vec![r.department.clone(), r.year.to_string()];
                    cells.extend(quarters(&r.quarters, r.total));
                    cells
                })
                .collect(),
            Report::ApprovedConsolidatedBudget(rows) => rows
                .iter()
                .map(|r| {
                    let mut cells = vec![r.category.clone(), r.department.clone()];
                    cells.extend(quarters(&r.quarters, r.total));
                    cells
                })
                .collect(),
            Report::ApprovedPerDeptBudget(rows) => rows
                .iter()
                .map(|r| {
                    let mut cells = vec![r.department.clone(), r.category.clone()];
                    cells.extend(quarters(&r.quarters, r.total));
                    cells
                })
                .collect(),
        }
    }
}
