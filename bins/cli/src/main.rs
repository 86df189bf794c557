//! Fiscast CLI
//!
//! Forecasts normalized budget rows, classifies department variance and
//! writes one report as CSV.
//!
//! Usage: fiscast --input rows.json --report quarterly_variance [--department IT]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fiscast_core::forecast::{ForecastParams, NormalizedRow};
use fiscast_core::notifications::NotificationEvent;
use fiscast_core::reports::{ReportFilters, ReportType};
use fiscast_core::session::ForecastSession;
use fiscast_core::variance::VarianceStatus;
use fiscast_shared::types::Quarter;
use fiscast_shared::{AppConfig, AppError};

/// Forecast departmental budgets and export a report
#[derive(Parser)]
#[command(name = "fiscast")]
#[command(about = "Forecast departmental budgets and export a report as CSV")]
struct Args {
    /// JSON file holding an array of normalized rows
    #[arg(short, long)]
    input: PathBuf,

    /// Report type id (e.g. quarterly_variance)
    #[arg(short, long)]
    report: ReportType,

    /// Only this department
    #[arg(long)]
    department: Option<String>,

    /// Only this quarter (Q1..Q4)
    #[arg(long, value_parser = ReportFilters::parse_quarter)]
    quarter: Option<Quarter>,

    /// Only this fiscal year
    #[arg(long)]
    year: Option<i32>,

    /// Only this status (Approved, "For Review", Disapproved)
    #[arg(long, value_parser = ReportFilters::parse_status)]
    status: Option<VarianceStatus>,

    /// Directory for the CSV file (defaults to export.output_dir)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl Args {
    fn filters(&self) -> ReportFilters {
        ReportFilters {
            department: self.department.clone(),
            quarter: self.quarter,
            year: self.year,
            status: self.status,
        }
    }
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fiscast=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            let code = err
                .downcast_ref::<AppError>()
                .map_or(1, AppError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = AppConfig::load().map_err(AppError::from)?;
    let params = ForecastParams::from(&config.forecast);
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.export.output_dir));

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let rows: Vec<NormalizedRow> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;
    info!(rows = rows.len(), input = %args.input.display(), "Loaded rows");

    let currency = config.export.currency;
    let sink: Vec<NotificationEvent> = Vec::new();
    let mut session = ForecastSession::new(config, sink).with_currency(currency);

    for (department, department_rows) in group_by_department(rows) {
        let outcome = session
            .regenerate(&department, &department_rows, &params)
            .map_err(AppError::from)?;
        info!(
            department = %department,
            next_quarter = %outcome.summary.next_quarter,
            "Department forecast ready"
        );
    }

    for event in session.sink() {
        info!(kind = event.kind.as_str(), "{}", event.message);
    }
    for row in session.flagged_rows() {
        info!(
            department = %row.department,
            percentage = %row.percentage,
            status = %row.status(),
            "Flagged for attention"
        );
    }

    let now = chrono::Local::now().naive_local();
    let export = session
        .export_report(args.report, &args.filters(), now)
        .map_err(AppError::from)?;

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let path = output_dir.join(&export.filename);
    std::fs::write(&path, &export.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(report = %args.report, path = %path.display(), "Report written");
    Ok(())
}

/// Splits rows by department, keeping the order departments first appear in.
fn group_by_department(rows: Vec<NormalizedRow>) -> Vec<(String, Vec<NormalizedRow>)> {
    let mut groups: Vec<(String, Vec<NormalizedRow>)> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|(name, _)| *name == row.department) {
            Some((_, group)) => group.push(row),
            None => groups.push((row.department.clone(), vec![row])),
        }
    }
    groups
}
