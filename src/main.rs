// ==========================================
// Rework Tracker - CLI Entry
// ==========================================
// Load a workbook (or two CSV exports), build role reports,
// print them as JSON on stdout. Logs go to stderr.
// ==========================================

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;

use rework_tracker::{logging, DashboardApi, ReportQuery, ReworkDataset, Role};

/// Rework tracker: repairs + recuts → role dashboards
#[derive(Parser, Debug)]
#[command(name = "rework-tracker")]
#[command(about = "Normalize rework data and print per-role reports as JSON")]
#[command(version)]
struct Args {
    /// Workbook containing the repairs sheet and the recut list
    #[arg(long, value_name = "XLSX", conflicts_with_all = ["repairs_csv", "recuts_csv"])]
    file: Option<PathBuf>,

    /// Repairs table exported as CSV
    #[arg(long, value_name = "CSV", requires = "recuts_csv")]
    repairs_csv: Option<PathBuf>,

    /// Recut list exported as CSV
    #[arg(long, value_name = "CSV", requires = "repairs_csv")]
    recuts_csv: Option<PathBuf>,

    /// cutting | sewing | production | qc | director | all
    #[arg(long, default_value = "all")]
    role: String,

    /// First day of the window (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    from: Option<NaiveDate>,

    /// Last day of the window (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    to: Option<NaiveDate>,

    /// Attach trends against the preceding window of equal length
    #[arg(long)]
    compare_prior: bool,

    /// JSON config file (defaults apply for missing keys)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the data-quality report instead of role reports
    #[arg(long)]
    dq: bool,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,

    /// Structured JSON logs on stderr
    #[arg(long)]
    log_json: bool,
}

fn load(api: &DashboardApi, args: &Args) -> Result<ReworkDataset> {
    let dataset = match (&args.file, &args.repairs_csv, &args.recuts_csv) {
        (Some(file), _, _) => api
            .load_workbook(file)
            .with_context(|| format!("loading {}", file.display()))?,
        (None, Some(repairs), Some(recuts)) => api
            .load_csv(repairs, recuts)
            .with_context(|| format!("loading {} / {}", repairs.display(), recuts.display()))?,
        _ => bail!("either --file or both --repairs-csv and --recuts-csv are required"),
    };
    Ok(dataset)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    info!("{} v{}", rework_tracker::APP_NAME, rework_tracker::VERSION);

    let api = DashboardApi::from_config_file(args.config.as_deref())?;
    let dataset = load(&api, &args)?;

    if args.dq {
        return print_json(&dataset.dq_report, args.pretty);
    }

    let query = ReportQuery {
        start: args.from,
        end: args.to,
        compare_prior: args.compare_prior,
    };

    if args.role.trim().eq_ignore_ascii_case("all") {
        let reports = api.build_all_reports(&dataset, &query)?;
        print_json(&reports, args.pretty)
    } else {
        let role: Role = args.role.parse().map_err(anyhow::Error::msg)?;
        let report = api.build_report(&dataset, role, &query)?;
        print_json(&report, args.pretty)
    }
}
