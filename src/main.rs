use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use statement_reporter::services::{ReportOptions, ReportService};

#[derive(Parser)]
#[command(name = "statement-reporter")]
#[command(about = "Build a financial report from a directory of statement workbooks", long_about = None)]
struct Cli {
    /// Directory containing the .xlsx statement files
    #[arg(long, env = "STATEMENTS_DIR")]
    statements_dir: PathBuf,

    /// Output path for the monthly totals chart
    #[arg(long, env = "PLOT_PATH", default_value = "monthly_totals.svg")]
    plot_path: PathBuf,

    /// Output path for the HTML report
    #[arg(long, env = "REPORT_PATH", default_value = "financial_report.html")]
    report_path: PathBuf,

    /// Payment method shown in the equality-filter section
    #[arg(long, default_value = "CORRIENTE")]
    payment_method: String,

    /// Substring matched (case-insensitively) by the description sections
    #[arg(long, default_value = "pizza")]
    description_contains: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,statement_reporter=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    // Load environment variables before clap resolves env-backed args
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    info!(
        "Building report from statements in {}",
        cli.statements_dir.display()
    );

    let service = ReportService::new(
        cli.statements_dir,
        cli.plot_path,
        cli.report_path,
        ReportOptions {
            payment_filter_value: cli.payment_method,
            description_needle: cli.description_contains,
        },
    );

    let outcome = service.run()?;
    info!(
        "Done: {} records from {} files across {} months",
        outcome.record_count, outcome.files_read, outcome.month_count
    );

    Ok(())
}
