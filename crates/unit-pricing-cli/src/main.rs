mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::installment::{ColumnsArgs, CustomPlanArgs, QuoteArgs, ScheduleArgs};

/// Installment and pricing calculations for real-estate units
#[derive(Parser)]
#[command(
    name = "upc",
    version,
    about = "Installment and pricing calculations for real-estate units",
    long_about = "Computes discounts, down payments, remaining balances and per-period \
                  installments (monthly, quarterly, semi-annual, annual) for a unit price. \
                  Numeric flags accept grouped or Arabic-Indic digits."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Calculator defaults (JSON or YAML)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Price breakdown and installments for every frequency
    Quote(QuoteArgs),
    /// Compare a quoted installment amount with the straight-line plan
    CustomPlan(CustomPlanArgs),
    /// Dated installment schedule for the selected frequency
    Schedule(ScheduleArgs),
    /// Payment columns as stored on a unit record
    Columns(ColumnsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = match config::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };
    info!(?cfg, "calculator configuration loaded");

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Quote(args) => commands::installment::run_quote(args, &cfg),
        Commands::CustomPlan(args) => commands::installment::run_custom_plan(args, &cfg),
        Commands::Schedule(args) => commands::installment::run_schedule(args, &cfg),
        Commands::Columns(args) => commands::installment::run_columns(args, &cfg),
        Commands::Version => {
            println!("upc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
