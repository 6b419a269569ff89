mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::statement::{RenderArgs, StatementArgs};

/// Income statement (profit and loss) calculations
#[derive(Parser)]
#[command(
    name = "pnl",
    version,
    about = "Compute and render income statements",
    long_about = "A CLI for building a single-period income statement from its line items \
                  with decimal precision. Derives gross, operating, total and net profit, \
                  reconciles itemised breakdowns against their aggregates, and renders \
                  the statement in English or statutory Chinese layout."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive profit figures, margins and warnings
    Compute(StatementArgs),
    /// Render the statement as labelled lines
    Render(RenderArgs),
    /// Compare each aggregate against its itemised breakdown
    Reconcile(StatementArgs),
    /// Print an all-zero statement to use as an input file
    Template,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
    Text,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compute(args) => commands::statement::run_compute(args),
        Commands::Render(args) => commands::statement::run_render(args),
        Commands::Reconcile(args) => commands::statement::run_reconcile(args),
        Commands::Template => commands::statement::run_template(),
        Commands::Version => {
            println!("pnl {}", env!("CARGO_PKG_VERSION"));
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
