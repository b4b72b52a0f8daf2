//! Cloud Resource Optimizer CLI
//!
//! A command-line tool for validating cloud application resource records,
//! computing allocation metrics and printing scaling recommendations.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{report, sample, validate};
use optimizer_lib::OptimizerMetrics;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Cloud Resource Optimizer CLI
#[derive(Parser)]
#[command(name = "cloud-optimizer")]
#[command(author, version, about = "CLI for Cloud Resource Optimizer", long_about = None)]
pub struct Cli {
    /// Output format (defaults to the configured format, then markdown)
    #[arg(long, short, global = true)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Print Prometheus metrics to stderr after the command finishes
    #[arg(long, global = true)]
    pub print_metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the resource allocation report
    Report {
        /// JSON file with resource records (uses sample data if omitted or unreadable)
        #[arg(long, short)]
        input: Option<PathBuf>,
    },

    /// Validate a JSON file of resource records
    Validate {
        /// JSON file with resource records
        #[arg(long, short)]
        input: PathBuf,
    },

    /// Print the built-in sample data set as JSON
    Sample,
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::Config::load()?;

    init_tracing(cli.verbose, cli.log_json || settings.log_json);

    let format = output::OutputFormat::resolve(cli.format, settings.format.as_deref());
    debug!(?format, "Resolved output format");

    // Execute command
    let outcome = match cli.command {
        Commands::Report { input } => {
            let input = input.or(settings.input);
            report::generate(input.as_deref(), format)
        }
        Commands::Validate { input } => validate::check(&input, format),
        Commands::Sample => sample::print_sample(),
    };

    if cli.print_metrics {
        eprintln!("{}", OptimizerMetrics::new().render()?);
    }

    outcome
}
