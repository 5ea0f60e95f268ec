//! Linklens main entry point
//!
//! This is the command-line interface for the Linklens page analyzer.

use anyhow::{bail, Context};
use clap::Parser;
use linklens::api::{handle_analyze, ErrorResponse};
use linklens::config::{load_config, validate, Config};
use linklens::{AnalysisResult, Analyzer};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Linklens: a single-page web analyzer
///
/// Linklens fetches one HTML page, reports its HTML version, title and
/// heading counts, checks every link on it once, and guesses whether it is
/// a login form.
#[derive(Parser, Debug)]
#[command(name = "linklens")]
#[command(version)]
#[command(about = "Analyze a web page and check its links", long_about = None)]
struct Cli {
    /// URL of the page to analyze
    #[arg(value_name = "URL", required_unless_present = "stdin")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Override the maximum number of concurrent link probes
    #[arg(long, value_name = "N")]
    max_concurrent_probes: Option<usize>,

    /// Read an analyze request ({"url": ...}) from standard input
    #[arg(long, conflicts_with = "url")]
    stdin: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let analyzer = Analyzer::new(&config).context("Failed to build the analyzer")?;

    if cli.stdin {
        handle_stdin(&analyzer, cli.pretty).await
    } else if let Some(url) = cli.url.as_deref() {
        handle_url(&analyzer, url, cli.pretty).await
    } else {
        bail!("no URL given")
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the JSON document.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linklens=info,warn"),
            1 => EnvFilter::new("linklens=debug,info"),
            2 => EnvFilter::new("linklens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, if any, and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(limit) = cli.max_concurrent_probes {
        config.analyzer.max_concurrent_probes = limit;
        validate(&config).context("Invalid --max-concurrent-probes")?;
    }

    Ok(config)
}

/// Analyzes a single URL given on the command line
async fn handle_url(analyzer: &Analyzer, url: &str, pretty: bool) -> anyhow::Result<()> {
    match analyzer.analyze(url).await {
        Ok(result) => print_result(&result, pretty),
        Err(err) => {
            tracing::error!("Analysis failed: {}", err);
            println!("{}", to_json(&ErrorResponse::from(&err), pretty)?);
            std::process::exit(1);
        }
    }
}

/// Answers an analyze request read from standard input
async fn handle_stdin(analyzer: &Analyzer, pretty: bool) -> anyhow::Result<()> {
    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .context("Failed to read request from stdin")?;

    let response = handle_analyze(analyzer, &body).await;
    let output = if pretty {
        let value: serde_json::Value = serde_json::from_str(&response.body)?;
        serde_json::to_string_pretty(&value)?
    } else {
        response.body.clone()
    };

    println!("{}", output);
    if !response.is_success() {
        tracing::error!("Request failed with status {}", response.status);
        std::process::exit(1);
    }
    Ok(())
}

fn print_result(result: &AnalysisResult, pretty: bool) -> anyhow::Result<()> {
    println!("{}", to_json(result, pretty)?);
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
