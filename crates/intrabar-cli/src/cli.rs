//! CLI argument definitions for intrabar.
//!
//! One invocation runs exactly one fetch-store-report cycle; scheduling
//! repeated cycles is left to cron or similar.

use std::path::PathBuf;

use clap::Parser;

/// Intraday bar snapshot ETL.
///
/// Fetches the most recent trading day of 1-minute bars for the configured
/// symbols, stores them in a local DuckDB file, and rewrites the snapshot
/// report.
#[derive(Debug, Parser)]
#[command(name = "intrabar", author, version, about = "Intraday bar snapshot ETL")]
pub struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the DuckDB database path.
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Override the snapshot report path.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Override the log directory.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Override the symbol registry (repeatable).
    #[arg(long = "symbol", value_name = "SYMBOL")]
    pub symbols: Vec<String>,
}
