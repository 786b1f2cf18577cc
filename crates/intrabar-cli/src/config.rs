use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::CliError;

/// Shipped default universe: a slice of NSE large caps in Yahoo's `.NS`
/// notation. Overridable via the config file or repeated `--symbol` flags.
const DEFAULT_SYMBOLS: &[&str] = &[
    "RELIANCE.NS",
    "TCS.NS",
    "HDFCBANK.NS",
    "INFY.NS",
    "ICICIBANK.NS",
    "HINDUNILVR.NS",
    "ITC.NS",
    "SBIN.NS",
    "BHARTIARTL.NS",
    "KOTAKBANK.NS",
    "BAJFINANCE.NS",
    "LT.NS",
    "ASIANPAINT.NS",
    "HCLTECH.NS",
    "AXISBANK.NS",
    "MARUTI.NS",
    "SUNPHARMA.NS",
    "TITAN.NS",
    "ULTRACEMCO.NS",
    "NESTLEIND.NS",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub symbols: Vec<String>,
    pub db_path: PathBuf,
    pub report_path: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| String::from(*s)).collect(),
            db_path: PathBuf::from("data/intrabar.duckdb"),
            report_path: PathBuf::from("SNAPSHOT.md"),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Config {
    /// Resolve the effective config: file (if any) layered under CLI flags.
    pub fn resolve(cli: &Cli) -> Result<Self, CliError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if !cli.symbols.is_empty() {
            config.symbols = cli.symbols.clone();
        }
        if let Some(db) = &cli.db {
            config.db_path = db.clone();
        }
        if let Some(report) = &cli.report {
            config.report_path = report.clone();
        }
        if let Some(log_dir) = &cli.log_dir {
            config.log_dir = log_dir.clone();
        }

        Ok(config)
    }

    fn load(path: &Path) -> Result<Self, CliError> {
        let raw = fs::read_to_string(path).map_err(|error| {
            CliError::Config(format!("cannot read {}: {error}", path.display()))
        })?;
        toml::from_str(&raw)
            .map_err(|error| CliError::Config(format!("invalid {}: {error}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_cover_every_field() {
        let config = Config::default();
        assert!(!config.symbols.is_empty());
        assert_eq!(config.report_path, PathBuf::from("SNAPSHOT.md"));
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = NamedTempFile::new().expect("tempfile");
        writeln!(
            file,
            r#"
symbols = ["AAA.NS", "BBB.NS"]
db_path = "custom/bars.duckdb"
"#
        )
        .expect("write config");

        let cli = Cli::parse_from(["intrabar", "--config", file.path().to_str().unwrap()]);
        let config = Config::resolve(&cli).expect("resolve");
        assert_eq!(config.symbols, vec!["AAA.NS", "BBB.NS"]);
        assert_eq!(config.db_path, PathBuf::from("custom/bars.duckdb"));
        // Unset fields keep their defaults.
        assert_eq!(config.report_path, PathBuf::from("SNAPSHOT.md"));
    }

    #[test]
    fn flags_override_file_and_defaults() {
        let cli = Cli::parse_from([
            "intrabar",
            "--symbol",
            "AAA.NS",
            "--symbol",
            "BBB.NS",
            "--report",
            "out.md",
        ]);
        let config = Config::resolve(&cli).expect("resolve");
        assert_eq!(config.symbols, vec!["AAA.NS", "BBB.NS"]);
        assert_eq!(config.report_path, PathBuf::from("out.md"));
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let mut file = NamedTempFile::new().expect("tempfile");
        writeln!(file, "tickers = []").expect("write config");

        let cli = Cli::parse_from(["intrabar", "--config", file.path().to_str().unwrap()]);
        let error = Config::resolve(&cli).expect_err("must fail");
        assert!(matches!(error, CliError::Config(_)));
    }
}
