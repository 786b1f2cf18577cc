mod cli;
mod config;
mod error;
mod logging;

use std::sync::Arc;

use clap::Parser;

use intrabar_core::{
    run_cycle, BarFetcher, HttpClient, ReqwestHttpClient, Store, StoreConfig, SymbolRegistry,
    SystemClock, YahooChartSource,
};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = Config::resolve(&cli)?;

    let _guard = logging::init_logging(&config.log_dir)?;

    let registry = SymbolRegistry::from_names(&config.symbols)?;
    let store = Store::open(StoreConfig {
        db_path: config.db_path.clone(),
    })?;

    let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new()?);
    let fetcher = BarFetcher::new(Box::new(YahooChartSource::new(http_client)));

    run_cycle(
        &registry,
        &fetcher,
        &store,
        &SystemClock,
        &config.report_path,
    )?;

    Ok(())
}
