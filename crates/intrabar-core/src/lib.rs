//! Core contracts for intrabar.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The provider adapter seam and the fail-soft bar fetcher
//! - The snapshot reporter
//! - The cycle orchestrator (INIT -> FETCH_ALL -> REPORT)

pub mod adapters;
pub mod cycle;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod registry;
pub mod report;

pub use adapters::YahooChartSource;
pub use cycle::{run_cycle, CycleError, CycleOutcome};
pub use data_source::{BarSource, DayBarsRequest, SourceError, SourceErrorKind};
pub use domain::{
    coerce_volume, Bar, Clock, FixedClock, MarketTimestamp, Symbol, SystemClock, MARKET_OFFSET,
};
pub use error::ValidationError;
pub use fetcher::BarFetcher;
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use intrabar_store::{BarRow, Store, StoreConfig, StoreError};
pub use registry::SymbolRegistry;
pub use report::{SnapshotReporter, SNAPSHOT_ROWS_PER_SYMBOL};
