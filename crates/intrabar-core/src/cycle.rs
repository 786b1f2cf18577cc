use std::fs;
use std::path::Path;

use intrabar_store::{BarRow, Store, StoreError};
use thiserror::Error;
use tracing::info;

use crate::domain::{Bar, Clock};
use crate::fetcher::BarFetcher;
use crate::registry::SymbolRegistry;
use crate::report::SnapshotReporter;

/// Failures that abort the cycle. Per-symbol fetch and report-read problems
/// never land here; the fetcher and reporter absorb them.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

/// Per-cycle counters, logged at completion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    pub symbols_with_data: usize,
    pub symbols_empty: usize,
    pub rows_attempted: usize,
    pub rows_inserted: usize,
}

/// One full pass: INIT -> FETCH_ALL -> REPORT. No retries, no backward
/// transitions; symbols are processed strictly in registry order.
pub fn run_cycle(
    registry: &SymbolRegistry,
    fetcher: &BarFetcher,
    store: &Store,
    clock: &dyn Clock,
    report_path: &Path,
) -> Result<CycleOutcome, CycleError> {
    info!(
        symbols = registry.len(),
        source = fetcher.source_name(),
        "starting data fetch cycle"
    );

    let names: Vec<&str> = registry.iter().map(|symbol| symbol.as_str()).collect();
    store.register_symbols(&names)?;

    let mut outcome = CycleOutcome::default();
    for symbol in registry.iter() {
        match fetcher.fetch(symbol) {
            Some(bars) => {
                let rows: Vec<BarRow> = bars.iter().map(to_row).collect();
                let inserted = store.upsert_bars(symbol.as_str(), &rows)?;
                info!(
                    %symbol,
                    attempted = rows.len(),
                    inserted,
                    "inserted rows (duplicates ignored)"
                );
                outcome.symbols_with_data += 1;
                outcome.rows_attempted += rows.len();
                outcome.rows_inserted += inserted;
            }
            None => {
                info!(%symbol, "no data to insert");
                outcome.symbols_empty += 1;
            }
        }
    }

    let document = SnapshotReporter::new(store, clock).render(registry.symbols());
    fs::write(report_path, document)?;

    info!(
        inserted = outcome.rows_inserted,
        attempted = outcome.rows_attempted,
        report = %report_path.display(),
        "cycle complete, report updated"
    );

    Ok(outcome)
}

fn to_row(bar: &Bar) -> BarRow {
    BarRow {
        ts: bar.ts.format_rfc3339(),
        open: bar.open,
        high: bar.high,
        low: bar.low,
        close: bar.close,
        volume: i64::try_from(bar.volume).unwrap_or(i64::MAX),
    }
}
