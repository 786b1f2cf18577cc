use std::fmt::Write as _;

use intrabar_store::Store;
use tracing::error;

use crate::domain::{Clock, MarketTimestamp, Symbol};

/// Rows rendered per symbol section.
pub const SNAPSHOT_ROWS_PER_SYMBOL: usize = 2;

/// Renders the markdown snapshot of the most recent stored bars.
pub struct SnapshotReporter<'a> {
    store: &'a Store,
    clock: &'a dyn Clock,
}

impl<'a> SnapshotReporter<'a> {
    pub fn new(store: &'a Store, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    /// Render one section per symbol, most recent rows first.
    ///
    /// Always completes: symbols with no rows are skipped, and a read failure
    /// for one symbol is logged and its section omitted.
    pub fn render(&self, symbols: &[Symbol]) -> String {
        let mut document = String::new();
        document.push_str("# Intraday Bars Snapshot\n\n");
        let _ = writeln!(
            document,
            "Last updated: {}\n",
            self.clock.now().format_display()
        );

        for symbol in symbols {
            let rows = match self
                .store
                .latest_bars(symbol.as_str(), SNAPSHOT_ROWS_PER_SYMBOL)
            {
                Ok(rows) => rows,
                Err(error) => {
                    error!(%symbol, %error, "failed to read rows for report section");
                    continue;
                }
            };
            if rows.is_empty() {
                continue;
            }

            let _ = writeln!(document, "## {symbol}\n");
            document.push_str("<table>\n");
            document.push_str("  <tr><th>Timestamp</th><th>Close</th><th>Volume</th></tr>\n");
            for row in &rows {
                let ts = MarketTimestamp::parse(&row.ts)
                    .map(MarketTimestamp::format_display)
                    .unwrap_or_else(|_| row.ts.clone());
                let _ = writeln!(
                    document,
                    "  <tr><td>{ts}</td><td>{close}</td><td>{volume}</td></tr>",
                    close = row.close,
                    volume = row.volume
                );
            }
            document.push_str("</table>\n\n");
        }

        document
    }
}
