//! DuckDB-backed time-series store for minute bars.
//!
//! One table holds bars for every symbol, keyed by `(symbol, ts)`. Inserts go
//! through `INSERT OR IGNORE`, so replaying an overlapping fetch is a no-op
//! for rows that already exist. Every operation opens its own connection and
//! releases it on return; there is no pooling and no persistent handle.

pub mod migrations;

use std::fs;
use std::path::{Path, PathBuf};

use duckdb::{params, Connection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    DuckDb(#[from] duckdb::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

/// One persisted bar, without its symbol (the caller supplies that).
#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    pub ts: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

#[derive(Debug, Clone)]
pub struct Store {
    db_path: PathBuf,
}

impl Store {
    /// Open the store, creating the database file and applying any pending
    /// schema migrations.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = Self {
            db_path: config.db_path,
        };
        let connection = store.connect()?;
        migrations::apply_migrations(&connection)?;
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        self.db_path.as_path()
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(self.db_path.as_path())?)
    }

    /// Record every known symbol. Idempotent; must run before any fetch so
    /// symbols that never return data still exist durably.
    pub fn register_symbols<S: AsRef<str>>(&self, symbols: &[S]) -> Result<(), StoreError> {
        let mut connection = self.connect()?;
        let tx = connection.transaction()?;
        {
            let mut statement = tx.prepare("INSERT OR IGNORE INTO symbols (symbol) VALUES (?)")?;
            for symbol in symbols {
                statement.execute(params![symbol.as_ref()])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Insert bars for one symbol, silently skipping rows whose `(symbol, ts)`
    /// key already exists. Returns the number of rows actually inserted.
    pub fn upsert_bars(&self, symbol: &str, rows: &[BarRow]) -> Result<usize, StoreError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut connection = self.connect()?;
        let tx = connection.transaction()?;
        let mut inserted = 0;
        {
            let mut statement = tx.prepare(
                r#"
INSERT OR IGNORE INTO bars_1m (symbol, ts, open, high, low, close, volume)
VALUES (?, ?, ?, ?, ?, ?, ?)
"#,
            )?;
            for row in rows {
                inserted += statement.execute(params![
                    symbol, row.ts, row.open, row.high, row.low, row.close, row.volume
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// The most recent bars for one symbol, newest first.
    pub fn latest_bars(&self, symbol: &str, limit: usize) -> Result<Vec<BarRow>, StoreError> {
        let connection = self.connect()?;
        let mut statement = connection.prepare(
            r#"
SELECT ts, open, high, low, close, volume
FROM bars_1m
WHERE symbol = ?
ORDER BY ts DESC
LIMIT ?
"#,
        )?;
        let rows = statement
            .query_map(params![symbol, limit as i64], |row| {
                Ok(BarRow {
                    ts: row.get(0)?,
                    open: row.get(1)?,
                    high: row.get(2)?,
                    low: row.get(3)?,
                    close: row.get(4)?,
                    volume: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn bar_count(&self, symbol: &str) -> Result<usize, StoreError> {
        let connection = self.connect()?;
        let count: i64 = connection.query_row(
            "SELECT COUNT(*) FROM bars_1m WHERE symbol = ?",
            params![symbol],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_rows() -> Vec<BarRow> {
        vec![
            BarRow {
                ts: String::from("2026-02-20T09:15:00+05:30"),
                open: 100.0,
                high: 101.5,
                low: 99.5,
                close: 101.0,
                volume: 12_000,
            },
            BarRow {
                ts: String::from("2026-02-20T09:16:00+05:30"),
                open: 101.0,
                high: 102.0,
                low: 100.8,
                close: 101.7,
                volume: 8_500,
            },
        ]
    }

    fn open_store(dir: &Path) -> Store {
        Store::open(StoreConfig {
            db_path: dir.join("bars.duckdb"),
        })
        .expect("store open")
    }

    #[test]
    fn open_is_idempotent_across_invocations() {
        let temp = tempdir().expect("tempdir");
        let first = open_store(temp.path());
        first
            .upsert_bars("AAA.NS", &sample_rows())
            .expect("upsert");
        drop(first);

        let second = open_store(temp.path());
        assert_eq!(second.bar_count("AAA.NS").expect("count"), 2);
    }

    #[test]
    fn upsert_skips_existing_timestamps() {
        let temp = tempdir().expect("tempdir");
        let store = open_store(temp.path());

        let inserted = store.upsert_bars("AAA.NS", &sample_rows()).expect("upsert");
        assert_eq!(inserted, 2);

        let inserted_again = store.upsert_bars("AAA.NS", &sample_rows()).expect("upsert");
        assert_eq!(inserted_again, 0);
        assert_eq!(store.bar_count("AAA.NS").expect("count"), 2);
    }

    #[test]
    fn latest_bars_returns_newest_first_with_limit() {
        let temp = tempdir().expect("tempdir");
        let store = open_store(temp.path());
        store.upsert_bars("AAA.NS", &sample_rows()).expect("upsert");

        let latest = store.latest_bars("AAA.NS", 1).expect("query");
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].ts, "2026-02-20T09:16:00+05:30");
    }

    #[test]
    fn symbols_are_isolated_by_key() {
        let temp = tempdir().expect("tempdir");
        let store = open_store(temp.path());
        store.upsert_bars("AAA.NS", &sample_rows()).expect("upsert");
        store.upsert_bars("BBB.NS", &sample_rows()).expect("upsert");

        assert_eq!(store.bar_count("AAA.NS").expect("count"), 2);
        assert_eq!(store.bar_count("BBB.NS").expect("count"), 2);
        assert!(store.latest_bars("CCC.NS", 2).expect("query").is_empty());
    }

    #[test]
    fn register_symbols_is_idempotent() {
        let temp = tempdir().expect("tempdir");
        let store = open_store(temp.path());
        store
            .register_symbols(&["AAA.NS", "BBB.NS"])
            .expect("register");
        store.register_symbols(&["AAA.NS"]).expect("register again");

        let connection = Connection::open(store.db_path()).expect("open");
        let count: i64 = connection
            .query_row("SELECT COUNT(*) FROM symbols", [], |row| row.get(0))
            .expect("count");
        assert_eq!(count, 2);
    }
}
