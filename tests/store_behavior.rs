//! Behavior tests for the bar store: dedup semantics, read ordering, and
//! per-symbol isolation.

use tempfile::tempdir;

use intrabar_tests::*;

#[test]
fn registered_symbols_start_with_no_rows() {
    let temp = tempdir().expect("tempdir");
    let store = open_store(temp.path());

    store
        .register_symbols(&["AAA.NS", "BBB.NS"])
        .expect("register");

    assert_eq!(store.bar_count("AAA.NS").expect("count"), 0);
    assert!(store.latest_bars("AAA.NS", 2).expect("read").is_empty());
}

#[test]
fn reinserting_identical_rows_changes_nothing() {
    let temp = tempdir().expect("tempdir");
    let store = open_store(temp.path());
    let rows = vec![
        row("2026-02-20T09:15:00+05:30", 101.0, 1_000),
        row("2026-02-20T09:16:00+05:30", 102.0, 1_100),
    ];

    let first = store.upsert_bars("AAA.NS", &rows).expect("first upsert");
    let second = store.upsert_bars("AAA.NS", &rows).expect("second upsert");

    assert_eq!(first, 2);
    assert_eq!(second, 0);
    // Stored content is the original rows, untouched.
    let stored = store.latest_bars("AAA.NS", 10).expect("read");
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].ts, "2026-02-20T09:16:00+05:30");
    assert_eq!(stored[0].close, 102.0);
    assert_eq!(stored[1].ts, "2026-02-20T09:15:00+05:30");
}

#[test]
fn partially_overlapping_batch_inserts_only_new_rows() {
    let temp = tempdir().expect("tempdir");
    let store = open_store(temp.path());

    store
        .upsert_bars(
            "AAA.NS",
            &[
                row("2026-02-20T09:15:00+05:30", 101.0, 1_000),
                row("2026-02-20T09:16:00+05:30", 102.0, 1_100),
            ],
        )
        .expect("seed upsert");

    let inserted = store
        .upsert_bars(
            "AAA.NS",
            &[
                row("2026-02-20T09:16:00+05:30", 102.0, 1_100),
                row("2026-02-20T09:17:00+05:30", 103.0, 1_200),
                row("2026-02-20T09:18:00+05:30", 104.0, 1_300),
            ],
        )
        .expect("overlapping upsert");

    assert_eq!(inserted, 2);
    assert_eq!(store.bar_count("AAA.NS").expect("count"), 4);
}

#[test]
fn latest_bars_returns_newest_first_capped_at_limit() {
    let temp = tempdir().expect("tempdir");
    let store = open_store(temp.path());
    store
        .upsert_bars(
            "AAA.NS",
            &[
                row("2026-02-20T09:15:00+05:30", 101.0, 1_000),
                row("2026-02-20T09:17:00+05:30", 103.0, 1_200),
                row("2026-02-20T09:16:00+05:30", 102.0, 1_100),
            ],
        )
        .expect("upsert");

    let latest = store.latest_bars("AAA.NS", 2).expect("read");

    let timestamps: Vec<&str> = latest.iter().map(|r| r.ts.as_str()).collect();
    assert_eq!(
        timestamps,
        vec!["2026-02-20T09:17:00+05:30", "2026-02-20T09:16:00+05:30"]
    );
}

#[test]
fn rows_with_the_same_timestamp_are_independent_across_symbols() {
    let temp = tempdir().expect("tempdir");
    let store = open_store(temp.path());
    let shared_ts = "2026-02-20T09:15:00+05:30";

    store
        .upsert_bars("AAA.NS", &[row(shared_ts, 101.0, 1_000)])
        .expect("upsert AAA");
    let inserted = store
        .upsert_bars("BBB.NS", &[row(shared_ts, 205.0, 2_000)])
        .expect("upsert BBB");

    // Uniqueness is per symbol, not global.
    assert_eq!(inserted, 1);
    assert_eq!(store.bar_count("AAA.NS").expect("count"), 1);
    assert_eq!(store.bar_count("BBB.NS").expect("count"), 1);
    let bbb = store.latest_bars("BBB.NS", 1).expect("read");
    assert_eq!(bbb[0].close, 205.0);
}
