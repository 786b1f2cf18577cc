use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::MarketTimestamp;

/// One OHLCV observation at minute granularity, immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub ts: MarketTimestamp,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Coerce a provider volume field to a non-negative integer.
///
/// Null, missing, negative, and unparsable values all become zero; the row is
/// kept either way.
pub fn coerce_volume(value: Option<&Value>) -> u64 {
    let Some(value) = value else {
        return 0;
    };

    match value {
        Value::Number(number) => {
            if let Some(volume) = number.as_u64() {
                volume
            } else if let Some(volume) = number.as_f64() {
                coerce_float(volume)
            } else {
                0
            }
        }
        Value::String(text) => text.trim().parse::<f64>().map(coerce_float).unwrap_or(0),
        _ => 0,
    }
}

fn coerce_float(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}
