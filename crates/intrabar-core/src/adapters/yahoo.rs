use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::data_source::{BarSource, DayBarsRequest, SourceError};
use crate::domain::{coerce_volume, Bar, MarketTimestamp};
use crate::http_client::{HttpClient, HttpRequest};

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Yahoo Finance chart adapter: the most recent trading day of 1-minute bars.
pub struct YahooChartSource {
    http_client: Arc<dyn HttpClient>,
}

impl YahooChartSource {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    fn endpoint(symbol: &str) -> String {
        format!(
            "{CHART_BASE_URL}/{}?range=1d&interval=1m",
            urlencoding::encode(symbol)
        )
    }
}

impl BarSource for YahooChartSource {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    fn day_bars(&self, req: &DayBarsRequest) -> Result<Vec<Bar>, SourceError> {
        let request = HttpRequest::get(Self::endpoint(req.symbol.as_str()))
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(REQUEST_TIMEOUT_MS);

        let response = self.http_client.execute(request).map_err(|error| {
            SourceError::unavailable(format!("yahoo transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        parse_chart_body(&response.body)
    }
}

fn parse_chart_body(body: &str) -> Result<Vec<Bar>, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|error| SourceError::internal(format!("failed to parse yahoo chart: {error}")))?;

    if let Some(error) = &chart_response.chart.error {
        if !error.is_null() {
            return Err(SourceError::unavailable(format!(
                "yahoo chart API error: {error}"
            )));
        }
    }

    let Some(result) = chart_response
        .chart
        .result
        .as_ref()
        .and_then(|results| results.first())
    else {
        return Ok(Vec::new());
    };

    let Some(timestamps) = result.timestamp.as_ref() else {
        return Ok(Vec::new());
    };
    let Some(quote) = result.indicators.quote.first() else {
        return Ok(Vec::new());
    };

    let mut bars = Vec::with_capacity(timestamps.len());
    for (index, &unix_ts) in timestamps.iter().enumerate() {
        let ts = MarketTimestamp::from_unix(unix_ts)
            .map_err(|error| SourceError::internal(error.to_string()))?;

        // Yahoo pads in-flight minutes with nulls; keep only rows with a
        // complete OHLC set.
        if let (Some(Some(open)), Some(Some(high)), Some(Some(low)), Some(Some(close))) = (
            quote.open.get(index),
            quote.high.get(index),
            quote.low.get(index),
            quote.close.get(index),
        ) {
            bars.push(Bar {
                ts,
                open: *open,
                high: *high,
                low: *low,
                close: *close,
                volume: coerce_volume(quote.volume.get(index)),
            });
        }
    }

    Ok(bars)
}

// Yahoo Finance chart API response structures.
#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Value>,
}
