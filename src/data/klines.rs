//! REST kline source.
//!
//! Expects the common array-of-arrays kline payload:
//! `[[openTimeMs, open, high, low, close, ...], ...]`, oldest first, with the
//! numeric fields serialized as either strings or numbers. Rows that don't
//! parse are skipped rather than failing the whole window.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde_json::Value;

use crate::data::CandleSource;
use crate::domain::Candle;
use crate::utils::TimeUtils;

pub struct HttpKlineSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpKlineSource {
    /// The timeout bounds the whole request so a stalled provider costs one
    /// cycle, not the process.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(HttpKlineSource {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn parse_rows(rows: Vec<Value>) -> Vec<Candle> {
        rows.iter().filter_map(parse_kline_row).collect()
    }
}

fn numeric_field(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn parse_kline_row(row: &Value) -> Option<Candle> {
    let arr = row.as_array()?;
    if arr.len() < 5 {
        return None;
    }
    Some(Candle {
        open_time_ms: arr[0].as_i64()?,
        open: numeric_field(&arr[1])?,
        high: numeric_field(&arr[2])?,
        low: numeric_field(&arr[3])?,
        close: numeric_field(&arr[4])?,
    })
}

#[async_trait]
impl CandleSource for HttpKlineSource {
    fn signature(&self) -> &'static str {
        "kline REST API"
    }

    async fn fetch_window(
        &self,
        symbol: &str,
        interval_ms: i64,
        lookback: u32,
    ) -> Result<Vec<Candle>> {
        let url = format!("{}/klines", self.base_url);
        let limit = lookback.to_string();
        let res = self
            .http
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("interval", TimeUtils::interval_to_string(interval_ms)),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .context("kline request failed")?;

        if !res.status().is_success() {
            bail!("kline endpoint returned {}", res.status());
        }

        let rows: Vec<Value> = res.json().await.context("kline payload was not a JSON array")?;
        let total = rows.len();
        let candles = Self::parse_rows(rows);
        if candles.len() < total {
            log::warn!(
                "Dropped {} malformed kline rows from {}",
                total - candles.len(),
                symbol
            );
        }
        Ok(candles)
    }
}
