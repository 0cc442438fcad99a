pub mod klines;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::Candle;

pub use klines::HttpKlineSource;

/// Anything that can serve a recent candle window for a symbol.
/// The returned candles are ordered oldest first; the last element may be an
/// in-progress interval, which the engine splits off itself.
#[async_trait]
pub trait CandleSource: Send + Sync {
    async fn fetch_window(
        &self,
        symbol: &str,
        interval_ms: i64,
        lookback: u32,
    ) -> Result<Vec<Candle>>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}
