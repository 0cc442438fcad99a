use serde::{Deserialize, Serialize};

// Define the CandleType enum
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CandleType {
    Bullish,
    Bearish,
}

/// One OHLC candle as served by the data provider. Volume is not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Interval open time, epoch milliseconds
    pub open_time_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(open_time_ms: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Candle {
            open_time_ms,
            open,
            high,
            low,
            close,
        }
    }

    /// A doji (close == open) counts as bullish, same as the upstream feed.
    pub fn get_type(&self) -> CandleType {
        if self.close >= self.open {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    pub fn is_bearish_body(&self) -> bool {
        self.close < self.open
    }

    pub fn is_bullish_body(&self) -> bool {
        self.close > self.open
    }
}

/// Slice off the in-progress tail of a fetched window.
///
/// Providers return the currently-forming candle as the last element. A candle
/// is closed iff its whole interval has elapsed: `open_time + interval <= now`.
/// Everything downstream only ever looks at closed candles.
pub fn closed_prefix(candles: &[Candle], interval_ms: i64, now_ms: i64) -> &[Candle] {
    let mut end = candles.len();
    while end > 0 && candles[end - 1].open_time_ms + interval_ms > now_ms {
        end -= 1;
    }
    &candles[..end]
}
