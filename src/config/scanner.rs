//! Scanner and indicator configuration

use crate::utils::TimeUtils;

/// EMA periods driving the classifier
pub struct EmaDefaults {
    /// Pullback / momentum trigger average
    pub fast: usize,
    /// Trend filter average
    pub mid: usize,
    /// Rejection level average
    pub slow: usize,
}

/// Volatility indicator settings
pub struct VolatilityDefaults {
    pub atr_period: usize,
    // Stop distance = ATR * multiplier, placed against the signal direction
    pub atr_multiplier: f64,
    pub adx_period: usize,
    pub adx_threshold: f64,
}

/// The Master Scanner Configuration
pub struct ScannerConfig {
    // Candle interval everything runs on
    pub interval_ms: i64,
    // Candles requested per fetch. Needs to cover twice the slowest EMA
    // period plus ADX warm-up, with headroom for the in-progress tail.
    pub lookback: u32,
    pub scan_interval_min: u64,
    pub idle_interval_min: u64,

    // Sub-groups
    pub ema: EmaDefaults,
    pub volatility: VolatilityDefaults,
}

pub const SCANNER: ScannerConfig = ScannerConfig {
    interval_ms: TimeUtils::MS_IN_5_MIN,
    lookback: 120,
    scan_interval_min: 5,
    idle_interval_min: 10,

    ema: EmaDefaults {
        fast: 9,
        mid: 21,
        slow: 33,
    },

    volatility: VolatilityDefaults {
        atr_period: 14,
        atr_multiplier: 3.0,
        adx_period: 14,
        adx_threshold: 20.0,
    },
};
