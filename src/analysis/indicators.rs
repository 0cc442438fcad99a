//! Pure indicator math over closed candle windows.
//!
//! No I/O, no side effects beyond the one-off substitution log. EMA is seeded
//! with the first close (not an SMA warm-up) so a recomputation over the same
//! window is bit-for-bit identical, and every value is strictly causal: the
//! snapshot at index `i` only sees candles `0..=i`.

use itertools::Itertools;

use crate::config::scanner::VolatilityDefaults;
use crate::domain::Candle;

/// Per-candle indicator values. `atr`/`adx` stay `None` until their lookback
/// is warm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub ema_fast: f64,
    pub ema_mid: f64,
    pub ema_slow: f64,
    pub atr: Option<f64>,
    pub adx: Option<f64>,
}

/// Requested EMA periods and the periods actually computed after applying
/// the provider substitution table. Kept separate so a remap (e.g. EMA10
/// standing in for EMA9) is visible in logs instead of silently shifting
/// signal timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmaPeriodMap {
    pub requested: [usize; 3],
    pub effective: [usize; 3],
}

impl EmaPeriodMap {
    pub fn new(requested: [usize; 3], substitutions: &[(usize, usize)]) -> Self {
        let effective = requested.map(|period| {
            substitutions
                .iter()
                .find(|(from, _)| *from == period)
                .map(|(_, to)| *to)
                .unwrap_or(period)
        });
        EmaPeriodMap {
            requested,
            effective,
        }
    }

    pub fn fast(&self) -> usize {
        self.effective[0]
    }

    pub fn mid(&self) -> usize {
        self.effective[1]
    }

    pub fn slow(&self) -> usize {
        self.effective[2]
    }

    pub fn max_period(&self) -> usize {
        self.effective.iter().copied().max().unwrap_or(0)
    }

    /// Closed candles needed before classification is attempted.
    pub fn min_candles(&self) -> usize {
        self.max_period() + 2
    }

    /// Warn once per process about every remapped period.
    pub fn announce(&self) {
        for (req, eff) in self.requested.iter().zip(self.effective.iter()) {
            if req != eff {
                log::warn!("EMA{req} remapped to EMA{eff} to match the data provider's periods");
            }
        }
    }
}

/// EMA over closes: `ema[0] = close[0]`, then
/// `ema[i] = α·close[i] + (1-α)·ema[i-1]` with `α = 2/(period+1)`.
pub fn ema_series(closes: &[f64], period: usize) -> Vec<f64> {
    if closes.is_empty() || period == 0 {
        return Vec::new();
    }
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut prev = closes[0];
    let mut out = Vec::with_capacity(closes.len());
    out.push(prev);
    for &close in &closes[1..] {
        prev = alpha * close + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}

/// `TR[i] = max(H-L, |H-prevC|, |L-prevC|)` for candles `1..n`.
fn true_ranges(candles: &[Candle]) -> Vec<f64> {
    candles
        .iter()
        .tuple_windows()
        .map(|(prev, cur): (&Candle, &Candle)| {
            let hl = cur.high - cur.low;
            let hc = (cur.high - prev.close).abs();
            let lc = (cur.low - prev.close).abs();
            hl.max(hc).max(lc)
        })
        .collect()
}

/// Rolling plain-mean ATR: the value at candle `i` averages the last
/// `period` true ranges ending at candle `i`. `None` until warm. Only feeds
/// the stop distance, never the directional decision.
fn atr_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let n = candles.len();
    let mut out = vec![None; n];
    if period == 0 || n < period + 1 {
        return out;
    }
    let trs = true_ranges(candles);
    let mut rolling: f64 = trs[..period].iter().sum();
    out[period] = Some(rolling / period as f64);
    for j in period..trs.len() {
        rolling += trs[j] - trs[j - period];
        out[j + 1] = Some(rolling / period as f64);
    }
    out
}

/// Wilder's ADX. First value appears at candle `2*period - 1` (seed smoothing
/// plus the DX average warm-up).
fn adx_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let n = candles.len();
    let mut out = vec![None; n];
    if period == 0 || n < 2 * period {
        return out;
    }

    let trs = true_ranges(candles);
    let mut plus_dm = Vec::with_capacity(n - 1);
    let mut minus_dm = Vec::with_capacity(n - 1);
    for (prev, cur) in candles.iter().tuple_windows::<(&Candle, &Candle)>() {
        let up = cur.high - prev.high;
        let down = prev.low - cur.low;
        plus_dm.push(if up > down && up > 0.0 { up } else { 0.0 });
        minus_dm.push(if down > up && down > 0.0 { down } else { 0.0 });
    }

    let period_f = period as f64;
    let mut sm_tr = 0.0;
    let mut sm_plus = 0.0;
    let mut sm_minus = 0.0;
    let mut dx_seen = 0usize;
    let mut dx_acc = 0.0;
    let mut adx: Option<f64> = None;

    for j in 0..trs.len() {
        if j < period {
            // Seed phase: accumulate the first `period` bars
            sm_tr += trs[j];
            sm_plus += plus_dm[j];
            sm_minus += minus_dm[j];
            if j + 1 < period {
                continue;
            }
        } else {
            sm_tr = sm_tr - sm_tr / period_f + trs[j];
            sm_plus = sm_plus - sm_plus / period_f + plus_dm[j];
            sm_minus = sm_minus - sm_minus / period_f + minus_dm[j];
        }

        let (di_plus, di_minus) = if sm_tr > 0.0 {
            (100.0 * sm_plus / sm_tr, 100.0 * sm_minus / sm_tr)
        } else {
            (0.0, 0.0)
        };
        let di_sum = di_plus + di_minus;
        let dx = if di_sum > 0.0 {
            100.0 * (di_plus - di_minus).abs() / di_sum
        } else {
            0.0
        };

        dx_seen += 1;
        if dx_seen <= period {
            dx_acc += dx;
            if dx_seen == period {
                adx = Some(dx_acc / period_f);
            }
        } else if let Some(prev) = adx {
            adx = Some((prev * (period_f - 1.0) + dx) / period_f);
        }

        if let Some(val) = adx {
            out[j + 1] = Some(val);
        }
    }

    out
}

/// One snapshot per candle. Callers must have length-checked the window
/// against [`EmaPeriodMap::min_candles`] first.
pub fn compute_snapshots(
    candles: &[Candle],
    periods: &EmaPeriodMap,
    volatility: &VolatilityDefaults,
) -> Vec<IndicatorSnapshot> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let fast = ema_series(&closes, periods.fast());
    let mid = ema_series(&closes, periods.mid());
    let slow = ema_series(&closes, periods.slow());
    let atr = atr_series(candles, volatility.atr_period);
    let adx = adx_series(candles, volatility.adx_period);

    (0..candles.len())
        .map(|i| IndicatorSnapshot {
            ema_fast: fast[i],
            ema_mid: mid[i],
            ema_slow: slow[i],
            atr: atr[i],
            adx: adx[i],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SCANNER;

    fn flat_candle(i: usize, price: f64) -> Candle {
        Candle::new(i as i64 * 300_000, price, price, price, price)
    }

    fn trending_candle(i: usize) -> Candle {
        let base = 100.0 + i as f64 * 2.0;
        Candle::new(i as i64 * 300_000, base, base + 1.5, base - 0.5, base + 1.0)
    }

    #[test]
    fn ema_is_seeded_with_first_close() {
        let closes = [50.0, 60.0];
        let out = ema_series(&closes, 9);
        assert_eq!(out[0], 50.0);
        let alpha = 2.0 / 10.0;
        assert!((out[1] - (alpha * 60.0 + (1.0 - alpha) * 50.0)).abs() < 1e-12);
    }

    #[test]
    fn ema_prefix_and_full_runs_agree() {
        // Causality: extending the window never rewrites earlier values
        let closes: Vec<f64> = (0..70).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        for period in [9, 21, 33] {
            let full = ema_series(&closes, period);
            let prefix = ema_series(&closes[..50], period);
            for i in 0..50 {
                assert_eq!(full[i], prefix[i], "period {period} diverged at index {i}");
            }
        }
    }

    #[test]
    fn flat_series_pins_every_ema_to_the_constant() {
        let candles: Vec<Candle> = (0..80).map(|i| flat_candle(i, 250.0)).collect();
        let periods = EmaPeriodMap::new([9, 21, 33], &[]);
        let snapshots = compute_snapshots(&candles, &periods, &SCANNER.volatility);
        for snap in &snapshots {
            assert_eq!(snap.ema_fast, 250.0);
            assert_eq!(snap.ema_mid, 250.0);
            assert_eq!(snap.ema_slow, 250.0);
        }
        // Zero range everywhere means zero ATR once warm
        assert_eq!(snapshots.last().unwrap().atr, Some(0.0));
    }

    #[test]
    fn atr_warms_up_after_period_plus_one_candles() {
        let candles: Vec<Candle> = (0..20)
            .map(|i| Candle::new(i as i64 * 300_000, 100.0, 104.0, 96.0, 100.0))
            .collect();
        let atr = atr_series(&candles, 14);
        assert_eq!(atr[13], None);
        // Constant 8-point range, no gaps: ATR is exactly the range
        assert_eq!(atr[14], Some(8.0));
        assert_eq!(atr[19], Some(8.0));
    }

    #[test]
    fn adx_sees_a_strong_trend() {
        let candles: Vec<Candle> = (0..60).map(trending_candle).collect();
        let adx = adx_series(&candles, 14);
        assert_eq!(adx[26], None, "ADX needs 2*period candles");
        let last = adx[59].expect("warm ADX");
        assert!(last > 90.0, "one-way trend should max out ADX, got {last}");
    }

    #[test]
    fn adx_is_none_on_short_windows() {
        let candles: Vec<Candle> = (0..20).map(trending_candle).collect();
        assert!(adx_series(&candles, 14).iter().all(Option::is_none));
    }

    #[test]
    fn period_substitution_is_explicit() {
        let map = EmaPeriodMap::new([9, 21, 33], &[(9, 10), (21, 20), (33, 30)]);
        assert_eq!(map.effective, [10, 20, 30]);
        assert_eq!(map.requested, [9, 21, 33]);
        assert_eq!(map.min_candles(), 32);

        let untouched = EmaPeriodMap::new([9, 21, 33], &[]);
        assert_eq!(untouched.effective, [9, 21, 33]);
        assert_eq!(untouched.min_candles(), 35);
    }
}
