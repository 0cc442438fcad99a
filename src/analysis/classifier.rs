//! Rule table mapping one closed candle (plus the candle before it) to at
//! most one directional signal. Pure and stateless: everything it needs is
//! re-derived from the fetched window each cycle.

use strum_macros::Display;

use crate::analysis::indicators::IndicatorSnapshot;
use crate::domain::Candle;

/// Option side: CE is the bullish leg, PE the bearish one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Direction {
    #[strum(serialize = "CE")]
    Ce,
    #[strum(serialize = "PE")]
    Pe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SignalReason {
    #[strum(serialize = "PULLBACK")]
    Pullback,
    #[strum(serialize = "MOMENTUM")]
    Momentum,
    #[strum(serialize = "REJECTION")]
    Rejection,
}

/// A transient trade prompt. Never persisted; at most one per scan cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub direction: Direction,
    pub reason: SignalReason,
    pub price: f64,
    /// Absent until ATR is warm
    pub stop_loss: Option<f64>,
}

/// ADX trend-strength gate, checked once before the rule table. A configured
/// threshold with a cold ADX suppresses classification outright.
pub fn trend_gate_passes(snapshot: &IndicatorSnapshot, threshold: Option<f64>) -> bool {
    match (threshold, snapshot.adx) {
        (None, _) => true,
        (Some(min), Some(adx)) => adx > min,
        (Some(_), None) => false,
    }
}

/// Evaluate the rule table in priority order; the first match wins.
///
/// 1. PE REJECTION: tagged the slow EMA from below and closed back under it
/// 2. CE PULLBACK: uptrend, dipped into the fast EMA, closed back above
/// 3. CE MOMENTUM: uptrend, close crossed up through the fast EMA
/// 4. PE PULLBACK: downtrend, poked the fast EMA, closed back below
/// 5. PE MOMENTUM: downtrend, close crossed down through the fast EMA
///
/// The rejection row outranks everything: a reversal off the slow average is
/// the strongest read even when a pullback rule would also match.
pub fn classify(
    current: &Candle,
    cur: &IndicatorSnapshot,
    previous: &Candle,
    prev: &IndicatorSnapshot,
    atr_multiplier: f64,
) -> Option<Signal> {
    let close = current.close;

    let matched = if current.high >= cur.ema_slow && close < cur.ema_slow && current.is_bearish_body()
    {
        Some((Direction::Pe, SignalReason::Rejection))
    } else if close > cur.ema_mid
        && current.low <= cur.ema_fast
        && close > cur.ema_fast
        && current.is_bullish_body()
    {
        Some((Direction::Ce, SignalReason::Pullback))
    } else if close > cur.ema_mid && close > cur.ema_fast && previous.close <= prev.ema_fast {
        Some((Direction::Ce, SignalReason::Momentum))
    } else if close < cur.ema_mid
        && current.high >= cur.ema_fast
        && close < cur.ema_fast
        && current.is_bearish_body()
    {
        Some((Direction::Pe, SignalReason::Pullback))
    } else if close < cur.ema_mid && close < cur.ema_fast && previous.close >= prev.ema_fast {
        Some((Direction::Pe, SignalReason::Momentum))
    } else {
        None
    };

    matched.map(|(direction, reason)| {
        let stop_loss = cur.atr.map(|atr| {
            let distance = atr * atr_multiplier;
            match direction {
                Direction::Ce => close - distance,
                Direction::Pe => close + distance,
            }
        });
        Signal {
            direction,
            reason,
            price: close,
            stop_loss,
        }
    })
}
