//! One scan cycle: fetch, split the in-progress tail, compute, classify,
//! dispatch. Every failure is contained within the cycle; the next scheduled
//! cycle is the retry.

use thiserror::Error;

use crate::alert::{self, AlertDispatcher};
use crate::analysis::classifier::{Signal, classify, trend_gate_passes};
use crate::analysis::indicators::{EmaPeriodMap, compute_snapshots};
use crate::config::{SCANNER, Settings};
use crate::data::CandleSource;
use crate::domain::closed_prefix;
use crate::utils::time_utils::epoch_ms_to_hhmm;

/// Why a cycle aborted. Neither kind is fatal to the loop.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("data fetch failed: {0}")]
    DataFetch(String),
    #[error("insufficient data: {0}")]
    InsufficientData(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Signal(Signal),
    NoSignal,
    /// The fetch landed on a closed candle this scanner already evaluated
    /// (late or stale provider data). Skipped so it cannot re-alert.
    AlreadySeen,
}

pub struct Scanner {
    settings: Settings,
    periods: EmaPeriodMap,
    source: Box<dyn CandleSource>,
    dispatcher: Box<dyn AlertDispatcher>,
    /// Open time of the last candle classified. Loop-level dedup only; the
    /// classifier itself stays a pure function of the fetched window.
    last_evaluated_open_ms: Option<i64>,
}

impl Scanner {
    pub fn new(
        settings: Settings,
        source: Box<dyn CandleSource>,
        dispatcher: Box<dyn AlertDispatcher>,
    ) -> Self {
        let periods = EmaPeriodMap::new(settings.ema_periods, &settings.period_substitutions);
        periods.announce();
        if (settings.lookback as usize) < periods.min_candles() {
            log::warn!(
                "⚠️ lookback {} cannot cover the {} candles classification needs; every cycle will abort",
                settings.lookback,
                periods.min_candles()
            );
        }
        log::info!(
            "Scanner wired: {} candles from {}, alerts via {}",
            settings.lookback,
            source.signature(),
            dispatcher.signature()
        );
        Scanner {
            settings,
            periods,
            source,
            dispatcher,
            last_evaluated_open_ms: None,
        }
    }

    pub async fn run_cycle(&mut self, now_ms: i64) -> Result<ScanOutcome, ScanError> {
        let window = self
            .source
            .fetch_window(
                &self.settings.symbol,
                SCANNER.interval_ms,
                self.settings.lookback,
            )
            .await
            .map_err(|e| ScanError::DataFetch(e.to_string()))?;
        if window.is_empty() {
            return Err(ScanError::DataFetch("empty candle payload".to_string()));
        }

        let closed = closed_prefix(&window, SCANNER.interval_ms, now_ms);
        let needed = self.periods.min_candles();
        if closed.len() < needed {
            return Err(ScanError::InsufficientData(format!(
                "{} closed candles, need {}",
                closed.len(),
                needed
            )));
        }

        let current = closed[closed.len() - 1];
        let previous = closed[closed.len() - 2];
        if self.last_evaluated_open_ms == Some(current.open_time_ms) {
            return Ok(ScanOutcome::AlreadySeen);
        }
        self.last_evaluated_open_ms = Some(current.open_time_ms);
        log::info!(
            "Evaluating candle opened {} close={}",
            epoch_ms_to_hhmm(current.open_time_ms),
            current.close
        );

        let snapshots = compute_snapshots(closed, &self.periods, &SCANNER.volatility);
        let cur_snap = &snapshots[snapshots.len() - 1];
        let prev_snap = &snapshots[snapshots.len() - 2];

        if !trend_gate_passes(cur_snap, self.settings.adx_threshold) {
            log::info!("Trend gate closed (ADX {:?}), holding fire", cur_snap.adx);
            return Ok(ScanOutcome::NoSignal);
        }

        match classify(
            &current,
            cur_snap,
            &previous,
            prev_snap,
            self.settings.atr_multiplier,
        ) {
            Some(signal) => {
                let text = alert::format_signal(
                    &self.settings.symbol,
                    &signal,
                    self.settings.atr_multiplier,
                );
                if let Err(e) = self.dispatcher.send(&text).await {
                    log::error!("❌ Alert dispatch failed: {e}");
                }
                Ok(ScanOutcome::Signal(signal))
            }
            None => Ok(ScanOutcome::NoSignal),
        }
    }
}
