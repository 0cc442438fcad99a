//! Runtime settings loaded from `config.json`.
//!
//! Every field has a default, so a missing or partial file never stops the
//! scanner. Telegram credentials live in the environment, not here.

use anyhow::{Result, anyhow, bail};
use chrono::{FixedOffset, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::SCANNER;
use crate::domain::SessionWindow;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Instrument symbol as the kline endpoint expects it
    pub symbol: String,
    /// Session open in market-local time, `[hour, minute]`
    pub session_start: [u32; 2],
    /// Session close in market-local time, `[hour, minute]`
    pub session_end: [u32; 2],
    pub scan_interval_min: u64,
    pub idle_interval_min: u64,
    /// Market timezone as minutes east of UTC (330 = IST)
    pub utc_offset_min: i32,
    pub atr_multiplier: f64,
    /// Minimum ADX for any signal to fire. `None` disables the gate.
    pub adx_threshold: Option<f64>,
    /// Requested EMA periods: fast, mid, slow
    pub ema_periods: [usize; 3],
    /// Provider period remaps, e.g. `[[9, 10], [21, 20], [33, 30]]` when the
    /// source only serves round periods. Applied explicitly and logged.
    pub period_substitutions: Vec<(usize, usize)>,
    pub lookback: u32,
    pub kline_base_url: String,
    pub request_timeout_sec: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            symbol: "NIFTY".to_string(),
            session_start: [9, 45],
            session_end: [15, 0],
            scan_interval_min: SCANNER.scan_interval_min,
            idle_interval_min: SCANNER.idle_interval_min,
            utc_offset_min: 330,
            atr_multiplier: SCANNER.volatility.atr_multiplier,
            adx_threshold: Some(SCANNER.volatility.adx_threshold),
            ema_periods: [SCANNER.ema.fast, SCANNER.ema.mid, SCANNER.ema.slow],
            period_substitutions: Vec::new(),
            lookback: SCANNER.lookback,
            kline_base_url: "https://api.example-market-data.com/v1".to_string(),
            request_timeout_sec: 10,
        }
    }
}

impl Settings {
    /// Load from `path`, falling back to full defaults when the file is
    /// missing or unreadable. A malformed file is a warning, not a crash.
    pub fn load(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(settings) => {
                    log::info!("Loaded runtime settings from {path}");
                    settings
                }
                Err(e) => {
                    log::warn!("⚠️ Could not parse {path} ({e}). Using defaults.");
                    Settings::default()
                }
            },
            Err(_) => {
                log::warn!("⚠️ No config file at {path}. Using defaults.");
                Settings::default()
            }
        }
    }

    pub fn session_window(&self) -> Result<SessionWindow> {
        let [sh, sm] = self.session_start;
        let [eh, em] = self.session_end;
        let start = NaiveTime::from_hms_opt(sh, sm, 0)
            .ok_or_else(|| anyhow!("invalid session_start {:?}", self.session_start))?;
        let end = NaiveTime::from_hms_opt(eh, em, 0)
            .ok_or_else(|| anyhow!("invalid session_end {:?}", self.session_end))?;
        if end < start {
            bail!("session_end {end} precedes session_start {start}");
        }
        Ok(SessionWindow::new(start, end))
    }

    pub fn market_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_min * 60)
            .ok_or_else(|| anyhow!("invalid utc_offset_min {}", self.utc_offset_min))
    }
}
