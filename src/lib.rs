// Core modules
pub mod alert;
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod utils;

// Re-export commonly used types
pub use alert::{AlertDispatcher, LogDispatcher, TelegramAlerter};
pub use analysis::{Direction, EmaPeriodMap, IndicatorSnapshot, Signal, SignalReason};
pub use config::{SCANNER, Settings};
pub use data::{CandleSource, HttpKlineSource};
pub use domain::{Candle, SessionWindow};
pub use engine::{ScanError, ScanOutcome, Scanner};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the runtime configuration file
    #[arg(long, default_value = "config.json")]
    pub config: String,

    /// Log signals instead of delivering them to Telegram
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Run a single scan immediately, ignoring the session gate, then exit
    #[arg(long, default_value_t = false)]
    pub once: bool,
}
