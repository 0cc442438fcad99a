pub mod classifier;
pub mod indicators;

pub use classifier::{Direction, Signal, SignalReason, classify, trend_gate_passes};
pub use indicators::{EmaPeriodMap, IndicatorSnapshot, compute_snapshots, ema_series};
