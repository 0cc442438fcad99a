pub mod telegram;

use anyhow::Result;
use async_trait::async_trait;

use crate::analysis::classifier::{Direction, Signal};

pub use telegram::TelegramAlerter;

/// Best-effort alert sink. Errors are for the caller to log; a failed send
/// must never cost the next scan cycle.
#[async_trait]
pub trait AlertDispatcher: Send + Sync {
    async fn send(&self, message: &str) -> Result<()>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Markdown alert body for a signal.
pub fn format_signal(symbol: &str, signal: &Signal, atr_multiplier: f64) -> String {
    let banner = match signal.direction {
        Direction::Ce => "🚀",
        Direction::Pe => "📉",
    };
    let mut message = format!(
        "{banner} *{symbol} {} {}*\nPrice: {}",
        signal.direction, signal.reason, signal.price
    );
    if let Some(stop) = signal.stop_loss {
        message.push_str(&format!(
            "\n🛡️ Robust SL: {:.1}\nExit: Trail with ATR-{atr_multiplier:.0}",
            stop
        ));
    }
    message
}

/// Dry-run sink: prints the alert instead of delivering it.
pub struct LogDispatcher;

#[async_trait]
impl AlertDispatcher for LogDispatcher {
    fn signature(&self) -> &'static str {
        "log only"
    }

    async fn send(&self, message: &str) -> Result<()> {
        log::info!("📋 Dry-run alert:\n{message}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier::SignalReason;

    #[test]
    fn ce_message_carries_stop_and_trail_hint() {
        let signal = Signal {
            direction: Direction::Ce,
            reason: SignalReason::Pullback,
            price: 22150.0,
            stop_loss: Some(22104.5),
        };
        let text = format_signal("NIFTY", &signal, 3.0);
        assert!(text.starts_with("🚀 *NIFTY CE PULLBACK*"));
        assert!(text.contains("Price: 22150"));
        assert!(text.contains("Robust SL: 22104.5"));
        assert!(text.contains("Trail with ATR-3"));
    }

    #[test]
    fn stopless_message_omits_the_sl_block() {
        let signal = Signal {
            direction: Direction::Pe,
            reason: SignalReason::Rejection,
            price: 22150.0,
            stop_loss: None,
        };
        let text = format_signal("NIFTY", &signal, 3.0);
        assert!(text.starts_with("📉 *NIFTY PE REJECTION*"));
        assert!(!text.contains("SL"));
        assert!(!text.contains("Trail"));
    }
}
