use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::runtime::Runtime;

use trend_sniper::alert::{AlertDispatcher, LogDispatcher, TelegramAlerter};
use trend_sniper::data::HttpKlineSource;
use trend_sniper::domain::session::market_now;
use trend_sniper::engine::{ScanOutcome, Scanner};
use trend_sniper::{Cli, Settings};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Run the scan loop on the runtime
    let rt = Runtime::new().context("failed to create Tokio runtime")?;
    rt.block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    log::info!("💎 Trend Sniper ready");

    let settings = Settings::load(&args.config);
    let session = settings.session_window()?;
    let offset = settings.market_offset()?;
    let timeout = Duration::from_secs(settings.request_timeout_sec);

    let source = HttpKlineSource::new(&settings.kline_base_url, timeout)?;
    let dispatcher: Box<dyn AlertDispatcher> = if args.dry_run {
        Box::new(LogDispatcher)
    } else {
        Box::new(TelegramAlerter::from_env(timeout)?)
    };
    let mut scanner = Scanner::new(settings.clone(), Box::new(source), dispatcher);

    loop {
        let market_time = market_now(offset);

        if args.once || session.contains(market_time) {
            log::info!(
                "🔍 Scanning {} at {}",
                settings.symbol,
                market_time.format("%H:%M:%S")
            );
            match scanner.run_cycle(market_time.timestamp_millis()).await {
                Ok(ScanOutcome::Signal(signal)) => {
                    log::info!(
                        "🎯 {} {} at {} (SL {:?})",
                        signal.direction,
                        signal.reason,
                        signal.price,
                        signal.stop_loss
                    );
                }
                Ok(ScanOutcome::NoSignal) => {}
                Ok(ScanOutcome::AlreadySeen) => {
                    log::info!("↩️ Candle already evaluated, waiting for the next close");
                }
                Err(e) => log::error!("❌ Scanner error: {e}"),
            }
            if args.once {
                return Ok(());
            }
            // Wait for the next candle to close
            tokio::time::sleep(Duration::from_secs(settings.scan_interval_min * 60)).await;
        } else {
            log::info!("💤 Outside session hours. Waiting...");
            tokio::time::sleep(Duration::from_secs(settings.idle_interval_min * 60)).await;
        }
    }
}
