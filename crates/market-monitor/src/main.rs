//! Cross-asset market monitor: reads a snapshot of indicator readings, runs the
//! five-expert advisory engine and reports the ranked result.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use advisory_core::MarketSnapshot;
use advisory_engine::AdvisoryEngine;
use anyhow::{Context, Result};
use clap::Parser;
use notification_service::{NotificationService, SummaryReport};
use tokio::signal::unix::SignalKind;
use tokio::time;

mod config;

use config::MonitorConfig;

#[derive(Parser, Debug)]
#[command(name = "market-monitor")]
#[command(about = "Multi-expert consensus advisory over a market snapshot", long_about = None)]
struct Args {
    /// Snapshot file, overrides SNAPSHOT_PATH
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Push the summary to Telegram
    #[arg(short, long)]
    telegram: bool,

    /// Rerun every UPDATE_INTERVAL_SECS until interrupted; every run is pushed
    #[arg(short, long)]
    schedule: bool,

    /// Include every expert's reasoning in the console report
    #[arg(short, long)]
    verbose: bool,

    /// Print ranked recommendations as JSON instead of the console report
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Scheduled runs always push.
    fn push_summary(&self) -> bool {
        self.telegram || self.schedule
    }
}

struct Monitor {
    engine: AdvisoryEngine,
    config: MonitorConfig,
    notifier: Option<NotificationService>,
    verbose: bool,
    json: bool,
}

impl Monitor {
    async fn run_cycle(&self) -> Result<()> {
        let started = Instant::now();
        let path = &self.config.snapshot_path;

        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let snapshot = MarketSnapshot::from_json(&raw)
            .with_context(|| format!("Invalid snapshot {}", path.display()))?;

        let recommendations = self.engine.analyze_all(&snapshot);
        let top_picks = self
            .engine
            .get_top_picks(&recommendations, self.config.top_picks);
        let leaders = self.engine.get_category_leaders(&recommendations);
        let report = SummaryReport::new(&recommendations, top_picks, leaders);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&recommendations)?);
        } else {
            print!("{}", report.render_console(self.verbose));
        }

        if let Some(notifier) = &self.notifier {
            let delivered = notifier.send_summary(&report).await;
            tracing::info!("Summary delivered to {} channel(s)", delivered);
        }

        tracing::info!(
            "Cycle complete: {} recommendations, {} top picks in {:.1}ms",
            recommendations.len(),
            report.top_picks.len(),
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let default_filter = "market_monitor=info,advisory_engine=info";
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
            )
            .init();
    }

    let args = Args::parse();

    let mut config = MonitorConfig::from_env()?;
    if let Some(path) = args.snapshot.clone() {
        config.snapshot_path = path;
    }
    tracing::info!("Configuration loaded");
    tracing::info!("  Snapshot: {}", config.snapshot_path.display());
    tracing::info!("  Expert weights: {:?}", config.weights.as_array());
    tracing::info!("  Top picks: {}", config.top_picks);

    let notifier = args
        .push_summary()
        .then(|| NotificationService::new(&config.notifications));

    let interval_secs = config.update_interval_secs;
    let monitor = Monitor {
        engine: AdvisoryEngine::new().with_weights(config.weights),
        config,
        notifier,
        verbose: args.verbose,
        json: args.json,
    };

    if !args.schedule {
        return monitor.run_cycle().await;
    }

    tracing::info!("Scheduled mode, running every {} seconds (Ctrl+C to stop)", interval_secs);

    let mut interval = time::interval(Duration::from_secs(interval_secs));
    let mut sigterm = tokio::signal::unix::signal(SignalKind::terminate())?;
    let shutdown = async {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received SIGINT");
            }
            _ = sigterm.recv() => {
                tracing::info!("Received SIGTERM");
            }
        }
    };
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = monitor.run_cycle().await {
                    tracing::error!("Error in monitoring cycle: {:#}", e);
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutting down market monitor");
                break;
            }
        }
    }

    Ok(())
}
