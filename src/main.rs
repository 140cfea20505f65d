use std::path::PathBuf;
use clap::Parser;
use log::{info, error};
use anyhow::Result;
use dotenv::dotenv;

mod config;
mod monitors;
mod notifiers;
mod utils;

use config::Config;
use monitors::{pickup_monitor::PickupMonitor, Monitor};
use notifiers::line::LineNotifier;
use notifiers::Notifier;

/// A tool for monitoring store pickup availability and pushing LINE notifications
#[derive(Parser)]
#[command(name = "pickup_monitor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,

    /// Run a single check cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let cli = Cli::parse();

    info!("Loading settings from config file: {:?}", cli.config);
    let config = Config::load(&cli.config)?;

    let monitor = PickupMonitor::from_config(&config);
    let notifier = LineNotifier::new(
        &config.push_endpoint,
        &config.user_id,
        &config.channel_access_token,
    );

    info!("Starting {}", monitor.get_name());
    run_monitor(monitor, notifier, cli.once).await
}

async fn run_monitor<M: Monitor, N: Notifier>(mut monitor: M, notifier: N, once: bool) -> Result<()> {
    loop {
        info!("Start to check product...");
        match monitor.check().await {
            Ok(Some(report)) => {
                if let Err(e) = notifier.send(&report.to_string()).await {
                    error!("Failed to send notification: {}", e);
                }
            }
            Ok(None) => {
                info!("Nothing to report");
            }
            Err(e) => {
                error!("Error during monitoring: {}", e);
            }
        }
        info!("Finish checking product.");

        if once {
            return Ok(());
        }

        // Wait for next check
        tokio::time::sleep(std::time::Duration::from_secs(monitor.interval())).await;
    }
}
