use anyhow::Result;
use log::{debug, error, info};

use crate::config::Config;
use crate::monitors::extract::availability_lines;
use crate::monitors::heartbeat::{HeartbeatGate, HEARTBEAT_LINE};
use crate::monitors::inventory::InventoryFetcher;
use crate::monitors::{Monitor, Report, TrackedItem};
use crate::utils::{format_timestamp, unix_now};

/// Store pickup monitor, checks every tracked item once per cycle
pub struct PickupMonitor {
    /// Items to check, in report order
    items: Vec<TrackedItem>,
    /// Inventory fetcher
    fetcher: InventoryFetcher,
    /// Heartbeat state
    heartbeat: HeartbeatGate,
    /// Monitoring interval (seconds)
    interval_secs: u64,
    /// Return no report when a cycle has nothing to say
    suppress_empty: bool,
}

impl PickupMonitor {
    pub fn new(
        items: Vec<TrackedItem>,
        fetcher: InventoryFetcher,
        heartbeat: HeartbeatGate,
        interval_secs: u64,
        suppress_empty: bool,
    ) -> Self {
        Self {
            items,
            fetcher,
            heartbeat,
            interval_secs,
            suppress_empty,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.tracked_items(),
            InventoryFetcher::new(&config.fulfillment_endpoint),
            HeartbeatGate::new(config.heartbeat_interval_secs),
            config.interval_secs,
            config.suppress_empty_notifications,
        )
    }

    /// Fetch every item in order and collect its availability lines.
    /// An item whose fetch fails contributes nothing.
    async fn collect_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for (idx, item) in self.items.iter().enumerate() {
            info!("{}. Checking {} ...", idx + 1, item);
            match self.fetcher.fetch(item).await {
                Ok(payload) => {
                    let before = lines.len();
                    lines.extend(availability_lines(&payload, item).map(|line| line.to_string()));
                    debug!("{} available line(s) for {}", lines.len() - before, item);
                }
                Err(e) => {
                    error!("Failed to check {}: {}", item, e);
                }
            }
        }

        lines
    }

    /// Run one cycle. `clock` is read once every item has been fetched.
    pub async fn run_cycle<C>(&mut self, clock: C) -> Option<Report>
    where
        C: FnOnce() -> i64 + Send,
    {
        let lines = self.collect_lines().await;

        let now = clock();
        let heartbeat = self.heartbeat.check(now);
        if heartbeat {
            info!("Adding heartbeat line ({})", format_timestamp(now));
        } else {
            debug!(
                "Heartbeat not due, last one at {}",
                format_timestamp(self.heartbeat.last_heartbeat())
            );
        }

        let report = compose(heartbeat, lines);
        if report.is_empty() && self.suppress_empty {
            debug!("Nothing to report, skipping notification");
            return None;
        }

        Some(report)
    }
}

/// Build the cycle report, putting the heartbeat line ahead of all availability lines
pub fn compose(heartbeat: bool, lines: Vec<String>) -> Report {
    if !heartbeat {
        return Report { lines };
    }

    let mut all = Vec::with_capacity(lines.len() + 1);
    all.push(HEARTBEAT_LINE.to_string());
    all.extend(lines);
    Report { lines: all }
}

#[async_trait::async_trait]
impl Monitor for PickupMonitor {
    async fn check(&mut self) -> Result<Option<Report>> {
        Ok(self.run_cycle(unix_now).await)
    }

    fn interval(&self) -> u64 {
        self.interval_secs
    }

    fn get_name(&self) -> String {
        format!("Pickup monitor for {} item(s)", self.items.len())
    }
}
