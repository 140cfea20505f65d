pub mod payload;
pub mod inventory;
pub mod extract;
pub mod heartbeat;
pub mod pickup_monitor;

use anyhow::Result;
use std::fmt::Display;

/// A product configured for pickup monitoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackedItem {
    /// Fully-formed fulfillment query URL; every part in the answer is reported
    FulfillmentUrl(String),
    /// Bare catalog part number; only that part is reported
    PartNumber(String),
}

impl Display for TrackedItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackedItem::FulfillmentUrl(url) => write!(f, "{}", url),
            TrackedItem::PartNumber(part) => write!(f, "{}", part),
        }
    }
}

/// Message composed by one monitoring cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Message lines in delivery order
    pub lines: Vec<String>,
}

impl Report {
    /// Final text pushed to the notifier
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Monitor trait, all types of monitors need to implement this trait
#[async_trait::async_trait]
pub trait Monitor: Send + Sync {
    /// Execute a check, returns the report to send or `None` when nothing should be sent
    async fn check(&mut self) -> Result<Option<Report>>;

    /// Get monitoring interval (seconds)
    fn interval(&self) -> u64;

    /// Human readable name used in log lines
    fn get_name(&self) -> String;
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}
