use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::monitors::TrackedItem;

/// Default fulfillment endpoint used for part-number items
pub const DEFAULT_FULFILLMENT_ENDPOINT: &str = "https://www.apple.com/tw/shop/fulfillment-messages";
/// LINE Messaging API push endpoint
pub const DEFAULT_PUSH_ENDPOINT: &str = "https://api.line.me/v2/bot/message/push";
/// Seconds between two cycles
pub const DEFAULT_INTERVAL_SECS: u64 = 30;
/// Seconds between two heartbeat lines
pub const DEFAULT_HEARTBEAT_INTERVAL_SECS: i64 = 86_400;

/// Errors raised while loading the configuration file. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config file {path} lists neither fulfillmentUrls nor partNumbers")]
    NoTrackedItems { path: PathBuf },

    #[error("invalid {field} in config file {path}: {reason}")]
    InvalidValue {
        path: PathBuf,
        field: &'static str,
        reason: String,
    },
}

/// Monitor configuration, read once at startup
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// LINE user that receives the pushes
    pub user_id: String,
    /// LINE channel access token
    pub channel_access_token: String,
    /// Fully-formed fulfillment query URLs
    pub fulfillment_urls: Option<Vec<String>>,
    /// Bare catalog part numbers
    pub part_numbers: Option<Vec<String>>,
    #[serde(default = "default_fulfillment_endpoint")]
    pub fulfillment_endpoint: String,
    #[serde(default = "default_push_endpoint")]
    pub push_endpoint: String,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_heartbeat_interval_secs")]
    pub heartbeat_interval_secs: i64,
    /// Skip the push when a cycle has nothing to say
    #[serde(default)]
    pub suppress_empty_notifications: bool,
}

fn default_fulfillment_endpoint() -> String {
    DEFAULT_FULFILLMENT_ENDPOINT.to_string()
}

fn default_push_endpoint() -> String {
    DEFAULT_PUSH_ENDPOINT.to_string()
}

fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_heartbeat_interval_secs() -> i64 {
    DEFAULT_HEARTBEAT_INTERVAL_SECS
}

impl Config {
    /// Load and parse the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if config.fulfillment_urls.is_none() && config.part_numbers.is_none() {
            return Err(ConfigError::NoTrackedItems {
                path: path.to_path_buf(),
            });
        }

        if config.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                path: path.to_path_buf(),
                field: "intervalSecs",
                reason: "must be at least 1 second".to_string(),
            });
        }

        if config.heartbeat_interval_secs < 1 {
            return Err(ConfigError::InvalidValue {
                path: path.to_path_buf(),
                field: "heartbeatIntervalSecs",
                reason: format!("must be at least 1 second, got {}", config.heartbeat_interval_secs),
            });
        }

        Ok(config)
    }

    /// Tracked items in check order: URLs first, then part numbers
    pub fn tracked_items(&self) -> Vec<TrackedItem> {
        let urls = self
            .fulfillment_urls
            .iter()
            .flatten()
            .map(|url| TrackedItem::FulfillmentUrl(url.clone()));
        let parts = self
            .part_numbers
            .iter()
            .flatten()
            .map(|part| TrackedItem::PartNumber(part.clone()));

        urls.chain(parts).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitors::inventory::InventoryFetcher;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(json.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn loads_minimal_url_config_with_defaults() {
        let file = write_config(
            r#"{
                "userId": "U123",
                "channelAccessToken": "secret",
                "fulfillmentUrls": ["https://example.com/a", "https://example.com/b"]
            }"#,
        );

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.user_id, "U123");
        assert_eq!(config.channel_access_token, "secret");
        assert_eq!(config.interval_secs, 30);
        assert_eq!(config.heartbeat_interval_secs, 86_400);
        assert!(!config.suppress_empty_notifications);
        assert_eq!(
            config.tracked_items(),
            vec![
                TrackedItem::FulfillmentUrl("https://example.com/a".to_string()),
                TrackedItem::FulfillmentUrl("https://example.com/b".to_string()),
            ]
        );
    }

    #[test]
    fn urls_come_before_part_numbers() {
        let file = write_config(
            r#"{
                "userId": "U123",
                "channelAccessToken": "secret",
                "partNumbers": ["MQ8T3TA/A"],
                "fulfillmentUrls": ["https://example.com/a"],
                "suppressEmptyNotifications": true,
                "intervalSecs": 5
            }"#,
        );

        let config = Config::load(file.path()).unwrap();
        assert!(config.suppress_empty_notifications);
        assert_eq!(config.interval_secs, 5);
        assert_eq!(
            config.tracked_items(),
            vec![
                TrackedItem::FulfillmentUrl("https://example.com/a".to_string()),
                TrackedItem::PartNumber("MQ8T3TA/A".to_string()),
            ]
        );
    }

    #[test]
    fn empty_list_is_accepted() {
        let file = write_config(r#"{"userId": "U", "channelAccessToken": "t", "partNumbers": []}"#);
        let config = Config::load(file.path()).unwrap();
        assert!(config.tracked_items().is_empty());
    }

    #[test]
    fn missing_tracked_items_is_rejected() {
        let file = write_config(r#"{"userId": "U", "channelAccessToken": "t"}"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NoTrackedItems { .. }), "got: {err:?}");
    }

    #[test]
    fn missing_token_is_a_parse_error() {
        let file = write_config(r#"{"userId": "U", "partNumbers": ["X"]}"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got: {err:?}");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let file = write_config("{not json");
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn unreadable_file_is_a_read_error() {
        let err = Config::load("/definitely/not/here/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }), "got: {err:?}");
    }

    #[test]
    fn zero_interval_is_rejected() {
        let file = write_config(
            r#"{"userId": "U", "channelAccessToken": "t", "partNumbers": ["X"], "intervalSecs": 0}"#,
        );
        let err = Config::load(file.path()).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { field: "intervalSecs", .. }),
            "got: {err:?}"
        );
    }

    #[test]
    fn non_positive_heartbeat_interval_is_rejected() {
        for value in ["-5", "0"] {
            let file = write_config(&format!(
                r#"{{"userId": "U", "channelAccessToken": "t", "partNumbers": ["X"], "heartbeatIntervalSecs": {value}}}"#
            ));
            let err = Config::load(file.path()).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { field: "heartbeatIntervalSecs", .. }),
                "got: {err:?}"
            );
        }
    }

    #[test]
    fn location_key_is_not_configurable() {
        let file = write_config(
            r#"{"userId": "U", "channelAccessToken": "t", "partNumbers": ["X"], "location": "99999"}"#,
        );
        let config = Config::load(file.path()).unwrap();
        let fetcher = InventoryFetcher::new(&config.fulfillment_endpoint);
        let url = fetcher.build_url(&config.tracked_items()[0], 0).unwrap();
        assert!(url.as_str().contains("location=11061"), "got: {url}");
    }
}
