use chrono::{TimeZone, Utc};
use log::error;

/// Current unix time in seconds
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Current unix time in milliseconds, used as cache buster
pub fn unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a unix timestamp (seconds) to readable local time
pub fn format_timestamp(timestamp_secs: i64) -> String {
    match chrono::Local.timestamp_opt(timestamp_secs, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        _ => {
            error!("Invalid timestamp: {}", timestamp_secs);
            String::from("Time format error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_and_seconds_agree() {
        let secs = unix_now();
        let millis = unix_millis();
        assert!(millis / 1000 >= secs);
        assert!(millis / 1000 - secs <= 1);
    }

    #[test]
    fn formats_valid_timestamp() {
        let formatted = format_timestamp(1_700_000_000);
        assert_eq!(formatted.len(), "2023-11-14 22:13:20".len());
    }

    #[test]
    fn rejects_out_of_range_timestamp() {
        assert_eq!(format_timestamp(i64::MAX), "Time format error");
    }
}
