/// Line prepended to a report when a heartbeat is due
pub const HEARTBEAT_LINE: &str = "Checking service is still alive!";

/// Whether a heartbeat is due at `now` given the last one sent at `last_heartbeat`
pub fn should_emit_heartbeat(now: i64, last_heartbeat: i64, interval_secs: i64) -> bool {
    now - last_heartbeat >= interval_secs
}

/// Heartbeat state kept for the lifetime of the process.
///
/// `last_heartbeat` is a unix timestamp in seconds; zero means no heartbeat was sent yet, so
/// the first cycle always carries one.
#[derive(Debug, Clone)]
pub struct HeartbeatGate {
    last_heartbeat: i64,
    interval_secs: i64,
}

impl HeartbeatGate {
    pub fn new(interval_secs: i64) -> Self {
        Self {
            last_heartbeat: 0,
            interval_secs,
        }
    }

    /// Decide whether this cycle carries a heartbeat, committing `now` when it does
    pub fn check(&mut self, now: i64) -> bool {
        if should_emit_heartbeat(now, self.last_heartbeat, self.interval_secs) {
            self.last_heartbeat = now;
            true
        } else {
            false
        }
    }

    pub fn last_heartbeat(&self) -> i64 {
        self.last_heartbeat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;

    #[test]
    fn first_cycle_always_heartbeats() {
        let mut gate = HeartbeatGate::new(DAY);
        assert!(gate.check(1));
        assert_eq!(gate.last_heartbeat(), 1);
    }

    #[test]
    fn second_call_in_same_window_is_quiet() {
        let mut gate = HeartbeatGate::new(DAY);
        let now = 1_700_000_000;
        assert!(gate.check(now));
        assert!(!gate.check(now + 30));
        assert!(!gate.check(now + DAY - 1));
        assert_eq!(gate.last_heartbeat(), now);
    }

    #[test]
    fn heartbeat_returns_after_full_interval() {
        let mut gate = HeartbeatGate::new(DAY);
        let now = 1_700_000_000;
        assert!(gate.check(now));
        assert!(gate.check(now + DAY));
        assert_eq!(gate.last_heartbeat(), now + DAY);
    }

    #[test]
    fn boundary_is_inclusive() {
        assert!(should_emit_heartbeat(DAY, 0, DAY));
        assert!(!should_emit_heartbeat(DAY - 1, 0, DAY));
    }
}
