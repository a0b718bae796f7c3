use std::time::Duration;

/// Default wall-clock limit for a single version probe.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// Live display refresh cadence (4 Hz).
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub probe_timeout: Duration,
    pub refresh_interval: Duration,
    pub check_versions: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            refresh_interval: REFRESH_INTERVAL,
            check_versions: true,
        }
    }
}

impl RunSettings {
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn without_version_check(mut self) -> Self {
        self.check_versions = false;
        self
    }
}
