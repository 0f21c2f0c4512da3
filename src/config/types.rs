use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Debounce windows used by feature reducers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delay before a nickname edit is validated (default: 500).
    #[serde(default = "default_debounce_ms")]
    pub nickname_debounce_ms: u64,
    /// Delay before an edited link is fetched for its preview (default: 500).
    #[serde(default = "default_debounce_ms")]
    pub link_debounce_ms: u64,
}

impl TimingConfig {
    pub fn nickname_debounce(&self) -> Duration {
        Duration::from_millis(self.nickname_debounce_ms)
    }

    pub fn link_debounce(&self) -> Duration {
        Duration::from_millis(self.link_debounce_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            nickname_debounce_ms: default_debounce_ms(),
            link_debounce_ms: default_debounce_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_log_filter() -> String {
    "info".to_string()
}
