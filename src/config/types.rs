use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::device::constants::{CONNECT_DELAY, SEARCH_DELAY, SUCCESS_DELAY, SUCCESS_THRESHOLD};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub search_delay_ms: u64,
    pub connect_delay_ms: u64,
    pub success_delay_ms: u64,
    pub success_threshold: f64,
}

impl Config {
    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }

    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }

    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let delays = [
            ("searchDelayMs", self.search_delay_ms),
            ("connectDelayMs", self.connect_delay_ms),
            ("successDelayMs", self.success_delay_ms),
        ];

        for (field, value) in delays {
            if value == 0 {
                return Err(ConfigError::InvalidValue { field, reason: "must be greater than 0" });
            }
        }

        if !(0.0..=1.0).contains(&self.success_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "successThreshold",
                reason: "must be between 0 and 1",
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            search_delay_ms: SEARCH_DELAY,
            connect_delay_ms: CONNECT_DELAY,
            success_delay_ms: SUCCESS_DELAY,
            success_threshold: SUCCESS_THRESHOLD,
        }
    }
}
