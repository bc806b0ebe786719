//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::recording::Duration;

/// Default prediction endpoint base URL
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000";

/// Default connection attempt count
const DEFAULT_RETRIES: u32 = 3;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub duration: Option<String>,
    pub retries: Option<u32>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            endpoint: Some(DEFAULT_ENDPOINT.to_string()),
            duration: Some("10s".to_string()),
            retries: Some(DEFAULT_RETRIES),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            endpoint: other.endpoint.or(self.endpoint),
            duration: other.duration.or(self.duration),
            retries: other.retries.or(self.retries),
        }
    }

    /// Get the endpoint, or the default if not set
    pub fn endpoint_or_default(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Get duration as parsed Duration, or default if not set/invalid
    pub fn duration_or_default(&self) -> Duration {
        self.duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_duration)
    }

    /// Get the retry count, or the default if not set
    pub fn retries_or_default(&self) -> u32 {
        self.retries.unwrap_or(DEFAULT_RETRIES)
    }
}
