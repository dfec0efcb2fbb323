//! Monitor configuration parameters
//!
//! All tunable parameters for the hazard monitor.
//! Values can be overridden from a JSON config file and the command line.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Suppression window after a manual dismissal.
pub const DEFAULT_DISMISS_COOLDOWN_SECS: u16 = 30;

/// Minimum gap between two accepted alert-log registrations.
pub const DEFAULT_MIN_REGISTRATION_INTERVAL_SECS: u16 = 10;

/// Default backend location (the installation's local dashboard server).
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Core monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    // --- Backend ---
    /// Base URL of the installation backend
    pub backend_url: String,
    /// Per-request timeout (milliseconds)
    pub request_timeout_ms: u32,
    /// Number of I/O worker threads issuing backend calls
    pub io_workers: u8,

    // --- Alarm policy ---
    /// Re-display suppression after a manual dismissal (seconds)
    pub dismiss_cooldown_secs: u16,
    /// Minimum interval between alert-log registrations (seconds)
    pub min_registration_interval_secs: u16,

    // --- Timing ---
    /// Reading poll period (milliseconds)
    pub reading_interval_ms: u32,
    /// History refresh period (milliseconds)
    pub history_interval_ms: u32,
    /// Alert-log refresh period (milliseconds)
    pub alert_log_interval_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            // Backend
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_ms: 2500,
            io_workers: 2,

            // Alarm policy
            dismiss_cooldown_secs: DEFAULT_DISMISS_COOLDOWN_SECS,
            min_registration_interval_secs: DEFAULT_MIN_REGISTRATION_INTERVAL_SECS,

            // Timing
            reading_interval_ms: 1000,   // 1 Hz
            history_interval_ms: 5000,   // every 5 s
            alert_log_interval_ms: 3000, // every 3 s
        }
    }
}

impl MonitorConfig {
    /// Dismissal cooldown in milliseconds.
    pub fn cooldown_ms(&self) -> u64 {
        u64::from(self.dismiss_cooldown_secs) * 1000
    }

    /// Registration rate-limit interval in milliseconds.
    pub fn min_registration_interval_ms(&self) -> u64 {
        u64::from(self.min_registration_interval_secs) * 1000
    }

    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://"))
        {
            return Err(ConfigError::ValidationFailed(
                "backend_url must start with http:// or https://",
            ));
        }
        if !(100..=60_000).contains(&self.request_timeout_ms) {
            return Err(ConfigError::ValidationFailed(
                "request_timeout_ms must be 100–60000",
            ));
        }
        if !(1..=8).contains(&self.io_workers) {
            return Err(ConfigError::ValidationFailed("io_workers must be 1–8"));
        }
        if !(1..=3600).contains(&self.dismiss_cooldown_secs) {
            return Err(ConfigError::ValidationFailed(
                "dismiss_cooldown_secs must be 1–3600",
            ));
        }
        if self.min_registration_interval_secs > 3600 {
            return Err(ConfigError::ValidationFailed(
                "min_registration_interval_secs must be 0–3600",
            ));
        }
        if !(100..=60_000).contains(&self.reading_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "reading_interval_ms must be 100–60000",
            ));
        }
        if !(500..=600_000).contains(&self.history_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "history_interval_ms must be 500–600000",
            ));
        }
        if !(500..=600_000).contains(&self.alert_log_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "alert_log_interval_ms must be 500–600000",
            ));
        }
        Ok(())
    }
}
