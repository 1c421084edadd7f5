//! Simulator configuration parameters
//!
//! Every demo constant the screens run on: timer periods, initial
//! counter values and one-shot delays.  Defaults match the shipped app;
//! the demo binary can override them from a JSON file.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    // --- Emergency request ---
    /// "Requesting..." delay between pressing SOS and confirmation (ms)
    pub request_delay_ms: u64,
    /// Confirmation countdown starting value (seconds)
    pub countdown_start: u8,
    /// Confirmation countdown tick period (ms)
    pub countdown_tick_ms: u64,
    /// ETA starting value once the unit is en route (minutes)
    pub eta_start_minutes: u8,
    /// ETA tick period (ms)
    pub eta_tick_ms: u64,

    // --- Video consultation ---
    /// Simulated connection delay (ms)
    pub video_connect_delay_ms: u64,
    /// Controls auto-hide delay (ms)
    pub video_controls_hide_ms: u64,
    /// Call duration counter period (ms)
    pub call_duration_tick_ms: u64,

    // --- Map ---
    /// "Locating..." duration after pressing My Location (ms)
    pub locate_delay_ms: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            // Emergency
            request_delay_ms: 2_000,
            countdown_start: 10,
            countdown_tick_ms: 1_000, // 1 Hz
            eta_start_minutes: 5,
            eta_tick_ms: 30_000, // demo-compressed minutes

            // Video
            video_connect_delay_ms: 3_000,
            video_controls_hide_ms: 5_000,
            call_duration_tick_ms: 1_000,

            // Map
            locate_delay_ms: 2_000,
        }
    }
}

impl SimulatorConfig {
    /// Reject values that would stall or spin a timer.
    pub fn validate(&self) -> Result<()> {
        if self.countdown_tick_ms == 0 {
            return Err(Error::Config("countdown_tick_ms must be > 0"));
        }
        if self.eta_tick_ms == 0 {
            return Err(Error::Config("eta_tick_ms must be > 0"));
        }
        if self.call_duration_tick_ms == 0 {
            return Err(Error::Config("call_duration_tick_ms must be > 0"));
        }
        if self.countdown_start == 0 {
            return Err(Error::Config("countdown_start must be > 0"));
        }
        if self.eta_start_minutes == 0 {
            return Err(Error::Config("eta_start_minutes must be > 0"));
        }
        Ok(())
    }

    /// Parse and validate a JSON override.  Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed config JSON"))?;
        config.validate()?;
        Ok(config)
    }
}
