//! Inbound commands to the emergency simulator.
//!
//! These are the user actions the emergency screen forwards to
//! [`EmergencySimulator`](super::service::EmergencySimulator).

use serde::{Deserialize, Serialize};

/// Actions the hosting screen can send into the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmergencyCommand {
    /// SOS pressed: begin the request.
    Start,
    /// Abort the request while it is still being confirmed.
    Cancel,
    /// "Track Live" pressed on the dispatched unit.
    RequestTracking,
}

/// Result of handing a command to the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command changed the request.
    Applied,
    /// The command does not apply in the current step; nothing changed.
    Ignored,
}
