//! Outbound application events.
//!
//! The [`EmergencySimulator`](super::service::EmergencySimulator) emits
//! these through the [`EventSink`](super::ports::EventSink) port.
//! Adapters on the other side decide what to do with them: log them,
//! record them for a test, or refresh a view.

use serde::Serialize;

use super::commands::EmergencyCommand;
use crate::fsm::StepId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum AppEvent {
    /// The simulator has started (carries the initial step).
    Started(StepId),

    /// SOS accepted; the "Requesting..." delay is running.
    RequestPending { delay_ms: u64 },

    /// A pending request was aborted before confirmation.
    RequestAborted,

    /// The request moved between steps.
    StepChanged { from: StepId, to: StepId },

    /// Confirmation countdown ticked.
    CountdownTick { remaining: u8 },

    /// ETA countdown ticked.
    EtaTick { remaining: u8 },

    /// A command arrived that the current step does not accept.
    CommandIgnored { command: EmergencyCommand, step: StepId },

    /// The hosting screen went away; every timer was cancelled.
    Stopped(StepId),
}
