//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr via `env_logger` in the demo binary).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] as one line.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(step) => info!("START | initial_step={:?}", step),
            AppEvent::RequestPending { delay_ms } => {
                info!("SOS   | requesting, confirm in {}ms", delay_ms);
            }
            AppEvent::RequestAborted => info!("SOS   | aborted"),
            AppEvent::StepChanged { from, to } => info!("STEP  | {:?} -> {:?}", from, to),
            AppEvent::CountdownTick { remaining } => info!("TICK  | countdown={}", remaining),
            AppEvent::EtaTick { remaining } => info!("TICK  | eta={}min", remaining),
            AppEvent::CommandIgnored { command, step } => {
                warn!("IGNORE| {:?} in {:?}", command, step);
            }
            AppEvent::Stopped(step) => info!("STOP  | final_step={:?}", step),
        }
    }
}
