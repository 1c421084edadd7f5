//! In-memory event sink.
//!
//! Keeps every event in order so a host can replay them (the demo
//! binary prints them as JSON) or a test can assert on them.

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[AppEvent] {
        &self.events
    }

    /// Hand over everything recorded so far and start empty.
    pub fn drain(&mut self) -> Vec<AppEvent> {
        core::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

/// Fan one event out to two sinks (e.g. log and record).
#[derive(Debug, Default)]
pub struct Tee<A: EventSink, B: EventSink> {
    pub first: A,
    pub second: B,
}

impl<A: EventSink, B: EventSink> EventSink for Tee<A, B> {
    fn emit(&mut self, event: &AppEvent) {
        self.first.emit(event);
        self.second.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::StepId;

    #[test]
    fn drain_empties_the_recording() {
        let mut sink = RecordingSink::new();
        sink.emit(&AppEvent::Started(StepId::Request));
        assert_eq!(sink.drain(), [AppEvent::Started(StepId::Request)]);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn tee_reaches_both_sinks() {
        let mut tee = Tee {
            first: RecordingSink::new(),
            second: RecordingSink::new(),
        };
        tee.emit(&AppEvent::RequestAborted);
        assert_eq!(tee.first.events(), tee.second.events());
        assert_eq!(tee.first.events().len(), 1);
    }
}
