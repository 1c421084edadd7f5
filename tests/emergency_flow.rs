//! Integration tests: EmergencySimulator → FSM → scheduler → EventSink.

use medmap::adapters::static_directory::StaticDirectory;
use medmap::app::commands::{CommandOutcome, EmergencyCommand};
use medmap::app::events::AppEvent;
use medmap::app::ports::{DirectoryPort, EventSink};
use medmap::app::service::EmergencySimulator;
use medmap::config::SimulatorConfig;
use medmap::fsm::StepId;

// ── Mock sink ─────────────────────────────────────────────────

struct MockSink {
    events: Vec<AppEvent>,
}

impl MockSink {
    fn new() -> Self {
        Self { events: Vec::new() }
    }

    fn steps(&self) -> Vec<StepId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StepChanged { to, .. } => Some(*to),
                _ => None,
            })
            .collect()
    }

    fn countdown_ticks(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::CountdownTick { remaining } => Some(*remaining),
                _ => None,
            })
            .collect()
    }

    fn eta_ticks(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::EtaTick { remaining } => Some(*remaining),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for MockSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

fn make_sim() -> (EmergencySimulator, MockSink) {
    let unit = StaticDirectory::demo().unwrap().assigned_unit().clone();
    let mut sim = EmergencySimulator::new(SimulatorConfig::default(), unit);
    let mut sink = MockSink::new();
    sim.start(&mut sink);
    (sim, sink)
}

// ── Happy path ────────────────────────────────────────────────

#[test]
fn example_run_ends_arrived() {
    let (mut sim, mut sink) = make_sim();
    sim.handle_command(EmergencyCommand::Start, &mut sink);
    sim.advance(2_000, &mut sink);
    sim.advance(10_000, &mut sink);
    sim.handle_command(EmergencyCommand::RequestTracking, &mut sink);
    sim.advance(150_000, &mut sink);

    assert_eq!(sim.step(), StepId::Arrived);
    assert_eq!(
        sink.steps(),
        [
            StepId::Confirming,
            StepId::Dispatched,
            StepId::Enroute,
            StepId::Arrived
        ]
    );
    assert_eq!(sim.pending_timers(), 0);
}

#[test]
fn confirming_counts_down_once_per_second() {
    let (mut sim, mut sink) = make_sim();
    sim.handle_command(EmergencyCommand::Start, &mut sink);
    sim.advance(2_000, &mut sink);
    assert_eq!(sim.step(), StepId::Confirming);
    assert_eq!(sim.countdown(), 10);

    for expected in (1..10).rev() {
        sim.advance(1_000, &mut sink);
        assert_eq!(sim.countdown(), expected);
        assert_eq!(sim.step(), StepId::Confirming);
    }
    sim.advance(1_000, &mut sink);
    assert_eq!(sim.countdown(), 0);
    assert_eq!(sim.step(), StepId::Dispatched);
    assert_eq!(sink.countdown_ticks(), [9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
}

#[test]
fn dispatched_waits_for_tracking() {
    let (mut sim, mut sink) = make_sim();
    sim.handle_command(EmergencyCommand::Start, &mut sink);
    sim.advance(12_000, &mut sink);
    assert_eq!(sim.step(), StepId::Dispatched);

    sim.advance(3_600_000, &mut sink);
    assert_eq!(sim.step(), StepId::Dispatched);
    assert_eq!(sim.pending_timers(), 0);
}

#[test]
fn enroute_eta_ticks_every_thirty_seconds() {
    let (mut sim, mut sink) = make_sim();
    sim.handle_command(EmergencyCommand::Start, &mut sink);
    sim.advance(12_000, &mut sink);
    sim.handle_command(EmergencyCommand::RequestTracking, &mut sink);
    assert_eq!(sim.eta(), 5);

    sim.advance(29_999, &mut sink);
    assert_eq!(sim.eta(), 5);
    sim.advance(1, &mut sink);
    assert_eq!(sim.eta(), 4);

    sim.advance(120_000, &mut sink);
    assert_eq!(sim.eta(), 0);
    assert_eq!(sim.step(), StepId::Arrived);
    assert_eq!(sink.eta_ticks(), [4, 3, 2, 1, 0]);
}

#[test]
fn arrived_is_terminal() {
    let (mut sim, mut sink) = make_sim();
    sim.handle_command(EmergencyCommand::Start, &mut sink);
    sim.advance(12_000, &mut sink);
    sim.handle_command(EmergencyCommand::RequestTracking, &mut sink);
    sim.advance(150_000, &mut sink);
    assert_eq!(sim.step(), StepId::Arrived);

    for cmd in [
        EmergencyCommand::Start,
        EmergencyCommand::Cancel,
        EmergencyCommand::RequestTracking,
    ] {
        assert_eq!(sim.handle_command(cmd, &mut sink), CommandOutcome::Ignored);
    }
    sim.advance(10_000_000, &mut sink);
    assert_eq!(sim.step(), StepId::Arrived);
}

// ── Cancel and ignored commands ───────────────────────────────

#[test]
fn cancel_during_confirming_resets_counters() {
    let (mut sim, mut sink) = make_sim();
    sim.handle_command(EmergencyCommand::Start, &mut sink);
    sim.advance(2_000 + 4_000, &mut sink);
    assert_eq!(sim.countdown(), 6);

    assert_eq!(
        sim.handle_command(EmergencyCommand::Cancel, &mut sink),
        CommandOutcome::Applied
    );
    let snap = sim.snapshot();
    assert_eq!(snap.step, StepId::Request);
    assert_eq!(snap.countdown, 10);
    assert_eq!(snap.eta, 5);

    // A new request starts from scratch.
    sim.handle_command(EmergencyCommand::Start, &mut sink);
    sim.advance(2_000 + 1_000, &mut sink);
    assert_eq!(sim.countdown(), 9);
}

#[test]
fn tracking_during_confirming_is_ignored() {
    let (mut sim, mut sink) = make_sim();
    sim.handle_command(EmergencyCommand::Start, &mut sink);
    sim.advance(2_500, &mut sink);

    let outcome = sim.handle_command(EmergencyCommand::RequestTracking, &mut sink);
    assert_eq!(outcome, CommandOutcome::Ignored);
    assert_eq!(sim.step(), StepId::Confirming);
    assert!(sink.events.contains(&AppEvent::CommandIgnored {
        command: EmergencyCommand::RequestTracking,
        step: StepId::Confirming,
    }));
}

#[test]
fn second_sos_while_requesting_is_ignored() {
    let (mut sim, mut sink) = make_sim();
    assert_eq!(
        sim.handle_command(EmergencyCommand::Start, &mut sink),
        CommandOutcome::Applied
    );
    sim.advance(1_000, &mut sink);
    assert_eq!(
        sim.handle_command(EmergencyCommand::Start, &mut sink),
        CommandOutcome::Ignored
    );
    // The original delay still completes on schedule.
    sim.advance(1_000, &mut sink);
    assert_eq!(sim.step(), StepId::Confirming);
}

#[test]
fn cancel_before_confirmation_aborts_the_delay() {
    let (mut sim, mut sink) = make_sim();
    sim.handle_command(EmergencyCommand::Start, &mut sink);
    sim.advance(1_500, &mut sink);
    sim.handle_command(EmergencyCommand::Cancel, &mut sink);
    assert!(!sim.is_requesting());

    sim.advance(60_000, &mut sink);
    assert_eq!(sim.step(), StepId::Request);
    assert!(sink.steps().is_empty());
}

// ── Configuration ─────────────────────────────────────────────

#[test]
fn custom_config_changes_timings() {
    let config = SimulatorConfig {
        request_delay_ms: 500,
        countdown_start: 3,
        eta_start_minutes: 2,
        eta_tick_ms: 1_000,
        ..Default::default()
    };
    let unit = StaticDirectory::demo().unwrap().assigned_unit().clone();
    let mut sim = EmergencySimulator::new(config, unit);
    let mut sink = MockSink::new();
    sim.start(&mut sink);

    sim.handle_command(EmergencyCommand::Start, &mut sink);
    sim.advance(500 + 3_000, &mut sink);
    assert_eq!(sim.step(), StepId::Dispatched);
    sim.handle_command(EmergencyCommand::RequestTracking, &mut sink);
    sim.advance(2_000, &mut sink);
    assert_eq!(sim.step(), StepId::Arrived);
}

#[test]
fn events_serialise_with_kebab_case_tags() {
    let json = serde_json::to_string(&AppEvent::StepChanged {
        from: StepId::Request,
        to: StepId::Confirming,
    })
    .unwrap();
    assert_eq!(
        json,
        r#"{"event":"step-changed","data":{"from":"request","to":"confirming"}}"#
    );
}
