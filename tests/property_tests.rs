//! Property tests for the simulator, the scheduler and the screen timers.

use medmap::adapters::recording_sink::RecordingSink;
use medmap::adapters::static_directory::StaticDirectory;
use medmap::app::commands::EmergencyCommand;
use medmap::app::ports::DirectoryPort;
use medmap::app::service::EmergencySimulator;
use medmap::config::SimulatorConfig;
use medmap::fsm::StepId;
use medmap::navigation::Route;
use medmap::scheduler::{Schedule, Scheduler};
use medmap::screens::video_call::{VideoCallScreen, format_duration};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Input {
    Command(EmergencyCommand),
    Wait(u64),
}

fn arb_input() -> impl Strategy<Value = Input> {
    prop_oneof![
        1 => Just(Input::Command(EmergencyCommand::Start)),
        1 => Just(Input::Command(EmergencyCommand::Cancel)),
        1 => Just(Input::Command(EmergencyCommand::RequestTracking)),
        4 => (0u64..40_000).prop_map(Input::Wait),
    ]
}

fn unit() -> medmap::directory::AssignedUnit {
    StaticDirectory::demo().unwrap().assigned_unit().clone()
}

// ── Emergency simulator ───────────────────────────────────────

proptest! {
    /// Whatever the user does, there is never more than one live timer,
    /// counters stay within their starting values and steps only move
    /// forward except for a cancel out of `Confirming`.
    #[test]
    fn simulator_invariants_hold(inputs in proptest::collection::vec(arb_input(), 1..120)) {
        let mut sim = EmergencySimulator::new(SimulatorConfig::default(), unit());
        let mut sink = RecordingSink::new();
        sim.start(&mut sink);

        for input in inputs {
            let before = sim.step();
            match input {
                Input::Command(cmd) => { sim.handle_command(cmd, &mut sink); }
                Input::Wait(ms) => sim.advance(ms, &mut sink),
            }
            let after = sim.step();

            let cancelled = before == StepId::Confirming
                && after == StepId::Request
                && matches!(input, Input::Command(EmergencyCommand::Cancel));
            prop_assert!(after >= before || cancelled,
                "illegal transition {:?} -> {:?} on {:?}", before, after, input);
            prop_assert!(sim.pending_timers() <= 1);
            prop_assert!(sim.countdown() <= 10);
            prop_assert!(sim.eta() <= 5);
            if after == StepId::Dispatched || after == StepId::Arrived {
                prop_assert_eq!(sim.pending_timers(), 0);
            }
        }
    }

    /// Splitting a wait into pieces never changes the outcome.
    #[test]
    fn advance_is_split_invariant(
        total in 0u64..200_000,
        cut in 0u64..200_000,
        track_at in 0u64..30_000,
    ) {
        let cut = cut.min(total);
        let run = |pieces: &[u64]| {
            let mut sim = EmergencySimulator::new(SimulatorConfig::default(), unit());
            let mut sink = RecordingSink::new();
            sim.start(&mut sink);
            sim.handle_command(EmergencyCommand::Start, &mut sink);
            sim.advance(12_000 + track_at, &mut sink);
            sim.handle_command(EmergencyCommand::RequestTracking, &mut sink);
            for &p in pieces {
                sim.advance(p, &mut sink);
            }
            (sim.snapshot(), sink.drain())
        };
        prop_assert_eq!(run(&[total]), run(&[cut, total - cut]));
    }
}

// ── Scheduler ─────────────────────────────────────────────────

proptest! {
    /// A periodic timer fires exactly `elapsed / interval` times.
    #[test]
    fn periodic_fire_count_matches_elapsed(
        interval in 1u64..5_000,
        steps in proptest::collection::vec(0u64..10_000, 1..30),
    ) {
        let mut sched = Scheduler::new();
        sched.add(Schedule::periodic("tick", interval)).unwrap();
        let mut fired = 0u64;
        let mut total = 0u64;
        for step in steps {
            total += step;
            let until = sched.now_ms() + step;
            while sched.next_due(until).is_some() {
                fired += 1;
            }
            sched.settle(until);
        }
        prop_assert_eq!(fired, total / interval);
    }
}

// ── Video call ────────────────────────────────────────────────

proptest! {
    #[test]
    fn call_duration_tracks_whole_seconds(elapsed in 0u64..600_000) {
        let dir = StaticDirectory::demo().unwrap();
        let mut call = VideoCallScreen::new(&dir, &SimulatorConfig::default());
        call.advance(elapsed);
        prop_assert_eq!(u64::from(call.duration_s()), elapsed / 1_000);
        prop_assert_eq!(call.is_connecting(), elapsed < 3_000);
    }

    #[test]
    fn duration_format_is_mm_ss(seconds in 0u32..6_000) {
        let text = format_duration(seconds);
        let (mm, ss) = text.split_once(':').unwrap();
        prop_assert_eq!(mm.parse::<u32>().unwrap(), seconds / 60);
        prop_assert_eq!(ss.len(), 2);
        prop_assert!(ss.parse::<u32>().unwrap() < 60);
    }
}

// ── Routes ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn any_resource_type_parses(value in "[a-z]{0,12}") {
        let route = Route::parse(&format!("/resources?type={value}")).unwrap();
        prop_assert!(matches!(route, Route::Resources(_)));
    }
}
