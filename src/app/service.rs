//! Emergency request simulator: the hexagonal core.
//!
//! [`EmergencySimulator`] owns the step FSM, its context and the one
//! timer that drives it.  Commands come in from the emergency screen,
//! simulated time comes in through [`advance`](EmergencySimulator::advance),
//! and every observable change goes out through an [`EventSink`].
//!
//! ```text
//!  EmergencyCommand ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                       │  EmergencySimulator     │
//!  advance(ms) ───────▶ │  FSM · Scheduler        │
//!                       └────────────────────────┘
//! ```
//!
//! At most one timer is ever armed.  Step handlers request timer changes
//! through the context; [`apply_timer`](EmergencySimulator::apply_timer)
//! cancels the old timer before arming a new one, so a timer from a step
//! that has been left can never fire.

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::SimulatorConfig;
use crate::directory::AssignedUnit;
use crate::fsm::context::{EmergencyContext, TimerCommand};
use crate::fsm::states::build_step_table;
use crate::fsm::{Fsm, Reaction, StepId, Stimulus};
use crate::scheduler::{ScheduleFiredKind, Scheduler, TimerId};

use super::commands::{CommandOutcome, EmergencyCommand};
use super::events::AppEvent;
use super::ports::EventSink;

/// Point-in-time view of a request, for the hosting screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmergencySnapshot {
    pub step: StepId,
    pub countdown: u8,
    pub eta: u8,
    pub requesting: bool,
}

// ───────────────────────────────────────────────────────────────
// EmergencySimulator
// ───────────────────────────────────────────────────────────────

pub struct EmergencySimulator {
    fsm: Fsm,
    ctx: EmergencyContext,
    scheduler: Scheduler,
    /// The single live timer, if any.
    active_timer: Option<TimerId>,
    unit: AssignedUnit,
    stopped: bool,
}

impl EmergencySimulator {
    /// Construct the simulator.  Does **not** run the initial step's
    /// entry action; call [`start`](Self::start) next.
    pub fn new(config: SimulatorConfig, unit: AssignedUnit) -> Self {
        Self {
            fsm: Fsm::new(build_step_table(), StepId::Request),
            ctx: EmergencyContext::new(config),
            scheduler: Scheduler::new(),
            active_timer: None,
            unit,
            stopped: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        self.apply_timer();
        sink.emit(&AppEvent::Started(self.fsm.current_step()));
        info!("EmergencySimulator started in {:?}", self.fsm.current_step());
    }

    /// Tear down: cancel any pending timer.  Further commands are ignored
    /// and further time produces no fires.
    pub fn stop(&mut self, sink: &mut impl EventSink) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.active_timer = None;
        self.scheduler.clear();
        sink.emit(&AppEvent::Stopped(self.fsm.current_step()));
        info!("EmergencySimulator stopped in {:?}", self.fsm.current_step());
    }

    // ── Inputs ────────────────────────────────────────────────

    /// Process a user action from the emergency screen.
    pub fn handle_command(
        &mut self,
        cmd: EmergencyCommand,
        sink: &mut impl EventSink,
    ) -> CommandOutcome {
        let step = self.fsm.current_step();
        if self.stopped {
            warn!("EmergencySimulator: {:?} after stop, ignored", cmd);
            sink.emit(&AppEvent::CommandIgnored { command: cmd, step });
            return CommandOutcome::Ignored;
        }

        let was_requesting = self.ctx.requesting;
        let reaction = self.dispatch(Stimulus::Command(cmd), sink);
        if reaction == Reaction::Ignored {
            warn!("EmergencySimulator: {:?} not accepted in {:?}", cmd, step);
            sink.emit(&AppEvent::CommandIgnored { command: cmd, step });
            return CommandOutcome::Ignored;
        }

        match (was_requesting, self.ctx.requesting) {
            (false, true) => sink.emit(&AppEvent::RequestPending {
                delay_ms: self.ctx.config.request_delay_ms,
            }),
            (true, false) if self.fsm.current_step() == StepId::Request => {
                sink.emit(&AppEvent::RequestAborted);
            }
            _ => {}
        }
        CommandOutcome::Applied
    }

    /// Let `elapsed_ms` of simulated time pass, firing the request's
    /// timer as many times as it falls due.
    pub fn advance(&mut self, elapsed_ms: u64, sink: &mut impl EventSink) {
        let until = self.scheduler.now_ms().saturating_add(elapsed_ms);
        while let Some(fired) = self.scheduler.next_due(until) {
            if self.active_timer != Some(fired.id) {
                debug!("EmergencySimulator: dropping stale fire '{}'", fired.label);
                continue;
            }
            if fired.kind == ScheduleFiredKind::OneShot {
                self.active_timer = None;
            }
            self.dispatch(Stimulus::Timer, sink);
        }
        self.scheduler.settle(until);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn snapshot(&self) -> EmergencySnapshot {
        EmergencySnapshot {
            step: self.fsm.current_step(),
            countdown: self.ctx.countdown,
            eta: self.ctx.eta,
            requesting: self.ctx.requesting,
        }
    }

    pub fn step(&self) -> StepId {
        self.fsm.current_step()
    }

    pub fn countdown(&self) -> u8 {
        self.ctx.countdown
    }

    pub fn eta(&self) -> u8 {
        self.ctx.eta
    }

    pub fn is_requesting(&self) -> bool {
        self.ctx.requesting
    }

    pub fn assigned_unit(&self) -> &AssignedUnit {
        &self.unit
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.ctx.config
    }

    /// Simulated milliseconds since the request was created.
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Number of armed timers (0 or 1).
    pub fn pending_timers(&self) -> usize {
        self.scheduler.active_count()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    // ── Internal ──────────────────────────────────────────────

    fn dispatch(&mut self, stimulus: Stimulus, sink: &mut impl EventSink) -> Reaction {
        let prev = self.fsm.current_step();
        let reaction = self.fsm.dispatch(&mut self.ctx, stimulus);
        self.apply_timer();

        if stimulus == Stimulus::Timer && reaction != Reaction::Ignored {
            match prev {
                StepId::Confirming => sink.emit(&AppEvent::CountdownTick {
                    remaining: self.ctx.countdown,
                }),
                StepId::Enroute => sink.emit(&AppEvent::EtaTick {
                    remaining: self.ctx.eta,
                }),
                _ => {}
            }
        }

        let next = self.fsm.current_step();
        if next != prev {
            sink.emit(&AppEvent::StepChanged { from: prev, to: next });
        }
        reaction
    }

    /// Translate the handlers' timer request into scheduler calls.
    fn apply_timer(&mut self) {
        match self.ctx.take_timer_command() {
            TimerCommand::Keep => {}
            TimerCommand::Cancel => {
                if let Some(id) = self.active_timer.take() {
                    self.scheduler.remove(id);
                }
            }
            TimerCommand::Arm(schedule) => {
                if let Some(id) = self.active_timer.take() {
                    self.scheduler.remove(id);
                }
                self.active_timer = self.scheduler.add(schedule);
                if self.active_timer.is_none() {
                    warn!("EmergencySimulator: could not arm '{}'", schedule.label);
                }
            }
        }
    }
}
