//! Concrete step handler functions and table builder.
//!
//! Each step is defined by plain `fn` pointers; no closures, no dynamic
//! dispatch.
//!
//! ```text
//!  REQUEST ──[Start, +2s]──▶ CONFIRMING ──[countdown 0]──▶ DISPATCHED
//!     ▲                          │                             │
//!     └─────────[Cancel]─────────┘                  [RequestTracking]
//!                                                              ▼
//!                          ARRIVED ◀──────[eta 0]────────── ENROUTE
//! ```

use super::context::{EmergencyContext, TimerCommand};
use super::{Reaction, StepDescriptor, StepId, Stimulus};
use crate::app::commands::EmergencyCommand;
use crate::scheduler::Schedule;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static step table.  Called once per request.
pub fn build_step_table() -> [StepDescriptor; StepId::COUNT] {
    [
        // Index 0: Request
        StepDescriptor {
            id: StepId::Request,
            name: "Request",
            on_enter: Some(request_enter),
            on_exit: Some(request_exit),
            on_event: request_event,
        },
        // Index 1: Confirming
        StepDescriptor {
            id: StepId::Confirming,
            name: "Confirming",
            on_enter: Some(confirming_enter),
            on_exit: Some(confirming_exit),
            on_event: confirming_event,
        },
        // Index 2: Dispatched
        StepDescriptor {
            id: StepId::Dispatched,
            name: "Dispatched",
            on_enter: Some(dispatched_enter),
            on_exit: None,
            on_event: dispatched_event,
        },
        // Index 3: Enroute
        StepDescriptor {
            id: StepId::Enroute,
            name: "Enroute",
            on_enter: Some(enroute_enter),
            on_exit: Some(enroute_exit),
            on_event: enroute_event,
        },
        // Index 4: Arrived
        StepDescriptor {
            id: StepId::Arrived,
            name: "Arrived",
            on_enter: Some(arrived_enter),
            on_exit: None,
            on_event: arrived_event,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  REQUEST: SOS button, optional "Requesting..." delay
// ═══════════════════════════════════════════════════════════════════════════

fn request_enter(ctx: &mut EmergencyContext) {
    ctx.reset_counters();
    ctx.requesting = false;
    info!(
        "REQUEST: ready (countdown={}, eta={})",
        ctx.countdown, ctx.eta
    );
}

fn request_exit(ctx: &mut EmergencyContext) {
    ctx.requesting = false;
}

fn request_event(ctx: &mut EmergencyContext, stimulus: Stimulus) -> Reaction {
    match stimulus {
        Stimulus::Command(EmergencyCommand::Start) if !ctx.requesting => {
            ctx.requesting = true;
            ctx.timer = TimerCommand::Arm(Schedule::one_shot(
                "request-delay",
                ctx.config.request_delay_ms,
            ));
            info!(
                "REQUEST: SOS pressed, requesting for {}ms",
                ctx.config.request_delay_ms
            );
            Reaction::Stay
        }
        Stimulus::Command(EmergencyCommand::Cancel) if ctx.requesting => {
            ctx.requesting = false;
            ctx.timer = TimerCommand::Cancel;
            info!("REQUEST: request aborted before confirmation");
            Reaction::Stay
        }
        Stimulus::Timer if ctx.requesting => Reaction::Goto(StepId::Confirming),
        _ => Reaction::Ignored,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  CONFIRMING: 1 Hz countdown before dispatch
// ═══════════════════════════════════════════════════════════════════════════

fn confirming_enter(ctx: &mut EmergencyContext) {
    ctx.countdown = ctx.config.countdown_start;
    ctx.timer = TimerCommand::Arm(Schedule::periodic(
        "countdown",
        ctx.config.countdown_tick_ms,
    ));
    info!(
        "CONFIRMING: finding nearest unit, dispatch in {}s",
        ctx.countdown
    );
}

fn confirming_exit(ctx: &mut EmergencyContext) {
    ctx.timer = TimerCommand::Cancel;
}

fn confirming_event(ctx: &mut EmergencyContext, stimulus: Stimulus) -> Reaction {
    match stimulus {
        Stimulus::Timer => {
            ctx.countdown = ctx.countdown.saturating_sub(1);
            debug!("CONFIRMING: countdown={}", ctx.countdown);
            if ctx.countdown == 0 {
                Reaction::Goto(StepId::Dispatched)
            } else {
                Reaction::Stay
            }
        }
        Stimulus::Command(EmergencyCommand::Cancel) => {
            info!("CONFIRMING: cancelled at countdown={}", ctx.countdown);
            Reaction::Goto(StepId::Request)
        }
        Stimulus::Command(_) => Reaction::Ignored,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  DISPATCHED: unit assigned, waiting for the user to track it
// ═══════════════════════════════════════════════════════════════════════════

fn dispatched_enter(_ctx: &mut EmergencyContext) {
    info!("DISPATCHED: unit assigned, help is on the way");
}

fn dispatched_event(_ctx: &mut EmergencyContext, stimulus: Stimulus) -> Reaction {
    match stimulus {
        Stimulus::Command(EmergencyCommand::RequestTracking) => Reaction::Goto(StepId::Enroute),
        _ => Reaction::Ignored,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  ENROUTE: live tracking, ETA counts down
// ═══════════════════════════════════════════════════════════════════════════

fn enroute_enter(ctx: &mut EmergencyContext) {
    ctx.eta = ctx.config.eta_start_minutes;
    ctx.timer = TimerCommand::Arm(Schedule::periodic("eta", ctx.config.eta_tick_ms));
    info!(
        "ENROUTE: ETA {} min, updating every {}ms",
        ctx.eta, ctx.config.eta_tick_ms
    );
}

fn enroute_exit(ctx: &mut EmergencyContext) {
    ctx.timer = TimerCommand::Cancel;
}

fn enroute_event(ctx: &mut EmergencyContext, stimulus: Stimulus) -> Reaction {
    match stimulus {
        Stimulus::Timer => {
            ctx.eta = ctx.eta.saturating_sub(1);
            debug!("ENROUTE: eta={}", ctx.eta);
            if ctx.eta == 0 {
                Reaction::Goto(StepId::Arrived)
            } else {
                Reaction::Stay
            }
        }
        Stimulus::Command(_) => Reaction::Ignored,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  ARRIVED: terminal
// ═══════════════════════════════════════════════════════════════════════════

fn arrived_enter(_ctx: &mut EmergencyContext) {
    info!("ARRIVED: medical team on site");
}

fn arrived_event(_ctx: &mut EmergencyContext, _stimulus: Stimulus) -> Reaction {
    Reaction::Ignored
}
