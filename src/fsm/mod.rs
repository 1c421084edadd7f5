//! Function-pointer finite state machine engine.
//!
//! The emergency request runs on a small table-driven FSM:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StepTable                                                   │
//! │  ┌────────────┬───────────┬──────────┬────────────────────┐  │
//! │  │ StepId     │ on_enter  │ on_exit  │ on_event           │  │
//! │  ├────────────┼───────────┼──────────┼────────────────────┤  │
//! │  │ Request    │ fn(ctx)   │ fn(ctx)  │ fn(ctx,s)->Reaction│  │
//! │  │ Confirming │ fn(ctx)   │ fn(ctx)  │ fn(ctx,s)->Reaction│  │
//! │  │ Dispatched │ fn(ctx)   │ —        │ fn(ctx,s)->Reaction│  │
//! │  │ Enroute    │ fn(ctx)   │ fn(ctx)  │ fn(ctx,s)->Reaction│  │
//! │  │ Arrived    │ fn(ctx)   │ —        │ fn(ctx,s)->Reaction│  │
//! │  └────────────┴───────────┴──────────┴────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every stimulus (a user command or a timer fire) is handed to
//! `on_event` for the **current** step.  If it returns
//! [`Reaction::Goto`], the engine runs `on_exit` for the current step,
//! then `on_enter` for the next, and updates the current pointer.
//! Handlers never touch the scheduler; they write a
//! [`TimerCommand`](context::TimerCommand) into the context and the
//! host applies it once the dispatch returns.

pub mod context;
pub mod states;

use context::EmergencyContext;
use log::info;
use serde::Serialize;

use crate::app::commands::EmergencyCommand;

// ---------------------------------------------------------------------------
// Step identity
// ---------------------------------------------------------------------------

/// Phases of an emergency request, in lifecycle order.
/// Must stay in sync with the table built in [`states::build_step_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum StepId {
    Request = 0,
    Confirming = 1,
    Dispatched = 2,
    Enroute = 3,
    Arrived = 4,
}

impl StepId {
    /// Total number of steps, used to size the table array.
    pub const COUNT: usize = 5;

    /// Convert an index back to `StepId`.  Panics on out-of-range in
    /// debug builds; returns `Request` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Request,
            1 => Self::Confirming,
            2 => Self::Dispatched,
            3 => Self::Enroute,
            4 => Self::Arrived,
            _ => {
                debug_assert!(false, "invalid step index: {idx}");
                Self::Request
            }
        }
    }

    /// No automatic or user transition leaves this step.
    pub fn is_terminal(self) -> bool {
        self == Self::Arrived
    }
}

// ---------------------------------------------------------------------------
// Stimuli and reactions
// ---------------------------------------------------------------------------

/// Input delivered to a step handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stimulus {
    /// A user action from the hosting screen.
    Command(EmergencyCommand),
    /// The request's timer fired.
    Timer,
}

/// What a step handler decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Handled; stay in the current step.
    Stay,
    /// Not applicable in the current step; nothing changed.
    Ignored,
    /// Handled; move to another step.
    Goto(StepId),
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type StepActionFn = fn(&mut EmergencyContext);

/// Signature for the stimulus handler.
pub type StepEventFn = fn(&mut EmergencyContext, Stimulus) -> Reaction;

// ---------------------------------------------------------------------------
// Step descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single step.
pub struct StepDescriptor {
    pub id: StepId,
    pub name: &'static str,
    pub on_enter: Option<StepActionFn>,
    pub on_exit: Option<StepActionFn>,
    pub on_event: StepEventFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
pub struct Fsm {
    /// Fixed-size table indexed by `StepId as usize`.
    table: [StepDescriptor; StepId::COUNT],
    /// Index of the currently active step.
    current: usize,
    /// Total transitions taken since construction.
    transitions: u32,
}

impl Fsm {
    /// Construct a new FSM with the given table, starting in `initial`.
    pub fn new(table: [StepDescriptor; StepId::COUNT], initial: StepId) -> Self {
        Self {
            table,
            current: initial as usize,
            transitions: 0,
        }
    }

    /// Run the initial `on_enter` for the starting step.
    /// Call once after construction, before the first `dispatch()`.
    pub fn start(&mut self, ctx: &mut EmergencyContext) {
        info!("FSM starting in step: {}", self.table[self.current].name);
        ctx.ticks_in_step = 0;
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Deliver one stimulus to the current step and follow any transition.
    pub fn dispatch(&mut self, ctx: &mut EmergencyContext, stimulus: Stimulus) -> Reaction {
        let reaction = (self.table[self.current].on_event)(ctx, stimulus);

        match reaction {
            Reaction::Goto(next) => self.transition(next, ctx),
            Reaction::Stay if stimulus == Stimulus::Timer => ctx.ticks_in_step += 1,
            Reaction::Stay | Reaction::Ignored => {}
        }
        reaction
    }

    /// The current step's identity.
    pub fn current_step(&self) -> StepId {
        StepId::from_index(self.current)
    }

    /// Display name of the current step.
    pub fn current_name(&self) -> &'static str {
        self.table[self.current].name
    }

    /// Transitions taken since construction.
    pub fn transition_count(&self) -> u32 {
        self.transitions
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StepId, ctx: &mut EmergencyContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.transitions += 1;
        ctx.ticks_in_step = 0;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
