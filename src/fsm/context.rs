//! Shared mutable context threaded through every FSM handler.
//!
//! `EmergencyContext` is the single struct that step handlers read from
//! and write to: the two demo counters, the "requesting" flag shown on
//! the SOS button, the timer request for the host to apply, and the
//! configuration the counters start from.

use crate::config::SimulatorConfig;
use crate::scheduler::Schedule;

// ---------------------------------------------------------------------------
// Timer request (written by step handlers; applied by the service)
// ---------------------------------------------------------------------------

/// What the handlers want done with the request's single timer.
/// The service applies it after every dispatch, then resets it to `Keep`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerCommand {
    /// Leave the current timer alone.
    #[default]
    Keep,
    /// Replace the current timer (if any) with this schedule.
    Arm(Schedule),
    /// Cancel the current timer.
    Cancel,
}

// ---------------------------------------------------------------------------
// EmergencyContext
// ---------------------------------------------------------------------------

/// The shared context passed to every step handler.
pub struct EmergencyContext {
    /// Confirmation countdown (seconds).  Meaningful in `Confirming`.
    pub countdown: u8,
    /// Estimated arrival (minutes).  Meaningful in `Enroute`.
    pub eta: u8,
    /// SOS pressed, waiting out the request delay.
    pub requesting: bool,
    /// Pending timer request for the host.
    pub timer: TimerCommand,
    /// Timer fires handled since the current step was entered.
    pub ticks_in_step: u32,
    pub config: SimulatorConfig,
}

impl EmergencyContext {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            countdown: config.countdown_start,
            eta: config.eta_start_minutes,
            requesting: false,
            timer: TimerCommand::Keep,
            ticks_in_step: 0,
            config,
        }
    }

    /// Restore both counters to their starting values.
    pub fn reset_counters(&mut self) {
        self.countdown = self.config.countdown_start;
        self.eta = self.config.eta_start_minutes;
    }

    /// Take the pending timer request, leaving `Keep` behind.
    pub fn take_timer_command(&mut self) -> TimerCommand {
        core::mem::take(&mut self.timer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_starts_at_config_values() {
        let cfg = SimulatorConfig {
            countdown_start: 7,
            eta_start_minutes: 3,
            ..Default::default()
        };
        let ctx = EmergencyContext::new(cfg);
        assert_eq!(ctx.countdown, 7);
        assert_eq!(ctx.eta, 3);
        assert!(!ctx.requesting);
        assert_eq!(ctx.timer, TimerCommand::Keep);
    }

    #[test]
    fn take_timer_command_resets_to_keep() {
        let mut ctx = EmergencyContext::new(SimulatorConfig::default());
        ctx.timer = TimerCommand::Cancel;
        assert_eq!(ctx.take_timer_command(), TimerCommand::Cancel);
        assert_eq!(ctx.timer, TimerCommand::Keep);
    }
}
