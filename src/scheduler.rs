//! Timer/scheduler engine.
//!
//! Every screen that needs time owns one [`Scheduler`].  The scheduler
//! keeps a simulated monotonic clock in milliseconds and a small fixed
//! set of timer slots.  Nothing here reads the wall clock: time only
//! moves when the host calls [`Scheduler::advance`] or drains
//! [`Scheduler::next_due`], which makes every screen deterministic.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Timer Sources                            │
//! │                                                              │
//! │  ┌────────────┐  ┌────────────┐  ┌────────────┐              │
//! │  │ One-Shot   │  │ Periodic   │  │ Periodic   │  ...         │
//! │  │ (delay)    │  │ (1 Hz)     │  │ (30 s)     │              │
//! │  └─────┬──────┘  └─────┬──────┘  └─────┬──────┘              │
//! │        ▼               ▼               ▼                     │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  next_due(until)  — earliest deadline first            │  │
//! │  └───────────────────────┬────────────────────────────────┘  │
//! │                          ▼                                   │
//! │        screen handler / SchedulerDelegate                    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers that need to arm or cancel timers while reacting to a fire
//! use the pull-style [`Scheduler::next_due`] loop so they can borrow
//! the scheduler mutably between fires.  Handlers that only update their
//! own state use [`Scheduler::advance`] with a [`SchedulerDelegate`];
//! there, back-to-back periods of one periodic timer that no other timer
//! interleaves with arrive as a single [`Fired`] with `periods > 1`.
//!
//! A periodic timer whose next deadline would pass `u64::MAX` fires its
//! last period and is dropped.

use heapless::Vec;
use log::{debug, info, warn};

use crate::app::ports::SchedulerDelegate;

// ═══════════════════════════════════════════════════════════════
//  Schedule types
// ═══════════════════════════════════════════════════════════════

/// Maximum number of concurrent timers per scheduler (stack-allocated).
pub const MAX_SCHEDULES: usize = 4;

/// Opaque handle to an armed timer.  Handles are never reused, so a
/// stale handle cannot cancel a newer timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u32);

/// A single schedule request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Human-readable label (e.g., "countdown").
    pub label: &'static str,
    /// Type of schedule.
    pub kind: ScheduleKind,
}

impl Schedule {
    pub const fn periodic(label: &'static str, interval_ms: u64) -> Self {
        Self {
            label,
            kind: ScheduleKind::Periodic { interval_ms },
        }
    }

    pub const fn one_shot(label: &'static str, delay_ms: u64) -> Self {
        Self {
            label,
            kind: ScheduleKind::OneShot { delay_ms },
        }
    }
}

/// The type of schedule determines how and when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKind {
    /// Fire every `interval_ms` until removed.
    Periodic { interval_ms: u64 },
    /// Fire once after `delay_ms`, then auto-remove.
    OneShot { delay_ms: u64 },
}

/// Discriminant carried by a [`Fired`] notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleFiredKind {
    Periodic,
    OneShot,
}

/// One timer expiry, reported in deadline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub label: &'static str,
    pub kind: ScheduleFiredKind,
    /// Simulated time of the (last) expiry.
    pub at_ms: u64,
    /// Periods covered by this notification.  Always 1 from
    /// [`Scheduler::next_due`]; may be more from [`Scheduler::advance`].
    pub periods: u64,
}

/// Internal bookkeeping for a live timer.
#[derive(Debug, Clone, Copy)]
struct ScheduleEntry {
    id: TimerId,
    schedule: Schedule,
    due_ms: u64,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// The scheduler engine.
pub struct Scheduler {
    /// Live timers, in arming order.
    entries: Vec<ScheduleEntry, MAX_SCHEDULES>,
    /// Simulated monotonic clock.
    now_ms: u64,
    next_id: u32,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            now_ms: 0,
            next_id: 0,
        }
    }

    /// Current simulated time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Arm a timer relative to the current simulated time.
    /// Returns `None` if all slots are taken or the period is zero.
    pub fn add(&mut self, schedule: Schedule) -> Option<TimerId> {
        let offset = match schedule.kind {
            ScheduleKind::Periodic { interval_ms: 0 } => {
                warn!("Scheduler: refusing zero-period timer '{}'", schedule.label);
                return None;
            }
            ScheduleKind::Periodic { interval_ms } => interval_ms,
            ScheduleKind::OneShot { delay_ms } => delay_ms,
        };

        let id = TimerId(self.next_id);
        let entry = ScheduleEntry {
            id,
            schedule,
            due_ms: self.now_ms.saturating_add(offset),
        };
        if self.entries.push(entry).is_err() {
            warn!("Scheduler: no free slot for '{}'", schedule.label);
            return None;
        }
        self.next_id = self.next_id.wrapping_add(1);
        info!(
            "Scheduler: armed '{}' ({:?}) due at {}ms",
            schedule.label, schedule.kind, entry.due_ms
        );
        Some(id)
    }

    /// Cancel a timer.  Returns `false` if it already fired or was removed.
    pub fn remove(&mut self, id: TimerId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(pos) => {
                let entry = self.entries.remove(pos);
                info!("Scheduler: cancelled '{}'", entry.schedule.label);
                true
            }
            None => false,
        }
    }

    /// Cancel every timer (screen teardown).
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            info!("Scheduler: cancelling {} timer(s)", self.entries.len());
        }
        self.entries.clear();
    }

    /// Whether `id` is still pending.
    pub fn is_armed(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of pending timers.
    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    /// Pop the earliest expiry at or before `until_ms`, moving the clock
    /// to that expiry.  Periodic timers are re-armed one period later;
    /// one-shots are removed.  Ties fire in arming order.
    ///
    /// Call [`settle`](Self::settle) once the loop drains to move the
    /// clock the rest of the way.
    pub fn next_due(&mut self, until_ms: u64) -> Option<Fired> {
        self.pop_due(until_ms, false)
    }

    fn pop_due(&mut self, until_ms: u64, coalesce: bool) -> Option<Fired> {
        let pos = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.id))
            .map(|(i, _)| i)?;

        let entry = self.entries[pos];
        let (kind, periods, at_ms) = match entry.schedule.kind {
            ScheduleKind::Periodic { interval_ms } => {
                let periods = if coalesce {
                    (self.run_limit(&entry, until_ms) - entry.due_ms) / interval_ms + 1
                } else {
                    1
                };
                // Cannot overflow: the last deadline is at most the run limit.
                let last = entry.due_ms + (periods - 1) * interval_ms;
                match last.checked_add(interval_ms) {
                    Some(next) => self.entries[pos].due_ms = next,
                    None => {
                        self.entries.remove(pos);
                        info!(
                            "Scheduler: '{}' reached the end of the clock, dropped",
                            entry.schedule.label
                        );
                    }
                }
                (ScheduleFiredKind::Periodic, periods, last)
            }
            ScheduleKind::OneShot { .. } => {
                self.entries.remove(pos);
                (ScheduleFiredKind::OneShot, 1, entry.due_ms)
            }
        };
        self.now_ms = self.now_ms.max(at_ms);

        debug!(
            "Scheduler: '{}' fired at {}ms (x{})",
            entry.schedule.label, at_ms, periods
        );
        Some(Fired {
            id: entry.id,
            label: entry.schedule.label,
            kind,
            at_ms,
            periods,
        })
    }

    /// Latest deadline `entry` may reach before another timer is owed a
    /// fire.  Never below `entry.due_ms`, since `entry` is the earliest.
    fn run_limit(&self, entry: &ScheduleEntry, until_ms: u64) -> u64 {
        self.entries
            .iter()
            .filter(|o| o.id != entry.id)
            .map(|o| {
                if o.id < entry.id {
                    o.due_ms.saturating_sub(1)
                } else {
                    o.due_ms
                }
            })
            .fold(until_ms, u64::min)
    }

    /// Move the clock forward to `until_ms` without firing anything.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Advance the clock by `elapsed_ms`, notifying `delegate` of every
    /// expiry in deadline order.
    pub fn advance(&mut self, elapsed_ms: u64, delegate: &mut dyn SchedulerDelegate) {
        let until = self.now_ms.saturating_add(elapsed_ms);
        while let Some(fired) = self.pop_due(until, true) {
            delegate.on_timer_fired(&fired);
        }
        self.settle(until);
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    /// Test delegate that records fire events.
    struct RecordingDelegate {
        fires: std::vec::Vec<(&'static str, ScheduleFiredKind, u64)>,
        periods: u64,
    }

    impl RecordingDelegate {
        fn new() -> Self {
            Self {
                fires: std::vec::Vec::new(),
                periods: 0,
            }
        }
    }

    impl SchedulerDelegate for RecordingDelegate {
        fn on_timer_fired(&mut self, fired: &Fired) {
            self.fires.push((fired.label, fired.kind, fired.at_ms));
            self.periods += fired.periods;
        }
    }

    #[test]
    fn periodic_fires_at_interval() {
        let mut sched = Scheduler::new();
        let mut delegate = RecordingDelegate::new();
        sched.add(Schedule::periodic("tick", 1_000)).unwrap();

        sched.advance(999, &mut delegate);
        assert!(delegate.fires.is_empty());

        sched.advance(1, &mut delegate);
        assert_eq!(delegate.fires, [("tick", ScheduleFiredKind::Periodic, 1_000)]);

        // One big step reports the missed periods in a single notification.
        sched.advance(3_000, &mut delegate);
        let times: std::vec::Vec<u64> = delegate.fires.iter().map(|f| f.2).collect();
        assert_eq!(times, [1_000, 4_000]);
        assert_eq!(delegate.periods, 4);
        assert_eq!(sched.now_ms(), 4_000);
    }

    #[test]
    fn next_due_reports_every_period() {
        let mut sched = Scheduler::new();
        sched.add(Schedule::periodic("tick", 1_000)).unwrap();
        let mut times = std::vec::Vec::new();
        while let Some(fired) = sched.next_due(3_500) {
            assert_eq!(fired.periods, 1);
            times.push(fired.at_ms);
        }
        assert_eq!(times, [1_000, 2_000, 3_000]);
    }

    #[test]
    fn coalesced_periods_stop_at_other_deadlines() {
        let mut sched = Scheduler::new();
        let mut delegate = RecordingDelegate::new();
        sched.add(Schedule::one_shot("early", 2_500)).unwrap();
        sched.add(Schedule::periodic("tick", 1_000)).unwrap();
        sched.add(Schedule::one_shot("late", 4_000)).unwrap();

        sched.advance(6_000, &mut delegate);
        let labels: std::vec::Vec<(&str, u64)> =
            delegate.fires.iter().map(|f| (f.0, f.2)).collect();
        // "tick" was armed before "late", so it fires first at 4 000.
        assert_eq!(
            labels,
            [
                ("tick", 2_000),
                ("early", 2_500),
                ("tick", 4_000),
                ("late", 4_000),
                ("tick", 6_000),
            ]
        );
        assert_eq!(delegate.periods, 8);
    }

    #[test]
    fn advance_to_end_of_clock_returns() {
        let mut sched = Scheduler::new();
        let mut delegate = RecordingDelegate::new();
        sched.add(Schedule::periodic("tick", 1_000)).unwrap();

        sched.advance(u64::MAX, &mut delegate);
        assert_eq!(sched.now_ms(), u64::MAX);
        assert_eq!(delegate.periods, u64::MAX / 1_000);
        // No deadline past the end of the clock: the timer is gone.
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn periodic_near_end_of_clock_is_dropped_by_next_due() {
        let mut sched = Scheduler::new();
        sched.settle(u64::MAX - 1_500);
        sched.add(Schedule::periodic("tick", 1_000)).unwrap();

        assert!(sched.next_due(u64::MAX).is_some());
        assert!(sched.next_due(u64::MAX).is_none());
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn oneshot_fires_once() {
        let mut sched = Scheduler::new();
        let mut delegate = RecordingDelegate::new();
        sched.add(Schedule::one_shot("delay", 2_000)).unwrap();

        sched.advance(1_999, &mut delegate);
        assert!(delegate.fires.is_empty());

        sched.advance(1, &mut delegate);
        assert_eq!(delegate.fires.len(), 1);
        assert_eq!(delegate.fires[0].1, ScheduleFiredKind::OneShot);

        sched.advance(10_000, &mut delegate);
        assert_eq!(delegate.fires.len(), 1);
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn removed_timer_never_fires() {
        let mut sched = Scheduler::new();
        let mut delegate = RecordingDelegate::new();
        let id = sched.add(Schedule::periodic("tick", 100)).unwrap();
        assert!(sched.remove(id));
        assert!(!sched.remove(id));

        sched.advance(1_000, &mut delegate);
        assert!(delegate.fires.is_empty());
    }

    #[test]
    fn stale_handle_cannot_cancel_new_timer() {
        let mut sched = Scheduler::new();
        let old = sched.add(Schedule::one_shot("a", 10)).unwrap();
        sched.remove(old);
        let new = sched.add(Schedule::one_shot("b", 10)).unwrap();
        assert_ne!(old, new);
        assert!(!sched.remove(old));
        assert!(sched.is_armed(new));
    }

    #[test]
    fn ties_fire_in_arming_order() {
        let mut sched = Scheduler::new();
        let mut delegate = RecordingDelegate::new();
        sched.add(Schedule::one_shot("first", 500)).unwrap();
        sched.add(Schedule::one_shot("second", 500)).unwrap();

        sched.advance(500, &mut delegate);
        let labels: std::vec::Vec<&str> = delegate.fires.iter().map(|f| f.0).collect();
        assert_eq!(labels, ["first", "second"]);
    }

    #[test]
    fn full_scheduler_rejects_new_timer() {
        let mut sched = Scheduler::new();
        for _ in 0..MAX_SCHEDULES {
            assert!(sched.add(Schedule::one_shot("x", 1)).is_some());
        }
        assert!(sched.add(Schedule::one_shot("overflow", 1)).is_none());
    }

    #[test]
    fn zero_period_is_rejected() {
        let mut sched = Scheduler::new();
        assert!(sched.add(Schedule::periodic("spin", 0)).is_none());
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn next_due_lets_handler_rearm() {
        let mut sched = Scheduler::new();
        let first = sched.add(Schedule::one_shot("delay", 100)).unwrap();

        let fired = sched.next_due(1_000).unwrap();
        assert_eq!(fired.id, first);
        assert_eq!(sched.now_ms(), 100);

        // Armed relative to the expiry, not to the end of the window.
        sched.add(Schedule::one_shot("follow-up", 100)).unwrap();
        let fired = sched.next_due(1_000).unwrap();
        assert_eq!(fired.at_ms, 200);
        assert!(sched.next_due(1_000).is_none());

        sched.settle(1_000);
        assert_eq!(sched.now_ms(), 1_000);
    }

    #[test]
    fn clear_cancels_everything() {
        let mut sched = Scheduler::new();
        let mut delegate = RecordingDelegate::new();
        sched.add(Schedule::periodic("a", 10)).unwrap();
        sched.add(Schedule::one_shot("b", 10)).unwrap();
        sched.clear();
        sched.advance(100, &mut delegate);
        assert!(delegate.fires.is_empty());
    }
}
