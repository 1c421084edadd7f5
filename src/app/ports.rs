//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ EmergencySimulator / screens (domain)
//! ```
//!
//! Driven adapters (fixture providers, event sinks) implement these
//! traits.  The domain consumes them via generics, so the screens never
//! know where their data comes from or where their events go.

use crate::directory::{Ambulance, AssignedUnit, ConsultingDoctor, Doctor, Hospital, MapPin};
use crate::scheduler::Fired;

// ───────────────────────────────────────────────────────────────
// Directory port (driven adapter: fixture data → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: screens call this to obtain the records they display.
pub trait DirectoryPort {
    fn doctors(&self) -> &[Doctor];

    fn hospitals(&self) -> &[Hospital];

    fn ambulances(&self) -> &[Ambulance];

    /// Pins for the simulated map, each with a fixed screen position.
    fn map_pins(&self) -> &[MapPin];

    /// The unit every emergency request is assigned.
    fn assigned_unit(&self) -> &AssignedUnit;

    /// The doctor on the other end of a video consultation.
    fn consulting_doctor(&self) -> ConsultingDoctor;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / views)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from its consumers)
// ───────────────────────────────────────────────────────────────

/// Callback trait that [`Scheduler::advance`](crate::scheduler::Scheduler::advance)
/// invokes for every timer expiry, in deadline order.
pub trait SchedulerDelegate {
    fn on_timer_fired(&mut self, fired: &Fired);
}
