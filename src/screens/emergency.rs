//! Emergency request screen.
//!
//! Hosts an [`EmergencySimulator`] and renders its state: the SOS
//! button, the confirmation dial, the dispatched unit, live tracking and
//! arrival.  Every command and timer goes through the simulator; this
//! module only maps buttons to commands and state to text.

use log::info;
use serde::Serialize;

use crate::app::commands::{CommandOutcome, EmergencyCommand};
use crate::app::ports::EventSink;
use crate::app::service::EmergencySimulator;
use crate::config::SimulatorConfig;
use crate::directory::AssignedUnit;
use crate::fsm::StepId;
use crate::navigation::{NavIntent, Route};

/// Shown on the dispatched card; the simulator has no real estimate.
pub const ESTIMATED_ARRIVAL: &str = "5-7 minutes";

/// Degrees the confirmation dial turns per elapsed second.
pub const DIAL_DEGREES_PER_TICK: u16 = 36;

// ───────────────────────────────────────────────────────────────
// View
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderAction {
    /// Cancels the request in place.
    Cancel,
    /// Navigates back.
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmergencyHeader {
    pub action: HeaderAction,
    pub label: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum StepBody {
    Request {
        title: &'static str,
        prompt: &'static str,
        button_label: &'static str,
        button_enabled: bool,
        footer: &'static str,
    },
    Confirming {
        title: &'static str,
        message: &'static str,
        countdown: u8,
        dial_rotation_deg: u16,
        action: &'static str,
    },
    Dispatched {
        title: &'static str,
        subtitle: &'static str,
        driver_initial: Option<char>,
        driver_caption: String,
        vehicle: String,
        unit_type: String,
        location: String,
        estimated_arrival: &'static str,
        actions: [&'static str; 2],
    },
    Enroute {
        title: &'static str,
        eta_text: String,
        progress_pct: u8,
        unit_caption: String,
        actions: [&'static str; 2],
        reassurance_title: &'static str,
        reassurance: &'static str,
    },
    Arrived {
        title: &'static str,
        message: &'static str,
        actions: [&'static str; 2],
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyView {
    pub step: StepId,
    pub countdown: u8,
    pub eta: u8,
    pub requesting: bool,
    pub header: Option<EmergencyHeader>,
    pub badge: Option<&'static str>,
    pub unit: AssignedUnit,
    pub body: StepBody,
}

/// `(start - countdown) * 36`, clamped at the start value.
pub fn dial_rotation(countdown_start: u8, countdown: u8) -> u16 {
    u16::from(countdown_start.saturating_sub(countdown)) * DIAL_DEGREES_PER_TICK
}

/// `round((start - eta) / start * 100)`; 0 when `start` is 0.
pub fn progress_percent(eta_start: u8, eta: u8) -> u8 {
    if eta_start == 0 {
        return 0;
    }
    let start = u32::from(eta_start);
    let done = u32::from(eta_start.saturating_sub(eta));
    // Round half up.
    ((done * 200 + start) / (start * 2)) as u8
}

// ───────────────────────────────────────────────────────────────
// Screen
// ───────────────────────────────────────────────────────────────

pub struct EmergencyScreen {
    sim: EmergencySimulator,
}

impl EmergencyScreen {
    /// Open the screen: a fresh request in `Request`.
    pub fn open(config: SimulatorConfig, unit: AssignedUnit, sink: &mut impl EventSink) -> Self {
        let mut sim = EmergencySimulator::new(config, unit);
        sim.start(sink);
        Self { sim }
    }

    pub fn simulator(&self) -> &EmergencySimulator {
        &self.sim
    }

    pub fn step(&self) -> StepId {
        self.sim.step()
    }

    // ── Buttons ───────────────────────────────────────────────

    /// The SOS button.
    pub fn press_sos(&mut self, sink: &mut impl EventSink) -> CommandOutcome {
        self.sim.handle_command(EmergencyCommand::Start, sink)
    }

    /// "Cancel Request", or aborting the "Requesting..." delay.
    pub fn cancel(&mut self, sink: &mut impl EventSink) -> CommandOutcome {
        self.sim.handle_command(EmergencyCommand::Cancel, sink)
    }

    /// "Track Live" on the dispatched card.
    pub fn track_live(&mut self, sink: &mut impl EventSink) -> CommandOutcome {
        self.sim.handle_command(EmergencyCommand::RequestTracking, sink)
    }

    /// The header button.  Cancels in `Confirming`; navigates back in
    /// later steps; there is no header in `Request`.
    pub fn header_action(&mut self, sink: &mut impl EventSink) -> Option<NavIntent> {
        match self.header()?.action {
            HeaderAction::Cancel => {
                self.cancel(sink);
                None
            }
            HeaderAction::Back => Some(NavIntent::Back),
        }
    }

    /// "Return Home", offered once the unit has arrived.
    pub fn return_home(&self) -> Option<NavIntent> {
        (self.sim.step() == StepId::Arrived).then_some(NavIntent::Go(Route::Home))
    }

    pub fn advance(&mut self, elapsed_ms: u64, sink: &mut impl EventSink) {
        self.sim.advance(elapsed_ms, sink);
    }

    /// The screen is going away.  Pending timers are dropped.
    pub fn leave(&mut self, sink: &mut impl EventSink) {
        info!("emergency: leaving screen in {:?}", self.sim.step());
        self.sim.stop(sink);
    }

    // ── View ──────────────────────────────────────────────────

    fn header(&self) -> Option<EmergencyHeader> {
        let (action, label) = match self.sim.step() {
            StepId::Request => return None,
            StepId::Confirming => (HeaderAction::Cancel, "Cancel"),
            _ => (HeaderAction::Back, "Back"),
        };
        Some(EmergencyHeader {
            action,
            label,
            status: "Emergency Active",
        })
    }

    pub fn view(&self) -> EmergencyView {
        let snap = self.sim.snapshot();
        let config = self.sim.config();
        let unit = self.sim.assigned_unit();

        let body = match snap.step {
            StepId::Request => StepBody::Request {
                title: "Emergency SOS",
                prompt: "Press and hold the button below to request immediate medical assistance",
                button_label: if snap.requesting { "Requesting..." } else { "SOS" },
                button_enabled: !snap.requesting,
                footer: "Your location will be shared automatically",
            },
            StepId::Confirming => StepBody::Confirming {
                title: "Confirming Emergency",
                message: "Finding the nearest available ambulance...",
                countdown: snap.countdown,
                dial_rotation_deg: dial_rotation(config.countdown_start, snap.countdown),
                action: "Cancel Request",
            },
            StepId::Dispatched => StepBody::Dispatched {
                title: "Ambulance Dispatched!",
                subtitle: "Help is on the way",
                driver_initial: unit.driver_initial(),
                driver_caption: format!("Driver • Unit #{}", unit.id),
                vehicle: unit.vehicle_number.clone(),
                unit_type: unit.unit_type.clone(),
                location: unit.location.clone(),
                estimated_arrival: ESTIMATED_ARRIVAL,
                actions: ["Call Driver", "Track Live"],
            },
            StepId::Enroute => StepBody::Enroute {
                title: "En Route",
                eta_text: format!("ETA: {} minutes", snap.eta),
                progress_pct: progress_percent(config.eta_start_minutes, snap.eta),
                unit_caption: format!("Unit #{}", unit.id),
                actions: ["Call", "Live Location"],
                reassurance_title: "Stay Calm",
                reassurance: "Help is almost here. Try to remain calm and follow any instructions from our medical team.",
            },
            StepId::Arrived => StepBody::Arrived {
                title: "Ambulance Arrived!",
                message: "The medical team is ready to assist you",
                actions: ["Contact Medical Team", "Return Home"],
            },
        };

        EmergencyView {
            step: snap.step,
            countdown: snap.countdown,
            eta: snap.eta,
            requesting: snap.requesting,
            header: self.header(),
            badge: match snap.step {
                StepId::Dispatched => Some("Dispatched"),
                StepId::Enroute => Some("En Route"),
                _ => None,
            },
            unit: unit.clone(),
            body,
        }
    }
}
