//! Resource map: filter chips, positioned pins and "My Location".

use log::{debug, info};
use serde::Serialize;

use crate::app::commands::CommandOutcome;
use crate::app::ports::{DirectoryPort, SchedulerDelegate};
use crate::config::SimulatorConfig;
use crate::directory::{BedAvailability, MapPin, PinKind, PinPosition};
use crate::scheduler::{Fired, Schedule, Scheduler};

use super::{Icon, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MapFilter {
    #[default]
    All,
    Icu,
    Oxygen,
    Blood,
    Ambulance,
}

impl MapFilter {
    pub const ALL: [Self; 5] = [Self::All, Self::Icu, Self::Oxygen, Self::Blood, Self::Ambulance];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Icu => "ICU",
            Self::Oxygen => "Oxygen",
            Self::Blood => "Blood",
            Self::Ambulance => "Ambulance",
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            Self::All => Icon::MapPin,
            Self::Icu => Icon::Bed,
            Self::Oxygen => Icon::Wind,
            Self::Blood => Icon::Droplets,
            Self::Ambulance => Icon::Ambulance,
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label().eq_ignore_ascii_case(id))
    }

    /// Resource filters keep hospitals reporting a positive count of
    /// that resource.
    pub fn admits(self, pin: &MapPin) -> bool {
        let stocked = |count: fn(&BedAvailability) -> u16| {
            pin.kind == PinKind::Hospital && pin.availability.as_ref().is_some_and(|a| count(a) > 0)
        };
        match self {
            Self::All => true,
            Self::Icu => stocked(|a| a.icu),
            Self::Oxygen => stocked(|a| a.oxygen),
            Self::Blood => stocked(|a| a.blood),
            Self::Ambulance => pin.kind == PinKind::Ambulance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterChip {
    pub id: MapFilter,
    pub label: &'static str,
    pub icon: Icon,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinView {
    pub id: u32,
    pub name: String,
    pub distance: String,
    pub position: PinPosition,
    pub tone: Tone,
    pub icon: Icon,
    /// Info-card badges, e.g. `ICU: 5`, `O2: 12`, `ETA: 3 min`.
    pub badges: Vec<String>,
}

impl From<&MapPin> for PinView {
    fn from(pin: &MapPin) -> Self {
        let tone = match (pin.status.is_available(), pin.kind) {
            (false, _) => Tone::Warning,
            (true, PinKind::Hospital) => Tone::Primary,
            (true, PinKind::Ambulance) => Tone::Accent,
        };
        let mut badges = Vec::new();
        if let Some(a) = pin.availability {
            badges.push(format!("ICU: {}", a.icu));
            badges.push(format!("O2: {}", a.oxygen));
        }
        if let Some(eta) = &pin.eta {
            badges.push(format!("ETA: {eta}"));
        }
        Self {
            id: pin.id,
            name: pin.name.clone(),
            distance: pin.distance.clone(),
            position: pin.position,
            tone,
            icon: match pin.kind {
                PinKind::Hospital => Icon::MapPin,
                PinKind::Ambulance => Icon::Ambulance,
            },
            badges,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapView {
    pub title: &'static str,
    pub filters: Vec<FilterChip>,
    pub pins: Vec<PinView>,
    pub locating: bool,
    pub locate_label: &'static str,
    pub directions_label: &'static str,
}

/// Clears the locating flag when the locate timer fires.
struct LocateDone<'a> {
    locating: &'a mut bool,
}

impl SchedulerDelegate for LocateDone<'_> {
    fn on_timer_fired(&mut self, fired: &Fired) {
        debug!("map: '{}' fired at {}ms", fired.label, fired.at_ms);
        *self.locating = false;
    }
}

pub struct MapScreen {
    filter: MapFilter,
    pins: Vec<MapPin>,
    locating: bool,
    locate_delay_ms: u64,
    scheduler: Scheduler,
}

impl MapScreen {
    pub fn new(directory: &impl DirectoryPort, config: &SimulatorConfig) -> Self {
        Self {
            filter: MapFilter::All,
            pins: directory.map_pins().to_vec(),
            locating: false,
            locate_delay_ms: config.locate_delay_ms,
            scheduler: Scheduler::new(),
        }
    }

    pub fn filter(&self) -> MapFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: MapFilter) {
        if filter != self.filter {
            debug!("map: filter {:?} -> {:?}", self.filter, filter);
            self.filter = filter;
        }
    }

    pub fn is_locating(&self) -> bool {
        self.locating
    }

    /// "My Location".  Ignored while a locate is already running.
    pub fn locate_me(&mut self) -> CommandOutcome {
        if self.locating {
            return CommandOutcome::Ignored;
        }
        match self
            .scheduler
            .add(Schedule::one_shot("locate", self.locate_delay_ms))
        {
            Some(_) => {
                self.locating = true;
                info!("map: locating for {}ms", self.locate_delay_ms);
                CommandOutcome::Applied
            }
            None => CommandOutcome::Ignored,
        }
    }

    pub fn advance(&mut self, elapsed_ms: u64) {
        let mut done = LocateDone {
            locating: &mut self.locating,
        };
        self.scheduler.advance(elapsed_ms, &mut done);
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.active_count()
    }

    pub fn view(&self) -> MapView {
        MapView {
            title: "Resource Map",
            filters: MapFilter::ALL
                .into_iter()
                .map(|f| FilterChip {
                    id: f,
                    label: f.label(),
                    icon: f.icon(),
                    active: f == self.filter,
                })
                .collect(),
            pins: self
                .pins
                .iter()
                .filter(|p| self.filter.admits(p))
                .map(PinView::from)
                .collect(),
            locating: self.locating,
            locate_label: if self.locating {
                "Locating..."
            } else {
                "My Location"
            },
            directions_label: "Get Directions",
        }
    }
}
