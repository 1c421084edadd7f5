//! Resource list: doctors, hospitals and ambulances, filtered by the
//! `type` query and a free-text search.

use log::{debug, warn};
use serde::Serialize;

use crate::app::ports::DirectoryPort;
use crate::directory::{Ambulance, Doctor, DoctorStatus, Hospital};
use crate::navigation::{NavIntent, Route};

use super::{Icon, Tone};

/// Longest search text kept, in bytes.
pub const SEARCH_CAPACITY: usize = 64;

// ───────────────────────────────────────────────────────────────
// Filter
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceFilter {
    All,
    Doctor,
    Ambulance,
    Icu,
    Oxygen,
    Blood,
    /// A `type` value the list does not know.  Shows no sections and
    /// links back as `type=unknown`.
    Unrecognized,
}

impl ResourceFilter {
    /// Interpret the `type` query value.  Missing means `All`.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            None | Some("all") => Self::All,
            Some("doctor") => Self::Doctor,
            Some("ambulance") => Self::Ambulance,
            Some("icu") => Self::Icu,
            Some("oxygen") => Self::Oxygen,
            Some("blood") => Self::Blood,
            Some(other) => {
                debug!("resources: unrecognised type '{other}'");
                Self::Unrecognized
            }
        }
    }

    /// Query value that reproduces this filter; `None` for the bare path.
    pub fn as_query(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Unrecognized => Some("unknown"),
            Self::Doctor => Some("doctor"),
            Self::Ambulance => Some("ambulance"),
            Self::Icu => Some("icu"),
            Self::Oxygen => Some("oxygen"),
            Self::Blood => Some("blood"),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::All => "All Resources",
            Self::Ambulance => "Ambulances",
            Self::Icu => "ICU Beds",
            Self::Oxygen => "Oxygen Supply",
            Self::Blood => "Blood Units",
            Self::Doctor | Self::Unrecognized => "Resources",
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            Self::Icu => Icon::Bed,
            Self::Oxygen => Icon::Wind,
            Self::Blood => Icon::Droplets,
            Self::Ambulance => Icon::Phone,
            _ => Icon::Stethoscope,
        }
    }

    pub fn shows_doctors(self) -> bool {
        matches!(self, Self::All | Self::Doctor)
    }

    pub fn shows_hospitals(self) -> bool {
        matches!(self, Self::All | Self::Icu | Self::Oxygen | Self::Blood)
    }

    pub fn shows_ambulances(self) -> bool {
        matches!(self, Self::All | Self::Ambulance)
    }
}

// ───────────────────────────────────────────────────────────────
// View
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section<T> {
    pub heading: &'static str,
    pub icon: Icon,
    pub cards: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorCard {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub rating: f32,
    pub experience: String,
    pub distance: String,
    pub availability: String,
    pub hospital: String,
    pub fee: String,
    pub status: &'static str,
    /// Presence dot colour.
    pub status_tone: Tone,
    pub image: String,
}

impl From<&Doctor> for DoctorCard {
    fn from(d: &Doctor) -> Self {
        Self {
            id: d.id,
            name: d.name.clone(),
            specialty: d.specialty.clone(),
            rating: d.rating,
            experience: d.experience.clone(),
            distance: d.distance.clone(),
            availability: d.availability.clone(),
            hospital: d.hospital.clone(),
            fee: format!("₹{}", d.consultation_fee),
            status: d.status.label(),
            status_tone: match d.status {
                DoctorStatus::Online => Tone::Success,
                DoctorStatus::Busy => Tone::Warning,
            },
            image: d.image.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceCount {
    pub label: &'static str,
    pub count: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HospitalCard {
    pub id: u32,
    pub name: String,
    pub kind: String,
    pub rating: f32,
    pub distance: String,
    pub wait_time: String,
    pub counts: [ResourceCount; 4],
    pub emergency_badge: Option<&'static str>,
}

impl From<&Hospital> for HospitalCard {
    fn from(h: &Hospital) -> Self {
        let a = h.availability;
        Self {
            id: h.id,
            name: h.name.clone(),
            kind: h.kind.clone(),
            rating: h.rating,
            distance: h.distance.clone(),
            wait_time: h.wait_time.clone(),
            counts: [
                ResourceCount { label: "ICU", count: a.icu },
                ResourceCount { label: "O2", count: a.oxygen },
                ResourceCount { label: "Blood", count: a.blood },
                ResourceCount { label: "Vent", count: a.ventilators },
            ],
            emergency_badge: h.emergency.then_some("24/7 Emergency"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmbulanceCard {
    pub id: u32,
    pub name: String,
    pub kind: String,
    pub rating: f32,
    pub distance: String,
    pub eta: String,
    pub driver_name: String,
    pub vehicle_number: String,
    pub status: &'static str,
    pub action: &'static str,
    pub bookable: bool,
}

impl From<&Ambulance> for AmbulanceCard {
    fn from(a: &Ambulance) -> Self {
        let bookable = a.status.is_available();
        Self {
            id: a.id,
            name: a.name.clone(),
            kind: a.kind.clone(),
            rating: a.rating,
            distance: a.distance.clone(),
            eta: a.eta.clone(),
            driver_name: a.driver_name.clone(),
            vehicle_number: a.vehicle_number.clone(),
            status: a.status.label(),
            action: if bookable { "Book Now" } else { "Currently Busy" },
            bookable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceListView {
    pub title: &'static str,
    pub icon: Icon,
    pub search: String,
    pub placeholder: &'static str,
    pub doctors: Option<Section<DoctorCard>>,
    pub hospitals: Option<Section<HospitalCard>>,
    pub ambulances: Option<Section<AmbulanceCard>>,
}

// ───────────────────────────────────────────────────────────────
// Screen
// ───────────────────────────────────────────────────────────────

pub struct ResourceListScreen {
    filter: ResourceFilter,
    search: heapless::String<SEARCH_CAPACITY>,
    doctors: Vec<Doctor>,
    hospitals: Vec<Hospital>,
    ambulances: Vec<Ambulance>,
}

impl ResourceListScreen {
    pub fn new(filter: ResourceFilter, directory: &impl DirectoryPort) -> Self {
        Self {
            filter,
            search: heapless::String::new(),
            doctors: directory.doctors().to_vec(),
            hospitals: directory.hospitals().to_vec(),
            ambulances: directory.ambulances().to_vec(),
        }
    }

    pub fn filter(&self) -> ResourceFilter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replace the search text.  Characters past the capacity are dropped.
    pub fn set_search(&mut self, text: &str) {
        self.search.clear();
        for c in text.chars() {
            if self.search.push(c).is_err() {
                debug!("resources: search text truncated at {} bytes", self.search.len());
                break;
            }
        }
    }

    fn matches(&self, fields: &[&str]) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || fields
                .iter()
                .any(|f| f.to_lowercase().contains(needle.as_str()))
    }

    pub fn view(&self) -> ResourceListView {
        let f = self.filter;
        ResourceListView {
            title: f.title(),
            icon: f.icon(),
            search: self.search.as_str().to_string(),
            placeholder: "Search resources...",
            doctors: f.shows_doctors().then(|| Section {
                heading: "Available Doctors",
                icon: Icon::Stethoscope,
                cards: self
                    .doctors
                    .iter()
                    .filter(|d| self.matches(&[&d.name, &d.specialty, &d.hospital]))
                    .map(DoctorCard::from)
                    .collect(),
            }),
            hospitals: f.shows_hospitals().then(|| Section {
                heading: "Nearby Hospitals",
                icon: Icon::MapPin,
                cards: self
                    .hospitals
                    .iter()
                    .filter(|h| self.matches(&[&h.name, &h.kind]))
                    .map(HospitalCard::from)
                    .collect(),
            }),
            ambulances: f.shows_ambulances().then(|| Section {
                heading: "Available Ambulances",
                icon: Icon::Phone,
                cards: self
                    .ambulances
                    .iter()
                    .filter(|a| {
                        self.matches(&[&a.name, &a.kind, &a.driver_name, &a.vehicle_number])
                    })
                    .map(AmbulanceCard::from)
                    .collect(),
            }),
        }
    }

    // ── Actions ───────────────────────────────────────────────

    /// "Consult" on a doctor card.
    pub fn consult(&self, doctor_id: u32) -> Option<NavIntent> {
        if self.doctors.iter().any(|d| d.id == doctor_id) {
            Some(NavIntent::Go(Route::VideoCall))
        } else {
            warn!("resources: no doctor with id {doctor_id}");
            None
        }
    }

    /// "Book Now" on an ambulance card.  Busy units cannot be booked.
    pub fn book_ambulance(&self, ambulance_id: u32) -> Option<NavIntent> {
        match self.ambulances.iter().find(|a| a.id == ambulance_id) {
            Some(a) if a.status.is_available() => Some(NavIntent::Go(Route::Emergency)),
            Some(a) => {
                warn!("resources: {} is busy, booking ignored", a.name);
                None
            }
            None => {
                warn!("resources: no ambulance with id {ambulance_id}");
                None
            }
        }
    }

    pub fn back(&self) -> NavIntent {
        NavIntent::Back
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::static_directory::StaticDirectory;

    fn screen(filter: ResourceFilter) -> ResourceListScreen {
        ResourceListScreen::new(filter, &StaticDirectory::demo().unwrap())
    }

    #[test]
    fn all_shows_every_section() {
        let v = screen(ResourceFilter::All).view();
        assert_eq!(v.title, "All Resources");
        assert_eq!(v.doctors.unwrap().cards.len(), 3);
        assert_eq!(v.hospitals.unwrap().cards.len(), 2);
        assert_eq!(v.ambulances.unwrap().cards.len(), 2);
    }

    #[test]
    fn section_visibility_follows_filter() {
        let v = screen(ResourceFilter::Icu).view();
        assert_eq!(v.title, "ICU Beds");
        assert_eq!(v.icon, Icon::Bed);
        assert!(v.doctors.is_none());
        assert!(v.hospitals.is_some());
        assert!(v.ambulances.is_none());

        let v = screen(ResourceFilter::Ambulance).view();
        assert!(v.doctors.is_none() && v.hospitals.is_none());
        assert!(v.ambulances.is_some());

        let v = screen(ResourceFilter::Doctor).view();
        assert_eq!(v.title, "Resources");
        assert!(v.doctors.is_some());
        assert!(v.hospitals.is_none() && v.ambulances.is_none());
    }

    #[test]
    fn unrecognised_filter_shows_nothing() {
        let v = screen(ResourceFilter::from_query(Some("helicopter"))).view();
        assert_eq!(v.title, "Resources");
        assert!(v.doctors.is_none() && v.hospitals.is_none() && v.ambulances.is_none());
    }

    #[test]
    fn doctor_cards_carry_fee_and_status() {
        let cards = screen(ResourceFilter::Doctor).view().doctors.unwrap().cards;
        assert_eq!(cards[0].fee, "₹150");
        assert_eq!(cards[0].status, "Available");
        assert_eq!(cards[1].status, "Busy");
        assert_eq!(cards[1].status_tone, Tone::Warning);
    }

    #[test]
    fn hospital_cards_carry_counts_and_badge() {
        let cards = screen(ResourceFilter::Oxygen).view().hospitals.unwrap().cards;
        let city = &cards[0];
        assert_eq!(city.counts[0], ResourceCount { label: "ICU", count: 5 });
        assert_eq!(city.counts[3], ResourceCount { label: "Vent", count: 3 });
        assert_eq!(city.emergency_badge, Some("24/7 Emergency"));
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut s = screen(ResourceFilter::All);
        s.set_search("CARDIO");
        let v = s.view();
        let doctors = v.doctors.unwrap().cards;
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].name, "Dr. Michael Chen");
        assert!(v.ambulances.unwrap().cards.is_empty());

        s.set_search("ab-1234");
        let ambulances = s.view().ambulances.unwrap().cards;
        assert_eq!(ambulances.len(), 1);
        assert_eq!(ambulances[0].driver_name, "James Wilson");
    }

    #[test]
    fn search_text_is_bounded() {
        let mut s = screen(ResourceFilter::All);
        s.set_search(&"x".repeat(100));
        assert_eq!(s.search().len(), SEARCH_CAPACITY);
    }

    #[test]
    fn busy_ambulance_cannot_be_booked() {
        let s = screen(ResourceFilter::Ambulance);
        let cards = s.view().ambulances.unwrap().cards;
        assert_eq!(cards[0].action, "Book Now");
        assert_eq!(cards[1].action, "Currently Busy");

        assert_eq!(s.book_ambulance(1), Some(NavIntent::Go(Route::Emergency)));
        assert_eq!(s.book_ambulance(2), None);
        assert_eq!(s.book_ambulance(99), None);
    }

    #[test]
    fn consult_opens_video_call() {
        let s = screen(ResourceFilter::All);
        assert_eq!(s.consult(2), Some(NavIntent::Go(Route::VideoCall)));
        assert_eq!(s.consult(42), None);
        assert_eq!(s.back(), NavIntent::Back);
    }
}
