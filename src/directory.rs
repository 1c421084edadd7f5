//! Directory records shown by the screens.
//!
//! These are plain data: doctors, hospitals, ambulances, map pins and the
//! unit assigned to an emergency request.  Screens receive them from a
//! [`DirectoryPort`](crate::app::ports::DirectoryPort) and never mutate
//! them.

use serde::{Deserialize, Serialize};

/// Online/busy indicator on a doctor card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoctorStatus {
    Online,
    Busy,
}

impl DoctorStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "Available",
            Self::Busy => "Busy",
        }
    }
}

/// Availability of an ambulance or map resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    Available,
    Busy,
}

impl UnitStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Busy => "Busy",
        }
    }

    pub fn is_available(self) -> bool {
        self == Self::Available
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub rating: f32,
    pub experience: String,
    pub availability: String,
    pub distance: String,
    pub hospital: String,
    /// Consultation fee in rupees.
    pub consultation_fee: u32,
    pub image: String,
    pub status: DoctorStatus,
}

/// Resource counts a hospital currently reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BedAvailability {
    pub icu: u16,
    pub oxygen: u16,
    pub blood: u16,
    #[serde(default)]
    pub ventilators: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: f32,
    pub distance: String,
    pub availability: BedAvailability,
    pub wait_time: String,
    /// Runs a 24/7 emergency department.
    pub emergency: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ambulance {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: f32,
    pub distance: String,
    pub eta: String,
    pub driver_name: String,
    pub vehicle_number: String,
    pub status: UnitStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinKind {
    Hospital,
    Ambulance,
}

/// Pin placement on the simulated map, as percentage offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinPosition {
    pub top_pct: u8,
    pub left_pct: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPin {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PinKind,
    pub distance: String,
    #[serde(default)]
    pub availability: Option<BedAvailability>,
    #[serde(default)]
    pub eta: Option<String>,
    pub position: PinPosition,
    pub status: UnitStatus,
}

/// The unit dispatched to an emergency request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedUnit {
    pub id: String,
    pub driver: String,
    pub phone: String,
    pub vehicle_number: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub location: String,
}

impl AssignedUnit {
    /// Avatar fallback: first character of the driver's name.
    pub fn driver_initial(&self) -> Option<char> {
        self.driver.chars().next()
    }
}

/// The doctor shown on the consultation screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultingDoctor {
    pub name: String,
    pub specialty: String,
    pub rating: f32,
    pub experience: String,
    pub hospital: String,
    pub image: String,
}

impl From<&Doctor> for ConsultingDoctor {
    fn from(d: &Doctor) -> Self {
        Self {
            name: d.name.clone(),
            specialty: d.specialty.clone(),
            rating: d.rating,
            experience: d.experience.clone(),
            hospital: d.hospital.clone(),
            image: d.image.clone(),
        }
    }
}
