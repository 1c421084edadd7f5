//! Fixture-backed directory adapter.
//!
//! Implements [`DirectoryPort`] over the demo records shipped in
//! `fixtures/demo.json`, embedded at compile time.  Any document with the
//! same shape can be loaded through [`StaticDirectory::from_json`].

use log::info;
use serde::Deserialize;

use crate::app::ports::DirectoryPort;
use crate::directory::{Ambulance, AssignedUnit, ConsultingDoctor, Doctor, Hospital, MapPin};
use crate::error::{FixtureError, Result};

const DEMO_FIXTURES: &str = include_str!("../../fixtures/demo.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureDocument {
    doctors: Vec<Doctor>,
    hospitals: Vec<Hospital>,
    ambulances: Vec<Ambulance>,
    map_pins: Vec<MapPin>,
    assigned_unit: AssignedUnit,
    consulting_doctor_id: u32,
}

/// Directory over an in-memory fixture document.
#[derive(Debug)]
pub struct StaticDirectory {
    doc: FixtureDocument,
    /// Index into `doc.doctors`, resolved at load.
    consulting: usize,
}

impl StaticDirectory {
    /// The records the app ships with.
    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_FIXTURES)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let doc: FixtureDocument =
            serde_json::from_str(json).map_err(|_| FixtureError::Malformed)?;

        let consulting = doc
            .doctors
            .iter()
            .position(|d| d.id == doc.consulting_doctor_id)
            .ok_or(FixtureError::Missing {
                what: "consulting doctor",
                id: doc.consulting_doctor_id,
            })?;

        info!(
            "Directory: {} doctors, {} hospitals, {} ambulances, {} map pins",
            doc.doctors.len(),
            doc.hospitals.len(),
            doc.ambulances.len(),
            doc.map_pins.len()
        );
        Ok(Self { doc, consulting })
    }
}

impl DirectoryPort for StaticDirectory {
    fn doctors(&self) -> &[Doctor] {
        &self.doc.doctors
    }

    fn hospitals(&self) -> &[Hospital] {
        &self.doc.hospitals
    }

    fn ambulances(&self) -> &[Ambulance] {
        &self.doc.ambulances
    }

    fn map_pins(&self) -> &[MapPin] {
        &self.doc.map_pins
    }

    fn assigned_unit(&self) -> &AssignedUnit {
        &self.doc.assigned_unit
    }

    fn consulting_doctor(&self) -> ConsultingDoctor {
        ConsultingDoctor::from(&self.doc.doctors[self.consulting])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{DoctorStatus, PinKind, UnitStatus};
    use crate::error::Error;

    #[test]
    fn demo_fixtures_load() {
        let dir = StaticDirectory::demo().unwrap();
        assert_eq!(dir.doctors().len(), 3);
        assert_eq!(dir.hospitals().len(), 2);
        assert_eq!(dir.ambulances().len(), 2);
        assert_eq!(dir.map_pins().len(), 4);
    }

    #[test]
    fn demo_records_keep_their_values() {
        let dir = StaticDirectory::demo().unwrap();
        let chen = &dir.doctors()[1];
        assert_eq!(chen.name, "Dr. Michael Chen");
        assert_eq!(chen.status, DoctorStatus::Busy);
        assert_eq!(chen.consultation_fee, 200);

        let metro = &dir.hospitals()[1];
        assert_eq!(metro.kind, "Private Hospital");
        assert_eq!(metro.availability.ventilators, 7);

        let a247 = &dir.ambulances()[1];
        assert_eq!(a247.status, UnitStatus::Busy);
        assert_eq!(a247.vehicle_number, "MH-12-CD-5678");

        let pin = &dir.map_pins()[1];
        assert_eq!(pin.kind, PinKind::Ambulance);
        assert!(pin.availability.is_none());
        assert_eq!(pin.eta.as_deref(), Some("7 min"));
    }

    #[test]
    fn assigned_unit_is_a156() {
        let dir = StaticDirectory::demo().unwrap();
        let unit = dir.assigned_unit();
        assert_eq!(unit.id, "A156");
        assert_eq!(unit.driver, "James Wilson");
        assert_eq!(unit.unit_type, "Advanced Life Support");
        assert_eq!(unit.driver_initial(), Some('J'));
    }

    #[test]
    fn consulting_doctor_resolves_by_id() {
        let dir = StaticDirectory::demo().unwrap();
        assert_eq!(dir.consulting_doctor().name, "Dr. Sarah Johnson");
    }

    #[test]
    fn malformed_document_is_rejected() {
        let err = StaticDirectory::from_json("[]").unwrap_err();
        assert_eq!(err, Error::Fixture(FixtureError::Malformed));
    }

    #[test]
    fn unknown_consulting_doctor_is_rejected() {
        let json = DEMO_FIXTURES.replace("\"consultingDoctorId\": 1", "\"consultingDoctorId\": 99");
        let err = StaticDirectory::from_json(&json).unwrap_err();
        assert_eq!(
            err,
            Error::Fixture(FixtureError::Missing {
                what: "consulting doctor",
                id: 99
            })
        );
        assert_eq!(
            err.to_string(),
            "fixture: consulting doctor id 99 matches no record"
        );
    }
}
