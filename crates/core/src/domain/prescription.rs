use api_shared::dto::{CreatePrescriptionReq, RecordId, UpdatePrescriptionReq};
use serde::{Deserialize, Serialize};

use crate::domain::enums::AdministrationRoute;
use crate::error::ClinicResult;
use crate::schema::EntityKind;
use crate::validation;

const KIND: EntityKind = EntityKind::Prescription;

/// One prescribed medication within a treatment: the detail row of the
/// treatment–medication relation. Removed with its treatment; blocks
/// deletion of its medication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    pub treatment_id: RecordId,
    pub medication_id: RecordId,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub route: AdministrationRoute,
}

impl Prescription {
    /// Builds a validated row from a create/replace request.
    pub fn from_request(req: &CreatePrescriptionReq) -> ClinicResult<Self> {
        Ok(Self {
            treatment_id: req.treatment_id,
            medication_id: req.medication_id,
            dosage: validation::required_text(KIND, "dosage", &req.dosage, 100)?,
            frequency: validation::required_text(KIND, "frequency", &req.frequency, 100)?,
            duration: validation::required_text(KIND, "duration", &req.duration, 100)?,
            route: validation::coded(KIND, "route", &req.route)?,
        })
    }

    /// Applies a partial update; absent fields are left unchanged.
    pub fn apply_update(&mut self, req: &UpdatePrescriptionReq) -> ClinicResult<()> {
        if let Some(treatment_id) = req.treatment_id {
            self.treatment_id = treatment_id;
        }
        if let Some(medication_id) = req.medication_id {
            self.medication_id = medication_id;
        }
        if let Some(dosage) = &req.dosage {
            self.dosage = validation::required_text(KIND, "dosage", dosage, 100)?;
        }
        if let Some(frequency) = &req.frequency {
            self.frequency = validation::required_text(KIND, "frequency", frequency, 100)?;
        }
        if let Some(duration) = &req.duration {
            self.duration = validation::required_text(KIND, "duration", duration, 100)?;
        }
        if let Some(route) = &req.route {
            self.route = validation::coded(KIND, "route", route)?;
        }
        Ok(())
    }
}
