use api_shared::dto::{CreateHistoryEntryReq, RecordId, UpdateHistoryEntryReq};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ClinicResult;
use crate::schema::EntityKind;
use crate::validation;

const KIND: EntityKind = EntityKind::HistoryEntry;

/// One entry in a patient's clinical history (allergy, surgery, chronic
/// condition, and so on — the type is free text).
///
/// Entries follow their patient out of the system, but survive the
/// deletion of the doctor who recorded them: that reference is merely
/// cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub patient_id: RecordId,
    pub registered_on: NaiveDate,
    pub entry_type: String,
    pub description: String,
    pub related_medications: Option<String>,
    pub doctor_id: Option<RecordId>,
}

impl HistoryEntry {
    /// Builds a validated row from a create/replace request. `today`
    /// supplies the default registration date.
    pub fn from_request(req: &CreateHistoryEntryReq, today: NaiveDate) -> ClinicResult<Self> {
        Ok(Self {
            patient_id: req.patient_id,
            registered_on: req.registered_on.unwrap_or(today),
            entry_type: validation::required_text(KIND, "entry_type", &req.entry_type, 100)?,
            description: validation::required_text(KIND, "description", &req.description, 1000)?,
            related_medications: validation::optional_text(
                KIND,
                "related_medications",
                req.related_medications.as_deref(),
                500,
            )?,
            doctor_id: req.doctor_id,
        })
    }

    /// Applies a partial update; absent fields are left unchanged.
    pub fn apply_update(&mut self, req: &UpdateHistoryEntryReq) -> ClinicResult<()> {
        if let Some(patient_id) = req.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(registered_on) = req.registered_on {
            self.registered_on = registered_on;
        }
        if let Some(entry_type) = &req.entry_type {
            self.entry_type = validation::required_text(KIND, "entry_type", entry_type, 100)?;
        }
        if let Some(description) = &req.description {
            self.description = validation::required_text(KIND, "description", description, 1000)?;
        }
        if let Some(related_medications) = &req.related_medications {
            self.related_medications = validation::optional_text(
                KIND,
                "related_medications",
                Some(related_medications),
                500,
            )?;
        }
        if let Some(doctor_id) = req.doctor_id {
            self.doctor_id = Some(doctor_id);
        }
        Ok(())
    }
}
