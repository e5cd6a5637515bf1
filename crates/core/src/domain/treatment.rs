use api_shared::dto::{CreateTreatmentReq, RecordId, UpdateTreatmentReq};
use serde::{Deserialize, Serialize};

use crate::error::ClinicResult;
use crate::schema::EntityKind;
use crate::validation;

const KIND: EntityKind = EntityKind::Treatment;

/// A course of treatment derived from a consultation. Removed together
/// with the consultation that prescribed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treatment {
    pub consultation_id: RecordId,
    pub description: String,
    pub duration_days: i32,
    pub observations: Option<String>,
}

impl Treatment {
    /// Builds a validated row from a create/replace request.
    pub fn from_request(req: &CreateTreatmentReq) -> ClinicResult<Self> {
        validation::positive(KIND, "duration_days", i64::from(req.duration_days))?;
        Ok(Self {
            consultation_id: req.consultation_id,
            description: validation::required_text(KIND, "description", &req.description, 500)?,
            duration_days: req.duration_days,
            observations: validation::optional_text(
                KIND,
                "observations",
                req.observations.as_deref(),
                1000,
            )?,
        })
    }

    /// Applies a partial update; absent fields are left unchanged.
    pub fn apply_update(&mut self, req: &UpdateTreatmentReq) -> ClinicResult<()> {
        if let Some(consultation_id) = req.consultation_id {
            self.consultation_id = consultation_id;
        }
        if let Some(description) = &req.description {
            self.description = validation::required_text(KIND, "description", description, 500)?;
        }
        if let Some(duration_days) = req.duration_days {
            validation::positive(KIND, "duration_days", i64::from(duration_days))?;
            self.duration_days = duration_days;
        }
        if let Some(observations) = &req.observations {
            self.observations =
                validation::optional_text(KIND, "observations", Some(observations), 1000)?;
        }
        Ok(())
    }
}
