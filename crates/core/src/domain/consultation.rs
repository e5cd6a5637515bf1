use api_shared::dto::{CreateConsultationReq, RecordId, UpdateConsultationReq};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::enums::{ConsultationStatus, Priority};
use crate::error::ClinicResult;
use crate::schema::EntityKind;
use crate::validation;

const KIND: EntityKind = EntityKind::Consultation;

/// A performed (or pending) medical visit. Patients and doctors with
/// consultations on record cannot be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultation {
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub occurred_at: DateTime<Utc>,
    pub reason: String,
    pub diagnosis: Option<String>,
    pub status: ConsultationStatus,
    pub priority: Priority,
}

impl Consultation {
    /// Builds a validated row from a create/replace request.
    ///
    /// `now` supplies the default for `occurred_at` when the request
    /// leaves it out.
    pub fn from_request(req: &CreateConsultationReq, now: DateTime<Utc>) -> ClinicResult<Self> {
        let status = match &req.status {
            Some(code) => validation::coded(KIND, "status", code)?,
            None => ConsultationStatus::Pending,
        };
        let priority = match &req.priority {
            Some(code) => validation::coded(KIND, "priority", code)?,
            None => Priority::Normal,
        };
        Ok(Self {
            patient_id: req.patient_id,
            doctor_id: req.doctor_id,
            occurred_at: req.occurred_at.unwrap_or(now),
            reason: validation::required_text(KIND, "reason", &req.reason, 255)?,
            diagnosis: validation::optional_text(KIND, "diagnosis", req.diagnosis.as_deref(), 500)?,
            status,
            priority,
        })
    }

    /// Applies a partial update; absent fields are left unchanged.
    pub fn apply_update(&mut self, req: &UpdateConsultationReq) -> ClinicResult<()> {
        if let Some(patient_id) = req.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(doctor_id) = req.doctor_id {
            self.doctor_id = doctor_id;
        }
        if let Some(occurred_at) = req.occurred_at {
            self.occurred_at = occurred_at;
        }
        if let Some(reason) = &req.reason {
            self.reason = validation::required_text(KIND, "reason", reason, 255)?;
        }
        if let Some(diagnosis) = &req.diagnosis {
            self.diagnosis = validation::optional_text(KIND, "diagnosis", Some(diagnosis), 500)?;
        }
        if let Some(status) = &req.status {
            // No transition table: any declared status may follow any other.
            self.status = validation::coded(KIND, "status", status)?;
        }
        if let Some(priority) = &req.priority {
            self.priority = validation::coded(KIND, "priority", priority)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_pending_and_normal() {
        let now = Utc::now();
        let consultation = Consultation::from_request(
            &CreateConsultationReq {
                patient_id: 1,
                doctor_id: 2,
                occurred_at: None,
                reason: "Chest pain".into(),
                diagnosis: None,
                status: None,
                priority: None,
            },
            now,
        )
        .expect("valid request");
        assert_eq!(consultation.status, ConsultationStatus::Pending);
        assert_eq!(consultation.priority, Priority::Normal);
        assert_eq!(consultation.occurred_at, now);
    }
}
