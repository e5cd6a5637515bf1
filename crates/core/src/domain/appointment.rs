use api_shared::dto::{CreateAppointmentReq, RecordId, UpdateAppointmentReq};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::enums::AppointmentStatus;
use crate::error::ClinicResult;
use crate::schema::EntityKind;
use crate::validation;

const KIND: EntityKind = EntityKind::Appointment;

/// A scheduled (future or past) appointment between a patient and a
/// doctor.
///
/// `created_at` is assigned by the system when the row is first stored
/// and survives full-record replaces. `consultation_id` optionally links
/// to the consultation the appointment produced; the link is strictly
/// one-to-one and is cleared (not cascaded) when the consultation is
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub scheduled_at: DateTime<Utc>,
    pub reason: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub consultation_id: Option<RecordId>,
}

impl Appointment {
    /// Builds a validated row from a create/replace request.
    ///
    /// `created_at` is the system-assigned creation instant: services
    /// pass `Utc::now()` on create and the original value on replace.
    pub fn from_request(
        req: &CreateAppointmentReq,
        created_at: DateTime<Utc>,
    ) -> ClinicResult<Self> {
        let status = match &req.status {
            Some(code) => validation::coded(KIND, "status", code)?,
            None => AppointmentStatus::Scheduled,
        };
        Ok(Self {
            patient_id: req.patient_id,
            doctor_id: req.doctor_id,
            scheduled_at: req.scheduled_at,
            reason: validation::required_text(KIND, "reason", &req.reason, 255)?,
            status,
            notes: validation::optional_text(KIND, "notes", req.notes.as_deref(), 1000)?,
            created_at,
            consultation_id: req.consultation_id,
        })
    }

    /// Applies a partial update. `created_at` is immutable and has no
    /// corresponding request field.
    pub fn apply_update(&mut self, req: &UpdateAppointmentReq) -> ClinicResult<()> {
        if let Some(patient_id) = req.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(doctor_id) = req.doctor_id {
            self.doctor_id = doctor_id;
        }
        if let Some(scheduled_at) = req.scheduled_at {
            self.scheduled_at = scheduled_at;
        }
        if let Some(reason) = &req.reason {
            self.reason = validation::required_text(KIND, "reason", reason, 255)?;
        }
        if let Some(status) = &req.status {
            // No transition table: any declared status may follow any other.
            self.status = validation::coded(KIND, "status", status)?;
        }
        if let Some(notes) = &req.notes {
            self.notes = validation::optional_text(KIND, "notes", Some(notes), 1000)?;
        }
        if let Some(consultation_id) = req.consultation_id {
            self.consultation_id = Some(consultation_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_scheduled() {
        let appointment = Appointment::from_request(
            &CreateAppointmentReq {
                patient_id: 1,
                doctor_id: 2,
                scheduled_at: Utc::now(),
                reason: "Annual check-up".into(),
                status: None,
                notes: None,
                consultation_id: None,
            },
            Utc::now(),
        )
        .expect("valid request");
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
        assert!(appointment.consultation_id.is_none());
    }

    #[test]
    fn unknown_status_code_is_rejected() {
        let err = Appointment::from_request(
            &CreateAppointmentReq {
                patient_id: 1,
                doctor_id: 2,
                scheduled_at: Utc::now(),
                reason: "Annual check-up".into(),
                status: Some("RESCHEDULED".into()),
                notes: None,
                consultation_id: None,
            },
            Utc::now(),
        )
        .expect_err("status outside the domain");
        assert!(err.to_string().contains("status"));
    }
}
