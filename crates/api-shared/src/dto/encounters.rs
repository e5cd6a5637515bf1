//! Transfer types for encounters: scheduled appointments and performed
//! consultations.

use super::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Read model of a scheduled appointment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppointmentRecord {
    pub id: RecordId,
    pub patient_id: RecordId,
    /// Derived `"First Last"` of the patient.
    pub patient_name: String,
    pub doctor_id: RecordId,
    /// Derived `"Dr. First Last"` of the doctor.
    pub doctor_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub reason: String,
    pub status: String,
    pub status_label: String,
    pub notes: Option<String>,
    /// Assigned by the system on creation; immutable afterwards.
    pub created_at: DateTime<Utc>,
    /// The consultation this appointment produced, if any (one-to-one).
    pub consultation_id: Option<RecordId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAppointmentReq {
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub scheduled_at: DateTime<Utc>,
    pub reason: String,
    /// Appointment status code; defaults to `SCHEDULED` when absent.
    pub status: Option<String>,
    pub notes: Option<String>,
    pub consultation_id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAppointmentReq {
    pub patient_id: Option<RecordId>,
    pub doctor_id: Option<RecordId>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub reason: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub consultation_id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AppointmentFilter {
    pub patient_id: Option<RecordId>,
    pub doctor_id: Option<RecordId>,
    /// Exact appointment status code.
    pub status: Option<String>,
}

/// Read model of a performed consultation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConsultationRecord {
    pub id: RecordId,
    pub patient_id: RecordId,
    pub patient_name: String,
    pub doctor_id: RecordId,
    pub doctor_name: String,
    pub occurred_at: DateTime<Utc>,
    pub reason: String,
    pub diagnosis: Option<String>,
    pub status: String,
    pub status_label: String,
    pub priority: String,
    pub priority_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateConsultationReq {
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    /// Defaults to the creation time when absent.
    pub occurred_at: Option<DateTime<Utc>>,
    pub reason: String,
    pub diagnosis: Option<String>,
    /// Consultation status code; defaults to `PENDING` when absent.
    pub status: Option<String>,
    /// Priority code; defaults to `NORMAL` when absent.
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateConsultationReq {
    pub patient_id: Option<RecordId>,
    pub doctor_id: Option<RecordId>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub reason: Option<String>,
    pub diagnosis: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConsultationFilter {
    pub patient_id: Option<RecordId>,
    pub doctor_id: Option<RecordId>,
    /// Exact consultation status code.
    pub status: Option<String>,
}
