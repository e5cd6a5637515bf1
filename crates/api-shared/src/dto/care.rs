//! Transfer types for ongoing care: treatments, prescription lines and
//! clinical history entries.

use super::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Read model of a treatment derived from a consultation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TreatmentRecord {
    pub id: RecordId,
    pub consultation_id: RecordId,
    pub description: String,
    pub duration_days: i32,
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTreatmentReq {
    pub consultation_id: RecordId,
    pub description: String,
    pub duration_days: i32,
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTreatmentReq {
    pub consultation_id: Option<RecordId>,
    pub description: Option<String>,
    pub duration_days: Option<i32>,
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TreatmentFilter {
    pub consultation_id: Option<RecordId>,
}

/// Read model of a prescription line linking a treatment to a
/// medication.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrescriptionRecord {
    pub id: RecordId,
    pub treatment_id: RecordId,
    pub medication_id: RecordId,
    /// Derived name of the prescribed medication.
    pub medication_name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub route: String,
    pub route_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePrescriptionReq {
    pub treatment_id: RecordId,
    pub medication_id: RecordId,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    /// Administration route code.
    pub route: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePrescriptionReq {
    pub treatment_id: Option<RecordId>,
    pub medication_id: Option<RecordId>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub route: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PrescriptionFilter {
    pub treatment_id: Option<RecordId>,
    pub medication_id: Option<RecordId>,
}

/// Read model of a clinical history entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntryRecord {
    pub id: RecordId,
    pub patient_id: RecordId,
    pub patient_name: String,
    pub registered_on: NaiveDate,
    /// Free-text entry type, e.g. allergy, surgery, chronic condition.
    pub entry_type: String,
    pub description: String,
    pub related_medications: Option<String>,
    pub doctor_id: Option<RecordId>,
    /// Derived display of the recording doctor, or `"not specified"`.
    pub recorded_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateHistoryEntryReq {
    pub patient_id: RecordId,
    /// Defaults to the current date when absent.
    pub registered_on: Option<NaiveDate>,
    pub entry_type: String,
    pub description: String,
    pub related_medications: Option<String>,
    pub doctor_id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateHistoryEntryReq {
    pub patient_id: Option<RecordId>,
    pub registered_on: Option<NaiveDate>,
    pub entry_type: Option<String>,
    pub description: Option<String>,
    pub related_medications: Option<String>,
    pub doctor_id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryEntryFilter {
    pub patient_id: Option<RecordId>,
    pub doctor_id: Option<RecordId>,
    /// Case-insensitive substring match on entry type or description.
    pub search: Option<String>,
}
