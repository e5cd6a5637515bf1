//! Transfer types for the people registry: patients and doctors.

use super::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Read model of a patient, including derived display fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatientRecord {
    pub id: RecordId,
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Derived `"First Last"` composite; never stored.
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub gender_label: String,
    pub blood_type: String,
    pub blood_type_label: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    /// Gender code (`M`, `F`, `O`, `N`).
    pub gender: String,
    /// Blood type code, e.g. `"O+"`.
    pub blood_type: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Defaults to `true` when absent.
    pub active: Option<bool>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePatientReq {
    pub national_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PatientFilter {
    /// Case-insensitive substring match on national id or names.
    pub search: Option<String>,
    pub active: Option<bool>,
}

/// Read model of a doctor, including the referenced specialty's name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DoctorRecord {
    pub id: RecordId,
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Derived `"Dr. First Last"` composite; never stored.
    pub display_name: String,
    pub gender: String,
    pub gender_label: String,
    pub email: String,
    pub phone: String,
    pub active: bool,
    pub specialty_id: RecordId,
    pub specialty_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDoctorReq {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub email: String,
    pub phone: String,
    /// Defaults to `true` when absent.
    pub active: Option<bool>,
    pub specialty_id: RecordId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateDoctorReq {
    pub national_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
    pub specialty_id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DoctorFilter {
    /// Case-insensitive substring match on national id or names.
    pub search: Option<String>,
    pub specialty_id: Option<RecordId>,
    pub active: Option<bool>,
}
