//! Transfer types for patient coverage and doctor availability:
//! insurance policies and schedule slots.

use super::RecordId;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Read model of an insurance policy.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsurancePolicyRecord {
    pub id: RecordId,
    pub policy_number: String,
    pub insurer_name: String,
    pub coverage_tier: String,
    pub coverage_tier_label: String,
    /// Covered share as a two-decimal percentage string, e.g. `"62.50"`.
    pub coverage_percent: String,
    pub start_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub active: bool,
    pub patient_id: RecordId,
    /// Derived `"First Last"` of the covered patient.
    pub patient_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateInsurancePolicyReq {
    pub policy_number: String,
    pub insurer_name: String,
    /// Coverage tier code.
    pub coverage_tier: String,
    pub coverage_percent: String,
    pub start_date: NaiveDate,
    pub expiry_date: NaiveDate,
    /// Defaults to `true` when absent.
    pub active: Option<bool>,
    pub patient_id: RecordId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateInsurancePolicyReq {
    pub policy_number: Option<String>,
    pub insurer_name: Option<String>,
    pub coverage_tier: Option<String>,
    pub coverage_percent: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub active: Option<bool>,
    pub patient_id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InsurancePolicyFilter {
    pub patient_id: Option<RecordId>,
    pub active: Option<bool>,
    /// Exact coverage tier code.
    pub coverage_tier: Option<String>,
    /// Case-insensitive substring match on insurer name or policy number.
    pub search: Option<String>,
}

/// Read model of a doctor's recurring schedule slot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleSlotRecord {
    pub id: RecordId,
    pub doctor_id: RecordId,
    /// Derived `"Dr. First Last"` of the doctor.
    pub doctor_name: String,
    /// Day of week, Monday = 1 .. Sunday = 7.
    pub weekday: u8,
    pub weekday_label: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Length of each bookable appointment within the slot, minutes.
    pub slot_minutes: u16,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateScheduleSlotReq {
    pub doctor_id: RecordId,
    pub weekday: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_minutes: u16,
    /// Defaults to `true` when absent.
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateScheduleSlotReq {
    pub doctor_id: Option<RecordId>,
    pub weekday: Option<u8>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub slot_minutes: Option<u16>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScheduleSlotFilter {
    pub doctor_id: Option<RecordId>,
    pub weekday: Option<u8>,
    pub active: Option<bool>,
}
