//! Transfer types for the catalog entities: specialties and medications.

use super::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Read model of a medical specialty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SpecialtyRecord {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateSpecialtyReq {
    pub name: String,
    pub description: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateSpecialtyReq {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SpecialtyFilter {
    /// Case-insensitive substring match on the name.
    pub search: Option<String>,
}

/// Read model of a medication, including the derived category label.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MedicationRecord {
    pub id: RecordId,
    pub name: String,
    pub laboratory: String,
    pub category: String,
    pub category_label: String,
    pub stock: i32,
    /// Unit price as a two-decimal string, e.g. `"1250.00"`.
    pub unit_price: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMedicationReq {
    pub name: String,
    pub laboratory: String,
    /// Medication category code.
    pub category: String,
    pub stock: i32,
    pub unit_price: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateMedicationReq {
    pub name: Option<String>,
    pub laboratory: Option<String>,
    pub category: Option<String>,
    pub stock: Option<i32>,
    pub unit_price: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MedicationFilter {
    /// Case-insensitive substring match on name or laboratory.
    pub search: Option<String>,
    /// Exact category code.
    pub category: Option<String>,
}
