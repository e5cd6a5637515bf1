use api_shared::dto::{CreateDoctorReq, RecordId, UpdateDoctorReq};
use serde::{Deserialize, Serialize};

use crate::domain::enums::Gender;
use crate::error::ClinicResult;
use crate::schema::EntityKind;
use crate::validation;

const KIND: EntityKind = EntityKind::Doctor;

/// A practising doctor. Always registered under a specialty; the
/// specialty cannot be deleted while any doctor references it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub email: String,
    pub phone: String,
    pub active: bool,
    pub specialty_id: RecordId,
}

impl Doctor {
    /// Builds a validated row from a create/replace request. The
    /// referenced specialty's existence is checked by the service.
    pub fn from_request(req: &CreateDoctorReq) -> ClinicResult<Self> {
        Ok(Self {
            national_id: validation::required_text(KIND, "national_id", &req.national_id, 12)?,
            first_name: validation::required_text(KIND, "first_name", &req.first_name, 100)?,
            last_name: validation::required_text(KIND, "last_name", &req.last_name, 100)?,
            gender: validation::coded(KIND, "gender", &req.gender)?,
            email: validation::required_text(KIND, "email", &req.email, 100)?,
            phone: validation::required_text(KIND, "phone", &req.phone, 15)?,
            active: req.active.unwrap_or(true),
            specialty_id: req.specialty_id,
        })
    }

    /// Applies a partial update; absent fields are left unchanged.
    pub fn apply_update(&mut self, req: &UpdateDoctorReq) -> ClinicResult<()> {
        if let Some(national_id) = &req.national_id {
            self.national_id = validation::required_text(KIND, "national_id", national_id, 12)?;
        }
        if let Some(first_name) = &req.first_name {
            self.first_name = validation::required_text(KIND, "first_name", first_name, 100)?;
        }
        if let Some(last_name) = &req.last_name {
            self.last_name = validation::required_text(KIND, "last_name", last_name, 100)?;
        }
        if let Some(gender) = &req.gender {
            self.gender = validation::coded(KIND, "gender", gender)?;
        }
        if let Some(email) = &req.email {
            self.email = validation::required_text(KIND, "email", email, 100)?;
        }
        if let Some(phone) = &req.phone {
            self.phone = validation::required_text(KIND, "phone", phone, 15)?;
        }
        if let Some(active) = req.active {
            self.active = active;
        }
        if let Some(specialty_id) = req.specialty_id {
            self.specialty_id = specialty_id;
        }
        Ok(())
    }
}
