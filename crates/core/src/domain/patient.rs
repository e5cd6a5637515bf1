use api_shared::dto::{CreatePatientReq, UpdatePatientReq};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::enums::{BloodType, Gender};
use crate::error::ClinicResult;
use crate::schema::EntityKind;
use crate::validation;

const KIND: EntityKind = EntityKind::Patient;

/// Personal and contact information of a registered patient.
///
/// `national_id` and `email` are unique across patients; uniqueness is
/// enforced by the store at write time, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub blood_type: BloodType,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub active: bool,
}

impl Patient {
    /// Builds a validated row from a create/replace request.
    pub fn from_request(req: &CreatePatientReq) -> ClinicResult<Self> {
        Ok(Self {
            national_id: validation::required_text(KIND, "national_id", &req.national_id, 12)?,
            first_name: validation::required_text(KIND, "first_name", &req.first_name, 100)?,
            last_name: validation::required_text(KIND, "last_name", &req.last_name, 100)?,
            birth_date: req.birth_date,
            gender: validation::coded(KIND, "gender", &req.gender)?,
            blood_type: validation::coded(KIND, "blood_type", &req.blood_type)?,
            email: validation::required_text(KIND, "email", &req.email, 100)?,
            phone: validation::required_text(KIND, "phone", &req.phone, 15)?,
            address: validation::required_text(KIND, "address", &req.address, 255)?,
            active: req.active.unwrap_or(true),
        })
    }

    /// Applies a partial update; absent fields are left unchanged.
    pub fn apply_update(&mut self, req: &UpdatePatientReq) -> ClinicResult<()> {
        if let Some(national_id) = &req.national_id {
            self.national_id = validation::required_text(KIND, "national_id", national_id, 12)?;
        }
        if let Some(first_name) = &req.first_name {
            self.first_name = validation::required_text(KIND, "first_name", first_name, 100)?;
        }
        if let Some(last_name) = &req.last_name {
            self.last_name = validation::required_text(KIND, "last_name", last_name, 100)?;
        }
        if let Some(birth_date) = req.birth_date {
            self.birth_date = birth_date;
        }
        if let Some(gender) = &req.gender {
            self.gender = validation::coded(KIND, "gender", gender)?;
        }
        if let Some(blood_type) = &req.blood_type {
            self.blood_type = validation::coded(KIND, "blood_type", blood_type)?;
        }
        if let Some(email) = &req.email {
            self.email = validation::required_text(KIND, "email", email, 100)?;
        }
        if let Some(phone) = &req.phone {
            self.phone = validation::required_text(KIND, "phone", phone, 15)?;
        }
        if let Some(address) = &req.address {
            self.address = validation::required_text(KIND, "address", address, 255)?;
        }
        if let Some(active) = req.active {
            self.active = active;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreatePatientReq {
        CreatePatientReq {
            national_id: "11222333-4".into(),
            first_name: "Ana".into(),
            last_name: "Reyes".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 12).expect("valid date"),
            gender: "F".into(),
            blood_type: "O+".into(),
            email: "ana.reyes@example.com".into(),
            phone: "+56911112222".into(),
            address: "Av. Siempre Viva 123".into(),
            active: None,
        }
    }

    #[test]
    fn active_defaults_to_true() {
        let patient = Patient::from_request(&valid_request()).expect("valid request");
        assert!(patient.active);
        assert_eq!(patient.blood_type, BloodType::OPositive);
    }

    #[test]
    fn out_of_domain_blood_type_is_rejected() {
        let mut req = valid_request();
        req.blood_type = "Q+".into();
        let err = Patient::from_request(&req).expect_err("blood type outside the domain");
        assert!(err.to_string().contains("blood_type"));
    }

    #[test]
    fn update_keeps_absent_fields() {
        let mut patient = Patient::from_request(&valid_request()).expect("valid request");
        patient
            .apply_update(&UpdatePatientReq {
                phone: Some("+56933334444".into()),
                ..Default::default()
            })
            .expect("valid update");
        assert_eq!(patient.phone, "+56933334444");
        assert_eq!(patient.first_name, "Ana");
    }
}
