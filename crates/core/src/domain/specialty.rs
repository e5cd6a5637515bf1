use api_shared::dto::{CreateSpecialtyReq, UpdateSpecialtyReq};
use serde::{Deserialize, Serialize};

use crate::error::ClinicResult;
use crate::schema::EntityKind;
use crate::validation;

const KIND: EntityKind = EntityKind::Specialty;

/// A medical specialty doctors are registered under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    pub name: String,
    pub description: Option<String>,
}

impl Specialty {
    /// Builds a validated row from a create/replace request.
    pub fn from_request(req: &CreateSpecialtyReq) -> ClinicResult<Self> {
        Ok(Self {
            name: validation::required_text(KIND, "name", &req.name, 100)?,
            description: validation::optional_text(
                KIND,
                "description",
                req.description.as_deref(),
                255,
            )?,
        })
    }

    /// Applies a partial update; absent fields are left unchanged.
    pub fn apply_update(&mut self, req: &UpdateSpecialtyReq) -> ClinicResult<()> {
        if let Some(name) = &req.name {
            self.name = validation::required_text(KIND, "name", name, 100)?;
        }
        if let Some(description) = &req.description {
            self.description =
                validation::optional_text(KIND, "description", Some(description), 255)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_description_becomes_none() {
        let spec = Specialty::from_request(&CreateSpecialtyReq {
            name: "Cardiology".into(),
            description: Some("  ".into()),
        })
        .expect("valid request");
        assert_eq!(spec.name, "Cardiology");
        assert!(spec.description.is_none());
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Specialty::from_request(&CreateSpecialtyReq {
            name: "".into(),
            description: None,
        })
        .expect_err("name is required");
        assert!(err.to_string().contains("name"));
    }
}
