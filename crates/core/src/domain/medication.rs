use api_shared::dto::{CreateMedicationReq, UpdateMedicationReq};
use clinica_types::Money;
use serde::{Deserialize, Serialize};

use crate::domain::enums::MedicationCategory;
use crate::error::{ClinicError, ClinicResult};
use crate::schema::EntityKind;
use crate::validation;

const KIND: EntityKind = EntityKind::Medication;

/// A stocked medication. Cannot be deleted while prescriptions
/// reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub laboratory: String,
    pub category: MedicationCategory,
    pub stock: i32,
    pub unit_price: Money,
}

fn parse_price(value: &str) -> ClinicResult<Money> {
    Money::parse(value).map_err(|e| ClinicError::Validation {
        entity: KIND,
        field: "unit_price",
        message: e.to_string(),
    })
}

impl Medication {
    /// Builds a validated row from a create/replace request.
    pub fn from_request(req: &CreateMedicationReq) -> ClinicResult<Self> {
        validation::non_negative(KIND, "stock", i64::from(req.stock))?;
        Ok(Self {
            name: validation::required_text(KIND, "name", &req.name, 100)?,
            laboratory: validation::required_text(KIND, "laboratory", &req.laboratory, 100)?,
            category: validation::coded(KIND, "category", &req.category)?,
            stock: req.stock,
            unit_price: parse_price(&req.unit_price)?,
        })
    }

    /// Applies a partial update; absent fields are left unchanged.
    pub fn apply_update(&mut self, req: &UpdateMedicationReq) -> ClinicResult<()> {
        if let Some(name) = &req.name {
            self.name = validation::required_text(KIND, "name", name, 100)?;
        }
        if let Some(laboratory) = &req.laboratory {
            self.laboratory = validation::required_text(KIND, "laboratory", laboratory, 100)?;
        }
        if let Some(category) = &req.category {
            self.category = validation::coded(KIND, "category", category)?;
        }
        if let Some(stock) = req.stock {
            validation::non_negative(KIND, "stock", i64::from(stock))?;
            self.stock = stock;
        }
        if let Some(unit_price) = &req.unit_price {
            self.unit_price = parse_price(unit_price)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_is_parsed_as_exact_decimal() {
        let medication = Medication::from_request(&CreateMedicationReq {
            name: "Paracetamol 500mg".into(),
            laboratory: "Andina".into(),
            category: "ANALGESIC".into(),
            stock: 250,
            unit_price: "1290.5".into(),
        })
        .expect("valid request");
        assert_eq!(medication.unit_price.to_string(), "1290.50");
    }

    #[test]
    fn negative_stock_is_rejected() {
        let err = Medication::from_request(&CreateMedicationReq {
            name: "Paracetamol 500mg".into(),
            laboratory: "Andina".into(),
            category: "ANALGESIC".into(),
            stock: -1,
            unit_price: "1290.50".into(),
        })
        .expect_err("stock below zero");
        assert!(err.to_string().contains("stock"));
    }
}
