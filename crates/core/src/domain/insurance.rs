use api_shared::dto::{CreateInsurancePolicyReq, RecordId, UpdateInsurancePolicyReq};
use chrono::NaiveDate;
use clinica_types::CoveragePercent;
use serde::{Deserialize, Serialize};

use crate::domain::enums::CoverageTier;
use crate::error::{ClinicError, ClinicResult};
use crate::schema::EntityKind;
use crate::validation;

const KIND: EntityKind = EntityKind::InsurancePolicy;

/// An insurance policy covering one patient. Deleted together with the
/// patient it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    pub policy_number: String,
    pub insurer_name: String,
    pub coverage_tier: CoverageTier,
    pub coverage_percent: CoveragePercent,
    pub start_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub active: bool,
    pub patient_id: RecordId,
}

fn parse_percent(value: &str) -> ClinicResult<CoveragePercent> {
    CoveragePercent::parse(value).map_err(|e| ClinicError::Validation {
        entity: KIND,
        field: "coverage_percent",
        message: e.to_string(),
    })
}

impl InsurancePolicy {
    /// Builds a validated row from a create/replace request.
    pub fn from_request(req: &CreateInsurancePolicyReq) -> ClinicResult<Self> {
        validation::ordered(KIND, "expiry_date", req.start_date, req.expiry_date)?;
        Ok(Self {
            policy_number: validation::required_text(KIND, "policy_number", &req.policy_number, 50)?,
            insurer_name: validation::required_text(KIND, "insurer_name", &req.insurer_name, 100)?,
            coverage_tier: validation::coded(KIND, "coverage_tier", &req.coverage_tier)?,
            coverage_percent: parse_percent(&req.coverage_percent)?,
            start_date: req.start_date,
            expiry_date: req.expiry_date,
            active: req.active.unwrap_or(true),
            patient_id: req.patient_id,
        })
    }

    /// Applies a partial update; absent fields are left unchanged. The
    /// date-range invariant is re-checked against the merged values.
    pub fn apply_update(&mut self, req: &UpdateInsurancePolicyReq) -> ClinicResult<()> {
        if let Some(policy_number) = &req.policy_number {
            self.policy_number =
                validation::required_text(KIND, "policy_number", policy_number, 50)?;
        }
        if let Some(insurer_name) = &req.insurer_name {
            self.insurer_name = validation::required_text(KIND, "insurer_name", insurer_name, 100)?;
        }
        if let Some(coverage_tier) = &req.coverage_tier {
            self.coverage_tier = validation::coded(KIND, "coverage_tier", coverage_tier)?;
        }
        if let Some(coverage_percent) = &req.coverage_percent {
            self.coverage_percent = parse_percent(coverage_percent)?;
        }
        if let Some(start_date) = req.start_date {
            self.start_date = start_date;
        }
        if let Some(expiry_date) = req.expiry_date {
            self.expiry_date = expiry_date;
        }
        validation::ordered(KIND, "expiry_date", self.start_date, self.expiry_date)?;
        if let Some(active) = req.active {
            self.active = active;
        }
        if let Some(patient_id) = req.patient_id {
            self.patient_id = patient_id;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateInsurancePolicyReq {
        CreateInsurancePolicyReq {
            policy_number: "POL-2024-0001".into(),
            insurer_name: "Vital Care".into(),
            coverage_tier: "STANDARD".into(),
            coverage_percent: "62.5".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            expiry_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            active: None,
            patient_id: 1,
        }
    }

    #[test]
    fn coverage_percent_is_bounded() {
        let mut req = valid_request();
        req.coverage_percent = "120".into();
        let err = InsurancePolicy::from_request(&req).expect_err("over 100 percent");
        assert!(err.to_string().contains("coverage_percent"));
    }

    #[test]
    fn expiry_must_follow_start() {
        let mut req = valid_request();
        req.expiry_date = req.start_date;
        let err = InsurancePolicy::from_request(&req).expect_err("empty coverage window");
        assert!(err.to_string().contains("expiry_date"));
    }
}
