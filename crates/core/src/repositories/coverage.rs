//! Coverage services: insurance policies and doctor schedule slots.

use std::sync::Arc;

use api_shared::dto::{
    CreateInsurancePolicyReq, CreateScheduleSlotReq, DeleteRes, InsurancePolicyFilter,
    InsurancePolicyRecord, RecordId, ScheduleSlotFilter, ScheduleSlotRecord,
    UpdateInsurancePolicyReq, UpdateScheduleSlotReq,
};

use super::helpers;
use crate::domain::enums::CodedEnum;
use crate::domain::{InsurancePolicy, ScheduleSlot};
use crate::error::{ClinicError, ClinicResult};
use crate::projection;
use crate::schema::EntityKind;
use crate::store::{Database, Store};

fn policy_unique(
    db: &Database,
    row: &InsurancePolicy,
    exclude: Option<RecordId>,
) -> ClinicResult<()> {
    helpers::unique(
        EntityKind::InsurancePolicy,
        "policy_number",
        &row.policy_number,
        db.insurance_policies
            .iter()
            .map(|(id, p)| (id, p.policy_number.as_str())),
        exclude,
    )
}

/// CRUD over insurance policies.
#[derive(Clone)]
pub struct InsuranceService {
    store: Arc<Store>,
}

impl InsuranceService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Creates a policy; the policy number must be unique and the
    /// covered patient must exist.
    pub fn create(&self, req: CreateInsurancePolicyReq) -> ClinicResult<InsurancePolicyRecord> {
        let row = InsurancePolicy::from_request(&req)?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::Patient, row.patient_id)?;
            policy_unique(db, &row, None)?;
            let id = db.insurance_policies.insert(row.clone());
            tracing::info!(id, policy_number = %row.policy_number, "created insurance policy");
            Ok(projection::insurance_record(id, &row, db))
        })
    }

    pub fn get(&self, id: RecordId) -> ClinicResult<InsurancePolicyRecord> {
        self.store.read(|db| {
            db.insurance_policies
                .get(id)
                .map(|row| projection::insurance_record(id, row, db))
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::InsurancePolicy,
                    id,
                })
        })
    }

    pub fn list(&self, filter: &InsurancePolicyFilter) -> Vec<InsurancePolicyRecord> {
        self.store.read(|db| {
            db.insurance_policies
                .iter()
                .filter(|(_, row)| {
                    let patient_ok = filter.patient_id.map_or(true, |want| row.patient_id == want);
                    let active_ok = filter.active.map_or(true, |want| row.active == want);
                    let tier_ok = filter
                        .coverage_tier
                        .as_ref()
                        .map_or(true, |code| row.coverage_tier.code() == code);
                    let search_ok = match &filter.search {
                        Some(needle) => {
                            helpers::matches(&row.insurer_name, needle)
                                || helpers::matches(&row.policy_number, needle)
                        }
                        None => true,
                    };
                    patient_ok && active_ok && tier_ok && search_ok
                })
                .map(|(id, row)| projection::insurance_record(id, row, db))
                .collect()
        })
    }

    /// Full-record replace.
    pub fn replace(
        &self,
        id: RecordId,
        req: CreateInsurancePolicyReq,
    ) -> ClinicResult<InsurancePolicyRecord> {
        let row = InsurancePolicy::from_request(&req)?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::InsurancePolicy, id)?;
            helpers::require(db, EntityKind::Patient, row.patient_id)?;
            policy_unique(db, &row, Some(id))?;
            *db.insurance_policies
                .get_mut(id)
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::InsurancePolicy,
                    id,
                })? = row.clone();
            Ok(projection::insurance_record(id, &row, db))
        })
    }

    /// Partial update.
    pub fn update(
        &self,
        id: RecordId,
        req: UpdateInsurancePolicyReq,
    ) -> ClinicResult<InsurancePolicyRecord> {
        self.store.mutate(|db| {
            let mut row = db
                .insurance_policies
                .get(id)
                .cloned()
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::InsurancePolicy,
                    id,
                })?;
            row.apply_update(&req)?;
            helpers::require(db, EntityKind::Patient, row.patient_id)?;
            policy_unique(db, &row, Some(id))?;
            *db.insurance_policies
                .get_mut(id)
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::InsurancePolicy,
                    id,
                })? = row.clone();
            Ok(projection::insurance_record(id, &row, db))
        })
    }

    /// Deletes a policy. Policies have no dependents, so this never
    /// blocks.
    pub fn delete(&self, id: RecordId) -> ClinicResult<DeleteRes> {
        self.store
            .mutate(|db| helpers::delete(db, EntityKind::InsurancePolicy, id))
    }
}

/// CRUD over doctor schedule slots.
#[derive(Clone)]
pub struct ScheduleService {
    store: Arc<Store>,
}

impl ScheduleService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Creates a slot; the doctor must exist.
    pub fn create(&self, req: CreateScheduleSlotReq) -> ClinicResult<ScheduleSlotRecord> {
        let row = ScheduleSlot::from_request(&req)?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::Doctor, row.doctor_id)?;
            let id = db.schedule_slots.insert(row.clone());
            tracing::info!(id, doctor_id = row.doctor_id, "created schedule slot");
            Ok(projection::schedule_record(id, &row, db))
        })
    }

    pub fn get(&self, id: RecordId) -> ClinicResult<ScheduleSlotRecord> {
        self.store.read(|db| {
            db.schedule_slots
                .get(id)
                .map(|row| projection::schedule_record(id, row, db))
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::ScheduleSlot,
                    id,
                })
        })
    }

    pub fn list(&self, filter: &ScheduleSlotFilter) -> Vec<ScheduleSlotRecord> {
        self.store.read(|db| {
            db.schedule_slots
                .iter()
                .filter(|(_, row)| {
                    let doctor_ok = filter.doctor_id.map_or(true, |want| row.doctor_id == want);
                    let weekday_ok = filter
                        .weekday
                        .map_or(true, |want| row.weekday.code() == want);
                    let active_ok = filter.active.map_or(true, |want| row.active == want);
                    doctor_ok && weekday_ok && active_ok
                })
                .map(|(id, row)| projection::schedule_record(id, row, db))
                .collect()
        })
    }

    /// Full-record replace.
    pub fn replace(
        &self,
        id: RecordId,
        req: CreateScheduleSlotReq,
    ) -> ClinicResult<ScheduleSlotRecord> {
        let row = ScheduleSlot::from_request(&req)?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::ScheduleSlot, id)?;
            helpers::require(db, EntityKind::Doctor, row.doctor_id)?;
            *db.schedule_slots.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::ScheduleSlot,
                id,
            })? = row.clone();
            Ok(projection::schedule_record(id, &row, db))
        })
    }

    /// Partial update.
    pub fn update(
        &self,
        id: RecordId,
        req: UpdateScheduleSlotReq,
    ) -> ClinicResult<ScheduleSlotRecord> {
        self.store.mutate(|db| {
            let mut row = db
                .schedule_slots
                .get(id)
                .cloned()
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::ScheduleSlot,
                    id,
                })?;
            row.apply_update(&req)?;
            helpers::require(db, EntityKind::Doctor, row.doctor_id)?;
            *db.schedule_slots.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::ScheduleSlot,
                id,
            })? = row.clone();
            Ok(projection::schedule_record(id, &row, db))
        })
    }

    /// Deletes a slot. Slots have no dependents, so this never blocks.
    pub fn delete(&self, id: RecordId) -> ClinicResult<DeleteRes> {
        self.store
            .mutate(|db| helpers::delete(db, EntityKind::ScheduleSlot, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::registry::PatientService;
    use api_shared::dto::CreatePatientReq;
    use chrono::NaiveDate;

    fn policy_request(policy_number: &str, patient_id: RecordId) -> CreateInsurancePolicyReq {
        CreateInsurancePolicyReq {
            policy_number: policy_number.into(),
            insurer_name: "Vital Care".into(),
            coverage_tier: "STANDARD".into(),
            coverage_percent: "80".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            expiry_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            active: None,
            patient_id,
        }
    }

    #[test]
    fn duplicate_policy_number_fails_on_the_second_create() {
        let store = Arc::new(Store::in_memory());
        let patients = PatientService::new(store.clone());
        let insurance = InsuranceService::new(store);

        let patient = patients
            .create(CreatePatientReq {
                national_id: "11222333-4".into(),
                first_name: "Ana".into(),
                last_name: "Reyes".into(),
                birth_date: NaiveDate::from_ymd_opt(1990, 4, 12).expect("valid date"),
                gender: "F".into(),
                blood_type: "O+".into(),
                email: "ana@example.com".into(),
                phone: "+56911112222".into(),
                address: "Av. Siempre Viva 123".into(),
                active: None,
            })
            .expect("create patient");

        insurance
            .create(policy_request("POL-1", patient.id))
            .expect("first policy");
        let err = insurance
            .create(policy_request("POL-1", patient.id))
            .expect_err("same policy number");
        match err {
            ClinicError::UniqueConflict { field, .. } => assert_eq!(field, "policy_number"),
            other => panic!("expected UniqueConflict, got {other:?}"),
        }
    }

    #[test]
    fn deleting_patient_cascades_to_policies() {
        let store = Arc::new(Store::in_memory());
        let patients = PatientService::new(store.clone());
        let insurance = InsuranceService::new(store);

        let patient = patients
            .create(CreatePatientReq {
                national_id: "11222333-4".into(),
                first_name: "Ana".into(),
                last_name: "Reyes".into(),
                birth_date: NaiveDate::from_ymd_opt(1990, 4, 12).expect("valid date"),
                gender: "F".into(),
                blood_type: "O+".into(),
                email: "ana@example.com".into(),
                phone: "+56911112222".into(),
                address: "Av. Siempre Viva 123".into(),
                active: None,
            })
            .expect("create patient");
        let policy = insurance
            .create(policy_request("POL-1", patient.id))
            .expect("create policy");

        let outcome = patients.delete(patient.id).expect("delete cascades");
        assert_eq!(outcome.removed.len(), 2);
        assert!(matches!(
            insurance.get(policy.id),
            Err(ClinicError::NotFound { .. })
        ));
    }
}
