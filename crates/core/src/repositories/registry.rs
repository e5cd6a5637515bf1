//! People registry services: patients and doctors.

use std::sync::Arc;

use api_shared::dto::{
    CreateDoctorReq, CreatePatientReq, DeleteRes, DoctorFilter, DoctorRecord, PatientFilter,
    PatientRecord, RecordId, UpdateDoctorReq, UpdatePatientReq,
};

use super::helpers;
use crate::domain::{Doctor, Patient};
use crate::error::{ClinicError, ClinicResult};
use crate::projection;
use crate::schema::EntityKind;
use crate::store::{Database, Store};

fn patient_unique(db: &Database, row: &Patient, exclude: Option<RecordId>) -> ClinicResult<()> {
    helpers::unique(
        EntityKind::Patient,
        "national_id",
        &row.national_id,
        db.patients.iter().map(|(id, p)| (id, p.national_id.as_str())),
        exclude,
    )?;
    helpers::unique(
        EntityKind::Patient,
        "email",
        &row.email,
        db.patients.iter().map(|(id, p)| (id, p.email.as_str())),
        exclude,
    )
}

fn doctor_unique(db: &Database, row: &Doctor, exclude: Option<RecordId>) -> ClinicResult<()> {
    helpers::unique(
        EntityKind::Doctor,
        "national_id",
        &row.national_id,
        db.doctors.iter().map(|(id, d)| (id, d.national_id.as_str())),
        exclude,
    )?;
    helpers::unique(
        EntityKind::Doctor,
        "email",
        &row.email,
        db.doctors.iter().map(|(id, d)| (id, d.email.as_str())),
        exclude,
    )
}

/// CRUD over registered patients.
#[derive(Clone)]
pub struct PatientService {
    store: Arc<Store>,
}

impl PatientService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Creates a patient; national id and email must be unique.
    pub fn create(&self, req: CreatePatientReq) -> ClinicResult<PatientRecord> {
        let row = Patient::from_request(&req)?;
        self.store.mutate(|db| {
            patient_unique(db, &row, None)?;
            let id = db.patients.insert(row.clone());
            tracing::info!(id, national_id = %row.national_id, "created patient");
            Ok(projection::patient_record(id, &row))
        })
    }

    pub fn get(&self, id: RecordId) -> ClinicResult<PatientRecord> {
        self.store.read(|db| {
            db.patients
                .get(id)
                .map(|row| projection::patient_record(id, row))
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::Patient,
                    id,
                })
        })
    }

    /// Lists patients, optionally filtered by the active flag and a
    /// case-insensitive search over national id and names.
    pub fn list(&self, filter: &PatientFilter) -> Vec<PatientRecord> {
        self.store.read(|db| {
            db.patients
                .iter()
                .filter(|(_, row)| {
                    let active_ok = filter.active.map_or(true, |want| row.active == want);
                    let search_ok = match &filter.search {
                        Some(needle) => {
                            helpers::matches(&row.national_id, needle)
                                || helpers::matches(&row.first_name, needle)
                                || helpers::matches(&row.last_name, needle)
                        }
                        None => true,
                    };
                    active_ok && search_ok
                })
                .map(|(id, row)| projection::patient_record(id, row))
                .collect()
        })
    }

    /// Full-record replace.
    pub fn replace(&self, id: RecordId, req: CreatePatientReq) -> ClinicResult<PatientRecord> {
        let row = Patient::from_request(&req)?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::Patient, id)?;
            patient_unique(db, &row, Some(id))?;
            *db.patients.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Patient,
                id,
            })? = row.clone();
            Ok(projection::patient_record(id, &row))
        })
    }

    /// Partial update.
    pub fn update(&self, id: RecordId, req: UpdatePatientReq) -> ClinicResult<PatientRecord> {
        self.store.mutate(|db| {
            let mut row = db.patients.get(id).cloned().ok_or(ClinicError::NotFound {
                entity: EntityKind::Patient,
                id,
            })?;
            row.apply_update(&req)?;
            patient_unique(db, &row, Some(id))?;
            *db.patients.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Patient,
                id,
            })? = row.clone();
            Ok(projection::patient_record(id, &row))
        })
    }

    /// Deletes a patient.
    ///
    /// Blocked while appointments or consultations reference the
    /// patient; insurance policies and history entries cascade.
    pub fn delete(&self, id: RecordId) -> ClinicResult<DeleteRes> {
        self.store
            .mutate(|db| helpers::delete(db, EntityKind::Patient, id))
    }
}

/// CRUD over registered doctors.
#[derive(Clone)]
pub struct DoctorService {
    store: Arc<Store>,
}

impl DoctorService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Creates a doctor; the referenced specialty must exist, and the
    /// national id and email must be unique.
    pub fn create(&self, req: CreateDoctorReq) -> ClinicResult<DoctorRecord> {
        let row = Doctor::from_request(&req)?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::Specialty, row.specialty_id)?;
            doctor_unique(db, &row, None)?;
            let id = db.doctors.insert(row.clone());
            tracing::info!(id, national_id = %row.national_id, "created doctor");
            Ok(projection::doctor_record(id, &row, db))
        })
    }

    pub fn get(&self, id: RecordId) -> ClinicResult<DoctorRecord> {
        self.store.read(|db| {
            db.doctors
                .get(id)
                .map(|row| projection::doctor_record(id, row, db))
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::Doctor,
                    id,
                })
        })
    }

    /// Lists doctors, optionally filtered by specialty, active flag and
    /// a case-insensitive search over national id and names.
    pub fn list(&self, filter: &DoctorFilter) -> Vec<DoctorRecord> {
        self.store.read(|db| {
            db.doctors
                .iter()
                .filter(|(_, row)| {
                    let specialty_ok = filter
                        .specialty_id
                        .map_or(true, |want| row.specialty_id == want);
                    let active_ok = filter.active.map_or(true, |want| row.active == want);
                    let search_ok = match &filter.search {
                        Some(needle) => {
                            helpers::matches(&row.national_id, needle)
                                || helpers::matches(&row.first_name, needle)
                                || helpers::matches(&row.last_name, needle)
                        }
                        None => true,
                    };
                    specialty_ok && active_ok && search_ok
                })
                .map(|(id, row)| projection::doctor_record(id, row, db))
                .collect()
        })
    }

    /// Full-record replace.
    pub fn replace(&self, id: RecordId, req: CreateDoctorReq) -> ClinicResult<DoctorRecord> {
        let row = Doctor::from_request(&req)?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::Doctor, id)?;
            helpers::require(db, EntityKind::Specialty, row.specialty_id)?;
            doctor_unique(db, &row, Some(id))?;
            *db.doctors.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Doctor,
                id,
            })? = row.clone();
            Ok(projection::doctor_record(id, &row, db))
        })
    }

    /// Partial update.
    pub fn update(&self, id: RecordId, req: UpdateDoctorReq) -> ClinicResult<DoctorRecord> {
        self.store.mutate(|db| {
            let mut row = db.doctors.get(id).cloned().ok_or(ClinicError::NotFound {
                entity: EntityKind::Doctor,
                id,
            })?;
            row.apply_update(&req)?;
            helpers::require(db, EntityKind::Specialty, row.specialty_id)?;
            doctor_unique(db, &row, Some(id))?;
            *db.doctors.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Doctor,
                id,
            })? = row.clone();
            Ok(projection::doctor_record(id, &row, db))
        })
    }

    /// Deletes a doctor.
    ///
    /// Blocked while appointments or consultations reference the
    /// doctor; schedule slots cascade, history references are cleared.
    pub fn delete(&self, id: RecordId) -> ClinicResult<DeleteRes> {
        self.store
            .mutate(|db| helpers::delete(db, EntityKind::Doctor, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_shared::dto::CreateSpecialtyReq;
    use crate::repositories::catalog::SpecialtyService;
    use chrono::NaiveDate;

    fn patient_request(national_id: &str, email: &str) -> CreatePatientReq {
        CreatePatientReq {
            national_id: national_id.into(),
            first_name: "Ana".into(),
            last_name: "Reyes".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 12).expect("valid date"),
            gender: "F".into(),
            blood_type: "O+".into(),
            email: email.into(),
            phone: "+56911112222".into(),
            address: "Av. Siempre Viva 123".into(),
            active: None,
        }
    }

    #[test]
    fn duplicate_national_id_fails_on_the_second_create() {
        let store = Arc::new(Store::in_memory());
        let patients = PatientService::new(store);
        patients
            .create(patient_request("11222333-4", "ana@example.com"))
            .expect("first create");
        let err = patients
            .create(patient_request("11222333-4", "other@example.com"))
            .expect_err("same national id");
        match err {
            ClinicError::UniqueConflict { field, .. } => assert_eq!(field, "national_id"),
            other => panic!("expected UniqueConflict, got {other:?}"),
        }
    }

    #[test]
    fn doctor_requires_existing_specialty() {
        let store = Arc::new(Store::in_memory());
        let doctors = DoctorService::new(store);
        let err = doctors
            .create(CreateDoctorReq {
                national_id: "22333444-5".into(),
                first_name: "Luis".into(),
                last_name: "Soto".into(),
                gender: "M".into(),
                email: "luis@example.com".into(),
                phone: "+56955556666".into(),
                active: None,
                specialty_id: 99,
            })
            .expect_err("specialty does not exist");
        match err {
            ClinicError::NotFound { entity, id } => {
                assert_eq!(entity, EntityKind::Specialty);
                assert_eq!(id, 99);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn specialty_deletion_is_blocked_then_allowed() {
        let store = Arc::new(Store::in_memory());
        let specialties = SpecialtyService::new(store.clone());
        let doctors = DoctorService::new(store);

        let cardiology = specialties
            .create(CreateSpecialtyReq {
                name: "Cardiology".into(),
                description: None,
            })
            .expect("create specialty");
        let doctor = doctors
            .create(CreateDoctorReq {
                national_id: "22333444-5".into(),
                first_name: "Luis".into(),
                last_name: "Soto".into(),
                gender: "M".into(),
                email: "luis@example.com".into(),
                phone: "+56955556666".into(),
                active: None,
                specialty_id: cardiology.id,
            })
            .expect("create doctor");

        let err = specialties
            .delete(cardiology.id)
            .expect_err("doctor still references the specialty");
        match err {
            ClinicError::IntegrityBlocked { blocked_by, .. } => {
                assert_eq!(blocked_by, EntityKind::Doctor)
            }
            other => panic!("expected IntegrityBlocked, got {other:?}"),
        }
        // Both rows are intact after the refusal.
        assert!(specialties.get(cardiology.id).is_ok());
        assert!(doctors.get(doctor.id).is_ok());

        doctors.delete(doctor.id).expect("doctor deletes cleanly");
        specialties
            .delete(cardiology.id)
            .expect("specialty deletes once unreferenced");
    }
}
