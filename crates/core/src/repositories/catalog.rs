//! Catalog services: specialties and medications.

use std::sync::Arc;

use api_shared::dto::{
    CreateMedicationReq, CreateSpecialtyReq, DeleteRes, MedicationFilter, MedicationRecord,
    RecordId, SpecialtyFilter, SpecialtyRecord, UpdateMedicationReq, UpdateSpecialtyReq,
};

use super::helpers;
use crate::domain::enums::CodedEnum;
use crate::domain::{Medication, Specialty};
use crate::error::{ClinicError, ClinicResult};
use crate::projection;
use crate::schema::EntityKind;
use crate::store::Store;

/// CRUD over medical specialties.
#[derive(Clone)]
pub struct SpecialtyService {
    store: Arc<Store>,
}

impl SpecialtyService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Creates a specialty; the name must be unique.
    pub fn create(&self, req: CreateSpecialtyReq) -> ClinicResult<SpecialtyRecord> {
        let row = Specialty::from_request(&req)?;
        self.store.mutate(|db| {
            helpers::unique(
                EntityKind::Specialty,
                "name",
                &row.name,
                db.specialties.iter().map(|(id, s)| (id, s.name.as_str())),
                None,
            )?;
            let id = db.specialties.insert(row.clone());
            tracing::info!(id, name = %row.name, "created specialty");
            Ok(projection::specialty_record(id, &row))
        })
    }

    pub fn get(&self, id: RecordId) -> ClinicResult<SpecialtyRecord> {
        self.store.read(|db| {
            db.specialties
                .get(id)
                .map(|row| projection::specialty_record(id, row))
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::Specialty,
                    id,
                })
        })
    }

    pub fn list(&self, filter: &SpecialtyFilter) -> Vec<SpecialtyRecord> {
        self.store.read(|db| {
            db.specialties
                .iter()
                .filter(|(_, row)| match &filter.search {
                    Some(needle) => helpers::matches(&row.name, needle),
                    None => true,
                })
                .map(|(id, row)| projection::specialty_record(id, row))
                .collect()
        })
    }

    /// Full-record replace.
    pub fn replace(&self, id: RecordId, req: CreateSpecialtyReq) -> ClinicResult<SpecialtyRecord> {
        let row = Specialty::from_request(&req)?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::Specialty, id)?;
            helpers::unique(
                EntityKind::Specialty,
                "name",
                &row.name,
                db.specialties.iter().map(|(id, s)| (id, s.name.as_str())),
                Some(id),
            )?;
            *db.specialties.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Specialty,
                id,
            })? = row.clone();
            Ok(projection::specialty_record(id, &row))
        })
    }

    /// Partial update.
    pub fn update(&self, id: RecordId, req: UpdateSpecialtyReq) -> ClinicResult<SpecialtyRecord> {
        self.store.mutate(|db| {
            let mut row = db
                .specialties
                .get(id)
                .cloned()
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::Specialty,
                    id,
                })?;
            row.apply_update(&req)?;
            helpers::unique(
                EntityKind::Specialty,
                "name",
                &row.name,
                db.specialties.iter().map(|(id, s)| (id, s.name.as_str())),
                Some(id),
            )?;
            *db.specialties.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Specialty,
                id,
            })? = row.clone();
            Ok(projection::specialty_record(id, &row))
        })
    }

    /// Deletes a specialty. Blocked while any doctor references it.
    pub fn delete(&self, id: RecordId) -> ClinicResult<DeleteRes> {
        self.store
            .mutate(|db| helpers::delete(db, EntityKind::Specialty, id))
    }
}

/// CRUD over the medication catalog.
#[derive(Clone)]
pub struct MedicationService {
    store: Arc<Store>,
}

impl MedicationService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Creates a medication; the name must be unique.
    pub fn create(&self, req: CreateMedicationReq) -> ClinicResult<MedicationRecord> {
        let row = Medication::from_request(&req)?;
        self.store.mutate(|db| {
            helpers::unique(
                EntityKind::Medication,
                "name",
                &row.name,
                db.medications.iter().map(|(id, m)| (id, m.name.as_str())),
                None,
            )?;
            let id = db.medications.insert(row.clone());
            tracing::info!(id, name = %row.name, "created medication");
            Ok(projection::medication_record(id, &row))
        })
    }

    pub fn get(&self, id: RecordId) -> ClinicResult<MedicationRecord> {
        self.store.read(|db| {
            db.medications
                .get(id)
                .map(|row| projection::medication_record(id, row))
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::Medication,
                    id,
                })
        })
    }

    pub fn list(&self, filter: &MedicationFilter) -> Vec<MedicationRecord> {
        self.store.read(|db| {
            db.medications
                .iter()
                .filter(|(_, row)| {
                    let search_ok = match &filter.search {
                        Some(needle) => {
                            helpers::matches(&row.name, needle)
                                || helpers::matches(&row.laboratory, needle)
                        }
                        None => true,
                    };
                    let category_ok = match &filter.category {
                        Some(code) => row.category.code() == code,
                        None => true,
                    };
                    search_ok && category_ok
                })
                .map(|(id, row)| projection::medication_record(id, row))
                .collect()
        })
    }

    /// Full-record replace.
    pub fn replace(
        &self,
        id: RecordId,
        req: CreateMedicationReq,
    ) -> ClinicResult<MedicationRecord> {
        let row = Medication::from_request(&req)?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::Medication, id)?;
            helpers::unique(
                EntityKind::Medication,
                "name",
                &row.name,
                db.medications.iter().map(|(id, m)| (id, m.name.as_str())),
                Some(id),
            )?;
            *db.medications.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Medication,
                id,
            })? = row.clone();
            Ok(projection::medication_record(id, &row))
        })
    }

    /// Partial update.
    pub fn update(&self, id: RecordId, req: UpdateMedicationReq) -> ClinicResult<MedicationRecord> {
        self.store.mutate(|db| {
            let mut row = db
                .medications
                .get(id)
                .cloned()
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::Medication,
                    id,
                })?;
            row.apply_update(&req)?;
            helpers::unique(
                EntityKind::Medication,
                "name",
                &row.name,
                db.medications.iter().map(|(id, m)| (id, m.name.as_str())),
                Some(id),
            )?;
            *db.medications.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Medication,
                id,
            })? = row.clone();
            Ok(projection::medication_record(id, &row))
        })
    }

    /// Deletes a medication. Blocked while any prescription references
    /// it.
    pub fn delete(&self, id: RecordId) -> ClinicResult<DeleteRes> {
        self.store
            .mutate(|db| helpers::delete(db, EntityKind::Medication, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SpecialtyService {
        SpecialtyService::new(Arc::new(Store::in_memory()))
    }

    #[test]
    fn duplicate_specialty_name_conflicts() {
        let specialties = service();
        specialties
            .create(CreateSpecialtyReq {
                name: "Cardiology".into(),
                description: None,
            })
            .expect("first create");
        let err = specialties
            .create(CreateSpecialtyReq {
                name: "Cardiology".into(),
                description: Some("duplicate".into()),
            })
            .expect_err("second create conflicts");
        match err {
            ClinicError::UniqueConflict { field, value, .. } => {
                assert_eq!(field, "name");
                assert_eq!(value, "Cardiology");
            }
            other => panic!("expected UniqueConflict, got {other:?}"),
        }
    }

    #[test]
    fn update_does_not_conflict_with_itself() {
        let specialties = service();
        let created = specialties
            .create(CreateSpecialtyReq {
                name: "Cardiology".into(),
                description: None,
            })
            .expect("create");
        let updated = specialties
            .update(
                created.id,
                UpdateSpecialtyReq {
                    description: Some("Heart and vessels".into()),
                    ..Default::default()
                },
            )
            .expect("update with unchanged name");
        assert_eq!(updated.description.as_deref(), Some("Heart and vessels"));
    }
}
