//! Ongoing-care services: treatments, prescription lines and clinical
//! history entries.

use std::sync::Arc;

use api_shared::dto::{
    CreateHistoryEntryReq, CreatePrescriptionReq, CreateTreatmentReq, DeleteRes,
    HistoryEntryFilter, HistoryEntryRecord, PrescriptionFilter, PrescriptionRecord, RecordId,
    TreatmentFilter, TreatmentRecord, UpdateHistoryEntryReq, UpdatePrescriptionReq,
    UpdateTreatmentReq,
};
use chrono::Utc;

use super::helpers;
use crate::domain::{HistoryEntry, Prescription, Treatment};
use crate::error::{ClinicError, ClinicResult};
use crate::projection;
use crate::schema::EntityKind;
use crate::store::Store;

/// CRUD over treatments.
#[derive(Clone)]
pub struct TreatmentService {
    store: Arc<Store>,
}

impl TreatmentService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Creates a treatment; the consultation it derives from must
    /// exist.
    pub fn create(&self, req: CreateTreatmentReq) -> ClinicResult<TreatmentRecord> {
        let row = Treatment::from_request(&req)?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::Consultation, row.consultation_id)?;
            let id = db.treatments.insert(row.clone());
            tracing::info!(id, consultation_id = row.consultation_id, "created treatment");
            Ok(projection::treatment_record(id, &row))
        })
    }

    pub fn get(&self, id: RecordId) -> ClinicResult<TreatmentRecord> {
        self.store.read(|db| {
            db.treatments
                .get(id)
                .map(|row| projection::treatment_record(id, row))
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::Treatment,
                    id,
                })
        })
    }

    pub fn list(&self, filter: &TreatmentFilter) -> Vec<TreatmentRecord> {
        self.store.read(|db| {
            db.treatments
                .iter()
                .filter(|(_, row)| {
                    filter
                        .consultation_id
                        .map_or(true, |want| row.consultation_id == want)
                })
                .map(|(id, row)| projection::treatment_record(id, row))
                .collect()
        })
    }

    /// Full-record replace.
    pub fn replace(&self, id: RecordId, req: CreateTreatmentReq) -> ClinicResult<TreatmentRecord> {
        let row = Treatment::from_request(&req)?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::Treatment, id)?;
            helpers::require(db, EntityKind::Consultation, row.consultation_id)?;
            *db.treatments.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Treatment,
                id,
            })? = row.clone();
            Ok(projection::treatment_record(id, &row))
        })
    }

    /// Partial update.
    pub fn update(&self, id: RecordId, req: UpdateTreatmentReq) -> ClinicResult<TreatmentRecord> {
        self.store.mutate(|db| {
            let mut row = db.treatments.get(id).cloned().ok_or(ClinicError::NotFound {
                entity: EntityKind::Treatment,
                id,
            })?;
            row.apply_update(&req)?;
            helpers::require(db, EntityKind::Consultation, row.consultation_id)?;
            *db.treatments.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Treatment,
                id,
            })? = row.clone();
            Ok(projection::treatment_record(id, &row))
        })
    }

    /// Deletes a treatment; its prescription lines cascade.
    pub fn delete(&self, id: RecordId) -> ClinicResult<DeleteRes> {
        self.store
            .mutate(|db| helpers::delete(db, EntityKind::Treatment, id))
    }
}

/// CRUD over prescription lines.
#[derive(Clone)]
pub struct PrescriptionService {
    store: Arc<Store>,
}

impl PrescriptionService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Creates a prescription line; treatment and medication must
    /// exist.
    pub fn create(&self, req: CreatePrescriptionReq) -> ClinicResult<PrescriptionRecord> {
        let row = Prescription::from_request(&req)?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::Treatment, row.treatment_id)?;
            helpers::require(db, EntityKind::Medication, row.medication_id)?;
            let id = db.prescriptions.insert(row.clone());
            tracing::info!(id, treatment_id = row.treatment_id, "created prescription");
            Ok(projection::prescription_record(id, &row, db))
        })
    }

    pub fn get(&self, id: RecordId) -> ClinicResult<PrescriptionRecord> {
        self.store.read(|db| {
            db.prescriptions
                .get(id)
                .map(|row| projection::prescription_record(id, row, db))
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::Prescription,
                    id,
                })
        })
    }

    pub fn list(&self, filter: &PrescriptionFilter) -> Vec<PrescriptionRecord> {
        self.store.read(|db| {
            db.prescriptions
                .iter()
                .filter(|(_, row)| {
                    let treatment_ok = filter
                        .treatment_id
                        .map_or(true, |want| row.treatment_id == want);
                    let medication_ok = filter
                        .medication_id
                        .map_or(true, |want| row.medication_id == want);
                    treatment_ok && medication_ok
                })
                .map(|(id, row)| projection::prescription_record(id, row, db))
                .collect()
        })
    }

    /// Full-record replace.
    pub fn replace(
        &self,
        id: RecordId,
        req: CreatePrescriptionReq,
    ) -> ClinicResult<PrescriptionRecord> {
        let row = Prescription::from_request(&req)?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::Prescription, id)?;
            helpers::require(db, EntityKind::Treatment, row.treatment_id)?;
            helpers::require(db, EntityKind::Medication, row.medication_id)?;
            *db.prescriptions.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Prescription,
                id,
            })? = row.clone();
            Ok(projection::prescription_record(id, &row, db))
        })
    }

    /// Partial update.
    pub fn update(
        &self,
        id: RecordId,
        req: UpdatePrescriptionReq,
    ) -> ClinicResult<PrescriptionRecord> {
        self.store.mutate(|db| {
            let mut row = db
                .prescriptions
                .get(id)
                .cloned()
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::Prescription,
                    id,
                })?;
            row.apply_update(&req)?;
            helpers::require(db, EntityKind::Treatment, row.treatment_id)?;
            helpers::require(db, EntityKind::Medication, row.medication_id)?;
            *db.prescriptions.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Prescription,
                id,
            })? = row.clone();
            Ok(projection::prescription_record(id, &row, db))
        })
    }

    /// Deletes a prescription line. Lines have no dependents, so this
    /// never blocks.
    pub fn delete(&self, id: RecordId) -> ClinicResult<DeleteRes> {
        self.store
            .mutate(|db| helpers::delete(db, EntityKind::Prescription, id))
    }
}

/// CRUD over clinical history entries.
#[derive(Clone)]
pub struct HistoryService {
    store: Arc<Store>,
}

impl HistoryService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Creates a history entry; the patient must exist, and the
    /// recording doctor too when given.
    pub fn create(&self, req: CreateHistoryEntryReq) -> ClinicResult<HistoryEntryRecord> {
        let row = HistoryEntry::from_request(&req, Utc::now().date_naive())?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::Patient, row.patient_id)?;
            if let Some(doctor_id) = row.doctor_id {
                helpers::require(db, EntityKind::Doctor, doctor_id)?;
            }
            let id = db.history_entries.insert(row.clone());
            tracing::info!(id, patient_id = row.patient_id, "created history entry");
            Ok(projection::history_record(id, &row, db))
        })
    }

    pub fn get(&self, id: RecordId) -> ClinicResult<HistoryEntryRecord> {
        self.store.read(|db| {
            db.history_entries
                .get(id)
                .map(|row| projection::history_record(id, row, db))
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::HistoryEntry,
                    id,
                })
        })
    }

    pub fn list(&self, filter: &HistoryEntryFilter) -> Vec<HistoryEntryRecord> {
        self.store.read(|db| {
            db.history_entries
                .iter()
                .filter(|(_, row)| {
                    let patient_ok = filter.patient_id.map_or(true, |want| row.patient_id == want);
                    let doctor_ok = filter
                        .doctor_id
                        .map_or(true, |want| row.doctor_id == Some(want));
                    let search_ok = match &filter.search {
                        Some(needle) => {
                            helpers::matches(&row.entry_type, needle)
                                || helpers::matches(&row.description, needle)
                        }
                        None => true,
                    };
                    patient_ok && doctor_ok && search_ok
                })
                .map(|(id, row)| projection::history_record(id, row, db))
                .collect()
        })
    }

    /// Full-record replace.
    pub fn replace(
        &self,
        id: RecordId,
        req: CreateHistoryEntryReq,
    ) -> ClinicResult<HistoryEntryRecord> {
        let row = HistoryEntry::from_request(&req, Utc::now().date_naive())?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::HistoryEntry, id)?;
            helpers::require(db, EntityKind::Patient, row.patient_id)?;
            if let Some(doctor_id) = row.doctor_id {
                helpers::require(db, EntityKind::Doctor, doctor_id)?;
            }
            *db.history_entries.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::HistoryEntry,
                id,
            })? = row.clone();
            Ok(projection::history_record(id, &row, db))
        })
    }

    /// Partial update.
    pub fn update(
        &self,
        id: RecordId,
        req: UpdateHistoryEntryReq,
    ) -> ClinicResult<HistoryEntryRecord> {
        self.store.mutate(|db| {
            let mut row = db
                .history_entries
                .get(id)
                .cloned()
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::HistoryEntry,
                    id,
                })?;
            row.apply_update(&req)?;
            helpers::require(db, EntityKind::Patient, row.patient_id)?;
            if let Some(doctor_id) = row.doctor_id {
                helpers::require(db, EntityKind::Doctor, doctor_id)?;
            }
            *db.history_entries.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::HistoryEntry,
                id,
            })? = row.clone();
            Ok(projection::history_record(id, &row, db))
        })
    }

    /// Deletes a history entry. Entries have no dependents, so this
    /// never blocks.
    pub fn delete(&self, id: RecordId) -> ClinicResult<DeleteRes> {
        self.store
            .mutate(|db| helpers::delete(db, EntityKind::HistoryEntry, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::catalog::SpecialtyService;
    use crate::repositories::encounters::ConsultationService;
    use crate::repositories::registry::{DoctorService, PatientService};
    use api_shared::dto::{
        CreateConsultationReq, CreateDoctorReq, CreatePatientReq, CreateSpecialtyReq,
    };
    use chrono::NaiveDate;

    fn seeded_store() -> (Arc<Store>, RecordId) {
        let store = Arc::new(Store::in_memory());
        let specialty = SpecialtyService::new(store.clone())
            .create(CreateSpecialtyReq {
                name: "Cardiology".into(),
                description: None,
            })
            .expect("create specialty");
        let patient = PatientService::new(store.clone())
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
        let doctor = DoctorService::new(store.clone())
            .create(CreateDoctorReq {
                national_id: "22333444-5".into(),
                first_name: "Luis".into(),
                last_name: "Soto".into(),
                gender: "M".into(),
                email: "luis@example.com".into(),
                phone: "+56955556666".into(),
                active: None,
                specialty_id: specialty.id,
            })
            .expect("create doctor");
        let consultation = ConsultationService::new(store.clone())
            .create(CreateConsultationReq {
                patient_id: patient.id,
                doctor_id: doctor.id,
                occurred_at: None,
                reason: "Chest pain".into(),
                diagnosis: None,
                status: None,
                priority: None,
            })
            .expect("create consultation");
        (store, consultation.id)
    }

    #[test]
    fn deleting_consultation_removes_its_treatments() {
        let (store, consultation_id) = seeded_store();
        let treatments = TreatmentService::new(store.clone());
        let consultations = ConsultationService::new(store);

        let treatment = treatments
            .create(CreateTreatmentReq {
                consultation_id,
                description: "Daily aspirin".into(),
                duration_days: 30,
                observations: None,
            })
            .expect("create treatment");

        let outcome = consultations
            .delete(consultation_id)
            .expect("consultation deletes");
        assert!(outcome
            .removed
            .iter()
            .any(|row| row.entity == "treatment" && row.id == treatment.id));
        assert!(matches!(
            treatments.get(treatment.id),
            Err(ClinicError::NotFound { .. })
        ));
    }

    #[test]
    fn medication_is_protected_by_prescriptions() {
        let (store, consultation_id) = seeded_store();
        let treatments = TreatmentService::new(store.clone());
        let prescriptions = PrescriptionService::new(store.clone());
        let medications = crate::repositories::catalog::MedicationService::new(store);

        let treatment = treatments
            .create(CreateTreatmentReq {
                consultation_id,
                description: "Daily aspirin".into(),
                duration_days: 30,
                observations: None,
            })
            .expect("create treatment");
        let medication = medications
            .create(api_shared::dto::CreateMedicationReq {
                name: "Aspirin 100mg".into(),
                laboratory: "Andina".into(),
                category: "ANALGESIC".into(),
                stock: 100,
                unit_price: "990".into(),
            })
            .expect("create medication");
        prescriptions
            .create(CreatePrescriptionReq {
                treatment_id: treatment.id,
                medication_id: medication.id,
                dosage: "100mg".into(),
                frequency: "Once daily".into(),
                duration: "30 days".into(),
                route: "ORAL".into(),
            })
            .expect("create prescription");

        let err = medications
            .delete(medication.id)
            .expect_err("prescription protects the medication");
        match err {
            ClinicError::IntegrityBlocked { blocked_by, .. } => {
                assert_eq!(blocked_by, EntityKind::Prescription)
            }
            other => panic!("expected IntegrityBlocked, got {other:?}"),
        }

        // Deleting the treatment cascades the prescription, after which
        // the medication deletes cleanly.
        treatments.delete(treatment.id).expect("treatment deletes");
        medications
            .delete(medication.id)
            .expect("medication deletes once unreferenced");
    }
}
