//! Encounter services: scheduled appointments and performed
//! consultations.

use std::sync::Arc;

use api_shared::dto::{
    AppointmentFilter, AppointmentRecord, ConsultationFilter, ConsultationRecord,
    CreateAppointmentReq, CreateConsultationReq, DeleteRes, RecordId, UpdateAppointmentReq,
    UpdateConsultationReq,
};
use chrono::Utc;

use super::helpers;
use crate::domain::enums::CodedEnum;
use crate::domain::{Appointment, Consultation};
use crate::error::{ClinicError, ClinicResult};
use crate::projection;
use crate::schema::EntityKind;
use crate::store::{Database, Store};

fn appointment_references(
    db: &Database,
    row: &Appointment,
    exclude_appointment: Option<RecordId>,
) -> ClinicResult<()> {
    helpers::require(db, EntityKind::Patient, row.patient_id)?;
    helpers::require(db, EntityKind::Doctor, row.doctor_id)?;
    if let Some(consultation_id) = row.consultation_id {
        helpers::require(db, EntityKind::Consultation, consultation_id)?;
        helpers::consultation_link_free(db, consultation_id, exclude_appointment)?;
    }
    Ok(())
}

/// CRUD over scheduled appointments.
#[derive(Clone)]
pub struct AppointmentService {
    store: Arc<Store>,
}

impl AppointmentService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Creates an appointment. Patient and doctor must exist; a
    /// consultation link, if given, must point at an existing
    /// consultation not already linked elsewhere.
    pub fn create(&self, req: CreateAppointmentReq) -> ClinicResult<AppointmentRecord> {
        let row = Appointment::from_request(&req, Utc::now())?;
        self.store.mutate(|db| {
            appointment_references(db, &row, None)?;
            let id = db.appointments.insert(row.clone());
            tracing::info!(id, patient_id = row.patient_id, doctor_id = row.doctor_id, "created appointment");
            Ok(projection::appointment_record(id, &row, db))
        })
    }

    pub fn get(&self, id: RecordId) -> ClinicResult<AppointmentRecord> {
        self.store.read(|db| {
            db.appointments
                .get(id)
                .map(|row| projection::appointment_record(id, row, db))
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::Appointment,
                    id,
                })
        })
    }

    pub fn list(&self, filter: &AppointmentFilter) -> Vec<AppointmentRecord> {
        self.store.read(|db| {
            db.appointments
                .iter()
                .filter(|(_, row)| {
                    let patient_ok = filter.patient_id.map_or(true, |want| row.patient_id == want);
                    let doctor_ok = filter.doctor_id.map_or(true, |want| row.doctor_id == want);
                    let status_ok = filter
                        .status
                        .as_ref()
                        .map_or(true, |code| row.status.code() == code);
                    patient_ok && doctor_ok && status_ok
                })
                .map(|(id, row)| projection::appointment_record(id, row, db))
                .collect()
        })
    }

    /// Full-record replace. The system-assigned creation timestamp is
    /// preserved.
    pub fn replace(
        &self,
        id: RecordId,
        req: CreateAppointmentReq,
    ) -> ClinicResult<AppointmentRecord> {
        self.store.mutate(|db| {
            let created_at = db
                .appointments
                .get(id)
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::Appointment,
                    id,
                })?
                .created_at;
            let row = Appointment::from_request(&req, created_at)?;
            appointment_references(db, &row, Some(id))?;
            *db.appointments.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Appointment,
                id,
            })? = row.clone();
            Ok(projection::appointment_record(id, &row, db))
        })
    }

    /// Partial update. `created_at` cannot be changed.
    pub fn update(&self, id: RecordId, req: UpdateAppointmentReq) -> ClinicResult<AppointmentRecord> {
        self.store.mutate(|db| {
            let mut row = db
                .appointments
                .get(id)
                .cloned()
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::Appointment,
                    id,
                })?;
            row.apply_update(&req)?;
            appointment_references(db, &row, Some(id))?;
            *db.appointments.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Appointment,
                id,
            })? = row.clone();
            Ok(projection::appointment_record(id, &row, db))
        })
    }

    /// Deletes an appointment. Appointments have no dependents, so this
    /// never blocks.
    pub fn delete(&self, id: RecordId) -> ClinicResult<DeleteRes> {
        self.store
            .mutate(|db| helpers::delete(db, EntityKind::Appointment, id))
    }
}

/// CRUD over performed consultations.
#[derive(Clone)]
pub struct ConsultationService {
    store: Arc<Store>,
}

impl ConsultationService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Creates a consultation; patient and doctor must exist.
    pub fn create(&self, req: CreateConsultationReq) -> ClinicResult<ConsultationRecord> {
        let row = Consultation::from_request(&req, Utc::now())?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::Patient, row.patient_id)?;
            helpers::require(db, EntityKind::Doctor, row.doctor_id)?;
            let id = db.consultations.insert(row.clone());
            tracing::info!(id, patient_id = row.patient_id, doctor_id = row.doctor_id, "created consultation");
            Ok(projection::consultation_record(id, &row, db))
        })
    }

    pub fn get(&self, id: RecordId) -> ClinicResult<ConsultationRecord> {
        self.store.read(|db| {
            db.consultations
                .get(id)
                .map(|row| projection::consultation_record(id, row, db))
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::Consultation,
                    id,
                })
        })
    }

    pub fn list(&self, filter: &ConsultationFilter) -> Vec<ConsultationRecord> {
        self.store.read(|db| {
            db.consultations
                .iter()
                .filter(|(_, row)| {
                    let patient_ok = filter.patient_id.map_or(true, |want| row.patient_id == want);
                    let doctor_ok = filter.doctor_id.map_or(true, |want| row.doctor_id == want);
                    let status_ok = filter
                        .status
                        .as_ref()
                        .map_or(true, |code| row.status.code() == code);
                    patient_ok && doctor_ok && status_ok
                })
                .map(|(id, row)| projection::consultation_record(id, row, db))
                .collect()
        })
    }

    /// Full-record replace.
    pub fn replace(
        &self,
        id: RecordId,
        req: CreateConsultationReq,
    ) -> ClinicResult<ConsultationRecord> {
        let row = Consultation::from_request(&req, Utc::now())?;
        self.store.mutate(|db| {
            helpers::require(db, EntityKind::Consultation, id)?;
            helpers::require(db, EntityKind::Patient, row.patient_id)?;
            helpers::require(db, EntityKind::Doctor, row.doctor_id)?;
            *db.consultations.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Consultation,
                id,
            })? = row.clone();
            Ok(projection::consultation_record(id, &row, db))
        })
    }

    /// Partial update.
    pub fn update(
        &self,
        id: RecordId,
        req: UpdateConsultationReq,
    ) -> ClinicResult<ConsultationRecord> {
        self.store.mutate(|db| {
            let mut row = db
                .consultations
                .get(id)
                .cloned()
                .ok_or(ClinicError::NotFound {
                    entity: EntityKind::Consultation,
                    id,
                })?;
            row.apply_update(&req)?;
            helpers::require(db, EntityKind::Patient, row.patient_id)?;
            helpers::require(db, EntityKind::Doctor, row.doctor_id)?;
            *db.consultations.get_mut(id).ok_or(ClinicError::NotFound {
                entity: EntityKind::Consultation,
                id,
            })? = row.clone();
            Ok(projection::consultation_record(id, &row, db))
        })
    }

    /// Deletes a consultation: treatments (and their prescriptions)
    /// cascade; a linked appointment has its link cleared and survives.
    pub fn delete(&self, id: RecordId) -> ClinicResult<DeleteRes> {
        self.store
            .mutate(|db| helpers::delete(db, EntityKind::Consultation, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::catalog::SpecialtyService;
    use crate::repositories::registry::{DoctorService, PatientService};
    use api_shared::dto::{CreateDoctorReq, CreatePatientReq, CreateSpecialtyReq};
    use chrono::NaiveDate;

    struct Fixture {
        store: Arc<Store>,
        appointments: AppointmentService,
        consultations: ConsultationService,
        patient_id: RecordId,
        doctor_id: RecordId,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(Store::in_memory());
        let specialties = SpecialtyService::new(store.clone());
        let patients = PatientService::new(store.clone());
        let doctors = DoctorService::new(store.clone());

        let specialty = specialties
            .create(CreateSpecialtyReq {
                name: "Cardiology".into(),
                description: None,
            })
            .expect("create specialty");
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
        let doctor = doctors
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

        Fixture {
            store: store.clone(),
            appointments: AppointmentService::new(store.clone()),
            consultations: ConsultationService::new(store),
            patient_id: patient.id,
            doctor_id: doctor.id,
        }
    }

    fn consultation_request(fx: &Fixture) -> CreateConsultationReq {
        CreateConsultationReq {
            patient_id: fx.patient_id,
            doctor_id: fx.doctor_id,
            occurred_at: None,
            reason: "Chest pain".into(),
            diagnosis: None,
            status: None,
            priority: None,
        }
    }

    #[test]
    fn consultation_link_is_one_to_one() {
        let fx = fixture();
        let consultation = fx
            .consultations
            .create(consultation_request(&fx))
            .expect("create consultation");

        let request = CreateAppointmentReq {
            patient_id: fx.patient_id,
            doctor_id: fx.doctor_id,
            scheduled_at: Utc::now(),
            reason: "Follow-up".into(),
            status: Some("COMPLETED".into()),
            notes: None,
            consultation_id: Some(consultation.id),
        };
        fx.appointments
            .create(request.clone())
            .expect("first link succeeds");
        let err = fx
            .appointments
            .create(request)
            .expect_err("second link to the same consultation conflicts");
        match err {
            ClinicError::UniqueConflict { field, .. } => assert_eq!(field, "consultation_id"),
            other => panic!("expected UniqueConflict, got {other:?}"),
        }
    }

    #[test]
    fn deleting_linked_consultation_keeps_the_appointment() {
        let fx = fixture();
        let consultation = fx
            .consultations
            .create(consultation_request(&fx))
            .expect("create consultation");
        let appointment = fx
            .appointments
            .create(CreateAppointmentReq {
                patient_id: fx.patient_id,
                doctor_id: fx.doctor_id,
                scheduled_at: Utc::now(),
                reason: "Follow-up".into(),
                status: Some("COMPLETED".into()),
                notes: None,
                consultation_id: Some(consultation.id),
            })
            .expect("create linked appointment");

        let outcome = fx
            .consultations
            .delete(consultation.id)
            .expect("consultation deletes");
        assert_eq!(outcome.cleared.len(), 1);

        let survivor = fx
            .appointments
            .get(appointment.id)
            .expect("appointment survives");
        assert!(survivor.consultation_id.is_none());
    }

    #[test]
    fn patient_with_consultations_cannot_be_deleted() {
        let fx = fixture();
        fx.consultations
            .create(consultation_request(&fx))
            .expect("create consultation");

        let err = PatientService::new(fx.store.clone())
            .delete(fx.patient_id)
            .expect_err("consultation protects the patient");
        match err {
            ClinicError::IntegrityBlocked { blocked_by, .. } => {
                assert_eq!(blocked_by, EntityKind::Consultation)
            }
            other => panic!("expected IntegrityBlocked, got {other:?}"),
        }
    }
}
