//! CRUD services, one per entity, grouped by family.
//!
//! Every service holds a shared [`crate::store::Store`] handle and runs
//! each operation as a single transaction: validation first, then
//! uniqueness and referential checks inside the write, then the
//! mutation. Reads project rows through [`crate::projection`].

mod helpers;

pub mod care;
pub mod catalog;
pub mod coverage;
pub mod encounters;
pub mod registry;

pub use care::{HistoryService, PrescriptionService, TreatmentService};
pub use catalog::{MedicationService, SpecialtyService};
pub use coverage::{InsuranceService, ScheduleService};
pub use encounters::{AppointmentService, ConsultationService};
pub use registry::{DoctorService, PatientService};

use std::sync::Arc;

use crate::store::Store;

/// All services over one shared store, for wiring up an API surface in
/// one go.
#[derive(Clone)]
pub struct Services {
    pub specialties: SpecialtyService,
    pub medications: MedicationService,
    pub patients: PatientService,
    pub doctors: DoctorService,
    pub insurance: InsuranceService,
    pub schedules: ScheduleService,
    pub appointments: AppointmentService,
    pub consultations: ConsultationService,
    pub treatments: TreatmentService,
    pub prescriptions: PrescriptionService,
    pub history: HistoryService,
}

impl Services {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            specialties: SpecialtyService::new(store.clone()),
            medications: MedicationService::new(store.clone()),
            patients: PatientService::new(store.clone()),
            doctors: DoctorService::new(store.clone()),
            insurance: InsuranceService::new(store.clone()),
            schedules: ScheduleService::new(store.clone()),
            appointments: AppointmentService::new(store.clone()),
            consultations: ConsultationService::new(store.clone()),
            treatments: TreatmentService::new(store.clone()),
            prescriptions: PrescriptionService::new(store.clone()),
            history: HistoryService::new(store),
        }
    }
}
