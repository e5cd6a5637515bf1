//! The stored entity rows and their field validation.
//!
//! Each module owns one entity: the row struct as it is persisted, a
//! `from_request` constructor validating a create/replace request, and
//! an `apply_update` for partial updates. Referential and uniqueness
//! checks do not live here; they need the surrounding tables and are
//! performed by the services inside the writing transaction.

pub mod appointment;
pub mod consultation;
pub mod doctor;
pub mod enums;
pub mod history;
pub mod insurance;
pub mod medication;
pub mod patient;
pub mod prescription;
pub mod schedule;
pub mod specialty;
pub mod treatment;

pub use appointment::Appointment;
pub use consultation::Consultation;
pub use doctor::Doctor;
pub use history::HistoryEntry;
pub use insurance::InsurancePolicy;
pub use medication::Medication;
pub use patient::Patient;
pub use prescription::Prescription;
pub use schedule::ScheduleSlot;
pub use specialty::Specialty;
pub use treatment::Treatment;
