//! Read-only projections for the API layer.
//!
//! Pure functions from stored rows to their wire records: they add the
//! derived display fields (name composites, enum labels) and never
//! persist anything. A missing optional reference renders the
//! `"not specified"` placeholder; required references are resolved
//! through the same fallback so a projection can never fail.

use api_shared::dto::{
    AppointmentRecord, ConsultationRecord, DoctorRecord, HistoryEntryRecord,
    InsurancePolicyRecord, MedicationRecord, PatientRecord, PrescriptionRecord, RecordId,
    ScheduleSlotRecord, SpecialtyRecord, TreatmentRecord,
};

use crate::domain::enums::CodedEnum;
use crate::domain::{
    Appointment, Consultation, Doctor, HistoryEntry, InsurancePolicy, Medication, Patient,
    Prescription, ScheduleSlot, Specialty, Treatment,
};
use crate::store::Database;

/// Placeholder rendered when an optional reference is absent.
pub const NOT_SPECIFIED: &str = "not specified";

/// `"First Last"` composite for a patient.
pub fn patient_full_name(patient: &Patient) -> String {
    format!("{} {}", patient.first_name, patient.last_name)
}

/// `"First Last (national-id)"` composite used where the patient is
/// referenced from another record.
pub fn patient_display(patient: &Patient) -> String {
    format!(
        "{} {} ({})",
        patient.first_name, patient.last_name, patient.national_id
    )
}

/// `"Dr. First Last"` composite for a doctor.
pub fn doctor_display(doctor: &Doctor) -> String {
    format!("Dr. {} {}", doctor.first_name, doctor.last_name)
}

fn patient_display_or_placeholder(db: &Database, id: RecordId) -> String {
    db.patients
        .get(id)
        .map(patient_display)
        .unwrap_or_else(|| NOT_SPECIFIED.to_owned())
}

fn doctor_display_or_placeholder(db: &Database, id: Option<RecordId>) -> String {
    id.and_then(|id| db.doctors.get(id))
        .map(doctor_display)
        .unwrap_or_else(|| NOT_SPECIFIED.to_owned())
}

pub fn specialty_record(id: RecordId, row: &Specialty) -> SpecialtyRecord {
    SpecialtyRecord {
        id,
        name: row.name.clone(),
        description: row.description.clone(),
    }
}

pub fn patient_record(id: RecordId, row: &Patient) -> PatientRecord {
    PatientRecord {
        id,
        national_id: row.national_id.clone(),
        first_name: row.first_name.clone(),
        last_name: row.last_name.clone(),
        full_name: patient_full_name(row),
        birth_date: row.birth_date,
        gender: row.gender.code().to_owned(),
        gender_label: row.gender.label().to_owned(),
        blood_type: row.blood_type.code().to_owned(),
        blood_type_label: row.blood_type.label().to_owned(),
        email: row.email.clone(),
        phone: row.phone.clone(),
        address: row.address.clone(),
        active: row.active,
    }
}

pub fn doctor_record(id: RecordId, row: &Doctor, db: &Database) -> DoctorRecord {
    DoctorRecord {
        id,
        national_id: row.national_id.clone(),
        first_name: row.first_name.clone(),
        last_name: row.last_name.clone(),
        display_name: doctor_display(row),
        gender: row.gender.code().to_owned(),
        gender_label: row.gender.label().to_owned(),
        email: row.email.clone(),
        phone: row.phone.clone(),
        active: row.active,
        specialty_id: row.specialty_id,
        specialty_name: db
            .specialties
            .get(row.specialty_id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| NOT_SPECIFIED.to_owned()),
    }
}

pub fn insurance_record(
    id: RecordId,
    row: &InsurancePolicy,
    db: &Database,
) -> InsurancePolicyRecord {
    InsurancePolicyRecord {
        id,
        policy_number: row.policy_number.clone(),
        insurer_name: row.insurer_name.clone(),
        coverage_tier: row.coverage_tier.code().to_owned(),
        coverage_tier_label: row.coverage_tier.label().to_owned(),
        coverage_percent: row.coverage_percent.to_string(),
        start_date: row.start_date,
        expiry_date: row.expiry_date,
        active: row.active,
        patient_id: row.patient_id,
        patient_name: db
            .patients
            .get(row.patient_id)
            .map(patient_full_name)
            .unwrap_or_else(|| NOT_SPECIFIED.to_owned()),
    }
}

pub fn schedule_record(id: RecordId, row: &ScheduleSlot, db: &Database) -> ScheduleSlotRecord {
    ScheduleSlotRecord {
        id,
        doctor_id: row.doctor_id,
        doctor_name: doctor_display_or_placeholder(db, Some(row.doctor_id)),
        weekday: row.weekday.code(),
        weekday_label: row.weekday.label().to_owned(),
        start_time: row.start_time,
        end_time: row.end_time,
        slot_minutes: row.slot_minutes,
        active: row.active,
    }
}

pub fn appointment_record(id: RecordId, row: &Appointment, db: &Database) -> AppointmentRecord {
    AppointmentRecord {
        id,
        patient_id: row.patient_id,
        patient_name: db
            .patients
            .get(row.patient_id)
            .map(patient_full_name)
            .unwrap_or_else(|| NOT_SPECIFIED.to_owned()),
        doctor_id: row.doctor_id,
        doctor_name: doctor_display_or_placeholder(db, Some(row.doctor_id)),
        scheduled_at: row.scheduled_at,
        reason: row.reason.clone(),
        status: row.status.code().to_owned(),
        status_label: row.status.label().to_owned(),
        notes: row.notes.clone(),
        created_at: row.created_at,
        consultation_id: row.consultation_id,
    }
}

pub fn consultation_record(id: RecordId, row: &Consultation, db: &Database) -> ConsultationRecord {
    ConsultationRecord {
        id,
        patient_id: row.patient_id,
        patient_name: patient_display_or_placeholder(db, row.patient_id),
        doctor_id: row.doctor_id,
        doctor_name: doctor_display_or_placeholder(db, Some(row.doctor_id)),
        occurred_at: row.occurred_at,
        reason: row.reason.clone(),
        diagnosis: row.diagnosis.clone(),
        status: row.status.code().to_owned(),
        status_label: row.status.label().to_owned(),
        priority: row.priority.code().to_owned(),
        priority_label: row.priority.label().to_owned(),
    }
}

pub fn treatment_record(id: RecordId, row: &Treatment) -> TreatmentRecord {
    TreatmentRecord {
        id,
        consultation_id: row.consultation_id,
        description: row.description.clone(),
        duration_days: row.duration_days,
        observations: row.observations.clone(),
    }
}

pub fn medication_record(id: RecordId, row: &Medication) -> MedicationRecord {
    MedicationRecord {
        id,
        name: row.name.clone(),
        laboratory: row.laboratory.clone(),
        category: row.category.code().to_owned(),
        category_label: row.category.label().to_owned(),
        stock: row.stock,
        unit_price: row.unit_price.to_string(),
    }
}

pub fn prescription_record(id: RecordId, row: &Prescription, db: &Database) -> PrescriptionRecord {
    PrescriptionRecord {
        id,
        treatment_id: row.treatment_id,
        medication_id: row.medication_id,
        medication_name: db
            .medications
            .get(row.medication_id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| NOT_SPECIFIED.to_owned()),
        dosage: row.dosage.clone(),
        frequency: row.frequency.clone(),
        duration: row.duration.clone(),
        route: row.route.code().to_owned(),
        route_label: row.route.label().to_owned(),
    }
}

pub fn history_record(id: RecordId, row: &HistoryEntry, db: &Database) -> HistoryEntryRecord {
    HistoryEntryRecord {
        id,
        patient_id: row.patient_id,
        patient_name: db
            .patients
            .get(row.patient_id)
            .map(patient_full_name)
            .unwrap_or_else(|| NOT_SPECIFIED.to_owned()),
        registered_on: row.registered_on,
        entry_type: row.entry_type.clone(),
        description: row.description.clone(),
        related_medications: row.related_medications.clone(),
        doctor_id: row.doctor_id,
        recorded_by: doctor_display_or_placeholder(db, row.doctor_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::{BloodType, Gender};
    use chrono::NaiveDate;

    #[test]
    fn history_without_doctor_renders_placeholder() {
        let db = Database::default();
        let entry = HistoryEntry {
            patient_id: 42,
            registered_on: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
            entry_type: "allergy".into(),
            description: "Penicillin".into(),
            related_medications: None,
            doctor_id: None,
        };
        let record = history_record(1, &entry, &db);
        assert_eq!(record.recorded_by, NOT_SPECIFIED);
        assert_eq!(record.patient_name, NOT_SPECIFIED);
    }

    #[test]
    fn patient_record_carries_labels_and_full_name() {
        let patient = Patient {
            national_id: "11222333-4".into(),
            first_name: "Ana".into(),
            last_name: "Reyes".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 12).expect("valid date"),
            gender: Gender::Female,
            blood_type: BloodType::AbNegative,
            email: "ana@example.com".into(),
            phone: "+56911112222".into(),
            address: "Av. Siempre Viva 123".into(),
            active: true,
        };
        let record = patient_record(7, &patient);
        assert_eq!(record.full_name, "Ana Reyes");
        assert_eq!(record.blood_type, "AB-");
        assert_eq!(record.blood_type_label, "AB Negative");
        assert_eq!(record.gender_label, "Female");
    }
}
