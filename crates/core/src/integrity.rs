//! Referential-integrity evaluation for deletions.
//!
//! Before any row is removed, [`check_delete`] evaluates every
//! relationship that targets the doomed row — and, transitively, every
//! row a cascade would remove — against the static policy table in
//! [`crate::schema`]. The result is tagged: either the deletion is
//! blocked (naming the blocking entity type) or a [`DeletePlan`] lists
//! each row to remove and each reference to clear. The plan is applied
//! inside the same transaction, so a cascade is all-or-nothing.

use api_shared::dto::{ClearedLink, DeleteRes, DeletedRow};

use crate::schema::{referencing, DeletePolicy, EntityKind, Relationship};
use crate::store::{Database, RecordId};

/// Everything a deletion will do, in deterministic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePlan {
    /// Rows to remove; the requested row first, cascade dependents in
    /// discovery order after it.
    pub deletions: Vec<(EntityKind, RecordId)>,
    /// Reference fields to clear under set-null policies.
    pub clears: Vec<(EntityKind, &'static str, RecordId)>,
}

/// Tagged result of the pre-delete check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteCheck {
    /// The deletion may proceed exactly as planned.
    Allowed(DeletePlan),
    /// A protect relationship has live dependents; nothing may be
    /// removed.
    Blocked {
        entity: EntityKind,
        blocked_by: EntityKind,
        dependents: usize,
    },
}

/// Ids of rows in `rel.dependent` whose `rel.field` references
/// `target`.
///
/// This is the per-relationship dependency probe: one arm per declared
/// relationship, scanning exactly one table.
fn dependent_ids(db: &Database, rel: &Relationship, target: RecordId) -> Vec<RecordId> {
    match (rel.dependent, rel.field) {
        (EntityKind::Doctor, "specialty_id") => db
            .doctors
            .iter()
            .filter(|(_, row)| row.specialty_id == target)
            .map(|(id, _)| id)
            .collect(),
        (EntityKind::InsurancePolicy, "patient_id") => db
            .insurance_policies
            .iter()
            .filter(|(_, row)| row.patient_id == target)
            .map(|(id, _)| id)
            .collect(),
        (EntityKind::ScheduleSlot, "doctor_id") => db
            .schedule_slots
            .iter()
            .filter(|(_, row)| row.doctor_id == target)
            .map(|(id, _)| id)
            .collect(),
        (EntityKind::Appointment, "patient_id") => db
            .appointments
            .iter()
            .filter(|(_, row)| row.patient_id == target)
            .map(|(id, _)| id)
            .collect(),
        (EntityKind::Appointment, "doctor_id") => db
            .appointments
            .iter()
            .filter(|(_, row)| row.doctor_id == target)
            .map(|(id, _)| id)
            .collect(),
        (EntityKind::Appointment, "consultation_id") => db
            .appointments
            .iter()
            .filter(|(_, row)| row.consultation_id == Some(target))
            .map(|(id, _)| id)
            .collect(),
        (EntityKind::Consultation, "patient_id") => db
            .consultations
            .iter()
            .filter(|(_, row)| row.patient_id == target)
            .map(|(id, _)| id)
            .collect(),
        (EntityKind::Consultation, "doctor_id") => db
            .consultations
            .iter()
            .filter(|(_, row)| row.doctor_id == target)
            .map(|(id, _)| id)
            .collect(),
        (EntityKind::Treatment, "consultation_id") => db
            .treatments
            .iter()
            .filter(|(_, row)| row.consultation_id == target)
            .map(|(id, _)| id)
            .collect(),
        (EntityKind::Prescription, "treatment_id") => db
            .prescriptions
            .iter()
            .filter(|(_, row)| row.treatment_id == target)
            .map(|(id, _)| id)
            .collect(),
        (EntityKind::Prescription, "medication_id") => db
            .prescriptions
            .iter()
            .filter(|(_, row)| row.medication_id == target)
            .map(|(id, _)| id)
            .collect(),
        (EntityKind::HistoryEntry, "patient_id") => db
            .history_entries
            .iter()
            .filter(|(_, row)| row.patient_id == target)
            .map(|(id, _)| id)
            .collect(),
        (EntityKind::HistoryEntry, "doctor_id") => db
            .history_entries
            .iter()
            .filter(|(_, row)| row.doctor_id == Some(target))
            .map(|(id, _)| id)
            .collect(),
        (dependent, field) => {
            tracing::warn!(%dependent, field, "relationship has no dependency probe");
            Vec::new()
        }
    }
}

/// Evaluates the deletion of `(kind, id)` against the schema.
///
/// First the cascade closure is expanded (dependents of dependents,
/// breadth-first); then every protect relationship targeting any member
/// of the closure is checked; finally the set-null clears are
/// collected. No row is touched here — the caller applies the returned
/// plan with [`apply_plan`].
pub fn check_delete(db: &Database, kind: EntityKind, id: RecordId) -> DeleteCheck {
    let mut deletions: Vec<(EntityKind, RecordId)> = vec![(kind, id)];
    let mut cursor = 0;

    // Cascade closure, breadth-first in schema order.
    while cursor < deletions.len() {
        let (member_kind, member_id) = deletions[cursor];
        cursor += 1;
        for rel in referencing(member_kind) {
            if rel.on_delete != DeletePolicy::Cascade {
                continue;
            }
            for dependent in dependent_ids(db, rel, member_id) {
                let entry = (rel.dependent, dependent);
                if !deletions.contains(&entry) {
                    deletions.push(entry);
                }
            }
        }
    }

    // Protect check over the whole closure: a dependent that is itself
    // scheduled for deletion does not block.
    for &(member_kind, member_id) in &deletions {
        for rel in referencing(member_kind) {
            if rel.on_delete != DeletePolicy::Protect {
                continue;
            }
            let blocking: Vec<RecordId> = dependent_ids(db, rel, member_id)
                .into_iter()
                .filter(|dep| !deletions.contains(&(rel.dependent, *dep)))
                .collect();
            if !blocking.is_empty() {
                return DeleteCheck::Blocked {
                    entity: member_kind,
                    blocked_by: rel.dependent,
                    dependents: blocking.len(),
                };
            }
        }
    }

    // Set-null clears for survivors.
    let mut clears = Vec::new();
    for &(member_kind, member_id) in &deletions {
        for rel in referencing(member_kind) {
            if rel.on_delete != DeletePolicy::SetNull {
                continue;
            }
            for dependent in dependent_ids(db, rel, member_id) {
                if !deletions.contains(&(rel.dependent, dependent)) {
                    clears.push((rel.dependent, rel.field, dependent));
                }
            }
        }
    }

    DeleteCheck::Allowed(DeletePlan { deletions, clears })
}

/// Applies a plan produced by [`check_delete`] to the same database.
///
/// Clears run before removals so a cleared row is never also a removed
/// one; the returned [`DeleteRes`] reports both lists for the caller.
pub fn apply_plan(db: &mut Database, plan: &DeletePlan) -> DeleteRes {
    for &(entity, field, id) in &plan.clears {
        match (entity, field) {
            (EntityKind::Appointment, "consultation_id") => {
                if let Some(row) = db.appointments.get_mut(id) {
                    row.consultation_id = None;
                }
            }
            (EntityKind::HistoryEntry, "doctor_id") => {
                if let Some(row) = db.history_entries.get_mut(id) {
                    row.doctor_id = None;
                }
            }
            (entity, field) => {
                tracing::warn!(%entity, field, "set-null clear has no applier");
            }
        }
    }

    for &(entity, id) in &plan.deletions {
        match entity {
            EntityKind::Specialty => {
                db.specialties.remove(id);
            }
            EntityKind::Patient => {
                db.patients.remove(id);
            }
            EntityKind::Doctor => {
                db.doctors.remove(id);
            }
            EntityKind::InsurancePolicy => {
                db.insurance_policies.remove(id);
            }
            EntityKind::ScheduleSlot => {
                db.schedule_slots.remove(id);
            }
            EntityKind::Appointment => {
                db.appointments.remove(id);
            }
            EntityKind::Consultation => {
                db.consultations.remove(id);
            }
            EntityKind::Treatment => {
                db.treatments.remove(id);
            }
            EntityKind::Medication => {
                db.medications.remove(id);
            }
            EntityKind::Prescription => {
                db.prescriptions.remove(id);
            }
            EntityKind::HistoryEntry => {
                db.history_entries.remove(id);
            }
        }
    }

    DeleteRes {
        removed: plan
            .deletions
            .iter()
            .map(|&(entity, id)| DeletedRow {
                entity: entity.name().to_owned(),
                id,
            })
            .collect(),
        cleared: plan
            .clears
            .iter()
            .map(|&(entity, field, id)| ClearedLink {
                entity: entity.name().to_owned(),
                id,
                field: field.to_owned(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::*;
    use crate::domain::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use clinica_types::{CoveragePercent, Money};

    fn specialty(name: &str) -> Specialty {
        Specialty {
            name: name.into(),
            description: None,
        }
    }

    fn patient(national_id: &str) -> Patient {
        Patient {
            national_id: national_id.into(),
            first_name: "Ana".into(),
            last_name: "Reyes".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 12).expect("valid date"),
            gender: Gender::Female,
            blood_type: BloodType::OPositive,
            email: format!("{national_id}@example.com"),
            phone: "+56911112222".into(),
            address: "Av. Siempre Viva 123".into(),
            active: true,
        }
    }

    fn doctor(specialty_id: RecordId) -> Doctor {
        Doctor {
            national_id: "22333444-5".into(),
            first_name: "Luis".into(),
            last_name: "Soto".into(),
            gender: Gender::Male,
            email: "luis.soto@example.com".into(),
            phone: "+56955556666".into(),
            active: true,
            specialty_id,
        }
    }

    fn consultation(patient_id: RecordId, doctor_id: RecordId) -> Consultation {
        Consultation {
            patient_id,
            doctor_id,
            occurred_at: Utc::now(),
            reason: "Chest pain".into(),
            diagnosis: None,
            status: ConsultationStatus::Pending,
            priority: Priority::Normal,
        }
    }

    #[test]
    fn specialty_with_doctors_is_blocked() {
        let mut db = Database::default();
        let specialty_id = db.specialties.insert(specialty("Cardiology"));
        db.doctors.insert(doctor(specialty_id));

        let check = check_delete(&db, EntityKind::Specialty, specialty_id);
        match check {
            DeleteCheck::Blocked {
                entity,
                blocked_by,
                dependents,
            } => {
                assert_eq!(entity, EntityKind::Specialty);
                assert_eq!(blocked_by, EntityKind::Doctor);
                assert_eq!(dependents, 1);
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn specialty_deletable_after_doctor_is_gone() {
        let mut db = Database::default();
        let specialty_id = db.specialties.insert(specialty("Cardiology"));
        let doctor_id = db.doctors.insert(doctor(specialty_id));

        db.doctors.remove(doctor_id);
        let check = check_delete(&db, EntityKind::Specialty, specialty_id);
        let plan = match check {
            DeleteCheck::Allowed(plan) => plan,
            other => panic!("expected Allowed, got {other:?}"),
        };
        apply_plan(&mut db, &plan);
        assert!(db.specialties.is_empty());
    }

    #[test]
    fn consultation_cascade_reaches_prescriptions() {
        let mut db = Database::default();
        let specialty_id = db.specialties.insert(specialty("Cardiology"));
        let patient_id = db.patients.insert(patient("11222333-4"));
        let doctor_id = db.doctors.insert(doctor(specialty_id));
        let consultation_id = db.consultations.insert(consultation(patient_id, doctor_id));
        let medication_id = db.medications.insert(Medication {
            name: "Aspirin 100mg".into(),
            laboratory: "Andina".into(),
            category: MedicationCategory::Analgesic,
            stock: 100,
            unit_price: Money::parse("990").expect("valid price"),
        });
        let treatment_id = db.treatments.insert(Treatment {
            consultation_id,
            description: "Daily aspirin".into(),
            duration_days: 30,
            observations: None,
        });
        db.prescriptions.insert(Prescription {
            treatment_id,
            medication_id,
            dosage: "100mg".into(),
            frequency: "Once daily".into(),
            duration: "30 days".into(),
            route: AdministrationRoute::Oral,
        });

        let plan = match check_delete(&db, EntityKind::Consultation, consultation_id) {
            DeleteCheck::Allowed(plan) => plan,
            other => panic!("expected Allowed, got {other:?}"),
        };
        let outcome = apply_plan(&mut db, &plan);

        assert!(db.consultations.is_empty());
        assert!(db.treatments.is_empty());
        assert!(db.prescriptions.is_empty());
        // The medication survives; only the prescription line goes.
        assert_eq!(db.medications.len(), 1);
        assert_eq!(outcome.removed.len(), 3);
    }

    #[test]
    fn deleting_consultation_clears_appointment_link() {
        let mut db = Database::default();
        let specialty_id = db.specialties.insert(specialty("Cardiology"));
        let patient_id = db.patients.insert(patient("11222333-4"));
        let doctor_id = db.doctors.insert(doctor(specialty_id));
        let consultation_id = db.consultations.insert(consultation(patient_id, doctor_id));
        let appointment_id = db.appointments.insert(Appointment {
            patient_id,
            doctor_id,
            scheduled_at: Utc::now(),
            reason: "Follow-up".into(),
            status: AppointmentStatus::Completed,
            notes: None,
            created_at: Utc::now(),
            consultation_id: Some(consultation_id),
        });

        let plan = match check_delete(&db, EntityKind::Consultation, consultation_id) {
            DeleteCheck::Allowed(plan) => plan,
            other => panic!("expected Allowed, got {other:?}"),
        };
        let outcome = apply_plan(&mut db, &plan);

        assert!(db.consultations.is_empty());
        let appointment = db.appointments.get(appointment_id).expect("appointment kept");
        assert!(appointment.consultation_id.is_none());
        assert_eq!(outcome.cleared.len(), 1);
        assert_eq!(outcome.cleared[0].field, "consultation_id");
    }

    #[test]
    fn patient_with_appointments_is_blocked_but_cascades_otherwise() {
        let mut db = Database::default();
        let specialty_id = db.specialties.insert(specialty("Cardiology"));
        let patient_id = db.patients.insert(patient("11222333-4"));
        let doctor_id = db.doctors.insert(doctor(specialty_id));
        db.insurance_policies.insert(InsurancePolicy {
            policy_number: "POL-1".into(),
            insurer_name: "Vital Care".into(),
            coverage_tier: CoverageTier::Standard,
            coverage_percent: CoveragePercent::parse("80").expect("valid percent"),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            expiry_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            active: true,
            patient_id,
        });
        let appointment_id = db.appointments.insert(Appointment {
            patient_id,
            doctor_id,
            scheduled_at: Utc::now(),
            reason: "Check-up".into(),
            status: AppointmentStatus::Scheduled,
            notes: None,
            created_at: Utc::now(),
            consultation_id: None,
        });

        match check_delete(&db, EntityKind::Patient, patient_id) {
            DeleteCheck::Blocked { blocked_by, .. } => {
                assert_eq!(blocked_by, EntityKind::Appointment)
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
        // Both rows intact after the refusal.
        assert!(db.patients.contains(patient_id));
        assert!(db.appointments.contains(appointment_id));

        db.appointments.remove(appointment_id);
        let plan = match check_delete(&db, EntityKind::Patient, patient_id) {
            DeleteCheck::Allowed(plan) => plan,
            other => panic!("expected Allowed, got {other:?}"),
        };
        apply_plan(&mut db, &plan);
        assert!(db.patients.is_empty());
        assert!(db.insurance_policies.is_empty());
    }

    #[test]
    fn deleting_doctor_clears_history_reference_but_keeps_entry() {
        let mut db = Database::default();
        let specialty_id = db.specialties.insert(specialty("Cardiology"));
        let patient_id = db.patients.insert(patient("11222333-4"));
        let doctor_id = db.doctors.insert(doctor(specialty_id));
        let entry_id = db.history_entries.insert(HistoryEntry {
            patient_id,
            registered_on: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
            entry_type: "allergy".into(),
            description: "Penicillin".into(),
            related_medications: None,
            doctor_id: Some(doctor_id),
        });
        db.schedule_slots.insert(ScheduleSlot {
            doctor_id,
            weekday: Weekday::Monday,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(13, 0, 0).expect("valid time"),
            slot_minutes: 20,
            active: true,
        });

        let plan = match check_delete(&db, EntityKind::Doctor, doctor_id) {
            DeleteCheck::Allowed(plan) => plan,
            other => panic!("expected Allowed, got {other:?}"),
        };
        apply_plan(&mut db, &plan);

        assert!(db.doctors.is_empty());
        assert!(db.schedule_slots.is_empty());
        let entry = db.history_entries.get(entry_id).expect("entry kept");
        assert!(entry.doctor_id.is_none());
    }
}
