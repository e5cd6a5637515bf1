//! Cross-service checks that need the surrounding tables.

use api_shared::dto::DeleteRes;

use crate::error::{ClinicError, ClinicResult};
use crate::integrity::{self, DeleteCheck};
use crate::schema::EntityKind;
use crate::store::{Database, RecordId};

/// Does a row of `kind` with this id exist?
pub(crate) fn exists(db: &Database, kind: EntityKind, id: RecordId) -> bool {
    match kind {
        EntityKind::Specialty => db.specialties.contains(id),
        EntityKind::Patient => db.patients.contains(id),
        EntityKind::Doctor => db.doctors.contains(id),
        EntityKind::InsurancePolicy => db.insurance_policies.contains(id),
        EntityKind::ScheduleSlot => db.schedule_slots.contains(id),
        EntityKind::Appointment => db.appointments.contains(id),
        EntityKind::Consultation => db.consultations.contains(id),
        EntityKind::Treatment => db.treatments.contains(id),
        EntityKind::Medication => db.medications.contains(id),
        EntityKind::Prescription => db.prescriptions.contains(id),
        EntityKind::HistoryEntry => db.history_entries.contains(id),
    }
}

/// Fails with `NotFound` unless the referenced row exists. Used for
/// foreign keys on create/replace/update.
pub(crate) fn require(db: &Database, kind: EntityKind, id: RecordId) -> ClinicResult<()> {
    if exists(db, kind, id) {
        Ok(())
    } else {
        Err(ClinicError::NotFound { entity: kind, id })
    }
}

/// Enforces a unique text constraint by scanning the existing values.
///
/// `exclude` skips the row being replaced/updated so it does not
/// conflict with itself.
pub(crate) fn unique<'a>(
    entity: EntityKind,
    field: &'static str,
    value: &str,
    existing: impl Iterator<Item = (RecordId, &'a str)>,
    exclude: Option<RecordId>,
) -> ClinicResult<()> {
    for (id, other) in existing {
        if Some(id) == exclude {
            continue;
        }
        if other == value {
            return Err(ClinicError::UniqueConflict {
                entity,
                field,
                value: value.to_owned(),
            });
        }
    }
    Ok(())
}

/// The strict one-to-one side of the appointment–consultation link:
/// at most one appointment may reference a given consultation.
pub(crate) fn consultation_link_free(
    db: &Database,
    consultation_id: RecordId,
    exclude_appointment: Option<RecordId>,
) -> ClinicResult<()> {
    for (id, appointment) in db.appointments.iter() {
        if Some(id) == exclude_appointment {
            continue;
        }
        if appointment.consultation_id == Some(consultation_id) {
            return Err(ClinicError::UniqueConflict {
                entity: EntityKind::Appointment,
                field: "consultation_id",
                value: consultation_id.to_string(),
            });
        }
    }
    Ok(())
}

/// Deletes `(kind, id)` after the pre-delete integrity check, applying
/// any cascade/set-null plan inside the caller's transaction.
pub(crate) fn delete(db: &mut Database, kind: EntityKind, id: RecordId) -> ClinicResult<DeleteRes> {
    require(db, kind, id)?;
    match integrity::check_delete(db, kind, id) {
        DeleteCheck::Blocked {
            entity,
            blocked_by,
            dependents,
        } => Err(ClinicError::IntegrityBlocked {
            entity,
            blocked_by,
            dependents,
        }),
        DeleteCheck::Allowed(plan) => {
            let outcome = integrity::apply_plan(db, &plan);
            tracing::info!(
                entity = %kind,
                id,
                removed = outcome.removed.len(),
                cleared = outcome.cleared.len(),
                "deleted record"
            );
            Ok(outcome)
        }
    }
}

/// Case-insensitive substring match for list filters.
pub(crate) fn matches(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
