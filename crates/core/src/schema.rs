//! Statically declared entity schema.
//!
//! The clinical data model is fixed at compile time: the set of entity
//! types, and the referential relationships between them with their
//! deletion policies, live in the read-only tables below. Nothing is
//! registered or discovered at runtime; the integrity planner and the
//! services consume these tables directly.

/// The entity types the store manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Specialty,
    Patient,
    Doctor,
    InsurancePolicy,
    ScheduleSlot,
    Appointment,
    Consultation,
    Treatment,
    Medication,
    Prescription,
    HistoryEntry,
}

impl EntityKind {
    /// Stable lowercase name used in error messages and log fields.
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Specialty => "specialty",
            EntityKind::Patient => "patient",
            EntityKind::Doctor => "doctor",
            EntityKind::InsurancePolicy => "insurance policy",
            EntityKind::ScheduleSlot => "schedule slot",
            EntityKind::Appointment => "appointment",
            EntityKind::Consultation => "consultation",
            EntityKind::Treatment => "treatment",
            EntityKind::Medication => "medication",
            EntityKind::Prescription => "prescription",
            EntityKind::HistoryEntry => "clinical history entry",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What happens to dependent rows when their referenced row is deleted.
///
/// The policy is fixed per relationship in [`RELATIONSHIPS`]; it is never
/// inferred from the entities involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Deletion of the referenced row is refused while dependents exist.
    Protect,
    /// Deleting the referenced row deletes all dependents with it.
    Cascade,
    /// Deleting the referenced row clears the dependent's reference
    /// field; the dependent survives.
    SetNull,
}

/// One foreign-key relationship in the schema.
#[derive(Debug, Clone, Copy)]
pub struct Relationship {
    /// The entity holding the reference field.
    pub dependent: EntityKind,
    /// Name of the reference field on the dependent.
    pub field: &'static str,
    /// The entity being referenced.
    pub references: EntityKind,
    /// Deletion policy applied when the referenced row is deleted.
    pub on_delete: DeletePolicy,
}

/// Every foreign-key relationship in the data model.
///
/// The integrity planner walks this table inside the deleting
/// transaction; services use it only for documentation and tests.
pub const RELATIONSHIPS: &[Relationship] = &[
    Relationship {
        dependent: EntityKind::Doctor,
        field: "specialty_id",
        references: EntityKind::Specialty,
        on_delete: DeletePolicy::Protect,
    },
    Relationship {
        dependent: EntityKind::InsurancePolicy,
        field: "patient_id",
        references: EntityKind::Patient,
        on_delete: DeletePolicy::Cascade,
    },
    Relationship {
        dependent: EntityKind::ScheduleSlot,
        field: "doctor_id",
        references: EntityKind::Doctor,
        on_delete: DeletePolicy::Cascade,
    },
    Relationship {
        dependent: EntityKind::Appointment,
        field: "patient_id",
        references: EntityKind::Patient,
        on_delete: DeletePolicy::Protect,
    },
    Relationship {
        dependent: EntityKind::Appointment,
        field: "doctor_id",
        references: EntityKind::Doctor,
        on_delete: DeletePolicy::Protect,
    },
    Relationship {
        dependent: EntityKind::Appointment,
        field: "consultation_id",
        references: EntityKind::Consultation,
        on_delete: DeletePolicy::SetNull,
    },
    Relationship {
        dependent: EntityKind::Consultation,
        field: "patient_id",
        references: EntityKind::Patient,
        on_delete: DeletePolicy::Protect,
    },
    Relationship {
        dependent: EntityKind::Consultation,
        field: "doctor_id",
        references: EntityKind::Doctor,
        on_delete: DeletePolicy::Protect,
    },
    Relationship {
        dependent: EntityKind::Treatment,
        field: "consultation_id",
        references: EntityKind::Consultation,
        on_delete: DeletePolicy::Cascade,
    },
    Relationship {
        dependent: EntityKind::Prescription,
        field: "treatment_id",
        references: EntityKind::Treatment,
        on_delete: DeletePolicy::Cascade,
    },
    Relationship {
        dependent: EntityKind::Prescription,
        field: "medication_id",
        references: EntityKind::Medication,
        on_delete: DeletePolicy::Protect,
    },
    Relationship {
        dependent: EntityKind::HistoryEntry,
        field: "patient_id",
        references: EntityKind::Patient,
        on_delete: DeletePolicy::Cascade,
    },
    Relationship {
        dependent: EntityKind::HistoryEntry,
        field: "doctor_id",
        references: EntityKind::Doctor,
        on_delete: DeletePolicy::SetNull,
    },
];

/// All relationships whose referenced entity is `kind`.
pub fn referencing(kind: EntityKind) -> impl Iterator<Item = &'static Relationship> {
    RELATIONSHIPS.iter().filter(move |rel| rel.references == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entity_with_dependents_is_listed() {
        let referenced: Vec<EntityKind> = RELATIONSHIPS.iter().map(|r| r.references).collect();
        for kind in [
            EntityKind::Specialty,
            EntityKind::Patient,
            EntityKind::Doctor,
            EntityKind::Consultation,
            EntityKind::Treatment,
            EntityKind::Medication,
        ] {
            assert!(
                referenced.contains(&kind),
                "{kind} should be referenced by at least one relationship"
            );
        }
    }

    #[test]
    fn appointment_consultation_link_is_set_null() {
        let rel = RELATIONSHIPS
            .iter()
            .find(|r| r.dependent == EntityKind::Appointment && r.field == "consultation_id")
            .expect("link relationship declared");
        assert_eq!(rel.on_delete, DeletePolicy::SetNull);
        assert_eq!(rel.references, EntityKind::Consultation);
    }

    #[test]
    fn referencing_filters_by_target() {
        let onto_doctor: Vec<&Relationship> = referencing(EntityKind::Doctor).collect();
        assert_eq!(onto_doctor.len(), 4);
        assert!(onto_doctor.iter().all(|r| r.references == EntityKind::Doctor));
    }
}
