//! Field validation helpers.
//!
//! Shared by the entity modules: every helper returns a
//! [`ClinicError::Validation`] naming the entity and field, so callers
//! can surface actionable failures without building messages themselves.
//! Length ceilings are checked here; enum membership goes through
//! [`coded`] / [`weekday`]; referential checks live in the services
//! because they need the store.

use crate::domain::enums::{CodedEnum, Weekday};
use crate::error::{ClinicError, ClinicResult};
use crate::schema::EntityKind;
use clinica_types::NonEmptyText;

fn invalid(entity: EntityKind, field: &'static str, message: impl Into<String>) -> ClinicError {
    ClinicError::Validation {
        entity,
        field,
        message: message.into(),
    }
}

/// Validates a required text field: non-blank after trimming, at most
/// `max` bytes. Returns the trimmed value.
pub fn required_text(
    entity: EntityKind,
    field: &'static str,
    value: &str,
    max: usize,
) -> ClinicResult<String> {
    let text = NonEmptyText::new(value).map_err(|e| invalid(entity, field, e.to_string()))?;
    if text.len() > max {
        return Err(invalid(
            entity,
            field,
            format!("exceeds maximum length of {max} characters"),
        ));
    }
    Ok(text.into_string())
}

/// Validates an optional text field. Blank input is normalized to
/// `None`; present input is trimmed and length-checked.
pub fn optional_text(
    entity: EntityKind,
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> ClinicResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(raw) => match NonEmptyText::new(raw) {
            Err(_) => Ok(None),
            Ok(text) => {
                if text.len() > max {
                    return Err(invalid(
                        entity,
                        field,
                        format!("exceeds maximum length of {max} characters"),
                    ));
                }
                Ok(Some(text.into_string()))
            }
        },
    }
}

/// Validates membership of a string-coded enum domain.
pub fn coded<E: CodedEnum>(
    entity: EntityKind,
    field: &'static str,
    code: &str,
) -> ClinicResult<E> {
    E::from_code(code).ok_or_else(|| {
        let declared: Vec<&str> = E::all().iter().map(|v| v.code()).collect();
        invalid(
            entity,
            field,
            format!("'{code}' is not one of: {}", declared.join(", ")),
        )
    })
}

/// Validates a numeric day-of-week code (Monday = 1 .. Sunday = 7).
pub fn weekday(entity: EntityKind, field: &'static str, code: u8) -> ClinicResult<Weekday> {
    Weekday::from_code(code).ok_or_else(|| {
        invalid(
            entity,
            field,
            format!("day of week must be 1 (Monday) through 7 (Sunday), got {code}"),
        )
    })
}

/// Validates a strictly positive integer field.
pub fn positive(entity: EntityKind, field: &'static str, value: i64) -> ClinicResult<()> {
    if value <= 0 {
        return Err(invalid(entity, field, "must be greater than zero"));
    }
    Ok(())
}

/// Validates a non-negative integer field.
pub fn non_negative(entity: EntityKind, field: &'static str, value: i64) -> ClinicResult<()> {
    if value < 0 {
        return Err(invalid(entity, field, "cannot be negative"));
    }
    Ok(())
}

/// Validates that an end bound is strictly after its start bound.
/// Used for schedule times and insurance date ranges.
pub fn ordered<T: PartialOrd + std::fmt::Display>(
    entity: EntityKind,
    field: &'static str,
    start: T,
    end: T,
) -> ClinicResult<()> {
    if end <= start {
        return Err(invalid(
            entity,
            field,
            format!("must be after the start value ({start})"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::BloodType;

    #[test]
    fn required_text_trims_and_bounds() {
        let value = required_text(EntityKind::Specialty, "name", "  Cardiology ", 100)
            .expect("valid name");
        assert_eq!(value, "Cardiology");

        let err = required_text(EntityKind::Specialty, "name", &"x".repeat(101), 100)
            .expect_err("over the ceiling");
        match err {
            ClinicError::Validation { entity, field, .. } => {
                assert_eq!(entity, EntityKind::Specialty);
                assert_eq!(field, "name");
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn optional_text_normalizes_blank_to_none() {
        let value = optional_text(EntityKind::Specialty, "description", Some("   "), 255)
            .expect("blank is fine");
        assert!(value.is_none());
    }

    #[test]
    fn coded_names_the_declared_set() {
        let err = coded::<BloodType>(EntityKind::Patient, "blood_type", "Z+")
            .expect_err("unknown code");
        match err {
            ClinicError::Validation { message, .. } => {
                assert!(message.contains("A+"));
                assert!(message.contains("O-"));
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn ordered_rejects_reversed_bounds() {
        assert!(ordered(EntityKind::ScheduleSlot, "end_time", 2, 1).is_err());
        assert!(ordered(EntityKind::ScheduleSlot, "end_time", 1, 2).is_ok());
    }
}
