use crate::schema::EntityKind;

/// Failure taxonomy for the clinical data layer.
///
/// The first four variants are the caller-facing categories; each carries
/// enough detail (entity type, field or relationship name) to act on.
/// `Snapshot` and `Serialization` surface failures of the persistence
/// collaborator. Nothing here is retried or swallowed.
#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    /// A field value was malformed, out of its declared domain, or missing.
    #[error("invalid {entity} {field}: {message}")]
    Validation {
        entity: EntityKind,
        field: &'static str,
        message: String,
    },

    /// A write would duplicate a value on a unique-constrained field.
    #[error("{entity} with {field} '{value}' already exists")]
    UniqueConflict {
        entity: EntityKind,
        field: &'static str,
        value: String,
    },

    /// A deletion was refused because a protect relationship has live
    /// dependents. Names the blocking entity type, not a generic failure.
    #[error("cannot delete {entity}: {dependents} dependent {blocked_by} record(s) exist")]
    IntegrityBlocked {
        entity: EntityKind,
        blocked_by: EntityKind,
        dependents: usize,
    },

    /// The operation targeted a key that does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: crate::store::RecordId },

    /// The snapshot file could not be read or written.
    #[error("failed to access snapshot file: {0}")]
    Snapshot(#[from] std::io::Error),

    /// The snapshot contents could not be encoded or decoded.
    #[error("failed to encode/decode snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
