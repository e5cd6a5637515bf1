//! Explicit per-entity data-transfer structures.
//!
//! Grouped by entity family, mirroring the service layout in
//! `clinica-core`. Read models carry the derived display fields
//! (full names, enum labels); write models carry exactly the fields a
//! caller may set. Enum-typed fields travel as their declared codes and
//! are validated against the domain in the core, so a bad code comes
//! back as a structured validation error rather than a parse failure.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

mod care;
mod catalog;
mod coverage;
mod encounters;
mod registry;

pub use care::*;
pub use catalog::*;
pub use coverage::*;
pub use encounters::*;
pub use registry::*;

/// System-generated unique integer key shared by every entity.
pub type RecordId = i64;

/// Wire form of a typed failure.
///
/// `kind` is machine-readable (`validation`, `unique_conflict`,
/// `integrity_blocked`, `not_found`, `storage`); `message` is the
/// human-readable detail naming the entity and field involved.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub kind: String,
    pub message: String,
}

/// One row removed by a deletion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedRow {
    /// Entity type name, e.g. `"treatment"`.
    pub entity: String,
    pub id: RecordId,
}

/// One reference field cleared by a set-null deletion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClearedLink {
    /// Entity type whose reference was cleared.
    pub entity: String,
    pub id: RecordId,
    /// The reference field that now holds no value.
    pub field: String,
}

/// Outcome of a successful deletion, including its documented side
/// effects (cascaded rows, cleared references).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteRes {
    /// Every row removed, the requested one first.
    pub removed: Vec<DeletedRow>,
    /// Every reference cleared by set-null policies.
    pub cleared: Vec<ClearedLink>,
}
