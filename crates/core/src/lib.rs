//! # clinica core
//!
//! The clinical data model and integrity layer: entity definitions,
//! enumerated domains, the static relationship schema with its deletion
//! policies (protect / cascade / set-null), and the CRUD services that
//! enforce them inside single transactions over the in-process store.
//!
//! **No API concerns**: HTTP routing, OpenAPI documentation and the
//! admin console live in `api-rest` and `clinica-cli`; they call the
//! services here and add nothing but transport.

#![warn(rust_2018_idioms)]

pub mod config;
pub mod domain;
pub mod error;
pub mod integrity;
pub mod projection;
pub mod repositories;
pub mod schema;
pub mod store;
mod validation;

pub use config::CoreConfig;
pub use error::{ClinicError, ClinicResult};
pub use repositories::Services;
pub use schema::{DeletePolicy, EntityKind, Relationship, RELATIONSHIPS};
pub use store::{RecordId, Store};
