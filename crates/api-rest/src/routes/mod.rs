//! Route modules, one per entity family, mirroring the service layout
//! in `clinica-core`.

pub(crate) mod care;
pub(crate) mod catalog;
pub(crate) mod coverage;
pub(crate) mod encounters;
pub(crate) mod registry;
