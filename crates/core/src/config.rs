//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into
//! services as a shared value. Environment variables are read only in
//! the binaries; nothing in this crate consults the environment during
//! request handling.

use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    data_file: Option<PathBuf>,
}

impl CoreConfig {
    /// Configuration persisting to a snapshot file at `data_file`.
    pub fn new(data_file: PathBuf) -> Self {
        Self {
            data_file: Some(data_file),
        }
    }

    /// Configuration for an unpersisted, in-memory store.
    pub fn ephemeral() -> Self {
        Self { data_file: None }
    }

    /// Snapshot location, or `None` for in-memory operation.
    pub fn data_file(&self) -> Option<&Path> {
        self.data_file.as_deref()
    }
}
