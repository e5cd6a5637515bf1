//! JSON snapshot persistence for the store.
//!
//! The whole database serializes to one JSON document. Saves go through
//! a sibling temp file followed by a rename, so a crash mid-write leaves
//! the previous snapshot intact.

use std::fs;
use std::path::Path;

use super::Database;
use crate::error::ClinicResult;

/// Loads a snapshot from `path`.
pub fn load(path: &Path) -> ClinicResult<Database> {
    let contents = fs::read_to_string(path)?;
    let database = serde_json::from_str(&contents)?;
    Ok(database)
}

/// Persists `database` to `path` atomically.
pub fn save(path: &Path, database: &Database) -> ClinicResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let serialized = serde_json::to_string_pretty(database)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serialized)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Specialty;

    #[test]
    fn snapshot_round_trips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("clinic.json");

        let mut database = Database::default();
        database.specialties.insert(Specialty {
            name: "Cardiology".into(),
            description: Some("Heart and vessels".into()),
        });

        save(&path, &database).expect("save snapshot");
        let loaded = load(&path).expect("load snapshot");

        assert_eq!(loaded.specialties.len(), 1);
        let (id, specialty) = loaded.specialties.iter().next().expect("one row");
        assert_eq!(id, 1);
        assert_eq!(specialty.name, "Cardiology");
    }

    #[test]
    fn load_rejects_corrupt_contents() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("clinic.json");
        std::fs::write(&path, "{ not json").expect("write file");

        let err = load(&path).expect_err("corrupt snapshot");
        assert!(matches!(err, crate::error::ClinicError::Serialization(_)));
    }
}
