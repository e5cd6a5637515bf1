//! In-process relational store.
//!
//! One [`Table`] per entity, all held in a single [`Database`] value
//! behind a `RwLock`. Every mutating operation runs as one transaction:
//! the database is cloned, the mutation is applied to the clone, the
//! clone is persisted as a JSON snapshot, and only then is it swapped
//! in. A failure at any point leaves both the in-memory state and the
//! snapshot untouched, which is what makes multi-row deletions
//! (cascades plus set-null clears) all-or-nothing.
//!
//! Concurrent requests serialize on the lock. There is no versioning or
//! optimistic-concurrency check: two racing updates to the same record
//! follow last-write-wins.

mod snapshot;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::config::CoreConfig;
use crate::domain::{
    Appointment, Consultation, Doctor, HistoryEntry, InsurancePolicy, Medication, Patient,
    Prescription, ScheduleSlot, Specialty, Treatment,
};
use crate::error::ClinicResult;

/// System-generated unique integer key shared by every entity.
pub type RecordId = api_shared::dto::RecordId;

/// One entity's rows, keyed by id, plus the id allocator.
///
/// Ids are monotonic and never reused, even after deletions, because
/// `next_id` is persisted with the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table<T> {
    rows: BTreeMap<RecordId, T>,
    next_id: RecordId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    /// Stores `row` under a freshly allocated id and returns the id.
    pub fn insert(&mut self, row: T) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, row);
        id
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        self.rows.remove(&id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.rows.contains_key(&id)
    }

    /// Rows in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &T)> {
        self.rows.iter().map(|(id, row)| (*id, row))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (RecordId, &mut T)> {
        self.rows.iter_mut().map(|(id, row)| (*id, row))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The full relational state: one table per entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Database {
    pub specialties: Table<Specialty>,
    pub patients: Table<Patient>,
    pub doctors: Table<Doctor>,
    pub insurance_policies: Table<InsurancePolicy>,
    pub schedule_slots: Table<ScheduleSlot>,
    pub appointments: Table<Appointment>,
    pub consultations: Table<Consultation>,
    pub treatments: Table<Treatment>,
    pub medications: Table<Medication>,
    pub prescriptions: Table<Prescription>,
    pub history_entries: Table<HistoryEntry>,
}

/// Shared handle to the database plus its snapshot location.
pub struct Store {
    inner: RwLock<Database>,
    snapshot_path: Option<PathBuf>,
}

impl Store {
    /// Opens the store described by `cfg`, loading an existing snapshot
    /// if one is present at the configured path.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::Snapshot` / `ClinicError::Serialization` if
    /// the snapshot file exists but cannot be read or decoded.
    pub fn open(cfg: &CoreConfig) -> ClinicResult<Self> {
        let database = match cfg.data_file() {
            Some(path) if path.exists() => {
                let db = snapshot::load(path)?;
                tracing::info!(path = %path.display(), "loaded snapshot");
                db
            }
            Some(path) => {
                tracing::info!(path = %path.display(), "no snapshot yet, starting empty");
                Database::default()
            }
            None => Database::default(),
        };
        Ok(Self {
            inner: RwLock::new(database),
            snapshot_path: cfg.data_file().map(|p| p.to_path_buf()),
        })
    }

    /// An unpersisted store starting from an empty database.
    pub fn in_memory() -> Self {
        Self {
            inner: RwLock::new(Database::default()),
            snapshot_path: None,
        }
    }

    /// Runs a read-only closure against the current database.
    pub fn read<R>(&self, f: impl FnOnce(&Database) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    /// Runs `f` as one transaction.
    ///
    /// The closure receives a copy of the database. If it returns `Ok`
    /// the copy is persisted (when a snapshot path is configured) and
    /// swapped in; on any error the original state stays in place, so a
    /// partially applied mutation can never become visible.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Database) -> ClinicResult<R>) -> ClinicResult<R> {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let mut copy = guard.clone();
        let result = f(&mut copy)?;
        if let Some(path) = &self.snapshot_path {
            snapshot::save(path, &copy)?;
        }
        *guard = copy;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClinicError;
    use crate::schema::EntityKind;

    #[test]
    fn table_ids_are_never_reused() {
        let mut table = Table::default();
        let first = table.insert(Specialty {
            name: "Cardiology".into(),
            description: None,
        });
        table.remove(first);
        let second = table.insert(Specialty {
            name: "Neurology".into(),
            description: None,
        });
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn store_reopens_from_its_snapshot() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = crate::config::CoreConfig::new(dir.path().join("clinic.json"));

        let store = Store::open(&cfg).expect("open empty store");
        store
            .mutate(|db| {
                db.specialties.insert(Specialty {
                    name: "Cardiology".into(),
                    description: None,
                });
                Ok(())
            })
            .expect("persist one row");
        drop(store);

        let reopened = Store::open(&cfg).expect("reopen from snapshot");
        reopened.read(|db| {
            assert_eq!(db.specialties.len(), 1);
            // The id allocator is persisted too, so new ids continue
            // after the highest ever issued.
            assert_eq!(db.specialties.iter().next().map(|(id, _)| id), Some(1));
        });
        reopened
            .mutate(|db| {
                let id = db.specialties.insert(Specialty {
                    name: "Neurology".into(),
                    description: None,
                });
                assert_eq!(id, 2);
                Ok(())
            })
            .expect("insert after reopen");
    }

    #[test]
    fn failed_mutation_leaves_state_untouched() {
        let store = Store::in_memory();
        store
            .mutate(|db| {
                db.specialties.insert(Specialty {
                    name: "Cardiology".into(),
                    description: None,
                });
                Ok(())
            })
            .expect("first mutation succeeds");

        let err = store
            .mutate::<()>(|db| {
                db.specialties.insert(Specialty {
                    name: "Ghost".into(),
                    description: None,
                });
                Err(ClinicError::NotFound {
                    entity: EntityKind::Specialty,
                    id: 99,
                })
            })
            .expect_err("second mutation fails");
        assert!(matches!(err, ClinicError::NotFound { .. }));

        store.read(|db| {
            assert_eq!(db.specialties.len(), 1);
            assert!(db.specialties.iter().all(|(_, s)| s.name == "Cardiology"));
        });
    }
}
