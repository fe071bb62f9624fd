//! A roster loaded from a profile's database.

use crate::error::Result;
use crate::output::Names;
use roster_domain::traits::RosterStore;
use roster_domain::{DeletePolicy, Snapshot, SystemClock};
use roster_graph::Roster;
use roster_store::SqliteStore;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// In-memory roster paired with the store it was loaded from.
///
/// The whole graph is read once in [`Session::open`] and written back by
/// [`Session::close`] when it differs from what was loaded.
pub struct Session {
    roster: Roster,
    store: SqliteStore,
    loaded: Snapshot,
    policy: DeletePolicy,
    database: PathBuf,
}

impl Session {
    /// Open (creating if needed) the database at `database`.
    pub fn open(database: &Path, policy: DeletePolicy) -> Result<Self> {
        if let Some(parent) = database.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = SqliteStore::new(database)?;
        let loaded = store.load_all()?;
        let roster = Roster::from_snapshot(loaded.clone(), Arc::new(SystemClock))?;
        tracing::info!(
            database = %database.display(),
            employees = roster.employee_count(),
            edges = roster.edge_count(),
            "roster loaded"
        );

        Ok(Self {
            roster,
            store,
            loaded,
            policy,
            database: database.to_path_buf(),
        })
    }

    /// The live roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Delete policy configured for this session's profile.
    pub fn policy(&self) -> DeletePolicy {
        self.policy
    }

    /// Database path backing this session.
    pub fn database(&self) -> &Path {
        &self.database
    }

    /// Whether the roster differs from what is stored.
    pub fn is_dirty(&self) -> bool {
        self.roster.snapshot() != self.loaded
    }

    /// Employee names keyed by id, for labelling output.
    pub fn names(&self) -> Names {
        self.roster
            .employees()
            .into_iter()
            .map(|e| (e.id, e.name))
            .collect()
    }

    /// Write the roster back if it changed. Returns whether anything was saved.
    pub fn save(&mut self) -> Result<bool> {
        let snapshot = self.roster.snapshot();
        if snapshot == self.loaded {
            tracing::debug!("roster unchanged, nothing to save");
            return Ok(false);
        }

        self.store.save_snapshot(&snapshot)?;
        tracing::info!(
            database = %self.database.display(),
            employees = snapshot.employees.len(),
            edges = snapshot.permanent.len() + snapshot.temporary.len(),
            "roster saved"
        );
        self.loaded = snapshot;
        Ok(true)
    }

    /// Save and release the store.
    pub fn close(mut self) -> Result<()> {
        self.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("roster.db");

        let session = Session::open(&path, DeletePolicy::Reject).unwrap();
        assert!(!session.is_dirty());
        session.roster().create_employee("Dilbert").unwrap();
        assert!(session.is_dirty());
        session.close().unwrap();

        let session = Session::open(&path, DeletePolicy::Reject).unwrap();
        assert_eq!(session.roster().employee_count(), 1);
        assert_eq!(session.names().values().next().unwrap(), "Dilbert");
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_save_skips_unchanged_roster() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.db");

        let mut session = Session::open(&path, DeletePolicy::Cascade).unwrap();
        assert!(!session.save().unwrap());
        session.roster().create_employee("Wally").unwrap();
        assert!(session.save().unwrap());
        assert!(!session.save().unwrap());
        assert_eq!(session.policy(), DeletePolicy::Cascade);
    }
}
