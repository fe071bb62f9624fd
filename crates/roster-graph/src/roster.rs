//! The roster object: registry, relationships and queries behind one lock

use crate::error::{RosterError, RosterResult};
use crate::query::{self, Hierarchy};
use crate::registry::Registry;
use crate::relationships::Relationships;
use roster_domain::{
    Clock, DeletePolicy, Edge, EdgeFilter, EdgeKey, Employee, EmployeeId,
    PermanentRelationship, Snapshot, SystemClock, TemporaryRelationship, Timestamp,
};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct State {
    registry: Registry,
    relationships: Relationships,
}

/// An employee reporting graph
///
/// All state sits behind a single `RwLock`: reads run concurrently, and
/// each mutation holds the write lock while it validates and then updates
/// the primary edge map and both indices. No reader ever sees one index
/// updated without the other.
///
/// # Examples
///
/// ```
/// use roster_domain::{days, EdgeFilter, FixedClock};
/// use roster_graph::Roster;
/// use std::sync::Arc;
///
/// let roster = Roster::with_clock(Arc::new(FixedClock::new(0)));
/// let dilbert = roster.create_employee("Dilbert").unwrap();
/// let ashok = roster.create_employee("Ashok").unwrap();
/// let boss = roster.create_employee("Pointy-Haired Boss").unwrap();
///
/// roster.add_permanent(boss, dilbert, "Engineering").unwrap();
/// roster.add_temporary(dilbert, ashok, "Trainee Programme", 0, days(365)).unwrap();
///
/// let view = roster.hierarchy_of(dilbert).unwrap();
/// assert_eq!(view.perm_superior_ids(), vec![boss]);
/// assert_eq!(view.temp_inferior_ids(), vec![ashok]);
/// assert_eq!(roster.active_temporary_now(ashok).len(), 1);
/// ```
pub struct Roster {
    state: RwLock<State>,
    clock: Arc<dyn Clock>,
}

impl Roster {
    /// Create an empty roster using the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty roster with an injected clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(State::default()),
            clock,
        }
    }

    /// Rebuild a roster from a persisted snapshot
    ///
    /// Every edge goes through the same checks as a live insert, so a
    /// snapshot with dangling endpoints, self-references, inverted windows
    /// or duplicate keys is refused with `InvalidSnapshot`.
    pub fn from_snapshot(snapshot: Snapshot, clock: Arc<dyn Clock>) -> RosterResult<Self> {
        let registry = Registry::restore(snapshot.employees, snapshot.next_employee_id)?;
        let mut relationships = Relationships::new();

        for rel in snapshot.permanent {
            relationships
                .add_permanent(&registry, rel)
                .map_err(|e| RosterError::InvalidSnapshot(e.to_string()))?;
        }
        for rel in snapshot.temporary {
            relationships
                .add_temporary(&registry, rel)
                .map_err(|e| RosterError::InvalidSnapshot(e.to_string()))?;
        }

        tracing::debug!(
            employees = registry.len(),
            edges = relationships.len(),
            "roster restored from snapshot"
        );

        Ok(Self {
            state: RwLock::new(State {
                registry,
                relationships,
            }),
            clock,
        })
    }

    /// Capture the current state
    pub fn snapshot(&self) -> Snapshot {
        let state = self.read();
        let mut permanent = Vec::new();
        let mut temporary = Vec::new();
        for edge in state.relationships.iter() {
            match edge {
                Edge::Permanent(rel) => permanent.push(rel.clone()),
                Edge::Temporary(rel) => temporary.push(rel.clone()),
            }
        }

        Snapshot {
            employees: state.registry.list().cloned().collect(),
            permanent,
            temporary,
            next_employee_id: state.registry.next_id(),
        }
    }

    /// Current time according to the injected clock
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    // Employee registry

    /// Register a new employee and return its id
    pub fn create_employee(&self, name: impl Into<String>) -> RosterResult<EmployeeId> {
        let name = name.into();
        let id = self.write().registry.create(name.clone())?;
        tracing::debug!(employee = %id, name = %name, "employee created");
        Ok(id)
    }

    /// Look up an employee
    pub fn employee(&self, id: EmployeeId) -> RosterResult<Employee> {
        self.read().registry.get(id).cloned()
    }

    /// All employees in id order
    pub fn employees(&self) -> Vec<Employee> {
        self.read().registry.list().cloned().collect()
    }

    /// Number of employees
    pub fn employee_count(&self) -> usize {
        self.read().registry.len()
    }

    /// Change an employee's name
    pub fn rename_employee(&self, id: EmployeeId, name: impl Into<String>) -> RosterResult<()> {
        let name = name.into();
        self.write().registry.rename(id, name.clone())?;
        tracing::debug!(employee = %id, name = %name, "employee renamed");
        Ok(())
    }

    /// Delete an employee
    ///
    /// Under [`DeletePolicy::Reject`] this fails with `Conflict` while any
    /// edge references the employee. Under [`DeletePolicy::Cascade`] the
    /// referencing edges are removed first and returned.
    pub fn delete_employee(&self, id: EmployeeId, policy: DeletePolicy) -> RosterResult<Vec<Edge>> {
        let mut state = self.write();
        state.registry.get(id)?;

        let removed = if state.relationships.is_referenced(id) {
            match policy {
                DeletePolicy::Reject => {
                    let count = state.relationships.keys_touching(id).len();
                    return Err(RosterError::Conflict(format!(
                        "employee {} is still referenced by {} relationship(s)",
                        id, count
                    )));
                }
                DeletePolicy::Cascade => {
                    let removed = state.relationships.remove_touching(id);
                    tracing::warn!(
                        employee = %id,
                        edges = removed.len(),
                        "cascading employee delete to relationships"
                    );
                    removed
                }
            }
        } else {
            Vec::new()
        };

        state.registry.remove(id)?;
        tracing::debug!(employee = %id, policy = policy.as_str(), "employee deleted");
        Ok(removed)
    }

    // Relationship store

    /// Add a permanent reporting edge
    pub fn add_permanent(
        &self,
        superior: EmployeeId,
        inferior: EmployeeId,
        department: impl Into<String>,
    ) -> RosterResult<EdgeKey> {
        let rel = PermanentRelationship::new(superior, inferior, department);
        let mut state = self.write();
        let State {
            registry,
            relationships,
        } = &mut *state;
        let key = relationships.add_permanent(registry, rel)?;
        tracing::debug!(edge = %key, "permanent relationship added");
        Ok(key)
    }

    /// Add a temporary reporting edge valid within `[starting, ending)`
    pub fn add_temporary(
        &self,
        superior: EmployeeId,
        inferior: EmployeeId,
        setting: impl Into<String>,
        starting: Timestamp,
        ending: Timestamp,
    ) -> RosterResult<EdgeKey> {
        let rel = TemporaryRelationship::new(superior, inferior, setting, starting, ending);
        let mut state = self.write();
        let State {
            registry,
            relationships,
        } = &mut *state;
        let key = relationships.add_temporary(registry, rel)?;
        tracing::debug!(edge = %key, ending, "temporary relationship added");
        Ok(key)
    }

    /// Remove an edge
    pub fn remove_edge(&self, key: &EdgeKey) -> RosterResult<Edge> {
        let edge = self.write().relationships.remove(key)?;
        tracing::debug!(edge = %key, "relationship removed");
        Ok(edge)
    }

    /// Look up an edge
    pub fn edge(&self, key: &EdgeKey) -> RosterResult<Edge> {
        self.read()
            .relationships
            .get(key)
            .cloned()
            .ok_or_else(|| RosterError::NotFound(format!("edge {}", key)))
    }

    /// All edges in key order
    pub fn edges(&self) -> Vec<Edge> {
        self.read().relationships.iter().cloned().collect()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.read().relationships.len()
    }

    /// Edges in which `id` is the superior
    pub fn list_by_superior(&self, id: EmployeeId, filter: EdgeFilter) -> Vec<Edge> {
        self.read().relationships.list_by_superior(id, filter)
    }

    /// Edges in which `id` is the inferior
    pub fn list_by_inferior(&self, id: EmployeeId, filter: EdgeFilter) -> Vec<Edge> {
        self.read().relationships.list_by_inferior(id, filter)
    }

    /// Temporary edges touching `id` that hold at `as_of`
    pub fn active_temporary_at(&self, id: EmployeeId, as_of: Timestamp) -> Vec<TemporaryRelationship> {
        self.read().relationships.active_temporary_at(id, as_of)
    }

    /// Temporary edges touching `id` that hold now
    pub fn active_temporary_now(&self, id: EmployeeId) -> Vec<TemporaryRelationship> {
        self.active_temporary_at(id, self.clock.now())
    }

    // Query façade

    /// Superiors and inferiors of `id`, split by edge kind
    pub fn hierarchy_of(&self, id: EmployeeId) -> RosterResult<Hierarchy> {
        let state = self.read();
        query::hierarchy_of(&state.registry, &state.relationships, id)
    }

    /// Hierarchy of every employee, in id order
    pub fn report(&self) -> Vec<Hierarchy> {
        let state = self.read();
        query::report(&state.registry, &state.relationships)
    }

    /// Check that the edge indices agree with the edge map
    pub fn verify_consistency(&self) -> RosterResult<()> {
        self.read()
            .relationships
            .verify_consistency()
            .map_err(RosterError::Inconsistent)
    }

    // Mutations validate before touching state, so a poisoned lock still
    // guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("Roster")
            .field("employees", &state.registry.len())
            .field("edges", &state.relationships.len())
            .finish()
    }
}
