//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the relationship graph and
//! its collaborators. Implementations live in other crates.

use crate::{Edge, EdgeKey, Employee, EmployeeId, Snapshot, Timestamp};

/// Trait for persisting employees and edges
///
/// Implemented by the infrastructure layer (roster-store). Invoked at
/// process start (`load_all`) and end (`save_snapshot`), never while the
/// graph holds its lock.
pub trait RosterStore {
    /// Error type for store operations
    type Error;

    /// Insert or update one employee
    fn save_employee(&mut self, employee: &Employee) -> Result<(), Self::Error>;

    /// Insert or update one edge
    fn save_edge(&mut self, edge: &Edge) -> Result<(), Self::Error>;

    /// Delete one employee; absent ids are not an error
    fn delete_employee(&mut self, id: EmployeeId) -> Result<(), Self::Error>;

    /// Delete one edge; absent keys are not an error
    fn delete_edge(&mut self, key: &EdgeKey) -> Result<(), Self::Error>;

    /// Load everything that was saved
    fn load_all(&self) -> Result<Snapshot, Self::Error>;

    /// Replace the stored state with `snapshot`
    fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}

/// Source of "now" for time-dependent queries
///
/// Injected so temporal queries stay testable.
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> Timestamp;
}
