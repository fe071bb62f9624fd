//! Snapshot module - the unit exchanged with persistence

use crate::{Edge, Employee, EmployeeId, PermanentRelationship, TemporaryRelationship};

/// Complete state of a roster at one point in time
///
/// Persistence collaborators load and save whole snapshots; the graph
/// rebuilds its indices from one on restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// All employees, ordered by id
    pub employees: Vec<Employee>,

    /// All permanent edges, ordered by key
    pub permanent: Vec<PermanentRelationship>,

    /// All temporary edges, ordered by key
    pub temporary: Vec<TemporaryRelationship>,

    /// Id the registry will hand out next
    pub next_employee_id: EmployeeId,
}

impl Snapshot {
    /// Whether the snapshot holds no employees and no edges
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty() && self.permanent.is_empty() && self.temporary.is_empty()
    }

    /// Iterate over every edge, permanent first
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.permanent
            .iter()
            .cloned()
            .map(Edge::Permanent)
            .chain(self.temporary.iter().cloned().map(Edge::Temporary))
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            employees: Vec::new(),
            permanent: Vec::new(),
            temporary: Vec::new(),
            next_employee_id: EmployeeId::FIRST,
        }
    }
}
