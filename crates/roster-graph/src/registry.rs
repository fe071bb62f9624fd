//! Employee registry: owns employee records and allocates their ids

use crate::error::{RosterError, RosterResult};
use roster_domain::{Employee, EmployeeId};
use std::collections::BTreeMap;

/// Holds every employee, keyed by id
///
/// Ids are handed out in increasing order and never reused, even after the
/// employee holding one is deleted.
#[derive(Debug, Clone)]
pub struct Registry {
    employees: BTreeMap<EmployeeId, Employee>,
    next_id: EmployeeId,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            employees: BTreeMap::new(),
            next_id: EmployeeId::FIRST,
        }
    }

    /// Rebuild a registry from persisted records
    ///
    /// Fails if an id repeats or is not below `next_id`.
    pub fn restore(employees: Vec<Employee>, next_id: EmployeeId) -> RosterResult<Self> {
        let mut map = BTreeMap::new();
        for employee in employees {
            if employee.id >= next_id {
                return Err(RosterError::InvalidSnapshot(format!(
                    "employee {} is not below next id {}",
                    employee.id, next_id
                )));
            }
            let id = employee.id;
            if map.insert(id, employee).is_some() {
                return Err(RosterError::InvalidSnapshot(format!(
                    "employee {} appears twice",
                    id
                )));
            }
        }

        Ok(Self {
            employees: map,
            next_id,
        })
    }

    /// Allocate a fresh id and store a new employee under it
    pub fn create(&mut self, name: impl Into<String>) -> RosterResult<EmployeeId> {
        let id = self.next_id;
        // The last representable id is kept back so `next_id` always stays valid.
        let following = id.next().ok_or(RosterError::Exhausted)?;

        self.employees.insert(id, Employee::new(id, name));
        self.next_id = following;
        Ok(id)
    }

    /// Look up an employee
    pub fn get(&self, id: EmployeeId) -> RosterResult<&Employee> {
        self.employees
            .get(&id)
            .ok_or_else(|| RosterError::NotFound(format!("employee {}", id)))
    }

    /// Whether `id` is registered
    pub fn contains(&self, id: EmployeeId) -> bool {
        self.employees.contains_key(&id)
    }

    /// Replace an employee's name
    pub fn rename(&mut self, id: EmployeeId, name: impl Into<String>) -> RosterResult<()> {
        let employee = self
            .employees
            .get_mut(&id)
            .ok_or_else(|| RosterError::NotFound(format!("employee {}", id)))?;
        employee.name = name.into();
        Ok(())
    }

    /// Remove an employee record
    ///
    /// Does not look at edges; reference checks belong to the caller.
    pub(crate) fn remove(&mut self, id: EmployeeId) -> RosterResult<Employee> {
        self.employees
            .remove(&id)
            .ok_or_else(|| RosterError::NotFound(format!("employee {}", id)))
    }

    /// All employees in id order
    pub fn list(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Number of employees
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Id the next `create` will hand out
    pub fn next_id(&self) -> EmployeeId {
        self.next_id
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_from_one() {
        let mut registry = Registry::new();
        let dilbert = registry.create("Dilbert").unwrap();
        let ashok = registry.create("Ashok").unwrap();

        assert_eq!(dilbert.value(), 1);
        assert_eq!(ashok.value(), 2);
        assert_eq!(registry.get(ashok).unwrap().name, "Ashok");
    }

    #[test]
    fn test_ids_are_not_reused_after_remove() {
        let mut registry = Registry::new();
        let first = registry.create("Wally").unwrap();
        assert!(registry.contains(first));
        registry.remove(first).unwrap();
        assert!(!registry.contains(first));

        let second = registry.create("Alice").unwrap();
        assert_ne!(first, second);
        assert!(registry.contains(second));
        assert!(registry.get(first).unwrap_err().is_not_found());
    }

    #[test]
    fn test_rename() {
        let mut registry = Registry::new();
        let id = registry.create("Dogbert").unwrap();
        registry.rename(id, "Catbert").unwrap();
        assert_eq!(registry.get(id).unwrap().name, "Catbert");

        let missing = EmployeeId::from_value(99);
        assert!(registry.rename(missing, "Ratbert").unwrap_err().is_not_found());
    }

    #[test]
    fn test_exhaustion() {
        let mut registry = Registry::restore(Vec::new(), EmployeeId::from_value(u64::MAX)).unwrap();
        assert_eq!(registry.create("Topper"), Err(RosterError::Exhausted));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_restore_rejects_bad_records() {
        let dup = vec![
            Employee::new(EmployeeId::from_value(1), "A"),
            Employee::new(EmployeeId::from_value(1), "B"),
        ];
        assert!(matches!(
            Registry::restore(dup, EmployeeId::from_value(5)),
            Err(RosterError::InvalidSnapshot(_))
        ));

        let ahead = vec![Employee::new(EmployeeId::from_value(5), "A")];
        assert!(matches!(
            Registry::restore(ahead, EmployeeId::from_value(5)),
            Err(RosterError::InvalidSnapshot(_))
        ));
    }
}
