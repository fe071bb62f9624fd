//! Employee module - the vertices of the reporting graph

use std::fmt;

/// Unique identifier for an employee
///
/// Ids are allocated by the registry in increasing order starting at 1 and
/// are never handed out twice within the lifetime of a store (the next free
/// id travels with every snapshot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmployeeId(u64);

impl EmployeeId {
    /// The first id a fresh registry hands out
    pub const FIRST: EmployeeId = EmployeeId(1);

    /// Create an EmployeeId from a raw value
    ///
    /// This is primarily for storage layer deserialization.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_domain::EmployeeId;
    ///
    /// let id = EmployeeId::from_value(7);
    /// assert_eq!(id.value(), 7);
    /// ```
    pub fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// Parse an EmployeeId from its decimal representation
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_domain::EmployeeId;
    ///
    /// let id = EmployeeId::from_string("42").unwrap();
    /// assert_eq!(id, EmployeeId::from_value(42));
    /// assert!(EmployeeId::from_string("abc").is_err());
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| format!("Invalid employee id '{}': {}", s, e))
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id following this one, or `None` once the id space is used up
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EmployeeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// An employee record
///
/// Owned by the registry; relationships only refer to it by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Registry-assigned identifier
    pub id: EmployeeId,

    /// Display name
    pub name: String,
}

impl Employee {
    /// Create a new employee record
    pub fn new(id: EmployeeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Employee<id={},name={}>", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_id_ordering() {
        let id1 = EmployeeId::from_value(1);
        let id2 = EmployeeId::from_value(2);

        assert!(id1 < id2);
        assert_eq!(id1.next(), Some(id2));
    }

    #[test]
    fn test_employee_id_exhaustion() {
        assert_eq!(EmployeeId::from_value(u64::MAX).next(), None);
    }

    #[test]
    fn test_employee_id_invalid_string() {
        assert!(EmployeeId::from_string("").is_err());
        assert!(EmployeeId::from_string("-3").is_err());
        assert_eq!(EmployeeId::from_string(" 12 ").unwrap().value(), 12);
    }

    #[test]
    fn test_employee_display() {
        let employee = Employee::new(EmployeeId::from_value(1), "Dilbert");
        assert_eq!(employee.to_string(), "Employee<id=1,name=Dilbert>");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: id ordering matches u64 ordering
        #[test]
        fn test_id_ordering_property(a: u64, b: u64) {
            let id_a = EmployeeId::from_value(a);
            let id_b = EmployeeId::from_value(b);

            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }
    }
}
