//! Policy module - what happens to edges when an employee is deleted

/// Behavior of employee deletion when edges still reference the employee
///
/// - Reject: refuse the deletion while any edge references the employee
/// - Cascade: delete every referencing edge together with the employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeletePolicy {
    /// Fail with a conflict if the employee is still referenced
    #[default]
    Reject,

    /// Remove referencing edges along with the employee
    Cascade,
}

impl DeletePolicy {
    /// Get the policy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletePolicy::Reject => "reject",
            DeletePolicy::Cascade => "cascade",
        }
    }

    /// Parse a policy from a string (internal use)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reject" => Some(DeletePolicy::Reject),
            "cascade" => Some(DeletePolicy::Cascade),
            _ => None,
        }
    }
}

impl std::str::FromStr for DeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid delete policy: {}", s))
    }
}
