//! Relationship module - directed superior/inferior edges between employees
//!
//! Two edge kinds exist. Permanent relationships have no time bound and are
//! keyed by the ordered pair. Temporary relationships are valid within the
//! half-open window `[starting, ending)` and are keyed by the ordered pair
//! plus their start, so successive assignments between the same two people
//! can coexist.

use crate::{EmployeeId, Timestamp};
use std::fmt;

/// Kind of a reporting edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeKind {
    /// Unbounded reporting line
    Permanent,

    /// Reporting line valid within a time window
    Temporary,
}

impl EdgeKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Permanent => "permanent",
            EdgeKind::Temporary => "temporary",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which edge kinds a listing should include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeFilter {
    /// Only permanent edges
    Permanent,

    /// Only temporary edges
    Temporary,

    /// Both kinds
    #[default]
    Both,
}

impl EdgeFilter {
    /// Whether an edge of `kind` passes this filter
    pub fn matches(&self, kind: EdgeKind) -> bool {
        match self {
            EdgeFilter::Permanent => kind == EdgeKind::Permanent,
            EdgeFilter::Temporary => kind == EdgeKind::Temporary,
            EdgeFilter::Both => true,
        }
    }

    /// Parse a filter from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "permanent" | "perm" => Some(EdgeFilter::Permanent),
            "temporary" | "temp" => Some(EdgeFilter::Temporary),
            "both" | "all" => Some(EdgeFilter::Both),
            _ => None,
        }
    }
}

impl std::str::FromStr for EdgeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid edge filter: {}", s))
    }
}

/// Primary key of an edge
///
/// Ordering puts every permanent key before every temporary key, then
/// orders by superior, inferior and (for temporary edges) start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeKey {
    /// Key of a permanent edge
    Permanent {
        /// Managing employee
        superior: EmployeeId,
        /// Managed employee
        inferior: EmployeeId,
    },

    /// Key of a temporary edge
    Temporary {
        /// Managing employee
        superior: EmployeeId,
        /// Managed employee
        inferior: EmployeeId,
        /// Start of the validity window
        starting: Timestamp,
    },
}

impl EdgeKey {
    /// Edge kind this key addresses
    pub fn kind(&self) -> EdgeKind {
        match self {
            EdgeKey::Permanent { .. } => EdgeKind::Permanent,
            EdgeKey::Temporary { .. } => EdgeKind::Temporary,
        }
    }

    /// Superior endpoint
    pub fn superior(&self) -> EmployeeId {
        match *self {
            EdgeKey::Permanent { superior, .. } | EdgeKey::Temporary { superior, .. } => superior,
        }
    }

    /// Inferior endpoint
    pub fn inferior(&self) -> EmployeeId {
        match *self {
            EdgeKey::Permanent { inferior, .. } | EdgeKey::Temporary { inferior, .. } => inferior,
        }
    }

    /// Whether `id` is either endpoint
    pub fn touches(&self, id: EmployeeId) -> bool {
        self.superior() == id || self.inferior() == id
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKey::Permanent { superior, inferior } => {
                write!(f, "permanent({} -> {})", superior, inferior)
            }
            EdgeKey::Temporary {
                superior,
                inferior,
                starting,
            } => write!(f, "temporary({} -> {} @ {})", superior, inferior, starting),
        }
    }
}

/// A permanent reporting relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermanentRelationship {
    /// Managing employee
    pub superior_id: EmployeeId,

    /// Managed employee
    pub inferior_id: EmployeeId,

    /// Department the reporting line belongs to
    pub department: String,
}

impl PermanentRelationship {
    /// Create a new permanent relationship
    pub fn new(
        superior_id: EmployeeId,
        inferior_id: EmployeeId,
        department: impl Into<String>,
    ) -> Self {
        Self {
            superior_id,
            inferior_id,
            department: department.into(),
        }
    }

    /// Primary key of this edge
    pub fn key(&self) -> EdgeKey {
        EdgeKey::Permanent {
            superior: self.superior_id,
            inferior: self.inferior_id,
        }
    }
}

impl fmt::Display for PermanentRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PermanentRelationship<superior_id={},inferior_id={},department={}>",
            self.superior_id, self.inferior_id, self.department
        )
    }
}

/// A time-bounded reporting relationship
///
/// Valid within `[starting, ending)`; `starting < ending` is enforced by the
/// relationship store, not by this constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporaryRelationship {
    /// Managing employee
    pub superior_id: EmployeeId,

    /// Managed employee
    pub inferior_id: EmployeeId,

    /// Context of the assignment (e.g. a trainee programme)
    pub setting: String,

    /// Start of the validity window (inclusive)
    pub starting: Timestamp,

    /// End of the validity window (exclusive)
    pub ending: Timestamp,
}

impl TemporaryRelationship {
    /// Create a new temporary relationship
    pub fn new(
        superior_id: EmployeeId,
        inferior_id: EmployeeId,
        setting: impl Into<String>,
        starting: Timestamp,
        ending: Timestamp,
    ) -> Self {
        Self {
            superior_id,
            inferior_id,
            setting: setting.into(),
            starting,
            ending,
        }
    }

    /// Primary key of this edge
    pub fn key(&self) -> EdgeKey {
        EdgeKey::Temporary {
            superior: self.superior_id,
            inferior: self.inferior_id,
            starting: self.starting,
        }
    }

    /// Whether the window is non-empty
    pub fn has_valid_window(&self) -> bool {
        self.starting < self.ending
    }

    /// Whether the relationship holds at `at`
    pub fn is_active_at(&self, at: Timestamp) -> bool {
        self.starting <= at && at < self.ending
    }
}

impl fmt::Display for TemporaryRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TemporaryRelationship<superior_id={},inferior_id={},setting={},starting={},ending={}>",
            self.superior_id, self.inferior_id, self.setting, self.starting, self.ending
        )
    }
}

/// Either kind of reporting edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edge {
    /// A permanent edge
    Permanent(PermanentRelationship),

    /// A temporary edge
    Temporary(TemporaryRelationship),
}

impl Edge {
    /// Primary key of this edge
    pub fn key(&self) -> EdgeKey {
        match self {
            Edge::Permanent(rel) => rel.key(),
            Edge::Temporary(rel) => rel.key(),
        }
    }

    /// Edge kind
    pub fn kind(&self) -> EdgeKind {
        match self {
            Edge::Permanent(_) => EdgeKind::Permanent,
            Edge::Temporary(_) => EdgeKind::Temporary,
        }
    }

    /// Superior endpoint
    pub fn superior_id(&self) -> EmployeeId {
        match self {
            Edge::Permanent(rel) => rel.superior_id,
            Edge::Temporary(rel) => rel.superior_id,
        }
    }

    /// Inferior endpoint
    pub fn inferior_id(&self) -> EmployeeId {
        match self {
            Edge::Permanent(rel) => rel.inferior_id,
            Edge::Temporary(rel) => rel.inferior_id,
        }
    }

    /// Borrow as a temporary relationship, if it is one
    pub fn as_temporary(&self) -> Option<&TemporaryRelationship> {
        match self {
            Edge::Temporary(rel) => Some(rel),
            Edge::Permanent(_) => None,
        }
    }
}

impl From<PermanentRelationship> for Edge {
    fn from(rel: PermanentRelationship) -> Self {
        Edge::Permanent(rel)
    }
}

impl From<TemporaryRelationship> for Edge {
    fn from(rel: TemporaryRelationship) -> Self {
        Edge::Temporary(rel)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Permanent(rel) => rel.fmt(f),
            Edge::Temporary(rel) => rel.fmt(f),
        }
    }
}
