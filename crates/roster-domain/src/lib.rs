//! Roster Domain Layer
//!
//! This crate contains the value types and trait interfaces for a small
//! reporting-relationship graph over employees. It has ZERO external
//! dependencies and defines the concepts every other layer depends upon.
//!
//! ## Key Concepts
//!
//! - **Employee**: a vertex, identified by a registry-assigned id
//! - **Permanent relationship**: superior/inferior edge with no time bound
//! - **Temporary relationship**: superior/inferior edge valid in `[starting, ending)`
//! - **Edge key**: the primary key of an edge (pair, plus start for temporary edges)
//! - **Snapshot**: whole-roster state exchanged with persistence
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure value types only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for persistence and time

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod employee;
pub mod policy;
pub mod relationship;
pub mod snapshot;
pub mod time;
pub mod traits;

// Re-exports for convenience
pub use employee::{Employee, EmployeeId};
pub use policy::DeletePolicy;
pub use relationship::{
    Edge, EdgeFilter, EdgeKey, EdgeKind, PermanentRelationship, TemporaryRelationship,
};
pub use snapshot::Snapshot;
pub use time::{days, FixedClock, SystemClock, Timestamp, MILLIS_PER_DAY};
pub use traits::{Clock, RosterStore};
