//! Roster Graph Layer
//!
//! In-memory reporting graph over employees: an employee registry, a
//! relationship store with permanent and temporary edges indexed by
//! superior and by inferior, and read-only hierarchy queries.
//!
//! # Examples
//!
//! ```
//! use roster_domain::{DeletePolicy, EdgeFilter};
//! use roster_graph::Roster;
//!
//! let roster = Roster::new();
//! let boss = roster.create_employee("Pointy-Haired Boss").unwrap();
//! let dilbert = roster.create_employee("Dilbert").unwrap();
//! roster.add_permanent(boss, dilbert, "Engineering").unwrap();
//!
//! assert_eq!(roster.list_by_superior(boss, EdgeFilter::Permanent).len(), 1);
//! assert!(roster.delete_employee(dilbert, DeletePolicy::Reject).is_err());
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod query;
pub mod registry;
pub mod relationships;
pub mod roster;

pub use error::{RosterError, RosterResult};
pub use query::Hierarchy;
pub use registry::Registry;
pub use relationships::Relationships;
pub use roster::Roster;
