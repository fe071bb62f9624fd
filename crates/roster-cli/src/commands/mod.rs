//! Command implementations.

pub mod demo;
pub mod employee;
pub mod profile;
pub mod query;
pub mod relationship;

pub use self::demo::execute_demo;
pub use self::employee::execute_employee;
pub use self::profile::execute_profile;
pub use self::query::{execute_active, execute_edges, execute_hierarchy, execute_report};
pub use self::relationship::{execute_assign, execute_link, execute_unlink};

use crate::cli::Command;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;

/// Execute a command that operates on an open session.
///
/// `Repl` is not accepted here; the caller owns the interactive loop.
pub fn execute(
    command: Command,
    session: &Session,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match command {
        Command::Employee(args) => execute_employee(args, session, formatter),
        Command::Link(args) => execute_link(args, session, formatter),
        Command::Assign(args) => execute_assign(args, session, formatter),
        Command::Unlink(args) => execute_unlink(args, session, formatter),
        Command::Edges(args) => execute_edges(args, session, formatter),
        Command::Hierarchy(args) => execute_hierarchy(args, session, formatter),
        Command::Active(args) => execute_active(args, session, formatter),
        Command::Report => execute_report(session, formatter),
        Command::Demo => execute_demo(session, formatter),
        Command::Profile(args) => execute_profile(args, config, formatter),
        Command::Repl => Err(CliError::InvalidInput(
            "Already in interactive mode".to_string(),
        )),
    }
}
