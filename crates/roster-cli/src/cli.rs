//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use roster_domain::{EdgeFilter, EmployeeId};
use std::path::PathBuf;

/// Roster CLI - Manage employees and their reporting relationships.
#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Database path (overrides the profile)
    #[arg(short, long, global = true, env = "ROSTER_DATABASE")]
    pub database: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage employees
    Employee(EmployeeArgs),

    /// Add a permanent reporting relationship
    Link(LinkArgs),

    /// Add a temporary reporting relationship
    Assign(AssignArgs),

    /// Remove a reporting relationship
    Unlink(UnlinkArgs),

    /// List relationships of an employee
    Edges(EdgesArgs),

    /// Show superiors and inferiors of an employee
    Hierarchy(HierarchyArgs),

    /// Show temporary relationships active at a point in time
    Active(ActiveArgs),

    /// Show every employee with their relationships
    Report,

    /// Populate the roster with the sample office and print the report
    Demo,

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for employee management.
#[derive(Debug, Parser)]
pub struct EmployeeArgs {
    #[command(subcommand)]
    pub action: EmployeeAction,
}

/// Employee management actions.
#[derive(Debug, Subcommand)]
pub enum EmployeeAction {
    /// Register a new employee
    Add {
        /// Name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Change an employee's name
    Rename {
        /// Employee id
        id: EmployeeId,
        /// New name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Delete an employee
    Remove {
        /// Employee id
        id: EmployeeId,
        /// Also delete every relationship referencing the employee
        #[arg(long, conflicts_with = "reject")]
        cascade: bool,
        /// Refuse if any relationship references the employee
        #[arg(long)]
        reject: bool,
    },

    /// Show one employee
    Show {
        /// Employee id
        id: EmployeeId,
    },

    /// List all employees
    List,
}

/// Arguments for the link command.
#[derive(Debug, Parser)]
pub struct LinkArgs {
    /// Superior employee id
    pub superior: EmployeeId,

    /// Inferior employee id
    pub inferior: EmployeeId,

    /// Department of the reporting line
    #[arg(long)]
    pub department: String,
}

/// Arguments for the assign command.
#[derive(Debug, Parser)]
pub struct AssignArgs {
    /// Superior employee id
    pub superior: EmployeeId,

    /// Inferior employee id
    pub inferior: EmployeeId,

    /// Setting of the assignment (e.g. "Trainee Programme")
    #[arg(short, long)]
    pub setting: String,

    /// Start (now, RFC 3339 or YYYY-MM-DD)
    #[arg(long, default_value = "now")]
    pub starting: String,

    /// End (RFC 3339 or YYYY-MM-DD), exclusive
    #[arg(long, conflicts_with = "days", required_unless_present = "days")]
    pub ending: Option<String>,

    /// Length in days instead of an explicit end
    #[arg(long)]
    pub days: Option<u64>,
}

/// Arguments for the unlink command.
#[derive(Debug, Parser)]
pub struct UnlinkArgs {
    #[command(subcommand)]
    pub edge: UnlinkTarget,
}

/// Which relationship to remove.
#[derive(Debug, Subcommand)]
pub enum UnlinkTarget {
    /// Remove a permanent relationship
    Permanent {
        /// Superior employee id
        superior: EmployeeId,
        /// Inferior employee id
        inferior: EmployeeId,
    },

    /// Remove a temporary relationship
    Temporary {
        /// Superior employee id
        superior: EmployeeId,
        /// Inferior employee id
        inferior: EmployeeId,
        /// Start of the relationship to remove
        #[arg(long)]
        starting: String,
    },
}

/// Arguments for the edges command.
#[derive(Debug, Parser)]
pub struct EdgesArgs {
    /// Employee id
    pub id: EmployeeId,

    /// Role of the employee in the listed edges
    #[arg(short, long, value_enum, default_value = "any")]
    pub role: RoleArg,

    /// Edge kinds to include
    #[arg(short, long, value_enum, default_value = "both")]
    pub kind: KindArg,
}

/// Arguments for the hierarchy command.
#[derive(Debug, Parser)]
pub struct HierarchyArgs {
    /// Employee id
    pub id: EmployeeId,
}

/// Arguments for the active command.
#[derive(Debug, Parser)]
pub struct ActiveArgs {
    /// Employee id
    pub id: EmployeeId,

    /// Instant to evaluate (now, RFC 3339 or YYYY-MM-DD)
    #[arg(short, long, default_value = "now")]
    pub at: String,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// SQLite database path
        #[arg(long)]
        db: PathBuf,
        /// Default delete policy (reject or cascade)
        #[arg(long, default_value = "reject")]
        delete_policy: String,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Role filter argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RoleArg {
    /// Edges where the employee is the superior
    Superior,
    /// Edges where the employee is the inferior
    Inferior,
    /// Either role
    Any,
}

/// Edge kind argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum KindArg {
    /// Permanent edges only
    Permanent,
    /// Temporary edges only
    Temporary,
    /// Both kinds
    Both,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<KindArg> for EdgeFilter {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Permanent => EdgeFilter::Permanent,
            KindArg::Temporary => EdgeFilter::Temporary,
            KindArg::Both => EdgeFilter::Both,
        }
    }
}
