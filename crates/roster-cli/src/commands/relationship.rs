//! Link, assign and unlink command implementations.

use crate::cli::{AssignArgs, LinkArgs, UnlinkArgs, UnlinkTarget};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use crate::time::{format_instant, parse_instant};
use roster_domain::{days, EdgeKey, Timestamp};

/// Execute the link command.
pub fn execute_link(args: LinkArgs, session: &Session, formatter: &Formatter) -> Result<()> {
    let key = session
        .roster()
        .add_permanent(args.superior, args.inferior, args.department)?;
    println!("{}", formatter.edge_added(&key));
    Ok(())
}

/// Execute the assign command.
pub fn execute_assign(args: AssignArgs, session: &Session, formatter: &Formatter) -> Result<()> {
    let now = session.roster().now();
    let (starting, ending) = assignment_window(&args, now)?;

    let key = session.roster().add_temporary(
        args.superior,
        args.inferior,
        args.setting,
        starting,
        ending,
    )?;
    println!("{}", formatter.edge_added(&key));
    Ok(())
}

/// Execute the unlink command.
pub fn execute_unlink(args: UnlinkArgs, session: &Session, formatter: &Formatter) -> Result<()> {
    let key = match args.edge {
        UnlinkTarget::Permanent { superior, inferior } => EdgeKey::Permanent { superior, inferior },
        UnlinkTarget::Temporary {
            superior,
            inferior,
            starting,
        } => EdgeKey::Temporary {
            superior,
            inferior,
            starting: parse_instant(&starting, session.roster().now())?,
        },
    };

    let removed = session.roster().remove_edge(&key)?;
    println!(
        "{}",
        formatter.success(&format!("Relationship removed: {}", removed))
    );
    Ok(())
}

fn assignment_window(args: &AssignArgs, now: Timestamp) -> Result<(Timestamp, Timestamp)> {
    let starting = parse_instant(&args.starting, now)?;
    let ending = match (&args.ending, args.days) {
        (Some(ending), _) => parse_instant(ending, now)?,
        (None, Some(n)) => starting.checked_add(days(n)).ok_or_else(|| {
            CliError::InvalidInput(format!(
                "{} days after {} is out of range",
                n,
                format_instant(starting)
            ))
        })?,
        (None, None) => {
            return Err(CliError::InvalidInput(
                "Either --ending or --days is required".to_string(),
            ))
        }
    };
    Ok((starting, ending))
}
