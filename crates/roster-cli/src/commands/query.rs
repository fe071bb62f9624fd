//! Read-only commands: edges, hierarchy, active and report.

use crate::cli::{ActiveArgs, EdgesArgs, HierarchyArgs, RoleArg};
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use crate::time::parse_instant;
use roster_domain::{Edge, EdgeFilter};

/// Execute the edges command.
pub fn execute_edges(args: EdgesArgs, session: &Session, formatter: &Formatter) -> Result<()> {
    let edges = collect_edges(session, &args);
    println!("{}", formatter.format_edges(&edges, &session.names())?);
    Ok(())
}

/// Execute the hierarchy command.
pub fn execute_hierarchy(
    args: HierarchyArgs,
    session: &Session,
    formatter: &Formatter,
) -> Result<()> {
    let view = session.roster().hierarchy_of(args.id)?;
    println!("{}", formatter.format_hierarchy(&view, &session.names())?);
    Ok(())
}

/// Execute the active command.
pub fn execute_active(args: ActiveArgs, session: &Session, formatter: &Formatter) -> Result<()> {
    let at = parse_instant(&args.at, session.roster().now())?;
    let active = session.roster().active_temporary_at(args.id, at);
    println!("{}", formatter.format_temporary(&active, &session.names())?);
    Ok(())
}

/// Execute the report command.
pub fn execute_report(session: &Session, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.format_report(&session.roster().report(), &session.names())?
    );
    Ok(())
}

fn collect_edges(session: &Session, args: &EdgesArgs) -> Vec<Edge> {
    let roster = session.roster();
    let filter: EdgeFilter = args.kind.into();
    let mut edges = Vec::new();
    if args.role != RoleArg::Inferior {
        edges.extend(roster.list_by_superior(args.id, filter));
    }
    if args.role != RoleArg::Superior {
        edges.extend(roster.list_by_inferior(args.id, filter));
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::KindArg;
    use crate::config::OutputFormat;
    use roster_domain::{days, DeletePolicy, EmployeeId};

    #[test]
    fn test_collect_edges_by_role_and_kind() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::open(&dir.path().join("roster.db"), DeletePolicy::Reject).unwrap();
        let roster = session.roster();
        let dilbert = roster.create_employee("Dilbert").unwrap();
        let ashok = roster.create_employee("Ashok").unwrap();
        let boss = roster.create_employee("Boss").unwrap();
        roster.add_permanent(boss, dilbert, "Engineering").unwrap();
        roster
            .add_temporary(dilbert, ashok, "Trainee Programme", 0, days(1))
            .unwrap();

        let args = |role, kind| EdgesArgs {
            id: dilbert,
            role,
            kind,
        };
        assert_eq!(collect_edges(&session, &args(RoleArg::Any, KindArg::Both)).len(), 2);
        assert_eq!(collect_edges(&session, &args(RoleArg::Superior, KindArg::Both)).len(), 1);
        assert_eq!(
            collect_edges(&session, &args(RoleArg::Inferior, KindArg::Temporary)).len(),
            0
        );
        assert_eq!(
            collect_edges(&session, &args(RoleArg::Inferior, KindArg::Permanent))[0].superior_id(),
            boss
        );
    }

    #[test]
    fn test_hierarchy_of_unknown_employee() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::open(&dir.path().join("roster.db"), DeletePolicy::Reject).unwrap();
        let formatter = Formatter::new(OutputFormat::Json, false);
        let result = execute_hierarchy(
            HierarchyArgs {
                id: EmployeeId::from_value(9),
            },
            &session,
            &formatter,
        );
        assert!(result.is_err());
        execute_report(&session, &formatter).unwrap();
    }
}
