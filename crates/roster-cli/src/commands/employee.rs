//! Employee command implementation.

use crate::cli::{EmployeeAction, EmployeeArgs};
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use roster_domain::{DeletePolicy, EmployeeId};

/// Execute the employee command.
pub fn execute_employee(args: EmployeeArgs, session: &Session, formatter: &Formatter) -> Result<()> {
    match args.action {
        EmployeeAction::Add { name } => {
            add_employee(session, &name.join(" "), formatter).map(|_| ())
        }
        EmployeeAction::Rename { id, name } => {
            rename_employee(session, id, &name.join(" "), formatter)
        }
        EmployeeAction::Remove {
            id,
            cascade,
            reject,
        } => {
            let policy = if cascade {
                DeletePolicy::Cascade
            } else if reject {
                DeletePolicy::Reject
            } else {
                session.policy()
            };
            remove_employee(session, id, policy, formatter)
        }
        EmployeeAction::Show { id } => {
            let employee = session.roster().employee(id)?;
            println!("{}", formatter.format_employees(std::slice::from_ref(&employee))?);
            Ok(())
        }
        EmployeeAction::List => {
            println!("{}", formatter.format_employees(&session.roster().employees())?);
            Ok(())
        }
    }
}

fn add_employee(session: &Session, name: &str, formatter: &Formatter) -> Result<EmployeeId> {
    let id = session.roster().create_employee(name)?;
    let employee = session.roster().employee(id)?;
    println!("{}", formatter.employee_created(&employee));
    Ok(id)
}

fn rename_employee(
    session: &Session,
    id: EmployeeId,
    name: &str,
    formatter: &Formatter,
) -> Result<()> {
    session.roster().rename_employee(id, name)?;
    println!(
        "{}",
        formatter.success(&format!("Employee {} renamed to '{}'", id, name))
    );
    Ok(())
}

fn remove_employee(
    session: &Session,
    id: EmployeeId,
    policy: DeletePolicy,
    formatter: &Formatter,
) -> Result<()> {
    let removed = session.roster().delete_employee(id, policy)?;
    if !removed.is_empty() {
        println!(
            "{}",
            formatter.warning(&format!("Removed {} relationship(s) with the employee", removed.len()))
        );
    }
    println!("{}", formatter.success(&format!("Employee {} deleted", id)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn session(dir: &tempfile::TempDir, policy: DeletePolicy) -> Session {
        Session::open(&dir.path().join("roster.db"), policy).unwrap()
    }

    #[test]
    fn test_add_and_rename() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir, DeletePolicy::Reject);
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let id = add_employee(&session, "Dilbert", &formatter).unwrap();
        rename_employee(&session, id, "Dogbert", &formatter).unwrap();
        assert_eq!(session.roster().employee(id).unwrap().name, "Dogbert");
    }

    #[test]
    fn test_remove_uses_profile_policy() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir, DeletePolicy::Cascade);
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let boss = add_employee(&session, "Boss", &formatter).unwrap();
        let wally = add_employee(&session, "Wally", &formatter).unwrap();
        session.roster().add_permanent(boss, wally, "Engineering").unwrap();

        let args = EmployeeArgs {
            action: EmployeeAction::Remove {
                id: wally,
                cascade: false,
                reject: true,
            },
        };
        assert!(execute_employee(args, &session, &formatter).is_err());

        let args = EmployeeArgs {
            action: EmployeeAction::Remove {
                id: wally,
                cascade: false,
                reject: false,
            },
        };
        execute_employee(args, &session, &formatter).unwrap();
        assert_eq!(session.roster().edge_count(), 0);
        assert_eq!(session.roster().employee_count(), 1);
    }

    #[test]
    fn test_show_missing_employee() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir, DeletePolicy::Reject);
        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = EmployeeArgs {
            action: EmployeeAction::Show {
                id: EmployeeId::from_value(42),
            },
        };
        assert!(execute_employee(args, &session, &formatter).is_err());
    }
}
