//! Demo command implementation.

use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use roster_domain::{days, EmployeeId};
use roster_graph::Roster;

/// Employees created by the demo, in creation order.
#[derive(Debug, Clone, Copy)]
pub struct DemoOffice {
    /// Dilbert
    pub dilbert: EmployeeId,
    /// Ashok
    pub ashok: EmployeeId,
    /// Pointy-Haired Boss
    pub boss: EmployeeId,
}

/// Execute the demo command.
pub fn execute_demo(session: &Session, formatter: &Formatter) -> Result<()> {
    let office = populate(session.roster())?;
    tracing::info!(
        dilbert = %office.dilbert,
        ashok = %office.ashok,
        boss = %office.boss,
        "demo office populated"
    );

    println!(
        "{}",
        formatter.format_report(&session.roster().report(), &session.names())?
    );
    Ok(())
}

/// Add the sample office: the boss leads Dilbert in Engineering, and
/// Dilbert coaches Ashok in the Trainee Programme for a year from now.
pub fn populate(roster: &Roster) -> Result<DemoOffice> {
    let dilbert = roster.create_employee("Dilbert")?;
    let ashok = roster.create_employee("Ashok")?;
    let boss = roster.create_employee("Pointy-Haired Boss")?;

    roster.add_permanent(boss, dilbert, "Engineering")?;
    let starting = roster.now();
    roster.add_temporary(
        dilbert,
        ashok,
        "Trainee Programme",
        starting,
        starting.saturating_add(days(365)),
    )?;

    Ok(DemoOffice {
        dilbert,
        ashok,
        boss,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_domain::FixedClock;
    use std::sync::Arc;

    #[test]
    fn test_demo_office_hierarchy() {
        let roster = Roster::with_clock(Arc::new(FixedClock::new(1_000)));
        let office = populate(&roster).unwrap();

        let dilbert = roster.hierarchy_of(office.dilbert).unwrap();
        assert_eq!(dilbert.perm_superior_ids(), vec![office.boss]);
        assert_eq!(dilbert.temp_inferior_ids(), vec![office.ashok]);

        let ashok = roster.hierarchy_of(office.ashok).unwrap();
        assert_eq!(ashok.temp_superiors[0].setting, "Trainee Programme");
        assert_eq!(ashok.temp_superiors[0].ending, 1_000 + days(365));

        let boss = roster.hierarchy_of(office.boss).unwrap();
        assert_eq!(boss.perm_inferior_ids(), vec![office.dilbert]);
        assert!(boss.temp_superiors.is_empty());
        assert_eq!(roster.active_temporary_now(office.ashok).len(), 1);
    }
}
