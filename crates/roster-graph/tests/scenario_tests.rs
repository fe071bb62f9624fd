//! Integration tests for roster-graph
//!
//! These tests run the reporting scenario end to end and check that
//! hierarchy queries always agree with the edges present.

use proptest::prelude::*;
use roster_domain::{days, DeletePolicy, Edge, EdgeFilter, EmployeeId, FixedClock};
use roster_graph::Roster;
use std::collections::BTreeSet;
use std::sync::Arc;

const T0: u64 = 1_700_000_000_000;

struct Office {
    roster: Roster,
    dilbert: EmployeeId,
    ashok: EmployeeId,
    boss: EmployeeId,
}

fn office() -> Office {
    let roster = Roster::with_clock(Arc::new(FixedClock::new(T0)));
    let dilbert = roster.create_employee("Dilbert").unwrap();
    let ashok = roster.create_employee("Ashok").unwrap();
    let boss = roster.create_employee("Pointy-Haired Boss").unwrap();

    roster.add_permanent(boss, dilbert, "Engineering").unwrap();
    roster
        .add_temporary(dilbert, ashok, "Trainee Programme", T0, T0 + days(365))
        .unwrap();

    Office {
        roster,
        dilbert,
        ashok,
        boss,
    }
}

#[test]
fn test_ids_follow_creation_order() {
    let office = office();
    assert_eq!(office.dilbert.value(), 1);
    assert_eq!(office.ashok.value(), 2);
    assert_eq!(office.boss.value(), 3);
}

#[test]
fn test_hierarchy_of_dilbert() {
    let office = office();
    let view = office.roster.hierarchy_of(office.dilbert).unwrap();

    assert_eq!(view.employee.name, "Dilbert");
    assert_eq!(view.perm_superior_ids(), vec![office.boss]);
    assert!(view.perm_inferior_ids().is_empty());
    assert!(view.temp_superior_ids().is_empty());
    assert_eq!(view.temp_inferior_ids(), vec![office.ashok]);
}

#[test]
fn test_hierarchy_of_boss_and_ashok() {
    let office = office();

    let boss = office.roster.hierarchy_of(office.boss).unwrap();
    assert_eq!(boss.perm_inferior_ids(), vec![office.dilbert]);
    assert_eq!(boss.edge_count(), 1);

    let ashok = office.roster.hierarchy_of(office.ashok).unwrap();
    assert_eq!(ashok.temp_superior_ids(), vec![office.dilbert]);
    assert_eq!(ashok.temp_superiors[0].setting, "Trainee Programme");
}

#[test]
fn test_active_temporary_window() {
    let office = office();

    let during = office.roster.active_temporary_at(office.ashok, T0 + days(1));
    assert_eq!(during.len(), 1);
    assert_eq!(during[0].inferior_id, office.ashok);

    assert!(office
        .roster
        .active_temporary_at(office.ashok, T0 + days(366))
        .is_empty());
    assert!(office.roster.active_temporary_at(office.ashok, T0 - 1).is_empty());
    assert!(office
        .roster
        .active_temporary_at(office.ashok, T0 + days(365))
        .is_empty());
    assert_eq!(office.roster.active_temporary_now(office.dilbert).len(), 1);
}

#[test]
fn test_permanent_edge_seen_from_both_ends() {
    let office = office();
    let down = office.roster.list_by_superior(office.boss, EdgeFilter::Permanent);
    let up = office.roster.list_by_inferior(office.dilbert, EdgeFilter::Permanent);

    assert_eq!(down.len(), 1);
    assert_eq!(down, up);
    match &down[0] {
        Edge::Permanent(rel) => assert_eq!(rel.department, "Engineering"),
        other => panic!("expected permanent edge, got {other}"),
    }
}

#[test]
fn test_failed_mutations_leave_store_unchanged() {
    let office = office();
    let before = office.roster.snapshot();

    assert!(office
        .roster
        .add_permanent(office.boss, office.dilbert, "Marketing")
        .unwrap_err()
        .is_conflict());
    assert!(office
        .roster
        .add_temporary(office.boss, office.ashok, "Backwards", T0 + 5, T0)
        .unwrap_err()
        .is_invalid_argument());
    assert!(office
        .roster
        .add_permanent(office.boss, office.boss, "Self")
        .unwrap_err()
        .is_invalid_argument());
    assert!(office
        .roster
        .add_permanent(office.boss, EmployeeId::from_value(404), "Nobody")
        .unwrap_err()
        .is_not_found());
    assert!(office
        .roster
        .delete_employee(office.dilbert, DeletePolicy::Reject)
        .unwrap_err()
        .is_conflict());

    assert_eq!(office.roster.snapshot(), before);
    assert!(office.roster.verify_consistency().is_ok());
}

#[test]
fn test_hierarchy_of_unknown_employee() {
    let office = office();
    let err = office
        .roster
        .hierarchy_of(EmployeeId::from_value(99))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_remove_edge_then_query() {
    let office = office();
    let key = office
        .roster
        .list_by_superior(office.boss, EdgeFilter::Permanent)[0]
        .key();

    office.roster.remove_edge(&key).unwrap();
    assert!(office.roster.remove_edge(&key).unwrap_err().is_not_found());
    assert!(office.roster.hierarchy_of(office.boss).unwrap().is_isolated());
    assert!(office
        .roster
        .hierarchy_of(office.dilbert)
        .unwrap()
        .perm_superiors
        .is_empty());
}

#[test]
fn test_report_covers_everyone_in_id_order() {
    let office = office();
    let ids: Vec<_> = office
        .roster
        .report()
        .into_iter()
        .map(|view| view.employee.id)
        .collect();
    assert_eq!(ids, vec![office.dilbert, office.ashok, office.boss]);
}

#[derive(Debug, Clone)]
enum Op {
    Permanent(u64, u64),
    Temporary(u64, u64, u64, u64),
    Remove(usize),
    Delete(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1..6u64, 1..6u64).prop_map(|(s, i)| Op::Permanent(s, i)),
        (1..6u64, 1..6u64, 0..4u64, 0..4u64).prop_map(|(s, i, a, b)| Op::Temporary(s, i, a, b)),
        (0..16usize).prop_map(Op::Remove),
        (1..6u64).prop_map(Op::Delete),
    ]
}

proptest! {
    /// Property: every hierarchy view lists exactly the edges touching that
    /// employee, after any sequence of adds, removes and cascading deletes.
    #[test]
    fn test_hierarchy_matches_edges(ops in prop::collection::vec(op(), 0..40)) {
        let roster = Roster::with_clock(Arc::new(FixedClock::new(0)));
        for name in ["A", "B", "C", "D", "E"] {
            roster.create_employee(name).unwrap();
        }

        for op in ops {
            let id = EmployeeId::from_value;
            match op {
                Op::Permanent(s, i) => {
                    let _ = roster.add_permanent(id(s), id(i), "Dept");
                }
                Op::Temporary(s, i, a, b) => {
                    let _ = roster.add_temporary(id(s), id(i), "Setting", a, b);
                }
                Op::Remove(n) => {
                    let edges = roster.edges();
                    if !edges.is_empty() {
                        roster.remove_edge(&edges[n % edges.len()].key()).unwrap();
                    }
                }
                Op::Delete(e) => {
                    let _ = roster.delete_employee(id(e), DeletePolicy::Cascade);
                }
            }
            prop_assert!(roster.verify_consistency().is_ok());
        }

        let edges = roster.edges();
        for employee in roster.employees() {
            let view = roster.hierarchy_of(employee.id).unwrap();
            let from_view: BTreeSet<_> = view
                .perm_superiors.iter().map(|r| r.key())
                .chain(view.perm_inferiors.iter().map(|r| r.key()))
                .chain(view.temp_superiors.iter().map(|r| r.key()))
                .chain(view.temp_inferiors.iter().map(|r| r.key()))
                .collect();
            let expected: BTreeSet<_> = edges
                .iter()
                .map(Edge::key)
                .filter(|key| key.touches(employee.id))
                .collect();

            prop_assert_eq!(from_view, expected);
            prop_assert!(view.perm_superiors.iter().all(|r| r.inferior_id == employee.id));
            prop_assert!(view.perm_inferiors.iter().all(|r| r.superior_id == employee.id));
            prop_assert!(view.temp_superiors.iter().all(|r| r.inferior_id == employee.id));
            prop_assert!(view.temp_inferiors.iter().all(|r| r.superior_id == employee.id));
        }
    }
}
