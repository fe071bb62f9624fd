//! Query façade: read-only views combining registry and relationships

use crate::error::RosterResult;
use crate::registry::Registry;
use crate::relationships::Relationships;
use roster_domain::{
    Edge, EdgeFilter, Employee, EmployeeId, PermanentRelationship, TemporaryRelationship,
};

/// Everything one employee is connected to, split by role and edge kind
///
/// `perm_superiors` holds the permanent edges in which the employee is the
/// inferior, i.e. the edges leading up to its superiors; the other three
/// fields follow the same pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    /// The employee queried
    pub employee: Employee,

    /// Permanent edges to the employee's superiors
    pub perm_superiors: Vec<PermanentRelationship>,

    /// Permanent edges to the employee's inferiors
    pub perm_inferiors: Vec<PermanentRelationship>,

    /// Temporary edges to the employee's superiors
    pub temp_superiors: Vec<TemporaryRelationship>,

    /// Temporary edges to the employee's inferiors
    pub temp_inferiors: Vec<TemporaryRelationship>,
}

impl Hierarchy {
    /// Ids of permanent superiors
    pub fn perm_superior_ids(&self) -> Vec<EmployeeId> {
        self.perm_superiors.iter().map(|rel| rel.superior_id).collect()
    }

    /// Ids of permanent inferiors
    pub fn perm_inferior_ids(&self) -> Vec<EmployeeId> {
        self.perm_inferiors.iter().map(|rel| rel.inferior_id).collect()
    }

    /// Ids of temporary superiors
    pub fn temp_superior_ids(&self) -> Vec<EmployeeId> {
        self.temp_superiors.iter().map(|rel| rel.superior_id).collect()
    }

    /// Ids of temporary inferiors
    pub fn temp_inferior_ids(&self) -> Vec<EmployeeId> {
        self.temp_inferiors.iter().map(|rel| rel.inferior_id).collect()
    }

    /// Total number of edges in this view
    pub fn edge_count(&self) -> usize {
        self.perm_superiors.len()
            + self.perm_inferiors.len()
            + self.temp_superiors.len()
            + self.temp_inferiors.len()
    }

    /// Whether the employee has no relationships at all
    pub fn is_isolated(&self) -> bool {
        self.edge_count() == 0
    }
}

/// Build the hierarchy view of `id`
///
/// Fails with `NotFound` if the employee is unknown.
pub fn hierarchy_of(
    registry: &Registry,
    relationships: &Relationships,
    id: EmployeeId,
) -> RosterResult<Hierarchy> {
    let employee = registry.get(id)?;
    Ok(view(employee, relationships))
}

/// Hierarchy views of every employee, in id order
pub fn report(registry: &Registry, relationships: &Relationships) -> Vec<Hierarchy> {
    registry
        .list()
        .map(|employee| view(employee, relationships))
        .collect()
}

fn view(employee: &Employee, relationships: &Relationships) -> Hierarchy {
    let (perm_superiors, temp_superiors) =
        split(relationships.list_by_inferior(employee.id, EdgeFilter::Both));
    let (perm_inferiors, temp_inferiors) =
        split(relationships.list_by_superior(employee.id, EdgeFilter::Both));

    Hierarchy {
        employee: employee.clone(),
        perm_superiors,
        perm_inferiors,
        temp_superiors,
        temp_inferiors,
    }
}

fn split(edges: Vec<Edge>) -> (Vec<PermanentRelationship>, Vec<TemporaryRelationship>) {
    let mut permanent = Vec::new();
    let mut temporary = Vec::new();
    for edge in edges {
        match edge {
            Edge::Permanent(rel) => permanent.push(rel),
            Edge::Temporary(rel) => temporary.push(rel),
        }
    }
    (permanent, temporary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_domain::days;

    fn office() -> (Registry, Relationships, [EmployeeId; 3]) {
        let mut registry = Registry::new();
        let dilbert = registry.create("Dilbert").unwrap();
        let ashok = registry.create("Ashok").unwrap();
        let boss = registry.create("Pointy-Haired Boss").unwrap();

        let mut rels = Relationships::new();
        rels.add_permanent(&registry, PermanentRelationship::new(boss, dilbert, "Engineering"))
            .unwrap();
        rels.add_temporary(
            &registry,
            TemporaryRelationship::new(dilbert, ashok, "Trainee Programme", 0, days(365)),
        )
        .unwrap();
        (registry, rels, [dilbert, ashok, boss])
    }

    #[test]
    fn test_split_by_kind() {
        let a = EmployeeId::from_value(1);
        let b = EmployeeId::from_value(2);
        let edges = vec![
            Edge::from(TemporaryRelationship::new(a, b, "Shadowing", 0, 10)),
            Edge::from(PermanentRelationship::new(a, b, "Ops")),
            Edge::from(TemporaryRelationship::new(a, b, "Shadowing", 10, 20)),
        ];

        let (permanent, temporary) = split(edges);
        assert_eq!(permanent.len(), 1);
        assert_eq!(temporary.iter().map(|t| t.starting).collect::<Vec<_>>(), vec![0, 10]);
    }

    #[test]
    fn test_hierarchy_of_middle_manager() {
        let (registry, rels, [dilbert, ashok, boss]) = office();

        let view = hierarchy_of(&registry, &rels, dilbert).unwrap();
        assert_eq!(view.employee.name, "Dilbert");
        assert_eq!(view.perm_superior_ids(), vec![boss]);
        assert!(view.perm_inferiors.is_empty());
        assert!(view.temp_superiors.is_empty());
        assert_eq!(view.temp_inferior_ids(), vec![ashok]);
        assert_eq!(view.edge_count(), 2);
    }

    #[test]
    fn test_hierarchy_of_unknown_and_isolated() {
        let (mut registry, rels, _) = office();
        assert!(hierarchy_of(&registry, &rels, EmployeeId::from_value(99))
            .unwrap_err()
            .is_not_found());

        let wally = registry.create("Wally").unwrap();
        assert!(hierarchy_of(&registry, &rels, wally).unwrap().is_isolated());
    }

    #[test]
    fn test_report_covers_every_employee() {
        let (registry, rels, ids) = office();
        let report = report(&registry, &rels);

        assert_eq!(report.iter().map(|v| v.employee.id).collect::<Vec<_>>(), ids.to_vec());
        for view in &report {
            assert_eq!(view, &hierarchy_of(&registry, &rels, view.employee.id).unwrap());
        }
    }
}
