//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::time::format_instant;
use colored::*;
use roster_domain::{Edge, EdgeKey, Employee, EmployeeId, TemporaryRelationship};
use roster_graph::Hierarchy;
use std::collections::BTreeMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Employee names by id, used to label relationship endpoints.
pub type Names = BTreeMap<EmployeeId, String>;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a list of employees.
    pub fn format_employees(&self, employees: &[Employee]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = employees.iter().map(employee_json).collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                if employees.is_empty() {
                    return Ok(self.colorize("No employees found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Name"]);
                for employee in employees {
                    builder.push_record([employee.id.to_string(), employee.name.clone()]);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(employees
                .iter()
                .map(|e| e.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a list of edges.
    pub fn format_edges(&self, edges: &[Edge], names: &Names) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = edges.iter().map(edge_json).collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                if edges.is_empty() {
                    return Ok(self.colorize("No relationships found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Kind", "Superior", "Inferior", "Detail", "Starting", "Ending"]);
                for edge in edges {
                    let (detail, starting, ending) = match edge {
                        Edge::Permanent(rel) => (rel.department.clone(), String::new(), String::new()),
                        Edge::Temporary(rel) => (
                            rel.setting.clone(),
                            format_instant(rel.starting),
                            format_instant(rel.ending),
                        ),
                    };
                    builder.push_record([
                        edge.kind().to_string(),
                        label(edge.superior_id(), names),
                        label(edge.inferior_id(), names),
                        detail,
                        starting,
                        ending,
                    ]);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(edges
                .iter()
                .map(|e| e.key().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format temporary relationships.
    pub fn format_temporary(&self, rels: &[TemporaryRelationship], names: &Names) -> Result<String> {
        let edges: Vec<Edge> = rels.iter().cloned().map(Edge::Temporary).collect();
        self.format_edges(&edges, names)
    }

    /// Format the hierarchy of a single employee.
    pub fn format_hierarchy(&self, view: &Hierarchy, names: &Names) -> Result<String> {
        self.format_report(std::slice::from_ref(view), names)
    }

    /// Format hierarchies of several employees.
    pub fn format_report(&self, views: &[Hierarchy], names: &Names) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = views.iter().map(hierarchy_json).collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                if views.is_empty() {
                    return Ok(self.colorize("No employees found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record([
                    "ID",
                    "Name",
                    "Perm. superiors",
                    "Perm. inferiors",
                    "Temp. superiors",
                    "Temp. inferiors",
                ]);
                for view in views {
                    builder.push_record([
                        view.employee.id.to_string(),
                        view.employee.name.clone(),
                        labels(&view.perm_superior_ids(), names),
                        labels(&view.perm_inferior_ids(), names),
                        labels(&view.temp_superior_ids(), names),
                        labels(&view.temp_inferior_ids(), names),
                    ]);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(views
                .iter()
                .map(|v| v.employee.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format an employee creation result.
    pub fn employee_created(&self, employee: &Employee) -> String {
        match self.format {
            OutputFormat::Quiet => employee.id.to_string(),
            _ => self.success(&format!("Employee created: {}", employee)),
        }
    }

    /// Format an edge creation result.
    pub fn edge_added(&self, key: &EdgeKey) -> String {
        match self.format {
            OutputFormat::Quiet => key.to_string(),
            _ => self.success(&format!("Relationship added: {}", key)),
        }
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn label(id: EmployeeId, names: &Names) -> String {
    match names.get(&id) {
        Some(name) => format!("{} ({})", id, name),
        None => id.to_string(),
    }
}

fn labels(ids: &[EmployeeId], names: &Names) -> String {
    ids.iter()
        .map(|id| label(*id, names))
        .collect::<Vec<_>>()
        .join("\n")
}

fn employee_json(employee: &Employee) -> serde_json::Value {
    serde_json::json!({
        "id": employee.id.value(),
        "name": employee.name,
    })
}

fn edge_json(edge: &Edge) -> serde_json::Value {
    match edge {
        Edge::Permanent(rel) => serde_json::json!({
            "kind": "permanent",
            "superior_id": rel.superior_id.value(),
            "inferior_id": rel.inferior_id.value(),
            "department": rel.department,
        }),
        Edge::Temporary(rel) => serde_json::json!({
            "kind": "temporary",
            "superior_id": rel.superior_id.value(),
            "inferior_id": rel.inferior_id.value(),
            "setting": rel.setting,
            "starting": format_instant(rel.starting),
            "ending": format_instant(rel.ending),
        }),
    }
}

fn hierarchy_json(view: &Hierarchy) -> serde_json::Value {
    let edges = |edges: Vec<Edge>| edges.iter().map(edge_json).collect::<Vec<_>>();
    serde_json::json!({
        "employee": employee_json(&view.employee),
        "perm_superiors": edges(view.perm_superiors.iter().cloned().map(Edge::Permanent).collect()),
        "perm_inferiors": edges(view.perm_inferiors.iter().cloned().map(Edge::Permanent).collect()),
        "temp_superiors": edges(view.temp_superiors.iter().cloned().map(Edge::Temporary).collect()),
        "temp_inferiors": edges(view.temp_inferiors.iter().cloned().map(Edge::Temporary).collect()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_domain::PermanentRelationship;

    fn id(v: u64) -> EmployeeId {
        EmployeeId::from_value(v)
    }

    fn names() -> Names {
        [(id(1), "Dilbert".to_string()), (id(3), "Pointy-Haired Boss".to_string())]
            .into_iter()
            .collect()
    }

    fn edges() -> Vec<Edge> {
        vec![
            PermanentRelationship::new(id(3), id(1), "Engineering").into(),
            TemporaryRelationship::new(id(1), id(2), "Trainee Programme", 0, 86_400_000).into(),
        ]
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_edges(&edges(), &names()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["department"], "Engineering");
        assert_eq!(parsed[1]["ending"], "1970-01-02T00:00:00Z");
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_edges(&edges(), &names()).unwrap();
        assert_eq!(output.lines().count(), 2);
        assert!(output.starts_with("permanent(3 -> 1)"));
    }

    #[test]
    fn test_table_format_labels_endpoints() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_edges(&edges(), &names()).unwrap();
        assert!(output.contains("Superior"));
        assert!(output.contains("3 (Pointy-Haired Boss)"));
        assert!(output.contains("Trainee Programme"));
    }

    #[test]
    fn test_empty_tables() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert!(formatter
            .format_employees(&[])
            .unwrap()
            .contains("No employees found"));
        assert!(formatter
            .format_edges(&[], &names())
            .unwrap()
            .contains("No relationships found"));
    }

    #[test]
    fn test_employee_list_formats() {
        let employees = vec![Employee::new(id(1), "Dilbert")];
        let table = Formatter::new(OutputFormat::Table, false)
            .format_employees(&employees)
            .unwrap();
        assert!(table.contains("Dilbert"));

        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .format_employees(&employees)
            .unwrap();
        assert_eq!(quiet, "1");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }
}
