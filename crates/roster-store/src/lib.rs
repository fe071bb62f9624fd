//! Roster Storage Layer
//!
//! Implements the RosterStore trait on top of SQLite.
//!
//! # Architecture
//!
//! - One table per record kind (`employee`, `permanent_relationship`,
//!   `temporary_relationship`) mirroring the edge primary keys
//! - `roster_meta` keeps the next employee id so ids survive restarts
//!   without being reused
//! - The graph is loaded once at start and written back as a snapshot
//!
//! # Examples
//!
//! ```no_run
//! use roster_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for load/save
//! ```

#![warn(missing_docs)]

use roster_domain::traits::RosterStore;
use roster_domain::{
    Edge, EdgeKey, Employee, EmployeeId, PermanentRelationship, Snapshot, TemporaryRelationship,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;

const NEXT_EMPLOYEE_ID: &str = "next_employee_id";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of RosterStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use roster_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("roster.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Look up one employee by id
    pub fn get_employee(&self, id: EmployeeId) -> Result<Employee, StoreError> {
        self.conn
            .query_row(
                "SELECT id, name FROM employee WHERE id = ?1",
                params![to_sql_int(id.value())?],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?
            .ok_or_else(|| StoreError::NotFound(format!("employee {}", id)))
            .and_then(|(id, name)| Ok(Employee::new(EmployeeId::from_value(from_sql_int(id)?), name)))
    }

    fn next_employee_id(&self) -> Result<EmployeeId, StoreError> {
        let stored: Option<i64> = self
            .conn
            .query_row(
                "SELECT value FROM roster_meta WHERE key = ?1",
                params![NEXT_EMPLOYEE_ID],
                |row| row.get(0),
            )
            .optional()?;
        let max_id: Option<i64> =
            self.conn
                .query_row("SELECT MAX(id) FROM employee", [], |row| row.get(0))?;

        // Rows written without the meta counter must still not be reused.
        let from_meta = stored.map(from_sql_int).transpose()?.unwrap_or(1);
        let after_max = max_id
            .map(from_sql_int)
            .transpose()?
            .map_or(1, |max| max.saturating_add(1));
        Ok(EmployeeId::from_value(from_meta.max(after_max)))
    }

    fn load_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM employee ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name)| Ok(Employee::new(EmployeeId::from_value(from_sql_int(id)?), name)))
            .collect()
    }

    fn load_permanent(&self) -> Result<Vec<PermanentRelationship>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT superior_id, inferior_id, department FROM permanent_relationship
             ORDER BY superior_id, inferior_id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(superior, inferior, department)| {
                Ok(PermanentRelationship::new(
                    EmployeeId::from_value(from_sql_int(superior)?),
                    EmployeeId::from_value(from_sql_int(inferior)?),
                    department,
                ))
            })
            .collect()
    }

    fn load_temporary(&self) -> Result<Vec<TemporaryRelationship>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT superior_id, inferior_id, setting, starting, ending FROM temporary_relationship
             ORDER BY superior_id, inferior_id, starting",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, i64>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(superior, inferior, setting, starting, ending)| {
                Ok(TemporaryRelationship::new(
                    EmployeeId::from_value(from_sql_int(superior)?),
                    EmployeeId::from_value(from_sql_int(inferior)?),
                    setting,
                    from_sql_int(starting)?,
                    from_sql_int(ending)?,
                ))
            })
            .collect()
    }
}

impl RosterStore for SqliteStore {
    type Error = StoreError;

    fn save_employee(&mut self, employee: &Employee) -> Result<(), Self::Error> {
        let tx = self.conn.transaction()?;
        upsert_employee(&tx, employee)?;
        bump_next_id(&tx, employee.id.value().saturating_add(1))?;
        tx.commit()?;
        Ok(())
    }

    fn save_edge(&mut self, edge: &Edge) -> Result<(), Self::Error> {
        upsert_edge(&self.conn, edge)
    }

    fn delete_employee(&mut self, id: EmployeeId) -> Result<(), Self::Error> {
        self.conn.execute(
            "DELETE FROM employee WHERE id = ?1",
            params![to_sql_int(id.value())?],
        )?;
        Ok(())
    }

    fn delete_edge(&mut self, key: &EdgeKey) -> Result<(), Self::Error> {
        match *key {
            EdgeKey::Permanent { superior, inferior } => {
                self.conn.execute(
                    "DELETE FROM permanent_relationship WHERE superior_id = ?1 AND inferior_id = ?2",
                    params![to_sql_int(superior.value())?, to_sql_int(inferior.value())?],
                )?;
            }
            EdgeKey::Temporary {
                superior,
                inferior,
                starting,
            } => {
                self.conn.execute(
                    "DELETE FROM temporary_relationship
                     WHERE superior_id = ?1 AND inferior_id = ?2 AND starting = ?3",
                    params![
                        to_sql_int(superior.value())?,
                        to_sql_int(inferior.value())?,
                        to_sql_int(starting)?,
                    ],
                )?;
            }
        }
        Ok(())
    }

    fn load_all(&self) -> Result<Snapshot, Self::Error> {
        Ok(Snapshot {
            employees: self.load_employees()?,
            permanent: self.load_permanent()?,
            temporary: self.load_temporary()?,
            next_employee_id: self.next_employee_id()?,
        })
    }

    fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        let tx = self.conn.transaction()?;

        tx.execute_batch(
            "DELETE FROM temporary_relationship;
             DELETE FROM permanent_relationship;
             DELETE FROM employee;",
        )?;

        for employee in &snapshot.employees {
            upsert_employee(&tx, employee)?;
        }
        for edge in snapshot.edges() {
            upsert_edge(&tx, &edge)?;
        }
        tx.execute(
            "INSERT INTO roster_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![NEXT_EMPLOYEE_ID, to_sql_int(snapshot.next_employee_id.value())?],
        )?;

        tx.commit()?;
        Ok(())
    }
}

fn upsert_employee(conn: &Connection, employee: &Employee) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO employee (id, name) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET name = excluded.name",
        params![to_sql_int(employee.id.value())?, &employee.name],
    )?;
    Ok(())
}

fn bump_next_id(conn: &Connection, candidate: u64) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO roster_meta (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = MAX(value, excluded.value)",
        params![NEXT_EMPLOYEE_ID, to_sql_int(candidate)?],
    )?;
    Ok(())
}

fn upsert_edge(conn: &Connection, edge: &Edge) -> Result<(), StoreError> {
    match edge {
        Edge::Permanent(rel) => {
            conn.execute(
                "INSERT INTO permanent_relationship (superior_id, inferior_id, department)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(superior_id, inferior_id) DO UPDATE SET
                 department = excluded.department",
                params![
                    to_sql_int(rel.superior_id.value())?,
                    to_sql_int(rel.inferior_id.value())?,
                    &rel.department,
                ],
            )?;
        }
        Edge::Temporary(rel) => {
            conn.execute(
                "INSERT INTO temporary_relationship (superior_id, inferior_id, setting, starting, ending)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(superior_id, inferior_id, starting) DO UPDATE SET
                 setting = excluded.setting, ending = excluded.ending",
                params![
                    to_sql_int(rel.superior_id.value())?,
                    to_sql_int(rel.inferior_id.value())?,
                    &rel.setting,
                    to_sql_int(rel.starting)?,
                    to_sql_int(rel.ending)?,
                ],
            )?;
        }
    }
    Ok(())
}

/// SQLite integers are signed; values beyond `i64::MAX` cannot be stored
fn to_sql_int(value: u64) -> Result<i64, StoreError> {
    i64::try_from(value)
        .map_err(|_| StoreError::InvalidData(format!("value {} does not fit in SQLite INTEGER", value)))
}

fn from_sql_int(value: i64) -> Result<u64, StoreError> {
    u64::try_from(value)
        .map_err(|_| StoreError::InvalidData(format!("negative value {} in unsigned column", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_conversions() {
        assert_eq!(to_sql_int(5).unwrap(), 5);
        assert!(to_sql_int(u64::MAX).is_err());
        assert!(from_sql_int(-1).is_err());
    }

    #[test]
    fn test_empty_store_starts_at_first_id() {
        let store = SqliteStore::new(":memory:").unwrap();
        let snapshot = store.load_all().unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.next_employee_id, EmployeeId::FIRST);
    }
}
