//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, ToSql};
use rusqlite::types::ValueRef;
use crate::Result;
use crate::row::{TemplateRow, Value};
use super::{schema, TemplateStore};

/// SQLite-backed template store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Wrap a connection the host already opened
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create the conventional `tplfile` table
    pub fn create_default_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Insert a row into the conventional `tplfile` table
    pub fn insert_template(
        &self,
        tplset: &str,
        file: &str,
        source: Option<&str>,
        lastmodified: i64,
    ) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO tplfile (tpl_tplset, tpl_file, tpl_source, tpl_lastmodified, tpl_lastimported)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
            params![tplset, file, source, lastmodified],
        )?;
        Ok(())
    }

    /// Helper to convert a column value into an owned `Value`
    fn value_from_ref(value: ValueRef<'_>) -> Value {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(f) => Value::Real(f),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        }
    }
}

impl TemplateStore for SqliteStore {
    fn driver_name(&self) -> &str {
        "sqlite"
    }

    fn fetch_optional(&self, sql: &str, params: &[(&str, &str)]) -> Result<Option<TemplateRow>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let bound: Vec<(&str, &dyn ToSql)> = params
            .iter()
            .map(|(name, value)| (*name, value as &dyn ToSql))
            .collect();

        let mut rows = stmt.query(bound.as_slice())?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let template_row = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| -> Result<(String, Value)> {
                Ok((name, Self::value_from_ref(row.get_ref(idx)?)))
            })
            .collect::<Result<TemplateRow>>()?;
        Ok(Some(template_row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn seeded_store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create_default_schema().unwrap();
        store.insert_template("default", "header.tpl", None, 100).unwrap();
        store.insert_template("dark", "header.tpl", Some("<h1>dark</h1>"), 200).unwrap();
        store
    }

    #[test]
    fn test_fetch_binds_named_params() {
        let store = seeded_store();
        let row = store
            .fetch_optional(
                "SELECT * FROM tplfile WHERE tpl_file = :template AND tpl_tplset = :tplset",
                &[(":template", "header.tpl"), (":tplset", "dark")],
            )
            .unwrap()
            .unwrap();

        assert_eq!(row.text("tpl_source"), Some("<h1>dark</h1>"));
        assert_eq!(row.integer("tpl_lastmodified"), Some(200));
        assert_eq!(row.text("tpl_tplset"), Some("dark"));
    }

    #[test]
    fn test_fetch_no_row() {
        let store = seeded_store();
        let row = store
            .fetch_optional(
                "SELECT * FROM tplfile WHERE tpl_file = :template",
                &[(":template", "missing.tpl")],
            )
            .unwrap();
        assert!(row.is_none());
    }

    #[test]
    fn test_param_is_never_interpolated() {
        let store = seeded_store();
        let row = store
            .fetch_optional(
                "SELECT * FROM tplfile WHERE tpl_file = :template",
                &[(":template", "x' OR '1'='1")],
            )
            .unwrap();
        assert!(row.is_none());
    }

    #[test]
    fn test_null_column_is_kept() {
        let store = seeded_store();
        let row = store
            .fetch_optional(
                "SELECT * FROM tplfile WHERE tpl_tplset = :tplset",
                &[(":tplset", "default")],
            )
            .unwrap()
            .unwrap();
        assert_eq!(row.get("tpl_source"), Some(&Value::Null));
    }

    #[test]
    fn test_missing_table_is_storage_error() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store
            .fetch_optional("SELECT * FROM nope WHERE a = :template", &[(":template", "x")])
            .unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }
}
