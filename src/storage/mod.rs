//! Storage Layer - parameterized single-row lookups
//!
//! The resolver never owns the schema. It only needs a store that can run a
//! query with named string parameters and hand back at most one row:
//! - `TemplateStore` is that seam
//! - `SqliteStore` is the bundled rusqlite implementation

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStore;

use crate::Result;
use crate::row::TemplateRow;

/// A connected relational store the resolver can query
pub trait TemplateStore {
    /// Driver tag used to pick a query dialect, e.g. `"sqlite"` or `"mysql"`
    fn driver_name(&self) -> &str;

    /// Run `sql` with named string parameters (`(":name", value)` pairs) and
    /// return the first row, if any
    fn fetch_optional(&self, sql: &str, params: &[(&str, &str)]) -> Result<Option<TemplateRow>>;
}

impl<S: TemplateStore + ?Sized> TemplateStore for &S {
    fn driver_name(&self) -> &str {
        (**self).driver_name()
    }

    fn fetch_optional(&self, sql: &str, params: &[(&str, &str)]) -> Result<Option<TemplateRow>> {
        (**self).fetch_optional(sql, params)
    }
}
