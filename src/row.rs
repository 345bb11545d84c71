//! Template rows as returned by a store lookup
//!
//! A row is a loose column name -> value mapping. Which columns matter is decided
//! by configuration, so nothing here knows about `tpl_file` or `tpl_tplset`.

use std::collections::HashMap;

/// A single column value, typed the way relational stores report them
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer content. Text holding a base-10 integer is accepted too, since
    /// some drivers hand every column back as a string.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Null)
    }
}

/// One fetched row: column name -> value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateRow {
    columns: HashMap<String, Value>,
}

impl TemplateRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column insertion, mostly for tests and foreign stores
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Text value of a column; `None` when absent, null or not text
    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(Value::as_text)
    }

    /// Integer value of a column; `None` when absent, null or not an integer
    pub fn integer(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(Value::as_integer)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, Value)> for TemplateRow {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_accessors() {
        let row = TemplateRow::new()
            .with("tpl_file", "header.tpl")
            .with("tpl_lastmodified", 42i64)
            .with("tpl_source", Value::Null);

        assert_eq!(row.text("tpl_file"), Some("header.tpl"));
        assert_eq!(row.integer("tpl_lastmodified"), Some(42));
        assert_eq!(row.text("tpl_source"), None);
        assert!(row.get("tpl_source").unwrap().is_null());
        assert_eq!(row.text("missing"), None);
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn test_integer_from_text() {
        let row = TemplateRow::new()
            .with("mtime", "1700000000")
            .with("junk", "soon");

        assert_eq!(row.integer("mtime"), Some(1_700_000_000));
        assert_eq!(row.integer("junk"), None);
        // text accessor never coerces the other way
        assert_eq!(TemplateRow::new().with("n", 5i64).text("n"), None);
    }
}
