//! Ranked single-row SELECT per storage dialect
//!
//! Both variants return every column of the best row for a template name:
//! a row tagged with the requested set wins over one tagged with the default
//! set. SQLite has no `IF()`, so its variant projects the priority through an
//! explicit `CASE` column and orders by that instead.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Placeholder bound to the requested template name
pub const PARAM_TEMPLATE: &str = ":template";
/// Placeholder bound to the requested template set
pub const PARAM_TPLSET: &str = ":tplset";
/// Placeholder bound to the default template set
pub const PARAM_DEFAULT_TPLSET: &str = ":defaultTplSet";

/// Supported SQL dialect families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Explicit `CASE` projection for the priority
    Sqlite,
    /// Inline `IF()` ordering; also the fallback for unknown drivers
    #[default]
    Mysql,
}

impl Dialect {
    /// Pick the dialect for a driver name. Unknown drivers get the generic variant.
    pub fn from_driver_name(driver: &str) -> Self {
        match driver.to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Self::Sqlite,
            _ => Self::Mysql,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Mysql => "mysql",
        }
    }

    /// Build the ranked query for `table`, filtering on `name_column` and
    /// ranking on `set_column`
    pub fn select_query(&self, table: &str, name_column: &str, set_column: &str) -> String {
        match self {
            Self::Sqlite => format!(
                "SELECT *, CASE WHEN `{set}` = {default} THEN 1 ELSE 0 END ___order \
                 FROM `{table}` \
                 WHERE `{name}` = {template} AND `{set}` IN ({tplset}, {default}) \
                 ORDER BY ___order ASC LIMIT 1",
                table = table,
                name = name_column,
                set = set_column,
                template = PARAM_TEMPLATE,
                tplset = PARAM_TPLSET,
                default = PARAM_DEFAULT_TPLSET,
            ),
            Self::Mysql => format!(
                "SELECT * FROM `{table}` \
                 WHERE `{name}` = {template} AND `{set}` IN ({tplset}, {default}) \
                 ORDER BY IF(`{set}` = {default}, 1, 0) ASC LIMIT 1",
                table = table,
                name = name_column,
                set = set_column,
                template = PARAM_TEMPLATE,
                tplset = PARAM_TPLSET,
                default = PARAM_DEFAULT_TPLSET,
            ),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    /// Strict parse for user input; use [`Dialect::from_driver_name`] for
    /// driver tags where anything unknown should fall back
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "mysql" | "mariadb" | "generic" => Ok(Self::Mysql),
            other => Err(Error::InvalidConfig(format!("unknown dialect: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_detection() {
        assert_eq!(Dialect::from_driver_name("sqlite"), Dialect::Sqlite);
        assert_eq!(Dialect::from_driver_name("SQLite3"), Dialect::Sqlite);
        assert_eq!(Dialect::from_driver_name("mysql"), Dialect::Mysql);
        assert_eq!(Dialect::from_driver_name("oci"), Dialect::Mysql);
        assert_eq!(Dialect::from_driver_name(""), Dialect::Mysql);
    }

    #[test]
    fn test_sqlite_query_uses_case_projection() {
        let sql = Dialect::Sqlite.select_query("tplfile", "tpl_file", "tpl_tplset");
        assert!(sql.contains("CASE WHEN `tpl_tplset` = :defaultTplSet THEN 1 ELSE 0 END ___order"));
        assert!(sql.contains("FROM `tplfile`"));
        assert!(sql.contains("`tpl_file` = :template"));
        assert!(sql.contains("`tpl_tplset` IN (:tplset, :defaultTplSet)"));
        assert!(sql.ends_with("ORDER BY ___order ASC LIMIT 1"));
        assert!(!sql.contains("IF("));
    }

    #[test]
    fn test_mysql_query_orders_inline() {
        let sql = Dialect::Mysql.select_query("tplfile", "tpl_file", "tpl_tplset");
        assert!(sql.starts_with("SELECT * FROM `tplfile`"));
        assert!(sql.contains("ORDER BY IF(`tpl_tplset` = :defaultTplSet, 1, 0) ASC LIMIT 1"));
        assert!(!sql.contains("CASE"));
    }

    #[test]
    fn test_parse_dialect() {
        assert_eq!("sqlite".parse::<Dialect>().unwrap(), Dialect::Sqlite);
        assert_eq!("MySQL".parse::<Dialect>().unwrap(), Dialect::Mysql);
        assert!("postgres".parse::<Dialect>().is_err());
    }
}
