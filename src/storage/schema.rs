//! Conventional template table layout
//!
//! The resolver works against whatever table the configuration names; this is
//! the layout the defaults in `config` assume. Provisioning it is left to the
//! host, the statements here are what tests and local setups use.

/// SQL to create the `tplfile` table
pub const CREATE_TPLFILE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tplfile (
    tpl_id INTEGER PRIMARY KEY AUTOINCREMENT,
    tpl_refid INTEGER NOT NULL DEFAULT 0,
    tpl_tplset TEXT NOT NULL DEFAULT 'default',
    tpl_file TEXT NOT NULL DEFAULT '',
    tpl_desc TEXT NOT NULL DEFAULT '',
    tpl_lastmodified INTEGER NOT NULL DEFAULT 0,
    tpl_lastimported INTEGER NOT NULL DEFAULT 0,
    tpl_type TEXT NOT NULL DEFAULT '',
    tpl_source TEXT
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_tplfile_file_set ON tplfile(tpl_file, tpl_tplset)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_TPLFILE_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
