//! Executes the ranked template query against a store

use crate::Result;
use crate::config::TemplatesConfig;
use crate::row::TemplateRow;
use crate::storage::TemplateStore;
use super::dialect::{Dialect, PARAM_DEFAULT_TPLSET, PARAM_TEMPLATE, PARAM_TPLSET};

/// Prepared lookup for one table layout and one requested set.
///
/// The SQL is built once; only the template name changes per call and it is
/// always passed as a bound parameter.
#[derive(Debug, Clone)]
pub struct RowFetcher {
    sql: String,
    tplset: String,
    default_tplset: String,
}

impl RowFetcher {
    pub fn new(dialect: Dialect, templates: &TemplatesConfig) -> Self {
        let sql = dialect.select_query(
            &templates.table,
            &templates.name_column,
            &templates.set_column,
        );
        tracing::trace!(%dialect, %sql, "built template query");

        Self {
            sql,
            tplset: templates.tplset.clone(),
            default_tplset: templates.default_tplset.clone(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Fetch the best row for `template`. Store errors are returned as-is.
    pub fn fetch<S: TemplateStore + ?Sized>(
        &self,
        store: &S,
        template: &str,
    ) -> Result<Option<TemplateRow>> {
        let params = [
            (PARAM_TEMPLATE, template),
            (PARAM_TPLSET, self.tplset.as_str()),
            (PARAM_DEFAULT_TPLSET, self.default_tplset.as_str()),
        ];
        store.fetch_optional(&self.sql, &params)
    }
}
