//! Database template resource
//!
//! Resolves a template identifier in three steps:
//! 1. fetch the best row for the requested set (or the default set)
//! 2. rows from a non-default set carry their content inline
//! 3. default-set rows point at a file, resolved through a `PathResolver`
//!
//! Anything that goes wrong after the row is fetched (no path, missing file,
//! unreadable file) is reported as "not found". Only store failures are errors.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use crate::Result;
use crate::config::{ResourceConfig, TemplatesConfig};
use crate::info::TemplateInfo;
use crate::path::{PathResolver, TemplatePathResolver};
use crate::query::{Dialect, RowFetcher};
use crate::row::TemplateRow;
use crate::storage::TemplateStore;

/// Scheme the host engine registers this resource under (`db:name.tpl`)
pub const RESOURCE_SCHEME: &str = "db";

/// Drop a leading `db:` from a template reference, if present
pub fn strip_scheme(reference: &str) -> &str {
    reference
        .strip_prefix(RESOURCE_SCHEME)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(reference)
}

/// Anything that can turn an identifier into template source
pub trait TemplateSource {
    fn resolve(&self, identifier: &str) -> Result<TemplateInfo>;

    /// `(source, mtime)` pair, the shape resource hooks fill in
    fn fetch(&self, identifier: &str) -> Result<(Option<String>, Option<i64>)> {
        Ok(self.resolve(identifier)?.into_parts())
    }
}

impl<T: TemplateSource + ?Sized> TemplateSource for Box<T> {
    fn resolve(&self, identifier: &str) -> Result<TemplateInfo> {
        (**self).resolve(identifier)
    }
}

/// How a fetched row is turned into content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Set-specific override, content stored in the row
    Override,
    /// Default-set catalog entry, content lives on disk
    FileBacked,
}

/// Template resource backed by a relational store with filesystem fallback
pub struct DatabaseResource<S> {
    store: S,
    templates: TemplatesConfig,
    dialect: Dialect,
    fetcher: RowFetcher,
    path_resolver: Box<dyn PathResolver>,
}

impl<S: TemplateStore> DatabaseResource<S> {
    /// Create a resource, picking the query dialect from the store's driver
    pub fn new(
        store: S,
        templates: TemplatesConfig,
        path_resolver: impl PathResolver + 'static,
    ) -> Result<Self> {
        templates.validate()?;
        let dialect = Dialect::from_driver_name(store.driver_name());
        let fetcher = RowFetcher::new(dialect, &templates);

        Ok(Self {
            store,
            templates,
            dialect,
            fetcher,
            path_resolver: Box::new(path_resolver),
        })
    }

    /// Create a resource from a full config, using the default path resolver
    pub fn from_config(store: S, config: &ResourceConfig) -> Result<Self> {
        let resolver = TemplatePathResolver::with_column(
            config.files.base_path.clone(),
            config.files.file_column.clone(),
        );
        let resource = Self::new(store, config.templates.clone(), resolver)?;
        Ok(match config.database.dialect {
            Some(dialect) => resource.with_dialect(dialect),
            None => resource,
        })
    }

    /// Override the detected dialect
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self.fetcher = RowFetcher::new(dialect, &self.templates);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn templates(&self) -> &TemplatesConfig {
        &self.templates
    }

    /// The ranked SELECT this resource runs
    pub fn sql(&self) -> &str {
        self.fetcher.sql()
    }

    /// Decide how a row is served. A missing or non-text set column can never
    /// equal the default set, so such rows are treated as overrides.
    pub fn classify(&self, row: &TemplateRow) -> RowKind {
        match row.text(&self.templates.set_column) {
            Some(set) if set == self.templates.default_tplset => RowKind::FileBacked,
            _ => RowKind::Override,
        }
    }

    fn override_info(&self, row: &TemplateRow) -> TemplateInfo {
        TemplateInfo::new(
            row.text(&self.templates.source_column).map(str::to_string),
            row.integer(&self.templates.modified_column),
        )
    }

    fn file_info(&self, identifier: &str, row: &TemplateRow) -> TemplateInfo {
        let Some(path) = self.path_resolver.resolve_path(row) else {
            tracing::debug!(identifier, "no usable file path for default-set row");
            return TemplateInfo::not_found();
        };

        match read_template_file(&path) {
            Ok(info) => info,
            Err(e) => {
                tracing::debug!(identifier, path = %path.display(), error = %e, "template file not readable");
                TemplateInfo::not_found()
            }
        }
    }
}

impl<S: TemplateStore> TemplateSource for DatabaseResource<S> {
    fn resolve(&self, identifier: &str) -> Result<TemplateInfo> {
        let Some(row) = self.fetcher.fetch(&self.store, identifier)? else {
            tracing::debug!(identifier, "no template row");
            return Ok(TemplateInfo::not_found());
        };

        let kind = self.classify(&row);
        tracing::debug!(identifier, ?kind, "template row fetched");

        Ok(match kind {
            RowKind::Override => self.override_info(&row),
            RowKind::FileBacked => self.file_info(identifier, &row),
        })
    }
}

/// Read a template file and its modification time. Only regular files count.
fn read_template_file(path: &Path) -> io::Result<TemplateInfo> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
    }

    // decoded like store text: invalid UTF-8 sequences become U+FFFD
    let bytes = fs::read(path)?;
    let source = String::from_utf8_lossy(&bytes).into_owned();
    let mtime = unix_seconds(metadata.modified()?);

    Ok(TemplateInfo::found(source, mtime))
}

/// Seconds since the Unix epoch, negative for earlier times
pub(crate) fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}
