//! Row -> filesystem path resolution for file-backed templates
//!
//! Rows tagged with the default set carry a file name instead of content.
//! The resolver turns that column into a path under a fixed base directory.
//! It never touches the filesystem; existence is checked by the caller.

use std::ffi::OsString;
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};
use crate::config::DEFAULT_FILE_COLUMN;
use crate::row::TemplateRow;

/// Strategy mapping a fetched row to the file that holds its content
pub trait PathResolver: Send + Sync {
    fn resolve_path(&self, row: &TemplateRow) -> Option<PathBuf>;
}

impl<F> PathResolver for F
where
    F: Fn(&TemplateRow) -> Option<PathBuf> + Send + Sync,
{
    fn resolve_path(&self, row: &TemplateRow) -> Option<PathBuf> {
        self(row)
    }
}

/// Resolves the file column of a row against a base directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePathResolver {
    base_path: PathBuf,
    file_column: String,
}

impl TemplatePathResolver {
    /// Resolver reading the conventional `tpl_file` column
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self::with_column(base_path, DEFAULT_FILE_COLUMN)
    }

    pub fn with_column(base_path: impl Into<PathBuf>, file_column: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            file_column: file_column.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn file_column(&self) -> &str {
        &self.file_column
    }
}

impl PathResolver for TemplatePathResolver {
    fn resolve_path(&self, row: &TemplateRow) -> Option<PathBuf> {
        let file = row.text(&self.file_column)?;
        let relative = sanitize_relative(file)?;

        let mut joined = OsString::from(self.base_path.as_os_str());
        joined.push(MAIN_SEPARATOR_STR);
        joined.push(&relative);
        Some(PathBuf::from(joined))
    }
}

/// Normalize a stored file name into a relative path that cannot climb out of
/// its base directory.
///
/// Backslashes become `/`, every `..` is removed wherever it occurs, and
/// leading slashes are dropped. Returns `None` if nothing usable is left,
/// which includes a bare `"0"`.
pub fn sanitize_relative(file: &str) -> Option<String> {
    let normalized = file.replace('\\', "/").replace("..", "");
    let trimmed = normalized.trim_start_matches('/');
    if trimmed.is_empty() || trimmed == "0" {
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Component;
    use crate::row::Value;

    const BASE: &str = "/path/to/templates";

    fn expected(relative: &str) -> PathBuf {
        PathBuf::from(format!("{}{}{}", BASE, MAIN_SEPARATOR_STR, relative))
    }

    fn resolve(file: impl Into<Value>) -> Option<PathBuf> {
        let row = TemplateRow::new().with("tpl_file", file);
        TemplatePathResolver::new(BASE).resolve_path(&row)
    }

    #[test]
    fn test_plain_file() {
        assert_eq!(resolve("header.tpl"), Some(expected("header.tpl")));
    }

    #[test]
    fn test_nested_file() {
        assert_eq!(resolve("layouts/main.tpl"), Some(expected("layouts/main.tpl")));
    }

    #[test]
    fn test_unusable_column_values() {
        assert_eq!(resolve(""), None);
        assert_eq!(resolve(Value::Null), None);
        assert_eq!(resolve(123i64), None);
        assert_eq!(resolve(Value::Blob(b"a.tpl".to_vec())), None);

        let row = TemplateRow::new().with("other_column", "value");
        assert_eq!(TemplatePathResolver::new(BASE).resolve_path(&row), None);
    }

    #[test]
    fn test_traversal_is_stripped() {
        assert_eq!(resolve("../../../etc/passwd"), Some(expected("etc/passwd")));
        assert_eq!(resolve("a/../../b.tpl"), Some(expected("a///b.tpl")));
        assert_eq!(resolve("....//x.tpl"), Some(expected("x.tpl")));
    }

    #[test]
    fn test_backslashes_normalized() {
        assert_eq!(
            resolve("layouts\\admin\\dashboard.tpl"),
            Some(expected("layouts/admin/dashboard.tpl"))
        );
        assert_eq!(resolve("..\\..\\secret.tpl"), Some(expected("secret.tpl")));
    }

    #[test]
    fn test_leading_slash_trimmed() {
        assert_eq!(resolve("/templates/header.tpl"), Some(expected("templates/header.tpl")));
        assert_eq!(resolve("///etc/passwd"), Some(expected("etc/passwd")));
    }

    #[test]
    fn test_nothing_left_after_sanitizing() {
        assert_eq!(resolve("../.."), None);
        assert_eq!(resolve("/"), None);
        assert_eq!(resolve("..\\..\\"), None);
    }

    #[test]
    fn test_zero_is_not_a_file_name() {
        assert_eq!(resolve("0"), None);
        assert_eq!(resolve("/0"), None);
        assert_eq!(resolve("..0"), None);
        assert_eq!(resolve("00"), Some(expected("00")));
        assert_eq!(resolve("0/a.tpl"), Some(expected("0/a.tpl")));
    }

    #[test]
    fn test_custom_column() {
        let resolver = TemplatePathResolver::with_column(BASE, "custom_file_column");
        let row = TemplateRow::new().with("custom_file_column", "custom.tpl");
        assert_eq!(resolver.resolve_path(&row), Some(expected("custom.tpl")));

        let row = TemplateRow::new().with("tpl_file", "template.tpl");
        assert_eq!(resolver.resolve_path(&row), None);
    }

    #[test]
    fn test_accessors() {
        let resolver = TemplatePathResolver::new(BASE);
        assert_eq!(resolver.base_path(), Path::new(BASE));
        assert_eq!(resolver.file_column(), "tpl_file");
        assert_eq!(TemplatePathResolver::with_column(BASE, "c").file_column(), "c");
    }

    #[test]
    fn test_sanitize_idempotent_and_contained() {
        let inputs = [
            "a.tpl",
            "../a.tpl",
            "...tpl",
            ".../.../x",
            "..../etc",
            "/..\\..//etc\\passwd",
            "a/./b/../c",
            "\\\\server\\share\\x.tpl",
            ". ./.. /x",
        ];

        for input in inputs {
            let Some(once) = sanitize_relative(input) else {
                continue;
            };
            assert_eq!(sanitize_relative(&once).as_deref(), Some(once.as_str()), "{input}");
            assert!(!once.contains(".."), "{input} -> {once}");
            assert!(!once.starts_with('/'), "{input} -> {once}");

            let path = resolve(input).unwrap();
            assert!(path.starts_with(BASE), "{input} -> {}", path.display());
            assert!(
                !path.components().any(|c| c == Component::ParentDir),
                "{input} -> {}",
                path.display()
            );
        }
    }

    #[test]
    fn test_closure_strategy() {
        let resolver = |row: &TemplateRow| row.text("tpl_file").map(|f| PathBuf::from("/data").join(f));
        let row = TemplateRow::new().with("tpl_file", "a.tpl");
        assert_eq!(resolver.resolve_path(&row), Some(PathBuf::from("/data/a.tpl")));
    }
}
