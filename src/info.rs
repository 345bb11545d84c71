//! Resolved template data handed back to the host engine

use serde::{Deserialize, Serialize};

/// Source text and modification time of a resolved template.
///
/// Both fields `None` means the template was not found. The value is immutable
/// once built; callers read it through accessors or take it apart with
/// [`TemplateInfo::into_parts`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateInfo {
    source: Option<String>,
    mtime: Option<i64>,
}

impl TemplateInfo {
    pub fn new(source: Option<String>, mtime: Option<i64>) -> Self {
        Self { source, mtime }
    }

    /// The "not found" value
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Template content with a known modification time
    pub fn found(source: impl Into<String>, mtime: i64) -> Self {
        Self {
            source: Some(source.into()),
            mtime: Some(mtime),
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn mtime(&self) -> Option<i64> {
        self.mtime
    }

    pub fn is_not_found(&self) -> bool {
        self.source.is_none() && self.mtime.is_none()
    }

    /// `(source, mtime)` in the shape resource hooks expect
    pub fn into_parts(self) -> (Option<String>, Option<i64>) {
        (self.source, self.mtime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found() {
        let info = TemplateInfo::not_found();
        assert!(info.is_not_found());
        assert_eq!(info.into_parts(), (None, None));
    }

    #[test]
    fn test_empty_source_is_found() {
        let info = TemplateInfo::found("", 10);
        assert!(!info.is_not_found());
        assert_eq!(info.source(), Some(""));
        assert_eq!(info.mtime(), Some(10));
    }

    #[test]
    fn test_partial_row_is_not_not_found() {
        // an override row may carry a null mtime; that is still a hit
        let info = TemplateInfo::new(Some("X".into()), None);
        assert!(!info.is_not_found());
    }
}
