use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::query::Dialect;
use crate::{Error, Result};

pub const DEFAULT_TPLSET: &str = "default";
pub const DEFAULT_FILE_COLUMN: &str = "tpl_file";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ResourceConfig {
    pub database: DatabaseConfig,
    pub templates: TemplatesConfig,
    pub files: FilesConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    /// Forces a query dialect; detected from the store's driver when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("templates.db"),
            dialect: None,
        }
    }
}

impl DatabaseConfig {
    /// Dialect for printing queries without a store: an explicit request wins,
    /// then the configured dialect, then SQLite
    pub fn query_dialect(&self, requested: Option<Dialect>) -> Dialect {
        requested.or(self.dialect).unwrap_or(Dialect::Sqlite)
    }
}

/// Table layout and template-set selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TemplatesConfig {
    pub table: String,
    pub source_column: String,
    pub modified_column: String,
    pub set_column: String,
    pub name_column: String,
    /// Set requested by this resource
    pub tplset: String,
    /// Set whose rows point at files on disk
    pub default_tplset: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            table: "tplfile".to_string(),
            source_column: "tpl_source".to_string(),
            modified_column: "tpl_lastmodified".to_string(),
            set_column: "tpl_tplset".to_string(),
            name_column: DEFAULT_FILE_COLUMN.to_string(),
            tplset: DEFAULT_TPLSET.to_string(),
            default_tplset: DEFAULT_TPLSET.to_string(),
        }
    }
}

impl TemplatesConfig {
    /// Identifiers are interpolated into SQL, so reject anything that could
    /// break out of a backtick-quoted name
    pub fn validate(&self) -> Result<()> {
        let identifiers = [
            ("table", &self.table),
            ("source_column", &self.source_column),
            ("modified_column", &self.modified_column),
            ("set_column", &self.set_column),
            ("name_column", &self.name_column),
        ];

        for (field, value) in identifiers {
            if value.is_empty() {
                return Err(Error::InvalidConfig(format!("{} must not be empty", field)));
            }
            if value.contains('`') || value.contains('\0') {
                return Err(Error::InvalidConfig(format!(
                    "{} contains a forbidden character: {:?}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilesConfig {
    /// Directory that file-backed rows are resolved against
    pub base_path: PathBuf,
    pub file_column: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("templates"),
            file_column: DEFAULT_FILE_COLUMN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_secs: Option<u64>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("tplresource.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<ResourceConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ResourceConfig = toml::from_str(&contents)?;
    config.templates.validate()?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &ResourceConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
