//! tplresource CLI - resolve templates the way a host engine would

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tplresource::cache::{CachedResource, MemoryCache};
use tplresource::config::{self, ResourceConfig};
use tplresource::output::{emit_json, OutputMode};
use tplresource::resource::{strip_scheme, DatabaseResource, TemplateSource};
use tplresource::storage::SqliteStore;
use tplresource::ui::{self, Icons};
use tplresource::Dialect;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "tplresource")]
#[command(version)]
#[command(about = "Resolve templates from a database with filesystem fallback")]
#[command(long_about = r#"
tplresource looks templates up in a relational table, preferring rows of the
requested template set over the default set. Default-set rows point at files
under a base directory; other rows carry their source inline.

Example usage:
  tplresource init
  tplresource resolve db:header.tpl --set dark
  tplresource query --dialect mysql
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one or more templates
    Resolve {
        /// Template identifiers, optionally prefixed with `db:`
        #[arg(required = true)]
        identifiers: Vec<String>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Requested template set
        #[arg(short, long)]
        set: Option<String>,

        /// Base directory for file-backed templates
        #[arg(short, long)]
        base_path: Option<PathBuf>,

        /// Query dialect (sqlite, mysql)
        #[arg(long)]
        dialect: Option<Dialect>,

        /// Emit JSON lines instead of human output
        #[arg(long)]
        json: bool,

        /// Bypass the result cache even if enabled in config
        #[arg(long)]
        no_cache: bool,
    },

    /// Print the ranked SELECT for the configured table
    Query {
        /// Query dialect (sqlite, mysql); defaults to the configured one, then sqlite
        #[arg(long)]
        dialect: Option<Dialect>,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);

    match cli.command {
        Commands::Resolve { identifiers, database, set, base_path, dialect, json, no_cache } => {
            let mut config = config::load_config(Some(&config_path))?.unwrap_or_default();
            if let Some(database) = database {
                config.database.path = database;
            }
            if let Some(set) = set {
                config.templates.tplset = set;
            }
            if let Some(base_path) = base_path {
                config.files.base_path = base_path;
            }
            if dialect.is_some() {
                config.database.dialect = dialect;
            }
            if no_cache {
                config.cache.enabled = false;
            }

            let output_mode = OutputMode::from_json_flag(json);
            let source = open_source(&config)?;
            for reference in &identifiers {
                resolve_one(source.as_ref(), reference, output_mode)?;
            }
        }

        Commands::Query { dialect } => {
            let config = config::load_config(Some(&config_path))?.unwrap_or_default();
            let templates = &config.templates;
            templates.validate()?;
            let dialect = config.database.query_dialect(dialect);
            println!("{}", dialect.select_query(&templates.table, &templates.name_column, &templates.set_column));
        }

        Commands::Init { force } => {
            let defaults = ResourceConfig::default();
            config::write_config(&config_path, &defaults, force)?;
            ui::success(&format!("Wrote {}", config_path.display()));
        }
    }

    Ok(())
}

/// Build the resource described by `config`, behind a cache when enabled
fn open_source(config: &ResourceConfig) -> anyhow::Result<Box<dyn TemplateSource>> {
    tracing::info!("Opening template store {}", config.database.path.display());
    if !config.database.path.exists() {
        anyhow::bail!("database not found: {}", config.database.path.display());
    }

    let store = SqliteStore::open(&config.database.path)?;
    let resource = DatabaseResource::from_config(store, config)?;

    if !config.cache.enabled {
        return Ok(Box::new(resource));
    }

    let backend = match config.cache.ttl_secs {
        Some(secs) => MemoryCache::with_ttl(Duration::from_secs(secs)),
        None => MemoryCache::new(),
    };
    Ok(Box::new(CachedResource::new(resource, backend)))
}

fn resolve_one(source: &dyn TemplateSource, reference: &str, output_mode: OutputMode) -> anyhow::Result<()> {
    let identifier = strip_scheme(reference);
    let info = match source.resolve(identifier) {
        Ok(info) => info,
        Err(e) => {
            ui::error(&format!("Failed to resolve {}: {}", identifier, e));
            return Err(e.into());
        }
    };

    if !output_mode.is_human() {
        let data = serde_json::json!({
            "identifier": identifier,
            "found": !info.is_not_found(),
            "source": info.source(),
            "mtime": info.mtime(),
        });
        return emit_json(&data);
    }

    if info.is_not_found() {
        ui::not_found(identifier);
        return Ok(());
    }

    ui::header(Icons::FILE, identifier);
    match info.mtime() {
        Some(mtime) => ui::info(&format!("{} mtime", Icons::CLOCK), &mtime.to_string()),
        None => ui::info(&format!("{} mtime", Icons::CLOCK), "unknown"),
    }
    match info.source() {
        Some(text) => ui::source_block(text),
        None => ui::info(&format!("{} source", Icons::DATABASE), "empty"),
    }
    Ok(())
}
