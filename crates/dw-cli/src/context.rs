//! Runtime context for CLI commands

use anyhow::{Context, Result};
use dw_core::Config;
use dw_db::{Database, DuckDbBackend};
use dw_migrate::{Catalog, VersionStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Resolved configuration and paths for one invocation
pub struct RuntimeContext {
    /// Loaded configuration with CLI overrides applied
    pub config: Config,

    /// Project root that relative config paths resolve against
    pub root: PathBuf,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Load configuration from the project directory or an explicit file
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);

        let mut config = match &args.config {
            Some(path) => {
                Config::load(Path::new(path)).context("Failed to load configuration file")?
            }
            None => Config::load_or_default(&root).context("Failed to load project configuration")?,
        };

        if let Some(database) = &args.database {
            config.database.path = database.clone();
        }
        if let Some(migrations) = &args.migrations {
            config.migrations.dir = migrations.clone();
        }
        config.validate().context("Invalid configuration")?;

        Ok(Self {
            config,
            root,
            verbose: args.verbose,
        })
    }

    /// Absolute path of the migrations directory
    pub fn migrations_dir(&self) -> PathBuf {
        self.config.migrations_dir_absolute(&self.root)
    }

    /// Open the configured database
    pub fn connect(&self) -> Result<Arc<dyn Database>> {
        let path = self.config.database_path_absolute(&self.root);
        log::debug!("Opening database {path}");
        let db = DuckDbBackend::new(&path)
            .with_context(|| format!("Failed to connect to database '{path}'"))?;
        Ok(Arc::new(db))
    }

    /// Open the configured database read-only.
    ///
    /// `:memory:` has nothing to share and opens a fresh in-memory database.
    pub fn connect_read_only(&self) -> Result<Arc<dyn Database>> {
        let path = self.config.database_path_absolute(&self.root);
        if path == ":memory:" {
            return self.connect();
        }
        log::debug!("Opening database {path} read-only");
        let db = DuckDbBackend::read_only(Path::new(&path))
            .with_context(|| format!("Failed to open database '{path}' read-only"))?;
        Ok(Arc::new(db))
    }

    /// Load the migration catalog
    pub fn catalog(&self) -> Result<Catalog> {
        let dir = self.migrations_dir();
        Catalog::load(&dir)
            .with_context(|| format!("Failed to load migrations from {}", dir.display()))
    }

    /// Version store over `db` using the configured table
    pub fn store(&self, db: Arc<dyn Database>) -> Result<VersionStore> {
        VersionStore::new(db, self.config.migrations.table.clone())
            .context("Invalid version table")
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
