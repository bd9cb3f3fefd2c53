//! Error types for the migration engine

use dw_core::version::display_version;
use dw_core::{Direction, Version};
use dw_db::DbError;
use thiserror::Error;

/// Problems with the set of migration scripts.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// C001: Migration directory or script could not be read
    #[error("[C001] Cannot read migration source '{path}': {source}")]
    SourceUnreadable {
        path: String,
        source: std::io::Error,
    },

    /// C002: Script file name does not start with a valid version
    #[error("[C002] Invalid migration file name '{file}': {reason}")]
    InvalidFileName { file: String, reason: String },

    /// C003: Two scripts claim the same version and direction
    #[error("[C003] Duplicate {direction} migration for version {version}: '{first}' and '{second}'")]
    DuplicateVersion {
        version: Version,
        direction: Direction,
        first: String,
        second: String,
    },

    /// C004: A version has only one half of its up/down pair
    #[error("[C004] Migration {version} has no {missing} script")]
    MissingPair { version: Version, missing: Direction },

    /// C005: The database records a version the catalog does not know
    #[error("[C005] Applied version {version} is not present in the migration catalog")]
    AppliedVersionMissing { version: Version },

    /// C006: A new script file could not be written
    #[error("[C006] Failed to write migration file '{path}': {source}")]
    WriteFailed {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Problems reading or writing the persisted schema version.
#[derive(Error, Debug)]
pub enum StoreError {
    /// S001: Version table name is not a plain identifier
    #[error("[S001] Invalid version table name '{0}'")]
    InvalidTable(String),

    /// S002: Version table could not be created or seeded
    #[error("[S002] Failed to prepare version table '{table}': {source}")]
    Setup {
        table: String,
        #[source]
        source: DbError,
    },

    /// S003: Version record could not be read
    #[error("[S003] Failed to read schema version from '{table}': {source}")]
    Read {
        table: String,
        #[source]
        source: DbError,
    },

    /// S004: Version record could not be written
    #[error("[S004] Failed to write schema version to '{table}': {source}")]
    Write {
        table: String,
        #[source]
        source: DbError,
    },

    /// S005: Version table content breaks the single-row invariant
    #[error("[S005] Version table '{table}' is corrupt: {reason}")]
    Corrupt { table: String, reason: String },
}

/// Result type alias for StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a stepper run.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// M001: Malformed or inconsistent migration set
    #[error("[M001] {0}")]
    Catalog(#[from] CatalogError),

    /// M002: Version record unavailable
    #[error("[M002] {0}")]
    Store(#[from] StoreError),

    /// M003: A previous run did not confirm completion
    #[error(
        "[M003] Database is dirty at version {}: a previous migration did not complete. Repair the schema by hand, then run `dw force <version>`",
        version_label(.version)
    )]
    DirtyState { version: Option<Version> },

    /// M004: Caller passed an unusable argument
    #[error("[M004] Invalid argument: {0}")]
    InvalidArgument(String),

    /// M005: A script's statements failed
    #[error("[M005] Migration {version} ({direction}) failed: {source}")]
    ScriptExecution {
        version: Version,
        direction: Direction,
        #[source]
        source: DbError,
    },
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;

fn version_label(version: &Option<Version>) -> String {
    display_version(*version)
}
