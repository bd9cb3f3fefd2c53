//! Version store: the single persisted `{version, dirty}` record.
//!
//! The record lives in a one-row table inside the target database. A `NULL`
//! version means nothing has been applied yet.

use crate::error::{StoreError, StoreResult};
use dw_core::config::is_valid_table_name;
use dw_core::Version;
use dw_db::{Database, DbError};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Persisted schema state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchemaVersion {
    /// Last fully applied version, `None` when nothing has been applied
    pub version: Option<Version>,
    /// A step started but never confirmed completion
    pub dirty: bool,
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Some(v) => write!(f, "{v}")?,
            None => write!(f, "none")?,
        }
        if self.dirty {
            write!(f, " (dirty)")?;
        }
        Ok(())
    }
}

/// Reads and writes the schema version record.
#[derive(Clone)]
pub struct VersionStore {
    db: Arc<dyn Database>,
    table: String,
}

impl VersionStore {
    /// Create a store backed by `table` in `db`.
    ///
    /// Fails with `InvalidTable` unless the name is a plain identifier,
    /// optionally schema-qualified.
    pub fn new(db: Arc<dyn Database>, table: impl Into<String>) -> StoreResult<Self> {
        let table = table.into();
        if !is_valid_table_name(&table) {
            return Err(StoreError::InvalidTable(table));
        }
        Ok(Self { db, table })
    }

    /// Name of the backing table
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the table and seed its single row if missing.
    pub async fn ensure(&self) -> StoreResult<()> {
        let setup = |source: DbError| StoreError::Setup {
            table: self.table.clone(),
            source,
        };

        if let Some((schema, _)) = self.table.split_once('.') {
            self.db
                .execute_batch(&format!("CREATE SCHEMA IF NOT EXISTS {schema}"))
                .await
                .map_err(setup)?;
        }

        self.db
            .execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {} (version BIGINT, dirty BOOLEAN NOT NULL DEFAULT false)",
                self.table
            ))
            .await
            .map_err(setup)?;

        let count = self
            .db
            .query_rows(&format!("SELECT COUNT(*) FROM {}", self.table))
            .await
            .map_err(setup)?;
        if count.value(0, 0) == Some("0") {
            log::debug!("Seeding version table {}", self.table);
            self.db
                .execute(&format!(
                    "INSERT INTO {} (version, dirty) VALUES (NULL, false)",
                    self.table
                ))
                .await
                .map_err(setup)?;
        }
        Ok(())
    }

    /// Read the current record.
    ///
    /// A missing table reads as nothing applied and clean; it is not created.
    pub async fn current(&self) -> StoreResult<SchemaVersion> {
        let read = |source: DbError| StoreError::Read {
            table: self.table.clone(),
            source,
        };

        if !self.db.relation_exists(&self.table).await.map_err(read)? {
            return Ok(SchemaVersion::default());
        }

        let result = self
            .db
            .query_rows(&format!(
                "SELECT CAST(version AS VARCHAR), CAST(dirty AS VARCHAR) FROM {}",
                self.table
            ))
            .await
            .map_err(read)?;

        match result.len() {
            0 => Ok(SchemaVersion::default()),
            1 => Ok(SchemaVersion {
                version: self.parse_version(result.value(0, 0))?,
                dirty: self.parse_dirty(result.value(0, 1))?,
            }),
            n => Err(self.corrupt(format!("expected one row, found {n}"))),
        }
    }

    /// Flag that a step is in flight.
    pub async fn mark_dirty(&self) -> StoreResult<()> {
        self.update("dirty = true").await
    }

    /// Confirm the in-flight step completed.
    pub async fn clear_dirty(&self) -> StoreResult<()> {
        self.update("dirty = false").await
    }

    /// Record `version` as the applied version, leaving the dirty flag alone.
    pub async fn set_version(&self, version: Option<Version>) -> StoreResult<()> {
        let literal = self.version_literal(version)?;
        self.update(&format!("version = {literal}")).await
    }

    /// Set the version and clear the dirty flag in one statement.
    ///
    /// Operator recovery after a failed step; runs no scripts.
    pub async fn force(&self, version: Option<Version>) -> StoreResult<()> {
        self.ensure().await?;
        let literal = self.version_literal(version)?;
        self.update(&format!("version = {literal}, dirty = false"))
            .await
    }

    async fn update(&self, assignments: &str) -> StoreResult<()> {
        let affected = self
            .db
            .execute(&format!("UPDATE {} SET {assignments}", self.table))
            .await
            .map_err(|source| StoreError::Write {
                table: self.table.clone(),
                source,
            })?;
        if affected != 1 {
            return Err(self.corrupt(format!("expected to update one row, updated {affected}")));
        }
        Ok(())
    }

    fn version_literal(&self, version: Option<Version>) -> StoreResult<String> {
        match version {
            None => Ok("NULL".to_string()),
            Some(v) => v
                .to_i64()
                .map(|n| n.to_string())
                .ok_or_else(|| self.corrupt(format!("version {v} does not fit in BIGINT"))),
        }
    }

    fn parse_version(&self, raw: Option<&str>) -> StoreResult<Option<Version>> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        let n: i64 = raw
            .trim()
            .parse()
            .map_err(|_| self.corrupt(format!("unreadable version '{raw}'")))?;
        if n == 0 {
            return Ok(None);
        }
        Version::try_from(n)
            .map(Some)
            .map_err(|_| self.corrupt(format!("negative version {n}")))
    }

    fn parse_dirty(&self, raw: Option<&str>) -> StoreResult<bool> {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("true") | Some("1") => Ok(true),
            Some("false") | Some("0") => Ok(false),
            other => Err(self.corrupt(format!("unreadable dirty flag {other:?}"))),
        }
    }

    fn corrupt(&self, reason: String) -> StoreError {
        StoreError::Corrupt {
            table: self.table.clone(),
            reason,
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
