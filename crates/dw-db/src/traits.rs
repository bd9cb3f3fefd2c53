//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Rows returned by [`Database::query_rows`], every value coerced to text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// Column names from the result set.
    pub columns: Vec<String>,
    /// Rows of string-coerced values; `None` is SQL `NULL`.
    pub rows: Vec<Vec<Option<String>>>,
}

impl QueryResult {
    /// Number of rows returned.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the query returned no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at `(row, col)`, flattening out-of-range and `NULL` to `None`.
    pub fn value(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|v| v.as_deref())
    }
}

/// Database abstraction trait for Driftwood
///
/// Implementations must be Send + Sync for async operation. A single
/// implementation owns one logical connection: `begin`/`commit`/`rollback`
/// scope every statement issued in between.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute SQL that modifies data, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Run a query and collect every row, values coerced to text
    async fn query_rows(&self, sql: &str) -> DbResult<QueryResult>;

    /// Open an explicit transaction
    async fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    async fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    async fn rollback(&self) -> DbResult<()>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Whether DDL statements participate in transactions.
    ///
    /// When false, a failed script may leave its earlier statements applied.
    fn supports_transactional_ddl(&self) -> bool;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
