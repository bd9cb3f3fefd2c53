//! Catalog queries against `information_schema`.

use crate::error::IntrospectResult;
use dw_db::{Database, QueryResult};
use serde::Serialize;

const TABLES_SQL: &str = "SELECT table_schema, table_name \
     FROM information_schema.tables \
     WHERE table_schema NOT IN ('pg_catalog', 'information_schema') \
     ORDER BY table_schema, table_name";

const COLUMNS_SQL: &str = "SELECT table_schema, table_name, column_name, data_type, is_nullable \
     FROM information_schema.columns \
     WHERE table_schema NOT IN ('pg_catalog', 'information_schema') \
     ORDER BY table_schema, table_name, ordinal_position";

/// A table and the schema it lives in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    pub schema: String,
    pub table: String,
}

/// One column of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub schema: String,
    pub table: String,
    pub column_name: String,
    pub data_type: String,
    /// `YES` or `NO`, as reported by the catalog
    pub is_nullable: String,
}

/// All user tables, ordered by schema then table name.
pub async fn list_tables(db: &dyn Database) -> IntrospectResult<Vec<TableInfo>> {
    let result = db.query_rows(TABLES_SQL).await?;
    log::debug!("Found {} table(s)", result.len());

    Ok((0..result.len())
        .map(|row| TableInfo {
            schema: text(&result, row, 0),
            table: text(&result, row, 1),
        })
        .collect())
}

/// All user columns, ordered by schema, table and ordinal position.
pub async fn list_columns(db: &dyn Database) -> IntrospectResult<Vec<ColumnInfo>> {
    let result = db.query_rows(COLUMNS_SQL).await?;
    log::debug!("Found {} column(s)", result.len());

    Ok((0..result.len())
        .map(|row| ColumnInfo {
            schema: text(&result, row, 0),
            table: text(&result, row, 1),
            column_name: text(&result, row, 2),
            data_type: text(&result, row, 3),
            is_nullable: text(&result, row, 4),
        })
        .collect())
}

fn text(result: &QueryResult, row: usize, col: usize) -> String {
    result.value(row, col).unwrap_or_default().to_string()
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
