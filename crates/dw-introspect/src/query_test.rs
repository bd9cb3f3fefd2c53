use super::*;
use dw_db::{DbError, DuckDbBackend};

async fn sample_db() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE SCHEMA sales;
         CREATE TABLE sales.orders (id INTEGER NOT NULL, amount DOUBLE);
         CREATE TABLE users (id INTEGER NOT NULL, name VARCHAR);",
    )
    .await
    .unwrap();
    db
}

#[tokio::test]
async fn test_list_tables_ordered() {
    let db = sample_db().await;
    let tables = list_tables(&db).await.unwrap();

    assert_eq!(
        tables,
        vec![
            TableInfo {
                schema: "main".to_string(),
                table: "users".to_string(),
            },
            TableInfo {
                schema: "sales".to_string(),
                table: "orders".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_list_tables_empty_database() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(list_tables(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_columns_in_ordinal_order() {
    let db = sample_db().await;
    let columns = list_columns(&db).await.unwrap();

    let summary: Vec<(&str, &str, &str, &str)> = columns
        .iter()
        .map(|c| {
            (
                c.table.as_str(),
                c.column_name.as_str(),
                c.data_type.as_str(),
                c.is_nullable.as_str(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("users", "id", "INTEGER", "NO"),
            ("users", "name", "VARCHAR", "YES"),
            ("orders", "id", "INTEGER", "NO"),
            ("orders", "amount", "DOUBLE", "YES"),
        ]
    );
}

/// Rejects every statement.
struct BrokenDb;

#[async_trait::async_trait]
impl Database for BrokenDb {
    async fn execute(&self, _sql: &str) -> dw_db::DbResult<usize> {
        Err(DbError::ConnectionError("closed".to_string()))
    }
    async fn execute_batch(&self, _sql: &str) -> dw_db::DbResult<()> {
        Err(DbError::ConnectionError("closed".to_string()))
    }
    async fn query_rows(&self, _sql: &str) -> dw_db::DbResult<QueryResult> {
        Err(DbError::ConnectionError("closed".to_string()))
    }
    async fn begin(&self) -> dw_db::DbResult<()> {
        Ok(())
    }
    async fn commit(&self) -> dw_db::DbResult<()> {
        Ok(())
    }
    async fn rollback(&self) -> dw_db::DbResult<()> {
        Ok(())
    }
    async fn relation_exists(&self, _name: &str) -> dw_db::DbResult<bool> {
        Ok(false)
    }
    fn supports_transactional_ddl(&self) -> bool {
        false
    }
    fn db_type(&self) -> &'static str {
        "broken"
    }
}

#[tokio::test]
async fn test_query_error_is_reported() {
    let err = list_columns(&BrokenDb).await.unwrap_err();
    assert!(matches!(err, crate::IntrospectError::Query(_)));
    assert!(err.to_string().starts_with("[I001]"));
}
