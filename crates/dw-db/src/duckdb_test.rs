use super::*;

#[tokio::test]
async fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
    assert!(db.supports_transactional_ddl());
}

#[tokio::test]
async fn test_new_memory_alias() {
    let db = DuckDbBackend::new(":memory:").unwrap();
    db.execute_batch("CREATE TABLE t (id INT)").await.unwrap();
    assert!(db.relation_exists("t").await.unwrap());
}

#[tokio::test]
async fn test_execute_batch() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE t1 (id INT); CREATE TABLE t2 (id INT); INSERT INTO t1 VALUES (1);",
    )
    .await
    .unwrap();

    assert!(db.relation_exists("t1").await.unwrap());
    assert!(db.relation_exists("t2").await.unwrap());
}

#[tokio::test]
async fn test_execute_returns_affected_rows() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE nums AS SELECT * FROM range(5) t(n)")
        .await
        .unwrap();

    let affected = db.execute("DELETE FROM nums WHERE n < 3").await.unwrap();
    assert_eq!(affected, 3);
}

#[tokio::test]
async fn test_execute_error_is_reported() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.execute("SELEC 1").await.unwrap_err();
    assert!(matches!(err, DbError::ExecutionError(_)));
}

#[tokio::test]
async fn test_relation_not_exists() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(!db.relation_exists("nonexistent").await.unwrap());
}

#[tokio::test]
async fn test_relation_exists_schema_qualified() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE SCHEMA ops; CREATE TABLE ops.versions (v BIGINT)")
        .await
        .unwrap();

    assert!(db.relation_exists("ops.versions").await.unwrap());
    assert!(!db.relation_exists("versions").await.unwrap());
}

#[tokio::test]
async fn test_query_rows_text_and_nulls() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE people (name VARCHAR, age INTEGER);
         INSERT INTO people VALUES ('ada', 36), (NULL, NULL);",
    )
    .await
    .unwrap();

    let result = db
        .query_rows("SELECT name, age FROM people ORDER BY age NULLS LAST")
        .await
        .unwrap();

    assert_eq!(result.columns, vec!["name", "age"]);
    assert_eq!(result.len(), 2);
    assert_eq!(result.value(0, 0), Some("ada"));
    assert_eq!(result.value(0, 1), Some("36"));
    assert_eq!(result.value(1, 0), None);
    assert_eq!(result.value(1, 1), None);
    assert_eq!(result.value(5, 0), None);
}

#[tokio::test]
async fn test_query_rows_empty() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE empty_t (id INT)").await.unwrap();

    let result = db.query_rows("SELECT id FROM empty_t").await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_rollback_discards_ddl() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.begin().await.unwrap();
    db.execute_batch("CREATE TABLE scratch (id INT)").await.unwrap();
    db.rollback().await.unwrap();

    assert!(!db.relation_exists("scratch").await.unwrap());
}

#[tokio::test]
async fn test_commit_keeps_ddl() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.begin().await.unwrap();
    db.execute_batch("CREATE TABLE kept (id INT)").await.unwrap();
    db.commit().await.unwrap();

    assert!(db.relation_exists("kept").await.unwrap());
}

#[tokio::test]
async fn test_failed_statement_then_rollback() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.begin().await.unwrap();
    db.execute_batch("CREATE TABLE partial (id INT)").await.unwrap();
    assert!(db.execute_batch("INSERT INTO missing VALUES (1)").await.is_err());
    db.rollback().await.unwrap();

    assert!(!db.relation_exists("partial").await.unwrap());
}

#[tokio::test]
async fn test_commit_without_transaction_fails() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.commit().await.unwrap_err();
    assert!(matches!(err, DbError::TransactionError(_)));
}

#[tokio::test]
async fn test_file_backed_persists() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("persist.duckdb");

    {
        let db = DuckDbBackend::from_path(&path).unwrap();
        db.execute_batch("CREATE TABLE durable (id INT)").await.unwrap();
    }

    let reopened = DuckDbBackend::new(path.to_str().unwrap()).unwrap();
    assert!(reopened.relation_exists("durable").await.unwrap());
}

#[tokio::test]
async fn test_read_only_reads_but_rejects_writes() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("shared.duckdb");

    {
        let db = DuckDbBackend::from_path(&path).unwrap();
        db.execute_batch("CREATE TABLE shared (id INT); INSERT INTO shared VALUES (1)")
            .await
            .unwrap();
    }

    let reader = DuckDbBackend::read_only(&path).unwrap();
    let rows = reader.query_rows("SELECT id FROM shared").await.unwrap();
    assert_eq!(rows.value(0, 0), Some("1"));
    assert!(reader.execute("INSERT INTO shared VALUES (2)").await.is_err());
}

#[test]
fn test_read_only_missing_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("absent.duckdb");

    let err = DuckDbBackend::read_only(&path).err().unwrap();
    assert!(matches!(err, DbError::ConnectionError(_)));
    assert!(!path.exists());
}
