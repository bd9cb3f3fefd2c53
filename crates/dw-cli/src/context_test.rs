use super::*;
use std::fs;
use tempfile::TempDir;

fn global(project_dir: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: project_dir.display().to_string(),
        config: None,
        database: None,
        migrations: None,
    }
}

#[test]
fn test_defaults_without_config_file() {
    let dir = TempDir::new().unwrap();
    let ctx = RuntimeContext::new(&global(dir.path())).unwrap();

    assert_eq!(ctx.migrations_dir(), dir.path().join("migrations"));
    assert_eq!(ctx.config.migrations.table, "schema_migrations");
}

#[test]
fn test_cli_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("driftwood.yml"),
        "database:\n  path: app.duckdb\nmigrations:\n  dir: sql\n",
    )
    .unwrap();

    let mut args = global(dir.path());
    let ctx = RuntimeContext::new(&args).unwrap();
    assert_eq!(ctx.migrations_dir(), dir.path().join("sql"));
    assert_eq!(ctx.config.database.path, "app.duckdb");

    args.database = Some(":memory:".to_string());
    args.migrations = Some("db/migrations".to_string());
    let ctx = RuntimeContext::new(&args).unwrap();
    assert_eq!(ctx.config.database.path, ":memory:");
    assert_eq!(ctx.migrations_dir(), dir.path().join("db/migrations"));
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    let mut args = global(dir.path());
    args.config = Some(dir.path().join("missing.yml").display().to_string());

    assert!(RuntimeContext::new(&args).is_err());
}

#[tokio::test]
async fn test_connect_and_load_catalog() {
    let dir = TempDir::new().unwrap();
    let migrations = dir.path().join("migrations");
    fs::create_dir(&migrations).unwrap();
    fs::write(migrations.join("1_init.up.sql"), "CREATE TABLE t (id INT);").unwrap();
    fs::write(migrations.join("1_init.down.sql"), "DROP TABLE t;").unwrap();

    let mut args = global(dir.path());
    args.database = Some(":memory:".to_string());
    let ctx = RuntimeContext::new(&args).unwrap();

    let catalog = ctx.catalog().unwrap();
    assert_eq!(catalog.len(), 1);

    let db = ctx.connect().unwrap();
    let store = ctx.store(db).unwrap();
    assert_eq!(store.current().await.unwrap().version, None);
}

#[test]
fn test_missing_migrations_dir_is_error() {
    let dir = TempDir::new().unwrap();
    let ctx = RuntimeContext::new(&global(dir.path())).unwrap();
    assert!(ctx.catalog().is_err());
}

#[tokio::test]
async fn test_read_only_connection_needs_existing_file() {
    let dir = TempDir::new().unwrap();
    let mut args = global(dir.path());
    args.database = Some("app.duckdb".to_string());
    let ctx = RuntimeContext::new(&args).unwrap();

    assert!(ctx.connect_read_only().is_err());

    let writer = ctx.connect().unwrap();
    writer.execute_batch("CREATE TABLE t (id INT)").await.unwrap();
    drop(writer);

    let reader = ctx.connect_read_only().unwrap();
    assert!(reader.relation_exists("t").await.unwrap());
    assert!(reader.execute_batch("CREATE TABLE u (id INT)").await.is_err());
}
