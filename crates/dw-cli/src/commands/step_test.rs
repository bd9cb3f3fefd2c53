use super::*;
use crate::cli::{Cli, Commands};
use clap::Parser;
use dw_db::{Database, DuckDbBackend};
use dw_migrate::VersionStore;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project_with_two_migrations() -> TempDir {
    let dir = TempDir::new().unwrap();
    let migrations = dir.path().join("migrations");
    fs::create_dir(&migrations).unwrap();
    fs::write(migrations.join("1_users.up.sql"), "CREATE TABLE users (id INTEGER);").unwrap();
    fs::write(migrations.join("1_users.down.sql"), "DROP TABLE users;").unwrap();
    fs::write(migrations.join("2_orders.up.sql"), "CREATE TABLE orders (id INTEGER);").unwrap();
    fs::write(migrations.join("2_orders.down.sql"), "DROP TABLE orders;").unwrap();
    dir
}

fn parse(project: &Path, db_path: &Path, rest: &[&str]) -> Result<Cli, clap::Error> {
    let mut argv = vec![
        "dw".to_string(),
        "-p".to_string(),
        project.display().to_string(),
        "-d".to_string(),
        db_path.display().to_string(),
    ];
    argv.extend(rest.iter().map(|s| s.to_string()));
    Cli::try_parse_from(argv)
}

#[test]
fn test_zero_steps_never_opens_database() {
    let project = project_with_two_migrations();
    let db_path = project.path().join("app.duckdb");

    for command in ["up", "down"] {
        assert!(parse(project.path(), &db_path, &[command, "0"]).is_err());
    }
    assert!(!db_path.exists());
}

#[tokio::test]
async fn test_up_then_down_through_command() {
    let project = project_with_two_migrations();
    let db_path = project.path().join("app.duckdb");

    let cli = parse(project.path(), &db_path, &["up", "2", "--output", "json"]).unwrap();
    let Commands::Up(args) = &cli.command else {
        panic!("expected up");
    };
    execute(Direction::Up, args, &cli.global).await.unwrap();

    let cli = parse(project.path(), &db_path, &["down"]).unwrap();
    let Commands::Down(args) = &cli.command else {
        panic!("expected down");
    };
    execute(Direction::Down, args, &cli.global).await.unwrap();

    let db: Arc<dyn Database> = Arc::new(DuckDbBackend::from_path(&db_path).unwrap());
    let state = VersionStore::new(db.clone(), "schema_migrations")
        .unwrap()
        .current()
        .await
        .unwrap();
    assert_eq!(state.version.map(|v| v.get()), Some(1));
    assert!(!state.dirty);
    assert!(db.relation_exists("users").await.unwrap());
    assert!(!db.relation_exists("orders").await.unwrap());
}
