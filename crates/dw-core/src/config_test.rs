use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_empty_config_uses_defaults() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config.database.path, "driftwood.duckdb");
    assert_eq!(config.migrations.dir, "migrations");
    assert_eq!(config.migrations.table, "schema_migrations");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8081);
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
database:
  path: "./warehouse.duckdb"
migrations:
  dir: db/migrations
  table: ops.schema_version
server:
  host: 0.0.0.0
  port: 9000
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    config.validate().unwrap();
    assert_eq!(config.database.path, "./warehouse.duckdb");
    assert_eq!(config.migrations.dir, "db/migrations");
    assert_eq!(config.migrations.table, "ops.schema_version");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9000);
}

#[test]
fn test_unknown_fields_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("databse:\n  path: x.duckdb\n");
    assert!(result.is_err());
}

#[test]
fn test_validate_rejects_bad_table_name() {
    let config: Config =
        serde_yaml::from_str("migrations:\n  table: \"versions; DROP TABLE users\"\n").unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_validate_rejects_empty_database_path() {
    let config: Config = serde_yaml::from_str("database:\n  path: \"\"\n").unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_table_name_rules() {
    assert!(is_valid_table_name("schema_migrations"));
    assert!(is_valid_table_name("ops.versions"));
    assert!(is_valid_table_name("_private"));
    assert!(!is_valid_table_name(""));
    assert!(!is_valid_table_name("1table"));
    assert!(!is_valid_table_name("a.b.c"));
    assert!(!is_valid_table_name("a-b"));
    assert!(!is_valid_table_name("ops."));
}

#[test]
fn test_load_from_dir_missing() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_or_default_without_file() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_or_default(dir.path()).unwrap();
    assert_eq!(config.migrations.dir, "migrations");
}

#[test]
fn test_load_from_dir_prefers_yml() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("driftwood.yml"),
        "migrations:\n  dir: from_yml\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("driftwood.yaml"),
        "migrations:\n  dir: from_yaml\n",
    )
    .unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.migrations.dir, "from_yml");
}

#[test]
fn test_load_reports_parse_errors() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("driftwood.yml"), "server:\n  port: not-a-port\n").unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::YamlParse(_)));
}

#[test]
fn test_path_resolution() {
    let config = Config::default();
    let root = Path::new("/srv/app");
    assert_eq!(
        config.migrations_dir_absolute(root),
        PathBuf::from("/srv/app/migrations")
    );
    assert_eq!(
        config.database_path_absolute(root),
        "/srv/app/driftwood.duckdb"
    );

    let mut in_memory = Config::default();
    in_memory.database.path = ":memory:".to_string();
    assert_eq!(in_memory.database_path_absolute(root), ":memory:");
}
