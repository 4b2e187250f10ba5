use std::io::Write;

use crate::config::{self, AppConfig};

fn write_temp_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_default_config() {
    let config = AppConfig::default();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.max_body_bytes, 10 * 1024 * 1024);
    assert_eq!(config.database.url, "sqlite://data/productos.db");
    assert_eq!(config.uploads.path, "uploads");
    assert!(config.security.is_none());
    assert!(config::validate(&config).is_ok());
}

#[test]
fn test_config_from_file() {
    let file = write_temp_config(
        r#"
[server]
port = 9000

[uploads]
path = "/var/lib/productos/fotos"

[security]
enable_hsts = true
"#,
    );

    let config = config::load_with(file.path().to_str()).unwrap();

    assert_eq!(config.server.port, 9000);
    // Untouched keys keep their defaults
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.uploads.path, "/var/lib/productos/fotos");
    assert_eq!(config.security.and_then(|s| s.enable_hsts), Some(true));
}

#[test]
fn test_invalid_values_are_rejected() {
    let mut config = AppConfig::default();
    config.server.port = 0;
    let err = config::validate(&config).unwrap_err();
    assert!(err.to_string().contains("invalid server.port"));

    let mut config = AppConfig::default();
    config.uploads.path = "   ".into();
    assert!(config::validate(&config).is_err());

    let mut config = AppConfig::default();
    config.server.max_body_bytes = 0;
    assert!(config::validate(&config).is_err());
}

#[test]
fn test_invalid_file_fails_load() {
    let file = write_temp_config("[uploads]\npath = \"\"\n");
    assert!(config::load_with(file.path().to_str()).is_err());
}

#[test]
fn test_ensure_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("productos.db");
    config::ensure_sqlite_parent_dir(&format!("sqlite://{}", db_path.display())).unwrap();
    assert!(db_path.parent().unwrap().is_dir());

    let mut config = AppConfig::default();
    config.uploads.path = dir.path().join("fotos").display().to_string();
    config::ensure_upload_dir(&config.uploads).unwrap();
    assert!(dir.path().join("fotos").is_dir());
}
