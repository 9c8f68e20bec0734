use std::path::PathBuf;
use std::time::Duration;

use webworker::config::{Config, ConfigError};

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.server.read_timeout(), Duration::from_secs(30));
    assert_eq!(cfg.server.max_request_head_bytes, 8192);
    assert_eq!(cfg.static_files.document_root, PathBuf::from("."));
    assert_eq!(cfg.static_files.index_file, "index.html");
    assert_eq!(cfg.static_files.server_name, "The Unfinished Server");
    assert_eq!(cfg.static_files.date_placeholder, "<cs371date>");
    assert_eq!(cfg.static_files.server_placeholder, "<cs371server>");
}

#[test]
fn test_config_from_yaml_partial() {
    let cfg = Config::from_yaml(
        r#"
server:
  listen_addr: "0.0.0.0:3000"
static_files:
  document_root: /srv/www
  server_name: "Jon's very own server"
"#,
    )
    .unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.server.read_timeout_secs, 30);
    assert_eq!(cfg.static_files.document_root, PathBuf::from("/srv/www"));
    assert_eq!(cfg.static_files.server_name, "Jon's very own server");
    assert_eq!(cfg.static_files.date_placeholder, "<cs371date>");
}

#[test]
fn test_config_from_yaml_placeholders() {
    let cfg = Config::from_yaml(
        r#"
static_files:
  date_placeholder: "{{date}}"
  server_placeholder: "{{server}}"
  date_format: "%Y-%m-%d"
"#,
    )
    .unwrap();

    assert_eq!(cfg.static_files.date_placeholder, "{{date}}");
    assert_eq!(cfg.static_files.server_placeholder, "{{server}}");
    assert_eq!(cfg.static_files.date_format, "%Y-%m-%d");
}

#[test]
fn test_config_rejects_bad_date_format() {
    let result = Config::from_yaml("static_files:\n  date_format: \"%Q\"\n");

    assert!(matches!(result, Err(ConfigError::InvalidDateFormat(_))));
}

#[test]
fn test_config_rejects_malformed_yaml() {
    let result = Config::from_yaml("server: [unclosed");

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_config_missing_file() {
    let result = Config::from_file(std::path::Path::new("/definitely/not/here.yaml"));

    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.server.listen_addr, cfg2.server.listen_addr);
}

// Kept as a single test since it mutates process-wide environment.
#[test]
fn test_config_load_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("site.yaml");
    std::fs::write(
        &file,
        "server:\n  listen_addr: \"127.0.0.1:9000\"\nstatic_files:\n  index_file: home.html\n",
    )
    .unwrap();

    unsafe {
        std::env::set_var("CONFIG", &file);
        std::env::remove_var("LISTEN");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:9000");
    assert_eq!(cfg.static_files.index_file, "home.html");

    unsafe {
        std::env::set_var("LISTEN", "0.0.0.0:5000");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:5000");
    assert_eq!(cfg.static_files.index_file, "home.html");

    unsafe {
        std::env::remove_var("CONFIG");
        std::env::remove_var("LISTEN");
    }
}

#[test]
fn test_config_rejects_zero_read_timeout() {
    let result = Config::from_yaml("server:\n  read_timeout_secs: 0\n");

    assert!(matches!(
        result,
        Err(ConfigError::Zero("server.read_timeout_secs"))
    ));
}

#[test]
fn test_config_rejects_zero_head_limit() {
    let result = Config::from_yaml("server:\n  max_request_head_bytes: 0\n");

    assert!(matches!(
        result,
        Err(ConfigError::Zero("server.max_request_head_bytes"))
    ));
}
