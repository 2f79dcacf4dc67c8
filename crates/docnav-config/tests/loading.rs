#![allow(clippy::expect_used, clippy::panic, reason = "Fine in tests")]

use std::{fs, path::PathBuf};

use docnav_config::{Config, ConfigError};
use tempfile::TempDir;

#[test]
fn loads_toml_and_json_by_extension() {
  let dir = TempDir::new().expect("tempdir");

  let toml_path = dir.path().join("site.toml");
  fs::write(
    &toml_path,
    "title = \"From TOML\"\nanchor_links = true\n\n[toc]\nmax_level = 2\n",
  )
  .expect("write toml");
  let config = Config::from_file(&toml_path).expect("toml loads");
  assert_eq!(config.title, "From TOML");
  assert!(config.anchor_links);
  assert_eq!(config.toc.max_level, 2);
  assert_eq!(config.output_dir, PathBuf::from("build"));

  let json_path = dir.path().join("site.JSON");
  fs::write(&json_path, r#"{"navigation": {"debounce_ms": 30}}"#)
    .expect("write json");
  let config = Config::from_file(&json_path).expect("json loads");
  assert_eq!(config.navigation.debounce_ms, 30);
  assert_eq!(config.navigation.max_probe_attempts, 10);
}

#[test]
fn rejects_unknown_extensions_and_bad_syntax() {
  let dir = TempDir::new().expect("tempdir");

  let yaml = dir.path().join("site.yaml");
  fs::write(&yaml, "title: x").expect("write");
  let err = Config::from_file(&yaml).expect_err("yaml is unsupported");
  assert!(err.to_string().contains("Unsupported config file format"));

  let broken = dir.path().join("broken.toml");
  fs::write(&broken, "title = ").expect("write");
  let err = Config::from_file(&broken).expect_err("broken toml");
  assert!(err.to_string().contains("Failed to parse TOML config"));

  let err = Config::from_file(dir.path().join("missing.toml"))
    .expect_err("missing file");
  assert!(matches!(err, ConfigError::Config(_)));
}

#[test]
fn load_merges_files_in_order_then_applies_overrides() {
  let dir = TempDir::new().expect("tempdir");
  let first = dir.path().join("a.toml");
  let second = dir.path().join("b.json");
  fs::write(&first, "title = \"First\"\nfooter_text = \"Kept\"\n")
    .expect("write");
  fs::write(&second, r#"{"title": "Second", "jobs": 2}"#).expect("write");

  let config = Config::load(&[first, second], &[
    "navigation.probe_interval_ms=25".to_string(),
  ])
  .expect("loads");

  assert_eq!(config.title, "Second");
  assert_eq!(config.footer_text, "Kept");
  assert_eq!(config.jobs, Some(2));
  assert_eq!(config.navigation.probe_interval_ms, 25);
}

#[test]
fn load_rejects_out_of_range_values() {
  let dir = TempDir::new().expect("tempdir");
  let path = dir.path().join("docnav.toml");
  fs::write(&path, "[toc]\nmax_level = 9\n").expect("write");

  let err = Config::load(&[path], &[]).expect_err("max_level 9");
  assert!(err.to_string().contains("toc.max_level"));
}

#[test]
fn discovers_well_known_file_names() {
  let dir = TempDir::new().expect("tempdir");
  assert_eq!(Config::find_config_file_in(dir.path()), None);

  fs::create_dir_all(dir.path().join(".config")).expect("mkdir");
  fs::write(dir.path().join(".config/docnav.toml"), "").expect("write");
  assert_eq!(
    Config::find_config_file_in(dir.path()),
    Some(dir.path().join(".config/docnav.toml"))
  );

  fs::write(dir.path().join("docnav.json"), "{}").expect("write");
  assert_eq!(
    Config::find_config_file_in(dir.path()),
    Some(dir.path().join("docnav.json"))
  );
}

#[test]
fn validate_paths_reports_every_missing_path() {
  let dir = TempDir::new().expect("tempdir");
  let config = Config {
    input: Some(dir.path().join("docs")),
    template_path: Some(dir.path().join("page.html")),
    stylesheet_paths: vec![dir.path().join("extra.css")],
    ..Config::default()
  };

  let message = config
    .validate_paths()
    .expect_err("nothing exists")
    .to_string();
  assert!(message.contains("Input does not exist"));
  assert!(message.contains("Template file does not exist"));
  assert!(message.contains("Stylesheet does not exist"));

  fs::create_dir(dir.path().join("docs")).expect("mkdir");
  let config = Config {
    input: Some(dir.path().join("docs")),
    ..Config::default()
  };
  assert!(config.validate_paths().is_ok());
}

#[test]
fn generated_default_config_loads_back() {
  let dir = TempDir::new().expect("tempdir");

  for format in ["toml", "json"] {
    let path = dir.path().join(format!("docnav.{format}"));
    Config::generate_default_config(format, &path).expect("generate");
    let config = Config::from_file(&path).expect("generated file loads");
    assert_eq!(config.input, Some(PathBuf::from("docs")));
    assert_eq!(config.title, "My Project Documentation");
  }

  let err =
    Config::generate_default_config("ini", &dir.path().join("docnav.ini"))
      .expect_err("ini unsupported");
  assert!(matches!(err, ConfigError::Template(_)));
}
