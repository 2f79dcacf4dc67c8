use std::{
  fs,
  path::{Path, PathBuf},
  str::FromStr,
  time::Duration,
};

use docnav_commonmark::{
  DocumentOptions,
  classify::DEFAULT_DIAGRAM_KEYWORD,
  navigation::NavigationConfig,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File names probed, in order, when no config file is given explicitly.
const CONFIG_FILENAMES: [&str; 5] = [
  "docnav.toml",
  "docnav.json",
  ".docnav.toml",
  ".docnav.json",
  ".config/docnav.toml",
];

/// Configuration for a docnav run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Markdown file, or directory of markdown files, to render.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub input: Option<PathBuf>,

  /// Output directory for generated pages.
  pub output_dir: PathBuf,

  /// Site title shown in every page header.
  pub title: String,

  /// Footer text for every page.
  pub footer_text: String,

  /// Path to a custom tera page template.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub template_path: Option<PathBuf>,

  /// Extra stylesheets copied next to the pages and linked from each.
  pub stylesheet_paths: Vec<PathBuf>,

  /// Worker threads for rendering a directory.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub jobs: Option<usize>,

  /// Enable GitHub Flavored Markdown extensions.
  pub gfm: bool,

  /// Whether to syntax highlight code fences.
  pub highlight_code: bool,

  /// Highlighting theme name.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub highlight_theme: Option<String>,

  /// Fence info strings rendered as client-side diagrams.
  pub diagram_keywords: Vec<String>,

  /// Script URL loaded by every page to draw diagram blocks, e.g. a mermaid
  /// bundle.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub diagram_script: Option<String>,

  /// Append a `#` self-link to every heading.
  pub anchor_links: bool,

  /// Table of contents settings.
  pub toc: TocSettings,

  /// Navigation runtime settings, embedded into every page.
  pub navigation: NavigationSettings,
}

/// `[toc]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocSettings {
  /// Deepest heading level that appears in the TOC.
  pub max_level: u8,
}

/// `[navigation]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
  pub offset_threshold:   f64,
  pub debounce_ms:        u64,
  pub max_probe_attempts: u32,
  pub probe_interval_ms:  u64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      input:            None,
      output_dir:       PathBuf::from("build"),
      title:            "docnav documentation".to_string(),
      footer_text:      "Generated with docnav".to_string(),
      template_path:    None,
      stylesheet_paths: Vec::new(),
      jobs:             None,
      gfm:              true,
      highlight_code:   true,
      highlight_theme:  None,
      diagram_keywords: vec![DEFAULT_DIAGRAM_KEYWORD.to_string()],
      diagram_script:   None,
      anchor_links:     false,
      toc:              TocSettings::default(),
      navigation:       NavigationSettings::default(),
    }
  }
}

impl Default for TocSettings {
  fn default() -> Self {
    Self { max_level: 3 }
  }
}

impl Default for NavigationSettings {
  fn default() -> Self {
    let defaults = NavigationConfig::default();
    Self {
      offset_threshold:   defaults.offset_threshold,
      debounce_ms:        duration_millis(defaults.debounce),
      max_probe_attempts: defaults.max_probe_attempts,
      probe_interval_ms:  duration_millis(defaults.probe_interval),
    }
  }
}

impl Config {
  /// Load configuration from a file, picking the format by extension.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {}",
        path.display(),
        e
      ))
    })?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);

    match extension.as_deref() {
      Some("json") => {
        serde_json::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse JSON config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      Some("toml") => {
        toml::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse TOML config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      Some(_) => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
      None => {
        Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load configuration from explicit files (merged in order) or a
  /// discovered file, then apply `KEY=VALUE` overrides.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded, an override is malformed, or
  /// the resulting configuration is invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged = Self::from_file(first)?;
      for config_path in rest {
        merged.merge(Self::from_file(config_path)?);
      }

      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }

      merged
    } else if let Some(discovered) = Self::find_config_file() {
      log::info!("Using discovered config file: {}", discovered.display());
      Self::from_file(&discovered)?
    } else {
      Self::default()
    };

    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    config.validate()?;
    Ok(config)
  }

  /// Apply configuration overrides from `KEY=VALUE` strings.
  ///
  /// Nested keys use a dot, e.g. `toc.max_level=2` or
  /// `navigation.debounce_ms=50`. List values are comma separated.
  ///
  /// # Errors
  ///
  /// Returns an error if an override is not in `KEY=VALUE` format, a key is not
  /// recognized, or a value cannot be parsed as the expected type.
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Apply a single configuration override by key.
  ///
  /// # Errors
  ///
  /// Returns an error if the key is unknown or the value does not parse.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    if let Some(subkey) = key.strip_prefix("toc.") {
      return self.toc.apply_override(subkey, value);
    }
    if let Some(subkey) = key.strip_prefix("navigation.") {
      return self.navigation.apply_override(subkey, value);
    }

    match key {
      "input" => self.input = optional(value).map(PathBuf::from),
      "output_dir" => self.output_dir = PathBuf::from(value),
      "title" => self.title = value.to_string(),
      "footer_text" => self.footer_text = value.to_string(),
      "template_path" => self.template_path = optional(value).map(PathBuf::from),
      "stylesheet_paths" => {
        self.stylesheet_paths = parse_list(value).map(PathBuf::from).collect();
      },
      "jobs" => {
        self.jobs = optional(value)
          .map(|jobs| parse_value(key, jobs))
          .transpose()?;
      },
      "gfm" => self.gfm = parse_bool(key, value)?,
      "highlight_code" => self.highlight_code = parse_bool(key, value)?,
      "highlight_theme" => self.highlight_theme = optional(value).map(str::to_string),
      "diagram_keywords" => {
        self.diagram_keywords = parse_list(value).map(str::to_string).collect();
      },
      "diagram_script" => {
        self.diagram_script = optional(value).map(str::to_string);
      },
      "anchor_links" => self.anchor_links = parse_bool(key, value)?,
      _ => return Err(unknown_key(key)),
    }

    Ok(())
  }

  /// Merge another config into this one, with the other config's values taking
  /// precedence.
  ///
  /// # Merge Rules
  ///
  /// - [`Option<T>`] fields: Other's [`Some`] value replaces this config's
  ///   value
  /// - `stylesheet_paths`: Other's entries are appended, skipping duplicates
  /// - Plain fields and `diagram_keywords`: Other's value replaces this
  ///   config's value unless it is the default, which a file that never
  ///   mentions the field also yields
  pub fn merge(&mut self, other: Self) {
    let defaults = Self::default();

    merge_option(&mut self.input, other.input);
    merge_plain(&mut self.output_dir, other.output_dir, &defaults.output_dir);
    merge_plain(&mut self.title, other.title, &defaults.title);
    merge_plain(&mut self.footer_text, other.footer_text, &defaults.footer_text);
    merge_option(&mut self.template_path, other.template_path);
    merge_vec(&mut self.stylesheet_paths, other.stylesheet_paths);
    merge_option(&mut self.jobs, other.jobs);
    merge_plain(&mut self.gfm, other.gfm, &defaults.gfm);
    merge_plain(
      &mut self.highlight_code,
      other.highlight_code,
      &defaults.highlight_code,
    );
    merge_option(&mut self.highlight_theme, other.highlight_theme);
    merge_plain(
      &mut self.diagram_keywords,
      other.diagram_keywords,
      &defaults.diagram_keywords,
    );
    merge_option(&mut self.diagram_script, other.diagram_script);
    merge_plain(
      &mut self.anchor_links,
      other.anchor_links,
      &defaults.anchor_links,
    );
    merge_plain(
      &mut self.toc.max_level,
      other.toc.max_level,
      &defaults.toc.max_level,
    );
    self.navigation.merge(other.navigation);
  }

  /// Check value ranges that the type system does not.
  ///
  /// # Errors
  ///
  /// Returns an error describing the first invalid value.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(1..=6).contains(&self.toc.max_level) {
      return Err(ConfigError::Config(format!(
        "toc.max_level must be between 1 and 6, got {}",
        self.toc.max_level
      )));
    }
    if self.jobs == Some(0) {
      return Err(ConfigError::Config(
        "jobs must be at least 1".to_string(),
      ));
    }
    if !self.navigation.offset_threshold.is_finite() {
      return Err(ConfigError::Config(
        "navigation.offset_threshold must be a finite number".to_string(),
      ));
    }
    Ok(())
  }

  /// Search for a config file in the current directory, then in
  /// `$XDG_CONFIG_HOME`.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    if let Some(found) = std::env::current_dir()
      .ok()
      .and_then(|dir| Self::find_config_file_in(&dir))
    {
      return Some(found);
    }

    let xdg_config_dir = PathBuf::from(std::env::var_os("XDG_CONFIG_HOME")?);
    ["docnav.toml", "docnav.json"]
      .iter()
      .map(|filename| xdg_config_dir.join(filename))
      .find(|path| path.is_file())
  }

  /// Search `dir` for one of the well-known config file names.
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|filename| dir.join(filename))
      .find(|path| path.is_file())
  }

  /// Validate all paths specified in the configuration
  ///
  /// # Errors
  ///
  /// Returns an error listing every configured path that does not exist.
  pub fn validate_paths(&self) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    match &self.input {
      Some(input) if !input.exists() => {
        errors.push(format!("Input does not exist: {}", input.display()));
      },
      Some(_) => {},
      None => errors.push("No input file or directory given".to_string()),
    }

    if let Some(ref template_path) = self.template_path
      && !template_path.is_file()
    {
      errors.push(format!(
        "Template file does not exist: {}",
        template_path.display()
      ));
    }

    for stylesheet in &self.stylesheet_paths {
      if !stylesheet.is_file() {
        errors.push(format!(
          "Stylesheet does not exist: {}",
          stylesheet.display()
        ));
      }
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(ConfigError::Config(format!(
        "Configuration path validation failed:\n{}",
        errors.join("\n")
      )))
    }
  }

  /// Generate a default configuration file with commented explanations
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = crate::templates::get_template(format)
      .map_err(|e| ConfigError::Template(e.to_string()))?;

    fs::write(path, config_content).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to write default config to {}: {}",
        path.display(),
        e
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }

  /// Options for the markdown pipeline.
  #[must_use]
  pub fn to_document_options(&self) -> DocumentOptions {
    DocumentOptions {
      gfm:              self.gfm,
      highlight_code:   self.highlight_code,
      highlight_theme:  self.highlight_theme.clone(),
      diagram_keywords: self.diagram_keywords.clone(),
      anchor_links:     self.anchor_links,
      toc_max_level:    self.toc.max_level,
    }
  }

  /// Tuning for the navigation runtime.
  #[must_use]
  pub const fn navigation_config(&self) -> NavigationConfig {
    NavigationConfig {
      offset_threshold:   self.navigation.offset_threshold,
      debounce:           Duration::from_millis(self.navigation.debounce_ms),
      max_probe_attempts: self.navigation.max_probe_attempts,
      probe_interval:     Duration::from_millis(
        self.navigation.probe_interval_ms,
      ),
    }
  }
}

impl TocSettings {
  fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    match key {
      "max_level" => self.max_level = parse_value("toc.max_level", value)?,
      _ => return Err(unknown_key(&format!("toc.{key}"))),
    }
    Ok(())
  }
}

impl NavigationSettings {
  fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    match key {
      "offset_threshold" => {
        self.offset_threshold = parse_value("navigation.offset_threshold", value)?;
      },
      "debounce_ms" => {
        self.debounce_ms = parse_value("navigation.debounce_ms", value)?;
      },
      "max_probe_attempts" => {
        self.max_probe_attempts =
          parse_value("navigation.max_probe_attempts", value)?;
      },
      "probe_interval_ms" => {
        self.probe_interval_ms =
          parse_value("navigation.probe_interval_ms", value)?;
      },
      _ => return Err(unknown_key(&format!("navigation.{key}"))),
    }
    Ok(())
  }

  fn merge(&mut self, other: Self) {
    let defaults = Self::default();
    merge_plain(
      &mut self.offset_threshold,
      other.offset_threshold,
      &defaults.offset_threshold,
    );
    merge_plain(&mut self.debounce_ms, other.debounce_ms, &defaults.debounce_ms);
    merge_plain(
      &mut self.max_probe_attempts,
      other.max_probe_attempts,
      &defaults.max_probe_attempts,
    );
    merge_plain(
      &mut self.probe_interval_ms,
      other.probe_interval_ms,
      &defaults.probe_interval_ms,
    );
  }
}

fn duration_millis(duration: Duration) -> u64 {
  u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn optional(value: &str) -> Option<&str> {
  (!value.is_empty()).then_some(value)
}

fn parse_list(value: &str) -> impl Iterator<Item = &str> {
  value.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
  value.parse().map_err(|_| {
    ConfigError::Config(format!("Invalid value for '{key}': '{value}'"))
  })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "1" => Ok(true),
    "false" | "no" | "0" => Ok(false),
    _ => {
      Err(ConfigError::Config(format!(
        "Invalid boolean value for '{key}': '{value}'. Expected true/false, \
         yes/no, or 1/0"
      )))
    },
  }
}

fn unknown_key(key: &str) -> ConfigError {
  ConfigError::Config(format!(
    "Unknown configuration key: '{key}'. See documentation for supported keys."
  ))
}

fn merge_option<T>(target: &mut Option<T>, value: Option<T>) {
  if value.is_some() {
    *target = value;
  }
}

fn merge_plain<T: PartialEq>(target: &mut T, value: T, default: &T) {
  if value != *default {
    *target = value;
  }
}

fn merge_vec<T: PartialEq>(target: &mut Vec<T>, values: Vec<T>) {
  for value in values {
    if !target.contains(&value) {
      target.push(value);
    }
  }
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::unwrap_used,
    clippy::field_reassign_with_default,
    reason = "Fine in tests"
  )]

  use super::*;

  #[test]
  fn test_config_merge_option_fields() {
    let mut base = Config::default();
    base.input = Some(PathBuf::from("base-input"));

    let mut override_config = Config::default();
    override_config.input = None;
    override_config.template_path = Some(PathBuf::from("page.html"));

    base.merge(override_config);

    assert_eq!(base.input, Some(PathBuf::from("base-input")));
    assert_eq!(base.template_path, Some(PathBuf::from("page.html")));
  }

  #[test]
  fn test_config_merge_stylesheets_append() {
    let mut base = Config::default();
    base.stylesheet_paths = vec![PathBuf::from("base.css")];

    let mut override_config = Config::default();
    override_config.stylesheet_paths =
      vec![PathBuf::from("base.css"), PathBuf::from("override.css")];

    base.merge(override_config);

    assert_eq!(base.stylesheet_paths, [
      PathBuf::from("base.css"),
      PathBuf::from("override.css")
    ]);
  }

  #[test]
  fn test_config_merge_diagram_keywords_replace() {
    let mut base = Config::default();
    base.diagram_keywords = vec!["mermaid".to_string(), "dot".to_string()];

    let mut override_config = Config::default();
    override_config.diagram_keywords = vec!["plantuml".to_string()];
    base.merge(override_config);
    assert_eq!(base.diagram_keywords, ["plantuml"]);

    // A file that never mentions the list leaves it alone.
    base.merge(Config::default());
    assert_eq!(base.diagram_keywords, ["plantuml"]);
  }

  #[test]
  fn test_config_merge_diagram_script() {
    let mut base = Config::default();
    base.diagram_script = Some("https://cdn.example/mermaid.js".to_string());

    base.merge(Config::default());
    assert_eq!(
      base.diagram_script.as_deref(),
      Some("https://cdn.example/mermaid.js")
    );

    let mut override_config = Config::default();
    override_config.diagram_script = Some("vendor/mermaid.js".to_string());
    base.merge(override_config);
    assert_eq!(base.diagram_script.as_deref(), Some("vendor/mermaid.js"));
  }

  #[test]
  fn test_config_merge_keeps_values_the_other_file_leaves_unset() {
    let mut base = Config::default();
    base.title = "Base".to_string();
    base.anchor_links = true;
    base.navigation.debounce_ms = 250;

    let mut override_config = Config::default();
    override_config.footer_text = "Footer".to_string();
    override_config.navigation.max_probe_attempts = 3;

    base.merge(override_config);

    assert_eq!(base.title, "Base");
    assert_eq!(base.footer_text, "Footer");
    assert!(base.anchor_links);
    assert_eq!(base.navigation.debounce_ms, 250);
    assert_eq!(base.navigation.max_probe_attempts, 3);
  }

  #[test]
  fn test_apply_overrides_plain_fields() {
    let mut config = Config::default();

    config
      .apply_overrides(&[
        "title=Test Documentation".to_string(),
        "output_dir=/tmp/output".to_string(),
        "input = docs".to_string(),
        "highlight_code=no".to_string(),
        "jobs=8".to_string(),
      ])
      .unwrap();

    assert_eq!(config.title, "Test Documentation");
    assert_eq!(config.output_dir, PathBuf::from("/tmp/output"));
    assert_eq!(config.input, Some(PathBuf::from("docs")));
    assert!(!config.highlight_code);
    assert_eq!(config.jobs, Some(8));
  }

  #[test]
  fn test_apply_overrides_lists_and_empty_values() {
    let mut config = Config::default();
    config.highlight_theme = Some("Nord".to_string());

    config
      .apply_overrides(&[
        "diagram_keywords=mermaid, graphviz,".to_string(),
        "highlight_theme=".to_string(),
        "diagram_script=assets/mermaid.min.js".to_string(),
      ])
      .unwrap();

    assert_eq!(config.diagram_keywords, ["mermaid", "graphviz"]);
    assert_eq!(config.highlight_theme, None);
    assert_eq!(
      config.diagram_script.as_deref(),
      Some("assets/mermaid.min.js")
    );

    config.apply_override("diagram_script", "").unwrap();
    assert_eq!(config.diagram_script, None);
  }

  #[test]
  fn test_apply_overrides_nested() {
    let mut config = Config::default();

    config
      .apply_overrides(&[
        "toc.max_level=2".to_string(),
        "navigation.offset_threshold=120.5".to_string(),
        "navigation.debounce_ms=50".to_string(),
      ])
      .unwrap();

    assert_eq!(config.toc.max_level, 2);
    assert!((config.navigation.offset_threshold - 120.5).abs() < f64::EPSILON);
    assert_eq!(
      config.navigation_config().debounce,
      Duration::from_millis(50)
    );
  }

  #[test]
  fn test_apply_overrides_invalid_format() {
    let mut config = Config::default();
    let result = config.apply_overrides(&["no_equals_sign".to_string()]);
    assert!(
      result
        .unwrap_err()
        .to_string()
        .contains("Expected KEY=VALUE")
    );
  }

  #[test]
  fn test_apply_overrides_unknown_key() {
    let mut config = Config::default();

    let result = config.apply_overrides(&["unknown_key=value".to_string()]);
    assert!(
      result
        .unwrap_err()
        .to_string()
        .contains("Unknown configuration key: 'unknown_key'")
    );

    let result = config.apply_overrides(&["toc.depth=2".to_string()]);
    assert!(
      result
        .unwrap_err()
        .to_string()
        .contains("Unknown configuration key: 'toc.depth'")
    );
  }

  #[test]
  fn test_apply_overrides_invalid_values() {
    let mut config = Config::default();

    let result = config.apply_override("anchor_links", "maybe");
    assert!(result.unwrap_err().to_string().contains("Invalid boolean"));

    let result = config.apply_override("jobs", "not_a_number");
    assert!(result.unwrap_err().to_string().contains("Invalid value"));

    let result = config.apply_override("toc.max_level", "-1");
    assert!(result.unwrap_err().to_string().contains("Invalid value"));
  }

  #[test]
  fn test_validate_ranges() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.toc.max_level = 7;
    assert!(config.validate().is_err());

    config.toc.max_level = 2;
    config.jobs = Some(0);
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_document_options_follow_config() {
    let mut config = Config::default();
    config.anchor_links = true;
    config.toc.max_level = 2;
    config.diagram_keywords = vec!["graphviz".to_string()];

    let options = config.to_document_options();
    assert!(options.anchor_links);
    assert_eq!(options.toc_max_level, 2);
    assert_eq!(options.diagram_keywords, ["graphviz"]);
  }

  #[test]
  fn test_default_navigation_matches_runtime_defaults() {
    assert_eq!(
      Config::default().navigation_config(),
      NavigationConfig::default()
    );
  }
}
