use thiserror::Error;

/// Error type for config template lookups.
#[derive(Debug, Error)]
pub enum TemplateError {
  /// The requested configuration format is not supported.
  #[error("Unsupported config format: {0}")]
  UnsupportedFormat(String),
}

/// Default configuration template in TOML, commented so that a new user can
/// find their way around without reading the docs first.
pub const DEFAULT_TOML_TEMPLATE: &str = r##"# docnav configuration file

# Markdown file, or directory of markdown files, to render
input = "docs"

# Output directory for generated pages
output_dir = "build"

# Site title, shown in every page header
title = "My Project Documentation"

# Footer text for every page
footer_text = "Generated with docnav"

# Number of threads to use when rendering a directory (defaults to the number
# of CPU cores)
# jobs = 4

# Path to a custom tera page template
# template_path = "templates/page.html"

# Extra stylesheets to link from every page
# stylesheet_paths = ["assets/custom.css"]

# Enable GitHub Flavored Markdown extensions (tables, task lists, ...)
gfm = true

# Whether to syntax highlight code fences
highlight_code = true

# Highlighting theme (see the syntect/two-face theme names)
# highlight_theme = "InspiredGitHub"

# Fence info strings rendered as client-side diagrams instead of code
diagram_keywords = ["mermaid"]

# Script every page loads to draw those diagrams in the browser
# diagram_script = "https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.min.js"

# Append a "#" self-link to every heading
anchor_links = false

[toc]
# Deepest heading level that appears in the table of contents (1-6)
max_level = 3

[navigation]
# Distance in pixels from the viewport top a heading must reach to become the
# active section
offset_threshold = 80.0

# Quiet period before a burst of scroll or hash-change events is applied
debounce_ms = 100

# How often to look for a heading named by the initial URL hash before giving
# up, and how long to wait between attempts
max_probe_attempts = 10
probe_interval_ms = 50
"##;

/// Default configuration template in JSON format.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "input": "docs",
  "output_dir": "build",
  "title": "My Project Documentation",
  "footer_text": "Generated with docnav",
  "gfm": true,
  "highlight_code": true,
  "diagram_keywords": ["mermaid"],
  "anchor_links": false,
  "toc": {
    "max_level": 3
  },
  "navigation": {
    "offset_threshold": 80.0,
    "debounce_ms": 100,
    "max_probe_attempts": 10,
    "probe_interval_ms": 50
  }
}
"#;

/// Get the configuration template for the requested format.
///
/// # Errors
///
/// Returns an error if the requested format is not supported.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}
