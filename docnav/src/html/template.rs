use std::{fs, path::Path};

use docnav_commonmark::RenderResult;
use docnav_config::Config;
use tera::Tera;

use crate::error::Result;

/// Built-in page template, used unless `template_path` is configured.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/default.html");
/// Stylesheet written next to the pages.
pub const DEFAULT_CSS: &str = include_str!("../../templates/default.css");
/// Client-side navigation runtime written next to the pages.
pub const MAIN_JS: &str = include_str!("../../templates/main.js");

/// Loads the page template once and renders pages from it.
#[derive(Debug)]
pub struct PageTemplate {
  tera: Tera,
}

impl PageTemplate {
  /// Load the configured template, falling back to the built-in one.
  ///
  /// # Errors
  ///
  /// Returns an error if the custom template cannot be read or does not
  /// parse.
  pub fn load(config: &Config) -> Result<Self> {
    let template_content = match &config.template_path {
      Some(path) => {
        log::debug!("Using custom template: {}", path.display());
        fs::read_to_string(path)?
      },
      None => DEFAULT_TEMPLATE.to_string(),
    };

    let mut tera = Tera::default();
    // The .html suffix turns on tera's autoescaping for plain values.
    tera.add_raw_template("default.html", &template_content)?;
    Ok(Self { tera })
  }

  /// Render one page.
  ///
  /// `rel_path` is the page's path relative to the output directory; it
  /// decides how asset links climb back to the root.
  ///
  /// # Errors
  ///
  /// Returns an error if the template fails to render or the TOC and
  /// navigation settings cannot be serialized.
  pub fn render(
    &self,
    config: &Config,
    result: &RenderResult,
    rel_path: &Path,
  ) -> Result<String> {
    let root = root_prefix(rel_path);
    let title = result.title.as_deref().unwrap_or(&config.title);
    let stylesheets: Vec<String> = config
      .stylesheet_paths
      .iter()
      .filter_map(|path| path.file_name())
      .map(|name| format!("{root}assets/{}", name.to_string_lossy()))
      .collect();

    let mut context = tera::Context::new();
    context.insert("content", &result.html);
    context.insert("title", title);
    context.insert("site_title", &config.title);
    context.insert("footer_text", &config.footer_text);
    context.insert("toc", &result.toc.to_html());
    context.insert("toc_json", &script_safe(&result.toc.to_json()?));
    context.insert(
      "navigation_json",
      &script_safe(&config.navigation_config().to_json()?),
    );
    context.insert("stylesheet_path", &format!("{root}assets/style.css"));
    context.insert("main_js_path", &format!("{root}assets/main.js"));
    context.insert("stylesheets", &stylesheets);
    context.insert("diagram_script", &config.diagram_script);

    Ok(self.tera.render("default.html", &context)?)
  }
}

/// JSON placed inside a `<script>` element must not contain `</`.
fn script_safe(json: &str) -> String {
  json.replace("</", "<\\/")
}

/// `../` repeated once per directory between `rel_path` and the output root.
fn root_prefix(rel_path: &Path) -> String {
  let depth = rel_path
    .parent()
    .map_or(0, |parent| parent.components().count());
  "../".repeat(depth)
}
