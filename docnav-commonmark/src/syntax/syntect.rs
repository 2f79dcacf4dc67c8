//! Syntect-based syntax highlighting backend enhanced with two-face.
//!
//! Uses Sublime Text syntax definitions (TextMate grammars) from the two-face
//! crate, which extends syntect's defaults with many more syntaxes and themes.

use std::sync::OnceLock;

use syntect::{
  easy::HighlightLines,
  highlighting::Theme,
  html::{IncludeBackground, styled_line_to_highlighted_html},
  parsing::SyntaxSet,
  util::LinesWithEndings,
};
use two_face::{
  re_exports::syntect::highlighting::ThemeSet,
  theme::{EmbeddedLazyThemeSet, EmbeddedThemeName},
};

use super::{
  error::{SyntaxError, SyntaxResult},
  types::{SyntaxConfig, SyntaxHighlighter, SyntaxManager},
};

/// Theme used when none is configured or the configured one is unknown.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Themes shipped by two-face, by the name users write in configuration.
const EMBEDDED_THEMES: &[(&str, EmbeddedThemeName)] = &[
  ("Ansi", EmbeddedThemeName::Ansi),
  ("Base16", EmbeddedThemeName::Base16),
  ("Base16EightiesDark", EmbeddedThemeName::Base16EightiesDark),
  ("Base16MochaDark", EmbeddedThemeName::Base16MochaDark),
  ("Base16OceanDark", EmbeddedThemeName::Base16OceanDark),
  ("Base16OceanLight", EmbeddedThemeName::Base16OceanLight),
  ("Base16_256", EmbeddedThemeName::Base16_256),
  ("ColdarkCold", EmbeddedThemeName::ColdarkCold),
  ("ColdarkDark", EmbeddedThemeName::ColdarkDark),
  ("DarkNeon", EmbeddedThemeName::DarkNeon),
  ("Dracula", EmbeddedThemeName::Dracula),
  ("Github", EmbeddedThemeName::Github),
  ("GruvboxDark", EmbeddedThemeName::GruvboxDark),
  ("GruvboxLight", EmbeddedThemeName::GruvboxLight),
  ("InspiredGithub", EmbeddedThemeName::InspiredGithub),
  ("Leet", EmbeddedThemeName::Leet),
  ("MonokaiExtended", EmbeddedThemeName::MonokaiExtended),
  ("MonokaiExtendedBright", EmbeddedThemeName::MonokaiExtendedBright),
  ("MonokaiExtendedLight", EmbeddedThemeName::MonokaiExtendedLight),
  ("MonokaiExtendedOrigin", EmbeddedThemeName::MonokaiExtendedOrigin),
  ("Nord", EmbeddedThemeName::Nord),
  ("OneHalfDark", EmbeddedThemeName::OneHalfDark),
  ("OneHalfLight", EmbeddedThemeName::OneHalfLight),
  ("SolarizedDark", EmbeddedThemeName::SolarizedDark),
  ("SolarizedLight", EmbeddedThemeName::SolarizedLight),
  ("SublimeSnazzy", EmbeddedThemeName::SublimeSnazzy),
  ("TwoDark", EmbeddedThemeName::TwoDark),
  ("VisualStudioDarkPlus", EmbeddedThemeName::VisualStudioDarkPlus),
  ("Zenburn", EmbeddedThemeName::Zenburn),
];

/// Syntect-based syntax highlighter
pub struct SyntectHighlighter {
  theme_name: String,
}

impl SyntectHighlighter {
  /// Create a new Syntect highlighter with the specified theme.
  #[must_use]
  pub fn new(theme_name: Option<String>) -> Self {
    Self {
      theme_name: theme_name.unwrap_or_else(|| DEFAULT_THEME.to_owned()),
    }
  }

  fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(two_face::syntax::extra_newlines)
  }

  fn theme_set() -> &'static EmbeddedLazyThemeSet {
    static THEME_SET: OnceLock<EmbeddedLazyThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(two_face::theme::extra)
  }

  fn default_theme_set() -> &'static ThemeSet {
    static DEFAULT_THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    DEFAULT_THEME_SET.get_or_init(ThemeSet::load_defaults)
  }

  /// Look a theme up by name, falling back to [`DEFAULT_THEME`].
  fn get_theme(&self, theme_name: Option<&str>) -> &'static Theme {
    let name = theme_name
      .filter(|name| !name.is_empty())
      .unwrap_or(&self.theme_name);

    if let Some(theme) = Self::default_theme_set().themes.get(name) {
      return theme;
    }

    if let Some((_, embedded)) = EMBEDDED_THEMES
      .iter()
      .find(|(embedded, _)| embedded.eq_ignore_ascii_case(name))
    {
      return Self::theme_set().get(*embedded);
    }

    log::debug!("Unknown highlight theme '{name}', using {DEFAULT_THEME}");
    Self::default_theme_set()
      .themes
      .get(DEFAULT_THEME)
      .unwrap_or_else(|| {
        Self::theme_set().get(EmbeddedThemeName::InspiredGithub)
      })
  }
}

impl Default for SyntectHighlighter {
  fn default() -> Self {
    Self::new(None)
  }
}

impl SyntaxHighlighter for SyntectHighlighter {
  fn name(&self) -> &'static str {
    "Syntect"
  }

  fn supported_languages(&self) -> Vec<String> {
    Self::syntax_set()
      .syntaxes()
      .iter()
      .flat_map(|syntax| {
        std::iter::once(syntax.name.to_lowercase())
          .chain(syntax.file_extensions.iter().map(|ext| ext.to_lowercase()))
      })
      .collect()
  }

  fn available_themes(&self) -> Vec<String> {
    let mut themes: Vec<String> =
      Self::default_theme_set().themes.keys().cloned().collect();
    themes.extend(EMBEDDED_THEMES.iter().map(|(name, _)| (*name).to_owned()));
    themes.sort();
    themes.dedup();
    themes
  }

  fn supports_language(&self, language: &str) -> bool {
    Self::syntax_set().find_syntax_by_token(language).is_some()
  }

  fn highlight(
    &self,
    code: &str,
    language: &str,
    theme: Option<&str>,
  ) -> SyntaxResult<String> {
    let syntax_set = Self::syntax_set();
    let syntax = syntax_set
      .find_syntax_by_token(language)
      .ok_or_else(|| SyntaxError::UnsupportedLanguage(language.to_owned()))?;

    let mut highlighter = HighlightLines::new(syntax, self.get_theme(theme));
    let mut html = String::with_capacity(code.len() * 2);

    for line in LinesWithEndings::from(code) {
      let regions = highlighter
        .highlight_line(line, syntax_set)
        .map_err(|e| SyntaxError::HighlightingFailed(e.to_string()))?;
      let line_html =
        styled_line_to_highlighted_html(&regions[..], IncludeBackground::No)
          .map_err(|e| SyntaxError::HighlightingFailed(e.to_string()))?;
      html.push_str(&line_html);
    }

    Ok(html)
  }

  fn language_from_extension(&self, extension: &str) -> Option<String> {
    Self::syntax_set()
      .find_syntax_by_extension(extension)
      .map(|syntax| syntax.name.to_lowercase())
  }
}

/// Create a Syntect-based syntax manager using the given theme.
#[must_use]
pub fn create_syntect_manager(theme: Option<&str>) -> SyntaxManager {
  let theme = theme.unwrap_or(DEFAULT_THEME).to_owned();
  let highlighter = Box::new(SyntectHighlighter::new(Some(theme.clone())));
  let config = SyntaxConfig {
    default_theme: Some(theme),
    ..SyntaxConfig::default()
  };
  SyntaxManager::new(highlighter, config)
}
