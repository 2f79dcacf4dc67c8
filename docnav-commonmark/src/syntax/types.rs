//! Core types and traits for syntax highlighting.

use std::collections::HashMap;

use super::error::{SyntaxError, SyntaxResult};

/// Trait for syntax highlighting backends.
///
/// Implementations produce the *inner* HTML of a code element: escaped text
/// interleaved with styled spans. The caller owns the surrounding `<pre>` and
/// `<code>` elements.
pub trait SyntaxHighlighter: Send + Sync {
  /// Get the name of this highlighter backend
  fn name(&self) -> &'static str;

  /// Get a list of supported languages
  fn supported_languages(&self) -> Vec<String>;

  /// Get a list of available themes
  fn available_themes(&self) -> Vec<String>;

  /// Check if a language is supported
  fn supports_language(&self, language: &str) -> bool {
    self
      .supported_languages()
      .iter()
      .any(|lang| lang.eq_ignore_ascii_case(language))
  }

  /// Check if a theme is available
  fn has_theme(&self, theme: &str) -> bool {
    self
      .available_themes()
      .iter()
      .any(|t| t.eq_ignore_ascii_case(theme))
  }

  /// Highlight code with the specified language and theme.
  ///
  /// # Errors
  ///
  /// Returns an error if the backend fails while highlighting.
  fn highlight(
    &self,
    code: &str,
    language: &str,
    theme: Option<&str>,
  ) -> SyntaxResult<String>;

  /// Detect language from a file extension
  fn language_from_extension(&self, extension: &str) -> Option<String>;
}

/// Configuration for syntax highlighting
#[derive(Debug, Clone)]
pub struct SyntaxConfig {
  /// Default theme to use when none is specified
  pub default_theme: Option<String>,

  /// Language aliases for mapping common names to supported languages
  pub language_aliases: HashMap<String, String>,
}

impl Default for SyntaxConfig {
  fn default() -> Self {
    let language_aliases = [
      ("js", "javascript"),
      ("ts", "typescript"),
      ("py", "python"),
      ("rb", "ruby"),
      ("rs", "rust"),
      ("sh", "bash"),
      ("shell", "bash"),
      ("console", "bash"),
      ("yml", "yaml"),
      ("md", "markdown"),
      ("c++", "cpp"),
    ]
    .into_iter()
    .map(|(alias, language)| (alias.to_owned(), language.to_owned()))
    .collect();

    Self {
      default_theme: None,
      language_aliases,
    }
  }
}

/// High-level syntax highlighting manager.
///
/// Owns a backend and resolves language aliases before asking it to
/// highlight.
pub struct SyntaxManager {
  highlighter: Box<dyn SyntaxHighlighter>,
  config:      SyntaxConfig,
}

impl std::fmt::Debug for SyntaxManager {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SyntaxManager")
      .field("highlighter", &self.highlighter.name())
      .field("config", &self.config)
      .finish()
  }
}

impl SyntaxManager {
  /// Create a new syntax manager with the given highlighter and config
  #[must_use]
  pub fn new(
    highlighter: Box<dyn SyntaxHighlighter>,
    config: SyntaxConfig,
  ) -> Self {
    Self {
      highlighter,
      config,
    }
  }

  /// Create a new syntax manager with the default configuration
  #[must_use]
  pub fn with_highlighter(highlighter: Box<dyn SyntaxHighlighter>) -> Self {
    Self::new(highlighter, SyntaxConfig::default())
  }

  /// Get the underlying highlighter
  #[must_use]
  pub fn highlighter(&self) -> &dyn SyntaxHighlighter {
    self.highlighter.as_ref()
  }

  /// Get the configuration
  #[must_use]
  pub const fn config(&self) -> &SyntaxConfig {
    &self.config
  }

  /// Update the configuration
  pub fn set_config(&mut self, config: SyntaxConfig) {
    self.config = config;
  }

  /// Resolve a language name using aliases. Lookup is case-insensitive.
  #[must_use]
  pub fn resolve_language(&self, language: &str) -> String {
    let language = language.to_lowercase();
    self
      .config
      .language_aliases
      .get(&language)
      .cloned()
      .unwrap_or(language)
  }

  /// Whether code in this language would be highlighted.
  #[must_use]
  pub fn supports(&self, language: &str) -> bool {
    self
      .highlighter
      .supports_language(&self.resolve_language(language))
  }

  /// Highlight code with automatic language resolution.
  ///
  /// # Errors
  ///
  /// Returns [`SyntaxError::UnsupportedLanguage`] if the backend does not know
  /// the language, or the backend's error if highlighting fails.
  pub fn highlight_code(
    &self,
    code: &str,
    language: &str,
    theme: Option<&str>,
  ) -> SyntaxResult<String> {
    let resolved_language = self.resolve_language(language);
    let theme = theme.or(self.config.default_theme.as_deref());

    if self.highlighter.supports_language(&resolved_language) {
      return self.highlighter.highlight(code, &resolved_language, theme);
    }

    Err(SyntaxError::UnsupportedLanguage(resolved_language))
  }

  /// Highlight code, picking the language from a filename's extension.
  ///
  /// # Errors
  ///
  /// Returns [`SyntaxError::UnsupportedLanguage`] if no language is known for
  /// the extension.
  pub fn highlight_from_filename(
    &self,
    code: &str,
    filename: &str,
    theme: Option<&str>,
  ) -> SyntaxResult<String> {
    let language = std::path::Path::new(filename)
      .extension()
      .and_then(|ext| ext.to_str())
      .and_then(|ext| self.highlighter.language_from_extension(ext))
      .ok_or_else(|| {
        SyntaxError::UnsupportedLanguage(format!("from filename: {filename}"))
      })?;
    self.highlight_code(code, &language, theme)
  }
}
