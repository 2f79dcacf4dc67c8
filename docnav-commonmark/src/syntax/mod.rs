//! Trait-based syntax highlighting for code fences.
//!
//! The only bundled backend is **Syntect**, using Sublime Text syntax
//! definitions with two-face added for extended syntaxes and themes. Without
//! the `syntect` feature there is no backend and code renders unhighlighted.

pub mod error;
pub mod types;

pub use error::{SyntaxError, SyntaxResult};
pub use types::{SyntaxConfig, SyntaxHighlighter, SyntaxManager};

#[cfg(feature = "syntect")] mod syntect;
#[cfg(feature = "syntect")] pub use self::syntect::*;

/// Create the default syntax manager based on available features.
///
/// # Errors
///
/// Returns [`SyntaxError::NoBackendAvailable`] if no backend feature is
/// enabled.
pub fn create_default_manager(theme: Option<&str>) -> SyntaxResult<SyntaxManager> {
  #[cfg(feature = "syntect")]
  {
    Ok(create_syntect_manager(theme))
  }

  #[cfg(not(feature = "syntect"))]
  {
    let _ = theme;
    Err(SyntaxError::NoBackendAvailable)
  }
}

#[cfg(all(test, feature = "syntect"))]
mod tests {
  use super::*;

  #[test]
  fn test_syntect_highlighter() {
    let highlighter = SyntectHighlighter::default();
    assert_eq!(highlighter.name(), "Syntect");
    assert!(!highlighter.supported_languages().is_empty());
    assert!(highlighter.available_themes().len() > 30);
    assert!(highlighter.has_theme("Dracula"));
  }

  #[test]
  fn test_highlight_emits_spans_without_pre() {
    let highlighter = SyntectHighlighter::default();
    let html = highlighter
      .highlight("fn main() {}\n", "rust", None)
      .expect("highlight rust");
    assert!(html.contains("<span"));
    assert!(html.contains("main"));
    assert!(!html.contains("<pre"));
  }

  #[test]
  fn test_highlight_escapes_source() {
    let highlighter = SyntectHighlighter::default();
    let html = highlighter
      .highlight("let a = \"<b>\" && 1;\n", "js", None)
      .expect("highlight js");
    assert!(html.contains("&lt;b&gt;"));
    assert!(!html.contains("<b>"));
  }

  #[test]
  fn test_language_resolution() {
    let manager = create_default_manager(None).expect("default manager");
    assert!(manager.supports("js"));
    assert!(manager.supports("Python"));
    assert!(manager.supports("rust"));
    assert!(!manager.supports("definitely-not-a-language"));
  }

  #[test]
  fn test_unknown_theme_falls_back() {
    let manager =
      create_default_manager(Some("NoSuchTheme")).expect("default manager");
    assert!(manager.highlight_code("x = 1\n", "py", None).is_ok());
  }
}
