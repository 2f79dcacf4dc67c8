//! Type definitions for the document processor.
//!
//! # Examples
//!
//! ```
//! use docnav_commonmark::{DocumentOptions, DocumentProcessor};
//!
//! let options = DocumentOptions {
//!   anchor_links: true,
//!   ..Default::default()
//! };
//!
//! let processor = DocumentProcessor::new(options);
//! ```

use std::sync::Arc;

use crate::{classify::DEFAULT_DIAGRAM_KEYWORD, syntax::SyntaxManager};

/// Options for configuring the document processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
  /// Enable GitHub Flavored Markdown (GFM) extensions.
  pub gfm: bool,

  /// Enable syntax highlighting for code fences.
  pub highlight_code: bool,

  /// Optional: Custom syntax highlighting theme name.
  pub highlight_theme: Option<String>,

  /// Fence info strings rendered as client-side diagrams.
  pub diagram_keywords: Vec<String>,

  /// Append a `#` self-link to every heading.
  pub anchor_links: bool,

  /// Deepest heading level that enters the table of contents.
  pub toc_max_level: u8,
}

impl Default for DocumentOptions {
  fn default() -> Self {
    Self {
      gfm:              true,
      highlight_code:   cfg!(feature = "syntect"),
      highlight_theme:  None,
      diagram_keywords: vec![DEFAULT_DIAGRAM_KEYWORD.to_owned()],
      anchor_links:     false,
      toc_max_level:    6,
    }
  }
}

/// Turns markdown text into a [`RenderResult`](crate::RenderResult).
///
/// Cheap to clone; the syntax manager is shared.
#[derive(Debug, Clone)]
pub struct DocumentProcessor {
  pub(crate) options:        DocumentOptions,
  pub(crate) syntax_manager: Option<Arc<SyntaxManager>>,
}

/// Builder for constructing `DocumentOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct DocumentOptionsBuilder {
  options: DocumentOptions,
}

impl DocumentOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Enable or disable GitHub Flavored Markdown.
  #[must_use]
  pub const fn gfm(mut self, enabled: bool) -> Self {
    self.options.gfm = enabled;
    self
  }

  /// Enable or disable syntax highlighting.
  #[must_use]
  pub const fn highlight_code(mut self, enabled: bool) -> Self {
    self.options.highlight_code = enabled;
    self
  }

  /// Set the syntax highlighting theme.
  #[must_use]
  pub fn highlight_theme<S: Into<String>>(mut self, theme: Option<S>) -> Self {
    self.options.highlight_theme = theme.map(Into::into);
    self
  }

  /// Replace the diagram keywords.
  #[must_use]
  pub fn diagram_keywords<I, S>(mut self, keywords: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.options.diagram_keywords =
      keywords.into_iter().map(Into::into).collect();
    self
  }

  /// Enable or disable heading self-links.
  #[must_use]
  pub const fn anchor_links(mut self, enabled: bool) -> Self {
    self.options.anchor_links = enabled;
    self
  }

  /// Limit the table of contents to headings up to `level`.
  #[must_use]
  pub const fn toc_max_level(mut self, level: u8) -> Self {
    self.options.toc_max_level = level;
    self
  }

  /// Build the final `DocumentOptions`.
  #[must_use]
  pub fn build(self) -> DocumentOptions {
    self.options
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_builder() {
    let options = DocumentOptionsBuilder::new()
      .gfm(false)
      .highlight_code(false)
      .highlight_theme(Some("Nord"))
      .diagram_keywords(["mermaid", "plantuml"])
      .anchor_links(true)
      .toc_max_level(3)
      .build();

    assert_eq!(options, DocumentOptions {
      gfm:              false,
      highlight_code:   false,
      highlight_theme:  Some("Nord".to_owned()),
      diagram_keywords: vec!["mermaid".to_owned(), "plantuml".to_owned()],
      anchor_links:     true,
      toc_max_level:    3,
    });
  }

  #[test]
  fn test_default_options() {
    let options = DocumentOptions::default();
    assert!(options.gfm);
    assert_eq!(options.diagram_keywords, ["mermaid"]);
    assert_eq!(options.toc_max_level, 6);
  }
}
