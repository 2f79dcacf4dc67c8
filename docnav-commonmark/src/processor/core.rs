//! Core implementation of the document processor.
//!
//! The pipeline is tokenize → classify → assemble (slug assignment) →
//! render + TOC. Each stage is exposed so callers can stop early.
use std::sync::Arc;

use comrak::options::Options;
use log::{debug, trace};

use super::types::{DocumentOptions, DocumentProcessor};
use crate::{
  classify::{ClassifyOptions, classify},
  error::PipelineResult,
  render::HtmlRenderer,
  syntax::create_default_manager,
  tokenize::{Token, comrak_options, tokenize},
  toc::{Toc, TocOptions},
  types::{Document, RenderResult},
};

/// Features that can be queried on a processor instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorFeature {
  /// GitHub Flavored Markdown support
  Gfm,
  /// Syntax highlighting for code fences
  SyntaxHighlighting,
  /// `#` self-links on headings
  AnchorLinks,
}

impl DocumentProcessor {
  /// Create a new `DocumentProcessor` with the given options.
  #[must_use]
  pub fn new(options: DocumentOptions) -> Self {
    let syntax_manager = if options.highlight_code {
      create_default_manager(options.highlight_theme.as_deref())
        .map_err(|e| debug!("Syntax highlighting disabled: {e}"))
        .ok()
        .map(Arc::new)
    } else {
      None
    };

    Self {
      options,
      syntax_manager,
    }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &DocumentOptions {
    &self.options
  }

  /// Check if a specific feature is enabled.
  #[must_use]
  pub const fn has_feature(&self, feature: ProcessorFeature) -> bool {
    match feature {
      ProcessorFeature::Gfm => self.options.gfm,
      ProcessorFeature::SyntaxHighlighting => self.syntax_manager.is_some(),
      ProcessorFeature::AnchorLinks => self.options.anchor_links,
    }
  }

  /// Split markdown into top-level tokens.
  #[must_use]
  pub fn tokenize(&self, markdown: &str) -> Vec<Token> {
    tokenize(markdown, &self.comrak_options())
  }

  /// Tokenize, classify and assemble a document with slugs assigned.
  ///
  /// # Errors
  ///
  /// Returns [`RenderError::TokenContract`](crate::RenderError) if the
  /// tokenizer output breaks its contract.
  pub fn document(&self, markdown: &str) -> PipelineResult<Document> {
    let options = ClassifyOptions {
      diagram_keywords: self.options.diagram_keywords.clone(),
    };
    let blocks = classify(self.tokenize(markdown), &options)?;
    Ok(Document::from_blocks(blocks))
  }

  /// The renderer configured for this processor.
  #[must_use]
  pub fn renderer(&self) -> HtmlRenderer<'_> {
    let renderer =
      HtmlRenderer::new().with_anchor_links(self.options.anchor_links);
    match &self.syntax_manager {
      Some(manager) => {
        renderer.with_syntax(manager, self.options.highlight_theme.as_deref())
      },
      None => renderer,
    }
  }

  /// Render markdown to HTML, building the table of contents alongside.
  ///
  /// # Errors
  ///
  /// Returns [`RenderError::TokenContract`](crate::RenderError) if the
  /// tokenizer output breaks its contract. Malformed markdown never errors.
  pub fn render(&self, markdown: &str) -> PipelineResult<RenderResult> {
    let document = self.document(markdown)?;
    let html = self.renderer().render(&document);
    let headers = document.outline();
    let toc = Toc::build_with(&headers, TocOptions {
      max_level: self.options.toc_max_level,
    });
    let title = headers
      .iter()
      .find(|header| header.level == 1)
      .map(|header| header.text.clone());

    trace!(
      "Rendered {} blocks, {} headings, TOC depth {}",
      document.len(),
      headers.len(),
      toc.max_depth()
    );

    Ok(RenderResult {
      html,
      headers,
      toc,
      title,
      document,
    })
  }

  fn comrak_options(&self) -> Options<'static> {
    comrak_options(self.options.gfm)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Block;

  fn plain_processor() -> DocumentProcessor {
    DocumentProcessor::new(DocumentOptions {
      highlight_code: false,
      ..DocumentOptions::default()
    })
  }

  #[test]
  fn test_features() {
    let processor = plain_processor();
    assert!(processor.has_feature(ProcessorFeature::Gfm));
    assert!(!processor.has_feature(ProcessorFeature::SyntaxHighlighting));
    assert!(!processor.has_feature(ProcessorFeature::AnchorLinks));
  }

  #[test]
  fn test_render_collects_title_and_headers() {
    let result = plain_processor()
      .render("# Guide\n\nText.\n\n## Setup\n\n# Appendix\n")
      .expect("render");
    assert_eq!(result.title.as_deref(), Some("Guide"));
    let ids: Vec<&str> = result.headers.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, ["guide", "setup", "appendix"]);
    assert_eq!(result.toc.entries().len(), 2);
  }

  #[test]
  fn test_toc_max_level() {
    let processor = DocumentProcessor::new(DocumentOptions {
      highlight_code: false,
      toc_max_level: 2,
      ..DocumentOptions::default()
    });
    let result = processor
      .render("# A\n\n## B\n\n### C\n")
      .expect("render");
    assert_eq!(result.toc.slugs(), ["a", "b"]);
    // Headings left out of the TOC still get ids.
    assert!(result.html.contains("<h3 id=\"c\">"));
  }

  #[test]
  fn test_gfm_table_is_prose() {
    let document = plain_processor()
      .document("| a | b |\n|---|---|\n| 1 | 2 |\n")
      .expect("document");
    assert!(matches!(&document.blocks()[0], Block::Prose(p) if p.markup.as_deref().is_some_and(|m| m.contains("<table>"))));
  }

  #[test]
  fn test_explicit_anchor_in_markdown() {
    let result = plain_processor()
      .render("## Install\n\n## Setup {#install}\n")
      .expect("render");
    assert_eq!(result.toc.slugs(), ["install-2", "install"]);
    assert!(result.html.contains("<h2 id=\"install\">Setup</h2>"));
  }

  #[test]
  fn test_empty_input() {
    let result = plain_processor().render("").expect("render");
    assert!(result.html.is_empty());
    assert!(result.toc.is_empty());
    assert_eq!(result.title, None);
  }
}
