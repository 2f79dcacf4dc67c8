//! Types for docnav-commonmark public API and internal use.
use serde::{Deserialize, Serialize};

use crate::{slug::SlugRegistry, toc::Toc};

/// A block of prose: paragraphs, lists, quotes, tables and anything else that
/// is neither a heading nor a top-level fence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prose {
  /// Raw source text of the block.
  pub text: String,

  /// HTML produced by the tokenizer's inline pass. `None` means the text is
  /// emitted escaped and verbatim, which is how degraded blocks are carried.
  pub markup: Option<String>,
}

/// A heading block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
  /// Heading level (1-6).
  pub level: u8,

  /// Plain heading text (inline formatting flattened, explicit anchor
  /// removed).
  pub text: String,

  /// Inline HTML of the heading content, if the tokenizer provided it.
  pub markup: Option<String>,

  /// Explicit `{#id}` anchor written by the author.
  pub anchor: Option<String>,

  /// Assigned slug. `None` until the block is part of a [`Document`].
  pub slug: Option<String>,
}

impl Heading {
  /// Assigned slug, empty if the heading has not been through a registry.
  #[must_use]
  pub fn slug(&self) -> &str {
    self.slug.as_deref().unwrap_or_default()
  }
}

/// A fenced block destined for syntax highlighting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeFence {
  /// Info string of the fence. `None` when it was empty or absent.
  pub language: Option<String>,

  /// Literal fence body.
  pub content: String,
}

/// A fenced block destined for client-side diagram rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagramFence {
  /// The diagram keyword that matched, lowercased (e.g. `mermaid`).
  pub keyword: String,

  /// Raw diagram source, byte-identical to the fence body.
  pub content: String,
}

/// A classified block of a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
  Prose(Prose),
  Heading(Heading),
  CodeFence(CodeFence),
  DiagramFence(DiagramFence),
}

impl Block {
  /// Degraded prose carrying raw text that must be rendered verbatim.
  #[must_use]
  pub fn verbatim(text: impl Into<String>) -> Self {
    Self::Prose(Prose {
      text:   text.into(),
      markup: None,
    })
  }

  #[must_use]
  pub const fn as_heading(&self) -> Option<&Heading> {
    match self {
      Self::Heading(heading) => Some(heading),
      _ => None,
    }
  }
}

/// An ordered, immutable sequence of classified blocks whose headings carry
/// unique slugs.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Document {
  blocks: Vec<Block>,
}

impl Document {
  /// Assemble a document from classified blocks, assigning heading slugs in
  /// document order with a fresh [`SlugRegistry`].
  ///
  /// Explicit anchors are reserved before any slug is generated so that a
  /// generated slug never takes an id the author asked for.
  #[must_use]
  pub fn from_blocks(mut blocks: Vec<Block>) -> Self {
    let mut registry = SlugRegistry::new();
    registry.reserve(blocks.iter().filter_map(|block| {
      block.as_heading().and_then(|heading| heading.anchor.as_deref())
    }));

    for block in &mut blocks {
      if let Block::Heading(heading) = block {
        let slug = match heading.anchor.as_deref() {
          Some(anchor) => registry.claim(anchor),
          None => registry.assign(&heading.text),
        };
        heading.slug = Some(slug);
      }
    }

    Self { blocks }
  }

  #[must_use]
  pub fn blocks(&self) -> &[Block] {
    &self.blocks
  }

  /// Headings in document order.
  pub fn headings(&self) -> impl Iterator<Item = &Heading> {
    self.blocks.iter().filter_map(Block::as_heading)
  }

  /// Whether any heading carries this slug.
  #[must_use]
  pub fn contains_slug(&self, slug: &str) -> bool {
    self.headings().any(|heading| heading.slug() == slug)
  }

  /// Flat `(text, slug, level)` view of the headings, used for TOC building.
  #[must_use]
  pub fn outline(&self) -> Vec<Header> {
    self
      .headings()
      .map(|heading| {
        Header {
          text:  heading.text.clone(),
          level: heading.level,
          id:    heading.slug().to_owned(),
        }
      })
      .collect()
  }

  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.blocks.is_empty()
  }

  #[must_use]
  pub const fn len(&self) -> usize {
    self.blocks.len()
  }
}

/// Represents a header in a Markdown document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
  /// Header text (inline content, no markdown formatting).
  pub text:  String,
  /// Header level (1-6).
  pub level: u8,
  /// Assigned anchor ID for the header.
  pub id:    String,
}

/// Result of Markdown processing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RenderResult {
  /// Rendered HTML output.
  pub html: String,

  /// Extracted headers, in document order.
  pub headers: Vec<Header>,

  /// Table of contents built from the headers.
  pub toc: Toc,

  /// Title of the document, if found (first H1).
  pub title: Option<String>,

  /// The classified document the HTML was rendered from.
  pub document: Document,
}
