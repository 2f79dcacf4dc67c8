//! Table of contents construction.
//!
//! A flat, ordered heading list is folded into a forest by level: each entry
//! nests under the most recent shallower heading. Levels that were skipped in
//! the document are not invented in the tree.
use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};

use crate::{types::Header, utils::fragment_for};

/// One node of the outline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TocEntry {
  pub title:    String,
  pub slug:     String,
  pub level:    u8,
  pub children: Vec<Self>,
}

impl TocEntry {
  fn new(header: &Header) -> Self {
    Self {
      title:    header.text.clone(),
      slug:     header.id.clone(),
      level:    header.level,
      children: Vec::new(),
    }
  }

  fn depth(&self) -> usize {
    1 + self.children.iter().map(Self::depth).max().unwrap_or(0)
  }
}

/// Options controlling which headings enter the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocOptions {
  /// Deepest heading level included (1-6).
  pub max_level: u8,
}

impl Default for TocOptions {
  fn default() -> Self {
    Self { max_level: 6 }
  }
}

/// The outline of a document: a forest, since a document may start at any
/// level or contain several top-level headings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Toc {
  entries: Vec<TocEntry>,
}

impl Toc {
  /// Fold an ordered heading list into a forest.
  #[must_use]
  pub fn build(headers: &[Header]) -> Self {
    Self::build_with(headers, TocOptions::default())
  }

  /// Like [`Toc::build`], skipping headings deeper than `options.max_level`.
  #[must_use]
  pub fn build_with(headers: &[Header], options: TocOptions) -> Self {
    let mut roots = Vec::new();
    // Open entries, shallowest first. An entry is attached to its parent (or
    // the roots) when it is closed, which keeps siblings in document order.
    let mut stack: Vec<TocEntry> = Vec::new();

    for header in headers.iter().filter(|h| h.level <= options.max_level) {
      while stack.last().is_some_and(|open| open.level >= header.level) {
        close_top(&mut stack, &mut roots);
      }
      stack.push(TocEntry::new(header));
    }

    while !stack.is_empty() {
      close_top(&mut stack, &mut roots);
    }

    Self { entries: roots }
  }

  /// Top-level entries.
  #[must_use]
  pub fn entries(&self) -> &[TocEntry] {
    &self.entries
  }

  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Pre-order traversal; reproduces document heading order.
  #[must_use]
  pub fn flatten(&self) -> Vec<&TocEntry> {
    fn walk<'a>(entries: &'a [TocEntry], out: &mut Vec<&'a TocEntry>) {
      for entry in entries {
        out.push(entry);
        walk(&entry.children, out);
      }
    }

    let mut out = Vec::new();
    walk(&self.entries, &mut out);
    out
  }

  /// All slugs in pre-order.
  #[must_use]
  pub fn slugs(&self) -> Vec<&str> {
    self
      .flatten()
      .into_iter()
      .map(|entry| entry.slug.as_str())
      .collect()
  }

  /// Nesting depth of the forest, 0 when empty.
  #[must_use]
  pub fn max_depth(&self) -> usize {
    self.entries.iter().map(TocEntry::depth).max().unwrap_or(0)
  }

  /// Render the outline as a nested `<ul>` sidebar.
  ///
  /// Every link carries the percent-encoded slug as its fragment and the raw
  /// slug in `data-slug`, which is what a navigation runtime highlights by.
  #[must_use]
  pub fn to_html(&self) -> String {
    let mut html = String::new();
    if !self.entries.is_empty() {
      write_list(&mut html, &self.entries);
    }
    html
  }

  /// Serialize the forest as JSON for a client runtime.
  ///
  /// # Errors
  ///
  /// Returns an error if serialization fails.
  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string(self)
  }
}

fn close_top(stack: &mut Vec<TocEntry>, roots: &mut Vec<TocEntry>) {
  if let Some(entry) = stack.pop() {
    match stack.last_mut() {
      Some(parent) => parent.children.push(entry),
      None => roots.push(entry),
    }
  }
}

fn write_list(html: &mut String, entries: &[TocEntry]) {
  html.push_str("<ul>");
  for entry in entries {
    // Writing into a String cannot fail.
    let _ = write!(
      html,
      "<li><a href=\"#{}\" data-slug=\"{}\">{}</a>",
      encode_double_quoted_attribute(&fragment_for(&entry.slug)),
      encode_double_quoted_attribute(&entry.slug),
      encode_text(&entry.title),
    );
    if !entry.children.is_empty() {
      write_list(html, &entry.children);
    }
    html.push_str("</li>");
  }
  html.push_str("</ul>");
}
