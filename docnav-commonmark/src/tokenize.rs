//! Adapter between comrak's block tree and the classifier's token stream.
//!
//! Only top-level nodes become tokens. Headings and fences nested inside
//! lists or block quotes stay part of their containing block.
use comrak::{
  Arena,
  nodes::{AstNode, NodeCodeBlock, NodeHeading, NodeValue},
  options::Options,
  parse_document,
};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::utils::codeblock::FenceTracker;

/// A block-level token as delivered by the tokenizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Token {
  Heading {
    level:  u8,
    /// Plain inline text, single line.
    text:   String,
    /// Inline HTML of the heading content.
    markup: Option<String>,
  },
  Fence {
    /// Info string after the opening fence, as written.
    info:    String,
    /// Literal body between the fences.
    content: String,
    /// Raw source lines of the whole fence, fences included.
    raw:     String,
    /// Whether a matching closing fence was found.
    closed:  bool,
  },
  Block {
    source: String,
    markup: Option<String>,
  },
}

/// Build the comrak options used for tokenizing.
#[must_use]
pub fn comrak_options(gfm: bool) -> Options<'static> {
  let mut options = Options::default();
  if gfm {
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.autolink = true;
    options.extension.superscript = true;
  }
  options.extension.description_lists = true;
  // Ids are assigned by the slug registry, not by comrak.
  options.extension.header_ids = None;
  // Raw HTML in the source is shown as text.
  options.render.escape = true;
  options
}

/// Split markdown source into top-level tokens.
#[must_use]
pub fn tokenize(source: &str, options: &Options<'_>) -> Vec<Token> {
  let arena = Arena::new();
  let root = parse_document(&arena, source, options);
  let lines: Vec<&str> = source.lines().collect();

  let tokens: Vec<Token> = root
    .children()
    .map(|node| token_for(node, &lines, options))
    .collect();

  trace!("Tokenized {} top-level blocks", tokens.len());
  tokens
}

fn token_for<'a>(
  node: &'a AstNode<'a>,
  lines: &[&str],
  options: &Options<'_>,
) -> Token {
  let (start, end) = {
    let data = node.data.borrow();
    (data.sourcepos.start.line, data.sourcepos.end.line)
  };
  let raw = source_lines(lines, start, end);

  match &node.data.borrow().value {
    NodeValue::Heading(NodeHeading { level, .. }) => {
      let mut markup = String::new();
      for child in node.children() {
        render_html(child, options, &mut markup);
      }
      Token::Heading {
        level:  *level,
        text:   extract_inline_text(node).trim().to_owned(),
        markup: Some(markup),
      }
    },
    NodeValue::CodeBlock(block) if block.fenced => {
      let NodeCodeBlock { info, literal, .. } = &**block;
      let closed = FenceTracker::is_closed(raw.lines());
      Token::Fence {
        info: info.clone(),
        content: literal.clone(),
        raw,
        closed,
      }
    },
    _ => {
      let mut markup = String::new();
      render_html(node, options, &mut markup);
      Token::Block {
        source: raw,
        markup: Some(markup),
      }
    },
  }
}

fn render_html<'a>(
  node: &'a AstNode<'a>,
  options: &Options<'_>,
  out: &mut String,
) {
  comrak::format_html(node, options, out).unwrap_or_default();
}

/// Source lines `start..=end` (1-based, inclusive).
fn source_lines(lines: &[&str], start: usize, end: usize) -> String {
  let from = start.saturating_sub(1).min(lines.len());
  let to = end.min(lines.len()).max(from);
  lines[from..to].join("\n")
}

/// Extract all inline text from a heading node.
///
/// Code spans, links and emphasis contribute their text; inline HTML and
/// images are dropped; line breaks become spaces.
pub fn extract_inline_text<'a>(node: &'a AstNode<'a>) -> String {
  let mut text = String::new();
  for child in node.children() {
    match &child.data.borrow().value {
      NodeValue::Text(t) => text.push_str(t),
      NodeValue::Code(t) => text.push_str(&t.literal),
      NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
      NodeValue::Link(..)
      | NodeValue::Emph
      | NodeValue::Strong
      | NodeValue::Strikethrough
      | NodeValue::Superscript => text.push_str(&extract_inline_text(child)),
      _ => {},
    }
  }
  text
}
