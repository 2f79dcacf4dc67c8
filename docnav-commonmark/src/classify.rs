//! Block classification: tokens in, semantic blocks out.
//!
//! Classification is total. Every token yields exactly one block, in order;
//! malformed content degrades to verbatim prose instead of being dropped.
use log::{debug, warn};

use crate::{
  error::{PipelineResult, RenderError},
  tokenize::Token,
  types::{Block, CodeFence, DiagramFence, Heading, Prose},
  utils::split_explicit_anchor,
};

/// Fence keyword recognized as a diagram when nothing else is configured.
pub const DEFAULT_DIAGRAM_KEYWORD: &str = "mermaid";

/// Options for the block classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyOptions {
  /// Fence info strings (compared case-insensitively) rendered as diagrams.
  pub diagram_keywords: Vec<String>,
}

impl Default for ClassifyOptions {
  fn default() -> Self {
    Self {
      diagram_keywords: vec![DEFAULT_DIAGRAM_KEYWORD.to_owned()],
    }
  }
}

impl ClassifyOptions {
  /// The configured keyword matching this info string, lowercased.
  #[must_use]
  pub fn diagram_keyword(&self, info: &str) -> Option<String> {
    let info = info.trim();
    self
      .diagram_keywords
      .iter()
      .find(|keyword| keyword.trim().eq_ignore_ascii_case(info))
      .map(|keyword| keyword.trim().to_lowercase())
  }
}

/// Classify a token stream into blocks.
///
/// # Errors
///
/// Returns [`RenderError::TokenContract`] if a token breaks the tokenizer
/// contract (a fence info string or heading text spanning several lines).
pub fn classify(
  tokens: Vec<Token>,
  options: &ClassifyOptions,
) -> PipelineResult<Vec<Block>> {
  tokens
    .into_iter()
    .enumerate()
    .map(|(index, token)| classify_token(index, token, options))
    .collect()
}

fn classify_token(
  index: usize,
  token: Token,
  options: &ClassifyOptions,
) -> PipelineResult<Block> {
  match token {
    Token::Fence {
      info,
      content,
      raw,
      closed,
    } => {
      if info.contains('\n') {
        return Err(RenderError::TokenContract {
          index,
          reason: "fence info string spans multiple lines".to_owned(),
        });
      }

      if !closed {
        warn!("Unterminated code fence at block {index}, rendering verbatim");
        return Ok(Block::verbatim(raw));
      }

      if let Some(keyword) = options.diagram_keyword(&info) {
        debug!("Block {index} is a '{keyword}' diagram");
        return Ok(Block::DiagramFence(DiagramFence { keyword, content }));
      }

      let language = info.trim();
      Ok(Block::CodeFence(CodeFence {
        language: (!language.is_empty()).then(|| language.to_owned()),
        content,
      }))
    },

    Token::Heading {
      level,
      text,
      markup,
    } => {
      if text.contains('\n') {
        return Err(RenderError::TokenContract {
          index,
          reason: "heading text spans multiple lines".to_owned(),
        });
      }

      let level = if (1..=6).contains(&level) {
        level
      } else {
        warn!("Heading level {level} at block {index} out of range, using 6");
        6
      };

      let (text, anchor) = split_explicit_anchor(&text);
      let markup = markup.map(|markup| split_explicit_anchor(&markup).0.to_owned());

      Ok(Block::Heading(Heading {
        level,
        text: text.trim().to_owned(),
        markup,
        anchor: anchor.map(str::to_owned),
        slug: None,
      }))
    },

    Token::Block { source, markup } => {
      Ok(Block::Prose(Prose {
        text: source,
        markup,
      }))
    },
  }
}
