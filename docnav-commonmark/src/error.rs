//! Error types for the render pipeline.
//!
//! Malformed *content* never surfaces here; it degrades locally. These errors
//! are for input that violates the tokenizer contract itself.

/// Result type for render pipeline operations.
pub type PipelineResult<T> = Result<T, RenderError>;

/// Errors that can occur while classifying or rendering a token stream.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
  #[error("Tokenizer contract violated at token {index}: {reason}")]
  TokenContract { index: usize, reason: String },

  #[error("Rendering panicked: {0}")]
  Panicked(String),
}
