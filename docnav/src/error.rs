use std::{io, path::PathBuf};

use docnav_commonmark::RenderError;
use docnav_config::ConfigError;
use thiserror::Error;

/// Top-level error type for the docnav binary.
#[derive(Debug, Error)]
pub enum DocnavError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("Template error: {0}")]
  Template(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Rendering error in {}: {source}", path.display())]
  Render {
    path:   PathBuf,
    source: RenderError,
  },

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error(
    "No input given. Pass one on the command line or set `input` in the config"
  )]
  MissingInput,

  #[error("Input is neither a markdown file nor a directory: {}", .0.display())]
  InvalidInput(PathBuf),

  #[error("Failed to build worker pool: {0}")]
  ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl From<tera::Error> for DocnavError {
  fn from(e: tera::Error) -> Self {
    Self::Template(e.to_string())
  }
}

pub type Result<T> = std::result::Result<T, DocnavError>;
