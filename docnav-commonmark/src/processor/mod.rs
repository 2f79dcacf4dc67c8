//! Document processing.
//!
//! - [`core`]: the processor and its tokenize → classify → render pipeline
//! - [`process`]: convenience entry points with error recovery and presets
//! - [`types`]: options and the builder
pub mod core;
pub mod process;
pub mod types;

pub use self::core::ProcessorFeature;

pub use process::{
  ERROR_FRAGMENT,
  ProcessorPreset,
  create_processor,
  process_markdown_file,
  process_markdown_string,
  process_with_recovery,
  render_catching_panics,
};
pub use types::{DocumentOptions, DocumentOptionsBuilder, DocumentProcessor};
