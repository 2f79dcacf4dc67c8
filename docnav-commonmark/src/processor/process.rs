//! High-level processing functions with error recovery.
use std::{
  fs,
  panic::{AssertUnwindSafe, catch_unwind},
  path::Path,
};

use log::error;

use super::types::{DocumentOptions, DocumentProcessor};
use crate::{
  error::{PipelineResult, RenderError},
  types::{Document, RenderResult},
};

/// Placeholder shown in place of a document that could not be rendered.
pub const ERROR_FRAGMENT: &str =
  "<div class=\"error\">Critical error processing markdown content</div>";

/// Render markdown, turning a panic anywhere in the pipeline into
/// [`RenderError::Panicked`].
///
/// # Errors
///
/// Returns an error if the tokenizer contract is violated or rendering
/// panics.
pub fn render_catching_panics(
  processor: &DocumentProcessor,
  content: &str,
) -> PipelineResult<RenderResult> {
  catch_panics(|| processor.render(content))
}

/// Render markdown, never failing.
///
/// Contract violations and panics are logged and replaced by
/// [`ERROR_FRAGMENT`] so the page is never blank.
#[must_use]
pub fn process_with_recovery(
  processor: &DocumentProcessor,
  content: &str,
) -> RenderResult {
  render_catching_panics(processor, content).unwrap_or_else(|e| {
    error!("Failed to render markdown: {e}");
    error_result()
  })
}

fn catch_panics<F>(render: F) -> PipelineResult<RenderResult>
where
  F: FnOnce() -> PipelineResult<RenderResult>,
{
  catch_unwind(AssertUnwindSafe(render)).unwrap_or_else(|payload| {
    Err(RenderError::Panicked(panic_message(&*payload).to_owned()))
  })
}

fn error_result() -> RenderResult {
  RenderResult {
    html:     ERROR_FRAGMENT.to_owned(),
    headers:  Vec::new(),
    toc:      crate::toc::Toc::default(),
    title:    None,
    document: Document::default(),
  }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
  payload
    .downcast_ref::<String>()
    .map(String::as_str)
    .or_else(|| payload.downcast_ref::<&str>().copied())
    .unwrap_or("unknown panic payload")
}

/// Preset configurations for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorPreset {
  /// GFM, no highlighting, no heading self-links.
  Basic,
  /// GFM with highlighting and heading self-links, for documentation sites.
  Docs,
}

/// Create a processor from a preset.
#[must_use]
pub fn create_processor(preset: ProcessorPreset) -> DocumentProcessor {
  let options = match preset {
    ProcessorPreset::Basic => {
      DocumentOptions {
        highlight_code: false,
        ..DocumentOptions::default()
      }
    },
    ProcessorPreset::Docs => {
      DocumentOptions {
        highlight_code: true,
        anchor_links: true,
        ..DocumentOptions::default()
      }
    },
  };

  DocumentProcessor::new(options)
}

/// Render a markdown string with a preset, never failing.
#[must_use]
pub fn process_markdown_string(
  content: &str,
  preset: ProcessorPreset,
) -> RenderResult {
  process_with_recovery(&create_processor(preset), content)
}

/// Read and render a markdown file with a preset.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn process_markdown_file(
  file_path: &Path,
  preset: ProcessorPreset,
) -> Result<RenderResult, String> {
  let content = fs::read_to_string(file_path).map_err(|e| {
    format!("Failed to read file {}: {e}", file_path.display())
  })?;
  Ok(process_markdown_string(&content, preset))
}
