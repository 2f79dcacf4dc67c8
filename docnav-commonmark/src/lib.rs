//! # docnav-commonmark
//!
//! Renders long-form technical markdown into navigable HTML: every heading
//! gets a stable, collision-free id, a table of contents is built from the
//! heading hierarchy, code fences are syntax highlighted, diagram fences are
//! left for client-side rendering, and a navigation state machine keeps the
//! TOC highlight in step with scroll position and URL hash.
//!
//! ## Quick Start
//!
//! ```rust
//! use docnav_commonmark::{DocumentOptions, DocumentProcessor};
//!
//! let processor = DocumentProcessor::new(DocumentOptions::default());
//! let result = processor
//!   .render("# Intro\n\n## Details\n\n## Details\n")
//!   .expect("valid token stream");
//!
//! assert_eq!(result.toc.slugs(), ["intro", "details", "details-2"]);
//! ```
//!
//! ## Navigation
//!
//! ```rust
//! use std::time::Duration;
//!
//! use docnav_commonmark::{
//!   DocumentOptions,
//!   DocumentProcessor,
//!   navigation::{NavigationConfig, NavigationEvent, NavigationSynchronizer},
//! };
//!
//! let result = DocumentProcessor::new(DocumentOptions::default())
//!   .render("# A\n\n# B\n")
//!   .expect("valid token stream");
//!
//! let mut nav =
//!   NavigationSynchronizer::new(&result.document, NavigationConfig::default());
//! nav.mount(None);
//! nav.dispatch(NavigationEvent::TocClick { slug: "b".into() }, Duration::ZERO);
//! assert_eq!(nav.state().active_slug.as_deref(), Some("b"));
//! ```

pub mod classify;
pub mod error;
pub mod navigation;
pub mod processor;
pub mod render;
pub mod slug;
pub mod syntax;
pub mod toc;
pub mod tokenize;
mod types;
pub mod utils;

pub use crate::{
  classify::{ClassifyOptions, classify},
  error::{PipelineResult, RenderError},
  processor::{
    DocumentOptions,
    DocumentOptionsBuilder,
    DocumentProcessor,
    ProcessorFeature,
    ProcessorPreset,
    create_processor,
    process_markdown_file,
    process_markdown_string,
    process_with_recovery,
    render_catching_panics,
  },
  render::{AnchorIssue, HtmlRenderer, verify_anchors},
  slug::SlugRegistry,
  toc::{Toc, TocEntry, TocOptions},
  tokenize::Token,
  types::{
    Block,
    CodeFence,
    DiagramFence,
    Document,
    Header,
    Heading,
    Prose,
    RenderResult,
  },
};
