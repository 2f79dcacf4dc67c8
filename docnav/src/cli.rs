use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docnav_config::Config;

/// Command line interface for docnav
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "docnav: navigable documentation pages from markdown"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(
    short = 'c',
    long = "config-file",
    global = true,
    action = clap::ArgAction::Append
  )]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the docnav CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new docnav configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "docnav.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Render a markdown file, or every markdown file under a directory, into
  /// HTML pages.
  Render {
    /// Markdown file or directory. Falls back to `input` from the config.
    input: Option<PathBuf>,

    /// Output directory for generated pages.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the table of contents as JSON to this path.
    #[arg(long = "toc-json")]
    toc_json: Option<PathBuf>,

    /// Fence info string rendered as a client-side diagram (can be specified
    /// multiple times; replaces the configured list).
    #[arg(long = "diagram-keyword", action = clap::ArgAction::Append)]
    diagram_keywords: Vec<String>,

    /// Script each page loads to draw diagram blocks, e.g. a mermaid bundle
    /// URL.
    #[arg(long = "diagram-script")]
    diagram_script: Option<String>,

    /// Disable syntax highlighting for code fences.
    #[arg(long = "no-highlight")]
    no_highlight: bool,

    /// Syntax highlighting theme.
    #[arg(long)]
    theme: Option<String>,

    /// Number of threads to use when rendering a directory.
    #[arg(short = 'p', long = "jobs")]
    jobs: Option<usize>,

    /// Title of the documentation site.
    #[arg(short = 'T', long)]
    title: Option<String>,

    /// Append a `#` self-link to every heading.
    #[arg(long = "anchor-links")]
    anchor_links: bool,
  },

  /// Render without writing pages and verify that every TOC entry resolves to
  /// exactly one heading.
  Check {
    /// Markdown file or directory. Falls back to `input` from the config.
    input: Option<PathBuf>,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

impl Commands {
  /// Apply command line flags on top of a loaded configuration. Flags win
  /// over config files and `--config` overrides.
  pub fn apply_to(&self, config: &mut Config) {
    match self {
      Self::Render {
        input,
        output,
        diagram_keywords,
        diagram_script,
        no_highlight,
        theme,
        jobs,
        title,
        anchor_links,
        ..
      } => {
        if let Some(input) = input {
          config.input = Some(input.clone());
        }
        if let Some(output) = output {
          config.output_dir.clone_from(output);
        }
        if !diagram_keywords.is_empty() {
          config.diagram_keywords.clone_from(diagram_keywords);
        }
        if diagram_script.is_some() {
          config.diagram_script.clone_from(diagram_script);
        }
        if *no_highlight {
          config.highlight_code = false;
        }
        if theme.is_some() {
          config.highlight_theme.clone_from(theme);
        }
        if jobs.is_some() {
          config.jobs = *jobs;
        }
        if let Some(title) = title {
          config.title.clone_from(title);
        }
        if *anchor_links {
          config.anchor_links = true;
        }
      },
      Self::Check { input } => {
        if let Some(input) = input {
          config.input = Some(input.clone());
        }
      },
      Self::Init { .. } => {},
    }
  }
}
