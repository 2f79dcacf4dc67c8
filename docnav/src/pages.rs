//! Rendering and checking of markdown inputs.
use std::{
  collections::BTreeMap,
  fs,
  path::{Path, PathBuf},
};

use docnav_commonmark::{
  AnchorIssue,
  DocumentProcessor,
  Toc,
  process_with_recovery,
  render_catching_panics,
  utils::collect_markdown_files,
  verify_anchors,
};
use docnav_config::Config;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::{
  error::{DocnavError, Result},
  html::template::{DEFAULT_CSS, MAIN_JS, PageTemplate},
};

/// Markdown sources found under an input path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
  /// Directory output paths are made relative to.
  pub root:  PathBuf,
  pub files: Vec<PathBuf>,
}

impl Inputs {
  /// Collect the markdown files named by `input`: the file itself, or every
  /// `*.md` below a directory.
  ///
  /// # Errors
  ///
  /// Returns an error if `input` is neither a file nor a directory.
  pub fn discover(input: &Path) -> Result<Self> {
    if input.is_dir() {
      let files = collect_markdown_files(input);
      info!("Found {} markdown files in {}", files.len(), input.display());
      Ok(Self {
        root: input.to_path_buf(),
        files,
      })
    } else if input.is_file() {
      Ok(Self {
        root:  input.parent().map(Path::to_path_buf).unwrap_or_default(),
        files: vec![input.to_path_buf()],
      })
    } else {
      Err(DocnavError::InvalidInput(input.to_path_buf()))
    }
  }

  fn relative<'a>(&self, file: &'a Path) -> &'a Path {
    file.strip_prefix(&self.root).unwrap_or(file)
  }
}

/// A page written to the output directory.
#[derive(Debug, Clone)]
pub struct RenderedPage {
  pub source: PathBuf,
  /// Page path relative to the output directory.
  pub output: PathBuf,
  pub toc:    Toc,
}

/// Anchor problems found in one source file.
#[derive(Debug, Clone)]
pub struct CheckReport {
  pub source: PathBuf,
  pub issues: Vec<AnchorIssue>,
  /// Set when the file could not be rendered at all.
  pub error:  Option<String>,
}

impl CheckReport {
  #[must_use]
  pub const fn is_clean(&self) -> bool {
    self.issues.is_empty() && self.error.is_none()
  }
}

/// Render every input into a full page under `config.output_dir`, then write
/// the shared assets.
///
/// # Errors
///
/// Returns an error if the input is missing, the template fails, or any file
/// cannot be read or written.
pub fn render_site(config: &Config) -> Result<Vec<RenderedPage>> {
  let inputs = Inputs::discover(input_of(config)?)?;
  let template = PageTemplate::load(config)?;
  let processor = DocumentProcessor::new(config.to_document_options());

  fs::create_dir_all(&config.output_dir)?;
  info!("Output directory: {}", config.output_dir.display());

  let pages = worker_pool(config)?.install(|| {
    inputs
      .files
      .par_iter()
      .map(|file| render_page(config, &processor, &template, &inputs, file))
      .collect::<Result<Vec<_>>>()
  })?;

  write_assets(config)?;
  Ok(pages)
}

fn render_page(
  config: &Config,
  processor: &DocumentProcessor,
  template: &PageTemplate,
  inputs: &Inputs,
  file: &Path,
) -> Result<RenderedPage> {
  let content = fs::read_to_string(file)?;
  let result = process_with_recovery(processor, &content);

  let output = inputs.relative(file).with_extension("html");
  let html = template.render(config, &result, &output)?;

  let output_path = config.output_dir.join(&output);
  if let Some(parent) = output_path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&output_path, html)?;
  debug!("Rendered {} -> {}", file.display(), output_path.display());

  Ok(RenderedPage {
    source: file.to_path_buf(),
    output,
    toc: result.toc,
  })
}

/// Write the stylesheet, the navigation script, and any configured extra
/// stylesheets into `assets/`.
///
/// # Errors
///
/// Returns an error if a file cannot be written or copied.
pub fn write_assets(config: &Config) -> Result<()> {
  let assets_dir = config.output_dir.join("assets");
  fs::create_dir_all(&assets_dir)?;

  fs::write(assets_dir.join("style.css"), DEFAULT_CSS)?;
  fs::write(assets_dir.join("main.js"), MAIN_JS)?;

  for stylesheet in &config.stylesheet_paths {
    match stylesheet.file_name() {
      Some(name) => {
        fs::copy(stylesheet, assets_dir.join(name))?;
      },
      None => {
        warn!(
          "Skipping stylesheet without a file name: {}",
          stylesheet.display()
        );
      },
    }
  }

  Ok(())
}

/// Write the table of contents as JSON.
///
/// A single page writes its TOC directly; several pages write an object
/// keyed by page path.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_toc_json(pages: &[RenderedPage], path: &Path) -> Result<()> {
  let json = match pages {
    [page] => page.toc.to_json()?,
    _ => {
      let by_page: BTreeMap<String, &Toc> = pages
        .iter()
        .map(|page| {
          (page.output.to_string_lossy().replace('\\', "/"), &page.toc)
        })
        .collect();
      serde_json::to_string(&by_page)?
    },
  };

  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent)?;
  }
  fs::write(path, json)?;
  info!("Wrote table of contents to {}", path.display());
  Ok(())
}

/// Render every input in memory and verify that each TOC entry resolves to
/// exactly one element.
///
/// Rendering failures are reported per file rather than aborting the check.
///
/// # Errors
///
/// Returns an error if the input is missing or a file cannot be read.
pub fn check_site(config: &Config) -> Result<Vec<CheckReport>> {
  let inputs = Inputs::discover(input_of(config)?)?;
  let processor = DocumentProcessor::new(config.to_document_options());

  worker_pool(config)?.install(|| {
    inputs
      .files
      .par_iter()
      .map(|file| {
        let content = fs::read_to_string(file)?;
        let report = match render_catching_panics(&processor, &content) {
          Ok(result) => {
            CheckReport {
              source: file.clone(),
              issues: verify_anchors(&result.html, &result.toc),
              error:  None,
            }
          },
          Err(e) => {
            CheckReport {
              source: file.clone(),
              issues: Vec::new(),
              error:  Some(e.to_string()),
            }
          },
        };
        Ok(report)
      })
      .collect()
  })
}

fn input_of(config: &Config) -> Result<&Path> {
  config.input.as_deref().ok_or(DocnavError::MissingInput)
}

fn worker_pool(config: &Config) -> Result<rayon::ThreadPool> {
  let threads = config.jobs.unwrap_or_else(num_cpus::get);
  debug!("Using {threads} worker threads");
  Ok(
    rayon::ThreadPoolBuilder::new()
      .num_threads(threads)
      .build()?,
  )
}
