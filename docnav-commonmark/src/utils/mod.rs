pub mod codeblock;

use std::{
  borrow::Cow,
  path::{Path, PathBuf},
  sync::LazyLock,
};

use log::trace;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use regex::Regex;
use walkdir::WalkDir;

/// Characters escaped in a URL fragment, per the WHATWG URL standard.
const FRAGMENT: &AsciiSet = &CONTROLS
  .add(b' ')
  .add(b'"')
  .add(b'<')
  .add(b'>')
  .add(b'`')
  .add(b'#')
  .add(b'%');

static EXPLICIT_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\s*\{#([^\s{}]+)\}\s*$").unwrap_or_else(|e| {
    log::error!("Failed to compile EXPLICIT_ANCHOR_RE regex: {e}");
    never_matching_regex()
  })
});

/// Encode a slug for use after `#` in a URL.
#[must_use]
pub fn fragment_for(slug: &str) -> Cow<'_, str> {
  utf8_percent_encode(slug, FRAGMENT).into()
}

/// Decode a URL hash (with or without the leading `#`) back into a slug.
///
/// Returns `None` for an empty hash.
#[must_use]
pub fn slug_from_fragment(hash: &str) -> Option<String> {
  let fragment = hash.strip_prefix('#').unwrap_or(hash);
  if fragment.is_empty() {
    return None;
  }
  let decoded = percent_decode_str(fragment).decode_utf8_lossy();
  Some(decoded.into_owned())
}

/// Split a trailing `{#custom-id}` off heading text.
///
/// Returns the text without the anchor and the anchor id, if one was present.
#[must_use]
pub fn split_explicit_anchor(text: &str) -> (&str, Option<&str>) {
  EXPLICIT_ANCHOR_RE.captures(text).map_or((text, None), |caps| {
    let whole = caps.get(0).map_or(text.len(), |m| m.start());
    let id = caps.get(1).map(|m| m.as_str());
    (&text[..whole], id)
  })
}

/// Collect all markdown files below a directory, sorted for stable output.
#[must_use]
pub fn collect_markdown_files(input_dir: &Path) -> Vec<PathBuf> {
  let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
    .follow_links(true)
    .into_iter()
    .filter_map(Result::ok)
    .map(walkdir::DirEntry::into_path)
    .filter(|path| {
      path.is_file() && path.extension().is_some_and(|ext| ext == "md")
    })
    .collect();
  files.sort();

  trace!("Found {} markdown files to process", files.len());
  files
}

/// Create a regex that never matches anything.
///
/// Used as a fallback when a static pattern fails to compile.
///
/// # Panics
///
/// Panics if the fallback pattern itself fails to compile, which cannot happen
/// for these literals.
#[must_use]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| {
    #[allow(clippy::expect_used, reason = "literal pattern is always valid")]
    Regex::new(r"^\b$").expect("fallback regex should compile")
  })
}
