//! Stable, collision-free heading identifiers.
//!
//! Slugs end up in shareable URLs, so assignment is a pure function of the
//! ordered heading texts of a document: a fresh registry fed the same
//! sequence always produces the same slugs.
use std::{collections::HashSet, sync::LazyLock};

use log::{trace, warn};
use regex::Regex;

use crate::utils::never_matching_regex;

static COMBINING_MARK_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\p{M}$").unwrap_or_else(|e| {
    log::error!("Failed to compile COMBINING_MARK_RE regex: {e}");
    never_matching_regex()
  })
});

/// Nonspacing, spacing and enclosing marks: viramas, vowel signs, combining
/// accents.
fn is_combining_mark(c: char) -> bool {
  let mut buf = [0; 4];
  COMBINING_MARK_RE.is_match(c.encode_utf8(&mut buf))
}

/// Normalize heading text into a slug candidate.
///
/// Lowercases (caseless scripts such as CJK pass through unchanged), collapses
/// every run of characters that are not letters, digits or `-` into a single
/// `-`, and strips leading/trailing hyphens. Combining marks stay with the
/// letter they follow. May return an empty string.
#[must_use]
pub fn normalize(text: &str) -> String {
  let mut slug = String::with_capacity(text.len());
  let mut in_gap = false;
  let mut in_word = false;

  for c in text.trim().chars().flat_map(char::to_lowercase) {
    let keep = c.is_alphanumeric()
      || c == '-'
      || (in_word && !in_gap && is_combining_mark(c));
    if keep {
      if in_gap {
        slug.push('-');
        in_gap = false;
      }
      slug.push(c);
      in_word = c != '-';
    } else {
      in_gap = true;
    }
  }

  slug.trim_matches('-').to_owned()
}

/// Per-document slug bookkeeping. Lives for exactly one render pass.
#[derive(Debug, Default)]
pub struct SlugRegistry {
  taken:    HashSet<String>,
  reserved: HashSet<String>,
  ordinal:  usize,
}

impl SlugRegistry {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Reserve ids (explicit anchors) that generated slugs must route around.
  pub fn reserve<'a, I>(&mut self, ids: I)
  where
    I: IntoIterator<Item = &'a str>,
  {
    self.reserved.extend(ids.into_iter().map(str::to_owned));
  }

  /// Assign a slug for the next heading in document order.
  pub fn assign(&mut self, heading_text: &str) -> String {
    let ordinal = self.next_ordinal();
    let mut candidate = normalize(heading_text);
    if candidate.is_empty() {
      candidate = format!("heading-{ordinal}");
    }

    let slug = if self.is_free(&candidate) {
      candidate
    } else {
      self.suffixed(&candidate)
    };

    trace!("Assigned slug '{slug}' to heading #{ordinal} ({heading_text:?})");
    self.taken.insert(slug.clone());
    slug
  }

  /// Claim an explicit anchor for the next heading in document order.
  ///
  /// The anchor is used verbatim unless an earlier heading already holds it,
  /// in which case it is suffixed like any other collision.
  pub fn claim(&mut self, anchor: &str) -> String {
    self.next_ordinal();

    let slug = if self.taken.contains(anchor) {
      let slug = self.suffixed(anchor);
      warn!("Duplicate explicit anchor '{anchor}', using '{slug}' instead");
      slug
    } else {
      anchor.to_owned()
    };

    self.taken.insert(slug.clone());
    slug
  }

  /// Number of headings seen so far.
  #[must_use]
  pub const fn len(&self) -> usize {
    self.ordinal
  }

  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.ordinal == 0
  }

  const fn next_ordinal(&mut self) -> usize {
    let ordinal = self.ordinal;
    self.ordinal += 1;
    ordinal
  }

  fn is_free(&self, slug: &str) -> bool {
    !self.taken.contains(slug) && !self.reserved.contains(slug)
  }

  fn suffixed(&self, base: &str) -> String {
    (2_usize..)
      .map(|n| format!("{base}-{n}"))
      .find(|slug| self.is_free(slug))
      .unwrap_or_else(|| format!("{base}-{}", self.ordinal))
  }
}

/// Assign slugs to a sequence of heading texts with a fresh registry.
#[must_use]
pub fn assign_all<'a, I>(headings: I) -> Vec<String>
where
  I: IntoIterator<Item = &'a str>,
{
  let mut registry = SlugRegistry::new();
  headings
    .into_iter()
    .map(|text| registry.assign(text))
    .collect()
}
