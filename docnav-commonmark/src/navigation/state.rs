//! The navigation reducer.
//!
//! `reduce` is a pure function from `(state, event)` to a new state plus the
//! side effects a host must perform. Every write to `active_slug` goes through
//! here, so the most recent event always wins.
use std::time::Duration;

use log::debug;
use serde::Serialize;

use super::NavigationConfig;
use crate::{types::Document, utils::slug_from_fragment};

/// Navigation state of one mounted document view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationState {
  /// Section currently highlighted in the TOC.
  pub active_slug:    Option<String>,
  /// Section a click, hash change or initial load is scrolling towards.
  /// Scroll-driven updates are held back while this is set.
  pub pending_target: Option<String>,
  /// Slug last written to (or read from) the URL hash.
  pub last_hash_slug: Option<String>,
  /// Latest scroll seen while a target was pending, applied once the
  /// programmatic scroll settles.
  pub held_scroll:    Option<HeldScroll>,
}

/// Section a scroll pointed at while it could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeldScroll {
  pub active_slug: Option<String>,
}

/// Measured position of a rendered heading, relative to the viewport top.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingPosition {
  pub slug: String,
  pub top:  f64,
}

/// Inputs to the navigation state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationEvent {
  /// The view scrolled; positions of the headings currently in the DOM.
  Scroll { positions: Vec<HeadingPosition> },
  /// A TOC item was clicked.
  TocClick { slug: String },
  /// The URL hash changed (raw, possibly percent-encoded, `#` optional).
  HashChange { hash: String },
  /// The view was mounted with this URL hash, if any.
  Mount { hash: Option<String> },
  /// Result of looking for a heading element in the render target.
  HeadingProbe {
    slug:     String,
    attached: bool,
    attempt:  u32,
  },
  /// A programmatic scroll finished.
  ScrollSettled,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEffect {
  /// Highlight this TOC item, or clear the highlight.
  Highlight(Option<String>),
  /// Write `#<slug>` to the URL.
  WriteHash(String),
  /// Smooth-scroll to the heading with this id.
  ScrollTo(String),
  /// Check whether the heading element exists after `delay`, then report
  /// back with [`NavigationEvent::HeadingProbe`].
  ProbeHeading {
    slug:    String,
    attempt: u32,
    delay:   Duration,
  },
}

/// Result of one reducer step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
  pub state:   NavigationState,
  pub effects: Vec<NavigationEffect>,
}

/// What the reducer may read besides the state.
#[derive(Debug, Clone, Copy)]
pub struct NavigationContext<'a> {
  pub document: &'a Document,
  pub config:   &'a NavigationConfig,
}

/// Compute the next state and effects for an event.
#[must_use]
pub fn reduce(
  state: &NavigationState,
  event: &NavigationEvent,
  ctx: &NavigationContext<'_>,
) -> Transition {
  let mut next = Step {
    state:   state.clone(),
    effects: Vec::new(),
  };

  match event {
    NavigationEvent::Scroll { positions } => {
      let active = active_from_positions(positions, ctx.config.offset_threshold);
      if next.state.pending_target.is_some() {
        next.state.held_scroll = Some(HeldScroll {
          active_slug: active,
        });
      } else {
        next.set_active(active);
      }
    },

    NavigationEvent::TocClick { slug } => {
      if ctx.document.contains_slug(slug) {
        next.navigate_to(slug);
        next.state.last_hash_slug = Some(slug.clone());
        next.effects.push(NavigationEffect::WriteHash(slug.clone()));
        next.effects.push(NavigationEffect::ScrollTo(slug.clone()));
      } else {
        debug!("Ignoring click on unknown section '{slug}'");
      }
    },

    NavigationEvent::HashChange { hash } => {
      let slug = slug_from_fragment(hash);
      if slug.is_some() && slug == next.state.last_hash_slug {
        // Echo of our own hash write.
        return next.finish();
      }

      match slug {
        Some(slug) if ctx.document.contains_slug(&slug) => {
          next.navigate_to(&slug);
          next.effects.push(NavigationEffect::ScrollTo(slug.clone()));
          next.state.last_hash_slug = Some(slug);
        },
        slug => {
          if let Some(slug) = &slug {
            debug!("Hash target '{slug}' is not a section of this document");
          }
          next.clear_pending();
          next.state.last_hash_slug = slug;
          next.set_active(None);
        },
      }
    },

    NavigationEvent::Mount { hash } => {
      match hash.as_deref().and_then(slug_from_fragment) {
        Some(slug) if ctx.document.contains_slug(&slug) => {
          next.state.pending_target = Some(slug.clone());
          next.state.last_hash_slug = Some(slug.clone());
          next.effects.push(NavigationEffect::ProbeHeading {
            slug,
            attempt: 0,
            delay: Duration::ZERO,
          });
        },
        Some(slug) => {
          debug!("Initial hash '{slug}' is not a section of this document");
        },
        None => {},
      }
    },

    NavigationEvent::HeadingProbe {
      slug,
      attached,
      attempt,
    } => {
      if next.state.pending_target.as_deref() != Some(slug.as_str()) {
        debug!("Dropping stale probe for '{slug}'");
        return next.finish();
      }

      let next_attempt = attempt.saturating_add(1);
      if *attached {
        next.set_active(Some(slug.clone()));
        next.effects.push(NavigationEffect::ScrollTo(slug.clone()));
      } else if next_attempt < ctx.config.max_probe_attempts {
        next.effects.push(NavigationEffect::ProbeHeading {
          slug:    slug.clone(),
          attempt: next_attempt,
          delay:   ctx.config.probe_interval,
        });
      } else {
        debug!(
          "Heading '{slug}' did not appear after {next_attempt} attempts"
        );
        next.clear_pending();
        next.set_active(None);
      }
    },

    NavigationEvent::ScrollSettled => {
      // A user scroll during the programmatic one is the latest write.
      if let Some(held) = next.clear_pending() {
        next.set_active(held.active_slug);
      }
    },
  }

  next.finish()
}

/// The heading that has most recently scrolled past the threshold.
///
/// Among headings whose top is at or above `threshold`, picks the lowest one;
/// on ties the later one in the list wins.
fn active_from_positions(
  positions: &[HeadingPosition],
  threshold: f64,
) -> Option<String> {
  positions
    .iter()
    .filter(|position| position.top <= threshold)
    .reduce(|best, position| {
      if position.top >= best.top {
        position
      } else {
        best
      }
    })
    .map(|position| position.slug.clone())
}

struct Step {
  state:   NavigationState,
  effects: Vec<NavigationEffect>,
}

impl Step {
  /// Update the active section, emitting a highlight only on change.
  fn set_active(&mut self, slug: Option<String>) {
    if self.state.active_slug != slug {
      self.state.active_slug = slug.clone();
      self.effects.push(NavigationEffect::Highlight(slug));
    }
  }

  /// Make `slug` the pending target and optimistically activate it.
  fn navigate_to(&mut self, slug: &str) {
    self.state.pending_target = Some(slug.to_owned());
    self.state.held_scroll = None;
    self.set_active(Some(slug.to_owned()));
  }

  /// Drop the pending target, handing back any scroll held behind it.
  fn clear_pending(&mut self) -> Option<HeldScroll> {
    self.state.pending_target = None;
    self.state.held_scroll.take()
  }

  fn finish(self) -> Transition {
    Transition {
      state:   self.state,
      effects: self.effects,
    }
  }
}
