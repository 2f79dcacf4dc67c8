//! Keeps scroll position, URL hash and TOC highlight consistent.
//!
//! The state machine is a pure reducer ([`reduce`]) over an explicit
//! [`NavigationState`]. [`NavigationSynchronizer`] wraps it for one mounted
//! view, adding debouncing, and a [`NavigationHost`] performs the resulting
//! effects on whatever runtime displays the document.
mod debounce;
mod host;
mod state;
mod synchronizer;

use std::time::Duration;

pub use debounce::Debouncer;
pub use host::{NavigationHost, apply_effects};
use serde::Serialize;
pub use state::{
  HeadingPosition,
  HeldScroll,
  NavigationContext,
  NavigationEffect,
  NavigationEvent,
  NavigationState,
  Transition,
  reduce,
};
pub use synchronizer::NavigationSynchronizer;

/// Tuning for the navigation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationConfig {
  /// Distance from the viewport top (px) a heading must reach to become
  /// active.
  pub offset_threshold:   f64,
  /// Quiet period before a scroll or hash-change burst is applied.
  #[serde(rename = "debounceMs", serialize_with = "as_millis")]
  pub debounce:           Duration,
  /// How many times to look for a heading before giving up on a hash.
  pub max_probe_attempts: u32,
  /// Delay between heading lookups.
  #[serde(rename = "probeIntervalMs", serialize_with = "as_millis")]
  pub probe_interval:     Duration,
}

impl Default for NavigationConfig {
  fn default() -> Self {
    Self {
      offset_threshold:   80.0,
      debounce:           Duration::from_millis(100),
      max_probe_attempts: 10,
      probe_interval:     Duration::from_millis(50),
    }
  }
}

impl NavigationConfig {
  /// Serialize for a client runtime embedded in a page.
  ///
  /// # Errors
  ///
  /// Returns an error if serialization fails.
  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string(self)
  }
}

#[allow(
  clippy::trivially_copy_pass_by_ref,
  reason = "serde passes fields by reference"
)]
fn as_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
