use std::time::Duration;

use log::trace;

use super::{
  NavigationConfig,
  NavigationContext,
  NavigationEffect,
  NavigationEvent,
  NavigationState,
  debounce::Debouncer,
  reduce,
};
use crate::types::Document;

/// Owns the navigation state of one mounted view of a document.
///
/// Scroll and hash-change bursts are debounced on the trailing edge; every
/// other event is applied immediately. Time is injected as the duration since
/// mount so the synchronizer never reads a clock.
#[derive(Debug)]
pub struct NavigationSynchronizer<'a> {
  document: &'a Document,
  config:   NavigationConfig,
  state:    NavigationState,
  scroll:   Debouncer<NavigationEvent>,
  hash:     Debouncer<NavigationEvent>,
}

impl<'a> NavigationSynchronizer<'a> {
  #[must_use]
  pub const fn new(document: &'a Document, config: NavigationConfig) -> Self {
    Self {
      document,
      scroll: Debouncer::new(config.debounce),
      hash: Debouncer::new(config.debounce),
      config,
      state: NavigationState {
        active_slug:    None,
        pending_target: None,
        last_hash_slug: None,
        held_scroll:    None,
      },
    }
  }

  /// Start navigation for a freshly mounted view.
  pub fn mount(&mut self, hash: Option<&str>) -> Vec<NavigationEffect> {
    self.apply(&NavigationEvent::Mount {
      hash: hash.map(str::to_owned),
    })
  }

  /// Feed an event that happened at `now`.
  ///
  /// Returns the effects to perform right away. Debounced events produce
  /// their effects from a later [`tick`](Self::tick).
  pub fn dispatch(
    &mut self,
    event: NavigationEvent,
    now: Duration,
  ) -> Vec<NavigationEffect> {
    match event {
      NavigationEvent::Scroll { .. } => {
        self.scroll.push(event, now);
        Vec::new()
      },
      NavigationEvent::HashChange { .. } => {
        self.hash.push(event, now);
        Vec::new()
      },
      NavigationEvent::TocClick { .. } => {
        // Anything still buffered happened before the click.
        self.scroll.clear();
        self.hash.clear();
        self.apply(&event)
      },
      _ => self.apply(&event),
    }
  }

  /// Release debounced events whose quiet period ended by `now`, oldest
  /// deadline first.
  pub fn tick(&mut self, now: Duration) -> Vec<NavigationEffect> {
    let hash_first = match (self.hash.due_at(), self.scroll.due_at()) {
      (Some(hash), Some(scroll)) => hash <= scroll,
      _ => true,
    };

    let mut released = Vec::with_capacity(2);
    if hash_first {
      released.extend(self.hash.take_due(now));
      released.extend(self.scroll.take_due(now));
    } else {
      released.extend(self.scroll.take_due(now));
      released.extend(self.hash.take_due(now));
    }

    released
      .iter()
      .flat_map(|event| self.apply(event))
      .collect()
  }

  /// When the next debounced event becomes due, for hosts that schedule a
  /// timer instead of ticking on every frame.
  #[must_use]
  pub fn next_deadline(&self) -> Option<Duration> {
    match (self.scroll.due_at(), self.hash.due_at()) {
      (Some(a), Some(b)) => Some(a.min(b)),
      (a, b) => a.or(b),
    }
  }

  #[must_use]
  pub const fn state(&self) -> &NavigationState {
    &self.state
  }

  #[must_use]
  pub const fn document(&self) -> &'a Document {
    self.document
  }

  #[must_use]
  pub const fn config(&self) -> &NavigationConfig {
    &self.config
  }

  fn apply(&mut self, event: &NavigationEvent) -> Vec<NavigationEffect> {
    let ctx = NavigationContext {
      document: self.document,
      config:   &self.config,
    };
    let transition = reduce(&self.state, event, &ctx);
    trace!("{event:?} -> {:?}", transition.state);
    self.state = transition.state;
    transition.effects
  }
}
