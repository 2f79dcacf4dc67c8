use std::time::Duration;

use super::NavigationEffect;
use crate::utils::fragment_for;

/// The runtime a synchronizer drives: a browser view, a terminal pager, or a
/// test double.
pub trait NavigationHost {
  /// Highlight a TOC item, or clear the highlight when `slug` is `None`.
  fn highlight(&mut self, slug: Option<&str>);

  /// Replace the URL hash. `fragment` is already percent-encoded.
  fn write_hash(&mut self, fragment: &str);

  /// Smooth-scroll to the heading with this id.
  fn scroll_to(&mut self, slug: &str);

  /// Check for the heading element after `delay` and report back with a
  /// `HeadingProbe` event.
  fn schedule_probe(&mut self, slug: &str, attempt: u32, delay: Duration);
}

/// Perform effects on a host, in order.
pub fn apply_effects<H>(host: &mut H, effects: &[NavigationEffect])
where
  H: NavigationHost + ?Sized,
{
  for effect in effects {
    match effect {
      NavigationEffect::Highlight(slug) => host.highlight(slug.as_deref()),
      NavigationEffect::WriteHash(slug) => host.write_hash(&fragment_for(slug)),
      NavigationEffect::ScrollTo(slug) => host.scroll_to(slug),
      NavigationEffect::ProbeHeading {
        slug,
        attempt,
        delay,
      } => host.schedule_probe(slug, *attempt, *delay),
    }
  }
}
