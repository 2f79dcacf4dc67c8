use std::time::Duration;

/// Trailing-edge debouncer over an injected clock.
///
/// Each push replaces the buffered value and restarts the quiet period; the
/// value is released once `delay` has passed without another push.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
  delay:   Duration,
  pending: Option<(T, Duration)>,
}

impl<T> Debouncer<T> {
  #[must_use]
  pub const fn new(delay: Duration) -> Self {
    Self {
      delay,
      pending: None,
    }
  }

  /// Buffer `value`, due `delay` after `now`.
  pub fn push(&mut self, value: T, now: Duration) {
    self.pending = Some((value, now.saturating_add(self.delay)));
  }

  /// When the buffered value becomes due, if any.
  #[must_use]
  pub fn due_at(&self) -> Option<Duration> {
    self.pending.as_ref().map(|(_, due)| *due)
  }

  /// Release the buffered value if its quiet period is over.
  pub fn take_due(&mut self, now: Duration) -> Option<T> {
    if self.due_at().is_some_and(|due| due <= now) {
      self.pending.take().map(|(value, _)| value)
    } else {
      None
    }
  }

  /// Drop the buffered value.
  pub fn clear(&mut self) {
    self.pending = None;
  }

  #[must_use]
  pub const fn is_pending(&self) -> bool {
    self.pending.is_some()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
  }

  #[test]
  fn test_burst_collapses_to_last() {
    let mut debouncer = Debouncer::new(ms(100));
    debouncer.push(1, ms(0));
    debouncer.push(2, ms(30));
    debouncer.push(3, ms(60));

    assert_eq!(debouncer.take_due(ms(120)), None);
    assert_eq!(debouncer.take_due(ms(160)), Some(3));
    assert!(!debouncer.is_pending());
  }

  #[test]
  fn test_clear() {
    let mut debouncer = Debouncer::new(ms(10));
    debouncer.push("x", ms(0));
    debouncer.clear();
    assert_eq!(debouncer.take_due(ms(50)), None);
    assert_eq!(debouncer.due_at(), None);
  }

  #[test]
  fn test_zero_delay_is_due_immediately() {
    let mut debouncer = Debouncer::new(Duration::ZERO);
    debouncer.push('a', ms(5));
    assert_eq!(debouncer.take_due(ms(5)), Some('a'));
  }
}
