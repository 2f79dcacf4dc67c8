/// State tracking for fenced code blocks in markdown source.
///
/// Tracks whether we're inside a fence and which character/length opened it,
/// so a closing line is only recognized when it uses the same character, is at
/// least as long, and carries no info string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FenceTracker {
  in_code_block:    bool,
  code_fence_char:  Option<char>,
  code_fence_count: usize,
}

impl FenceTracker {
  #[must_use]
  pub const fn new() -> Self {
    Self {
      in_code_block:    false,
      code_fence_char:  None,
      code_fence_count: 0,
    }
  }

  #[must_use]
  pub const fn in_code_block(&self) -> bool {
    self.in_code_block
  }

  /// Process a line and return the updated state.
  #[must_use]
  pub fn process_line(&self, line: &str) -> Self {
    let Some((fence_char, fence_count, rest)) = fence_run(line) else {
      return *self;
    };

    if !self.in_code_block {
      return Self {
        in_code_block:    true,
        code_fence_char:  Some(fence_char),
        code_fence_count: fence_count,
      };
    }

    if self.code_fence_char == Some(fence_char)
      && fence_count >= self.code_fence_count
      && rest.trim().is_empty()
    {
      return Self::new();
    }

    *self
  }

  /// Whether a fence's source lines (opening line first) end with a valid
  /// closing fence.
  #[must_use]
  pub fn is_closed<'a, I>(lines: I) -> bool
  where
    I: IntoIterator<Item = &'a str>,
  {
    let mut tracker = Self::new();
    let mut opened = false;
    for line in lines {
      tracker = tracker.process_line(line);
      opened |= tracker.in_code_block();
    }
    opened && !tracker.in_code_block()
  }
}

/// Split a line into its fence run (char, length) and the remainder.
///
/// Up to three spaces of indentation are allowed; anything deeper is indented
/// code, not a fence.
fn fence_run(line: &str) -> Option<(char, usize, &str)> {
  let indent = line.len() - line.trim_start_matches(' ').len();
  if indent > 3 {
    return None;
  }
  let trimmed = &line[indent..];
  let fence_char = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
  let fence_count = trimmed.chars().take_while(|&c| c == fence_char).count();
  if fence_count < 3 {
    return None;
  }
  // Fence characters are ASCII, so the count is also a byte offset.
  Some((fence_char, fence_count, &trimmed[fence_count..]))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_closed_fence() {
    assert!(FenceTracker::is_closed(["```js", "code", "```"]));
    assert!(FenceTracker::is_closed(["~~~~", "code", "~~~~~  "]));
  }

  #[test]
  fn test_unterminated_fence() {
    assert!(!FenceTracker::is_closed(["```js", "code", "more code"]));
    assert!(!FenceTracker::is_closed(["```js"]));
  }

  #[test]
  fn test_closing_fence_must_match() {
    // Shorter run, different character, or an info string do not close.
    assert!(!FenceTracker::is_closed(["````", "```", "code"]));
    assert!(!FenceTracker::is_closed(["```", "~~~", "code"]));
    assert!(!FenceTracker::is_closed(["```", "```rust", "code"]));
    assert!(FenceTracker::is_closed(["```", "```rust", "```"]));
  }

  #[test]
  fn test_indented_code_is_not_a_fence() {
    assert!(!FenceTracker::is_closed(["    ```", "    ```"]));
  }
}
