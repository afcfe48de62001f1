/// Match types produced by the engine.
///
/// A `Match` is a snapshot of one hit against the exact text it was computed
/// from. Nothing in the engine mutates or caches a `Match` across a buffer
/// edit; callers that change the buffer must enumerate again before acting on
/// any offset or index.
///
/// Offsets are byte offsets into the searched `&str`, so `&text[m.start..m.end]`
/// is always valid.
use std::ops::Range;

/// A single match in the searched text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Byte offset where the match starts
    pub start: usize,
    /// Byte offset one past the end of the match
    pub end: usize,
    /// The matched text, `text[start..end]`
    pub text: String,
    /// Captured groups 1..n, `None` for a group that did not participate
    pub groups: Vec<Option<String>>,
}

impl Match {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A match span as the presentation layer should decorate it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
    /// True for the match at the session's active index
    pub is_current: bool,
}

/// Counter shown next to the search field ("3 / 7")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStatus {
    /// Active index when `total > 0`, otherwise 0
    pub current: usize,
    /// Number of matches in the current buffer
    pub total: usize,
    /// False when the query is empty or fails to compile
    pub pattern_valid: bool,
}

impl SearchStatus {
    /// One-based label for display, e.g. `"2 / 5"` or `"0 / 0"`
    pub fn label(&self) -> String {
        if self.total == 0 {
            "0 / 0".to_string()
        } else {
            format!("{} / {}", self.current + 1, self.total)
        }
    }
}
