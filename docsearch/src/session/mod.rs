//! One search panel's worth of state, driven by the presentation layer.
//!
//! A [`SearchSession`] owns only transient state: the fields of the panel,
//! the compiled pattern and the last match list. The buffer and the history
//! belong to collaborators passed into each call ([`BufferHost`] and
//! [`SettingsStore`]), so the whole thing can be exercised with a
//! [`TextBuffer`](crate::buffer::TextBuffer) and a
//! [`MemoryStore`](crate::store::MemoryStore):
//!
//! ```rust,ignore
//! let mut buffer = TextBuffer::new("Foo bar foo FOO");
//! let mut session = SearchSession::new();
//! session.open(false, &store);
//! session.set_query("foo");
//! session.navigate(&mut buffer, Direction::Forward);
//! assert_eq!(buffer.selection(), Some(8..11));
//! ```
//!
//! An invalid or empty query never produces an error here; it behaves exactly
//! like a pattern that matches nothing.

use std::ops::Range;

use tracing::{debug, info};

use crate::buffer::{BufferEdit, BufferHost};
use crate::errors::SearchResult;
use crate::history::{self, Draft, HistoryCursor, HistoryEntry};
use crate::results::{Highlight, Match, SearchStatus};
use crate::search::matcher::{CompiledPattern, OptionSet};
use crate::search::navigator::{self, Direction};
use crate::store::SettingsStore;

mod state;
pub use state::{SessionChange, SessionState};

/// Orchestrates matching, navigation, replacement and history recall
#[derive(Debug, Clone)]
pub struct SearchSession {
    state: SessionState,
    pattern: Option<CompiledPattern>,
    pattern_stale: bool,
    matches: Vec<Match>,
    matches_stale: bool,
    history: HistoryCursor,
    /// Fields left behind by the last close, restored by the next open
    carried: Option<Draft>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self::with_state(SessionState::default())
    }

    /// Resumes from an explicit state value
    pub fn with_state(state: SessionState) -> Self {
        Self {
            state,
            pattern: None,
            pattern_stale: true,
            matches: Vec::new(),
            matches_stale: true,
            history: HistoryCursor::new(),
            carried: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn into_state(self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.panel_open
    }

    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    pub fn history_cursor(&self) -> &HistoryCursor {
        &self.history
    }

    fn update(&mut self, change: SessionChange) {
        let search_changed = !matches!(
            change,
            SessionChange::Replacement(_) | SessionChange::ActiveIndex(_)
        );
        self.state = std::mem::take(&mut self.state).apply(change);
        if search_changed {
            self.pattern_stale = true;
            self.matches_stale = true;
        }
    }

    fn ensure_pattern(&mut self) {
        if self.pattern_stale {
            self.pattern = CompiledPattern::compile(&self.state.query, self.state.options).ok();
            self.pattern_stale = false;
        }
    }

    fn refresh(&mut self, text: &str) {
        self.ensure_pattern();
        self.matches = self
            .pattern
            .as_ref()
            .map(|pattern| pattern.find_matches(text))
            .unwrap_or_default();
        self.matches_stale = false;
    }

    fn ensure_matches(&mut self, text: &str) {
        if self.matches_stale || self.pattern_stale {
            self.refresh(text);
        }
    }

    // ---- panel lifecycle -------------------------------------------------

    /// Shows the panel, or switches its mode if it is already showing.
    ///
    /// A freshly opened panel restores the fields left by the previous
    /// close, or starts empty with the store's default options.
    pub fn open<S: SettingsStore + ?Sized>(&mut self, replace_mode: bool, store: &S) {
        let seed = if self.state.panel_open {
            Draft::default()
        } else {
            self.carried.take().unwrap_or_else(|| Draft {
                options: store.default_search_options(),
                ..Draft::default()
            })
        };
        debug!("Opening search panel (replace_mode={})", replace_mode);
        self.update(SessionChange::Open { replace_mode, seed });
    }

    /// Hides the panel and drops all transient state
    pub fn close(&mut self) {
        if self.state.panel_open {
            self.carried = Some(self.state.draft());
        }
        self.history.reset();
        self.update(SessionChange::Close);
        self.pattern = None;
        self.matches.clear();
        debug!("Closed search panel");
    }

    // ---- field edits -----------------------------------------------------

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.history.reset();
        self.update(SessionChange::Query(query.into()));
    }

    pub fn set_replacement(&mut self, replacement: impl Into<String>) {
        self.history.reset();
        self.update(SessionChange::Replacement(replacement.into()));
    }

    pub fn set_options(&mut self, options: OptionSet) {
        self.history.reset();
        self.update(SessionChange::Options(options));
    }

    /// The buffer was edited by someone else; matches are recomputed lazily.
    ///
    /// The active index is kept and may now be out of range.
    pub fn buffer_changed(&mut self) {
        self.matches_stale = true;
    }

    // ---- queries ---------------------------------------------------------

    /// False for an empty query or one that fails to compile
    pub fn is_pattern_valid(&mut self) -> bool {
        self.ensure_pattern();
        self.pattern.is_some()
    }

    pub fn matches<B: BufferHost + ?Sized>(&mut self, buffer: &B) -> &[Match] {
        self.ensure_matches(buffer.text());
        &self.matches
    }

    pub fn match_count<B: BufferHost + ?Sized>(&mut self, buffer: &B) -> usize {
        self.matches(buffer).len()
    }

    /// The active index clamped into the current match list
    fn current_index(&self) -> Option<usize> {
        let last = self.matches.len().checked_sub(1)?;
        Some(self.state.active_index.min(last))
    }

    /// Counter for the panel; the index is clamped into the match list
    pub fn status<B: BufferHost + ?Sized>(&mut self, buffer: &B) -> SearchStatus {
        self.ensure_matches(buffer.text());
        SearchStatus {
            current: self.current_index().unwrap_or(0),
            total: self.matches.len(),
            pattern_valid: self.pattern.is_some(),
        }
    }

    /// Every match span, flagging the active one; empty while closed
    pub fn highlights<B: BufferHost + ?Sized>(&mut self, buffer: &B) -> Vec<Highlight> {
        if !self.state.panel_open {
            return Vec::new();
        }
        self.ensure_matches(buffer.text());
        let current = self.current_index();
        self.matches
            .iter()
            .enumerate()
            .map(|(i, m)| Highlight {
                start: m.start,
                end: m.end,
                is_current: Some(i) == current,
            })
            .collect()
    }

    // ---- navigation and replacement -------------------------------------

    /// Selects the next or previous match, wrapping around.
    ///
    /// Returns the selected range, or `None` (and changes nothing) when there
    /// are no matches.
    pub fn navigate<B: BufferHost + ?Sized>(
        &mut self,
        buffer: &mut B,
        direction: Direction,
    ) -> Option<Range<usize>> {
        self.ensure_matches(buffer.text());
        let index = navigator::next(self.state.active_index, direction, self.matches.len())?;
        let range = self.matches[index].range();

        buffer.apply(BufferEdit::select(range.clone()));
        self.update(SessionChange::ActiveIndex(index));
        Some(range)
    }

    /// Selects the match at `index` directly, e.g. when a highlight is clicked.
    ///
    /// An index past the end of the match list changes nothing.
    pub fn select<B: BufferHost + ?Sized>(
        &mut self,
        buffer: &mut B,
        index: usize,
    ) -> Option<Range<usize>> {
        self.ensure_matches(buffer.text());
        let range = self.matches.get(index)?.range();

        buffer.apply(BufferEdit::select(range.clone()));
        self.update(SessionChange::ActiveIndex(index));
        Some(range)
    }

    /// Replaces the match at the active index and moves on.
    ///
    /// After the buffer is updated the matches are enumerated again and the
    /// index advances by `new_count - old_count + 1` from where the
    /// replacement happened, selecting the resulting match. Returns whether
    /// anything was replaced.
    pub fn replace_one<B: BufferHost + ?Sized>(&mut self, buffer: &mut B) -> bool {
        self.refresh(buffer.text());
        if self.matches.is_empty() {
            return false;
        }
        let Some(pattern) = self.pattern.as_ref() else {
            return false;
        };

        let old_count = self.matches.len();
        let at = self.state.active_index;
        let result = pattern.replace_one(buffer.text(), &self.state.replacement, at);
        if !result.replaced {
            return false;
        }

        buffer.apply(BufferEdit::replace_text(result.text));
        self.refresh(buffer.text());

        let new_count = self.matches.len();
        debug!(
            "Replaced match {} of {}, {} remain",
            at + 1,
            old_count,
            new_count
        );
        if let Some(index) = navigator::after_replace(at, old_count, new_count) {
            let range = self.matches[index].range();
            buffer.apply(BufferEdit::select(range));
            self.update(SessionChange::ActiveIndex(index));
        }
        true
    }

    /// Replaces every match.
    ///
    /// Returns the number of substitutions made, 0 when the buffer is left
    /// unchanged. Empty matches between the reported ones are filled in too,
    /// so the count can exceed [`match_count`](Self::match_count).
    pub fn replace_all<B: BufferHost + ?Sized>(&mut self, buffer: &mut B) -> usize {
        self.refresh(buffer.text());
        if self.matches.is_empty() {
            return 0;
        }
        let Some(pattern) = self.pattern.as_ref() else {
            return 0;
        };

        let count = pattern.substitution_count(buffer.text(), &self.state.replacement);
        let replaced = pattern.replace_all(buffer.text(), &self.state.replacement);
        if replaced == buffer.text() {
            return 0;
        }

        buffer.apply(BufferEdit::replace_text(replaced));
        self.matches_stale = true;
        info!("Made {} replacements of '{}'", count, self.state.query);
        count
    }

    // ---- history -----------------------------------------------------------

    /// Steps through `history`, showing the recalled entry (or the draft)
    /// in place of the current fields. Returns whether the fields changed.
    pub fn cycle_history(&mut self, direction: Direction, history: &[HistoryEntry]) -> bool {
        let live = self.state.draft();
        match self.history.cycle(history, direction, &live) {
            Some(shown) => {
                self.update(SessionChange::Recall(shown));
                true
            }
            None => false,
        }
    }

    /// Shows a specific entry, e.g. one picked from a history list
    pub fn recall_history_entry(&mut self, entry: &HistoryEntry) {
        self.history.reset();
        self.update(SessionChange::Recall(entry.draft()));
    }

    /// Adds the current fields to the store's history.
    ///
    /// Returns whether the stored history changed; an empty query or a repeat
    /// of the latest entry leaves it alone.
    pub fn record_history<S: SettingsStore + ?Sized>(&self, store: &mut S) -> SearchResult<bool> {
        if self.state.query.is_empty() {
            return Ok(false);
        }
        let entry = history::format_entry(
            &self.state.query,
            &self.state.replacement,
            self.state.options,
        );
        let next = history::add_entry(store.search_history(), entry, store.max_history_items());
        if next.as_slice() == store.search_history() {
            return Ok(false);
        }
        store.save_search_history(next)?;
        Ok(true)
    }

    /// Removes the entry stamped `timestamp` from the store's history
    pub fn delete_history_entry<S: SettingsStore + ?Sized>(
        &self,
        store: &mut S,
        timestamp: u64,
    ) -> SearchResult<bool> {
        let next = history::delete_entry(store.search_history(), timestamp);
        if next.len() == store.search_history().len() {
            return Ok(false);
        }
        store.save_search_history(next)?;
        Ok(true)
    }
}
