//! Search history: a bounded, deduplicated, most-recent-first list.
//!
//! The list itself belongs to the settings store. Functions here take the
//! current list and return the next one; persisting it is the caller's job.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{SearchError, SearchResult};
use crate::search::matcher::OptionSet;

mod cursor;
pub use cursor::HistoryCursor;

/// Default number of entries kept
pub const DEFAULT_MAX_ITEMS: usize = 20;

/// A query, replacement and options triple, without any identity.
///
/// This is what the session shows in its fields, what history recall
/// restores, and what a draft preserves while browsing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Draft {
    pub query: String,
    pub replacement: String,
    pub options: OptionSet,
}

/// One remembered search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    #[serde(default)]
    pub replacement: String,
    #[serde(default)]
    pub options: OptionSet,
    /// Milliseconds since the Unix epoch; unique per entry and used as its id
    pub timestamp: u64,
}

impl HistoryEntry {
    /// Dedup equality: same query, replacement and options, any timestamp
    pub fn same_search(&self, other: &HistoryEntry) -> bool {
        self.query == other.query
            && self.replacement == other.replacement
            && self.options == other.options
    }

    pub fn draft(&self) -> Draft {
        Draft {
            query: self.query.clone(),
            replacement: self.replacement.clone(),
            options: self.options,
        }
    }
}

/// Hands out strictly increasing stamps, saturating at `u64::MAX`
struct StampClock {
    last: AtomicU64,
}

impl StampClock {
    const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    fn next(&self, now: u64) -> u64 {
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last.saturating_add(1));
            match self.last.compare_exchange_weak(
                last,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(current) => last = current,
            }
        }
    }

    fn observe(&self, stamp: u64) {
        self.last.fetch_max(stamp, Ordering::Relaxed);
    }
}

static CLOCK: StampClock = StampClock::new();

/// Returns a wall-clock millisecond stamp strictly greater than any stamp
/// previously handed out or observed in this process.
pub fn next_timestamp() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    CLOCK.next(now)
}

/// Makes later stamps sort after every entry in `history`, e.g. after loading
/// a list written by a clock that ran ahead.
pub fn observe_timestamps(history: &[HistoryEntry]) {
    if let Some(max) = history.iter().map(|e| e.timestamp).max() {
        CLOCK.observe(max);
    }
}

/// Builds a new entry stamped with [`next_timestamp`]
pub fn format_entry(query: &str, replacement: &str, options: OptionSet) -> HistoryEntry {
    HistoryEntry {
        query: query.to_string(),
        replacement: replacement.to_string(),
        options,
        timestamp: next_timestamp(),
    }
}

/// Returns `history` with `entry` at the front.
///
/// Empty queries are ignored. If `entry` repeats the current head the list is
/// returned as is; otherwise older copies of the same search are removed and
/// the list is cut to `max_items`.
pub fn add_entry(history: &[HistoryEntry], entry: HistoryEntry, max_items: usize) -> Vec<HistoryEntry> {
    if entry.query.is_empty() {
        return history.to_vec();
    }
    if history.first().is_some_and(|head| head.same_search(&entry)) {
        debug!("'{}' is already the latest history entry", entry.query);
        return history.to_vec();
    }

    let older: Vec<HistoryEntry> = history
        .iter()
        .filter(|existing| !existing.same_search(&entry))
        .cloned()
        .collect();

    let mut next = Vec::with_capacity(older.len() + 1);
    next.push(entry);
    next.extend(older);
    next.truncate(max_items);
    next
}

/// Returns `history` without the entry stamped `timestamp`
pub fn delete_entry(history: &[HistoryEntry], timestamp: u64) -> Vec<HistoryEntry> {
    history
        .iter()
        .filter(|entry| entry.timestamp != timestamp)
        .cloned()
        .collect()
}

/// Looks up the entry stamped `timestamp`
pub fn find_entry(history: &[HistoryEntry], timestamp: u64) -> SearchResult<&HistoryEntry> {
    history
        .iter()
        .find(|entry| entry.timestamp == timestamp)
        .ok_or(SearchError::HistoryEntryNotFound(timestamp))
}
