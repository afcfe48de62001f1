//! The settings and persistence side of a search session.
//!
//! The engine never owns the history list. It reads it through
//! [`SettingsStore`] and hands back whole new lists to be saved.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::SearchSettings;
use crate::errors::{SearchError, SearchResult};
use crate::history::{self, HistoryEntry};
use crate::search::matcher::OptionSet;

/// Source of default options and owner of the search history
pub trait SettingsStore {
    fn default_search_options(&self) -> OptionSet;

    fn search_history(&self) -> &[HistoryEntry];

    fn max_history_items(&self) -> usize;

    /// Replaces the stored history with `history`
    fn save_search_history(&mut self, history: Vec<HistoryEntry>) -> SearchResult<()>;
}

/// Keeps everything in memory; for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub settings: SearchSettings,
    pub history: Vec<HistoryEntry>,
}

impl MemoryStore {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            settings,
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        history::observe_timestamps(&history);
        self.history = history;
        self
    }
}

impl SettingsStore for MemoryStore {
    fn default_search_options(&self) -> OptionSet {
        self.settings.default_search_options
    }

    fn search_history(&self) -> &[HistoryEntry] {
        &self.history
    }

    fn max_history_items(&self) -> usize {
        self.settings.max_history_items
    }

    fn save_search_history(&mut self, history: Vec<HistoryEntry>) -> SearchResult<()> {
        self.history = history;
        Ok(())
    }
}

/// Settings plus a history list persisted as pretty-printed JSON
#[derive(Debug, Clone)]
pub struct FileStore {
    settings: SearchSettings,
    path: PathBuf,
    history: Vec<HistoryEntry>,
}

impl FileStore {
    /// Opens the history file named by `settings`; a missing file is empty history
    pub fn open(settings: SearchSettings) -> SearchResult<Self> {
        let path = settings.history_path();
        let history = load_history(&path)?;
        history::observe_timestamps(&history);
        debug!(
            "Loaded {} history entries from {}",
            history.len(),
            path.display()
        );
        Ok(Self {
            settings,
            path,
            history,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }
}

impl SettingsStore for FileStore {
    fn default_search_options(&self) -> OptionSet {
        self.settings.default_search_options
    }

    fn search_history(&self) -> &[HistoryEntry] {
        &self.history
    }

    fn max_history_items(&self) -> usize {
        self.settings.max_history_items
    }

    fn save_search_history(&mut self, history: Vec<HistoryEntry>) -> SearchResult<()> {
        write_history(&self.path, &history)?;
        info!(
            "Saved {} history entries to {}",
            history.len(),
            self.path.display()
        );
        self.history = history;
        Ok(())
    }
}

fn load_history(path: &Path) -> SearchResult<Vec<HistoryEntry>> {
    match fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(SearchError::IoError(e)),
    }
}

fn write_history(path: &Path, history: &[HistoryEntry]) -> SearchResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(history)?;

    // Write to temporary file and rename atomically
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
