use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::errors::{SearchError, SearchResult};
use crate::history::DEFAULT_MAX_ITEMS;
use crate::search::matcher::OptionSet;

/// Recommended bounds for `max_history_items`
pub const RECOMMENDED_HISTORY_RANGE: std::ops::RangeInclusive<usize> = 5..=50;

/// Settings shared by every search session.
///
/// # Configuration Locations
///
/// Loaded from these locations, later ones overriding earlier ones:
/// 1. Global `$HOME/.config/docsearch/config.yaml`
/// 2. Local `.docsearch.yaml` in the current directory
/// 3. Custom config file specified via `--config` flag
///
/// # Configuration Format
///
/// ```yaml
/// # Options a new search panel starts with
/// default_search_options:
///   case_sensitive: false
///   whole_word: false
///   use_regex: true
///
/// # How many past searches to remember
/// max_history_items: 20
///
/// # Where history is stored (default: <config dir>/docsearch/history.json)
/// history_path: "/tmp/docsearch-history.json"
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Options applied when a session opens without a draft to restore
    pub default_search_options: OptionSet,

    /// Capacity of the search history
    pub max_history_items: usize,

    /// JSON file holding the search history
    pub history_path: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_search_options: OptionSet::default(),
            max_history_items: DEFAULT_MAX_ITEMS,
            history_path: None,
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_history_path() -> PathBuf {
    dirs::config_dir()
        .map(|p| p.join("docsearch/history.json"))
        .unwrap_or_else(|| PathBuf::from(".docsearch-history.json"))
}

impl SearchSettings {
    /// Loads configuration from the default locations
    pub fn load() -> SearchResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration, layering `config_path` over the default locations.
    ///
    /// A missing default file is skipped; a missing `config_path` is an error.
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let defaults = [
            dirs::config_dir().map(|p| p.join("docsearch/config.yaml")),
            Some(PathBuf::from(".docsearch.yaml")),
        ];
        for path in defaults.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects settings the engine cannot work with
    pub fn validate(&self) -> SearchResult<()> {
        if self.max_history_items == 0 {
            return Err(SearchError::config_error(
                "max_history_items must be at least 1",
            ));
        }
        if !RECOMMENDED_HISTORY_RANGE.contains(&self.max_history_items) {
            warn!(
                "max_history_items = {} is outside the recommended range {}..={}",
                self.max_history_items,
                RECOMMENDED_HISTORY_RANGE.start(),
                RECOMMENDED_HISTORY_RANGE.end()
            );
        }
        Ok(())
    }

    /// The history file location, falling back to the platform config dir
    pub fn history_path(&self) -> PathBuf {
        self.history_path.clone().unwrap_or_else(default_history_path)
    }

    /// Renders the settings in the same YAML layout the loader reads
    pub fn to_yaml(&self) -> SearchResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Writes the settings to `path` as YAML, creating parent directories
    pub fn write_to(&self, path: &Path) -> SearchResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(path) = cli.history_path {
            self.history_path = Some(path);
        }
        if let Some(max) = cli.max_history_items {
            self.max_history_items = max;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        self
    }
}

/// Values given on the command line; `None` keeps the file value
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub history_path: Option<PathBuf>,
    pub max_history_items: Option<usize>,
    pub log_level: Option<String>,
}
