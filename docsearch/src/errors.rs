/// Error types for docsearch.
///
/// Most failures inside the engine never reach the editor: a malformed pattern
/// simply produces no matches, and a bad group reference in a replacement
/// falls back to literal substitution. Those cases still have variants here so
/// the engine can describe *why* it degraded, but they are caught before
/// reaching the presentation layer.
///
/// Only configuration, I/O and serialization errors are propagated to callers:
/// ```rust,ignore
/// match FileStore::open(settings) {
///     Ok(store) => // Use store,
///     Err(SearchError::IoError(e)) => // Handle unreadable history file,
///     Err(e) => // Handle other errors
/// }
/// ```
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while compiling, matching, replacing or persisting
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Query is empty")]
    EmptyQuery,
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Capture group ${0} does not exist")]
    UnknownGroup(String),
    #[error("History entry not found: {0}")]
    HistoryEntryNotFound(u64),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl SearchError {
    pub fn invalid_pattern(msg: impl Into<String>) -> Self {
        Self::InvalidPattern(msg.into())
    }

    pub fn unknown_group(group: impl Into<String>) -> Self {
        Self::UnknownGroup(group.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Whether this error only means "the pattern cannot match anything".
    ///
    /// The session turns these into an empty match list instead of an error.
    pub fn is_pattern_error(&self) -> bool {
        matches!(self, Self::EmptyQuery | Self::InvalidPattern(_))
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SearchError::invalid_pattern("unclosed group");
        assert!(matches!(err, SearchError::InvalidPattern(_)));

        let err = SearchError::unknown_group("2");
        assert!(matches!(err, SearchError::UnknownGroup(_)));

        let err = SearchError::config_error("max_history_items must be at least 1");
        assert!(matches!(err, SearchError::ConfigError(_)));
    }

    #[test]
    fn test_error_messages() {
        let err = SearchError::invalid_pattern("regex parse error");
        assert_eq!(err.to_string(), "Invalid pattern: regex parse error");

        let err = SearchError::unknown_group("3");
        assert_eq!(err.to_string(), "Capture group $3 does not exist");

        let err = SearchError::config_error("Missing required field");
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required field"
        );

        assert_eq!(SearchError::EmptyQuery.to_string(), "Query is empty");
        assert_eq!(
            SearchError::HistoryEntryNotFound(42).to_string(),
            "History entry not found: 42"
        );
    }

    #[test]
    fn test_pattern_errors_are_recoverable() {
        assert!(SearchError::EmptyQuery.is_pattern_error());
        assert!(SearchError::invalid_pattern("x").is_pattern_error());
        assert!(!SearchError::unknown_group("1").is_pattern_error());
        assert!(!SearchError::config_error("x").is_pattern_error());
    }
}
