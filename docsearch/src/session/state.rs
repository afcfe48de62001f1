use crate::history::Draft;
use crate::search::matcher::OptionSet;

/// Everything a search panel shows, as a plain value.
///
/// `active_index` is only meaningful while there are matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub query: String,
    pub replacement: String,
    pub options: OptionSet,
    pub active_index: usize,
    pub panel_open: bool,
    pub replace_mode: bool,
}

/// A single change to [`SessionState`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    /// Show the panel. `seed` fills the fields only if the panel was closed.
    Open { replace_mode: bool, seed: Draft },
    Close,
    Query(String),
    Replacement(String),
    Options(OptionSet),
    ActiveIndex(usize),
    /// Overwrite query, replacement and options together
    Recall(Draft),
}

impl SessionState {
    /// Returns the state after `change`.
    ///
    /// Anything that changes what is being searched for (query, options,
    /// recall, opening) puts the active index back to 0.
    pub fn apply(self, change: SessionChange) -> SessionState {
        match change {
            SessionChange::Open { replace_mode, seed } => {
                if self.panel_open {
                    SessionState {
                        replace_mode,
                        ..self
                    }
                } else {
                    SessionState {
                        query: seed.query,
                        replacement: seed.replacement,
                        options: seed.options,
                        active_index: 0,
                        panel_open: true,
                        replace_mode,
                    }
                }
            }
            SessionChange::Close => SessionState::default(),
            SessionChange::Query(query) => SessionState {
                query,
                active_index: 0,
                ..self
            },
            SessionChange::Replacement(replacement) => SessionState {
                replacement,
                ..self
            },
            SessionChange::Options(options) => SessionState {
                options,
                active_index: 0,
                ..self
            },
            SessionChange::ActiveIndex(active_index) => SessionState {
                active_index,
                ..self
            },
            SessionChange::Recall(draft) => SessionState {
                query: draft.query,
                replacement: draft.replacement,
                options: draft.options,
                active_index: 0,
                ..self
            },
        }
    }

    /// The query, replacement and options currently shown
    pub fn draft(&self) -> Draft {
        Draft {
            query: self.query.clone(),
            replacement: self.replacement.clone(),
            options: self.options,
        }
    }
}
