//! In-document search and replace for text editors.
//!
//! The crate is split the way an editor's find panel is: pure matching and
//! replacement on a string ([`search`], [`replace`]), pure history list
//! operations ([`history`]), and a [`SearchSession`] that ties them to a
//! [`BufferHost`] and a [`SettingsStore`] supplied by the embedding editor.

pub mod buffer;
pub mod config;
pub mod errors;
pub mod history;
pub mod replace;
pub mod results;
pub mod search;
pub mod session;
pub mod store;

pub use buffer::{BufferEdit, BufferHost, TextBuffer};
pub use config::{CliOverrides, SearchSettings};
pub use errors::{SearchError, SearchResult};
pub use history::{Draft, HistoryCursor, HistoryEntry};
pub use replace::SingleReplacement;
pub use results::{Highlight, Match, SearchStatus};
pub use search::{find_matches, CompiledPattern, Direction, OptionSet};
pub use session::{SearchSession, SessionChange, SessionState};
pub use store::{FileStore, MemoryStore, SettingsStore};
