//! Whole-text and single-match replacement.
//!
//! Replacement text uses the regex crate's group syntax (`$1`, `${name}`,
//! `$$`). A replacement that references a group the pattern does not have is
//! a substitution failure: replace-all then falls back to substituting the raw
//! query literally, and replace-one inserts the replacement verbatim.

use std::ops::Range;

use tracing::{debug, warn};

use crate::search::matcher::CompiledPattern;

mod template;
pub use template::{group_refs, validate_group_refs, GroupRef};

/// Result of replacing a single match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleReplacement {
    /// The full text after the replacement (the input when nothing changed)
    pub text: String,
    /// Whether a match was replaced
    pub replaced: bool,
    /// Where the inserted text sits in `text`, when `replaced`
    pub inserted: Option<Range<usize>>,
}

impl SingleReplacement {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            replaced: false,
            inserted: None,
        }
    }
}

impl CompiledPattern {
    /// Replaces every non-overlapping match with `replacement`.
    pub fn replace_all(&self, text: &str, replacement: &str) -> String {
        match validate_group_refs(self.regex(), replacement) {
            Ok(()) => {
                let count = self.match_count(text);
                debug!("Replacing {} matches of '{}'", count, self.query());
                self.regex().replace_all(text, replacement).into_owned()
            }
            Err(e) => {
                warn!("{}; falling back to literal replacement", e);
                literal_replace_all(text, self.query(), replacement)
            }
        }
    }

    /// How many places [`replace_all`](Self::replace_all) substitutes.
    ///
    /// Unlike [`find_matches`](Self::find_matches) this includes empty matches,
    /// which replace-all fills in as well.
    pub fn substitution_count(&self, text: &str, replacement: &str) -> usize {
        match validate_group_refs(self.regex(), replacement) {
            Ok(()) => self.regex().find_iter(text).count(),
            Err(_) if self.query().is_empty() => 0,
            Err(_) => text.matches(self.query()).count(),
        }
    }

    /// Replaces only the match at `index` (in document order).
    ///
    /// Offsets of later matches are not adjusted; callers enumerate again
    /// after applying the returned text.
    pub fn replace_one(&self, text: &str, replacement: &str, index: usize) -> SingleReplacement {
        let matches = self.find_matches(text);
        let Some(target) = matches.get(index) else {
            debug!(
                "No match at index {} ({} matches), nothing replaced",
                index,
                matches.len()
            );
            return SingleReplacement::unchanged(text);
        };

        let rendered = match validate_group_refs(self.regex(), replacement) {
            Ok(()) => {
                // Re-run from the match start so only this occurrence's groups
                // are resolved, with the surrounding text still visible to
                // boundary assertions.
                let Some(caps) = self
                    .regex()
                    .captures_at(text, target.start)
                    .filter(|caps| caps.get(0).map(|m| m.range()) == Some(target.range()))
                else {
                    return SingleReplacement::unchanged(text);
                };
                let mut dst = String::new();
                caps.expand(replacement, &mut dst);
                dst
            }
            Err(e) => {
                warn!("{}; inserting replacement literally", e);
                replacement.to_string()
            }
        };

        let mut result = String::with_capacity(text.len() - target.len() + rendered.len());
        result.push_str(&text[..target.start]);
        result.push_str(&rendered);
        result.push_str(&text[target.end..]);

        SingleReplacement {
            text: result,
            replaced: true,
            inserted: Some(target.start..target.start + rendered.len()),
        }
    }
}

/// Plain substring replacement of every occurrence of `query`, no group expansion
fn literal_replace_all(text: &str, query: &str, replacement: &str) -> String {
    if query.is_empty() || !text.contains(query) {
        return text.to_string();
    }
    text.replace(query, replacement)
}
