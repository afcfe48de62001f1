use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::errors::{SearchError, SearchResult};
use crate::results::Match;

/// How a query is interpreted when it is compiled.
///
/// Two option sets are equal when all three flags are equal; history
/// deduplication relies on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionSet {
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub use_regex: bool,
}

impl Default for OptionSet {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            whole_word: false,
            use_regex: true,
        }
    }
}

impl OptionSet {
    pub fn literal() -> Self {
        Self {
            use_regex: false,
            ..Self::default()
        }
    }

    pub fn with_case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    pub fn with_whole_word(mut self, value: bool) -> Self {
        self.whole_word = value;
        self
    }

    pub fn with_regex(mut self, value: bool) -> Self {
        self.use_regex = value;
        self
    }
}

/// A query compiled against a set of options.
///
/// Construction fails for an empty query or a malformed regular expression;
/// callers that must never fail (the session) treat that as "zero matches".
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    query: String,
    options: OptionSet,
}

impl CompiledPattern {
    /// Compiles `query` under `options`.
    ///
    /// Literal queries are escaped, whole-word queries are wrapped in `\b`
    /// assertions, and matching is case-insensitive unless requested otherwise.
    pub fn compile(query: &str, options: OptionSet) -> SearchResult<Self> {
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let mut source = if options.use_regex {
            query.to_string()
        } else {
            regex::escape(query)
        };

        if options.whole_word {
            source = format!(r"\b{}\b", source);
        }

        let regex = RegexBuilder::new(&source)
            .case_insensitive(!options.case_sensitive)
            .build()
            .map_err(|e| {
                warn!("Invalid pattern '{}': {}", query, e);
                SearchError::invalid_pattern(e.to_string())
            })?;

        debug!(
            "Compiled '{}' as /{}/ (case_sensitive={})",
            query, source, options.case_sensitive
        );

        Ok(Self {
            regex,
            query: query.to_string(),
            options,
        })
    }

    /// The query as typed, before escaping or wrapping
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn options(&self) -> OptionSet {
        self.options
    }

    /// The compiled expression, including escaping and boundary assertions
    pub fn source(&self) -> &str {
        self.regex.as_str()
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Finds every non-overlapping match in document order.
    ///
    /// Enumeration stops at the first zero-length match; that match is not
    /// reported.
    pub fn find_matches(&self, text: &str) -> Vec<Match> {
        let mut matches = Vec::new();

        for caps in self.regex.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.is_empty() {
                trace!("Zero-length match at {}, stopping", whole.start());
                break;
            }
            matches.push(Match {
                start: whole.start(),
                end: whole.end(),
                text: whole.as_str().to_string(),
                groups: caps
                    .iter()
                    .skip(1)
                    .map(|g| g.map(|g| g.as_str().to_string()))
                    .collect(),
            });
        }

        trace!("Found {} matches for '{}'", matches.len(), self.query);
        matches
    }

    pub fn match_count(&self, text: &str) -> usize {
        self.find_matches(text).len()
    }
}

/// Compiles and enumerates in one step, mapping any compile failure to no matches
pub fn find_matches(query: &str, options: OptionSet, text: &str) -> Vec<Match> {
    CompiledPattern::compile(query, options)
        .map(|pattern| pattern.find_matches(text))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(matches: &[Match]) -> Vec<(usize, usize)> {
        matches.iter().map(|m| (m.start, m.end)).collect()
    }

    #[test]
    fn test_default_options() {
        let options = OptionSet::default();
        assert!(!options.case_sensitive);
        assert!(!options.whole_word);
        assert!(options.use_regex);
    }

    #[test]
    fn test_case_insensitive_by_default() {
        let pattern = CompiledPattern::compile("foo", OptionSet::default()).unwrap();
        let matches = pattern.find_matches("Foo bar foo FOO");
        assert_eq!(ranges(&matches), vec![(0, 3), (8, 11), (12, 15)]);
        assert_eq!(matches[0].text, "Foo");
        assert_eq!(matches[2].text, "FOO");
    }

    #[test]
    fn test_case_sensitive() {
        let options = OptionSet::default().with_case_sensitive(true);
        let pattern = CompiledPattern::compile("foo", options).unwrap();
        assert_eq!(ranges(&pattern.find_matches("Foo bar foo FOO")), vec![(8, 11)]);
    }

    #[test]
    fn test_whole_word() {
        let options = OptionSet::default().with_whole_word(true);
        let pattern = CompiledPattern::compile("cat", options).unwrap();
        assert_eq!(ranges(&pattern.find_matches("concatenate cat")), vec![(12, 15)]);
    }

    #[test]
    fn test_literal_escapes_metacharacters() {
        let pattern = CompiledPattern::compile("a.b(c)", OptionSet::literal()).unwrap();
        let matches = pattern.find_matches("axb(c) a.b(c)");
        assert_eq!(ranges(&matches), vec![(7, 13)]);
        assert!(matches[0].groups.is_empty());
    }

    #[test]
    fn test_literal_whole_word() {
        let options = OptionSet::literal().with_whole_word(true);
        let pattern = CompiledPattern::compile("c++", options).unwrap();
        // `\b` after `+` needs a word character to follow
        assert_eq!(pattern.match_count("c++x c++ y"), 1);
    }

    #[test]
    fn test_empty_query_is_invalid() {
        let err = CompiledPattern::compile("", OptionSet::default()).unwrap_err();
        assert!(matches!(err, SearchError::EmptyQuery));
        assert!(find_matches("", OptionSet::default(), "anything").is_empty());
    }

    #[test]
    fn test_invalid_regex() {
        let err = CompiledPattern::compile("(", OptionSet::default()).unwrap_err();
        assert!(matches!(err, SearchError::InvalidPattern(_)));
        assert!(find_matches("(", OptionSet::default(), "(((").is_empty());

        // The same text is fine as a literal
        assert_eq!(find_matches("(", OptionSet::literal(), "(((").len(), 3);
    }

    #[test]
    fn test_capture_groups() {
        let pattern = CompiledPattern::compile(r"(\w+)@(x)?y?", OptionSet::default()).unwrap();
        let matches = pattern.find_matches("a@x b@y");
        assert_eq!(matches.len(), 2);
        assert_eq!(
            matches[0].groups,
            vec![Some("a".to_string()), Some("x".to_string())]
        );
        assert_eq!(matches[1].groups, vec![Some("b".to_string()), None]);
    }

    #[test]
    fn test_zero_length_match_stops_enumeration() {
        let pattern = CompiledPattern::compile("x|", OptionSet::default()).unwrap();
        assert!(pattern.find_matches("abc").is_empty());

        // Non-empty matches before the first empty one are kept
        let pattern = CompiledPattern::compile("a*", OptionSet::default()).unwrap();
        assert_eq!(ranges(&pattern.find_matches("aab")), vec![(0, 2)]);
    }

    #[test]
    fn test_matches_are_ordered_and_disjoint() {
        let pattern = CompiledPattern::compile(r"\w+", OptionSet::default()).unwrap();
        let text = "one two  three\nfour";
        let matches = pattern.find_matches(text);
        assert_eq!(matches.len(), 4);
        for pair in matches.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        for m in &matches {
            assert_eq!(&text[m.range()], m.text);
        }
    }

    #[test]
    fn test_multibyte_offsets_are_byte_offsets() {
        let pattern = CompiledPattern::compile("é", OptionSet::default()).unwrap();
        let text = "café É";
        let matches = pattern.find_matches(text);
        assert_eq!(ranges(&matches), vec![(3, 5), (6, 8)]);
    }

    #[test]
    fn test_source_reflects_options() {
        let options = OptionSet::literal().with_whole_word(true);
        let pattern = CompiledPattern::compile("a.b", options).unwrap();
        assert_eq!(pattern.source(), r"\ba\.b\b");
        assert_eq!(pattern.query(), "a.b");
        assert_eq!(pattern.options(), options);
    }
}
