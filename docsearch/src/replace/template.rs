use regex::Regex;

use crate::errors::{SearchError, SearchResult};

/// A group reference found in a replacement string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupRef<'a> {
    Index(usize),
    Name(&'a str),
}

/// Scans `replacement` for group references using the same rules as
/// [`regex::Captures::expand`]:
///
/// * `$$` is a literal dollar sign
/// * `${name}` references a group by name or number, up to the closing brace
/// * `$name` takes the longest run of `[_0-9A-Za-z]`
/// * a `$` followed by anything else is kept literally
pub fn group_refs(replacement: &str) -> Vec<GroupRef<'_>> {
    let bytes = replacement.as_bytes();
    let mut refs = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        let rest = &replacement[i + 1..];
        if rest.starts_with('$') {
            i += 2;
            continue;
        }
        if let Some(braced) = rest.strip_prefix('{') {
            match braced.find('}') {
                Some(close) => {
                    refs.push(to_ref(&braced[..close]));
                    i += 2 + close + 1;
                }
                None => i += 1,
            }
            continue;
        }
        let len = rest
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();
        if len > 0 {
            refs.push(to_ref(&rest[..len]));
        }
        i += 1 + len;
    }

    refs
}

fn to_ref(name: &str) -> GroupRef<'_> {
    match name.parse::<usize>() {
        Ok(index) => GroupRef::Index(index),
        Err(_) => GroupRef::Name(name),
    }
}

/// Checks that every group `replacement` refers to exists in `regex`.
///
/// The regex crate silently expands unknown groups to an empty string; the
/// engine treats that as a substitution failure instead.
pub fn validate_group_refs(regex: &Regex, replacement: &str) -> SearchResult<()> {
    let group_count = regex.captures_len(); // includes group 0

    for group in group_refs(replacement) {
        match group {
            GroupRef::Index(index) if index >= group_count => {
                return Err(SearchError::unknown_group(index.to_string()));
            }
            GroupRef::Name(name) if !regex.capture_names().flatten().any(|n| n == name) => {
                return Err(SearchError::unknown_group(name));
            }
            _ => {}
        }
    }
    Ok(())
}
