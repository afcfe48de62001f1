/// Pattern compilation, match enumeration and navigation.
///
/// The engine delegates all matching to the `regex` crate:
/// ```rust,ignore
/// let pattern = CompiledPattern::compile("foo", OptionSet::default())?;
/// let matches = pattern.find_matches("Foo bar foo FOO");
/// assert_eq!(matches.len(), 3);
/// ```
///
/// Everything here is synchronous and allocation-light enough to be rerun on
/// every keystroke or buffer change. Note that the pattern dialect is the
/// regex crate's, so constructs it does not support (look-around,
/// backreferences) fail to compile and behave as "no matches".
pub mod matcher;
pub mod navigator;

pub use matcher::{find_matches, CompiledPattern, OptionSet};
pub use navigator::Direction;
