//! Property tests for matching, navigation and history lists.
//!
//! These only use the public API, so any embedding editor can rely on the
//! same guarantees.

use docsearch::history::{add_entry, HistoryEntry};
use docsearch::search::navigator::{next, step};
use docsearch::{find_matches, CompiledPattern, Direction, OptionSet};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

fn document() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just('a'),
            Just('b'),
            Just('A'),
            Just(' '),
            Just('\n'),
            Just('é'),
            any::<char>(),
        ],
        0..64,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn pattern() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("a"),
        Just("ab"),
        Just("a+"),
        Just(r"\w+"),
        Just("b|a"),
        Just("é"),
        Just("a*"),
        Just("(?:)"),
        Just(r"\s"),
    ]
}

fn options() -> impl Strategy<Value = OptionSet> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(case_sensitive, whole_word, use_regex)| {
        OptionSet {
            case_sensitive,
            whole_word,
            use_regex,
        }
    })
}

fn entry() -> impl Strategy<Value = HistoryEntry> {
    (prop_oneof![Just(""), Just("a"), Just("b"), Just("c")], any::<bool>(), 0u64..1000).prop_map(
        |(query, literal, timestamp)| HistoryEntry {
            query: query.to_string(),
            replacement: String::new(),
            options: OptionSet::default().with_regex(!literal),
            timestamp,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn matches_are_ordered_disjoint_and_in_bounds(
        text in document(),
        query in pattern(),
        options in options(),
    ) {
        let matches = find_matches(query, options, &text);
        for m in &matches {
            prop_assert!(m.start < m.end);
            prop_assert!(m.end <= text.len());
            prop_assert_eq!(&text[m.start..m.end], m.text.as_str());
        }
        for pair in matches.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn zero_length_patterns_terminate(text in document()) {
        // "a*" matches empty at any position without an 'a'
        let matches = find_matches("a*", OptionSet::default().with_case_sensitive(true), &text);
        let leading = text.chars().take_while(|c| *c == 'a').count();
        if leading == 0 {
            prop_assert!(matches.is_empty());
        } else {
            prop_assert_eq!(matches[0].start, 0);
            prop_assert_eq!(matches[0].end, leading);
        }
    }

    #[test]
    fn replace_all_never_panics(
        text in document(),
        query in pattern(),
        replacement in "[a-z$1{}]{0,6}",
        options in options(),
    ) {
        if let Ok(compiled) = CompiledPattern::compile(query, options) {
            let _ = compiled.replace_all(&text, &replacement);
            let count = compiled.match_count(&text);
            for index in 0..=count {
                let single = compiled.replace_one(&text, &replacement, index);
                prop_assert_eq!(single.replaced, index < count);
            }
        }
    }

    #[test]
    fn navigation_forward_then_back_is_identity(current in 0usize..100, count in 1usize..50) {
        let forward = next(current, Direction::Forward, count).unwrap();
        let back = next(forward, Direction::Backward, count).unwrap();
        prop_assert_eq!(back, current % count);
    }

    #[test]
    fn navigation_stays_in_range(current in 0usize..100, delta in -200isize..200, count in 0usize..50) {
        match step(current, delta, count) {
            Some(index) => prop_assert!(index < count),
            None => prop_assert_eq!(count, 0),
        }
    }

    #[test]
    fn history_respects_capacity(entries in proptest::collection::vec(entry(), 0..40), max in 1usize..8) {
        let mut history = Vec::new();
        for e in entries {
            history = add_entry(&history, e, max);
            prop_assert!(history.len() <= max);
            for (i, a) in history.iter().enumerate() {
                for b in &history[i + 1..] {
                    prop_assert!(!a.same_search(b));
                }
            }
        }
    }

    #[test]
    fn history_dedup_law(entries in proptest::collection::vec(entry(), 1..20), pick in any::<prop::sample::Index>()) {
        let mut history = Vec::new();
        for e in entries {
            history = add_entry(&history, e, 50);
        }
        prop_assume!(!history.is_empty());

        // Re-adding the head changes nothing
        let mut head = history[0].clone();
        head.timestamp += 1;
        prop_assert_eq!(&add_entry(&history, head, 50), &history);

        // Re-adding any other entry moves it to the front
        let chosen = history[pick.index(history.len())].clone();
        let next = add_entry(&history, chosen.clone(), 50);
        prop_assert_eq!(next.len(), history.len());
        prop_assert!(next[0].same_search(&chosen));
    }
}
