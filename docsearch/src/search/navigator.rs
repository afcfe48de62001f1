//! Cyclic stepping through a match list.

/// Direction of a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// `+1` or `-1`
    pub fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Moves `current` by `delta` positions around a ring of `match_count` matches.
///
/// Returns `None` when there are no matches; the caller keeps its previous
/// index and does not select anything.
pub fn step(current: usize, delta: isize, match_count: usize) -> Option<usize> {
    if match_count == 0 {
        return None;
    }
    let n = match_count as isize;
    // Fold current into range first so a stale index still lands in [0, n)
    let current = (current % match_count) as isize;
    Some((current + delta).rem_euclid(n) as usize)
}

/// The index after one navigation step
pub fn next(current: usize, direction: Direction, match_count: usize) -> Option<usize> {
    step(current, direction.step(), match_count)
}

/// The index to select after a single replacement changed the match count
/// from `old_count` to `new_count`.
///
/// The index advances by `new_count - old_count + 1` relative to the index the
/// replacement was made at: when the replaced occurrence disappears the index
/// stays put (now pointing at the following match), when the replacement
/// still matches it moves past it.
pub fn after_replace(replaced_at: usize, old_count: usize, new_count: usize) -> Option<usize> {
    let delta = new_count as isize - old_count as isize + 1;
    step(replaced_at, delta, new_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_wraps() {
        assert_eq!(next(0, Direction::Forward, 3), Some(1));
        assert_eq!(next(2, Direction::Forward, 3), Some(0));
    }

    #[test]
    fn test_backward_wraps() {
        assert_eq!(next(1, Direction::Backward, 3), Some(0));
        assert_eq!(next(0, Direction::Backward, 3), Some(2));
    }

    #[test]
    fn test_no_matches_is_noop() {
        assert_eq!(next(0, Direction::Forward, 0), None);
        assert_eq!(next(5, Direction::Backward, 0), None);
        assert_eq!(after_replace(0, 1, 0), None);
    }

    #[test]
    fn test_single_match() {
        assert_eq!(next(0, Direction::Forward, 1), Some(0));
        assert_eq!(next(0, Direction::Backward, 1), Some(0));
    }

    #[test]
    fn test_stale_index_lands_in_range() {
        assert_eq!(next(7, Direction::Forward, 3), Some(2));
        assert_eq!(next(7, Direction::Backward, 3), Some(0));
    }

    #[test]
    fn test_forward_then_backward_returns() {
        for n in 1..6 {
            for i in 0..n {
                let there = next(i, Direction::Forward, n).unwrap();
                assert_eq!(next(there, Direction::Backward, n), Some(i));
            }
        }
    }

    #[test]
    fn test_after_replace_match_removed() {
        // "foo foo foo", replace #1 with "bar": 3 -> 2, stay on index 1
        assert_eq!(after_replace(1, 3, 2), Some(1));
        // Replacing the last match wraps to the first
        assert_eq!(after_replace(2, 3, 2), Some(0));
    }

    #[test]
    fn test_after_replace_count_unchanged() {
        // Replacement still matches: move past it
        assert_eq!(after_replace(1, 3, 3), Some(2));
        assert_eq!(after_replace(2, 3, 3), Some(0));
    }

    #[test]
    fn test_after_replace_count_grew() {
        // "a" -> "aa" style growth: skip both copies
        assert_eq!(after_replace(0, 2, 3), Some(2));
        assert_eq!(after_replace(1, 2, 3), Some(0));
    }

    #[test]
    fn test_after_replace_large_drop_stays_in_range() {
        assert_eq!(after_replace(0, 5, 1), Some(0));
        assert_eq!(after_replace(3, 6, 2), Some(0));
    }
}
