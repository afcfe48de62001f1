use crate::history::{Draft, HistoryEntry};
use crate::search::navigator::Direction;

/// Position while cycling through history with the arrow keys.
///
/// `index == None` means "not browsing": the fields show the live draft.
/// Leaving that position snapshots the live fields so that cycling past
/// either end restores them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryCursor {
    index: Option<usize>,
    draft: Option<Draft>,
}

impl HistoryCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The history index currently shown, `None` when showing the draft
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_browsing(&self) -> bool {
        self.index.is_some()
    }

    /// The snapshot taken when browsing started
    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Back to draft mode, forgetting the snapshot
    pub fn reset(&mut self) {
        self.index = None;
        self.draft = None;
    }

    /// Steps through `history` and returns what the fields should now show.
    ///
    /// `Forward` moves to older entries, `Backward` to newer ones. Stepping
    /// back from the draft wraps to the oldest entry; stepping past the
    /// oldest entry wraps to the draft. An empty history is a no-op.
    pub fn cycle(&mut self, history: &[HistoryEntry], direction: Direction, live: &Draft) -> Option<Draft> {
        if history.is_empty() {
            return None;
        }

        if self.index.is_none() {
            self.draft = Some(live.clone());
        }

        let current = self.index.map_or(-1, |i| i as isize);
        let next = current + direction.step();

        self.index = if next < -1 {
            Some(history.len() - 1)
        } else if next == -1 || next >= history.len() as isize {
            None
        } else {
            Some(next as usize)
        };

        match self.index {
            Some(i) => history.get(i).map(HistoryEntry::draft),
            None => self.draft.clone(),
        }
    }
}
