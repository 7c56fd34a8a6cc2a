//! Undo history: a bounded stack of game snapshots.

use std::collections::VecDeque;

use crate::serialization::Archive;

/// Bounded undo stack, most recent snapshot first.
///
/// Holds at most `depth` snapshots; pushing onto a full history evicts the
/// oldest one. A depth of 0 disables undo.
#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    entries: VecDeque<Archive>,
    depth: usize,
}

impl UndoHistory {
    /// An empty history keeping up to `depth` snapshots.
    pub fn new(depth: usize) -> Self {
        UndoHistory { entries: VecDeque::with_capacity(depth), depth }
    }

    /// Maximum snapshots kept.
    #[inline]
    pub fn depth(&self) -> usize { self.depth }

    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Record `snapshot` as the most recent state, evicting the oldest when
    /// full. Does nothing at depth 0.
    ///
    /// ```
    /// use slide_2048::history::UndoHistory;
    /// use slide_2048::serialization::Archive;
    ///
    /// let mut history = UndoHistory::new(2);
    /// for score in [1, 2, 3] {
    ///     history.push(Archive::new(score, vec![0; 4]));
    /// }
    /// assert_eq!(history.len(), 2);
    /// assert_eq!(history.pop().map(|a| a.score), Some(3));
    /// assert_eq!(history.peek().map(|a| a.score), Some(2));
    /// ```
    pub fn push(&mut self, snapshot: Archive) {
        if self.depth == 0 {
            return;
        }
        while self.entries.len() >= self.depth {
            self.entries.pop_back();
        }
        self.entries.push_front(snapshot);
    }

    /// Take the most recent snapshot.
    pub fn pop(&mut self) -> Option<Archive> { self.entries.pop_front() }

    /// The most recent snapshot, left in place.
    pub fn peek(&self) -> Option<&Archive> { self.entries.front() }

    /// Forget every snapshot.
    pub fn clear(&mut self) { self.entries.clear(); }
}
