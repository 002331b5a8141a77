//! Bounded linear undo/redo.
//!
//! The log holds snapshots in chronological order and a cursor. While the
//! cursor sits past the last entry, the live state is newer than anything
//! stored. The first undo from there appends the live state, so a later
//! redo can return to it; after that, `entries[cursor]` is the state being
//! shown.
//!
//! Recording after an undo drops everything past the cursor first. When
//! the log exceeds its depth the oldest entry is evicted and the cursor
//! shifts down with it.

use std::collections::VecDeque;

use super::snapshot::Snapshot;
use crate::core::DEFAULT_HISTORY_DEPTH;

/// Undo/redo log.
#[derive(Clone, Debug)]
pub struct HistoryLog {
    entries: VecDeque<Snapshot>,
    cursor: usize,
    depth: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl HistoryLog {
    /// Empty log keeping at most `depth` entries (at least one).
    #[must_use]
    pub fn new(depth: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(depth.max(1) + 1),
            cursor: 0,
            depth: depth.max(1),
        }
    }

    /// Store the state from just before a mutation.
    pub fn record(&mut self, before: Snapshot) {
        self.entries.truncate(self.cursor);
        self.entries.push_back(before);
        self.cursor = self.entries.len();
        self.evict();
    }

    /// Step back. `live` is the state currently shown; the returned
    /// snapshot replaces it.
    pub fn undo(&mut self, live: Snapshot) -> Option<Snapshot> {
        if self.cursor == 0 {
            return None;
        }
        if self.cursor == self.entries.len() {
            // The parked live state may take the log to depth + 1
            self.entries.push_back(live);
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self) -> Option<Snapshot> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).cloned()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Stored entries, including a parked live state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    fn evict(&mut self) {
        while self.entries.len() > self.depth {
            self.entries.pop_front();
            self.cursor = self.cursor.saturating_sub(1);
        }
    }
}
