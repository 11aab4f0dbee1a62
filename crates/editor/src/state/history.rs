//! Linear undo/redo over full-collection snapshots.
//!
//! The log always holds at least one entry (the initial state) and the cursor
//! always points at the entry that represents the current state. Committing
//! from a non-tip cursor discards the redo tail; there is no branching.

/// Snapshot log with a cursor
#[derive(Debug, Clone)]
pub struct History<T: Clone> {
    entries: Vec<T>,
    cursor: usize,
    limit: usize,
}

impl<T: Clone> History<T> {
    /// Default number of snapshots kept before the oldest is dropped
    pub const DEFAULT_LIMIT: usize = 100;

    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, Self::DEFAULT_LIMIT)
    }

    /// History keeping at most `limit` snapshots (never fewer than 2)
    pub fn with_limit(initial: T, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            limit: limit.max(2),
        }
    }

    /// Record a post-mutation state.
    pub fn commit(&mut self, state: &T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(state.clone());
        if self.entries.len() > self.limit {
            let overflow = self.entries.len() - self.limit;
            self.entries.drain(..overflow);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back. Returns the snapshot that is now current.
    pub fn undo(&mut self) -> Option<&T> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward. Returns the snapshot that is now current.
    pub fn redo(&mut self) -> Option<&T> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// Drop all snapshots and start over from `initial`
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }

    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}
