//! Sceneweave History - bounded undo/redo
//!
//! A linear log of full [`GraphSnapshot`]s with a cursor. New edits
//! invalidate the redo tail; the log keeps at most the most recent
//! `max_size` states, evicting oldest-first. Snapshots are value copies:
//! what `undo`/`redo` return never aliases the live store.

#![warn(unreachable_pub)]

use sceneweave_graph::GraphSnapshot;

/// Default number of retained snapshots.
pub const DEFAULT_MAX_SIZE: usize = 50;

/// Bounded linear undo/redo log.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<GraphSnapshot>,
    /// Position of the current state; `None` only while the log is empty.
    cursor: Option<usize>,
    max_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Log bounded to [`DEFAULT_MAX_SIZE`] snapshots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_MAX_SIZE)
    }

    /// Log bounded to an explicit size.
    #[must_use]
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_size,
        }
    }

    /// Record a new state.
    ///
    /// Discards any redoable states beyond the cursor, appends a deep copy,
    /// and evicts the oldest entry once the bound is exceeded (compensating
    /// the cursor so it keeps pointing at the same state).
    pub fn push(&mut self, state: &GraphSnapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);

        self.entries.push(state.clone());
        self.cursor = Some(self.entries.len() - 1);

        if self.entries.len() > self.max_size {
            self.entries.remove(0);
            self.cursor = Some(self.entries.len() - 1);
        }
    }

    /// Step back one state. `None` when already at the oldest.
    pub fn undo(&mut self) -> Option<GraphSnapshot> {
        match self.cursor {
            Some(i) if i > 0 => {
                self.cursor = Some(i - 1);
                Some(self.entries[i - 1].clone())
            }
            _ => None,
        }
    }

    /// Step forward one state. `None` when already at the newest.
    pub fn redo(&mut self) -> Option<GraphSnapshot> {
        match self.cursor {
            Some(i) if i + 1 < self.entries.len() => {
                self.cursor = Some(i + 1);
                Some(self.entries[i + 1].clone())
            }
            _ => None,
        }
    }

    /// Whether a state older than the current one exists.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|i| i > 0)
    }

    /// Whether a redoable state exists.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|i| i + 1 < self.entries.len())
    }

    /// Drop all snapshots and reset the cursor.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured bound.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
