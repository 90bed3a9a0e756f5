//! Snapshot-based undo/redo.
//!
//! Two bounded stacks of whole-state snapshots:
//! - A snapshot is recorded *before* a mutation, and only if the mutation
//!   actually changed the state
//! - Recording clears the redo stack
//! - Undo/redo swap the current state with the top of the other stack
//!
//! Snapshots of a [`Project`](reelcut_project_model::Project) are cheap:
//! track and cue lists are reference counted and only the list a mutation
//! touches gets copied.

use std::collections::VecDeque;

/// Default depth of each stack.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// A single entry in the undo or redo stack.
#[derive(Debug, Clone)]
pub struct HistoryEntry<T> {
    /// Human-readable action label ("Move clip", "Apply template").
    pub label: String,
    pub snapshot: T,
}

/// Bounded undo/redo over state snapshots.
#[derive(Debug, Clone)]
pub struct HistoryManager<T> {
    undo_stack: VecDeque<HistoryEntry<T>>,
    redo_stack: VecDeque<HistoryEntry<T>>,
    max_entries: usize,
}

impl<T> Default for HistoryManager<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl<T> HistoryManager<T> {
    /// Create a manager keeping at most `max_entries` per stack (at least 1).
    pub fn new(max_entries: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Push the state from *before* an action. Clears the redo stack.
    pub fn push(&mut self, label: &str, snapshot: T) {
        self.redo_stack.clear();
        push_bounded(&mut self.undo_stack, label, snapshot, self.max_entries);
        tracing::debug!(
            label,
            undo_depth = self.undo_stack.len(),
            "History entry pushed"
        );
    }

    /// Step back: returns the state to restore and keeps `current` for redo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let Some(entry) = self.undo_stack.pop_back() else {
            tracing::debug!("Undo ignored: nothing to undo");
            return None;
        };
        tracing::debug!(
            label = %entry.label,
            undo_remaining = self.undo_stack.len(),
            "Undo"
        );
        push_bounded(&mut self.redo_stack, &entry.label, current, self.max_entries);
        Some(entry.snapshot)
    }

    /// Step forward: returns the state to restore and keeps `current` for undo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let Some(entry) = self.redo_stack.pop_back() else {
            tracing::debug!("Redo ignored: nothing to redo");
            return None;
        };
        tracing::debug!(
            label = %entry.label,
            redo_remaining = self.redo_stack.len(),
            "Redo"
        );
        push_bounded(&mut self.undo_stack, &entry.label, current, self.max_entries);
        Some(entry.snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Label of the action the next undo would revert.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.back().map(|e| e.label.as_str())
    }

    /// Label of the action the next redo would reapply.
    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.back().map(|e| e.label.as_str())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl<T: PartialEq> HistoryManager<T> {
    /// Record `before` only if it differs from `after`. Returns whether an
    /// entry was pushed.
    pub fn record(&mut self, label: &str, before: T, after: &T) -> bool {
        if before == *after {
            return false;
        }
        self.push(label, before);
        true
    }
}

fn push_bounded<T>(stack: &mut VecDeque<HistoryEntry<T>>, label: &str, snapshot: T, max: usize) {
    stack.push_back(HistoryEntry {
        label: label.to_string(),
        snapshot,
    });
    while stack.len() > max {
        stack.pop_front();
    }
}
