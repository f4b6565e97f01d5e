//! Undo/redo history of surface snapshots.
//!
//! `past` holds the state produced by each committed action, most recent
//! last. The state before the oldest retained action is kept as the
//! baseline, so undoing every entry lands on it rather than on nothing.

use crate::snapshot::Snapshot;
use std::collections::VecDeque;

/// Default maximum number of undo states to keep.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Two stacks of snapshots plus the baseline they unwind to.
#[derive(Debug, Clone)]
pub struct History {
    baseline: Snapshot,
    past: VecDeque<Snapshot>,
    future: Vec<Snapshot>,
    /// Maximum depth of `past`. `None` keeps everything.
    limit: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Snapshot::default(), Some(DEFAULT_HISTORY_LIMIT))
    }
}

impl History {
    pub fn new(baseline: Snapshot, limit: Option<usize>) -> Self {
        Self {
            baseline,
            past: VecDeque::new(),
            future: Vec::new(),
            // A zero limit would make every commit unreachable by undo.
            limit: limit.map(|l| l.max(1)),
        }
    }

    /// Record the state after an action and drop everything redoable.
    pub fn commit(&mut self, state: Snapshot) {
        self.past.push_back(state);
        self.future.clear();

        if let Some(limit) = self.limit {
            while self.past.len() > limit {
                if let Some(oldest) = self.past.pop_front() {
                    self.baseline = oldest;
                }
            }
        }
        log::debug!("history commit: {} undo, 0 redo", self.past.len());
    }

    /// Step back one action.
    ///
    /// `live` is the current surface; it goes onto the redo stack so redo
    /// returns exactly to it. Returns the state to apply.
    pub fn undo(&mut self, live: Snapshot) -> Option<Snapshot> {
        self.past.pop_back()?;
        self.future.push(live);
        let target = self.past.back().unwrap_or(&self.baseline).clone();
        log::debug!("history undo: {} undo, {} redo", self.past.len(), self.future.len());
        Some(target)
    }

    /// Re-apply the most recently undone state. Returns the state to apply.
    pub fn redo(&mut self) -> Option<Snapshot> {
        let target = self.future.pop()?;
        self.past.push_back(target.clone());
        log::debug!("history redo: {} undo, {} redo", self.past.len(), self.future.len());
        Some(target)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// The state every undo eventually unwinds to.
    pub fn baseline(&self) -> &Snapshot {
        &self.baseline
    }
}
