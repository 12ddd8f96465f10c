//! Undo/redo layered on top of an [`EditSession`].
//!
//! The session journals every buffer mutation as an [`Edit`]. [`History`]
//! pulls that journal into undo groups and replays inverse or forward edits
//! through [`EditSession::apply_edits`], so undo and redo go through the
//! same freeze/thaw path (and emit the same notifications) as any other
//! command.
//!
//! # Example
//!
//! ```
//! use textfield::{EditSession, History};
//!
//! let mut field = EditSession::new();
//! let mut history = History::new();
//! history.attach(&mut field);
//!
//! field.paste("Hello");
//! history.record(&mut field);
//! history.commit();
//! field.paste(" World");
//! history.record(&mut field);
//! history.commit();
//!
//! history.undo(&mut field);
//! assert_eq!(field.text(), "Hello");
//! history.redo(&mut field);
//! assert_eq!(field.text(), "Hello World");
//! ```

use crate::session::EditSession;

/// One buffer mutation: `removed` was replaced by `inserted` at `offset`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edit {
    /// Code-point offset of the change.
    pub offset: usize,
    /// Text that was there before.
    pub removed: String,
    /// Text that is there now.
    pub inserted: String,
}

impl Edit {
    /// The edit that undoes this one.
    #[must_use]
    pub fn invert(&self) -> Self {
        Self {
            offset: self.offset,
            removed: self.inserted.clone(),
            inserted: self.removed.clone(),
        }
    }
}

/// Default maximum number of undo groups to retain.
pub const DEFAULT_MAX_HISTORY_DEPTH: usize = 1000;

/// Undo/redo stacks with bounded memory usage.
#[derive(Clone, Debug)]
pub struct History {
    undo_stack: Vec<Vec<Edit>>,
    redo_stack: Vec<Vec<Edit>>,
    current_group: Vec<Edit>,
    /// Maximum number of undo groups to retain. Oldest entries are dropped when exceeded.
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            current_group: Vec::new(),
            max_depth: DEFAULT_MAX_HISTORY_DEPTH,
        }
    }
}

impl History {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history with a custom maximum depth.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Maximum number of undo groups kept.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Change the maximum depth; applied on the next commit.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// Turn on the session's journal so its edits can be recorded.
    ///
    /// Edits made before attaching are not undoable.
    pub fn attach(&mut self, session: &mut EditSession) {
        session.enable_journal();
    }

    /// Move the session's journal into the current group, attaching first
    /// if needed.
    ///
    /// Any new edit invalidates the redo stack.
    pub fn record(&mut self, session: &mut EditSession) {
        self.attach(session);
        let edits = session.take_journal();
        if !edits.is_empty() {
            self.current_group.extend(edits);
            self.redo_stack.clear();
        }
    }

    /// Close the current group.
    pub fn commit(&mut self) {
        if !self.current_group.is_empty() {
            self.undo_stack
                .push(std::mem::take(&mut self.current_group));
            // Enforce depth limit by dropping oldest entries
            if self.undo_stack.len() > self.max_depth {
                let excess = self.undo_stack.len() - self.max_depth;
                self.undo_stack.drain(..excess);
            }
        }
    }

    /// Undo the last group. Returns `false` if there was nothing to undo
    /// or the session is read-only.
    pub fn undo(&mut self, session: &mut EditSession) -> bool {
        if session.is_read_only() {
            return false;
        }
        self.record(session);
        self.commit();
        let Some(group) = self.undo_stack.pop() else {
            return false;
        };

        let inverse: Vec<Edit> = group.iter().rev().map(Edit::invert).collect();
        session.apply_edits(&inverse);
        // The replay is not a new edit
        session.take_journal();
        self.redo_stack.push(group);
        true
    }

    /// Redo the last undone group.
    pub fn redo(&mut self, session: &mut EditSession) -> bool {
        if session.is_read_only() {
            return false;
        }
        self.record(session);
        let Some(group) = self.redo_stack.pop() else {
            return false;
        };

        session.apply_edits(&group);
        session.take_journal();
        self.undo_stack.push(group);
        true
    }

    /// Check if undo is available (including an uncommitted group).
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() || !self.current_group.is_empty()
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_group.clear();
    }
}
