//! Abstract editing commands.
//!
//! Mapping raw key events to these commands is the input layer's job; the
//! session only ever sees a [`Command`] and a [`Modifiers`] set.

use bitflags::bitflags;

bitflags! {
    /// Abstract command modifiers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Extend the selection: move the cursor, keep the anchor.
        /// Typically bound to Shift.
        const EXTEND = 0b0000_0001;
        /// Coarser granularity: words for Left/Right/Backspace/Delete, the
        /// whole buffer for Home/End. Typically bound to Ctrl.
        const WORD = 0b0000_0010;
    }
}

/// Caret movement kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Motion {
    /// Up/Down/PageUp/PageDown: movements that keep the cached column.
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::PageUp | Self::PageDown)
    }
}

/// A command an [`EditSession`](super::EditSession) can execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Type one code point, replacing the selection if any.
    InsertChar(char),
    /// Delete backward (selection, previous word, or one unit).
    Backspace(Modifiers),
    /// Delete forward (selection, next word, or one unit).
    Delete(Modifiers),
    /// Move the caret.
    Move(Motion, Modifiers),
    /// Select the whole buffer.
    SelectAll,
    /// Select `length` code points starting at `start` (both clamped).
    Select { start: usize, length: usize },
    /// Replace the selection with clipboard text.
    Paste(String),
}
