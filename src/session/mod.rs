//! Edit session: selection state machine and command dispatch.
//!
//! [`EditSession`] owns the [`TextBuffer`] of one text field together with
//! its selection (`anchor` is the fixed end, `cursor` the moving end) and
//! the column cached for vertical movement. Every command runs the same
//! skeleton:
//!
//! 1. freeze notifications
//! 2. remember `(anchor, cursor)`
//! 3. run the command
//! 4. if the selection moved, publish the new range
//! 5. thaw: sync properties, emit at most one text-changed and one
//!    selection-changed notification
//!
//! Commands never fail. Offsets are clamped, and a command rejected by
//! policy (read-only, max length, disallowed line break) does nothing at
//! all.
//!
//! # Example
//!
//! ```
//! use textfield::{EditSession, Modifiers, Motion};
//!
//! let mut field = EditSession::with_text("hello");
//! field.select(1, 2);
//! field.insert_char('X');
//! assert_eq!(field.text(), "hXlo");
//! assert_eq!(field.cursor(), 2);
//!
//! field.move_caret(Motion::Home, Modifiers::EXTEND);
//! assert_eq!(field.selected_text(), "hX");
//! ```

mod command;
mod notify;
mod options;

pub use command::{Command, Modifiers, Motion};
pub use notify::{ChangeListener, ListenerId, SyncedProperties};
use notify::{ChangeFlags, ChangeNotifier};
pub use options::{DEFAULT_PAGE_LINES, SessionOptions};

use crate::event::{LogLevel, emit_log, log_enabled};
use crate::history::Edit;
use crate::text::{TextBuffer, is_line_break, navigation};

/// Editing state of one text field.
#[derive(Debug)]
pub struct EditSession {
    buffer: TextBuffer,
    anchor: usize,
    cursor: usize,
    /// Column kept across vertical moves; `None` = derive from the caret.
    cursor_column: Option<usize>,
    options: SessionOptions,
    focused: bool,
    notifier: ChangeNotifier,
    /// Edits since the last `take_journal`; `None` while journaling is off.
    journal: Option<Vec<Edit>>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// Create an empty session with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(SessionOptions::default())
    }

    /// Create an empty session with the given options.
    #[must_use]
    pub fn with_options(options: SessionOptions) -> Self {
        Self {
            buffer: TextBuffer::new(),
            anchor: 0,
            cursor: 0,
            cursor_column: None,
            options,
            focused: false,
            notifier: ChangeNotifier::new(),
            journal: None,
        }
    }

    /// Create a session holding `text`, caret at 0.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let mut session = Self::new();
        session.buffer = TextBuffer::with_text(text);
        session.notifier.sync_all(&session.buffer, 0, 0);
        session
    }

    // ------------------------------------------------------------------
    // State access
    // ------------------------------------------------------------------

    /// The underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Buffer length in code points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Full text.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Text as displayed: masked for password fields.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self.options.password_char {
            Some(mask) => std::iter::repeat_n(mask, self.buffer.len()).collect(),
            None => self.text(),
        }
    }

    /// Selected text, empty for a bare caret.
    #[must_use]
    pub fn selected_text(&self) -> String {
        let (start, length) = self.selection_range();
        self.buffer.slice_to_string(start..start + length)
    }

    /// Whether a non-empty selection exists.
    #[must_use]
    pub fn has_selected_text(&self) -> bool {
        self.anchor != self.cursor
    }

    /// Fixed end of the selection.
    #[must_use]
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Moving end of the selection; the caret.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Column cached for vertical movement.
    #[must_use]
    pub fn cursor_column(&self) -> Option<usize> {
        self.cursor_column
    }

    /// Lower end of the selection.
    #[must_use]
    pub fn selection_start(&self) -> usize {
        self.anchor.min(self.cursor)
    }

    /// Selection length in code points.
    #[must_use]
    pub fn selection_length(&self) -> usize {
        self.anchor.abs_diff(self.cursor)
    }

    fn selection_range(&self) -> (usize, usize) {
        (self.selection_start(), self.selection_length())
    }

    /// Properties as seen by listeners after the last command.
    #[must_use]
    pub fn properties(&self) -> &SyncedProperties {
        self.notifier.properties()
    }

    // ------------------------------------------------------------------
    // Options and focus
    // ------------------------------------------------------------------

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Replace all options. Existing text is never truncated.
    pub fn set_options(&mut self, options: SessionOptions) {
        self.options = options;
    }

    /// Limit typed/pasted length; 0 = unbounded.
    pub fn set_max_length(&mut self, max_length: usize) {
        self.options.max_length = max_length;
    }

    /// Allow or forbid typing line breaks.
    pub fn set_accepts_line_break(&mut self, accepts: bool) {
        self.options.accepts_line_break = accepts;
    }

    /// Enable or disable read-only mode.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.options.read_only = read_only;
    }

    /// Whether editing commands are ignored.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.options.read_only
    }

    /// Lines moved by PageUp/PageDown.
    pub fn set_page_lines(&mut self, lines: usize) {
        self.options.page_lines = lines;
    }

    /// Mask the display text with `mask`, or unmask with `None`.
    pub fn set_password_char(&mut self, mask: Option<char>) {
        self.options.password_char = mask;
    }

    /// Record focus. Focus only matters to readers such as the caret blink.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Whether the field has keyboard focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    /// Register a change listener.
    pub fn add_listener<L>(&mut self, listener: L) -> ListenerId
    where
        L: ChangeListener + 'static,
    {
        self.notifier.add_listener(listener)
    }

    /// Register a closure for text changes.
    pub fn on_text_changed<F>(&mut self, f: F) -> ListenerId
    where
        F: FnMut(&SyncedProperties) + 'static,
    {
        self.notifier.on_text_changed(f)
    }

    /// Register a closure for selection changes.
    pub fn on_selection_changed<F>(&mut self, f: F) -> ListenerId
    where
        F: FnMut(&SyncedProperties) + 'static,
    {
        self.notifier.on_selection_changed(f)
    }

    /// Unregister a listener.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.notifier.remove_listener(id)
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Execute an abstract command.
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::InsertChar(c) => self.insert_char(c),
            Command::Backspace(mods) => self.backspace(mods),
            Command::Delete(mods) => self.delete(mods),
            Command::Move(motion, mods) => self.move_caret(motion, mods),
            Command::SelectAll => self.select_all(),
            Command::Select { start, length } => self.select(start, length),
            Command::Paste(text) => self.paste(&text),
        }
    }

    /// Type one code point, replacing the selection if there is one.
    pub fn insert_char(&mut self, c: char) {
        if self.options.read_only {
            reject("insert", "read-only");
            return;
        }
        if self.options.is_full(self.buffer.len()) {
            reject("insert", "max length reached");
            return;
        }
        if is_line_break(c) && !self.options.accepts_line_break {
            reject("insert", "line breaks not accepted");
            return;
        }
        if c == '\0' {
            reject("insert", "NUL");
            return;
        }

        self.command(false, |s| {
            let (start, length) = s.selection_range();
            s.splice(start, length, &[c]);
            s.cursor = start + 1;
            s.anchor = s.cursor;
        });
    }

    /// Delete backward: the selection, the previous word (`WORD`), or the
    /// unit before the caret (`\r\n` counts as one unit).
    ///
    /// `EXTEND` makes this a no-op.
    pub fn backspace(&mut self, mods: Modifiers) {
        if self.options.read_only || mods.contains(Modifiers::EXTEND) {
            reject("backspace", "read-only or extend modifier");
            return;
        }

        self.command(false, |s| {
            if s.has_selected_text() {
                let (start, length) = s.selection_range();
                s.splice(start, length, &[]);
                s.collapse_to(start);
            } else if mods.contains(Modifiers::WORD) {
                let start = navigation::prev_word(&s.buffer, s.cursor);
                if start < s.cursor {
                    s.splice(start, s.cursor - start, &[]);
                    s.collapse_to(start);
                }
            } else if s.cursor > 0 {
                let unit = if s.buffer.break_width_before(s.cursor) == 2 {
                    2
                } else {
                    1
                };
                let start = s.cursor - unit;
                s.splice(start, unit, &[]);
                s.collapse_to(start);
            }
        });
    }

    /// Delete forward: the selection, the next word (`WORD`), or the unit
    /// after the caret (`\r\n` counts as one unit).
    ///
    /// `EXTEND` makes this a no-op.
    pub fn delete(&mut self, mods: Modifiers) {
        if self.options.read_only || mods.contains(Modifiers::EXTEND) {
            reject("delete", "read-only or extend modifier");
            return;
        }

        self.command(false, |s| {
            if s.has_selected_text() {
                let (start, length) = s.selection_range();
                s.splice(start, length, &[]);
                s.collapse_to(start);
            } else if mods.contains(Modifiers::WORD) {
                let end = navigation::next_word(&s.buffer, s.cursor);
                if end > s.cursor {
                    s.splice(s.cursor, end - s.cursor, &[]);
                }
            } else if s.cursor < s.buffer.len() {
                let unit = if s.buffer.break_width_at(s.cursor) == 2 {
                    2
                } else {
                    1
                };
                s.splice(s.cursor, unit, &[]);
            }
        });
    }

    /// Move the caret. `EXTEND` keeps the anchor; `WORD` moves by words
    /// (Left/Right) or to the buffer bounds (Home/End). Vertical motions
    /// ignore `WORD` combinations entirely.
    pub fn move_caret(&mut self, motion: Motion, mods: Modifiers) {
        if motion.is_vertical() && mods.contains(Modifiers::WORD) {
            return;
        }

        self.command(motion.is_vertical(), |s| {
            let word = mods.contains(Modifiers::WORD);
            let page = s.options.page_lines.max(1);
            let cursor = match motion {
                Motion::Left if word => navigation::prev_word(&s.buffer, s.cursor),
                Motion::Left => navigation::prev_char(&s.buffer, s.cursor),
                Motion::Right if word => navigation::next_word(&s.buffer, s.cursor),
                Motion::Right => navigation::next_char(&s.buffer, s.cursor),
                Motion::Up => navigation::cursor_up(&s.buffer, s.cursor, 1, &mut s.cursor_column),
                Motion::Down => {
                    navigation::cursor_down(&s.buffer, s.cursor, 1, &mut s.cursor_column)
                }
                Motion::PageUp => {
                    navigation::cursor_up(&s.buffer, s.cursor, page, &mut s.cursor_column)
                }
                Motion::PageDown => {
                    navigation::cursor_down(&s.buffer, s.cursor, page, &mut s.cursor_column)
                }
                Motion::Home => navigation::home(&s.buffer, s.cursor, word),
                Motion::End => navigation::end(&s.buffer, s.cursor, word),
            };
            s.cursor = cursor;
            if !mods.contains(Modifiers::EXTEND) {
                s.anchor = cursor;
            }
        });
    }

    /// Select the whole buffer.
    pub fn select_all(&mut self) {
        self.command(false, |s| {
            s.anchor = 0;
            s.cursor = s.buffer.len();
        });
    }

    /// Select `length` code points from `start`, both clamped to the buffer.
    pub fn select(&mut self, start: usize, length: usize) {
        self.command(false, |s| {
            let start = start.min(s.buffer.len());
            let length = length.min(s.buffer.len() - start);
            s.anchor = start;
            s.cursor = start + length;
        });
    }

    /// Collapse the selection to `offset` (clamped).
    pub fn clear_selection(&mut self, offset: usize) {
        self.command(false, |s| {
            let offset = offset.min(s.buffer.len());
            s.collapse_to(offset);
        });
    }

    /// Replace the whole text and put the caret at 0.
    ///
    /// Not subject to read-only or max length. Content after a NUL is
    /// dropped.
    ///
    /// Setting the text it already holds is not an edit: no text-changed
    /// notification fires and nothing is journaled. Only a caret that was
    /// away from 0 produces a selection-changed notification.
    pub fn set_text(&mut self, text: &str) {
        let chars: Vec<char> = text.chars().take_while(|&c| c != '\0').collect();
        self.command(false, |s| {
            if s.buffer.as_slice() != chars.as_slice() {
                s.splice(0, s.buffer.len(), &chars);
            }
            s.collapse_to(0);
        });
    }

    /// Replace the whole text from UTF-8 bytes (stopping at a NUL).
    pub fn set_text_utf8(&mut self, bytes: &[u8]) -> crate::Result<()> {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let text = std::str::from_utf8(&bytes[..end])?;
        self.set_text(text);
        Ok(())
    }

    /// Replace the selection with `text`; the caret lands after it.
    pub fn set_selected_text(&mut self, text: &str) {
        let chars: Vec<char> = text.chars().take_while(|&c| c != '\0').collect();
        self.command(false, |s| {
            let (start, length) = s.selection_range();
            s.splice(start, length, &chars);
            s.collapse_to(start + chars.len());
        });
    }

    /// Move the selection start.
    ///
    /// With a bare caret both ends move; with a selection only the anchor
    /// moves.
    pub fn set_selection_start(&mut self, start: usize) {
        self.command(false, |s| {
            let start = start.min(s.buffer.len());
            if s.anchor == s.cursor {
                s.collapse_to(start);
            } else {
                s.anchor = start;
            }
        });
    }

    /// Put the cursor `length` code points after the anchor (clamped).
    pub fn set_selection_length(&mut self, length: usize) {
        self.command(false, |s| {
            s.cursor = s.anchor.saturating_add(length).min(s.buffer.len());
        });
    }

    // ------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------

    /// Text to put on the clipboard. Password fields never copy.
    #[must_use]
    pub fn copy(&self) -> String {
        if self.options.password_char.is_some() {
            return String::new();
        }
        self.selected_text()
    }

    /// Remove the selection and return it for the clipboard.
    pub fn cut(&mut self) -> String {
        if self.options.read_only {
            return String::new();
        }
        let text = self.copy();
        if text.is_empty() {
            return text;
        }
        self.command(false, |s| {
            let (start, length) = s.selection_range();
            s.splice(start, length, &[]);
            s.collapse_to(start);
        });
        text
    }

    /// Replace the selection with clipboard text.
    ///
    /// NULs are dropped. Single-line fields keep only the text before the
    /// first line break, and the text is truncated to the room max length
    /// leaves once the selection is removed.
    pub fn paste(&mut self, text: &str) {
        if self.options.read_only {
            reject("paste", "read-only");
            return;
        }
        let accepts_break = self.options.accepts_line_break;
        let room = self
            .options
            .room(self.buffer.len() - self.selection_length());
        let chars: Vec<char> = text
            .chars()
            .filter(|&c| c != '\0')
            .take_while(|&c| accepts_break || !is_line_break(c))
            .take(room)
            .collect();
        if chars.is_empty() && !self.has_selected_text() {
            return;
        }

        self.command(false, |s| {
            let (start, length) = s.selection_range();
            s.splice(start, length, &chars);
            s.collapse_to(start + chars.len());
        });
    }

    // ------------------------------------------------------------------
    // Edit journal
    // ------------------------------------------------------------------

    /// Start recording every buffer mutation as an [`Edit`].
    ///
    /// Journaling is off by default so a session nobody drains keeps no
    /// copies of old text. [`History`](crate::History) turns it on.
    pub fn enable_journal(&mut self) {
        self.journal.get_or_insert_with(Vec::new);
    }

    /// Stop recording and drop any undrained edits.
    pub fn disable_journal(&mut self) {
        self.journal = None;
    }

    /// Whether mutations are being journaled.
    #[must_use]
    pub fn is_journaling(&self) -> bool {
        self.journal.is_some()
    }

    /// Drain the edits made since the last call. Empty while journaling is
    /// off.
    pub fn take_journal(&mut self) -> Vec<Edit> {
        self.journal.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Apply edits as a single command; the caret ends after the text
    /// inserted by the last edit. Returns `false` (and does nothing) when
    /// read-only or `edits` is empty.
    pub fn apply_edits(&mut self, edits: &[Edit]) -> bool {
        if self.options.read_only || edits.is_empty() {
            return false;
        }
        self.command(false, |s| {
            for edit in edits {
                let inserted: Vec<char> = edit.inserted.chars().collect();
                s.splice(edit.offset, edit.removed.chars().count(), &inserted);
                let caret = edit.offset.saturating_add(inserted.len()).min(s.buffer.len());
                s.collapse_to(caret);
            }
        });
        true
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn command<F>(&mut self, keep_column: bool, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.notifier.freeze();
        let before = (self.anchor, self.cursor);
        if !keep_column {
            self.cursor_column = None;
        }

        f(self);

        let len = self.buffer.len();
        self.anchor = self.anchor.min(len);
        self.cursor = self.cursor.min(len);
        if (self.anchor, self.cursor) != before {
            let (start, length) = self.selection_range();
            self.notifier.push_selection(start, length);
        }

        let flags = self.notifier.thaw(&self.buffer, self.anchor, self.cursor);
        if flags.contains(ChangeFlags::TEXT) && log_enabled() {
            emit_log(
                LogLevel::Debug,
                &format!("text changed: \"{}\"", self.buffer.escaped()),
            );
        }
    }

    /// The single mutation point: journal, replace, mark TEXT.
    fn splice(&mut self, start: usize, length: usize, chars: &[char]) {
        let len = self.buffer.len();
        if start > len {
            return;
        }
        let length = length.min(len - start);
        if length == 0 && chars.is_empty() {
            return;
        }

        if let Some(journal) = self.journal.as_mut() {
            journal.push(Edit {
                offset: start,
                removed: self.buffer.slice_to_string(start..start + length),
                inserted: chars.iter().collect(),
            });
        }
        self.buffer.replace(start, length, chars);
        self.notifier.mark(ChangeFlags::TEXT);
    }

    fn collapse_to(&mut self, offset: usize) {
        self.anchor = offset;
        self.cursor = offset;
    }
}

fn reject(command: &str, reason: &str) {
    if log_enabled() {
        emit_log(LogLevel::Debug, &format!("{command} ignored: {reason}"));
    }
}
