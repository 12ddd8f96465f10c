//! Caret blink timing.
//!
//! [`CursorBlink`] is a timer model, not a timer: the host's event loop
//! calls [`poll`](CursorBlink::poll) with the current time and repaints the
//! caret when it reports a toggle. It only ever reads the session (focus and
//! selection), so it can be dropped or cancelled at any point without
//! affecting the text.
//!
//! Timing: the caret is shown for 600 ms and hidden for 300 ms. After an
//! edit or caret move it stays solid for 900 ms before blinking resumes.

use crate::session::EditSession;
use std::time::{Duration, Instant};

/// Base blink period.
pub const BLINK_TIMEOUT_BASE: Duration = Duration::from_millis(900);

const BLINK_ON_MULTIPLIER: u32 = 2;
const BLINK_OFF_MULTIPLIER: u32 = 1;
const BLINK_DELAY_MULTIPLIER: u32 = 3;
const BLINK_DIVIDER: u32 = 3;

fn blink_interval(multiplier: u32) -> Duration {
    BLINK_TIMEOUT_BASE * multiplier / BLINK_DIVIDER
}

/// Blink state of one caret.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CursorBlink {
    visible: bool,
    deadline: Option<Instant>,
    had_selected_text: bool,
}

impl CursorBlink {
    /// A stopped, hidden caret.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the caret should currently be painted.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a toggle is scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the next toggle is due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Start blinking if not already running.
    pub fn begin(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.schedule(BLINK_ON_MULTIPLIER, now);
            self.visible = true;
        }
    }

    /// Show the caret solidly for a while, then resume blinking.
    pub fn delay(&mut self, now: Instant) {
        self.schedule(BLINK_DELAY_MULTIPLIER, now);
        self.visible = true;
    }

    /// Stop blinking and hide the caret.
    pub fn end(&mut self) {
        self.deadline = None;
        self.visible = false;
    }

    /// Alias for [`end`](Self::end).
    pub fn cancel(&mut self) {
        self.end();
    }

    /// Blink only while the field is focused and has no selection.
    pub fn reset(&mut self, session: &EditSession, delay: bool, now: Instant) {
        if session.is_focused() && !session.has_selected_text() {
            if delay {
                self.delay(now);
            } else {
                self.begin(now);
            }
        } else {
            self.end();
        }
    }

    /// React to a selection-changed notification.
    ///
    /// A plain caret move restarts the solid delay; gaining or losing a
    /// selection restarts blinking (or stops it).
    pub fn selection_changed(&mut self, session: &EditSession, now: Instant) {
        let has_selection = session.has_selected_text();
        if self.had_selected_text || has_selection {
            self.had_selected_text = has_selection;
            self.reset(session, false, now);
        } else {
            self.reset(session, true, now);
        }
    }

    /// React to focus gain/loss.
    pub fn focus_changed(&mut self, session: &EditSession, now: Instant) {
        if session.is_focused() {
            self.reset(session, false, now);
        } else {
            self.end();
        }
    }

    /// Advance to `now`. Returns the new visibility if a toggle happened.
    pub fn poll(&mut self, now: Instant) -> Option<bool> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        if self.visible {
            self.visible = false;
            self.schedule(BLINK_OFF_MULTIPLIER, now);
        } else {
            self.visible = true;
            self.schedule(BLINK_ON_MULTIPLIER, now);
        }
        Some(self.visible)
    }

    fn schedule(&mut self, multiplier: u32, now: Instant) {
        self.deadline = Some(now + blink_interval(multiplier));
    }
}
