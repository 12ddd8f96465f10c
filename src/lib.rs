//! `textfield` - editing engine for text input fields
//!
//! Holds the text of an editable field as a flat sequence of Unicode code
//! points and implements everything a text box does between receiving an
//! abstract command ("backspace", "word left with shift") and telling the
//! view that something changed:
//!
//! - [`TextBuffer`]: block-allocated code-point storage
//! - [`navigation`]: pure caret arithmetic over lines and words
//! - [`EditSession`]: selection state machine and command dispatch
//! - [`ChangeListener`]: receives batched change notifications
//!
//! Around the core sit a few optional layers that only talk to the session
//! through its public API: [`History`] (undo/redo) and [`CursorBlink`]
//! (caret blink timing).
//!
//! # Example
//!
//! ```
//! use textfield::{EditSession, Modifiers, Motion};
//!
//! let mut field = EditSession::with_text("hello world");
//! field.move_caret(Motion::End, Modifiers::WORD);
//! field.backspace(Modifiers::WORD);
//! assert_eq!(field.text(), "hello ");
//! ```

#![allow(clippy::module_name_repetitions)] // Allow text::TextBuffer etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod blink;
pub mod error;
pub mod event;
pub mod history;
pub mod session;
pub mod text;

// Re-export core types at crate root
pub use blink::CursorBlink;
pub use error::{Error, Result};
pub use event::{LogLevel, clear_log_callback, emit_log, set_log_callback};
pub use history::{Edit, History};
pub use session::{
    ChangeListener, Command, EditSession, ListenerId, Modifiers, Motion, SessionOptions,
    SyncedProperties,
};
pub use text::{TextBuffer, navigation};
