//! Text storage and caret arithmetic.
//!
//! Key types:
//!
//! - [`TextBuffer`]: block-allocated code-point array with clamping
//!   insert/cut/replace primitives
//! - [`navigation`]: pure functions mapping a caret offset to a new one
//!   (lines, pages, words, characters, home/end)
//!
//! # Example
//!
//! ```
//! use textfield::text::{TextBuffer, navigation};
//!
//! let buffer = TextBuffer::with_text("foo  bar\r\nbaz");
//! assert_eq!(navigation::next_word(&buffer, 0), 5);
//! assert_eq!(navigation::line_end(&buffer, 5), 8);
//! // The \r\n pair is crossed in one step
//! assert_eq!(navigation::next_char(&buffer, 8), 10);
//! ```

mod buffer;
pub mod navigation;

pub use buffer::{BLOCK_SIZE, TextBuffer, is_line_break};
pub use navigation::CharClass;
