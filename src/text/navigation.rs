//! Caret arithmetic over a [`TextBuffer`].
//!
//! Every function here is pure: it takes the buffer and a caret offset and
//! returns the new offset. The only state threaded through is the cached
//! column used by vertical movement, passed as `&mut Option<usize>` so the
//! caller decides when it is invalidated (`None` means "derive it from the
//! caret's position in its line").
//!
//! A line break is `\r`, `\n` or the pair `\r\n`; the pair is always
//! stepped over as one unit.

use super::buffer::{TextBuffer, is_line_break};

/// Character classes for word movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    AlphaNumeric,
    Other,
}

/// Classify a code point for word movement.
#[must_use]
pub fn char_class(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_alphanumeric() {
        CharClass::AlphaNumeric
    } else {
        CharClass::Other
    }
}

/// Offset of the first code point of the line containing `cursor`.
#[must_use]
pub fn line_start(buf: &TextBuffer, cursor: usize) -> usize {
    let text = buf.as_slice();
    let mut cur = cursor.min(text.len());
    while cur > 0 && !is_line_break(text[cur - 1]) {
        cur -= 1;
    }
    cur
}

/// Offset of the line break (or buffer end) terminating the line at `cursor`.
#[must_use]
pub fn line_end(buf: &TextBuffer, cursor: usize) -> usize {
    let text = buf.as_slice();
    let mut cur = cursor.min(text.len());
    while cur < text.len() && !is_line_break(text[cur]) {
        cur += 1;
    }
    cur
}

/// Walk from `start` up to `column` code points, stopping at a line break.
fn advance_to_column(buf: &TextBuffer, start: usize, column: usize) -> usize {
    let text = buf.as_slice();
    let mut cur = start;
    for _ in 0..column {
        if cur >= text.len() || is_line_break(text[cur]) {
            break;
        }
        cur += 1;
    }
    cur
}

/// Move `n_lines` lines down, keeping the cached column.
///
/// If no line could be crossed and this is a page request (`n_lines > 1`)
/// the caret goes to the end of the buffer and the column is updated to
/// that position.
pub fn cursor_down(
    buf: &TextBuffer,
    cursor: usize,
    n_lines: usize,
    column: &mut Option<usize>,
) -> usize {
    let len = buf.len();
    let cursor = cursor.min(len);
    let mut start = line_start(buf, cursor);
    let col = *column.get_or_insert(cursor - start);

    let mut cur = cursor;
    let mut moved = 0;
    while moved < n_lines {
        cur = line_end(buf, cur);
        if cur == len {
            break;
        }
        cur += buf.break_width_at(cur);
        start = cur;
        moved += 1;
    }

    if moved == 0 && n_lines > 1 {
        *column = Some(cur - start);
        return cur;
    }

    advance_to_column(buf, start, col)
}

/// Move `n_lines` lines up, keeping the cached column.
///
/// If no line could be crossed and this is a page request (`n_lines > 1`)
/// the caret goes to offset 0 and the column resets to 0.
pub fn cursor_up(
    buf: &TextBuffer,
    cursor: usize,
    n_lines: usize,
    column: &mut Option<usize>,
) -> usize {
    let cursor = cursor.min(buf.len());
    let mut start = line_start(buf, cursor);
    let col = *column.get_or_insert(cursor - start);

    let mut moved = 0;
    while moved < n_lines && start > 0 {
        start = line_start(buf, start - buf.break_width_before(start));
        moved += 1;
    }

    if moved == 0 && n_lines > 1 {
        *column = Some(0);
        return 0;
    }

    advance_to_column(buf, start, col)
}

/// Start of the next word.
///
/// At the end of a line this is the start of the following line (or the
/// same offset at the end of the buffer). Otherwise the rest of the
/// current run of one class is skipped, then any whitespace after it; the
/// scan never crosses the line end.
#[must_use]
pub fn next_word(buf: &TextBuffer, cursor: usize) -> usize {
    let text = buf.as_slice();
    let cursor = cursor.min(text.len());
    let eol = line_end(buf, cursor);

    if cursor == eol {
        return eol + buf.break_width_at(eol);
    }

    let class = char_class(text[cursor]);
    let mut i = cursor;
    while i < eol && char_class(text[i]) == class {
        i += 1;
    }
    while i < eol && char_class(text[i]) == CharClass::Whitespace {
        i += 1;
    }
    i
}

/// Start of the previous word.
///
/// At the start of a line this is the end of the previous line. Otherwise
/// the run of one class before the caret is skipped; if that run was
/// whitespace the run before it is skipped too.
#[must_use]
pub fn prev_word(buf: &TextBuffer, cursor: usize) -> usize {
    let text = buf.as_slice();
    let cursor = cursor.min(text.len());
    let bol = line_start(buf, cursor);

    if cursor == bol {
        return cursor - buf.break_width_before(cursor);
    }

    let mut class = char_class(text[cursor - 1]);
    let mut i = cursor;
    while i > bol && char_class(text[i - 1]) == class {
        i -= 1;
    }

    if class == CharClass::Whitespace && i > bol {
        class = char_class(text[i - 1]);
        while i > bol && char_class(text[i - 1]) == class {
            i -= 1;
        }
    }
    i
}

/// One code point right, or over a whole `\r\n`.
#[must_use]
pub fn next_char(buf: &TextBuffer, cursor: usize) -> usize {
    let cursor = cursor.min(buf.len());
    match buf.break_width_at(cursor) {
        2 => cursor + 2,
        _ if cursor < buf.len() => cursor + 1,
        _ => cursor,
    }
}

/// One code point left, or over a whole `\r\n`.
#[must_use]
pub fn prev_char(buf: &TextBuffer, cursor: usize) -> usize {
    let cursor = cursor.min(buf.len());
    match buf.break_width_before(cursor) {
        2 => cursor - 2,
        _ if cursor > 0 => cursor - 1,
        _ => cursor,
    }
}

/// Line start, or offset 0 when `whole_buffer` is set.
#[must_use]
pub fn home(buf: &TextBuffer, cursor: usize, whole_buffer: bool) -> usize {
    if whole_buffer {
        0
    } else {
        line_start(buf, cursor)
    }
}

/// Line end, or the buffer end when `whole_buffer` is set.
#[must_use]
pub fn end(buf: &TextBuffer, cursor: usize, whole_buffer: bool) -> usize {
    if whole_buffer {
        buf.len()
    } else {
        line_end(buf, cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_class() {
        assert_eq!(char_class(' '), CharClass::Whitespace);
        assert_eq!(char_class('\t'), CharClass::Whitespace);
        assert_eq!(char_class('\n'), CharClass::Whitespace);
        assert_eq!(char_class('x'), CharClass::AlphaNumeric);
        assert_eq!(char_class('7'), CharClass::AlphaNumeric);
        assert_eq!(char_class('é'), CharClass::AlphaNumeric);
        assert_eq!(char_class('.'), CharClass::Other);
        assert_eq!(char_class('_'), CharClass::Other);
    }

    #[test]
    fn test_line_bounds() {
        let buf = TextBuffer::with_text("one\r\ntwo\nthree");
        assert_eq!(line_start(&buf, 7), 5);
        assert_eq!(line_end(&buf, 5), 8);
        assert_eq!(line_start(&buf, 3), 0);
        assert_eq!(line_end(&buf, 10), 14);
        assert_eq!(line_end(&buf, 100), 14);
    }

    #[test]
    fn test_cursor_down_keeps_column() {
        let buf = TextBuffer::with_text("abcdef\nab\nabcdef");
        let mut column = None;
        let cur = cursor_down(&buf, 5, 1, &mut column);
        assert_eq!(column, Some(5));
        // Short line clamps to its end
        assert_eq!(cur, 9);
        let cur = cursor_down(&buf, cur, 1, &mut column);
        // Column survives the short line
        assert_eq!(cur, 15);
    }

    #[test]
    fn test_cursor_down_crlf() {
        let buf = TextBuffer::with_text("ab\r\ncd");
        let mut column = None;
        assert_eq!(cursor_down(&buf, 1, 1, &mut column), 5);
    }

    #[test]
    fn test_cursor_down_last_line() {
        let buf = TextBuffer::with_text("ab\ncd");
        let mut column = None;
        assert_eq!(cursor_down(&buf, 4, 1, &mut column), 4);
        assert_eq!(column, Some(1));
    }

    #[test]
    fn test_page_down_at_end() {
        let buf = TextBuffer::with_text("first\nlast line");
        let mut column = None;
        let cur = cursor_down(&buf, 8, 8, &mut column);
        assert_eq!(cur, buf.len());
        assert_eq!(column, Some(9));
    }

    #[test]
    fn test_page_down_partial() {
        let buf = TextBuffer::with_text("a\nb\nc");
        let mut column = None;
        assert_eq!(cursor_down(&buf, 0, 8, &mut column), 4);
        assert_eq!(column, Some(0));
    }

    #[test]
    fn test_cursor_up() {
        let buf = TextBuffer::with_text("abcdef\r\nab\nabcdef");
        let mut column = None;
        let cur = cursor_up(&buf, 15, 1, &mut column);
        assert_eq!(column, Some(4));
        assert_eq!(cur, 10);
        let cur = cursor_up(&buf, cur, 1, &mut column);
        assert_eq!(cur, 4);
        // First line: stays within it
        assert_eq!(cursor_up(&buf, cur, 1, &mut column), 4);
    }

    #[test]
    fn test_page_up_at_start() {
        let buf = TextBuffer::with_text("hello\nworld");
        let mut column = Some(3);
        assert_eq!(cursor_up(&buf, 3, 8, &mut column), 0);
        assert_eq!(column, Some(0));
    }

    #[test]
    fn test_cursor_up_blank_lines() {
        let buf = TextBuffer::with_text("abc\n\n\nxyz");
        let mut column = None;
        assert_eq!(cursor_up(&buf, 8, 3, &mut column), 2);
        let mut column = None;
        assert_eq!(cursor_up(&buf, 8, 1, &mut column), 5);
    }

    #[test]
    fn test_next_word() {
        let buf = TextBuffer::with_text("foo  bar");
        assert_eq!(next_word(&buf, 0), 5);
        assert_eq!(next_word(&buf, 3), 5);
        assert_eq!(next_word(&buf, 5), 8);
        assert_eq!(next_word(&buf, 8), 8);
    }

    #[test]
    fn test_next_word_punctuation() {
        let buf = TextBuffer::with_text("foo.bar baz");
        assert_eq!(next_word(&buf, 0), 3);
        assert_eq!(next_word(&buf, 3), 4);
        assert_eq!(next_word(&buf, 4), 8);
    }

    #[test]
    fn test_next_word_line_end() {
        let buf = TextBuffer::with_text("ab  \r\ncd");
        // Trailing whitespace stops at the line end
        assert_eq!(next_word(&buf, 0), 4);
        // At the line end jump over the whole break
        assert_eq!(next_word(&buf, 4), 6);
        // Between \r and \n
        assert_eq!(next_word(&buf, 5), 6);
    }

    #[test]
    fn test_prev_word() {
        let buf = TextBuffer::with_text("foo  bar");
        assert_eq!(prev_word(&buf, 8), 5);
        assert_eq!(prev_word(&buf, 5), 0);
        assert_eq!(prev_word(&buf, 2), 0);
        assert_eq!(prev_word(&buf, 0), 0);
    }

    #[test]
    fn test_prev_word_line_start() {
        let buf = TextBuffer::with_text("ab\r\ncd");
        assert_eq!(prev_word(&buf, 4), 2);
        let buf = TextBuffer::with_text("ab\ncd");
        assert_eq!(prev_word(&buf, 3), 2);
    }

    #[test]
    fn test_prev_word_first_line_reaches_zero() {
        let buf = TextBuffer::with_text("a bc");
        assert_eq!(prev_word(&buf, 1), 0);
        assert_eq!(prev_word(&buf, 2), 0);
    }

    #[test]
    fn test_char_steps() {
        let buf = TextBuffer::with_text("a\r\nb");
        assert_eq!(next_char(&buf, 0), 1);
        assert_eq!(next_char(&buf, 1), 3);
        assert_eq!(next_char(&buf, 4), 4);
        assert_eq!(prev_char(&buf, 3), 1);
        assert_eq!(prev_char(&buf, 1), 0);
        assert_eq!(prev_char(&buf, 0), 0);
    }

    #[test]
    fn test_home_end() {
        let buf = TextBuffer::with_text("one\ntwo");
        assert_eq!(home(&buf, 6, false), 4);
        assert_eq!(home(&buf, 6, true), 0);
        assert_eq!(end(&buf, 1, false), 3);
        assert_eq!(end(&buf, 1, true), 7);
    }
}
