//! Caret navigation edge cases: word stops, line breaks, pages and the
//! cached column.

use textfield::text::{TextBuffer, navigation};
use textfield::{EditSession, Modifiers, Motion, SessionOptions};

fn word_stops_forward(text: &str) -> Vec<usize> {
    let buf = TextBuffer::with_text(text);
    let mut stops = Vec::new();
    let mut cur = 0;
    loop {
        let next = navigation::next_word(&buf, cur);
        if next == cur {
            break;
        }
        stops.push(next);
        cur = next;
    }
    stops
}

fn word_stops_backward(text: &str) -> Vec<usize> {
    let buf = TextBuffer::with_text(text);
    let mut stops = Vec::new();
    let mut cur = buf.len();
    loop {
        let prev = navigation::prev_word(&buf, cur);
        if prev == cur {
            break;
        }
        stops.push(prev);
        cur = prev;
    }
    stops
}

/// Render the text with `|` at the caret, line breaks escaped.
fn mark(session: &EditSession) -> String {
    let mut out = String::new();
    for (i, c) in session.text().chars().enumerate() {
        if i == session.cursor() {
            out.push('|');
        }
        match c {
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    if session.cursor() == session.len() {
        out.push('|');
    }
    out
}

#[test]
fn word_stops_cross_crlf_as_one_unit() {
    let text = "foo  bar\r\nbaz.qux";
    insta::assert_snapshot!(format!("{:?}", word_stops_forward(text)), @"[5, 8, 10, 13, 14, 17]");
    insta::assert_snapshot!(format!("{:?}", word_stops_backward(text)), @"[14, 13, 10, 8, 5, 0]");
}

#[test]
fn prev_word_reaches_start_of_first_line() {
    let buf = TextBuffer::with_text("  foo");
    assert_eq!(navigation::prev_word(&buf, 2), 0);
    assert_eq!(navigation::prev_word(&buf, 5), 2);
    assert_eq!(navigation::prev_word(&buf, 0), 0);
}

#[test]
fn empty_buffer_is_inert() {
    let buf = TextBuffer::new();
    let mut column = None;
    assert_eq!(navigation::next_word(&buf, 0), 0);
    assert_eq!(navigation::prev_word(&buf, 0), 0);
    assert_eq!(navigation::next_char(&buf, 0), 0);
    assert_eq!(navigation::prev_char(&buf, 0), 0);
    assert_eq!(navigation::cursor_down(&buf, 0, 1, &mut column), 0);
    assert_eq!(navigation::cursor_up(&buf, 0, 1, &mut column), 0);
}

#[test]
fn offsets_past_end_are_clamped() {
    let buf = TextBuffer::with_text("ab\ncd");
    assert_eq!(navigation::next_char(&buf, 99), 5);
    assert_eq!(navigation::prev_char(&buf, 99), 4);
    assert_eq!(navigation::line_start(&buf, 99), 3);
    assert_eq!(navigation::line_end(&buf, 99), 5);
}

#[test]
fn lone_cr_and_lf_are_each_one_break() {
    let buf = TextBuffer::with_text("a\rb\n\rc");
    assert_eq!(navigation::next_char(&buf, 1), 2);
    assert_eq!(navigation::line_start(&buf, 3), 2);
    // "\n\r" is two breaks, not a pair
    assert_eq!(navigation::next_char(&buf, 3), 4);
    assert_eq!(navigation::prev_char(&buf, 5), 4);

    let mut column = None;
    assert_eq!(navigation::cursor_down(&buf, 0, 3, &mut column), 5);
}

#[test]
fn vertical_moves_keep_column() {
    let mut s = EditSession::with_options(SessionOptions::multiline());
    s.set_text("abcdef\nab\nabcdef");
    s.select(5, 0);

    let mut trace = vec![mark(&s)];
    for motion in [Motion::Down, Motion::Down, Motion::Up, Motion::Up] {
        s.move_caret(motion, Modifiers::empty());
        trace.push(mark(&s));
    }
    insta::assert_snapshot!(trace.join("\n"), @r"
    abcde|f\nab\nabcdef
    abcdef\nab|\nabcdef
    abcdef\nab\nabcde|f
    abcdef\nab|\nabcdef
    abcde|f\nab\nabcdef
    ");
}

#[test]
fn vertical_moves_over_crlf() {
    let mut s = EditSession::with_options(SessionOptions::multiline());
    s.set_text("abc\r\nde\r\nfghij");
    s.select(3, 0);
    s.move_caret(Motion::Down, Modifiers::empty());
    assert_eq!(mark(&s), "abc\\r\\nde|\\r\\nfghij");
    s.move_caret(Motion::Down, Modifiers::empty());
    assert_eq!(mark(&s), "abc\\r\\nde\\r\\nfgh|ij");
    s.move_caret(Motion::Up, Modifiers::empty());
    s.move_caret(Motion::Up, Modifiers::empty());
    assert_eq!(s.cursor(), 3);
}

#[test]
fn single_line_up_down_stay_put() {
    let mut s = EditSession::with_text("hello");
    s.select(2, 0);
    s.move_caret(Motion::Up, Modifiers::empty());
    assert_eq!(s.cursor(), 2);
    s.move_caret(Motion::Down, Modifiers::empty());
    assert_eq!(s.cursor(), 2);
}

#[test]
fn page_moves_at_buffer_edges() {
    let mut s = EditSession::with_text("abc\ndef");
    s.select(2, 0);
    s.move_caret(Motion::PageUp, Modifiers::empty());
    assert_eq!(s.cursor(), 0);
    assert_eq!(s.cursor_column(), Some(0));

    s.select(5, 0);
    s.move_caret(Motion::PageDown, Modifiers::empty());
    assert_eq!(s.cursor(), 7);
    assert_eq!(s.cursor_column(), Some(3));
}

#[test]
fn page_down_stops_on_last_line() {
    let mut s = EditSession::with_text("0\n1\n2");
    s.move_caret(Motion::PageDown, Modifiers::empty());
    // Crossed two lines, fewer than a page, so the column is kept
    assert_eq!(s.cursor(), 4);
    assert_eq!(s.cursor_column(), Some(0));
}

#[test]
fn home_end_with_and_without_word() {
    let mut s = EditSession::with_text("one\ntwo\nthree");
    s.select(5, 0);
    s.move_caret(Motion::Home, Modifiers::empty());
    assert_eq!(s.cursor(), 4);
    s.move_caret(Motion::End, Modifiers::empty());
    assert_eq!(s.cursor(), 7);
    s.move_caret(Motion::End, Modifiers::WORD | Modifiers::EXTEND);
    assert_eq!(s.selected_text(), "\nthree");
    s.move_caret(Motion::Home, Modifiers::WORD);
    assert_eq!((s.anchor(), s.cursor()), (0, 0));
}

#[test]
fn moving_without_extend_collapses_selection() {
    let mut s = EditSession::with_text("hello world");
    s.select_all();
    s.move_caret(Motion::Left, Modifiers::empty());
    // Collapses from the cursor end, not the selection start
    assert_eq!((s.anchor(), s.cursor()), (10, 10));
}
