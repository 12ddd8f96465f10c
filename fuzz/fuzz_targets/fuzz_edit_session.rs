//! Fuzz target for edit session command sequences.
//!
//! Drives a session with arbitrary commands and checks after each one that
//! the selection stays inside the buffer, the synced properties match the
//! live state and the configured policies hold.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use textfield::{EditSession, History, Modifiers, Motion, SessionOptions};

#[derive(Arbitrary, Debug)]
struct SessionInput {
    max_length: u8,
    multiline: bool,
    page_lines: u8,
    initial: String,
    ops: Vec<Op>,
}

#[derive(Arbitrary, Debug)]
enum Op {
    Insert(char),
    Backspace(u8),
    Delete(u8),
    Move { motion: u8, mods: u8 },
    SelectAll,
    Select { start: u16, length: u16 },
    Paste(String),
    SetText(String),
    SetSelectedText(String),
    SetSelectionStart(u16),
    SetSelectionLength(u16),
    Cut,
    ToggleReadOnly,
    Undo,
    Redo,
}

fn motion(n: u8) -> Motion {
    match n % 8 {
        0 => Motion::Left,
        1 => Motion::Right,
        2 => Motion::Up,
        3 => Motion::Down,
        4 => Motion::Home,
        5 => Motion::End,
        6 => Motion::PageUp,
        _ => Motion::PageDown,
    }
}

fuzz_target!(|input: SessionInput| {
    let max_length = usize::from(input.max_length);
    let mut session = EditSession::with_options(SessionOptions {
        max_length,
        accepts_line_break: input.multiline,
        page_lines: usize::from(input.page_lines),
        ..SessionOptions::default()
    });
    session.set_text(&input.initial);
    let mut history = History::new();
    history.attach(&mut session);

    for op in input.ops.into_iter().take(256) {
        let len_before = session.len();
        let policy_bound = matches!(op, Op::Insert(_) | Op::Paste(_));
        match op {
            Op::Insert(c) => session.insert_char(c),
            Op::Backspace(m) => session.backspace(Modifiers::from_bits_truncate(m)),
            Op::Delete(m) => session.delete(Modifiers::from_bits_truncate(m)),
            Op::Move { motion: m, mods } => {
                session.move_caret(motion(m), Modifiers::from_bits_truncate(mods));
            }
            Op::SelectAll => session.select_all(),
            Op::Select { start, length } => {
                session.select(usize::from(start), usize::from(length));
            }
            Op::Paste(text) => session.paste(&text),
            Op::SetText(text) => session.set_text(&text),
            Op::SetSelectedText(text) => session.set_selected_text(&text),
            Op::SetSelectionStart(start) => session.set_selection_start(usize::from(start)),
            Op::SetSelectionLength(length) => session.set_selection_length(usize::from(length)),
            Op::Cut => {
                let _ = session.cut();
            }
            Op::ToggleReadOnly => session.set_read_only(!session.is_read_only()),
            Op::Undo => {
                history.undo(&mut session);
            }
            Op::Redo => {
                history.redo(&mut session);
            }
        }
        history.record(&mut session);
        history.commit();

        assert!(session.anchor() <= session.len());
        assert!(session.cursor() <= session.len());
        assert!(!session.text().contains('\0'));

        let props = session.properties();
        assert_eq!(props.text(), session.text());
        assert_eq!(props.selected_text(), session.selected_text());
        assert_eq!(props.selection_start(), session.selection_start());
        assert_eq!(props.selection_length(), session.selection_length());

        if policy_bound && max_length > 0 && session.len() > len_before {
            assert!(session.len() <= max_length);
        }
    }
});
