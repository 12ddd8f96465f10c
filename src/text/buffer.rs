//! Growable code-point buffer.
//!
//! [`TextBuffer`] stores text as a `Vec<char>`, so every offset in this
//! crate is a code-point index: no byte arithmetic, no grapheme clusters.
//! Capacity is managed in blocks of [`BLOCK_SIZE`] code points; the buffer
//! grows to the next block when it runs out of room and shrinks once usage
//! drops a full block below capacity.
//!
//! All mutators clamp their arguments. An offset past the end is treated
//! as the end, a length that runs past the end is truncated, and a range
//! that starts past the end does nothing.

use crate::error::{Error, Result};
use std::fmt;
use std::ops::Range;

/// Allocation granularity in code points.
pub const BLOCK_SIZE: usize = 128;

/// Returns `true` for the two code points that start or end a line break.
#[must_use]
pub fn is_line_break(c: char) -> bool {
    c == '\r' || c == '\n'
}

/// Unicode code-point buffer with block-based allocation.
#[derive(Clone)]
pub struct TextBuffer {
    text: Vec<char>,
    /// Logical capacity, always a multiple of `BLOCK_SIZE`. Leaves room
    /// for one slot past `len` (the terminator exported by `to_ucs4`).
    allocated: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Create an empty buffer holding one block.
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: Vec::with_capacity(BLOCK_SIZE),
            allocated: BLOCK_SIZE,
        }
    }

    /// Create a buffer from a string.
    ///
    /// The buffer is NUL-free: content after the first `'\0'` is dropped.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let mut buffer = Self::new();
        let chars: Vec<char> = text.chars().take_while(|&c| c != '\0').collect();
        buffer.append_slice(&chars);
        buffer
    }

    /// Decode a UTF-8 byte string, stopping at the first NUL.
    pub fn from_utf8(bytes: &[u8]) -> Result<Self> {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let text = std::str::from_utf8(&bytes[..end])?;
        Ok(Self::with_text(text))
    }

    /// Import a UCS-4 sequence, stopping at the first NUL.
    pub fn from_ucs4(units: &[u32]) -> Result<Self> {
        let mut chars = Vec::with_capacity(units.len());
        for (offset, &value) in units.iter().enumerate() {
            if value == 0 {
                break;
            }
            let c = char::from_u32(value).ok_or(Error::InvalidCodepoint { offset, value })?;
            chars.push(c);
        }
        let mut buffer = Self::new();
        buffer.append_slice(&chars);
        Ok(buffer)
    }

    /// Export as UCS-4 with a trailing NUL terminator.
    #[must_use]
    pub fn to_ucs4(&self) -> Vec<u32> {
        let mut units: Vec<u32> = self.text.iter().map(|&c| u32::from(c)).collect();
        units.push(0);
        units
    }

    /// Number of code points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Logical block capacity in code points.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.allocated
    }

    /// The code points.
    #[must_use]
    pub fn as_slice(&self) -> &[char] {
        &self.text
    }

    /// Code point at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<char> {
        self.text.get(index).copied()
    }

    /// Collect a clamped range into a `String`.
    #[must_use]
    pub fn slice_to_string(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        self.text[start..end].iter().collect()
    }

    /// Width of the line break starting at `offset`: 2 for `\r\n`, 1 for a
    /// lone `\r` or `\n`, 0 otherwise (including at or past the end).
    #[must_use]
    pub fn break_width_at(&self, offset: usize) -> usize {
        match (self.get(offset), offset.checked_add(1).and_then(|i| self.get(i))) {
            (Some('\r'), Some('\n')) => 2,
            (Some(c), _) if is_line_break(c) => 1,
            _ => 0,
        }
    }

    /// Width of the line break ending at `offset`: 2 for `\r\n`, 1 for a
    /// lone `\r` or `\n`, 0 otherwise.
    #[must_use]
    pub fn break_width_before(&self, offset: usize) -> usize {
        let offset = offset.min(self.len());
        if offset >= 2 && self.text[offset - 2] == '\r' && self.text[offset - 1] == '\n' {
            2
        } else if offset >= 1 && is_line_break(self.text[offset - 1]) {
            1
        } else {
            0
        }
    }

    /// Drop all content and return to a single block.
    pub fn reset(&mut self) {
        self.text = Vec::with_capacity(BLOCK_SIZE);
        self.allocated = BLOCK_SIZE;
    }

    /// Remove all content, keeping the block policy.
    pub fn clear(&mut self) {
        self.text.clear();
        self.resize(1);
    }

    /// Append one code point.
    pub fn append(&mut self, c: char) {
        self.append_slice(&[c]);
    }

    /// Append code points.
    pub fn append_slice(&mut self, chars: &[char]) {
        if chars.is_empty() {
            return;
        }
        self.resize(self.len() + chars.len() + 1);
        self.text.extend_from_slice(chars);
    }

    /// Insert one code point at `index` (appends when `index >= len`).
    pub fn insert(&mut self, index: usize, c: char) {
        self.insert_slice(index, &[c]);
    }

    /// Insert code points at `index`, shifting the tail right.
    pub fn insert_slice(&mut self, index: usize, chars: &[char]) {
        if chars.is_empty() {
            return;
        }
        if index >= self.len() {
            self.append_slice(chars);
            return;
        }
        self.resize(self.len() + chars.len() + 1);
        self.text.splice(index..index, chars.iter().copied());
    }

    /// Insert one code point at the start.
    pub fn prepend(&mut self, c: char) {
        self.insert_slice(0, &[c]);
    }

    /// Insert code points at the start.
    pub fn prepend_slice(&mut self, chars: &[char]) {
        self.insert_slice(0, chars);
    }

    /// Remove `length` code points starting at `start`.
    pub fn cut(&mut self, start: usize, length: usize) {
        if length == 0 || start >= self.len() {
            return;
        }
        let end = start.saturating_add(length).min(self.len());
        self.text.drain(start..end);
        self.resize(self.len() + 1);
    }

    /// Replace `length` code points at `start` with `chars`.
    ///
    /// Changes the block capacity at most once, whether the buffer grows
    /// or shrinks.
    pub fn replace(&mut self, start: usize, length: usize, chars: &[char]) {
        let len = self.len();
        if start > len {
            return;
        }
        let length = length.min(len - start);

        if length == 0 {
            self.insert_slice(start, chars);
            return;
        }
        if chars.is_empty() {
            self.cut(start, length);
            return;
        }
        if chars.len() == length {
            self.text[start..start + length].copy_from_slice(chars);
            return;
        }

        let tail = start + length;
        let new_len = len - length + chars.len();
        if chars.len() > length {
            self.resize(new_len + 1);
            // Grow with placeholders, move the tail over them, then overwrite.
            self.text.resize(new_len, ' ');
            self.text.copy_within(tail..len, start + chars.len());
        } else {
            self.text.copy_within(tail..len, start + chars.len());
            self.text.truncate(new_len);
            self.resize(new_len + 1);
        }
        self.text[start..start + chars.len()].copy_from_slice(chars);
    }

    /// Escaped rendering for logs: `\r`, `\n`, `\0` and `\\` are spelled out.
    #[must_use]
    pub fn escaped(&self) -> String {
        let mut out = String::with_capacity(self.len() + 2);
        for &c in &self.text {
            match c {
                '\r' => out.push_str("\\r"),
                '\n' => out.push_str("\\n"),
                '\0' => out.push_str("\\0"),
                '\\' => out.push_str("\\\\"),
                _ => out.push(c),
            }
        }
        out
    }

    fn resize(&mut self, needed: usize) {
        if self.allocated >= needed && self.allocated < needed + BLOCK_SIZE {
            return;
        }
        let allocated = needed.max(1).div_ceil(BLOCK_SIZE) * BLOCK_SIZE;
        if allocated > self.text.capacity() {
            self.text.reserve_exact(allocated - self.text.len());
        } else {
            self.text.shrink_to(allocated);
        }
        self.allocated = allocated;
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for &c in &self.text {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("text", &self.escaped())
            .field("len", &self.len())
            .field("allocated", &self.allocated)
            .finish()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self::with_text(s)
    }
}
