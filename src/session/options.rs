//! Per-field editing policy.

/// Lines moved by PageUp/PageDown unless configured otherwise.
pub const DEFAULT_PAGE_LINES: usize = 8;

/// Editing policy for an [`EditSession`](super::EditSession).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SessionOptions {
    /// Maximum length in code points typed or pasted; 0 means unbounded.
    /// Programmatic `set_text` is not limited.
    pub max_length: usize,
    /// Allow `\r`/`\n` to be typed or pasted.
    pub accepts_line_break: bool,
    /// Ignore every command that would modify the text.
    pub read_only: bool,
    /// Lines per PageUp/PageDown.
    pub page_lines: usize,
    /// Mask character for password fields.
    pub password_char: Option<char>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_length: 0,
            accepts_line_break: false,
            read_only: false,
            page_lines: DEFAULT_PAGE_LINES,
            password_char: None,
        }
    }
}

impl SessionOptions {
    /// Options for a multi-line field.
    #[must_use]
    pub fn multiline() -> Self {
        Self {
            accepts_line_break: true,
            ..Self::default()
        }
    }

    /// Options for a password field masked with `mask`.
    #[must_use]
    pub fn password(mask: char) -> Self {
        Self {
            password_char: Some(mask),
            ..Self::default()
        }
    }

    /// Whether `len` code points leave no room for another one.
    #[must_use]
    pub fn is_full(&self, len: usize) -> bool {
        self.max_length > 0 && len >= self.max_length
    }

    /// Code points that may still be added to a buffer holding `len`.
    #[must_use]
    pub fn room(&self, len: usize) -> usize {
        if self.max_length == 0 {
            usize::MAX
        } else {
            self.max_length.saturating_sub(len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = SessionOptions::default();
        assert_eq!(opts.max_length, 0);
        assert!(!opts.accepts_line_break);
        assert!(!opts.read_only);
        assert_eq!(opts.page_lines, 8);
        assert_eq!(opts.password_char, None);
    }

    #[test]
    fn test_room() {
        let mut opts = SessionOptions::default();
        assert!(!opts.is_full(1_000_000));
        assert_eq!(opts.room(5), usize::MAX);

        opts.max_length = 3;
        assert!(opts.is_full(3));
        assert!(!opts.is_full(2));
        assert_eq!(opts.room(1), 2);
        assert_eq!(opts.room(7), 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial() {
        let opts: SessionOptions =
            serde_json::from_str(r#"{"max_length": 10, "accepts_line_break": true}"#).unwrap();
        assert_eq!(opts.max_length, 10);
        assert!(opts.accepts_line_break);
        assert_eq!(opts.page_lines, DEFAULT_PAGE_LINES);
    }
}
