use once_cell::sync::Lazy;
use regex::Regex;

static TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*text\s*$").expect("valid text type pattern")
});

static OTHER_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(citext|name)\s*$").expect("valid text-like type pattern")
});

static VARCHAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(varchar|nvarchar|character\s+varying)\s*(\(\s*\d+\s*\))?\s*$").expect("valid varchar type pattern")
});

static FIXED_CHAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(char|nchar|character|bpchar)\s*(\(\s*\d+\s*\))?\s*$").expect("valid char type pattern")
});

/// How a declared SQL type compares as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// Unbounded `text`.
    Text,
    /// Variable-length character data (`varchar(n)`).
    VarChar,
    /// Fixed-length, blank-padded character data (`char(n)`).
    FixedChar,
    /// Compares as text but has no trigram or pattern operator class of its
    /// own (`citext`, `name`).
    OtherText,
    /// Anything that must be cast before it can be compared as text.
    NotText,
}

impl TextKind {
    pub fn classify(data_type: &str) -> TextKind {
        if TEXT.is_match(data_type) {
            TextKind::Text
        } else if OTHER_TEXT.is_match(data_type) {
            TextKind::OtherText
        } else if VARCHAR.is_match(data_type) {
            TextKind::VarChar
        } else if FIXED_CHAR.is_match(data_type) {
            TextKind::FixedChar
        } else {
            TextKind::NotText
        }
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, TextKind::NotText)
    }

    /// `gin_trgm_ops` accepts `text` and anything binary-coercible to it.
    pub fn is_trigram_ready(&self) -> bool {
        matches!(self, TextKind::Text | TextKind::VarChar)
    }
}
