use core::fmt;

use serde::Serialize;

/// One opening or closing tag marker found in the source.
///
/// Tokens are created once by the scanner and never mutated. Their index in
/// the token sequence is their identity for the match indexer and the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagToken {
    /// Tag name exactly as written (case is preserved).
    pub name: String,
    /// True for `</name ...>`.
    pub is_closing: bool,
    /// Byte offset of the `<` in the source text.
    pub position: usize,
    /// 1-based line of the `<`.
    pub line: usize,
    /// Full tag text from `<` through `>`, attributes included.
    pub raw: String,
}

impl TagToken {
    /// Create an opening tag token.
    #[must_use]
    pub fn opening(name: &str, position: usize, line: usize, raw: &str) -> Self {
        Self {
            name: name.to_string(),
            is_closing: false,
            position,
            line,
            raw: raw.to_string(),
        }
    }

    /// Create a closing tag token.
    #[must_use]
    pub fn closing(name: &str, position: usize, line: usize, raw: &str) -> Self {
        Self {
            name: name.to_string(),
            is_closing: true,
            position,
            line,
            raw: raw.to_string(),
        }
    }

    /// Returns true if this is an opening tag.
    #[must_use]
    pub const fn is_opening(&self) -> bool {
        !self.is_closing
    }

    /// Returns true if the raw text ends in `/>` (e.g. `<br/>`).
    ///
    /// Informational only: such tags are still validated as opening tags.
    #[must_use]
    pub fn looks_self_closing(&self) -> bool {
        !self.is_closing && self.raw.ends_with("/>")
    }
}

impl fmt::Display for TagToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_closing {
            write!(f, "</{}>", self.name)
        } else {
            write!(f, "<{}>", self.name)
        }
    }
}
