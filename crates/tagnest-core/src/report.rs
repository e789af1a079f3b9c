//! The assembled result of one validation run.

use serde::Serialize;

use crate::matcher::{MatchResult, TagStatus};
use crate::tokenizer::TagToken;
use crate::validator::ValidationError;

/// Summary counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Counts {
    /// Number of tags found.
    pub total: usize,
    /// Number of opening tags.
    pub opening: usize,
    /// Number of closing tags.
    pub closing: usize,
    /// Number of errors.
    pub error_count: usize,
}

/// Everything one run produced. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Tags in source order.
    pub tokens: Vec<TagToken>,
    /// Errors in discovery order.
    pub errors: Vec<ValidationError>,
    /// One match result per token, same order as `tokens`.
    pub matches: Vec<MatchResult>,
    /// Summary counts.
    pub counts: Counts,
}

impl Report {
    /// Returns true if no errors were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Status of the token at `index`, if it exists.
    #[must_use]
    pub fn status(&self, index: usize) -> Option<TagStatus> {
        self.matches.get(index).map(|m| m.status)
    }
}

/// Combine upstream results into a [`Report`] without altering them.
#[must_use]
pub fn assemble(
    tokens: Vec<TagToken>,
    errors: Vec<ValidationError>,
    matches: Vec<MatchResult>,
) -> Report {
    let opening = tokens.iter().filter(|token| token.is_opening()).count();
    let counts = Counts {
        total: tokens.len(),
        opening,
        closing: tokens.len() - opening,
        error_count: errors.len(),
    };
    Report {
        tokens,
        errors,
        matches,
        counts,
    }
}
