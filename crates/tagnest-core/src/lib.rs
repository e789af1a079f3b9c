//! Tag nesting validation for markup documents.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** - extracts opening and closing tag markers with their
//!   positions and line numbers
//! - **Nesting Validator** - a single stack pass reporting extra closing
//!   tags, mismatches and unclosed tags, plus a step-by-step replay
//! - **Match Indexer** - independent per-token partner lookup for
//!   highlighting
//! - **Report Assembler** - one serializable [`Report`] per run
//!
//! # Not Implemented
//!
//! - Attributes, comments, CDATA, character references
//! - Void and self-closing element semantics (`<br/>` is an opening tag)
//! - Error recovery

/// Per-token partner lookup.
pub mod matcher;
/// Report assembly.
pub mod report;
/// Tag tokenizer.
pub mod tokenizer;
/// Stack-based nesting validation.
pub mod validator;

use thiserror::Error;

pub use matcher::{MatchResult, TagStatus, find_partner, match_at, match_results};
pub use report::{Counts, Report, assemble};
pub use tokenizer::{TagScanner, TagToken, tokenize};
pub use validator::{
    ErrorKind, NestingValidator, Step, StepAction, Steps, Validation, ValidationError, steps,
    validate,
};

/// Why [`analyze`] produced no report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmptySource {
    /// The input is empty or whitespace only.
    #[error("Please enter some markup to validate.")]
    Blank,
    /// The input contains no recognizable tags.
    #[error("No tags found in the input.")]
    NoTags,
}

/// Tokenize, validate and index `source`, returning the assembled report.
///
/// Positions and lines refer to `source` as given; surrounding whitespace
/// only matters for the emptiness check.
///
/// # Errors
///
/// Returns [`EmptySource`] when `source` is blank or has no tags.
pub fn analyze(source: &str) -> Result<Report, EmptySource> {
    if source.trim().is_empty() {
        return Err(EmptySource::Blank);
    }

    let tokens = tokenize(source);
    if tokens.is_empty() {
        return Err(EmptySource::NoTags);
    }

    let validation = validate(&tokens);
    let matches = match_results(&tokens);
    Ok(assemble(tokens, validation.errors, matches))
}
