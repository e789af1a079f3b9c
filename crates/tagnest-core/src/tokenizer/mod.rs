//! Tag tokenizer module.
//!
//! Turns raw text into the ordered sequence of tag tokens the validator and
//! the match indexer work on. Only tag markers are recognized; text,
//! comments and declarations are skipped.

/// Input and emission helpers for the scanner state machine.
pub mod helpers;
/// Tag scanner state machine implementation.
pub mod scanner;
/// Token type produced by the scanner.
pub mod token;

pub use scanner::{ScanState, TagScanner};
pub use token::TagToken;

/// Scan `text` and return every recognized tag in source order.
///
/// ```ignore
/// let tokens = tokenize("<p>hi</p>");
/// assert_eq!(tokens.len(), 2);
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<TagToken> {
    let mut scanner = TagScanner::new(text.to_string());
    scanner.run();
    scanner.into_tokens()
}
