//! Stack-based nesting validation.
//!
//! Tokens are processed in source order against a stack of open tag names:
//!
//! - an opening tag pushes its name;
//! - a closing tag with an empty stack is an *extra closing* tag;
//! - a closing tag naming the top of the stack pops it;
//! - any other closing tag is a *mismatch*, and the stack is left as is, so
//!   one stray closer does not pop an unrelated frame.
//!
//! When the tokens run out, every name still on the stack is popped and
//! reported as *unclosed*, innermost first.

/// Lazy step-by-step replay of a validation run.
pub mod steps;

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use strum_macros::Display;
use thiserror::Error;

use crate::tokenizer::TagToken;
pub use steps::{Step, StepAction, Steps, steps};

/// The three kinds of structural defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A closing tag with nothing open.
    ExtraClosing,
    /// A closing tag whose name differs from the innermost open tag.
    Mismatch,
    /// An opening tag never closed before the end of input.
    Unclosed,
}

/// One structural defect, in the order it was discovered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A closing tag was found while the stack was empty.
    #[error("Extra closing tag '{}' found at line {}", .token.name, .token.line)]
    ExtraClosing {
        /// The offending closing tag.
        token: TagToken,
    },
    /// A closing tag did not match the innermost open tag.
    #[error(
        "Mismatched tag: expected '</{expected}>' but found '</{}>' at line {}",
        .token.name,
        .token.line
    )]
    Mismatch {
        /// The offending closing tag.
        token: TagToken,
        /// Name on top of the stack when the closing tag was seen.
        expected: String,
    },
    /// A tag was still open at the end of input.
    #[error("Unclosed tag '<{name}>'")]
    Unclosed {
        /// Name of the tag left on the stack.
        name: String,
    },
}

impl ValidationError {
    /// The kind of defect.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ExtraClosing { .. } => ErrorKind::ExtraClosing,
            Self::Mismatch { .. } => ErrorKind::Mismatch,
            Self::Unclosed { .. } => ErrorKind::Unclosed,
        }
    }

    /// Name of the offending tag.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::ExtraClosing { token } | Self::Mismatch { token, .. } => &token.name,
            Self::Unclosed { name } => name,
        }
    }

    /// The offending token, if the defect is tied to one.
    ///
    /// Unclosed errors are raised from the stack, which only holds names.
    #[must_use]
    pub const fn token(&self) -> Option<&TagToken> {
        match self {
            Self::ExtraClosing { token } | Self::Mismatch { token, .. } => Some(token),
            Self::Unclosed { .. } => None,
        }
    }

    /// Line of the offending token, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.token().map(|token| token.line)
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationError", 6)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("name", self.name())?;
        state.serialize_field(
            "expected",
            &match self {
                Self::Mismatch { expected, .. } => Some(expected.as_str()),
                _ => None,
            },
        )?;
        state.serialize_field("position", &self.token().map(|token| token.position))?;
        state.serialize_field("line", &self.line())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    /// Defects in discovery order: scan errors first, then unclosed tags.
    pub errors: Vec<ValidationError>,
    /// The stack as it stood when the last token was processed, bottom first.
    pub final_stack: Vec<String>,
}

/// Validator state for a single run over a token slice.
///
/// Each run owns its stack; nothing survives between runs.
#[derive(Debug, Clone)]
pub struct NestingValidator<'a> {
    tokens: &'a [TagToken],
    token_index: usize,
    stack: Vec<String>,
    errors: Vec<ValidationError>,
    final_stack: Option<Vec<String>>,
}

impl<'a> NestingValidator<'a> {
    /// Create a validator positioned before the first token.
    #[must_use]
    pub const fn new(tokens: &'a [TagToken]) -> Self {
        Self {
            tokens,
            token_index: 0,
            stack: Vec::new(),
            errors: Vec::new(),
            final_stack: None,
        }
    }

    /// Current stack, bottom first.
    #[must_use]
    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    /// Errors discovered so far.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Advance by one step.
    ///
    /// While tokens remain, processes the next token and returns its index
    /// with the action taken. Afterwards, pops one unclosed name per call
    /// (with no token index). Returns `None` once the stack is empty.
    pub fn process_next(&mut self) -> Option<(Option<usize>, StepAction)> {
        let tokens = self.tokens;
        if let Some(token) = tokens.get(self.token_index) {
            let index = self.token_index;
            self.token_index += 1;
            return Some((Some(index), self.process_token(token)));
        }

        if self.final_stack.is_none() {
            self.final_stack = Some(self.stack.clone());
        }

        let name = self.stack.pop()?;
        self.errors.push(ValidationError::Unclosed { name: name.clone() });
        Some((None, StepAction::Unclosed { name }))
    }

    fn process_token(&mut self, token: &TagToken) -> StepAction {
        if token.is_opening() {
            self.stack.push(token.name.clone());
            return StepAction::Pushed {
                name: token.name.clone(),
            };
        }

        match self.stack.last().cloned() {
            None => {
                self.errors.push(ValidationError::ExtraClosing {
                    token: token.clone(),
                });
                StepAction::ExtraClosing {
                    name: token.name.clone(),
                }
            }
            Some(top) if top == token.name => {
                let _ = self.stack.pop();
                StepAction::Popped { name: top }
            }
            Some(top) => {
                self.errors.push(ValidationError::Mismatch {
                    token: token.clone(),
                    expected: top.clone(),
                });
                StepAction::Mismatch {
                    expected: top,
                    found: token.name.clone(),
                }
            }
        }
    }

    /// Run to completion and return the errors and final stack.
    #[must_use]
    pub fn run(mut self) -> Validation {
        while self.process_next().is_some() {}
        Validation {
            errors: self.errors,
            final_stack: self.final_stack.unwrap_or_default(),
        }
    }
}

/// Validate the nesting of `tokens` in a single left-to-right pass.
#[must_use]
pub fn validate(tokens: &[TagToken]) -> Validation {
    NestingValidator::new(tokens).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn kinds(validation: &Validation) -> Vec<ErrorKind> {
        validation.errors.iter().map(ValidationError::kind).collect()
    }

    #[test]
    fn test_well_nested_has_no_errors() {
        let validation = validate(&tokenize("<a><b></b><c></c></a>"));
        assert!(validation.errors.is_empty());
        assert!(validation.final_stack.is_empty());
    }

    #[test]
    fn test_mismatch_does_not_pop() {
        let validation = validate(&tokenize("<a></b>"));
        assert_eq!(kinds(&validation), vec![ErrorKind::Mismatch, ErrorKind::Unclosed]);
        match &validation.errors[0] {
            ValidationError::Mismatch { token, expected } => {
                assert_eq!(expected, "a");
                assert_eq!(token.name, "b");
            }
            other => panic!("Expected Mismatch, got {other:?}"),
        }
        assert_eq!(validation.errors[1].name(), "a");
        assert_eq!(validation.final_stack, vec!["a".to_string()]);
    }

    #[test]
    fn test_stray_closer_then_match_still_pops() {
        // </b> is a mismatch, but </a> still closes <a>.
        let validation = validate(&tokenize("<a></b></a>"));
        assert_eq!(kinds(&validation), vec![ErrorKind::Mismatch]);
        assert!(validation.final_stack.is_empty());
    }

    #[test]
    fn test_extra_closing_on_empty_stack() {
        let validation = validate(&tokenize("</a>"));
        assert_eq!(kinds(&validation), vec![ErrorKind::ExtraClosing]);
    }

    #[test]
    fn test_unclosed_reported_innermost_first() {
        let validation = validate(&tokenize("<a><b><c>"));
        let names: Vec<&str> = validation.errors.iter().map(ValidationError::name).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
        assert_eq!(validation.final_stack, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_messages() {
        let validation = validate(&tokenize("<a>\n</b>\n</a></i>"));
        let messages: Vec<String> = validation.errors.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "Mismatched tag: expected '</a>' but found '</b>' at line 2",
                "Extra closing tag 'i' found at line 3",
            ]
        );
        assert_eq!(
            ValidationError::Unclosed { name: "p".to_string() }.to_string(),
            "Unclosed tag '<p>'"
        );
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::ExtraClosing.to_string(), "extra_closing");
        assert_eq!(ErrorKind::Mismatch.to_string(), "mismatch");
        assert_eq!(ErrorKind::Unclosed.to_string(), "unclosed");
    }
}
