//! Step-by-step replay of a validation run.
//!
//! [`Steps`] is a plain iterator: callers pull one [`Step`] at a time and may
//! pause, stop early or clone it to restart from the same point. There are
//! no timers here; pacing belongs to whoever is pulling.

use core::fmt;

use serde::Serialize;

use super::{NestingValidator, ValidationError};
use crate::tokenizer::TagToken;

/// What the validator did in one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction {
    /// An opening tag was pushed.
    Pushed {
        /// Pushed tag name.
        name: String,
    },
    /// A closing tag matched the top of the stack, which was popped.
    Popped {
        /// Popped tag name.
        name: String,
    },
    /// A closing tag arrived with an empty stack.
    ExtraClosing {
        /// Closing tag name.
        name: String,
    },
    /// A closing tag did not match the top of the stack.
    Mismatch {
        /// Name on top of the stack.
        expected: String,
        /// Name of the closing tag.
        found: String,
    },
    /// A name left on the stack was popped after the last token.
    Unclosed {
        /// Unclosed tag name.
        name: String,
    },
}

impl StepAction {
    /// Returns true if this step recorded an error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::Pushed { .. } | Self::Popped { .. })
    }
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pushed { name } => write!(f, "Pushed '<{name}>' onto stack"),
            Self::Popped { name } => {
                write!(f, "Matched '</{name}>' with '<{name}>' - popped from stack")
            }
            Self::ExtraClosing { name } => write!(f, "Error: Extra closing tag '</{name}>' found"),
            Self::Mismatch { expected, found } => {
                write!(f, "Error: Expected '</{expected}>' but found '</{found}>'")
            }
            Self::Unclosed { name } => write!(f, "Error: Unclosed tag '<{name}>' found"),
        }
    }
}

/// One intermediate validator state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// 1-based step number.
    pub number: usize,
    /// Index of the token processed, or `None` for end-of-input unwinding.
    pub token_index: Option<usize>,
    /// What happened.
    pub action: StepAction,
    /// Stack after the step, bottom first.
    pub stack: Vec<String>,
    /// Every error recorded up to and including this step.
    pub errors: Vec<ValidationError>,
}

/// Lazy iterator over the steps of a validation run.
#[derive(Debug, Clone)]
pub struct Steps<'a> {
    validator: NestingValidator<'a>,
    taken: usize,
}

impl<'a> Steps<'a> {
    /// Start a replay over `tokens`.
    #[must_use]
    pub const fn new(tokens: &'a [TagToken]) -> Self {
        Self {
            validator: NestingValidator::new(tokens),
            taken: 0,
        }
    }
}

impl Iterator for Steps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let (token_index, action) = self.validator.process_next()?;
        self.taken += 1;
        Some(Step {
            number: self.taken,
            token_index,
            action,
            stack: self.validator.stack().to_vec(),
            errors: self.validator.errors().to_vec(),
        })
    }
}

/// Replay validation of `tokens` one step at a time.
#[must_use]
pub const fn steps(tokens: &[TagToken]) -> Steps<'_> {
    Steps::new(tokens)
}
