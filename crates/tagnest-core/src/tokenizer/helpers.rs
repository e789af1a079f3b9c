//! Helper functions for the tag scanner.
//!
//! This module contains utility functions used throughout the scanner:
//! - State transitions ("switch to", "reconsume in")
//! - Input handling with line tracking
//! - Candidate tag bookkeeping and token emission

use super::scanner::{ScanState, TagScanner};
use super::token::TagToken;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl TagScanner {
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: ScanState) {
        self.state = new_state;
    }

    /// Transitions to a new state without consuming the current character.
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: ScanState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input Helpers
// =============================================================================

impl TagScanner {
    /// Returns the character at the current position and advances the position.
    /// Returns None at the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        if c == '\n' {
            self.current_line += 1;
        }
        Some(c)
    }
}

// =============================================================================
// Tag Helpers
// =============================================================================

impl TagScanner {
    /// Start a candidate tag at the `<` just consumed.
    pub(super) fn begin_tag(&mut self) {
        self.tag_start = self.current_pos - '<'.len_utf8();
        self.tag_line = self.current_line;
        self.tag_name.clear();
        self.tag_closing = false;
    }

    /// Drop the candidate tag and look at the current character again as text.
    pub(super) fn abandon_tag(&mut self) {
        self.tag_name.clear();
        self.tag_closing = false;
        self.reconsume_in(ScanState::Data);
    }

    /// Emit the candidate tag. Called right after its closing `>` was consumed.
    pub(super) fn emit_tag(&mut self) {
        let raw = &self.input[self.tag_start..self.current_pos];
        let token = if self.tag_closing {
            TagToken::closing(&self.tag_name, self.tag_start, self.tag_line, raw)
        } else {
            TagToken::opening(&self.tag_name, self.tag_start, self.tag_line, raw)
        };
        self.token_stream.push(token);
        self.tag_name.clear();
        self.tag_closing = false;
        self.switch_to(ScanState::Data);
    }
}
