use super::token::TagToken;

/// The scanner state machine.
///
/// A tag marker is `<`, an optional `/`, an ASCII letter, more ASCII letters
/// or digits, a word boundary, then anything up to the next `>`. Every state
/// other than `Data` is inside a candidate tag that may still be abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Outside of any tag. Waiting for `<`.
    Data,
    /// Just consumed `<`.
    TagOpen,
    /// Just consumed `</`.
    EndTagOpen,
    /// Reading the tag name.
    TagName,
    /// After the name, skipping everything up to `>`.
    TagBody,
}

/// Scans text for tag markers.
///
/// Usage mirrors a classic tokenizer: create it with [`TagScanner::new`],
/// call [`TagScanner::run`], then take the tokens with
/// [`TagScanner::into_tokens`].
pub struct TagScanner {
    pub(super) state: ScanState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    pub(super) at_eof: bool,
    // When true, the next iteration of the main loop will not consume a new character.
    pub(super) reconsume: bool,
    pub(super) current_line: usize,

    /// Byte offset of the `<` that opened the candidate tag.
    pub(super) tag_start: usize,
    /// Line of the `<` that opened the candidate tag.
    pub(super) tag_line: usize,
    /// Name collected so far for the candidate tag.
    pub(super) tag_name: String,
    /// Whether the candidate tag began with `</`.
    pub(super) tag_closing: bool,

    pub(super) token_stream: Vec<TagToken>,
}

impl TagScanner {
    /// Create a scanner over `input`, positioned at its start.
    #[must_use]
    pub const fn new(input: String) -> Self {
        Self {
            state: ScanState::Data,
            input,
            current_pos: 0,
            current_input_character: None,
            at_eof: false,
            reconsume: false,
            current_line: 1,
            tag_start: 0,
            tag_line: 1,
            tag_name: String::new(),
            tag_closing: false,
            token_stream: Vec::new(),
        }
    }

    /// Consume the scanner and return the token stream.
    /// Call this after `run()`.
    #[must_use]
    pub fn into_tokens(self) -> Vec<TagToken> {
        self.token_stream
    }

    /// Scan the whole input.
    pub fn run(&mut self) {
        while !self.at_eof {
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.consume();
            }

            match self.state {
                ScanState::Data => self.handle_data_state(),
                ScanState::TagOpen => self.handle_tag_open_state(),
                ScanState::EndTagOpen => self.handle_end_tag_open_state(),
                ScanState::TagName => self.handle_tag_name_state(),
                ScanState::TagBody => self.handle_tag_body_state(),
            }
        }
    }

    fn handle_data_state(&mut self) {
        match self.current_input_character {
            Some('<') => {
                self.begin_tag();
                self.switch_to(ScanState::TagOpen);
            }
            None => self.at_eof = true,
            Some(_) => {}
        }
    }

    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            Some('/') => {
                self.tag_closing = true;
                self.switch_to(ScanState::EndTagOpen);
            }
            Some(c) if c.is_ascii_alphabetic() => self.reconsume_in(ScanState::TagName),
            None => self.at_eof = true,
            // `<<a>`: the second `<` may still start a tag.
            Some(_) => self.abandon_tag(),
        }
    }

    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => self.reconsume_in(ScanState::TagName),
            None => self.at_eof = true,
            Some(_) => self.abandon_tag(),
        }
    }

    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphanumeric() => self.tag_name.push(c),
            // No word boundary after the name.
            Some('_') => self.abandon_tag(),
            Some('>') => self.emit_tag(),
            None => self.at_eof = true,
            Some(_) => self.switch_to(ScanState::TagBody),
        }
    }

    fn handle_tag_body_state(&mut self) {
        match self.current_input_character {
            Some('>') => self.emit_tag(),
            // No `>` left anywhere, so no later `<` can complete a tag either.
            None => self.at_eof = true,
            Some(_) => {}
        }
    }
}
