use log::trace;
use thiserror::Error;

use crate::common::ScannerData;

use super::FindTokens;

/// The error type of the scanner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// No token of the current mode starts at the position.
    #[error("Unexpected character {character:?} at position {position}")]
    UnexpectedCharacter {
        /// The byte position of the character in the input.
        position: usize,
        /// The character no token starts with.
        character: char,
    },

    /// A mode index that the scanner doesn't know.
    #[error("Unknown scanner mode {0}")]
    UnknownMode(usize),
}

/// A maximal munch scanner that runs on the tables of a lexer definition.
///
/// The scanner starts in the start mode of the tables. After each token it switches to the mode
/// of the token's type.
#[derive(Debug, Clone)]
pub struct Scanner {
    pub(crate) data: ScannerData,
    pub(crate) current_mode: usize,
}

impl Scanner {
    /// Creates a new scanner in the start mode of the tables.
    pub fn new(data: ScannerData) -> Self {
        let current_mode = data.start_mode;
        Scanner { data, current_mode }
    }

    /// The tables of the scanner.
    pub fn data(&self) -> &ScannerData {
        &self.data
    }

    /// Returns the index of the current mode.
    pub fn mode(&self) -> usize {
        self.current_mode
    }

    /// Returns the name of the current mode.
    pub fn mode_name(&self) -> &str {
        &self.data.mode_names[self.current_mode]
    }

    /// Sets the current mode.
    /// # Errors
    /// Returns `ScanError::UnknownMode` if there is no mode with the given index.
    pub fn set_mode(&mut self, mode: usize) -> Result<(), ScanError> {
        if mode >= self.data.mode_names.len() {
            return Err(ScanError::UnknownMode(mode));
        }
        trace!("Set scanner mode to {}", self.data.mode_names[mode]);
        self.current_mode = mode;
        Ok(())
    }

    /// Returns the name of the token type with the given ordinal.
    pub fn token_name(&self, token_type: usize) -> Option<&str> {
        self.data.tokens.get(token_type).map(|t| t.name.as_str())
    }

    /// Returns an iterator over the tokens of `input`.
    /// The scanner follows the mode switches of the recognized tokens, so after the iteration it
    /// is in the mode the last token switched to.
    pub fn find_iter<'r, 'h>(&'r mut self, input: &'h str) -> FindTokens<'r, 'h> {
        FindTokens::new(self, input)
    }

    /// Finds the longest token in the current mode that starts at byte position `start`.
    /// Returns the ordinal of its token type and its end position.
    /// Tokens of length zero are not returned.
    pub(crate) fn longest_match(&self, input: &str, start: usize) -> Option<(usize, usize)> {
        let data = &self.data;
        let mut state = data.mode_start_state(self.current_mode);
        let mut last_accepted = None;
        for (offset, c) in input[start..].char_indices() {
            state = data.next_state(state, data.symbol_of(c));
            if state == data.error_state {
                break;
            }
            if let Some(token_type) = data.token_types[state] {
                last_accepted = Some((token_type, start + offset + c.len_utf8()));
            }
        }
        last_accepted
    }
}
