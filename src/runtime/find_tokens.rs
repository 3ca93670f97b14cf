use std::iter::FusedIterator;

use log::trace;

use crate::common::{Span, Token};

use super::{ScanError, Scanner};

/// An iterator over the tokens of an input.
///
/// The iterator yields a [`Token`] for each recognized token until the input is exhausted. If no
/// token starts at the current position, it yields one [`ScanError`] and then stops.
///
/// The lifetime parameters are as follows:
///
/// * `'r` represents the lifetime of the `Scanner` that produced this iterator.
/// * `'h` represents the lifetime of the haystack being searched.
///
/// This iterator can be created with the [`Scanner::find_iter`] method.
#[derive(Debug)]
pub struct FindTokens<'r, 'h> {
    scanner: &'r mut Scanner,
    input: &'h str,
    position: usize,
    failed: bool,
}

impl<'r, 'h> FindTokens<'r, 'h> {
    /// Creates a new `FindTokens` iterator.
    pub fn new(scanner: &'r mut Scanner, input: &'h str) -> Self {
        FindTokens {
            scanner,
            input,
            position: 0,
            failed: false,
        }
    }

    /// Returns the next token in the haystack.
    ///
    /// `None` is returned at the end of the input and after an error.
    pub fn next_token(&mut self) -> Option<Result<Token, ScanError>> {
        if self.failed || self.position >= self.input.len() {
            return None;
        }
        let start = self.position;
        match self.scanner.longest_match(self.input, start) {
            Some((token_type, end)) => {
                let mode = self.scanner.current_mode;
                let token = Token::new(token_type, mode, Span::new(start, end));
                let next_mode = self.scanner.data.tokens[token_type].mode;
                if next_mode != mode {
                    trace!(
                        "Token {} switches from mode {} to mode {}",
                        self.scanner.data.tokens[token_type].name,
                        self.scanner.data.mode_names[mode],
                        self.scanner.data.mode_names[next_mode]
                    );
                    self.scanner.current_mode = next_mode;
                }
                self.position = end;
                Some(Ok(token))
            }
            None => {
                self.failed = true;
                let character = self.input[start..]
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                Some(Err(ScanError::UnexpectedCharacter {
                    position: start,
                    character,
                }))
            }
        }
    }
}

impl Iterator for FindTokens<'_, '_> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl FusedIterator for FindTokens<'_, '_> {}
