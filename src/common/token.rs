use super::Span;

/// A token recognized by the scanner.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Token {
    /// The ordinal of the token type.
    token_type: usize,
    /// The mode that was active when the token was recognized.
    mode: usize,
    /// The byte range of the token in the input.
    span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(token_type: usize, mode: usize, span: Span) -> Self {
        Self {
            token_type,
            mode,
            span,
        }
    }

    /// Get the ordinal of the token type.
    #[inline]
    pub fn token_type(&self) -> usize {
        self.token_type
    }

    /// Get the mode in which the token was scanned.
    #[inline]
    pub fn mode(&self) -> usize {
        self.mode
    }

    /// Get the span of the token.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the text of the token from the scanned input.
    #[inline]
    pub fn text<'h>(&self, input: &'h str) -> &'h str {
        &input[self.span.as_range()]
    }
}
