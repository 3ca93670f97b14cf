use super::{ModeID, TokenTypeID};

/// The type of a token as recognized by an accepting state.
/// Token types are identified by their ordinal. Two rules with equal name and mode still define
/// two token types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenType {
    ordinal: TokenTypeID,
    name: String,
    mode: ModeID,
}

impl TokenType {
    /// Creates a new token type.
    pub fn new(ordinal: TokenTypeID, name: &str, mode: ModeID) -> Self {
        TokenType {
            ordinal,
            name: name.to_string(),
            mode,
        }
    }

    /// The definition order of the rule. Lower ordinals win when several rules match.
    #[inline]
    pub fn ordinal(&self) -> TokenTypeID {
        self.ordinal
    }

    /// The name of the rule.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The mode the scanner switches to after recognizing the token.
    #[inline]
    pub fn mode(&self) -> ModeID {
        self.mode
    }
}
