use thiserror::Error;

/// The result type for the `lexgen` crate.
pub type Result<T> = std::result::Result<T, LexGenError>;

/// The error type for the `lexgen` crate.
#[derive(Error, Debug)]
pub struct LexGenError {
    /// The source of the error.
    pub source: Box<LexGenErrorKind>,
}

impl LexGenError {
    /// Create a new `LexGenError`.
    pub fn new(kind: LexGenErrorKind) -> Self {
        LexGenError {
            source: Box::new(kind),
        }
    }

    /// Get the kind of the error.
    pub fn kind(&self) -> &LexGenErrorKind {
        &self.source
    }
}

impl std::fmt::Display for LexGenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug)]
pub enum LexGenErrorKind {
    /// An error occurred during the parsing of the regex syntax.
    #[error(transparent)]
    RegexSyntaxError(#[from] regex_syntax::Error),

    /// A std::io error occurred.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Used regex features that are not supported.
    #[error("Unsupported regex feature: {0}")]
    UnsupportedFeature(String),

    /// The pattern of a token rule could not be translated.
    #[error("Error in pattern of token '{token}' '{pattern}': {source}")]
    PatternError {
        /// The name of the token rule.
        token: String,
        /// The pattern as written in the rule.
        pattern: String,
        /// The underlying error.
        source: Box<LexGenErrorKind>,
    },

    /// The lexer description is inconsistent.
    #[error(transparent)]
    DefinitionError(DefinitionError),
}

impl From<regex_syntax::Error> for LexGenError {
    fn from(error: regex_syntax::Error) -> Self {
        LexGenError::new(LexGenErrorKind::RegexSyntaxError(error))
    }
}

impl From<std::io::Error> for LexGenError {
    fn from(error: std::io::Error) -> Self {
        LexGenError::new(LexGenErrorKind::IoError(error))
    }
}

impl From<DefinitionError> for LexGenError {
    fn from(error: DefinitionError) -> Self {
        LexGenError::new(LexGenErrorKind::DefinitionError(error))
    }
}

/// An error type for inconsistent lexer descriptions.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DefinitionError {
    /// The description does not declare a single mode.
    #[error("The lexer description contains no modes")]
    NoModes,

    /// A token rule switches to a mode that is not declared.
    #[error("Token '{token}' switches to undefined mode '{mode}'")]
    UndefinedMode {
        /// The name of the token rule.
        token: String,
        /// The name of the missing mode.
        mode: String,
    },

    /// The requested start mode is not declared.
    #[error("Unknown start mode '{0}'")]
    UnknownStartMode(String),
}
