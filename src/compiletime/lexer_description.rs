//! This module contains the input of the lexer generator: token rules grouped into named
//! scanning modes, and a builder that creates them from regex patterns.

use super::{parse_regex_syntax, LexGenError, LexGenErrorKind, RegexAst, Result};

/// A token rule: the token `name` is recognized by `regex`, after which the scanner switches to
/// `next_mode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDescription {
    /// The name of the token type.
    pub name: String,
    /// The expression that recognizes the token.
    pub regex: RegexAst,
    /// The name of the mode the scanner continues in.
    pub next_mode: String,
}

impl RuleDescription {
    /// Creates a new rule.
    pub fn new(name: &str, regex: RegexAst, next_mode: &str) -> Self {
        RuleDescription {
            name: name.to_string(),
            regex,
            next_mode: next_mode.to_string(),
        }
    }
}

/// A named scanning mode with its rules in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeDescription {
    /// The name of the mode.
    pub name: String,
    /// The rules that are active in this mode.
    pub rules: Vec<RuleDescription>,
}

impl ModeDescription {
    /// Creates a new mode.
    pub fn new(name: &str, rules: Vec<RuleDescription>) -> Self {
        ModeDescription {
            name: name.to_string(),
            rules,
        }
    }
}

/// The complete description of a lexer.
/// A mode name may be declared more than once; all its rules then share one mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexerDescription {
    /// The modes in declaration order.
    pub modes: Vec<ModeDescription>,
    /// The mode to start scanning in. Defaults to the first declared mode.
    pub start_mode: Option<String>,
}

impl LexerDescription {
    /// Creates a new lexer description.
    pub fn new(modes: Vec<ModeDescription>, start_mode: Option<String>) -> Self {
        LexerDescription { modes, start_mode }
    }

    /// Creates a builder for a lexer description.
    pub fn builder() -> LexerDescriptionBuilder {
        LexerDescriptionBuilder::new()
    }
}

#[derive(Debug, Clone)]
enum Pattern {
    Regex(String),
    Ast(RegexAst),
}

/// Collects the rules of one mode.
#[derive(Debug, Clone)]
pub struct ModeBuilder {
    name: String,
    rules: Vec<(String, Pattern, String)>,
}

impl ModeBuilder {
    /// Adds a rule with a pattern in regex syntax.
    pub fn rule(mut self, token: &str, pattern: &str, next_mode: &str) -> Self {
        self.rules.push((
            token.to_string(),
            Pattern::Regex(pattern.to_string()),
            next_mode.to_string(),
        ));
        self
    }

    /// Adds a rule with an already built expression.
    pub fn rule_ast(mut self, token: &str, regex: RegexAst, next_mode: &str) -> Self {
        self.rules.push((
            token.to_string(),
            Pattern::Ast(regex),
            next_mode.to_string(),
        ));
        self
    }
}

/// A builder for lexer descriptions.
///
/// ```
/// use lexgen::LexerDescription;
///
/// let description = LexerDescription::builder()
///     .mode("DEFAULT", |m| {
///         m.rule("Number", "[0-9]+", "DEFAULT")
///             .rule("Quote", "\"", "STRING")
///     })
///     .mode("STRING", |m| {
///         m.rule("Text", "[^\"]+", "STRING")
///             .rule("Quote", "\"", "DEFAULT")
///     })
///     .build()
///     .unwrap();
/// assert_eq!(description.modes.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LexerDescriptionBuilder {
    modes: Vec<ModeBuilder>,
    start_mode: Option<String>,
}

impl LexerDescriptionBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a mode. The closure adds the rules of the mode.
    pub fn mode<F>(mut self, name: &str, rules: F) -> Self
    where
        F: FnOnce(ModeBuilder) -> ModeBuilder,
    {
        self.modes.push(rules(ModeBuilder {
            name: name.to_string(),
            rules: Vec::new(),
        }));
        self
    }

    /// Sets the mode the scanner starts in.
    pub fn start_mode(mut self, name: &str) -> Self {
        self.start_mode = Some(name.to_string());
        self
    }

    /// Parses all patterns and builds the description.
    /// # Errors
    /// A `PatternError` naming the rule is returned for the first pattern that can't be parsed or
    /// uses unsupported features.
    pub fn build(self) -> Result<LexerDescription> {
        let modes = self
            .modes
            .into_iter()
            .map(|mode| {
                let rules = mode
                    .rules
                    .into_iter()
                    .map(|(token, pattern, next_mode)| {
                        let regex = match pattern {
                            Pattern::Regex(pattern) => parse_pattern(&pattern)
                                .map_err(|e| pattern_error(&token, &pattern, e))?,
                            Pattern::Ast(regex) => regex,
                        };
                        Ok(RuleDescription {
                            name: token,
                            regex,
                            next_mode,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(ModeDescription {
                    name: mode.name,
                    rules,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(LexerDescription::new(modes, self.start_mode))
    }
}

fn parse_pattern(pattern: &str) -> Result<RegexAst> {
    let hir = parse_regex_syntax(pattern)?;
    RegexAst::try_from(&hir)
}

fn pattern_error(token: &str, pattern: &str, error: LexGenError) -> LexGenError {
    LexGenError::new(LexGenErrorKind::PatternError {
        token: token.to_string(),
        pattern: pattern.to_string(),
        source: error.source,
    })
}
