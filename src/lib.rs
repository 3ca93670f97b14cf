#![forbid(missing_docs)]
//! The `lexgen` crate is a lexer generator.
//! It turns token rules, grouped into scanning modes, into one minimal DFA over code point
//! intervals and provides a maximal munch scanner that runs on the resulting tables.
//!
//! The crate has two features:
//! * `generate` - the construction pipeline, the code generator and the graphviz renderer.
//! * `runtime` - the scanner that runs on the tables.
//!
//! ```
//! # #[cfg(all(feature = "generate", feature = "runtime"))]
//! # {
//! use lexgen::{LexerDefinition, LexerDescription, Scanner};
//!
//! let description = LexerDescription::builder()
//!     .mode("DEFAULT", |m| {
//!         m.rule("Number", "[0-9]+", "DEFAULT")
//!             .rule("Plus", r"\+", "DEFAULT")
//!     })
//!     .build()
//!     .unwrap();
//! let definition = LexerDefinition::build(&description).unwrap();
//! let mut scanner = Scanner::new(definition.scanner_data());
//! let tokens = scanner
//!     .find_iter("1+22")
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[2].text("1+22"), "22");
//! # }
//! ```

/// Module with types shared by the generator and the runtime
mod common;
pub use common::{symbol_of, Interval, ScannerData, Span, Token, TokenInfo};

/// The compiletime module contains the lexer construction pipeline.
#[cfg(feature = "generate")]
mod compiletime;
#[cfg(feature = "generate")]
pub use compiletime::{
    compile, find_sub_intervals, generate_code, parse_regex_syntax, render_definition_to,
    render_to, split_intervals, Alphabet, Automaton, DefinitionError, GeneratorOptions, Input,
    LabeledAutomaton, LexGenError, LexGenErrorKind, LexerDefinition, LexerDescription,
    LexerDescriptionBuilder, ModeBuilder, ModeDescription, ModeID, RegexAst, Result,
    RuleDescription, StateID, SymbolID, TokenType, TokenTypeID, TokenTypeMap, Transition,
};

/// The runtime module contains the scanner.
#[cfg(feature = "runtime")]
mod runtime;
#[cfg(feature = "runtime")]
pub use runtime::{FindTokens, ScanError, Scanner};
