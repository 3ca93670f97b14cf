/// Module with error definitions
mod errors;
pub use errors::{DefinitionError, LexGenError, LexGenErrorKind, Result};

/// Module for several ID types.
mod ids;
pub use ids::{ModeID, StateID, SymbolID, TokenTypeID};

/// The parser module contains the regex syntax parser.
mod parser;
pub use parser::parse_regex_syntax;

/// Module with the regex AST and its conversion from the regex syntax
mod ast;
pub use ast::RegexAst;

/// Module with the interval algebra that produces the alphabet
mod alphabet;
pub use alphabet::{find_sub_intervals, split_intervals, Alphabet};

/// Module with the automaton type of all construction stages
mod automaton;
pub use automaton::{Automaton, Input, LabeledAutomaton, TokenTypeMap, Transition};

/// Thompson's construction of NFA fragments
mod thompson;
pub use thompson::compile;

/// Module with the token type
mod token_type;
pub use token_type::TokenType;

/// Module with the description of a lexer as token rules in modes
mod lexer_description;
pub use lexer_description::{
    LexerDescription, LexerDescriptionBuilder, ModeBuilder, ModeDescription, RuleDescription,
};

/// Module that combines the rules of all modes into one NFA
mod mode_assembler;

/// The powerset construction
mod determinizer;

/// Module that adds the error state to a DFA
mod completer;

/// Hopcroft's minimization
mod minimizer;

/// Module with the final lexer definition
mod lexer_definition;
pub use lexer_definition::LexerDefinition;

/// The generator module contains the code generator.
/// The code generator generates the scanner tables as Rust source.
mod generator;
pub use generator::{generate_code, GeneratorOptions};

/// Module with conversion to graphviz dot format
mod dot;
pub use dot::{render_definition_to, render_to};
