//! This module contains the parser for the regex syntax.
//! We use the `regex_syntax` crate to parse the regex syntax into its high-level intermediate
//! representation, although only a subset of it can be lowered to a lexer automaton.

use log::trace;
use std::time::Instant;

use regex_syntax::{hir::Hir, Parser};

use super::Result;

/// Parse the regex syntax into the high-level intermediate representation (HIR).
/// # Arguments
/// * `input` - A string slice that holds the regex syntax.
/// # Errors
/// An error is returned if the regex syntax is invalid.
pub fn parse_regex_syntax(input: &str) -> Result<Hir> {
    let now = Instant::now();
    let hir = Parser::new().parse(input)?;
    let elapsed_time = now.elapsed();
    trace!(
        "Parsing of '{}' took {} milliseconds.",
        input,
        elapsed_time.as_millis()
    );
    Ok(hir)
}
