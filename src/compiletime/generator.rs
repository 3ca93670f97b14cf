//! This module contains the source generator for lexer definitions.
//! The generated source holds the tables of the definition as constants and a function that
//! creates the `ScannerData` for the runtime from them.

use itertools::Itertools;
use log::trace;
use std::time::Instant;

use super::{LexerDefinition, Result};

/// Options of the code generator.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// The name of the generated function that returns the scanner data.
    pub function_name: String,
    /// The path under which the `lexgen` crate is used by the generated code.
    pub crate_path: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            function_name: "create_scanner_data".to_string(),
            crate_path: "lexgen".to_string(),
        }
    }
}

/// Generate Rust source for the lexer definition.
/// # Arguments
/// * `definition` - The lexer definition to generate the tables from.
/// * `options` - The options of the generator.
/// * `output` - The writer the source is written to.
/// # Errors
/// An error is returned if writing to `output` fails.
pub fn generate_code(
    definition: &LexerDefinition,
    options: &GeneratorOptions,
    output: &mut dyn std::io::Write,
) -> Result<()> {
    let now = Instant::now();
    let data = definition.scanner_data();

    writeln!(
        output,
        "use {}::{{ScannerData, TokenInfo}};",
        options.crate_path
    )?;
    writeln!(output)?;

    writeln!(output, "const SYMBOL_COUNT: usize = {};", data.symbol_count)?;
    writeln!(output, "const ERROR_STATE: usize = {};", data.error_state)?;
    writeln!(output, "const START_STATE: usize = {};", data.start_state)?;
    writeln!(output, "const START_MODE: usize = {};", data.start_mode)?;
    writeln!(output)?;

    writeln!(
        output,
        "const TRANSITIONS: &[usize; {}] = &[",
        data.transitions.len()
    )?;
    for row in data.transitions.chunks(data.symbol_count) {
        writeln!(output, "    {},", row.iter().join(", "))?;
    }
    writeln!(output, "];")?;
    writeln!(output)?;

    writeln!(
        output,
        "const ACCEPTING: &[bool; {}] = &[{}];",
        data.accepting.len(),
        data.accepting.iter().join(", ")
    )?;
    writeln!(
        output,
        "const TOKEN_TYPES: &[Option<usize>; {}] = &[{}];",
        data.token_types.len(),
        data.token_types
            .iter()
            .map(|t| format!("{:?}", t))
            .join(", ")
    )?;
    writeln!(output)?;

    writeln!(
        output,
        "const TOKENS: &[(&str, usize); {}] = &[",
        data.tokens.len()
    )?;
    for (ordinal, token) in data.tokens.iter().enumerate() {
        writeln!(
            output,
            "    /* {} */ ({:?}, {}),",
            ordinal, token.name, token.mode
        )?;
    }
    writeln!(output, "];")?;
    writeln!(output)?;

    writeln!(
        output,
        "const INTERVALS: &[(u32, u32); {}] = &[",
        data.intervals.len()
    )?;
    for (start, end) in &data.intervals {
        writeln!(output, "    ({:#x}, {:#x}),", start, end)?;
    }
    writeln!(output, "];")?;
    writeln!(output)?;

    writeln!(
        output,
        "const MODE_NAMES: &[&str; {}] = &[{}];",
        data.mode_names.len(),
        data.mode_names
            .iter()
            .map(|n| format!("{:?}", n))
            .join(", ")
    )?;
    writeln!(output)?;

    writeln!(
        output,
        r"pub(crate) fn {}() -> ScannerData {{
    ScannerData {{
        transitions: TRANSITIONS.to_vec(),
        symbol_count: SYMBOL_COUNT,
        accepting: ACCEPTING.to_vec(),
        token_types: TOKEN_TYPES.to_vec(),
        tokens: TOKENS
            .iter()
            .map(|(name, mode)| TokenInfo {{
                name: name.to_string(),
                mode: *mode,
            }})
            .collect(),
        intervals: INTERVALS.to_vec(),
        error_state: ERROR_STATE,
        start_state: START_STATE,
        start_mode: START_MODE,
        mode_names: MODE_NAMES.iter().map(|n| n.to_string()).collect(),
    }}
}}",
        options.function_name
    )?;

    let elapsed_time = now.elapsed();
    trace!(
        "Code generation took {} milliseconds.",
        elapsed_time.as_millis()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ScannerData, TokenInfo};
    use crate::compiletime::LexerDescription;

    fn definition() -> LexerDefinition {
        let description = LexerDescription::builder()
            .mode("DEFAULT", |m| {
                m.rule("Word", "[a-z]+", "DEFAULT")
                    .rule("Quote", "\"", "STRING")
            })
            .mode("STRING", |m| {
                m.rule("Text", "[^\"]+", "STRING")
                    .rule("Quote", "\"", "DEFAULT")
            })
            .build()
            .unwrap();
        LexerDefinition::build(&description).unwrap()
    }

    // The lines between the opening line of the constant and the closing bracket
    fn block<'a>(code: &'a str, opening: &str) -> Vec<&'a str> {
        code.lines()
            .skip_while(|line| !line.starts_with(opening))
            .skip(1)
            .take_while(|line| *line != "];")
            .collect()
    }

    // The value of a constant that is emitted on one line
    fn constant<'a>(code: &'a str, name: &str) -> &'a str {
        let prefix = format!("const {}:", name);
        let line = code
            .lines()
            .find(|line| line.starts_with(prefix.as_str()))
            .unwrap();
        line.split_once(" = ").unwrap().1.trim_end_matches(';')
    }

    // The elements of an array constant that is emitted on one line
    fn elements<'a>(code: &'a str, name: &str) -> Vec<&'a str> {
        constant(code, name)
            .trim_start_matches("&[")
            .trim_end_matches(']')
            .split(", ")
            .collect()
    }

    fn hex(text: &str) -> u32 {
        u32::from_str_radix(text.trim_start_matches("0x"), 16).unwrap()
    }

    #[test]
    fn test_generate_code() {
        let definition = definition();
        let mut output = Vec::new();
        generate_code(&definition, &GeneratorOptions::default(), &mut output).unwrap();
        let code = String::from_utf8(output).unwrap();

        assert!(code.starts_with("use lexgen::{ScannerData, TokenInfo};\n"));
        for snippet in [
            "const MODE_NAMES: &[&str; 2] = &[\"DEFAULT\", \"STRING\"];",
            "    /* 1 */ (\"Quote\", 1),",
            "    /* 3 */ (\"Quote\", 0),",
            "    (0x0, 0x21),",
            "pub(crate) fn create_scanner_data() -> ScannerData {",
        ] {
            assert!(code.contains(snippet), "missing {:?}", snippet);
        }
    }

    #[test]
    fn test_generated_constants_rebuild_scanner_data() {
        let definition = definition();
        let mut output = Vec::new();
        generate_code(&definition, &GeneratorOptions::default(), &mut output).unwrap();
        let code = String::from_utf8(output).unwrap();

        let number = |name| constant(&code, name).parse::<usize>().unwrap();
        let data = ScannerData {
            transitions: block(&code, "const TRANSITIONS")
                .iter()
                .flat_map(|line| line.trim().trim_end_matches(',').split(", "))
                .map(|n| n.parse().unwrap())
                .collect(),
            symbol_count: number("SYMBOL_COUNT"),
            accepting: elements(&code, "ACCEPTING")
                .iter()
                .map(|a| a.parse().unwrap())
                .collect(),
            token_types: elements(&code, "TOKEN_TYPES")
                .iter()
                .map(|t| {
                    t.strip_prefix("Some(")
                        .and_then(|t| t.strip_suffix(')'))
                        .map(|ordinal| ordinal.parse().unwrap())
                })
                .collect(),
            tokens: block(&code, "const TOKENS")
                .iter()
                .map(|line| {
                    let (name, mode) = line
                        .split_once("*/ (")
                        .and_then(|(_, token)| token.trim_end_matches("),").split_once(", "))
                        .unwrap();
                    TokenInfo {
                        name: name.trim_matches('"').to_string(),
                        mode: mode.parse().unwrap(),
                    }
                })
                .collect(),
            intervals: block(&code, "const INTERVALS")
                .iter()
                .map(|line| {
                    let (start, end) = line
                        .trim()
                        .trim_start_matches('(')
                        .trim_end_matches("),")
                        .split_once(", ")
                        .unwrap();
                    (hex(start), hex(end))
                })
                .collect(),
            error_state: number("ERROR_STATE"),
            start_state: number("START_STATE"),
            start_mode: number("START_MODE"),
            mode_names: elements(&code, "MODE_NAMES")
                .iter()
                .map(|n| n.trim_matches('"').to_string())
                .collect(),
        };
        assert_eq!(data, definition.scanner_data());
    }

    #[test]
    fn test_generate_code_options() {
        let options = GeneratorOptions {
            function_name: "words".to_string(),
            crate_path: "crate::lexer".to_string(),
        };
        let mut output = Vec::new();
        generate_code(&definition(), &options, &mut output).unwrap();
        let code = String::from_utf8(output).unwrap();
        let header = "use crate::lexer::{ScannerData, TokenInfo};";
        assert!(code.starts_with(header));
        assert!(code.contains("pub(crate) fn words() -> ScannerData {"));
    }
}
