//! This module contains the lexer definition, the final result of the construction pipeline.
//!
//! The pipeline runs the stages
//! * interval splitting into the alphabet,
//! * Thompson's construction of one NFA for all modes,
//! * determinization,
//! * completion with an error state and
//! * minimization that keeps the token types apart.

use std::time::Instant;

use log::{debug, trace};

use crate::common::{ScannerData, TokenInfo};

use super::{
    completer::complete, determinizer::determinize, minimizer::minimize_by_token_type,
    mode_assembler::assemble_modes, Alphabet, Automaton, LabeledAutomaton, LexerDescription,
    ModeID, Result, StateID, SymbolID, TokenType, TokenTypeMap,
};

type Stage = fn(LabeledAutomaton) -> LabeledAutomaton;

const STAGES: &[(&str, Stage)] = &[
    ("Determinization", determinize),
    ("Completion", complete),
    ("Minimization", minimize_by_token_type),
];

/// The minimal complete DFA of a lexer together with everything a scanner needs to run it.
#[derive(Debug, Clone)]
pub struct LexerDefinition {
    automaton: Automaton,
    alphabet: Alphabet,
    token_types: Vec<TokenType>,
    state_token_types: TokenTypeMap,
    error_state: StateID,
    mode_names: Vec<String>,
    start_mode: ModeID,
}

impl LexerDefinition {
    /// Builds the lexer definition from a lexer description.
    /// # Errors
    /// A `DefinitionError` is returned if the modes of the description are inconsistent.
    pub fn build(description: &LexerDescription) -> Result<Self> {
        let now = Instant::now();

        let intervals = description
            .modes
            .iter()
            .flat_map(|mode| mode.rules.iter())
            .flat_map(|rule| rule.regex.intervals())
            .collect::<Vec<_>>();
        let alphabet = Alphabet::new(&intervals);
        debug!(
            "Alphabet of {} intervals from {} rule intervals",
            alphabet.len(),
            intervals.len()
        );

        let assembled = assemble_modes(description, &alphabet)?;
        debug!("NFA has {} states", assembled.nfa.automaton.state_count());

        let dfa = STAGES.iter().fold(assembled.nfa, |automaton, (name, stage)| {
            let stage_start = Instant::now();
            let result = stage(automaton);
            debug!(
                "{} took {} milliseconds, {} states.",
                name,
                stage_start.elapsed().as_millis(),
                result.automaton.state_count()
            );
            result
        });

        let error_state = dfa
            .error_state
            .unwrap_or_else(|| unreachable!("Completion always adds an error state"));
        let definition = LexerDefinition {
            automaton: dfa.automaton,
            alphabet,
            token_types: assembled.token_types,
            state_token_types: dfa.token_types,
            error_state,
            mode_names: assembled.mode_names,
            start_mode: assembled.start_mode,
        };
        trace!(
            "Building the lexer definition took {} milliseconds.",
            now.elapsed().as_millis()
        );
        Ok(definition)
    }

    /// The minimized, complete DFA.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// The alphabet of disjoint intervals.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// All token types ordered by ordinal.
    pub fn token_types(&self) -> &[TokenType] {
        &self.token_types
    }

    /// The token type recognized by an accepting state.
    pub fn token_type_of(&self, state: StateID) -> Option<&TokenType> {
        self.state_token_types
            .get(&state)
            .map(|ordinal| &self.token_types[ordinal.as_usize()])
    }

    /// The state that all invalid transitions lead to.
    pub fn error_state(&self) -> StateID {
        self.error_state
    }

    /// The state from which the mode start states are selected.
    pub fn start_state(&self) -> StateID {
        self.automaton.start_state()
    }

    /// The mode names ordered by mode index.
    pub fn mode_names(&self) -> &[String] {
        &self.mode_names
    }

    /// The mode scanning starts in.
    pub fn start_mode(&self) -> ModeID {
        self.start_mode
    }

    /// The number of states of the DFA.
    pub fn state_count(&self) -> usize {
        self.automaton.state_count()
    }

    /// The number of columns of the transition table, i.e. the number of symbols plus the error
    /// symbol.
    pub fn symbol_count(&self) -> usize {
        self.automaton.alphabet_size() + 1
    }

    /// The state scanning starts in when `mode` is active.
    pub fn start_state_for_mode(&self, mode: ModeID) -> StateID {
        self.automaton
            .target(self.start_state(), SymbolID::new(mode.as_usize()))
            .unwrap_or(self.error_state)
    }

    /// The transition function as a flat table in row-major order.
    /// The entry for `state` and symbol id `symbol` is at `state * symbol_count() + symbol`.
    /// Column 0 belongs to the error symbol and leads to the error state from every state.
    pub fn transition_table(&self) -> Vec<usize> {
        let mut table = Vec::with_capacity(self.state_count() * self.symbol_count());
        for state in self.automaton.states() {
            table.push(self.error_state.as_usize());
            table.extend(self.automaton.symbols().map(|symbol| {
                self.automaton
                    .target(state, symbol)
                    .unwrap_or(self.error_state)
                    .as_usize()
            }));
        }
        table
    }

    /// For each state whether it is accepting.
    pub fn accepting_vector(&self) -> Vec<bool> {
        self.automaton
            .states()
            .map(|state| self.automaton.is_accepting(state))
            .collect()
    }

    /// For each state the ordinal of the token type it accepts.
    pub fn token_type_vector(&self) -> Vec<Option<usize>> {
        self.automaton
            .states()
            .map(|state| self.state_token_types.get(&state).map(|t| t.as_usize()))
            .collect()
    }

    /// The alphabet as ascending `(start, end)` pairs.
    pub fn intervals(&self) -> Vec<(u32, u32)> {
        self.alphabet.as_pairs()
    }

    /// The tables a scanner runs on.
    pub fn scanner_data(&self) -> ScannerData {
        ScannerData {
            transitions: self.transition_table(),
            symbol_count: self.symbol_count(),
            accepting: self.accepting_vector(),
            token_types: self.token_type_vector(),
            tokens: self
                .token_types
                .iter()
                .map(|t| TokenInfo {
                    name: t.name().to_string(),
                    mode: t.mode().as_usize(),
                })
                .collect(),
            intervals: self.intervals(),
            error_state: self.error_state.as_usize(),
            start_state: self.start_state().as_usize(),
            start_mode: self.start_mode.as_usize(),
            mode_names: self.mode_names.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiletime::{
        DefinitionError, LexGenErrorKind, ModeDescription, RegexAst, RuleDescription,
    };

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // Builds a definition with one mode `DEFAULT` from `(token, pattern)` pairs.
    fn definition(rules: &[(&str, &str)]) -> LexerDefinition {
        let description = LexerDescription::builder()
            .mode("DEFAULT", |m| {
                rules
                    .iter()
                    .fold(m, |m, (token, pattern)| m.rule(token, pattern, "DEFAULT"))
            })
            .build()
            .unwrap();
        LexerDefinition::build(&description).unwrap()
    }

    // Maximal munch over the flat tables, returning `(token name, text)` pairs.
    fn scan(definition: &LexerDefinition, input: &str) -> Option<Vec<(String, String)>> {
        let data = definition.scanner_data();
        let mut tokens = Vec::new();
        let mut mode = data.start_mode;
        let mut position = 0;
        while position < input.len() {
            let mut state = data.mode_start_state(mode);
            let mut last_accept = data.token_types[state].map(|t| (t, position));
            for (offset, c) in input[position..].char_indices() {
                state = data.next_state(state, data.symbol_of(c));
                if state == data.error_state {
                    break;
                }
                if let Some(token_type) = data.token_types[state] {
                    last_accept = Some((token_type, position + offset + c.len_utf8()));
                }
            }
            match last_accept {
                Some((token_type, end)) if end > position => {
                    tokens.push((
                        data.tokens[token_type].name.clone(),
                        input[position..end].to_string(),
                    ));
                    mode = data.tokens[token_type].mode;
                    position = end;
                }
                _ => return None,
            }
        }
        Some(tokens)
    }

    fn names(tokens: &[(String, String)]) -> Vec<&str> {
        tokens.iter().map(|(name, _)| name.as_str()).collect()
    }

    #[test]
    fn test_star_mode_start_accepts() {
        init();
        let definition = definition(&[("A", "a*")]);
        assert_eq!(definition.intervals(), vec![(0x61, 0x61)]);
        let mode_start = definition.start_state_for_mode(ModeID::new(0));
        assert_eq!(
            definition.token_type_of(mode_start).map(|t| t.name()),
            Some("A")
        );
        let tokens = scan(&definition, "aaaa").unwrap();
        assert_eq!(tokens, vec![("A".to_string(), "aaaa".to_string())]);
    }

    #[test]
    fn test_single_characters() {
        init();
        let definition = definition(&[("A", "a|b"), ("C", "c")]);
        let tokens = scan(&definition, "abc").unwrap();
        assert_eq!(names(&tokens), vec!["A", "A", "C"]);
        assert!(definition
            .token_types()
            .iter()
            .all(|t| t.mode() == ModeID::new(0)));
    }

    #[test]
    fn test_longest_match_falls_back() {
        init();
        let definition = definition(&[("LONG", "(ab)+c"), ("SHORT", "ab")]);
        let tokens = scan(&definition, "ababab").unwrap();
        assert_eq!(names(&tokens), vec!["SHORT", "SHORT", "SHORT"]);
        let tokens = scan(&definition, "ababc").unwrap();
        assert_eq!(names(&tokens), vec!["LONG"]);
    }

    #[test]
    fn test_whitespace() {
        init();
        let definition = definition(&[("WS", "( |\t)+"), ("END", ";")]);
        let tokens = scan(&definition, " ;  ").unwrap();
        assert_eq!(names(&tokens), vec!["WS", "END", "WS"]);
        assert_eq!(tokens[2].1, "  ");
        assert!(scan(&definition, " x").is_none());
    }

    #[test]
    fn test_first_rule_wins() {
        init();
        let definition = definition(&[("IF", "if"), ("ID", "[a-z]+")]);
        assert_eq!(names(&scan(&definition, "if").unwrap()), vec!["IF"]);
        assert_eq!(names(&scan(&definition, "iff").unwrap()), vec!["ID"]);

        let definition = self::definition(&[("ID", "[a-z]+"), ("IF", "if")]);
        assert_eq!(names(&scan(&definition, "if").unwrap()), vec!["ID"]);
        assert!(definition
            .automaton()
            .states()
            .all(|state| definition.token_type_of(state).map(|t| t.name()) != Some("IF")));
    }

    #[test]
    fn test_tables() {
        init();
        let definition = definition(&[("A", "ab"), ("B", "b")]);
        let symbol_count = definition.symbol_count();
        let table = definition.transition_table();
        assert_eq!(symbol_count, 3);
        assert_eq!(table.len(), definition.state_count() * symbol_count);
        assert_eq!(definition.error_state(), StateID::new(0));

        // The error state is a non accepting sink and column 0 always leads into it.
        let error = definition.error_state().as_usize();
        assert!(table[error * symbol_count..(error + 1) * symbol_count]
            .iter()
            .all(|s| *s == error));
        assert!(table.chunks(symbol_count).all(|row| row[0] == error));
        assert!(!definition.accepting_vector()[error]);

        let accepting = definition.accepting_vector();
        let token_types = definition.token_type_vector();
        assert_eq!(accepting.len(), definition.state_count());
        assert!(accepting
            .iter()
            .zip(token_types.iter())
            .all(|(a, t)| *a == t.is_some()));
        // "ab" and "b" end in different states
        assert_eq!(accepting.iter().filter(|a| **a).count(), 2);
    }

    #[test]
    fn test_modes() {
        init();
        let description = LexerDescription::builder()
            .mode("DEFAULT", |m| {
                m.rule("Quote", "\"", "STRING")
                    .rule("Word", "[a-z]+", "DEFAULT")
            })
            .mode("STRING", |m| {
                m.rule("Quote", "\"", "DEFAULT")
                    .rule("Text", "[^\"]+", "STRING")
            })
            .build()
            .unwrap();
        let definition = LexerDefinition::build(&description).unwrap();
        assert_eq!(definition.mode_names(), &["DEFAULT", "STRING"]);
        assert_ne!(
            definition.start_state_for_mode(ModeID::new(0)),
            definition.start_state_for_mode(ModeID::new(1))
        );
        let tokens = scan(&definition, "ab\"c d\"e").unwrap();
        assert_eq!(
            tokens
                .iter()
                .map(|(n, t)| (n.as_str(), t.as_str()))
                .collect::<Vec<_>>(),
            vec![
                ("Word", "ab"),
                ("Quote", "\""),
                ("Text", "c d"),
                ("Quote", "\""),
                ("Word", "e"),
            ]
        );
        // Two token types share the name, but not the ordinal.
        assert_eq!(definition.token_types()[0].name(), "Quote");
        assert_eq!(definition.token_types()[2].name(), "Quote");
        assert_ne!(
            definition.token_types()[0].mode(),
            definition.token_types()[2].mode()
        );
    }

    #[test]
    fn test_start_mode() {
        init();
        let description = LexerDescription::new(
            vec![
                ModeDescription::new(
                    "A",
                    vec![RuleDescription::new("X", RegexAst::char('x'), "B")],
                ),
                ModeDescription::new(
                    "B",
                    vec![RuleDescription::new("Y", RegexAst::char('y'), "A")],
                ),
            ],
            Some("B".to_string()),
        );
        let definition = LexerDefinition::build(&description).unwrap();
        assert_eq!(definition.start_mode(), ModeID::new(1));
        assert_eq!(
            names(&scan(&definition, "yxyx").unwrap()),
            vec!["Y", "X", "Y", "X"]
        );
        assert!(scan(&definition, "x").is_none());
    }

    #[test]
    fn test_undefined_mode() {
        let description = LexerDescription::builder()
            .mode("DEFAULT", |m| m.rule("A", "a", "NOWHERE"))
            .build()
            .unwrap();
        let error = LexerDefinition::build(&description).unwrap_err();
        assert!(matches!(
            error.kind(),
            LexGenErrorKind::DefinitionError(DefinitionError::UndefinedMode { .. })
        ));
    }

    #[test]
    fn test_deterministic_output() {
        let rules = [
            ("NUM", "[0-9]+"),
            ("ID", "[a-zA-Z_][a-zA-Z0-9_]*"),
            ("WS", "\\s+"),
        ];
        let first = definition(&rules).scanner_data();
        let second = definition(&rules).scanner_data();
        assert_eq!(first, second);
    }

    // Exhaustively compares the definition with the regex crate on short inputs.
    #[test]
    fn test_against_regex() {
        init();
        const PATTERNS: &[&str] = &[
            "a*",
            "(a|b)*c",
            "a?b+",
            "(ab|a)(bc|c)?",
            "[a-c]{2,3}",
            "a(b|c)*a",
            "((a|b)c?)+",
            "[^a]b",
        ];
        const ALPHABET: &[char] = &['a', 'b', 'c', 'd'];
        for pattern in PATTERNS {
            let definition = definition(&[("P", *pattern)]);
            let data = definition.scanner_data();
            let regex = regex::Regex::new(&format!("^(?:{})$", pattern)).unwrap();
            let mut inputs = vec![String::new()];
            for _ in 0..5 {
                let longer = inputs
                    .iter()
                    .filter(|s| s.len() == inputs.last().map_or(0, |l| l.len()))
                    .flat_map(|s| ALPHABET.iter().map(move |c| format!("{}{}", s, c)))
                    .collect::<Vec<_>>();
                inputs.extend(longer);
            }
            for input in &inputs {
                let mut state = data.mode_start_state(0);
                for c in input.chars() {
                    state = data.next_state(state, data.symbol_of(c));
                }
                assert_eq!(
                    data.accepting[state],
                    regex.is_match(input),
                    "pattern '{}' input '{}'",
                    pattern,
                    input
                );
            }
        }
    }

    #[test]
    fn test_minimal() {
        init();
        // (a|b)*abb needs exactly 4 states plus the error state and the super start state.
        let definition = definition(&[("P", "(a|b)*abb")]);
        assert_eq!(definition.state_count(), 6);
    }
}
