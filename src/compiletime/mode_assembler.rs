//! This module wires the rules of all modes into one NFA.
//!
//! The start state of the NFA is a super start state with one transition per mode, labeled with
//! the mode index. Each mode has one mode start state with an epsilon transition to the start of
//! each of its rules, and the end state of each rule accepts the rule's token type.

use std::collections::{BTreeMap, BTreeSet};

use log::trace;

use super::{
    thompson, Alphabet, Automaton, DefinitionError, LabeledAutomaton, LexerDescription, ModeID,
    Result, StateID, SymbolID, TokenType, TokenTypeID, TokenTypeMap,
};

/// The NFA of all modes with the tables that belong to it.
#[derive(Debug, Clone)]
pub(crate) struct AssembledNfa {
    /// The NFA with the token types of its accepting states.
    pub(crate) nfa: LabeledAutomaton,
    /// All token types in ordinal order.
    pub(crate) token_types: Vec<TokenType>,
    /// The mode names in mode index order.
    pub(crate) mode_names: Vec<String>,
    /// The mode scanning starts in.
    pub(crate) start_mode: ModeID,
}

// Assigns dense mode indices in order of first use.
#[derive(Debug, Default)]
struct ModeTable {
    names: Vec<String>,
    indices: BTreeMap<String, ModeID>,
}

impl ModeTable {
    fn intern(&mut self, name: &str) -> ModeID {
        if let Some(mode) = self.indices.get(name) {
            return *mode;
        }
        let mode = ModeID::new(self.names.len());
        self.names.push(name.to_string());
        self.indices.insert(name.to_string(), mode);
        mode
    }
}

/// Builds the NFA of the lexer description over the given alphabet.
/// # Errors
/// A `DefinitionError` is returned if the description declares no mode, if a rule switches to
/// an undeclared mode or if the start mode is not declared.
pub(crate) fn assemble_modes(
    description: &LexerDescription,
    alphabet: &Alphabet,
) -> Result<AssembledNfa> {
    check_modes(description)?;

    let declared = description
        .modes
        .iter()
        .map(|m| m.name.as_str())
        .collect::<BTreeSet<_>>();
    let mut nfa = Automaton::new(alphabet.len().max(declared.len()));
    let start_state = nfa.add_state();
    nfa.set_start_state(start_state);

    let mut modes = ModeTable::default();
    let mut mode_start_states: BTreeMap<ModeID, StateID> = BTreeMap::new();
    let mut token_types: Vec<TokenType> = Vec::new();
    let mut accepting_token_types = TokenTypeMap::new();

    for mode_description in &description.modes {
        let mode = modes.intern(&mode_description.name);
        let mode_start = *mode_start_states
            .entry(mode)
            .or_insert_with(|| nfa.add_state());
        nfa.add_transition(start_state, SymbolID::new(mode.as_usize()), mode_start);

        for rule in &mode_description.rules {
            let rule_start = nfa.add_state();
            nfa.add_epsilon_transition(mode_start, rule_start);
            let end = thompson::compile(&rule.regex, rule_start, &mut nfa, alphabet);
            nfa.add_accepting_state(end);

            let ordinal = TokenTypeID::new(token_types.len());
            let next_mode = modes.intern(&rule.next_mode);
            token_types.push(TokenType::new(ordinal, &rule.name, next_mode));
            accepting_token_types.insert(end, ordinal);
        }
    }

    let start_mode = match &description.start_mode {
        Some(name) => modes.intern(name),
        None => ModeID::new(0),
    };
    debug_assert_eq!(modes.names.len(), declared.len());

    trace!(
        "Assembled NFA with {} states for {} modes and {} token types",
        nfa.state_count(),
        modes.names.len(),
        token_types.len()
    );
    Ok(AssembledNfa {
        nfa: LabeledAutomaton {
            automaton: nfa,
            token_types: accepting_token_types,
            error_state: None,
        },
        token_types,
        mode_names: modes.names,
        start_mode,
    })
}

fn check_modes(description: &LexerDescription) -> Result<()> {
    if description.modes.is_empty() {
        return Err(DefinitionError::NoModes.into());
    }
    let declared = description
        .modes
        .iter()
        .map(|m| m.name.as_str())
        .collect::<BTreeSet<_>>();
    for rule in description.modes.iter().flat_map(|m| m.rules.iter()) {
        if !declared.contains(rule.next_mode.as_str()) {
            return Err(DefinitionError::UndefinedMode {
                token: rule.name.clone(),
                mode: rule.next_mode.clone(),
            }
            .into());
        }
    }
    if let Some(start_mode) = &description.start_mode {
        if !declared.contains(start_mode.as_str()) {
            return Err(DefinitionError::UnknownStartMode(start_mode.clone()).into());
        }
    }
    Ok(())
}
