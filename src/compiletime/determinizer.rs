//! The powerset construction that converts an NFA into a DFA.
//!
//! Every DFA state stands for the sorted set of NFA states it was built from. The sets are
//! interned in creation order, so the numbering of the DFA only depends on the NFA.

use std::collections::BTreeMap;

use log::trace;

use super::{Automaton, LabeledAutomaton, StateID, SymbolID, TokenTypeMap};

// Scratch space for closure and move computations, sized to the NFA.
#[derive(Debug)]
struct StateSetScratch {
    present: Vec<bool>,
    stack: Vec<StateID>,
}

impl StateSetScratch {
    fn new(state_count: usize) -> Self {
        StateSetScratch {
            present: vec![false; state_count],
            stack: Vec::new(),
        }
    }

    // Sorts the collected states and resets the presence bits of exactly these states.
    fn finish(&mut self, mut states: Vec<StateID>) -> Vec<StateID> {
        for state in &states {
            self.present[*state] = false;
        }
        states.sort_unstable();
        states
    }

    fn epsilon_closure(&mut self, nfa: &Automaton, states: &[StateID]) -> Vec<StateID> {
        let mut result = Vec::with_capacity(states.len());
        for state in states {
            if !self.present[*state] {
                self.present[*state] = true;
                result.push(*state);
                self.stack.push(*state);
            }
        }
        while let Some(state) = self.stack.pop() {
            for target in nfa.epsilon_targets(state) {
                if !self.present[target] {
                    self.present[target] = true;
                    result.push(target);
                    self.stack.push(target);
                }
            }
        }
        self.finish(result)
    }

    fn move_on(&mut self, nfa: &Automaton, states: &[StateID], symbol: SymbolID) -> Vec<StateID> {
        let mut result = Vec::new();
        for state in states {
            for target in nfa.targets(*state, symbol) {
                if !self.present[target] {
                    self.present[target] = true;
                    result.push(target);
                }
            }
        }
        self.finish(result)
    }
}

// The DFA under construction together with the NFA state set of each DFA state.
#[derive(Debug)]
struct PowersetBuilder<'a> {
    nfa: &'a LabeledAutomaton,
    dfa: Automaton,
    state_sets: Vec<Vec<StateID>>,
    state_ids: BTreeMap<Vec<StateID>, StateID>,
    token_types: TokenTypeMap,
}

impl<'a> PowersetBuilder<'a> {
    fn new(nfa: &'a LabeledAutomaton) -> Self {
        PowersetBuilder {
            nfa,
            dfa: Automaton::new(nfa.automaton.alphabet_size()),
            state_sets: Vec::new(),
            state_ids: BTreeMap::new(),
            token_types: TokenTypeMap::new(),
        }
    }

    // Returns the DFA state of the given set of NFA states, creating it on first use.
    fn intern(&mut self, state_set: Vec<StateID>) -> StateID {
        if let Some(state) = self.state_ids.get(&state_set) {
            return *state;
        }
        let state = self.dfa.add_state();
        if state_set
            .iter()
            .any(|s| self.nfa.automaton.is_accepting(*s))
        {
            self.dfa.add_accepting_state(state);
        }
        // The lowest ordinal wins if several token types meet in one state.
        if let Some(token_type) = state_set
            .iter()
            .filter_map(|s| self.nfa.token_types.get(s))
            .min()
        {
            self.token_types.insert(state, *token_type);
        }
        self.state_sets.push(state_set.clone());
        self.state_ids.insert(state_set, state);
        state
    }
}

/// Converts the NFA into an equivalent DFA without unreachable states.
/// The start state of the DFA is state 0. Sets of NFA states that can't be reached on any symbol
/// are not turned into states, so the DFA is usually not complete.
pub(crate) fn determinize(nfa: LabeledAutomaton) -> LabeledAutomaton {
    debug_assert!(nfa.error_state.is_none());
    let automaton = &nfa.automaton;
    let mut scratch = StateSetScratch::new(automaton.state_count());
    let mut builder = PowersetBuilder::new(&nfa);

    let start_set = scratch.epsilon_closure(automaton, &[automaton.start_state()]);
    let start_state = builder.intern(start_set);
    builder.dfa.set_start_state(start_state);

    // States are processed in creation order, which makes the numbering deterministic.
    let mut marked = 0;
    while marked < builder.state_sets.len() {
        let from = StateID::new(marked);
        for symbol in automaton.symbols() {
            let moved = scratch.move_on(automaton, &builder.state_sets[marked], symbol);
            if moved.is_empty() {
                continue;
            }
            let target_set = scratch.epsilon_closure(automaton, &moved);
            let to = builder.intern(target_set);
            builder.dfa.add_transition(from, symbol, to);
        }
        marked += 1;
    }

    trace!(
        "Determinized NFA with {} states into DFA with {} states",
        automaton.state_count(),
        builder.dfa.state_count()
    );
    debug_assert!(builder.dfa.is_deterministic());
    LabeledAutomaton {
        automaton: builder.dfa,
        token_types: builder.token_types,
        error_state: None,
    }
}
