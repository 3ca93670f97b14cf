//! This module contains the automaton type shared by all stages of the construction pipeline.
//! The same type holds the NFA with epsilon transitions, the DFA, the completed DFA and the
//! minimized DFA.

use std::collections::{BTreeMap, BTreeSet};

use super::{StateID, SymbolID, TokenTypeID};

/// The input of a transition.
/// Epsilon sorts before all symbols, so the epsilon transitions of a state come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Input {
    /// A transition that consumes no input.
    Epsilon,
    /// A transition on an alphabet symbol.
    Symbol(SymbolID),
}

/// A transition of an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    /// The source state.
    pub from: StateID,
    /// The input consumed by the transition.
    pub input: Input,
    /// The target state.
    pub to: StateID,
}

/// A finite automaton over the symbols `0..alphabet_size`.
/// States are the dense ids `0..state_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Automaton {
    // The outgoing transitions of each state
    states: Vec<BTreeSet<Transition>>,
    start_state: StateID,
    accepting_states: BTreeSet<StateID>,
    alphabet_size: usize,
}

impl Automaton {
    /// Creates an automaton without any state.
    pub fn new(alphabet_size: usize) -> Self {
        Automaton {
            alphabet_size,
            ..Default::default()
        }
    }

    /// Creates an automaton with `state_count` states and no transitions.
    pub fn with_states(state_count: usize, alphabet_size: usize) -> Self {
        Automaton {
            states: vec![BTreeSet::new(); state_count],
            alphabet_size,
            ..Default::default()
        }
    }

    /// Adds a new state and returns its id.
    pub fn add_state(&mut self) -> StateID {
        self.states.push(BTreeSet::new());
        StateID::new(self.states.len() - 1)
    }

    /// The number of states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// The ids of all states in ascending order.
    pub fn states(&self) -> impl Iterator<Item = StateID> + Clone {
        (0..self.states.len()).map(StateID::new)
    }

    /// The number of real symbols, the error symbol not counted.
    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// All symbols of the alphabet in ascending order.
    pub fn symbols(&self) -> impl Iterator<Item = SymbolID> + Clone {
        (0..self.alphabet_size).map(SymbolID::new)
    }

    /// The start state.
    pub fn start_state(&self) -> StateID {
        self.start_state
    }

    pub(crate) fn set_start_state(&mut self, state: StateID) {
        debug_assert!(state.as_usize() < self.states.len());
        self.start_state = state;
    }

    /// The accepting states in ascending order.
    pub fn accepting_states(&self) -> &BTreeSet<StateID> {
        &self.accepting_states
    }

    /// Checks if the given state is accepting.
    pub fn is_accepting(&self, state: StateID) -> bool {
        self.accepting_states.contains(&state)
    }

    pub(crate) fn add_accepting_state(&mut self, state: StateID) {
        debug_assert!(state.as_usize() < self.states.len());
        self.accepting_states.insert(state);
    }

    /// Adds a transition on `symbol`.
    pub(crate) fn add_transition(&mut self, from: StateID, symbol: SymbolID, to: StateID) {
        debug_assert!(symbol.as_usize() < self.alphabet_size);
        self.insert(Transition {
            from,
            input: Input::Symbol(symbol),
            to,
        });
    }

    /// Adds a transition that consumes no input.
    pub(crate) fn add_epsilon_transition(&mut self, from: StateID, to: StateID) {
        self.insert(Transition {
            from,
            input: Input::Epsilon,
            to,
        });
    }

    fn insert(&mut self, transition: Transition) {
        debug_assert!(transition.to.as_usize() < self.states.len());
        self.states[transition.from].insert(transition);
    }

    /// All transitions ordered by source state, input and target state.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.states.iter().flatten()
    }

    /// The outgoing transitions of `state`, epsilon transitions first.
    pub fn transitions_from(&self, state: StateID) -> impl Iterator<Item = &Transition> {
        self.states[state].iter()
    }

    /// The targets of the epsilon transitions of `state`.
    pub fn epsilon_targets(&self, state: StateID) -> impl Iterator<Item = StateID> + '_ {
        self.states[state]
            .iter()
            .take_while(|t| t.input == Input::Epsilon)
            .map(|t| t.to)
    }

    /// The targets of the transitions of `state` on `symbol`.
    pub fn targets(&self, state: StateID, symbol: SymbolID) -> impl Iterator<Item = StateID> + '_ {
        let lower = Transition {
            from: state,
            input: Input::Symbol(symbol),
            to: StateID::new(0),
        };
        let upper = Transition {
            to: StateID::new(usize::MAX),
            ..lower
        };
        self.states[state].range(lower..=upper).map(|t| t.to)
    }

    /// The target of the transition of `state` on `symbol` in a deterministic automaton.
    pub fn target(&self, state: StateID, symbol: SymbolID) -> Option<StateID> {
        self.targets(state, symbol).next()
    }

    /// Checks that there are no epsilon transitions and at most one transition per state and
    /// symbol.
    pub fn is_deterministic(&self) -> bool {
        self.states.iter().all(|transitions| {
            transitions.iter().all(|t| t.input != Input::Epsilon)
                && transitions
                    .iter()
                    .zip(transitions.iter().skip(1))
                    .all(|(t1, t2)| t1.input != t2.input)
        })
    }

    /// Checks that the automaton is deterministic and has a transition for each state and symbol.
    pub fn is_complete(&self) -> bool {
        self.is_deterministic()
            && self
                .states
                .iter()
                .all(|transitions| transitions.len() == self.alphabet_size)
    }
}

/// Maps accepting states to the token type they recognize.
pub type TokenTypeMap = BTreeMap<StateID, TokenTypeID>;

/// An automaton together with the token types of its accepting states and its error state.
/// This is the value that flows through the stages of the construction pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabeledAutomaton {
    /// The automaton.
    pub automaton: Automaton,
    /// The token types of the accepting states.
    pub token_types: TokenTypeMap,
    /// The error state, once the automaton is complete.
    pub error_state: Option<StateID>,
}
