use log::trace;

use super::{Automaton, Input, LabeledAutomaton, StateID};

/// Makes the transition function of a DFA total.
///
/// A new error state is inserted at position 0 and all other states move up by one. Every state
/// gets a transition to the error state for each symbol it had no transition for. The error state
/// itself loops on every symbol and is not accepting.
pub(crate) fn complete(dfa: LabeledAutomaton) -> LabeledAutomaton {
    assert!(
        dfa.automaton.is_deterministic(),
        "Only a deterministic automaton can be completed"
    );
    let shift = |state: StateID| state + 1;
    let source = &dfa.automaton;
    let error_state = StateID::new(0);
    let mut automaton = Automaton::with_states(source.state_count() + 1, source.alphabet_size());

    automaton.set_start_state(shift(source.start_state()));
    for state in source.accepting_states() {
        automaton.add_accepting_state(shift(*state));
    }
    for transition in source.transitions() {
        if let Input::Symbol(symbol) = transition.input {
            automaton.add_transition(shift(transition.from), symbol, shift(transition.to));
        }
    }

    let mut added = 0;
    for state in (0..automaton.state_count()).map(StateID::new) {
        for symbol in source.symbols() {
            if automaton.target(state, symbol).is_none() {
                automaton.add_transition(state, symbol, error_state);
                added += 1;
            }
        }
    }
    trace!(
        "Completed DFA with {} states by {} transitions into the error state",
        automaton.state_count(),
        added
    );
    debug_assert!(automaton.is_complete());

    LabeledAutomaton {
        automaton,
        token_types: dfa
            .token_types
            .iter()
            .map(|(state, token_type)| (shift(*state), *token_type))
            .collect(),
        error_state: Some(error_state),
    }
}
