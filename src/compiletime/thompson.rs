//! Thompson's construction of NFA fragments from regex ASTs.

use super::{Alphabet, Automaton, RegexAst, StateID};

/// Compiles `ast` into `nfa`, starting at the existing state `start`, and returns the end state of
/// the new fragment.
///
/// The fragment is entered only through `start` and left only through the returned end state,
/// which has no outgoing transitions. All character sets of `ast` must be tiled by `alphabet`.
pub fn compile(
    ast: &RegexAst,
    start: StateID,
    nfa: &mut Automaton,
    alphabet: &Alphabet,
) -> StateID {
    match ast {
        RegexAst::CharSet(intervals) => {
            let end = nfa.add_state();
            for interval in intervals {
                for symbol in alphabet.symbols_of(interval) {
                    nfa.add_transition(start, symbol, end);
                }
            }
            end
        }
        RegexAst::Concat(lhs, rhs) => {
            let middle = compile(lhs, start, nfa, alphabet);
            compile(rhs, middle, nfa, alphabet)
        }
        RegexAst::Union(lhs, rhs) => {
            let lhs_start = nfa.add_state();
            let rhs_start = nfa.add_state();
            nfa.add_epsilon_transition(start, lhs_start);
            nfa.add_epsilon_transition(start, rhs_start);
            let lhs_end = compile(lhs, lhs_start, nfa, alphabet);
            let rhs_end = compile(rhs, rhs_start, nfa, alphabet);
            let end = nfa.add_state();
            nfa.add_epsilon_transition(lhs_end, end);
            nfa.add_epsilon_transition(rhs_end, end);
            end
        }
        RegexAst::Optional(ast) => {
            let end = compile(ast, start, nfa, alphabet);
            nfa.add_epsilon_transition(start, end);
            end
        }
        RegexAst::Plus(ast) => plus(ast, start, nfa, alphabet).1,
        RegexAst::Star(ast) => {
            let (loop_start, end) = plus(ast, start, nfa, alphabet);
            nfa.add_epsilon_transition(loop_start, end);
            end
        }
    }
}

// Returns the loop start and the end state of a one-or-more loop over `ast`.
// The loop start is separate from `start` so that the back edge can't leak into the fragment
// `start` belongs to.
fn plus(
    ast: &RegexAst,
    start: StateID,
    nfa: &mut Automaton,
    alphabet: &Alphabet,
) -> (StateID, StateID) {
    let loop_start = nfa.add_state();
    nfa.add_epsilon_transition(start, loop_start);
    let operand_end = compile(ast, loop_start, nfa, alphabet);
    let end = nfa.add_state();
    nfa.add_epsilon_transition(operand_end, loop_start);
    nfa.add_epsilon_transition(operand_end, end);
    (loop_start, end)
}
