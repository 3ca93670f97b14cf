//! Hopcroft's partition refinement for complete DFAs.
//!
//! Blocks of the partition are addressed by index. When a block is split, the larger part keeps
//! the index and the smaller part gets a new one, which is queued for every symbol. Pending work
//! items of the old index then refer to the larger part, so both halves stay covered.

use std::collections::{BTreeMap, VecDeque};

use itertools::Itertools;
use log::trace;

use super::{Automaton, Input, LabeledAutomaton, StateID, SymbolID, TokenTypeMap};

/// Groups the accepting states by their token type, so that states of different token types are
/// never merged. Groups are ordered by token type.
pub(crate) fn partition_by_token_type(dfa: &LabeledAutomaton) -> Vec<Vec<StateID>> {
    dfa.automaton
        .accepting_states()
        .iter()
        .copied()
        .sorted_by_key(|state| (dfa.token_types.get(state).copied(), *state))
        .chunk_by(|state| dfa.token_types.get(state).copied())
        .into_iter()
        .map(|(_, group)| group.collect())
        .collect()
}

/// Minimizes a DFA, keeping the accepting states in each group apart from the accepting states
/// in all other groups.
pub(crate) fn minimize_by_token_type(dfa: LabeledAutomaton) -> LabeledAutomaton {
    let groups = partition_by_token_type(&dfa);
    minimize(dfa, &groups)
}

// The predecessors of each state on each symbol
struct InverseTransitions {
    predecessors: Vec<Vec<StateID>>,
    state_count: usize,
}

impl InverseTransitions {
    fn new(dfa: &Automaton) -> Self {
        let state_count = dfa.state_count();
        let mut predecessors = vec![Vec::new(); dfa.alphabet_size() * state_count];
        for transition in dfa.transitions() {
            if let Input::Symbol(symbol) = transition.input {
                predecessors[symbol.as_usize() * state_count + transition.to.as_usize()]
                    .push(transition.from);
            }
        }
        InverseTransitions {
            predecessors,
            state_count,
        }
    }

    fn of(&self, state: StateID, symbol: SymbolID) -> &[StateID] {
        &self.predecessors[symbol.as_usize() * self.state_count + state.as_usize()]
    }
}

// The partition of the states into blocks
#[derive(Debug)]
struct Partition {
    blocks: Vec<Vec<StateID>>,
    block_of: Vec<usize>,
}

impl Partition {
    fn new(state_count: usize, initial_blocks: Vec<Vec<StateID>>) -> Self {
        let mut block_of = vec![0; state_count];
        for (index, block) in initial_blocks.iter().enumerate() {
            for state in block {
                block_of[state.as_usize()] = index;
            }
        }
        Partition {
            blocks: initial_blocks,
            block_of,
        }
    }

    // Splits the block into its marked states and the rest. `marked_count` is the number of marked
    // states in the block. Returns the index of the new block if the block was really split.
    fn split(&mut self, block: usize, marked_count: usize, marked: &[bool]) -> Option<usize> {
        if marked_count == self.blocks[block].len() {
            return None;
        }
        let (inside, outside): (Vec<_>, Vec<_>) = self.blocks[block]
            .iter()
            .copied()
            .partition(|state| marked[state.as_usize()]);
        let (larger, smaller) = if inside.len() >= outside.len() {
            (inside, outside)
        } else {
            (outside, inside)
        };
        let new_block = self.blocks.len();
        for state in &smaller {
            self.block_of[state.as_usize()] = new_block;
        }
        self.blocks[block] = larger;
        self.blocks.push(smaller);
        Some(new_block)
    }
}

/// Minimizes a complete DFA.
///
/// The accepting states are initially partitioned into `accepting_groups`, the non accepting
/// states form one more block. The states of the result are numbered by the smallest original
/// state they contain, so an error state 0 stays state 0.
pub(crate) fn minimize(
    dfa: LabeledAutomaton,
    accepting_groups: &[Vec<StateID>],
) -> LabeledAutomaton {
    let source = &dfa.automaton;
    assert!(source.is_complete(), "Only a complete DFA can be minimized");
    debug_assert_eq!(
        accepting_groups.iter().map(|g| g.len()).sum::<usize>(),
        source.accepting_states().len()
    );

    let state_count = source.state_count();
    let inverse = InverseTransitions::new(source);

    let mut initial_blocks = accepting_groups
        .iter()
        .filter(|group| !group.is_empty())
        .cloned()
        .collect::<Vec<_>>();
    let accepting_block_count = initial_blocks.len();
    let non_accepting = source
        .states()
        .filter(|state| !source.is_accepting(*state))
        .collect::<Vec<_>>();
    if !non_accepting.is_empty() {
        initial_blocks.push(non_accepting);
    }
    let mut partition = Partition::new(state_count, initial_blocks);

    let mut work_list = (0..accepting_block_count)
        .cartesian_product(source.symbols())
        .collect::<VecDeque<_>>();
    let mut in_splitter = vec![false; state_count];

    while let Some((splitter, symbol)) = work_list.pop_front() {
        // The predecessors are collected before any block is split.
        let predecessors = partition.blocks[splitter]
            .iter()
            .flat_map(|state| inverse.of(*state, symbol))
            .copied()
            .filter(|state| !std::mem::replace(&mut in_splitter[state.as_usize()], true))
            .collect::<Vec<_>>();

        let mut touched: BTreeMap<usize, usize> = BTreeMap::new();
        for state in &predecessors {
            *touched
                .entry(partition.block_of[state.as_usize()])
                .or_default() += 1;
        }
        for (block, marked_count) in touched {
            if let Some(new_block) = partition.split(block, marked_count, &in_splitter) {
                work_list.extend(source.symbols().map(|symbol| (new_block, symbol)));
            }
        }

        for state in predecessors {
            in_splitter[state.as_usize()] = false;
        }
    }

    // Number the blocks by their smallest state.
    let representatives = partition
        .blocks
        .iter()
        .map(|block| block.iter().copied().min().unwrap_or_default())
        .collect::<Vec<_>>();
    let mut new_index = vec![StateID::default(); partition.blocks.len()];
    for (number, block) in (0..partition.blocks.len())
        .sorted_by_key(|block| representatives[*block])
        .enumerate()
    {
        new_index[block] = StateID::new(number);
    }
    let map = |state: StateID| new_index[partition.block_of[state.as_usize()]];

    let mut automaton = Automaton::with_states(partition.blocks.len(), source.alphabet_size());
    automaton.set_start_state(map(source.start_state()));
    for representative in &representatives {
        for transition in source.transitions_from(*representative) {
            if let Input::Symbol(symbol) = transition.input {
                automaton.add_transition(map(transition.from), symbol, map(transition.to));
            }
        }
        if source.is_accepting(*representative) {
            automaton.add_accepting_state(map(*representative));
        }
    }
    let mut token_types = TokenTypeMap::new();
    for (state, token_type) in &dfa.token_types {
        let previous = token_types.insert(map(*state), *token_type);
        debug_assert!(previous.is_none() || previous == Some(*token_type));
    }

    trace!(
        "Minimized DFA from {} to {} states",
        state_count,
        automaton.state_count()
    );
    debug_assert!(automaton.is_complete());
    LabeledAutomaton {
        automaton,
        token_types,
        error_state: dfa.error_state.map(map),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiletime::TokenTypeID;

    fn s(i: usize) -> StateID {
        StateID::new(i)
    }

    fn a(i: usize) -> SymbolID {
        SymbolID::new(i)
    }

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn dfa(table: &[[usize; 2]], start: usize, accepting: &[(usize, usize)]) -> LabeledAutomaton {
        let mut automaton = Automaton::with_states(table.len(), 2);
        automaton.set_start_state(s(start));
        for (from, row) in table.iter().enumerate() {
            for (symbol, to) in row.iter().enumerate() {
                automaton.add_transition(s(from), a(symbol), s(*to));
            }
        }
        let mut token_types = TokenTypeMap::new();
        for (state, token_type) in accepting {
            automaton.add_accepting_state(s(*state));
            token_types.insert(s(*state), TokenTypeID::new(*token_type));
        }
        LabeledAutomaton {
            automaton,
            token_types,
            error_state: Some(s(0)),
        }
    }

    fn table(dfa: &Automaton) -> Vec<[usize; 2]> {
        dfa.states()
            .map(|state| {
                [
                    dfa.target(state, a(0)).unwrap().as_usize(),
                    dfa.target(state, a(1)).unwrap().as_usize(),
                ]
            })
            .collect()
    }

    struct TestData {
        name: &'static str,
        table: &'static [[usize; 2]],
        start: usize,
        accepting: &'static [(usize, usize)],
        expected_table: &'static [[usize; 2]],
        expected_accepting: &'static [(usize, usize)],
    }

    const TEST_DATA: &[TestData] = &[
        TestData {
            name: "already minimal",
            table: &[[0, 0], [2, 0], [0, 0]],
            start: 1,
            accepting: &[(2, 0)],
            expected_table: &[[0, 0], [2, 0], [0, 0]],
            expected_accepting: &[(2, 0)],
        },
        TestData {
            // (0|1)0 with both end states accepting the same token type
            name: "equivalent accepting states",
            table: &[[0, 0], [2, 3], [4, 0], [5, 0], [0, 0], [0, 0]],
            start: 1,
            accepting: &[(4, 0), (5, 0)],
            expected_table: &[[0, 0], [2, 2], [3, 0], [0, 0]],
            expected_accepting: &[(3, 0)],
        },
        TestData {
            // Same automaton, but the end states accept different token types
            name: "different token types",
            table: &[[0, 0], [2, 3], [4, 0], [5, 0], [0, 0], [0, 0]],
            start: 1,
            accepting: &[(4, 0), (5, 1)],
            expected_table: &[[0, 0], [2, 3], [4, 0], [5, 0], [0, 0], [0, 0]],
            expected_accepting: &[(4, 0), (5, 1)],
        },
        TestData {
            // 0* 1 with a redundant copy of the loop
            name: "redundant loop",
            table: &[[0, 0], [2, 3], [1, 3], [0, 0]],
            start: 1,
            accepting: &[(3, 0)],
            expected_table: &[[0, 0], [1, 2], [0, 0]],
            expected_accepting: &[(2, 0)],
        },
        TestData {
            name: "dead states merge into the error state",
            table: &[[0, 0], [2, 3], [2, 2], [3, 3]],
            start: 1,
            accepting: &[],
            expected_table: &[[0, 0]],
            expected_accepting: &[],
        },
    ];

    #[test]
    fn test_minimize() {
        init();
        for data in TEST_DATA {
            let minimized = minimize_by_token_type(dfa(data.table, data.start, data.accepting));
            assert_eq!(
                table(&minimized.automaton),
                data.expected_table.to_vec(),
                "{}",
                data.name
            );
            assert_eq!(
                minimized
                    .token_types
                    .iter()
                    .map(|(state, token_type)| (state.as_usize(), token_type.as_usize()))
                    .collect::<Vec<_>>(),
                data.expected_accepting.to_vec(),
                "{}",
                data.name
            );
            assert_eq!(
                minimized.automaton.accepting_states().len(),
                data.expected_accepting.len(),
                "{}",
                data.name
            );
            assert_eq!(minimized.error_state, Some(s(0)), "{}", data.name);
        }
    }

    #[test]
    fn test_partition_by_token_type() {
        let dfa = dfa(
            &[[0, 0], [2, 3], [4, 0], [5, 0], [0, 0], [0, 0]],
            1,
            &[(2, 1), (3, 0), (4, 1), (5, 0)],
        );
        assert_eq!(
            partition_by_token_type(&dfa),
            vec![vec![s(3), s(5)], vec![s(2), s(4)]]
        );
    }

    #[test]
    #[should_panic]
    fn test_minimize_incomplete() {
        let mut automaton = Automaton::with_states(2, 1);
        automaton.add_transition(s(0), a(0), s(1));
        minimize(
            LabeledAutomaton {
                automaton,
                ..Default::default()
            },
            &[],
        );
    }
}
