use super::interval::symbol_of;

/// Name and follow-up mode of a token type as needed at scan time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    /// The name of the rule that produced the token type.
    pub name: String,
    /// The index of the mode the scanner switches to after recognizing this token.
    pub mode: usize,
}

/// The tables a maximal-munch scanner runs on.
///
/// This is the flat form of a lexer definition. It is either created from a lexer definition at
/// build time or from the constants of a generated lexer source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerData {
    /// The total transition function in row-major order.
    /// Each row has `symbol_count` entries, column 0 belongs to the error symbol.
    pub transitions: Vec<usize>,
    /// The number of columns of the transition table, i.e. the alphabet size plus one.
    pub symbol_count: usize,
    /// For each state whether it is accepting.
    pub accepting: Vec<bool>,
    /// For each state the ordinal of the token type it accepts, if any.
    pub token_types: Vec<Option<usize>>,
    /// The token types ordered by ordinal.
    pub tokens: Vec<TokenInfo>,
    /// The sorted, disjoint alphabet intervals as `(start, end)` pairs, both inclusive.
    pub intervals: Vec<(u32, u32)>,
    /// The error state, the sink of every invalid transition.
    pub error_state: usize,
    /// The state from which the mode selection transitions start.
    pub start_state: usize,
    /// The mode in which scanning starts.
    pub start_mode: usize,
    /// The names of the modes ordered by mode index.
    pub mode_names: Vec<String>,
}

impl ScannerData {
    /// The number of states of the automaton.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.accepting.len()
    }

    /// The symbol id of the given character; `0` if the character is not part of the alphabet.
    #[inline]
    pub fn symbol_of(&self, c: char) -> usize {
        symbol_of(&self.intervals, c as u32)
    }

    /// The state reached from `state` on symbol id `symbol`.
    #[inline]
    pub fn next_state(&self, state: usize, symbol: usize) -> usize {
        self.transitions[state * self.symbol_count + symbol]
    }

    /// The state in which scanning starts when the given mode is active.
    /// Mode selection is encoded as input symbol `mode` at the start state.
    #[inline]
    pub fn mode_start_state(&self, mode: usize) -> usize {
        self.next_state(self.start_state, mode + 1)
    }

    /// The index of the mode with the given name.
    pub fn mode_index(&self, name: &str) -> Option<usize> {
        self.mode_names.iter().position(|n| n == name)
    }
}
