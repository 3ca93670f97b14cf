//! The `dot` module contains the conversion from automata to the graphviz dot format.
//! The functions in this module are used for testing and debugging purposes.

use std::io::Write;

use dot_writer::{Attributes, Color, DotWriter, RankDirection, Shape};

use super::{Alphabet, Automaton, Input, LexerDefinition, StateID};

/// Render an automaton of the construction pipeline to the graphviz dot format.
/// Transitions from the start state are labeled with the mode they select, all other symbol
/// transitions with their code point interval.
pub fn render_to<W: Write>(
    automaton: &Automaton,
    label: &str,
    alphabet: &Alphabet,
    output: &mut W,
) {
    render(
        automaton,
        label,
        alphabet,
        |state| state.as_usize().to_string(),
        output,
    );
}

/// Render the DFA of a lexer definition to the graphviz dot format.
/// Accepting states are labeled with the name of their token type.
pub fn render_definition_to<W: Write>(definition: &LexerDefinition, label: &str, output: &mut W) {
    render(
        definition.automaton(),
        label,
        definition.alphabet(),
        |state| match definition.token_type_of(state) {
            Some(token_type) => format!(
                "{}\n{}:{}",
                state.as_usize(),
                token_type.name().escape_default(),
                token_type.ordinal()
            ),
            None if state == definition.error_state() => format!("{}\nerror", state.as_usize()),
            None => state.as_usize().to_string(),
        },
        output,
    );
}

fn render<W: Write>(
    automaton: &Automaton,
    label: &str,
    alphabet: &Alphabet,
    state_label: impl Fn(StateID) -> String,
    output: &mut W,
) {
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph
        .set_label(label)
        .set_rank_direction(RankDirection::LeftRight);
    for state in automaton.states() {
        let source_id = {
            let mut source_node = digraph.node_auto();
            source_node.set_label(&state_label(state));
            if state == automaton.start_state() {
                source_node
                    .set_shape(Shape::Circle)
                    .set_color(Color::Blue)
                    .set_pen_width(3.0);
            }
            if automaton.is_accepting(state) {
                source_node.set_color(Color::Red).set_pen_width(3.0);
            }
            source_node.id()
        };
        for transition in automaton.transitions_from(state) {
            let edge_label = match transition.input {
                Input::Epsilon => "ε".to_string(),
                Input::Symbol(symbol) if state == automaton.start_state() => {
                    format!("mode {}", symbol)
                }
                Input::Symbol(symbol) => match alphabet.interval(symbol) {
                    Some(interval) => interval.to_string(),
                    None => format!("#{}", symbol),
                },
            };
            digraph
                .edge(
                    source_id.clone(),
                    format!("node_{}", transition.to.as_usize()),
                )
                .attributes()
                .set_label(&edge_label);
        }
    }
}
