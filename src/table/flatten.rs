use super::table::Table;
use crate::cards::hand::Hand;
use crate::fsm::automaton::Automaton;
use std::collections::HashMap;

/// Materialize the automaton as a flat array under the given state ordering.
///
/// The state at ordering position i starts at slot 52 * i. Inner states
/// store their successors' starting slots; last-layer states store scores
/// directly. Undefined transitions resolve to slot 0, which no legal walk
/// reads. Iterating the ordering rather than the state map keeps the output
/// bytes identical across runs.
pub fn flatten(automaton: &Automaton, order: &[u64], n: usize) -> Table {
    assert!(automaton.len() == order.len());
    assert!(order.first() == Some(&0));
    let slots = order
        .iter()
        .enumerate()
        .map(|(i, &state)| (state, (i * 52) as u32))
        .collect::<HashMap<_, _>>();
    let mut memory = vec![0u32; order.len() * 52];
    for (i, state) in order.iter().enumerate() {
        let base = i * 52;
        let edges = automaton.edges(state);
        if Hand::from(*state).size() + 1 == n {
            for (card, &target) in edges.iter().enumerate() {
                memory[base + card] = target as u32;
            }
        } else {
            for (card, &target) in edges.iter().enumerate() {
                memory[base + card] = slots[&target];
            }
        }
    }
    Table::from(memory)
}
