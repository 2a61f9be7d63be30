use crate::cards::hand::Hand;
use crate::fsm::automaton::Automaton;
use std::collections::HashSet;
use std::collections::VecDeque;

/// states in first-visit order of a breadth-first traversal from the empty
/// hand. a state's depth is the size of its hand, so the last layer is
/// recognized without lookups and its score edges are never enqueued.
pub(super) fn order(automaton: &Automaton, n: usize) -> Vec<u64> {
    let mut seen = HashSet::new();
    let mut order = Vec::with_capacity(automaton.len());
    let mut queue = VecDeque::from([0]);
    while let Some(state) = queue.pop_front() {
        if !automaton.contains(&state) || seen.contains(&state) {
            continue;
        }
        seen.insert(state);
        order.push(state);
        if Hand::from(state).size() + 1 < n {
            for &target in automaton.edges(&state) {
                queue.push_back(target);
            }
        }
    }
    order
}
