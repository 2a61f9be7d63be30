use crate::fsm::automaton::Automaton;
use crate::fsm::automaton::Target;
use std::collections::HashSet;

/// states in Van Emde Boas order: recursively emit the top half of the
/// depth budget, then each bottom-half subtree in turn. for any cache line
/// size, a subtree that fits the line lands contiguously, which makes the
/// layout cache-oblivious.
pub(super) fn order(automaton: &Automaton, n: usize) -> Vec<u64> {
    let mut seen = HashSet::new();
    split(automaton, 0, n, &mut seen).0
}

/// emit the subtree under root within the given depth budget. returns the
/// emitted order along with the roots of the layer just below the budget,
/// which the caller either recurses into or discards. a budget of one emits
/// the root alone and hands back its successors. already-visited roots
/// contribute nothing: cross-edges make the state graph a DAG, not a tree.
fn split(
    automaton: &Automaton,
    root: Target,
    depth: usize,
    seen: &mut HashSet<Target>,
) -> (Vec<u64>, Vec<Target>) {
    if seen.contains(&root) || !automaton.contains(&root) {
        return (Vec::new(), Vec::new());
    }
    if depth == 1 {
        seen.insert(root);
        (vec![root], automaton.edges(&root).to_vec())
    } else {
        let top = depth / 2;
        let bot = depth - top;
        let (mut order, roots) = split(automaton, root, top, seen);
        let mut next = Vec::new();
        for lower in roots {
            let (emitted, deeper) = split(automaton, lower, bot, seen);
            order.extend(emitted);
            next.extend(deeper);
        }
        (order, next)
    }
}
