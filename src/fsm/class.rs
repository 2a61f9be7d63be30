use super::automaton::Edges;
use super::automaton::Target;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// An equivalence class, here, is a collection of hands that have a compatible
/// set of edges, e.g. hands that react identically to every future card.
/// Hands are kept in insertion order and the first one in is the representative.
pub(crate) struct Class {
    hands: Vec<u64>,
    edges: Edges,
}

impl Class {
    pub fn new() -> Self {
        Self {
            hands: Vec::new(),
            edges: [0; 52],
        }
    }

    pub fn hands(&self) -> &[u64] {
        &self.hands
    }
    pub fn edges(&self) -> &Edges {
        &self.edges
    }
    pub fn representative(&self) -> u64 {
        self.hands.first().copied().expect("class holds a hand")
    }

    /// Two edge sets are compatible if they have no disagreements.
    /// More precisely: every card on which both sets have a defined
    /// transition must point at the same target. Missing transitions
    /// never conflict.
    pub fn compatible(&self, edges: &Edges) -> bool {
        self.edges
            .iter()
            .zip(edges.iter())
            .all(|(ours, theirs)| *ours == 0 || *theirs == 0 || ours == theirs)
    }

    /// take a hand into the class and merge its edges into ours.
    /// edges defined on both sides already agree by compatibility; edges
    /// newly defined here are also announced to the hint index, once,
    /// which keeps each hint bucket free of duplicates.
    pub fn absorb(&mut self, hand: u64, edges: &Edges, index: u32, hints: &mut Hints) {
        self.hands.push(hand);
        for (card, &target) in edges.iter().enumerate() {
            if target != 0 && self.edges[card] == 0 {
                self.edges[card] = target;
                hints.note(card, target, index);
            }
        }
    }
}

/// Used to help find the appropriate equivalence class for a given hand.
/// Naively, we could iterate through all equivalence classes and see if any
/// match. This lets us query, per (card, target) edge, which classes already
/// contain that edge, and only consider those.
///
/// This is part of the inner-most loop of the build and is critical to runtime.
pub(crate) struct Hints(Vec<HashMap<Target, Vec<u32>>>);

impl Hints {
    pub fn new() -> Self {
        Self((0..52).map(|_| HashMap::new()).collect())
    }

    /// how many of the given edges each candidate class already contains.
    /// BTreeMap so that callers scan candidates in ascending class index,
    /// which keeps the build deterministic.
    pub fn tally(&self, edges: &Edges) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for (card, target) in edges.iter().enumerate() {
            if *target != 0 {
                if let Some(bucket) = self.0[card].get(target) {
                    for &index in bucket {
                        *counts.entry(index).or_insert(0) += 1;
                    }
                }
            }
        }
        counts
    }

    pub fn note(&mut self, card: usize, target: Target, index: u32) {
        self.0[card].entry(target).or_default().push(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_edges_never_conflict() {
        let mut hints = Hints::new();
        let mut class = Class::new();
        let mut ours = [0; 52];
        ours[0] = 10;
        ours[1] = 20;
        class.absorb(1, &ours, 0, &mut hints);
        let mut agrees = [0; 52];
        agrees[1] = 20;
        agrees[2] = 30;
        let mut differs = [0; 52];
        differs[0] = 11;
        assert!(class.compatible(&agrees));
        assert!(!class.compatible(&differs));
    }

    #[test]
    fn tally_counts_shared_edges() {
        let mut hints = Hints::new();
        let mut class = Class::new();
        let mut edges = [0; 52];
        edges[0] = 10;
        edges[1] = 20;
        class.absorb(1, &edges, 0, &mut hints);
        let mut probe = [0; 52];
        probe[0] = 10;
        probe[1] = 20;
        probe[2] = 30;
        let counts = hints.tally(&probe);
        assert_eq!(counts.get(&0), Some(&2));
    }

    #[test]
    fn first_hand_in_represents() {
        let mut hints = Hints::new();
        let mut class = Class::new();
        let edges = [0; 52];
        class.absorb(7, &edges, 0, &mut hints);
        class.absorb(9, &edges, 0, &mut hints);
        assert_eq!(class.representative(), 7);
    }
}
