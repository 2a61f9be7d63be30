use super::automaton::Automaton;
use super::automaton::Edges;
use super::class::Class;
use super::class::Hints;
use crate::cards::hand::Hand;
use crate::cards::hands::HandIterator;
use crate::Score;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Compiles a reference evaluation into an Automaton, bottom-up.
///
/// Layers are built from size n-1 down to 0. At the top layer every out-edge
/// is a Score straight from the evaluation; below that, every out-edge is the
/// representative of the successor's equivalence class, which the previous
/// layer's pass has already chosen. Hands of one size are fused greedily:
/// the first class with a compatible edge set wins, and a hand that matches
/// nothing seeds a new class.
///
/// The build is deterministic: hands arrive in enumerator order, candidate
/// classes are scanned in ascending index, and representatives are
/// first-inserted. Scores must be nonzero, since 0 marks a missing edge.
pub struct Builder<F> {
    n: usize,
    eval: F,
    reps: HashMap<u64, u64>,
    states: HashMap<u64, Edges>,
    unfiltered: bool,
}

impl<F> Builder<F>
where
    F: Fn(&Hand) -> Score,
{
    pub fn new(n: usize, eval: F) -> Self {
        assert!((1..=7).contains(&n));
        Self {
            n,
            eval,
            reps: HashMap::new(),
            states: HashMap::new(),
            unfiltered: false,
        }
    }

    /// drop the cheap candidate filter and rely on full compatibility checks
    /// alone. slower, same language recognized.
    #[cfg(test)]
    pub fn unfiltered(mut self) -> Self {
        self.unfiltered = true;
        self
    }

    pub fn build(mut self) -> Automaton {
        for size in (0..self.n).rev() {
            self.assemble(size);
        }
        Automaton::from(self.states)
    }

    /// fuse all hands of one size into equivalence classes, then collapse each
    /// class into one automaton state keyed by its representative.
    fn assemble(&mut self, size: usize) {
        let mut classes: Vec<Class> = Vec::new();
        let mut hints = Hints::new();
        let hands = HandIterator::from(size);
        log::info!("assembling {:>12} hands of size {}", hands.combinations(), size);
        let progress = crate::progress(hands.combinations());
        for hand in hands {
            let ref edges = self.edges(&hand);
            let ref counts = hints.tally(edges);
            let index = match self.matching(size, edges, &classes, counts) {
                Some(index) => index,
                None => {
                    classes.push(Class::new());
                    classes.len() as u32 - 1
                }
            };
            classes[index as usize].absorb(u64::from(hand), edges, index, &mut hints);
            progress.inc(1);
        }
        progress.finish();
        for class in classes.iter() {
            let representative = class.representative();
            for &hand in class.hands() {
                self.reps.insert(hand, representative);
            }
            self.states.insert(representative, *class.edges());
        }
        log::info!("fused into  {:>12} classes", classes.len());
    }

    /// the raw out-edges of one hand. at the top layer the successor hand is
    /// complete and scored by the evaluation; everywhere else it resolves
    /// through the representative map populated by the previous pass.
    fn edges(&self, hand: &Hand) -> Edges {
        let mut edges = [0; 52];
        for (card, next) in hand.children() {
            edges[u8::from(card) as usize] = if next.size() == self.n {
                (self.eval)(&next) as u64
            } else {
                let ref key = u64::from(next);
                *self
                    .reps
                    .get(key)
                    .expect("representative for every successor hand")
            };
        }
        edges
    }

    /// Find a class whose edges are compatible with the given edges.
    ///
    /// Between two equivalent hands of size s, at most 2s cards can differ
    /// by absence (each hand's own cards have no out-edge). So a candidate
    /// sharing fewer than 52 - 2s edges cannot possibly match, and the cheap
    /// count filter skips it before the full 52-card compatibility check.
    fn matching(
        &self,
        size: usize,
        edges: &Edges,
        classes: &[Class],
        counts: &BTreeMap<u32, usize>,
    ) -> Option<u32> {
        let threshold = 52 - 2 * size;
        counts
            .iter()
            .filter(|(_, &count)| self.unfiltered || count >= threshold)
            .map(|(&index, _)| index)
            .find(|&index| classes[index as usize].compatible(edges))
    }
}
