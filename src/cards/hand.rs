use super::card::Card;
use crate::Arbitrary;

/// Hand represents a sorted sequence of up to seven distinct Cards. we keep the cards
/// in ascending order so that any set of cards has exactly one Hand value, which lets us
/// treat the u64 encoding as identity. the encoding packs the size into the low byte and
/// one card per byte above it, with zero padding past size, so the empty hand is exactly 0.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Hand {
    size: u8,
    cards: [u8; 7],
}

impl Hand {
    pub fn empty() -> Self {
        Self {
            size: 0,
            cards: [0; 7],
        }
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards[..self.size as usize].contains(&u8::from(*card))
    }

    /// the Hand extended by one card, still sorted. the card must be new and there must be room.
    pub fn with(&self, card: Card) -> Self {
        assert!(self.size < 7);
        assert!(!self.contains(&card));
        let card = u8::from(card);
        let mut next = *self;
        let mut i = next.size as usize;
        while i > 0 && next.cards[i - 1] > card {
            next.cards[i] = next.cards[i - 1];
            i -= 1;
        }
        next.cards[i] = card;
        next.size += 1;
        next
    }

    /// every legal next hand, one per card not already held, in ascending card order
    pub fn children(self) -> impl Iterator<Item = (Card, Hand)> {
        (0..52u8)
            .map(Card::from)
            .filter(move |card| !self.contains(card))
            .map(move |card| (card, self.with(card)))
    }
}

/// we can empty a hand from low to high
/// by removing the lowest card until the hand is empty
impl Iterator for Hand {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        match self.size {
            0 => None,
            _ => {
                let card = self.cards[0];
                self.cards.copy_within(1.., 0);
                self.cards[6] = 0;
                self.size -= 1;
                Some(Card::from(card))
            }
        }
    }
}

/// u64 isomorphism
/// [2c, Ts, Jc]
/// 0x00000000_24_23_00_03
impl From<Hand> for u64 {
    fn from(h: Hand) -> Self {
        h.cards
            .iter()
            .take(h.size as usize)
            .enumerate()
            .fold(h.size as u64, |n, (i, &card)| {
                n | (card as u64) << (8 * (i + 1))
            })
    }
}
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        let size = (n & 0xFF) as u8;
        assert!(size <= 7);
        let mut cards = [0; 7];
        for (i, card) in cards.iter_mut().enumerate().take(size as usize) {
            *card = (n >> (8 * (i + 1)) & 0xFF) as u8;
        }
        Self { size, cards }
    }
}

/// Vec<Card> isomorphism (up to Vec permutation, this always comes out sorted)
impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        cards
            .into_iter()
            .fold(Self::empty(), |hand, card| hand.with(card))
    }
}
impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        hand.collect()
    }
}

/// str isomorphism
/// this follows from Vec<Card> isomorphism
impl TryFrom<&str> for Hand {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Ok(s.split_whitespace()
            .map(Card::try_from)
            .collect::<Result<Vec<Card>, _>>()?
            .into())
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for card in *self {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl Arbitrary for Hand {
    fn random() -> Self {
        use rand::Rng;
        let ref mut rng = rand::thread_rng();
        let size = rng.gen_range(0..=7);
        let mut hand = Hand::empty();
        while hand.size() < size {
            let card = Card::draw();
            if !hand.contains(&card) {
                hand = hand.with(card);
            }
        }
        hand
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u64() {
        let hand = Hand::random();
        assert_eq!(hand, Hand::from(u64::from(hand)));
    }

    #[test]
    fn empty_encodes_to_zero() {
        assert_eq!(u64::from(Hand::empty()), 0);
        assert_eq!(Hand::from(0u64), Hand::empty());
    }

    #[test]
    fn card_iteration() {
        let mut iter = Hand::try_from("Jc Ts 2c Js").unwrap().into_iter();
        assert_eq!(iter.next(), Some(Card::try_from("2c").unwrap()));
        assert_eq!(iter.next(), Some(Card::try_from("Ts").unwrap()));
        assert_eq!(iter.next(), Some(Card::try_from("Jc").unwrap()));
        assert_eq!(iter.next(), Some(Card::try_from("Js").unwrap()));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn insertion_stays_sorted() {
        let hand = Hand::try_from("As 2c 8h 8d").unwrap();
        let cards = Vec::<Card>::from(hand);
        assert!(cards.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(hand.size(), 4);
    }

    #[test]
    fn children_are_the_complement() {
        let hand = Hand::try_from("2c 3c 4c").unwrap();
        assert_eq!(hand.children().count(), 49);
        assert!(hand
            .children()
            .all(|(card, next)| !hand.contains(&card) && next.size() == 4));
    }
}
