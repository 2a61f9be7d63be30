use super::card::Card;
use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::suit::Suit;

type Masks = u16;
type Count = u8;
type Cards<'a> = &'a Vec<Card>;

/// A lazy evaluator for a hand's strength.
///
/// Using a compact representation of the Hand, we search for
/// the highest Ranking using bitwise operations over rank masks.
/// Works for any hand of one through seven cards: categories that
/// need more cards than the hand holds simply never match.
pub struct Evaluator {
    rank_masks: Masks,       // which ranks are in the hand, neglecting suit
    suit_masks: [Masks; 4],  // which ranks are in the hand, grouped by suit
    suit_count: [Count; 4],  // how many suits (i) are in the hand. neglect rank
    rank_count: [Count; 13], // how many ranks (i) are in the hand. neglect suit
}

impl From<Hand> for Evaluator {
    fn from(hand: Hand) -> Self {
        let ref cards = Vec::<Card>::from(hand);
        Self {
            rank_masks: Self::rank_masks(cards),
            suit_masks: Self::suit_masks(cards),
            suit_count: Self::suit_count(cards),
            rank_count: Self::rank_count(cards),
        }
    }
}

impl Evaluator {
    fn rank_count(cards: Cards) -> [u8; 13] {
        cards
            .iter()
            .map(|c| c.rank())
            .map(|r| r as usize)
            .fold([0; 13], |mut counts, r| {
                counts[r] += 1;
                counts
            })
    }
    fn suit_count(cards: Cards) -> [u8; 4] {
        cards
            .iter()
            .map(|c| c.suit())
            .map(|s| s as usize)
            .fold([0; 4], |mut counts, s| {
                counts[s] += 1;
                counts
            })
    }
    fn suit_masks(cards: Cards) -> [u16; 4] {
        cards
            .iter()
            .map(|c| (c.suit(), c.rank()))
            .map(|(s, r)| (s as usize, u16::from(r)))
            .fold([0; 4], |mut suits, (s, r)| {
                suits[s] |= r;
                suits
            })
    }
    fn rank_masks(cards: Cards) -> u16 {
        cards
            .iter()
            .map(|c| c.rank())
            .map(u16::from)
            .fold(0, |acc, r| acc | r)
    }

    ///

    pub fn find_ranking(&self) -> Ranking {
        self.find_flush()
            .or_else(|| self.find_4_oak())
            .or_else(|| self.find_3_oak_2_oak())
            .or_else(|| self.find_straight())
            .or_else(|| self.find_3_oak())
            .or_else(|| self.find_2_oak_2_oak())
            .or_else(|| self.find_2_oak())
            .or_else(|| self.find_1_oak())
            .expect("at least one card in Hand")
    }
    pub fn find_kickers(&self, value: Ranking) -> Kickers {
        let n = value.n_kickers();
        if n == 0 {
            return Kickers::default();
        }
        let mask = match value {
            Ranking::Flush(hi) => {
                let suit = self.find_suit_of_flush().expect("flush has a suit");
                self.suit_masks[suit as usize] & !u16::from(hi)
            }
            Ranking::TwoPair(hi, lo) => self.rank_masks & !(u16::from(hi) | u16::from(lo)),
            value => self.rank_masks & !u16::from(value.primary()),
        };
        Kickers::from(Self::strongest(mask, n))
    }

    ///

    fn find_1_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(1).map(Ranking::HighCard)
    }
    fn find_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2).map(Ranking::OnePair)
    }
    fn find_3_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3).map(Ranking::ThreeOAK)
    }
    fn find_4_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(4).map(Ranking::FourOAK)
    }
    fn find_2_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2).and_then(|hi| {
            self.find_rank_of_n_oak_below(2, hi as usize)
                .map(|lo| Ranking::TwoPair(hi, lo))
                .or_else(|| Some(Ranking::OnePair(hi)))
        })
    }
    // the pair completing a full house may outrank the trips, so unlike
    // find_2_oak_2_oak this scans every rank except the trips themselves
    fn find_3_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3).and_then(|trips| {
            self.rank_count
                .iter()
                .enumerate()
                .rev()
                .filter(|(rank, _)| *rank != u8::from(trips) as usize)
                .find(|(_, &count)| count >= 2)
                .map(|(rank, _)| Ranking::FullHouse(trips, Rank::from(rank as u8)))
        })
    }
    fn find_straight(&self) -> Option<Ranking> {
        self.find_rank_of_straight(self.rank_masks)
            .map(Ranking::Straight)
    }
    fn find_flush(&self) -> Option<Ranking> {
        self.find_suit_of_flush().map(|suit| {
            let mask = self.suit_masks[suit as usize];
            match self.find_rank_of_straight(mask) {
                Some(rank) => Ranking::StraightFlush(rank),
                None => Ranking::Flush(Rank::from(mask)),
            }
        })
    }

    ///

    fn find_rank_of_straight(&self, ranks: u16) -> Option<Rank> {
        const WHEEL: u16 = 0b1_0000_0000_1111;
        let mut mask = ranks;
        mask &= mask << 1;
        mask &= mask << 1;
        mask &= mask << 1;
        mask &= mask << 1;
        if mask > 0 {
            Some(Rank::from(mask))
        } else if WHEEL == (WHEEL & ranks) {
            Some(Rank::Five)
        } else {
            None
        }
    }
    fn find_suit_of_flush(&self) -> Option<Suit> {
        self.suit_count
            .iter()
            .position(|&n| n >= 5)
            .map(|i| Suit::from(i as u8))
    }
    fn find_rank_of_n_oak_below(&self, n: u8, high: usize) -> Option<Rank> {
        self.rank_count
            .iter()
            .take(high)
            .rev()
            .position(|&r| r >= n)
            .map(|i| high - i - 1)
            .map(|r| Rank::from(r as u8))
    }
    fn find_rank_of_n_oak(&self, n: u8) -> Option<Rank> {
        self.find_rank_of_n_oak_below(n, 13)
    }

    /// the n strongest ranks of a mask, as a mask. stops early if the mask runs dry.
    fn strongest(ranks: u16, n: usize) -> u16 {
        let mut mask = ranks;
        let mut keep = 0;
        for _ in 0..n {
            if mask == 0 {
                break;
            }
            let bit = u16::from(Rank::from(mask));
            keep |= bit;
            mask &= !bit;
        }
        keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranking(s: &str) -> Ranking {
        Evaluator::from(Hand::try_from(s).unwrap()).find_ranking()
    }

    #[test]
    fn straight_flushes() {
        assert_eq!(
            ranking("Ts Js Qs Ks As 2h 3d"),
            Ranking::StraightFlush(Rank::Ace)
        );
        assert_eq!(ranking("Ac 2c 3c 4c 5c"), Ranking::StraightFlush(Rank::Five));
    }

    #[test]
    fn quads_beat_flushes() {
        assert_eq!(ranking("2c 2d 2h 2s Ac Kh Qd"), Ranking::FourOAK(Rank::Two));
    }

    #[test]
    fn full_house_pair_may_outrank_trips() {
        assert_eq!(
            ranking("5c 5d 5h Kc Kd"),
            Ranking::FullHouse(Rank::Five, Rank::King)
        );
    }

    #[test]
    fn two_trips_make_a_full_house() {
        assert_eq!(
            ranking("2c 2d 2h Kc Kd Kh 3s"),
            Ranking::FullHouse(Rank::King, Rank::Two)
        );
    }

    #[test]
    fn straights_beat_trips() {
        assert_eq!(ranking("2c 3d 4h 5s 6c 6d 6h"), Ranking::Straight(Rank::Six));
    }

    #[test]
    fn wheel_straight() {
        assert_eq!(ranking("Ac 2d 3h 4s 5c"), Ranking::Straight(Rank::Five));
    }

    #[test]
    fn flush_over_straight() {
        assert_eq!(ranking("2h 3h 4h 5h 7h 6c"), Ranking::Flush(Rank::Seven));
    }

    #[test]
    fn deck_boundaries() {
        assert_eq!(ranking("2c 2d 2h 2s 3c 3d 3h"), Ranking::FourOAK(Rank::Two));
        assert_eq!(ranking("Kd Kh Ks Ac Ad Ah As"), Ranking::FourOAK(Rank::Ace));
    }

    #[test]
    fn kickers_skip_used_ranks() {
        let evaluator = Evaluator::from(Hand::try_from("As Ah Kd Qc 2s").unwrap());
        let value = evaluator.find_ranking();
        assert_eq!(value, Ranking::OnePair(Rank::Ace));
        assert_eq!(
            evaluator.find_kickers(value),
            Kickers::from(u16::from(Rank::King) | u16::from(Rank::Queen) | u16::from(Rank::Two))
        );
    }

    #[test]
    fn quads_keep_one_kicker() {
        let evaluator = Evaluator::from(Hand::try_from("2c 2d 2h 2s Ah").unwrap());
        let value = evaluator.find_ranking();
        assert_eq!(value, Ranking::FourOAK(Rank::Two));
        assert_eq!(
            evaluator.find_kickers(value),
            Kickers::from(u16::from(Rank::Ace))
        );
        let evaluator = Evaluator::from(Hand::try_from("2c 2d 2h 2s Ac Kh Qd").unwrap());
        let value = evaluator.find_ranking();
        assert_eq!(value, Ranking::FourOAK(Rank::Two));
        assert_eq!(
            evaluator.find_kickers(value),
            Kickers::from(u16::from(Rank::Ace))
        );
    }

    #[test]
    fn six_card_flush_drops_its_weakest_card() {
        let evaluator = Evaluator::from(Hand::try_from("2h 4h 6h 8h Th Qh").unwrap());
        let value = evaluator.find_ranking();
        assert_eq!(value, Ranking::Flush(Rank::Queen));
        assert_eq!(
            evaluator.find_kickers(value),
            Kickers::from(
                u16::from(Rank::Ten)
                    | u16::from(Rank::Eight)
                    | u16::from(Rank::Six)
                    | u16::from(Rank::Four)
            )
        );
    }

    #[test]
    fn flush_kickers_come_from_the_flush_suit() {
        let evaluator = Evaluator::from(Hand::try_from("2h 4h 6h 8h Qh As").unwrap());
        let value = evaluator.find_ranking();
        assert_eq!(value, Ranking::Flush(Rank::Queen));
        assert_eq!(
            evaluator.find_kickers(value),
            Kickers::from(
                u16::from(Rank::Two)
                    | u16::from(Rank::Four)
                    | u16::from(Rank::Six)
                    | u16::from(Rank::Eight)
            )
        );
    }

    #[test]
    fn third_pair_kicks_two_pair() {
        let evaluator = Evaluator::from(Hand::try_from("As Ah Kd Kc Qs Qh 2d").unwrap());
        let value = evaluator.find_ranking();
        assert_eq!(value, Ranking::TwoPair(Rank::Ace, Rank::King));
        assert_eq!(
            evaluator.find_kickers(value),
            Kickers::from(u16::from(Rank::Queen))
        );
    }
}
