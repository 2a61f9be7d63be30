use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kicks::Kickers;
use super::ranking::Ranking;

/// A hand's strength.
///
/// This will always be constructed from a Hand, which comes out of its
/// sorted representation order-insensitive. The strength is determined by
/// the Hand's value, and the kicker cards are used to break ties.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    value: Ranking,
    kicks: Kickers,
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        Self::from(Evaluator::from(hand))
    }
}

impl From<Evaluator> for Strength {
    fn from(evaluator: Evaluator) -> Self {
        let value = evaluator.find_ranking();
        let kicks = evaluator.find_kickers(value);
        Self::from((value, kicks))
    }
}

impl From<(Ranking, Kickers)> for Strength {
    fn from((value, kicks): (Ranking, Kickers)) -> Self {
        Self { value, kicks }
    }
}

/// packed u32 injection, monotone in Strength
/// xxxxxxx cccc pppp ssss kkkkkkkkkkkkk
/// category, primary rank, secondary rank, 13-bit kicker mask
impl From<Strength> for u32 {
    fn from(strength: Strength) -> Self {
        let category = strength.value.category() as u32;
        let primary = u8::from(strength.value.primary()) as u32;
        let secondary = u8::from(strength.value.secondary()) as u32;
        let kicks = u16::from(strength.kicks) as u32;
        category << 21 | primary << 17 | secondary << 13 | kicks
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18}{}", self.value, self.kicks)
    }
}
