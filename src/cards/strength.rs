use super::category::Category;
use super::evaluator::Evaluator;
use super::kicks::Kickers;
use super::set::CardSet;

/// A classified hand: its category, the subset of cards that realizes
/// it, and the kicker ranks filling the category's free slots.
///
/// Ordering goes through a suit-blind key. The subset mask is folded
/// into per-rank card counts so two pairs of aces tie regardless of
/// suits, and a wheel drops its high-ace bits so it ranks below the
/// six-high straight.
#[derive(Debug, Clone, Copy)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Strength {
    category: Category,
    cards: CardSet,
    kicks: Kickers,
}

impl Strength {
    pub fn category(&self) -> Category {
        self.category
    }
    pub fn cards(&self) -> CardSet {
        self.cards
    }
    pub fn kicks(&self) -> Kickers {
        self.kicks
    }

    fn key(&self) -> (Category, u64, Kickers) {
        let mut mask = u64::from(self.cards);
        let runs = matches!(self.category, Category::Straight | Category::StraightFlush);
        // a straight holding a Two is the wheel; its ace plays low
        if runs && mask & 0xF0 != 0 {
            mask &= !CardSet::HIGH_ACES;
        }
        (self.category, Self::fold_ranks(mask, runs), self.kicks)
    }

    /// collapse each rank block to its card count, or to bare presence
    /// for the run categories, where board duplicates must not break ties
    fn fold_ranks(mask: u64, presence: bool) -> u64 {
        (0..14u32).fold(0u64, |acc, block| {
            let n = (mask >> (block * 4) & 0xF).count_ones() as u64;
            let n = if presence { n.min(1) } else { n };
            acc | n << (block * 4)
        })
    }
}

impl From<CardSet> for Strength {
    fn from(set: CardSet) -> Self {
        let hand = Evaluator::from(set);
        let (category, cards) = hand.classify();
        let kicks = hand.kickers(category, cards);
        Self {
            category,
            cards,
            kicks,
        }
    }
}

impl Ord for Strength {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}
impl PartialOrd for Strength {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Strength {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
impl Eq for Strength {}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({}) {}", self.category, self.cards, self.kicks)
    }
}
