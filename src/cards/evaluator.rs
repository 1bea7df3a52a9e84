use super::card::Card;
use super::category::Category;
use super::kicks::Kickers;
use super::set::CardSet;
use super::suit::Suit;

/// Classifies a set of cards into its best 5-card category.
///
/// Each detector returns the canonical subset mask that realizes the
/// category, so equal categories can be compared by the masks alone.
/// Detectors lean on the two-bit ace encoding: the ace-low sentinel
/// block makes the wheel fall out of the ordinary straight scan, and
/// every subset we hand back is re-paired so an ace never escapes as a
/// half card.
pub struct Evaluator(CardSet);

impl From<CardSet> for Evaluator {
    fn from(set: CardSet) -> Self {
        Self(set)
    }
}

impl Evaluator {
    pub fn classify(&self) -> (Category, CardSet) {
        None.or_else(|| self.find_royal_flush().map(|s| (Category::RoyalFlush, s)))
            .or_else(|| self.find_straight_flush().map(|s| (Category::StraightFlush, s)))
            .or_else(|| self.find_quads().map(|s| (Category::FourOfAKind, s)))
            .or_else(|| self.find_full_house().map(|s| (Category::FullHouse, s)))
            .or_else(|| self.find_flush().map(|s| (Category::Flush, s)))
            .or_else(|| self.find_straight().map(|s| (Category::Straight, s)))
            .or_else(|| self.find_trips().map(|s| (Category::ThreeOfAKind, s)))
            .or_else(|| self.find_two_pair().map(|s| (Category::TwoPair, s)))
            .or_else(|| self.find_pair().map(|s| (Category::OnePair, s)))
            .or_else(|| self.find_high_card().map(|s| (Category::HighCard, s)))
            .expect("at least one card")
    }

    /// the best ranks outside the classified subset,
    /// as many as the category leaves room for
    pub fn kickers(&self, category: Category, subset: CardSet) -> Kickers {
        let mut live = u16::from(self.0.minus(subset));
        let mut kicks = 0u16;
        for _ in 0..category.n_kickers() {
            if live == 0 {
                break;
            }
            let top = 15 - live.leading_zeros();
            kicks |= 1 << top;
            live &= !(1 << top);
        }
        Kickers::from(kicks)
    }

    fn find_royal_flush(&self) -> Option<CardSet> {
        Suit::all()
            .iter()
            .rev()
            .map(|suit| CardSet::royal(*suit))
            .find(|royal| self.0 & *royal == *royal)
    }

    fn find_straight_flush(&self) -> Option<CardSet> {
        Suit::all()
            .iter()
            .rev()
            .find_map(|suit| Self::seek_straight(u64::from(self.0.of(*suit))))
            .map(|mask| CardSet::from(mask).with_aces_paired())
    }

    fn find_quads(&self) -> Option<CardSet> {
        Self::seek_of_a_kind(u64::from(self.0), 4)
    }

    /// top trips plus the top pair; a second trips stands in
    /// when no plain pair exists
    fn find_full_house(&self) -> Option<CardSet> {
        self.find_trips().and_then(|trips| {
            let rest = u64::from(self.0.minus(trips));
            Self::seek_of_a_kind(rest, 2)
                .or_else(|| Self::seek_of_a_kind(rest, 3))
                .map(|pair| trips | pair)
        })
    }

    /// the top five cards of a suit holding five or more
    fn find_flush(&self) -> Option<CardSet> {
        Suit::all()
            .iter()
            .rev()
            .map(|suit| self.0.of(*suit))
            .find(|suited| suited.size() >= 5)
            .map(|suited| {
                let cards = Vec::<Card>::from(suited);
                CardSet::from(cards.into_iter().rev().take(5).collect::<Vec<Card>>())
            })
    }

    fn find_straight(&self) -> Option<CardSet> {
        Self::seek_straight(u64::from(self.0)).map(|mask| CardSet::from(mask).with_aces_paired())
    }

    fn find_trips(&self) -> Option<CardSet> {
        Self::seek_of_a_kind(u64::from(self.0), 3)
    }

    fn find_two_pair(&self) -> Option<CardSet> {
        self.find_pair().and_then(|high| {
            Self::seek_of_a_kind(u64::from(self.0.minus(high)), 2).map(|low| high | low)
        })
    }

    fn find_pair(&self) -> Option<CardSet> {
        Self::seek_of_a_kind(u64::from(self.0), 2)
    }

    fn find_high_card(&self) -> Option<CardSet> {
        match u64::from(self.0) & !CardSet::LOW_ACES {
            0 => None,
            live => {
                let card = Card::from(1u64 << (63 - live.leading_zeros()));
                Some(CardSet::from(u64::from(card)))
            }
        }
    }

    /// the highest rank block holding exactly n suits,
    /// in its canonical two-block ace form when the rank is the ace
    fn seek_of_a_kind(set: u64, n: u32) -> Option<CardSet> {
        (1..14u32)
            .rev()
            .find(|block| (set >> (block * 4) & 0xF).count_ones() == n)
            .map(|block| match block {
                13 => CardSet::from(set & CardSet::ACES),
                block => CardSet::from(set & (0xF << (block * 4))),
            })
    }

    /// scan blocks high to low for a run of five occupied blocks,
    /// returning the window of cards that realizes the highest run.
    /// every gap truncates the working set so stale high bits can
    /// never leak into a lower window.
    fn seek_straight(mask: u64) -> Option<u64> {
        let mut set = mask;
        let mut run = 0u32;
        for block in (0..14u32).rev() {
            let low = 1u64 << (block * 4);
            if set >> (block * 4) & 0xF == 0 {
                run = 0;
                set &= (low << 4) - 1;
            } else {
                run += 1;
                if run == 5 {
                    return Some(set & !(low - 1));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(s: &str) -> (Category, CardSet) {
        Evaluator::from(CardSet::from(s)).classify()
    }

    #[test]
    fn royal_flush() {
        let (category, subset) = classify("10S JS QS KS AS 2C 3D");
        assert_eq!(category, Category::RoyalFlush);
        assert_eq!(subset, CardSet::royal(Suit::Spade));
    }

    #[test]
    fn straight_flush_is_exactly_five() {
        let (category, subset) = classify("5H 6H 7H 8H 9H KD AC");
        assert_eq!(category, Category::StraightFlush);
        assert_eq!(subset, CardSet::from("5H 6H 7H 8H 9H"));
    }

    #[test]
    fn straight_flush_breaks_on_removal() {
        let (category, _) = classify("5H 6H 7H 8H KD AC 2S");
        assert_ne!(category, Category::StraightFlush);
        assert_ne!(category, Category::Flush);
    }

    #[test]
    fn steel_wheel() {
        let (category, subset) = classify("AH 2H 3H 4H 5H 9C 9D");
        assert_eq!(category, Category::StraightFlush);
        assert_eq!(subset.size(), 5);
        assert!(subset.contains(Card::from("AH")));
        assert!(subset.contains(Card::from("5H")));
    }

    #[test]
    fn quads() {
        let (category, subset) = classify("9C 9D 9H 9S AC 2D 3H");
        assert_eq!(category, Category::FourOfAKind);
        assert_eq!(subset, CardSet::from("9C 9D 9H 9S"));
    }

    #[test]
    fn quad_aces_are_canonical() {
        let (category, subset) = classify("AC AD AH AS KC 2D 3H");
        assert_eq!(category, Category::FourOfAKind);
        assert_eq!(subset, CardSet::from("AC AD AH AS"));
        assert_eq!(subset.size(), 4);
    }

    #[test]
    fn full_house() {
        let (category, subset) = classify("KC KD KH 2C 2D 9H 10S");
        assert_eq!(category, Category::FullHouse);
        assert_eq!(subset, CardSet::from("KC KD KH 2C 2D"));
    }

    #[test]
    fn quads_are_not_a_full_house() {
        let (category, _) = classify("KC KD KH KS 2C 2D 3H");
        assert_eq!(category, Category::FourOfAKind);
        let hand = Evaluator::from(CardSet::from("KC KD KH KS 2C 2D 3H"));
        assert_eq!(hand.find_full_house(), None);
    }

    #[test]
    fn flush_counts_the_ace_once() {
        // five physical hearts, one of them an ace
        let (category, subset) = classify("2H 5H 8H JH AH 3C 4D");
        assert_eq!(category, Category::Flush);
        assert_eq!(subset.size(), 5);
        // four physical hearts is no flush, ace bits notwithstanding
        let (category, _) = classify("AH 2H 3H 4H 9C 9D 9S");
        assert_eq!(category, Category::ThreeOfAKind);
    }

    #[test]
    fn straight_ignores_ranks_above_a_gap() {
        let (category, subset) = classify("2C 3D 4H 5S 6C AH KH");
        assert_eq!(category, Category::Straight);
        assert_eq!(subset, CardSet::from("2C 3D 4H 5S 6C"));
    }

    #[test]
    fn wheel() {
        let (category, subset) = classify("AC 2D 3H 4S 5C 9D 10H");
        assert_eq!(category, Category::Straight);
        assert_eq!(subset.size(), 5);
        assert!(subset.contains(Card::from("AC")));
    }

    #[test]
    fn broadway() {
        let (category, subset) = classify("10C JD QH KS AC 2D 2H");
        assert_eq!(category, Category::Straight);
        assert_eq!(subset.size(), 5);
        assert!(subset.contains(Card::from("AC")));
        assert!(subset.contains(Card::from("10C")));
    }

    #[test]
    fn two_pair_takes_the_top_two() {
        let (category, subset) = classify("9C 9D 5H 5S 2C 2D AH");
        assert_eq!(category, Category::TwoPair);
        assert_eq!(subset, CardSet::from("9C 9D 5H 5S"));
    }

    #[test]
    fn pair_and_high_card() {
        let (category, subset) = classify("9C 9D 5H 4S 2C QD AH");
        assert_eq!(category, Category::OnePair);
        assert_eq!(subset, CardSet::from("9C 9D"));
        let (category, subset) = classify("9C 8D 5H 4S 2C QD AH");
        assert_eq!(category, Category::HighCard);
        assert_eq!(subset, CardSet::from("AH"));
    }

    #[test]
    fn kickers_fill_the_free_slots() {
        let hand = Evaluator::from(CardSet::from("9C 9D 5H 5S 2C 2D AH"));
        let (category, subset) = hand.classify();
        let kicks = hand.kickers(category, subset);
        assert_eq!(u16::from(kicks), 1 << 12);

        let hand = Evaluator::from(CardSet::from("9C 9D 5H 4S 2C QD AH"));
        let (category, subset) = hand.classify();
        let kicks = hand.kickers(category, subset);
        assert_eq!(u16::from(kicks), (1 << 12) | (1 << 10) | (1 << 3));
    }
}
