use super::card::Card;
use super::rank::Rank;
use super::suit::Suit;

/// CardSet is an unordered set of cards packed into a single u64.
///
/// The low 56 bits are 14 contiguous 4-bit rank blocks, ordered
/// {ace-low, 2, 3, .., 10, J, Q, K, ace-high}; within a block the bits
/// are suits {C, D, H, S}. Every physical ace sets two bits, one in each
/// ace block, so one logical ace participates in the wheel and in
/// broadway/flush detection with no special cases. The 8 bits above the
/// deck are unused, reserved for future card types.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CardSet(u64);

impl CardSet {
    pub const EMPTY: Self = Self(0);

    /// the ace-low sentinel block
    pub(crate) const LOW_ACES: u64 = 0xF;
    /// the ace-high block
    pub(crate) const HIGH_ACES: u64 = 0xF << 52;
    /// both ace blocks
    pub(crate) const ACES: u64 = Self::LOW_ACES | Self::HIGH_ACES;

    pub fn empty() -> Self {
        Self(0)
    }

    /// all 52 cards, every ace in its canonical two-bit form
    pub fn deck() -> Self {
        Self(Self::mask())
    }

    pub const fn mask() -> u64 {
        0x00FF_FFFF_FFFF_FFFF
    }

    /// the five ranks 10..A of one suit; a royal flush
    pub fn royal(suit: Suit) -> Self {
        let ranks = u64::from(Rank::Ten)
            | u64::from(Rank::Jack)
            | u64::from(Rank::Queen)
            | u64::from(Rank::King)
            | u64::from(Rank::Ace);
        Self(ranks & u64::from(suit))
    }

    /// physical cardinality; each ace counts once
    pub fn size(&self) -> usize {
        (self.0 & !Self::LOW_ACES).count_ones() as usize
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
    pub fn contains(&self, card: Card) -> bool {
        let bits = u64::from(card);
        self.0 & bits == bits
    }
    pub fn insert(&mut self, card: Card) {
        self.0 |= u64::from(card);
    }
    pub fn remove(&mut self, card: Card) {
        self.0 &= !u64::from(card);
    }

    /// set difference
    pub fn minus(&self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// the cards of one suit
    pub fn of(&self, suit: Suit) -> Self {
        Self(self.0 & u64::from(suit))
    }

    /// true iff the mask is exactly one card: a power of two, or the
    /// canonical two-bit form of a single ace
    pub fn is_single(&self) -> bool {
        if self.0 > 0 && self.0 & (self.0 - 1) == 0 {
            return true;
        }
        let low = self.0 & Self::LOW_ACES;
        self.0 & Self::ACES == self.0 && low.count_ones() == 1 && self.0 >> 52 == low
    }

    /// restore the canonical pairing of ace bits: any ace-high bit gains
    /// its ace-low twin and vice versa. detectors that slice windows out
    /// of a set use this so an ace reads as exactly one card either way.
    pub(crate) fn with_aces_paired(self) -> Self {
        let aces = (self.0 & Self::LOW_ACES) | (self.0 >> 52 & Self::LOW_ACES);
        Self(self.0 | aces | aces << 52)
    }
}

impl std::ops::BitOr for CardSet {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
impl std::ops::BitOrAssign for CardSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
impl std::ops::BitAnd for CardSet {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// we can empty a set from low to high rank,
/// yielding each ace once from its high block
impl Iterator for CardSet {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        let live = self.0 & !Self::LOW_ACES;
        if live == 0 {
            None
        } else {
            let card = Card::from(1u64 << live.trailing_zeros());
            self.remove(card);
            Some(card)
        }
    }
}

/// u64 isomorphism
impl From<u64> for CardSet {
    fn from(n: u64) -> Self {
        Self(n & Self::mask())
    }
}
impl From<CardSet> for u64 {
    fn from(s: CardSet) -> Self {
        s.0
    }
}

/// one-way conversion to a 13-bit rank mask; each ace counts once
impl From<CardSet> for u16 {
    fn from(s: CardSet) -> Self {
        (0..13u8)
            .filter(|r| s.0 & u64::from(Rank::from(*r)) != 0)
            .fold(0u16, |bits, r| bits | 1 << r)
    }
}

/// Vec<Card> isomorphism (up to permutation, this always comes out sorted)
impl From<CardSet> for Vec<Card> {
    fn from(s: CardSet) -> Self {
        s.into_iter().collect()
    }
}
impl From<Vec<Card>> for CardSet {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards.into_iter().map(u64::from).fold(0u64, |a, b| a | b))
    }
}

/// str isomorphism
/// space-separated tokens, e.g. "2D 10C AS"
impl From<&str> for CardSet {
    fn from(s: &str) -> Self {
        Self::from(s.split_whitespace().map(Card::from).collect::<Vec<Card>>())
    }
}

impl std::fmt::Display for CardSet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut sep = "";
        for card in *self {
            write!(f, "{}{}", sep, card)?;
            sep = " ";
        }
        Ok(())
    }
}
