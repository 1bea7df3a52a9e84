#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

/// u8 isomorphism
/// each card is mapped to its location in a sorted deck 0-51
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        u8::from(c.suit) + u8::from(c.rank) * 4
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

/// u64 isomorphism
/// each card is one bit in its rank block, except an ace,
/// whose canonical form is the pair of ace-low and ace-high bits
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        let suit = u8::from(c.suit);
        match c.rank {
            Rank::Ace => (1 << suit) | (1 << (52 + suit)),
            rank => 1 << (rank.block() * 4 + suit),
        }
    }
}
impl From<u64> for Card {
    fn from(n: u64) -> Self {
        let bit = n.trailing_zeros() as u8;
        let (block, suit) = (bit / 4, bit % 4);
        let rank = match block {
            0 | 13 => Rank::Ace,
            block => Rank::from(block - 1),
        };
        Self {
            rank,
            suit: Suit::from(suit),
        }
    }
}

/// str isomorphism
/// "<rank><suit>" with uppercase suits, e.g. "AS", "10C", "2D"
impl From<&str> for Card {
    fn from(s: &str) -> Self {
        let (rank, suit) = s.split_at(s.len() - 1);
        Self {
            rank: Rank::from(rank),
            suit: Suit::from(suit.chars().next().expect("suit char")),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

use super::rank::Rank;
use super::suit::Suit;
