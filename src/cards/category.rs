/// The ten standard hand categories, ranked 1..=10.
///
/// Comparison between equal categories is carried by the classified
/// subset mask and, for the categories with free card slots, by the
/// kicker ranks left outside the subset.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub const fn rank(&self) -> u8 {
        *self as u8
    }

    /// how many free card slots the category leaves in a 5-card hand
    pub const fn n_kickers(&self) -> usize {
        match self {
            Category::HighCard => 4,
            Category::OnePair => 3,
            Category::ThreeOfAKind => 2,
            Category::TwoPair | Category::FourOfAKind => 1,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Category::HighCard => write!(f, "HighCard"),
            Category::OnePair => write!(f, "OnePair"),
            Category::TwoPair => write!(f, "TwoPair"),
            Category::ThreeOfAKind => write!(f, "ThreeOfAKind"),
            Category::Straight => write!(f, "Straight"),
            Category::Flush => write!(f, "Flush"),
            Category::FullHouse => write!(f, "FullHouse"),
            Category::FourOfAKind => write!(f, "FourOfAKind"),
            Category::StraightFlush => write!(f, "StraightFlush"),
            Category::RoyalFlush => write!(f, "RoyalFlush"),
        }
    }
}
