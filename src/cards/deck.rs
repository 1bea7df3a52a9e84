use super::card::Card;
use super::set::CardSet;
use rand::Rng;

/// Deck extends CardSet with the ability to deal cards out of itself.
/// Drawing picks uniformly among the remaining cards, which is
/// equivalent to dealing off the top of a freshly shuffled deck.
#[derive(Debug, Clone, Copy)]
pub struct Deck(CardSet);

impl From<Deck> for CardSet {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}
impl From<CardSet> for Deck {
    fn from(set: CardSet) -> Self {
        Self(set)
    }
}

impl Deck {
    pub fn new() -> Self {
        Self(CardSet::deck())
    }

    pub fn size(&self) -> usize {
        self.0.size()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0.contains(card)
    }

    /// remove a specific card from the deck
    pub fn remove(&mut self, card: Card) {
        self.0.remove(card);
    }

    /// deal a random remaining card
    pub fn draw(&mut self, rng: &mut impl Rng) -> Card {
        assert!(self.size() > 0);
        let i = rng.random_range(0..self.size());
        let card = self.0.into_iter().nth(i).expect("index within deck");
        self.remove(card);
        card
    }

    /// deal n cards as a set
    pub fn deal(&mut self, n: usize, rng: &mut impl Rng) -> CardSet {
        (0..n)
            .map(|_| self.draw(rng))
            .fold(CardSet::empty(), |set, card| {
                set | CardSet::from(u64::from(card))
            })
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
