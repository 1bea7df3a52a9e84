use super::player::PlayerId;
use crate::Chips;

/// One pot: its chip total, whether it still accepts bets, and the
/// players eligible to win it, in seating order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Pot {
    pub chips: Chips,
    pub open: bool,
    pub eligible: Vec<PlayerId>,
}

/// One player's standing in the round, as the ledger sees it.
#[derive(Debug, Clone, Copy)]
pub struct Contribution {
    pub id: PlayerId,
    pub spent: Chips,
    pub folded: bool,
    pub capped: bool,
}

/// The round's pots, rebuilt deterministically from per-player
/// contributions after every chip movement.
///
/// Every distinct all-in total below the table maximum is a layer
/// boundary; the span below the first boundary is the main pot, each
/// span above it a side pot with strictly narrower eligibility. Chips
/// forfeited by players who left mid-round stay in the ledger as
/// ghost contributions, payable but claimable by no one.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pots: Vec<Pot>,
    ghosts: Vec<Chips>,
}

impl Ledger {
    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }
    pub fn total(&self) -> Chips {
        self.pots.iter().map(|p| p.chips).sum()
    }

    /// a departing player's round contribution stays in play
    pub fn forfeit(&mut self, spent: Chips) {
        if spent > 0 {
            self.ghosts.push(spent);
        }
    }

    pub fn reset(&mut self) {
        self.pots.clear();
        self.ghosts.clear();
    }

    pub fn rebuild(&mut self, contributions: &[Contribution]) {
        let ceiling = contributions
            .iter()
            .map(|c| c.spent)
            .chain(self.ghosts.iter().copied())
            .max()
            .unwrap_or(0);
        let mut bounds: Vec<Chips> = contributions
            .iter()
            .filter(|c| c.capped && !c.folded)
            .map(|c| c.spent)
            .filter(|spent| *spent > 0 && *spent < ceiling)
            .collect();
        bounds.sort_unstable();
        bounds.dedup();
        bounds.push(Chips::MAX);

        let mut lo = 0;
        self.pots = bounds
            .into_iter()
            .map(|hi| {
                let slice = |spent: Chips| spent.min(hi) - spent.min(lo);
                let chips = contributions
                    .iter()
                    .map(|c| slice(c.spent))
                    .chain(self.ghosts.iter().map(|g| slice(*g)))
                    .sum();
                let eligible = contributions
                    .iter()
                    .filter(|c| !c.folded)
                    .filter(|c| lo == 0 || c.spent > lo)
                    .map(|c| c.id)
                    .collect();
                lo = hi;
                Pot {
                    chips,
                    open: false,
                    eligible,
                }
            })
            .collect();
        if let Some(top) = self.pots.last_mut() {
            top.open = true;
        }
    }
}
