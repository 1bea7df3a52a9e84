use super::player::PlayerId;
use super::pot::Pot;
use crate::cards::Strength;
use crate::Chips;

/// One contender at showdown, in seating order.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: PlayerId,
    pub name: String,
    pub strength: Strength,
}

/// Pays each pot independently to the strongest eligible entries,
/// splitting evenly with the remainder assigned one chip at a time in
/// seating order.
#[derive(Debug, Clone)]
pub struct Showdown {
    entries: Vec<Entry>,
}

impl From<Vec<Entry>> for Showdown {
    fn from(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl Showdown {
    /// (per-player payouts in seating order, human-readable summary)
    pub fn settle(&self, pots: &[Pot]) -> (Vec<(PlayerId, Chips)>, String) {
        let mut payouts: Vec<(PlayerId, Chips)> =
            self.entries.iter().map(|e| (e.id, 0)).collect();
        let mut lines = Vec::new();
        for (index, pot) in pots.iter().enumerate().filter(|(_, p)| p.chips > 0) {
            let contenders: Vec<&Entry> = self
                .entries
                .iter()
                .filter(|e| pot.eligible.contains(&e.id))
                .collect();
            let best = match contenders.iter().map(|e| e.strength).max() {
                Some(best) => best,
                None => continue,
            };
            let winners: Vec<&Entry> = contenders
                .into_iter()
                .filter(|e| e.strength == best)
                .collect();
            let share = pot.chips / winners.len() as Chips;
            let remainder = pot.chips as usize % winners.len();
            for (i, winner) in winners.iter().enumerate() {
                let reward = share + if i < remainder { 1 } else { 0 };
                if let Some(payout) = payouts.iter_mut().find(|(id, _)| *id == winner.id) {
                    payout.1 += reward;
                }
                lines.push(format!(
                    "{} wins {} from pot {} with {}",
                    winner.name, reward, index, winner.strength
                ));
            }
        }
        (payouts, lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardSet;

    fn entry(id: PlayerId, name: &str, cards: &str) -> Entry {
        Entry {
            id,
            name: name.to_string(),
            strength: Strength::from(CardSet::from(cards)),
        }
    }

    #[test]
    fn three_way_tie_splits_with_seat_order_remainder() {
        let board = "2C 7D 9H JS QC";
        let showdown = Showdown::from(vec![
            entry(1, "a", &format!("{} AC KD", board)),
            entry(2, "b", &format!("{} AD KH", board)),
            entry(3, "c", &format!("{} AH KS", board)),
        ]);
        let pot = Pot {
            chips: 100,
            open: true,
            eligible: vec![1, 2, 3],
        };
        let (payouts, _) = showdown.settle(&[pot]);
        assert_eq!(payouts, vec![(1, 34), (2, 33), (3, 33)]);
    }

    #[test]
    fn side_pot_winner_may_differ() {
        // seat 1 has the best hand but is only in the main pot
        let showdown = Showdown::from(vec![
            entry(1, "a", "AC AD AH 9S 2C 3D 4H"),
            entry(2, "b", "KC KD 9H 9S 2C 3D 4H"),
            entry(3, "c", "QC QD 9H 9S 2C 3D 4H"),
        ]);
        let main = Pot {
            chips: 90,
            open: false,
            eligible: vec![1, 2, 3],
        };
        let side = Pot {
            chips: 60,
            open: true,
            eligible: vec![2, 3],
        };
        let (payouts, summary) = showdown.settle(&[main, side]);
        assert_eq!(payouts, vec![(1, 90), (2, 60), (3, 0)]);
        assert!(summary.contains("a wins 90"));
        assert!(summary.contains("b wins 60"));
    }
}
