use super::status::Status;
use crate::cards::CardSet;
use crate::Chips;

pub type PlayerId = u64;

/// One seat's owned state: identity, stack, the chips committed this
/// street (stake) and this round (spent), hole cards, and status bits.
#[derive(Debug, Clone)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) name: String,
    pub(crate) chips: Chips,
    pub(crate) stake: Chips,
    pub(crate) spent: Chips,
    pub(crate) hole: CardSet,
    pub(crate) status: Status,
}

impl Player {
    pub fn new(id: PlayerId, name: String, chips: Chips) -> Self {
        let mut status = Status::default();
        status.set(Status::PLAYING);
        Self {
            id,
            name,
            chips,
            stake: 0,
            spent: 0,
            hole: CardSet::empty(),
            status,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn chips(&self) -> Chips {
        self.chips
    }
    pub fn status(&self) -> Status {
        self.status
    }

    /// dealt into the current round and not yet folded
    pub fn is_live(&self) -> bool {
        self.status.has(Status::PLAYING) && !self.status.has(Status::FOLDED)
    }
    /// may still be asked to act this street
    pub fn can_act(&self) -> bool {
        self.is_live() && !self.status.has(Status::ALL_IN)
    }
}

/// Defensive copy of a seat for external readers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub chips: Chips,
    pub stake: Chips,
    pub spent: Chips,
    pub hole: CardSet,
    pub status: Status,
}

impl From<&Player> for PlayerView {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            chips: p.chips,
            stake: p.stake,
            spent: p.spent,
            hole: p.hole,
            status: p.status,
        }
    }
}
