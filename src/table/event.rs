use super::player::PlayerId;
use super::status::Status;
use super::street::Street;
use crate::cards::CardSet;
use crate::Chips;

/// Spectator-visible updates, appended to the table's outbox in the
/// order the mutations occurred and drained by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum TableEvent {
    PlayerJoined {
        id: PlayerId,
        name: String,
        chips: Chips,
    },
    PlayerLeft {
        id: PlayerId,
    },
    BoardRevealed {
        cards: CardSet,
    },
    BoardCleared,
    PotCreated {
        index: usize,
        chips: Chips,
    },
    PotUpdated {
        index: usize,
        chips: Chips,
    },
    ChipsChanged {
        id: PlayerId,
        chips: Chips,
    },
    StatusChanged {
        id: PlayerId,
        status: Status,
    },
    NameChanged {
        id: PlayerId,
        name: String,
    },
    GameNameChanged {
        name: String,
    },
    StreetChanged {
        street: Street,
    },
    SettingsChanged {
        stakes: Chips,
        max_players: usize,
    },
    GameStatusChanged {
        paused: bool,
        public: bool,
    },
    RoundResolved {
        summary: String,
    },
}
