use super::error::{Result, TableError};
use crate::Chips;
use crate::{DEFAULT_MAX_PLAYERS, DEFAULT_STAKES, DEFAULT_STAKES_MULTIPLIER};

/// Table configuration. Admin-adjustable between rounds only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Settings {
    pub name: String,
    pub stakes: Chips,
    pub max_players: usize,
    pub multiplier: Chips,
    pub public: bool,
}

impl Settings {
    /// chips granted to a joining player
    pub fn starting_chips(&self) -> Result<Chips> {
        self.stakes
            .checked_mul(self.multiplier)
            .ok_or(TableError::Overflow)
    }

    pub fn validate(&self) -> Result<()> {
        if self.stakes == 0 {
            return Err(TableError::InvalidRequest("stakes must be positive".into()));
        }
        if self.max_players < 2 {
            return Err(TableError::InvalidRequest(
                "a table needs room for two players".into(),
            ));
        }
        // a full ring draws 2 holes per seat plus 5 board cards from one deck
        if self.max_players * 2 + 5 > 52 {
            return Err(TableError::InvalidRequest(
                "too many seats for one deck".into(),
            ));
        }
        self.starting_chips().map(|_| ())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: String::new(),
            stakes: DEFAULT_STAKES,
            max_players: DEFAULT_MAX_PLAYERS,
            multiplier: DEFAULT_STAKES_MULTIPLIER,
            public: true,
        }
    }
}
