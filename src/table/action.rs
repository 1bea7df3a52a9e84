use super::player::PlayerId;
use crate::Chips;
use colored::*;

/// An inbound move request: a bitmask of move types plus an optional
/// chip amount (meaningful for bets only). Requests may batch several
/// bits; precedence resolves which one applies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct MoveRequest {
    pub mask: u64,
    pub amount: Option<Chips>,
}

impl MoveRequest {
    pub const CHECK: u64 = 1 << 0;
    pub const FOLD: u64 = 1 << 1;
    pub const CALL: u64 = 1 << 2;
    pub const CALL_ANY: u64 = 1 << 3;
    pub const BET: u64 = 1 << 4;
    pub const SITOUT: u64 = 1 << 5;

    /// precedence order, highest first; encoded by bit value
    pub const PRECEDENCE: [u64; 5] = [
        Self::CHECK,
        Self::FOLD,
        Self::CALL,
        Self::CALL_ANY,
        Self::BET,
    ];

    pub fn of(mask: u64) -> Self {
        Self { mask, amount: None }
    }
    pub fn bet(amount: Chips) -> Self {
        Self {
            mask: Self::BET,
            amount: Some(amount),
        }
    }
    pub fn wants(&self, bit: u64) -> bool {
        self.mask & bit != 0
    }
    /// the null move
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }
    /// fold with a chip-committing bit, or check with a bet,
    /// is nonsense rather than a batch
    pub fn is_conflicted(&self) -> bool {
        (self.wants(Self::FOLD) && self.mask & (Self::CALL | Self::CALL_ANY | Self::BET) != 0)
            || (self.wants(Self::CHECK) && self.wants(Self::BET))
    }
}

/// A resolved move, for logging and event narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Check(PlayerId),
    Fold(PlayerId),
    Call(PlayerId, Chips),
    Blind(PlayerId, Chips),
    Raise(PlayerId, Chips),
    Shove(PlayerId, Chips),
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Check(id) => write!(f, "{id} {}", "CHECK".cyan()),
            Action::Fold(id) => write!(f, "{id} {}", "FOLD".red()),
            Action::Blind(id, amount) => write!(f, "{id} {}", format!("BLIND {}", amount).white()),
            Action::Call(id, amount) => write!(f, "{id} {}", format!("CALL  {}", amount).yellow()),
            Action::Raise(id, amount) => write!(f, "{id} {}", format!("RAISE {}", amount).green()),
            Action::Shove(id, amount) => {
                write!(f, "{id} {}", format!("SHOVE {}", amount).magenta())
            }
        }
    }
}
