/// The betting rounds of a hand. Idle is both the initial state and the
/// post-showdown state; a table only leaves Idle through a fresh deal.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Street {
    #[default]
    Idle = 0,
    Pref = 1,
    Flop = 2,
    Turn = 3,
    Rive = 4,
}

impl Street {
    pub const fn next(&self) -> Self {
        match self {
            Self::Idle => Self::Pref,
            Self::Pref => Self::Flop,
            Self::Flop => Self::Turn,
            Self::Turn => Self::Rive,
            Self::Rive => Self::Idle,
        }
    }
    /// board cards revealed on entering this street
    pub const fn n_revealed(&self) -> usize {
        match self {
            Self::Flop => 3,
            Self::Turn | Self::Rive => 1,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Pref => write!(f, "preflop"),
            Self::Flop => write!(f, "flop"),
            Self::Turn => write!(f, "turn"),
            Self::Rive => write!(f, "river"),
        }
    }
}
