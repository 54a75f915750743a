//! Per-run player data read by the HUD and written by the screens

/// Number of players taking turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerCount {
    #[default]
    One,
    Two,
}

impl PlayerCount {
    pub fn as_number(&self) -> u8 {
        match self {
            PlayerCount::One => 1,
            PlayerCount::Two => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(PlayerCount::One),
            2 => Some(PlayerCount::Two),
            _ => None,
        }
    }
}

/// Scores and player count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub player_count: PlayerCount,
    pub player1_score: u32,
    pub player2_score: u32,
    pub hi_score: u32,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
