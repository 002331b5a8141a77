//! Match configuration.
//!
//! A `MatchConfig` says who sits down, how the dice are seeded, how long
//! the settle delays around rolls and handoffs last, and how deep the undo
//! history goes. It is validated once when the game is built.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::{Color, MAX_PLAYERS, MIN_PLAYERS};

/// Default number of retained history entries.
pub const DEFAULT_HISTORY_DEPTH: usize = 20;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("player count {0} outside 2-4")]
    PlayerCount(usize),
    #[error("{names} names given for {players} players")]
    NameCount { names: usize, players: usize },
    #[error("player name at seat {0} is blank")]
    BlankName(usize),
    #[error("history depth must be at least 1")]
    HistoryDepth,
}

/// Delays around dice rolls and turn handoffs.
///
/// While any of these is running the game is busy and refuses new rolls
/// and moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    /// Between requesting a roll and the face being known.
    pub roll_settle: Duration,
    /// Between a forfeited turn and the next player's turn.
    pub handoff: Duration,
    /// Between the last start-phase roll and play opening.
    pub start_reveal: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            roll_settle: Duration::from_millis(800),
            handoff: Duration::from_millis(1500),
            start_reveal: Duration::from_millis(2000),
        }
    }
}

impl Timing {
    /// No delays; follow-ups still run through the scheduler.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            roll_settle: Duration::ZERO,
            handoff: Duration::ZERO,
            start_reveal: Duration::ZERO,
        }
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Seated players (2-4).
    pub player_count: usize,

    /// One display name per seat.
    pub names: Vec<String>,

    /// Seed for the default die.
    pub seed: u64,

    /// Settle delays.
    pub timing: Timing,

    /// Maximum retained undo entries.
    pub history_depth: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(MAX_PLAYERS)
    }
}

impl MatchConfig {
    /// Config for `player_count` seats with default names.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            names: default_names(player_count),
            seed: 42,
            timing: Timing::default(),
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }

    /// Set display names, one per seat.
    #[must_use]
    pub fn with_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the dice seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set settle delays.
    #[must_use]
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Set the undo depth.
    #[must_use]
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        self
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.names.len() != self.player_count {
            return Err(ConfigError::NameCount {
                names: self.names.len(),
                players: self.player_count,
            });
        }
        if let Some(seat) = self.names.iter().position(|n| n.trim().is_empty()) {
            return Err(ConfigError::BlankName(seat));
        }
        if self.history_depth == 0 {
            return Err(ConfigError::HistoryDepth);
        }
        Ok(())
    }
}

fn default_names(player_count: usize) -> Vec<String> {
    Color::seating(player_count)
        .iter()
        .enumerate()
        .map(|(seat, color)| format!("Player {} ({})", seat + 1, color))
        .collect()
}
