//! Per-match counters.
//!
//! Part of every history snapshot, so undo rewinds them together with the
//! board.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};

/// One seat's counters for the current match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTally {
    pub rolls: u32,
    pub moves: u32,
    /// Opponent pieces this seat sent home.
    pub captures: u32,
    /// Own pieces sent home by opponents.
    pub captured: u32,
    pub sixes: u32,
}

/// Match-wide counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStatistics {
    pub total_rolls: u32,
    pub total_moves: u32,
    pub total_captures: u32,
    pub sixes_rolled: u32,
    /// Clock time spent in the start phase and in play.
    pub elapsed_ms: u64,
    pub per_player: PlayerMap<PlayerTally>,
}

impl MatchStatistics {
    /// Zeroed counters for `player_count` seats.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            total_rolls: 0,
            total_moves: 0,
            total_captures: 0,
            sixes_rolled: 0,
            elapsed_ms: 0,
            per_player: PlayerMap::with_default(player_count),
        }
    }

    /// Count a settled roll.
    pub fn record_roll(&mut self, player: PlayerId, face: u8) {
        self.total_rolls += 1;
        let six = face == 6;
        if six {
            self.sixes_rolled += 1;
        }
        if let Some(tally) = self.per_player.get_mut(player) {
            tally.rolls += 1;
            if six {
                tally.sixes += 1;
            }
        }
    }

    /// Count an executed move.
    pub fn record_move(&mut self, player: PlayerId) {
        self.total_moves += 1;
        if let Some(tally) = self.per_player.get_mut(player) {
            tally.moves += 1;
        }
    }

    /// Count a capture of `victim` by `by`.
    pub fn record_capture(&mut self, by: PlayerId, victim: PlayerId) {
        self.total_captures += 1;
        if let Some(tally) = self.per_player.get_mut(by) {
            tally.captures += 1;
        }
        if let Some(tally) = self.per_player.get_mut(victim) {
            tally.captured += 1;
        }
    }

    /// Elapsed whole seconds.
    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms / 1000
    }

    /// `mm:ss`, or `h:mm:ss` past the hour.
    #[must_use]
    pub fn formatted_elapsed(&self) -> String {
        format_clock(self.elapsed_secs())
    }
}

/// Render seconds as a game clock.
#[must_use]
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}
