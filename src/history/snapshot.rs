//! Snapshots and the save format.
//!
//! A `Snapshot` is the complete mutable state of a match: roster, pieces,
//! turn flags and statistics. Roster and pieces are persistent vectors, so
//! a snapshot shares every unchanged chunk with the live state and with
//! its neighbours in the history log.
//!
//! Saved bytes are a versioned bincode envelope holding a snapshot plus the
//! dice position. Player paths are not stored; they are rebuilt from the
//! roster on load. A decoded snapshot is checked before it may replace the
//! live state.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Occupancy, PIECES_PER_PLAYER};
use crate::core::{
    DiceRngState, GamePhase, PieceSet, Roster, TurnState, DIE_FACES, MAX_PLAYERS, MIN_PLAYERS,
    ROLLS_WHILE_ALL_HOME, ROLLS_WITH_PIECE_OUT,
};
use crate::stats::MatchStatistics;

/// Current save format.
pub const SAVE_FORMAT_VERSION: u32 = 1;

/// Save and load failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("failed to encode snapshot: {0}")]
    Encode(String),
    #[error("failed to decode snapshot: {0}")]
    Decode(String),
    #[error("save format {found} not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}

fn corrupt(reason: impl Into<String>) -> PersistenceError {
    PersistenceError::Corrupt(reason.into())
}

/// Full mutable state of a match at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub roster: Roster,
    pub pieces: PieceSet,
    pub turn: TurnState,
    pub stats: MatchStatistics,
}

impl Snapshot {
    /// Paths for this snapshot's roster.
    #[must_use]
    pub fn board(&self) -> Board {
        Board::for_roster(&self.roster)
    }

    /// Check every invariant a live match relies on.
    pub fn validate(&self) -> Result<(), PersistenceError> {
        let turn = &self.turn;
        let seats = self.roster.len();

        if seats == 0 {
            return if turn.phase == GamePhase::Selection && self.pieces.is_empty() {
                Ok(())
            } else {
                Err(corrupt("empty roster outside player selection"))
            };
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&seats) {
            return Err(corrupt(format!("{seats} seated players")));
        }

        let mut colors = FxHashSet::default();
        for (seat, player) in self.roster.iter().enumerate() {
            if player.id.index() != seat {
                return Err(corrupt(format!("{} stored at seat {seat}", player.id)));
            }
            if !colors.insert(player.color) {
                return Err(corrupt(format!("color {} seated twice", player.color)));
            }
            if player.name.trim().is_empty() {
                return Err(corrupt(format!("{} has a blank name", player.id)));
            }
        }

        let mut ids = FxHashSet::default();
        for piece in self.pieces.iter() {
            if piece.owner().index() >= seats || usize::from(piece.id.index) >= PIECES_PER_PLAYER {
                return Err(corrupt(format!("{} has no owner", piece.id)));
            }
            if !ids.insert(piece.id) {
                return Err(corrupt(format!("{} listed twice", piece.id)));
            }
        }
        if ids.len() != seats * PIECES_PER_PLAYER {
            return Err(corrupt(format!("{} pieces for {seats} players", ids.len())));
        }

        if let Some(conflict) = Occupancy::index(&self.board(), &self.pieces).conflicts().first() {
            return Err(corrupt(format!("{conflict:?}")));
        }

        if self.stats.per_player.player_count() != seats {
            return Err(corrupt("statistics do not match the roster"));
        }

        if turn.current.is_some_and(|p| p.index() >= seats) {
            return Err(corrupt("current player out of range"));
        }
        if turn.winner.is_some_and(|p| p.index() >= seats) {
            return Err(corrupt("winner out of range"));
        }
        if turn.dice.is_some_and(|d| !(1..=DIE_FACES).contains(&d)) {
            return Err(corrupt("die face out of range"));
        }
        if turn.rolls_this_turn > turn.max_rolls {
            return Err(corrupt("roll counter past its budget"));
        }
        if turn.phase == GamePhase::Playing {
            let active = self.roster.active().map(|p| p.id);
            if turn.current.is_none() || active != turn.current {
                return Err(corrupt("active player does not match the turn"));
            }
        }
        if let Some(player) = turn.current.filter(|_| turn.phase == GamePhase::Playing) {
            if ![ROLLS_WHILE_ALL_HOME, ROLLS_WITH_PIECE_OUT].contains(&turn.max_rolls) {
                return Err(corrupt(format!("roll budget {}", turn.max_rolls)));
            }
            if turn.max_rolls == ROLLS_WITH_PIECE_OUT
                && !turn.has_moved_this_turn
                && !self.pieces.has_piece_outside(player)
            {
                return Err(corrupt("single roll with every piece at home"));
            }
        }

        let complete = self
            .roster
            .ids()
            .find(|&p| self.pieces.goal_count(p) == PIECES_PER_PLAYER);
        match turn.phase {
            GamePhase::Finished => {
                if turn.winner.is_none() {
                    return Err(corrupt("finished without a winner"));
                }
                if complete != turn.winner {
                    return Err(corrupt("winner does not have every piece in the goal"));
                }
            }
            _ if complete.is_some() => {
                return Err(corrupt("a player is done but the match is not finished"));
            }
            _ => {}
        }

        Ok(())
    }
}

/// What gets written to a save slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFile {
    /// Always first, so it can be read without decoding the rest.
    pub version: u32,
    pub snapshot: Snapshot,
    /// Dice position, if the die can be checkpointed.
    pub dice: Option<DiceRngState>,
}

impl SaveFile {
    #[must_use]
    pub fn new(snapshot: Snapshot, dice: Option<DiceRngState>) -> Self {
        Self {
            version: SAVE_FORMAT_VERSION,
            snapshot,
            dice,
        }
    }

    /// Encode to opaque bytes.
    pub fn encode(&self) -> Result<Vec<u8>, PersistenceError> {
        bincode::serialize(self).map_err(|e| PersistenceError::Encode(e.to_string()))
    }

    /// Decode and validate.
    pub fn decode(bytes: &[u8]) -> Result<Self, PersistenceError> {
        let version: u32 =
            bincode::deserialize(bytes).map_err(|e| PersistenceError::Decode(e.to_string()))?;
        if version != SAVE_FORMAT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: version,
                expected: SAVE_FORMAT_VERSION,
            });
        }
        let save: Self =
            bincode::deserialize(bytes).map_err(|e| PersistenceError::Decode(e.to_string()))?;
        save.snapshot.validate()?;
        Ok(save)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Location, PieceId, PlayerId};

    fn playing_snapshot() -> Snapshot {
        let mut roster = Roster::seat(&["Blue", "Red"]);
        roster.activate(PlayerId::new(1));
        let mut turn = TurnState {
            phase: GamePhase::Playing,
            ..TurnState::default()
        };
        turn.begin_turn(PlayerId::new(1), false);
        Snapshot {
            roster,
            pieces: PieceSet::starting(2),
            turn,
            stats: MatchStatistics::new(2),
        }
    }

    #[test]
    fn test_valid_snapshot() {
        assert!(playing_snapshot().validate().is_ok());
    }

    #[test]
    fn test_empty_selection_snapshot() {
        let snapshot = Snapshot {
            roster: Roster::default(),
            pieces: PieceSet::default(),
            turn: TurnState::default(),
            stats: MatchStatistics::new(2),
        };
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_rejects_shared_cell() {
        let mut snapshot = playing_snapshot();
        // Blue progress 10 and Red progress 0 are both ring cell 2
        snapshot
            .pieces
            .set_location(PieceId::new(PlayerId::new(0), 0), Location::Ring(10));
        snapshot
            .pieces
            .set_location(PieceId::new(PlayerId::new(1), 0), Location::Ring(0));
        assert!(matches!(snapshot.validate(), Err(PersistenceError::Corrupt(_))));
    }

    #[test]
    fn test_rejects_bad_turn() {
        let mut snapshot = playing_snapshot();
        snapshot.turn.dice = Some(9);
        assert!(snapshot.validate().is_err());

        let mut snapshot = playing_snapshot();
        snapshot.turn.current = Some(PlayerId::new(0));
        assert!(snapshot.validate().is_err());

        let mut snapshot = playing_snapshot();
        snapshot.turn.current = Some(PlayerId::new(3));
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_roll_budget() {
        let mut snapshot = playing_snapshot();
        snapshot.turn.max_rolls = 50;
        assert!(snapshot.validate().is_err());

        // Everything home means three rolls until a piece has moved
        let mut snapshot = playing_snapshot();
        snapshot.turn.max_rolls = ROLLS_WITH_PIECE_OUT;
        assert!(snapshot.validate().is_err());
        snapshot.turn.has_moved_this_turn = true;
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_rejects_unfinished_winner() {
        let red = PlayerId::new(1);
        let mut snapshot = playing_snapshot();
        for index in 0..4u8 {
            snapshot.pieces.set_location(PieceId::new(red, index), Location::Goal(index));
        }
        assert!(snapshot.validate().is_err());

        snapshot.turn.phase = GamePhase::Finished;
        snapshot.turn.winner = Some(PlayerId::new(0));
        assert!(snapshot.validate().is_err());

        snapshot.turn.winner = Some(red);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_rejects_blank_name() {
        let mut snapshot = playing_snapshot();
        snapshot.roster = Roster::seat(&["Blue", "  "]);
        snapshot.roster.activate(PlayerId::new(1));
        assert!(matches!(snapshot.validate(), Err(PersistenceError::Corrupt(_))));
    }

    #[test]
    fn test_rejects_missing_piece() {
        let mut snapshot = playing_snapshot();
        snapshot.pieces = PieceSet::from_pieces(snapshot.pieces.iter().skip(1).copied());
        assert!(matches!(snapshot.validate(), Err(PersistenceError::Corrupt(_))));
    }

    #[test]
    fn test_save_file_round_trip() {
        let save = SaveFile::new(playing_snapshot(), Some(DiceRngState { seed: 1, word_pos: 8 }));
        let bytes = save.encode().unwrap();
        assert_eq!(SaveFile::decode(&bytes).unwrap(), save);
    }

    #[test]
    fn test_decode_rejects_version_and_garbage() {
        let mut save = SaveFile::new(playing_snapshot(), None);
        save.version = 99;
        let bytes = save.encode().unwrap();
        assert_eq!(
            SaveFile::decode(&bytes),
            Err(PersistenceError::UnsupportedVersion { found: 99, expected: 1 })
        );

        assert!(matches!(SaveFile::decode(&[1, 0]), Err(PersistenceError::Decode(_))));
        assert!(matches!(
            SaveFile::decode(&[1, 0, 0, 0, 7]),
            Err(PersistenceError::Decode(_))
        ));
    }
}
