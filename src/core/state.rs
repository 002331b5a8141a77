//! Match phase and per-turn bookkeeping.
//!
//! ## GamePhase
//!
//! `Selection → StartPhase → Playing → Finished`. Restart returns to
//! `Selection` from anywhere.
//!
//! ## TurnState
//!
//! Everything the turn machine needs to remember between actions: whose
//! turn it is, the current die, the roll budget, and the mandatory-move
//! flags used for the touch penalty.

use serde::{Deserialize, Serialize};

use super::piece::PieceId;
use super::player::PlayerId;

/// Rolls allowed while a player has every piece at home.
pub const ROLLS_WHILE_ALL_HOME: u8 = 3;

/// Rolls allowed once a piece is on the ring or in the goal lane.
pub const ROLLS_WITH_PIECE_OUT: u8 = 1;

/// Lifecycle of one match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Choosing players; no match set up.
    #[default]
    Selection,
    /// Everyone rolls once to decide who opens.
    StartPhase,
    /// Turns are being played.
    Playing,
    /// Someone has all four pieces in the goal lane.
    Finished,
}

/// Mutable turn state for the whole match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Current phase.
    pub phase: GamePhase,

    /// Seat whose turn it is (set once the start phase resolves).
    pub current: Option<PlayerId>,

    /// Face showing for this sub-turn; `None` until rolled.
    pub dice: Option<u8>,

    /// Rolls used in this sub-turn.
    pub rolls_this_turn: u8,

    /// Roll budget for this sub-turn.
    pub max_rolls: u8,

    /// A piece has moved since the last roll grant.
    pub has_moved_this_turn: bool,

    /// The mandatory subset for the current die contains a capture.
    pub mandatory_capture: bool,

    /// The mandatory subset for the current die contains a home departure.
    pub mandatory_from_home: bool,

    /// Piece selected while a move was pending.
    pub touched_piece: Option<PieceId>,

    /// The last executed move satisfied a mandatory category.
    pub last_move_was_mandatory: bool,

    /// Start-phase rolls taken so far.
    pub start_rolls_done: u8,

    /// Winner, once finished.
    pub winner: Option<PlayerId>,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            phase: GamePhase::Selection,
            current: None,
            dice: None,
            rolls_this_turn: 0,
            max_rolls: ROLLS_WHILE_ALL_HOME,
            has_moved_this_turn: false,
            mandatory_capture: false,
            mandatory_from_home: false,
            touched_piece: None,
            last_move_was_mandatory: false,
            start_rolls_done: 0,
            winner: None,
        }
    }
}

impl TurnState {
    /// Reset everything transient for a fresh turn of `player`.
    pub fn begin_turn(&mut self, player: PlayerId, has_piece_outside: bool) {
        self.current = Some(player);
        self.dice = None;
        self.rolls_this_turn = 0;
        self.max_rolls = Self::budget(has_piece_outside);
        self.has_moved_this_turn = false;
        self.clear_obligation();
        self.touched_piece = None;
        self.last_move_was_mandatory = false;
    }

    /// Re-arm the roll after a six was used. The touch and the
    /// mandatory-fulfilled marker carry over to the handoff check.
    pub fn grant_reroll(&mut self, has_piece_outside: bool) {
        self.dice = None;
        self.rolls_this_turn = 0;
        self.max_rolls = Self::budget(has_piece_outside);
        self.has_moved_this_turn = false;
        self.clear_obligation();
    }

    fn budget(has_piece_outside: bool) -> u8 {
        if has_piece_outside {
            ROLLS_WITH_PIECE_OUT
        } else {
            ROLLS_WHILE_ALL_HOME
        }
    }

    /// Forget the mandatory flags.
    pub fn clear_obligation(&mut self) {
        self.mandatory_capture = false;
        self.mandatory_from_home = false;
    }

    /// A mandatory category is flagged for the current die.
    #[must_use]
    pub fn has_obligation(&self) -> bool {
        self.mandatory_capture || self.mandatory_from_home
    }

    /// The outgoing player touched a piece while a mandatory move was
    /// flagged and never completed one.
    #[must_use]
    pub fn abandoned_mandatory(&self) -> Option<PieceId> {
        if self.has_obligation() && !self.last_move_was_mandatory {
            self.touched_piece
        } else {
            None
        }
    }

    /// Rolls left in the budget.
    #[must_use]
    pub fn rolls_left(&self) -> u8 {
        self.max_rolls.saturating_sub(self.rolls_this_turn)
    }
}
