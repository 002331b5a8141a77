//! Player actions and their outcomes.
//!
//! Every action either applies or is rejected. A rejection is an ordinary
//! result (the player asked for something the rules do not allow right
//! now) and carries the status text shown to them. Faults are
//! `EngineError`s and never appear here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::piece::PieceId;

/// Something a player (or the UI on their behalf) asks the engine to do.
///
/// ```
/// use ludo_engine::core::{Action, PieceId, PlayerId};
///
/// let pick = Action::Select(PieceId::new(PlayerId::new(1), 0));
/// assert!(pick.mutates_board());
/// assert!(!Action::Undo.mutates_board());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Seat the configured players and enter the start phase.
    StartMatch,
    /// Next seat's start-phase roll.
    RollForStart,
    /// Roll the die for the current player.
    Roll,
    /// Move this piece by the current die.
    Select(PieceId),
    /// Give up the rest of the turn.
    EndTurn,
    Undo,
    Redo,
    /// Drop the match and go back to player selection.
    Restart,
}

impl Action {
    /// True for actions that can move pieces or change whose turn it is.
    #[must_use]
    pub const fn mutates_board(self) -> bool {
        matches!(self, Action::Select(_) | Action::EndTurn)
    }
}

/// How loud a status message is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    /// A mandatory move is waiting.
    Mandatory,
    Success,
    Error,
}

/// Why an action was not applied. State is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("no match is being played")]
    NotPlaying,
    #[error("a match is already running")]
    MatchRunning,
    #[error("start-phase rolls are over")]
    NotStartPhase,
    #[error("wait for the dice to settle")]
    Busy,
    #[error("Rule 10: make the mandatory move before rolling")]
    MandatoryMovePending,
    #[error("move a piece before rolling again")]
    MoveRequired,
    #[error("no rolls left this turn")]
    RollBudgetExhausted,
    #[error("roll the die first")]
    RollFirst,
    #[error("that is not your piece")]
    NotYourPiece,
    #[error("this piece cannot move")]
    PieceCannotMove,
    #[error("Rule 10: you must make a mandatory move")]
    MandatoryMoveRequired,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

impl Rejection {
    /// Status severity used when reporting the rejection.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Rejection::MandatoryMovePending | Rejection::MandatoryMoveRequired => {
                Severity::Mandatory
            }
            Rejection::NotYourPiece
            | Rejection::PieceCannotMove
            | Rejection::MoveRequired
            | Rejection::RollBudgetExhausted => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

/// Result of an accepted-or-refused action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Applied,
    Rejected(Rejection),
}

impl Outcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Outcome::Applied)
    }

    /// The rejection, if any.
    #[must_use]
    pub const fn rejection(self) -> Option<Rejection> {
        match self {
            Outcome::Applied => None,
            Outcome::Rejected(r) => Some(r),
        }
    }
}

impl From<Rejection> for Outcome {
    fn from(rejection: Rejection) -> Self {
        Outcome::Rejected(rejection)
    }
}
