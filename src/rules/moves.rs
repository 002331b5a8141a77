//! Legal move generation.
//!
//! For a player and a die face, every piece yields at most one candidate:
//!
//! - A home piece may leave on a 6, onto its entry cell, unless the player's
//!   own piece already stands there. An opponent on the entry cell is
//!   captured.
//! - A piece on the path advances by the die. Targets past progress 43 are
//!   illegal (no wrap, no bounce). Ring targets may hold an opponent
//!   (captured) but not an own piece. Goal targets must be empty; only the
//!   owner can ever stand in a goal lane.

use smallvec::SmallVec;
use tracing::debug;

use crate::board::{Board, Occupancy};
use crate::core::{EngineError, Location, PieceId, PieceSet, PlayerId, DIE_FACES};

/// Face needed to leave home.
pub const EXIT_FACE: u8 = 6;

/// One executable move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub piece: PieceId,
    pub from: Location,
    pub to: Location,
    /// Opponent sent home by this move.
    pub captures: Option<PieceId>,
}

impl Move {
    #[must_use]
    pub const fn from_home(&self) -> bool {
        self.from.is_home()
    }

    #[must_use]
    pub const fn enters_goal(&self) -> bool {
        self.to.is_goal()
    }

    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.captures.is_some()
    }
}

/// Candidates for one roll; a player never has more than four.
pub type MoveList = SmallVec<[Move; 4]>;

/// Every legal move for `player` with `die`.
///
/// Fails only when the die is outside 1-6 or the player has no path.
pub fn possible_moves(
    board: &Board,
    pieces: &PieceSet,
    player: PlayerId,
    die: u8,
) -> Result<MoveList, EngineError> {
    if !(1..=DIE_FACES).contains(&die) {
        return Err(EngineError::InvalidDie(die));
    }
    let path = board.path(player).ok_or(EngineError::UnknownPlayer(player))?;
    let occupancy = Occupancy::index(board, pieces);
    let mut moves = MoveList::new();

    for piece in pieces.owned_by(player) {
        let candidate = match piece.location.progress() {
            None => {
                if die != EXIT_FACE {
                    continue;
                }
                match occupancy.on_ring(path.entry_ring_index()) {
                    Some(blocker) if blocker.owner == player => None,
                    occupant => Some((Location::Ring(0), occupant)),
                }
            }
            Some(progress) => match Location::from_progress(progress + die) {
                None => None,
                Some(Location::Goal(lane)) => occupancy
                    .in_goal(player, lane)
                    .is_none()
                    .then_some((Location::Goal(lane), None)),
                Some(Location::Ring(target)) => {
                    let cell = path
                        .ring_index(target)
                        .ok_or(EngineError::UnknownPiece(piece.id))?;
                    match occupancy.on_ring(cell) {
                        Some(blocker) if blocker.owner == player => None,
                        occupant => Some((Location::Ring(target), occupant)),
                    }
                }
                Some(Location::Home(_)) => None,
            },
        };

        if let Some((to, captures)) = candidate {
            moves.push(Move {
                piece: piece.id,
                from: piece.location,
                to,
                captures,
            });
        }
    }

    debug!(%player, die, count = moves.len(), "generated moves");
    Ok(moves)
}

/// The candidate for `piece`, if it has one.
#[must_use]
pub fn move_for(moves: &[Move], piece: PieceId) -> Option<&Move> {
    moves.iter().find(|m| m.piece == piece)
}
