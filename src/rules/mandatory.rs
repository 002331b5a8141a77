//! Mandatory-move resolution.
//!
//! Precedence, strongest first:
//!
//! 1. Any capture makes the capturing moves mandatory, and only those.
//! 2. Otherwise, on a 6, any home departure makes the home departures
//!    mandatory, and only those.
//! 3. Otherwise nothing is mandatory.

use tracing::debug;

use super::moves::{Move, MoveList, EXIT_FACE};
use crate::core::PieceId;

/// The mandatory subset for one roll.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Obligation {
    /// Moves the player must choose from; empty when the choice is free.
    pub moves: MoveList,
    /// The subset contains a capture.
    pub capture: bool,
    /// The subset contains a home departure.
    pub leave_home: bool,
}

impl Obligation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// True when `piece` may be moved under this obligation.
    #[must_use]
    pub fn permits(&self, piece: PieceId) -> bool {
        self.is_empty() || self.moves.iter().any(|m| m.piece == piece)
    }
}

/// Pick the mandatory subset of `moves` for `die`.
#[must_use]
pub fn resolve(moves: &[Move], die: u8) -> Obligation {
    let captures: MoveList = moves.iter().filter(|m| m.is_capture()).copied().collect();
    let subset = if !captures.is_empty() {
        captures
    } else if die == EXIT_FACE {
        moves.iter().filter(|m| m.from_home()).copied().collect()
    } else {
        MoveList::new()
    };

    let obligation = Obligation {
        capture: subset.iter().any(Move::is_capture),
        leave_home: subset.iter().any(Move::from_home),
        moves: subset,
    };
    if !obligation.is_empty() {
        debug!(
            count = obligation.moves.len(),
            capture = obligation.capture,
            leave_home = obligation.leave_home,
            "mandatory moves"
        );
    }
    obligation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Location, PlayerId};

    fn mv(index: u8, from: Location, to: Location, captures: bool) -> Move {
        Move {
            piece: PieceId::new(PlayerId::new(1), index),
            from,
            to,
            captures: captures.then_some(PieceId::new(PlayerId::new(0), 0)),
        }
    }

    #[test]
    fn test_capture_beats_home_departure() {
        let moves = [
            mv(0, Location::Home(0), Location::Ring(0), false),
            mv(1, Location::Ring(3), Location::Ring(9), true),
        ];
        let obligation = resolve(&moves, 6);
        assert_eq!(obligation.moves.len(), 1);
        assert_eq!(obligation.moves[0].piece.index, 1);
        assert!(obligation.capture);
        assert!(!obligation.leave_home);
    }

    #[test]
    fn test_capturing_departure_sets_both_flags() {
        let moves = [
            mv(0, Location::Home(0), Location::Ring(0), true),
            mv(1, Location::Ring(3), Location::Ring(9), false),
        ];
        let obligation = resolve(&moves, 6);
        assert_eq!(obligation.moves.len(), 1);
        assert!(obligation.capture);
        assert!(obligation.leave_home);
    }

    #[test]
    fn test_home_departures_on_six() {
        let moves = [
            mv(0, Location::Home(0), Location::Ring(0), false),
            mv(1, Location::Home(1), Location::Ring(0), false),
            mv(2, Location::Ring(3), Location::Ring(9), false),
        ];
        let obligation = resolve(&moves, 6);
        assert_eq!(obligation.moves.len(), 2);
        assert!(obligation.moves.iter().all(Move::from_home));
        assert!(!obligation.permits(PieceId::new(PlayerId::new(1), 2)));
    }

    #[test]
    fn test_free_choice() {
        let moves = [
            mv(2, Location::Ring(3), Location::Ring(7), false),
            mv(3, Location::Ring(20), Location::Ring(24), false),
        ];
        let obligation = resolve(&moves, 4);
        assert!(obligation.is_empty());
        assert!(obligation.permits(PieceId::new(PlayerId::new(1), 3)));
        assert!(resolve(&[], 6).is_empty());
    }
}
