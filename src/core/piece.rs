//! Pieces and their locations.
//!
//! A piece is always in exactly one of three places: a home slot, a ring
//! cell, or a goal cell. `Location` carries that as a tagged variant; the
//! canonical progress counter (0..=43 along the owner's path) is derived
//! from it, never stored next to it.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::geometry::{GOAL_LEN, LAST_PROGRESS, PIECES_PER_PLAYER, RING_LEN};

/// Identifies one of a player's four pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId {
    /// Seat that owns the piece.
    pub owner: PlayerId,
    /// Piece number within the owner's set (0-3).
    pub index: u8,
}

impl PieceId {
    /// Create a piece ID.
    #[must_use]
    pub const fn new(owner: PlayerId, index: u8) -> Self {
        Self { owner, index }
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "piece-{}-{}", self.owner.0, self.index)
    }
}

/// Where a piece is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// Waiting in a home slot (0-3).
    Home(u8),
    /// On the shared ring, at this progress along the owner's path (0-39).
    Ring(u8),
    /// In the owner's goal lane (0-3, outermost first).
    Goal(u8),
}

impl Location {
    /// Progress along the owner's 44-cell path; `None` at home.
    #[must_use]
    pub const fn progress(self) -> Option<u8> {
        match self {
            Location::Home(_) => None,
            Location::Ring(i) => Some(i),
            Location::Goal(g) => Some(RING_LEN as u8 + g),
        }
    }

    /// The location reached at `progress`, or `None` past the last goal cell.
    #[must_use]
    pub const fn from_progress(progress: u8) -> Option<Self> {
        if progress < RING_LEN as u8 {
            Some(Location::Ring(progress))
        } else if progress <= LAST_PROGRESS {
            Some(Location::Goal(progress - RING_LEN as u8))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_home(self) -> bool {
        matches!(self, Location::Home(_))
    }

    #[must_use]
    pub const fn is_goal(self) -> bool {
        matches!(self, Location::Goal(_))
    }

    /// Check the payload is inside its range.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        match self {
            Location::Home(slot) => (slot as usize) < PIECES_PER_PLAYER,
            Location::Ring(i) => (i as usize) < RING_LEN,
            Location::Goal(g) => (g as usize) < GOAL_LEN,
        }
    }
}

/// A piece and its current location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub location: Location,
}

impl Piece {
    /// Owning seat.
    #[must_use]
    pub const fn owner(&self) -> PlayerId {
        self.id.owner
    }
}

/// Every piece in the match.
///
/// Persistent vector: cloning for a snapshot is O(1) and unchanged chunks
/// stay shared between snapshots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSet {
    pieces: Vector<Piece>,
}

impl PieceSet {
    /// Four pieces per seat, all at home in slots 0-3.
    #[must_use]
    pub fn starting(player_count: usize) -> Self {
        let pieces = PlayerId::all(player_count)
            .flat_map(|owner| {
                (0..PIECES_PER_PLAYER as u8).map(move |i| Piece {
                    id: PieceId::new(owner, i),
                    location: Location::Home(i),
                })
            })
            .collect();
        Self { pieces }
    }

    /// Build from explicit pieces.
    pub fn from_pieces(pieces: impl IntoIterator<Item = Piece>) -> Self {
        Self {
            pieces: pieces.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// Pieces owned by `owner`.
    pub fn owned_by(&self, owner: PlayerId) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.owner() == owner)
    }

    #[must_use]
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Move a piece. Returns false if the piece is unknown.
    pub fn set_location(&mut self, id: PieceId, location: Location) -> bool {
        match self.pieces.iter().position(|p| p.id == id) {
            Some(pos) => {
                self.pieces.set(pos, Piece { id, location });
                true
            }
            None => false,
        }
    }

    /// True if `owner` has a piece on the ring or in the goal lane.
    #[must_use]
    pub fn has_piece_outside(&self, owner: PlayerId) -> bool {
        self.owned_by(owner).any(|p| !p.location.is_home())
    }

    /// Number of `owner`'s pieces seated in the goal lane.
    #[must_use]
    pub fn goal_count(&self, owner: PlayerId) -> usize {
        self.owned_by(owner).filter(|p| p.location.is_goal()).count()
    }

    /// Lowest home slot of `owner` not held by another home piece.
    ///
    /// `ignoring` is left out of the scan (the piece being sent home).
    #[must_use]
    pub fn first_free_home_slot(&self, owner: PlayerId, ignoring: Option<PieceId>) -> Option<u8> {
        (0..PIECES_PER_PLAYER as u8).find(|&slot| {
            !self.owned_by(owner).any(|p| {
                Some(p.id) != ignoring && p.location == Location::Home(slot)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_round_trip_boundaries() {
        assert_eq!(Location::Home(2).progress(), None);
        assert_eq!(Location::Ring(0).progress(), Some(0));
        assert_eq!(Location::Ring(39).progress(), Some(39));
        assert_eq!(Location::Goal(0).progress(), Some(40));
        assert_eq!(Location::Goal(3).progress(), Some(43));

        assert_eq!(Location::from_progress(39), Some(Location::Ring(39)));
        assert_eq!(Location::from_progress(40), Some(Location::Goal(0)));
        assert_eq!(Location::from_progress(43), Some(Location::Goal(3)));
        assert_eq!(Location::from_progress(44), None);
    }

    #[test]
    fn test_location_validity() {
        assert!(Location::Home(3).is_valid());
        assert!(!Location::Home(4).is_valid());
        assert!(!Location::Ring(40).is_valid());
        assert!(!Location::Goal(4).is_valid());
    }

    #[test]
    fn test_starting_pieces() {
        let pieces = PieceSet::starting(3);
        assert_eq!(pieces.len(), 12);
        for owner in PlayerId::all(3) {
            assert_eq!(pieces.owned_by(owner).count(), 4);
            assert!(!pieces.has_piece_outside(owner));
            assert_eq!(pieces.goal_count(owner), 0);
        }
    }

    #[test]
    fn test_first_free_home_slot() {
        let owner = PlayerId::new(0);
        let mut pieces = PieceSet::starting(2);
        assert_eq!(pieces.first_free_home_slot(owner, None), None);

        pieces.set_location(PieceId::new(owner, 1), Location::Ring(5));
        assert_eq!(pieces.first_free_home_slot(owner, None), Some(1));

        // A piece already home can be re-seated into its own slot
        let p0 = PieceId::new(owner, 0);
        assert_eq!(pieces.first_free_home_slot(owner, Some(p0)), Some(0));
    }

    #[test]
    fn test_set_location_unknown_piece() {
        let mut pieces = PieceSet::starting(2);
        assert!(!pieces.set_location(PieceId::new(PlayerId::new(3), 0), Location::Ring(0)));
    }

    #[test]
    fn test_piece_id_display() {
        assert_eq!(PieceId::new(PlayerId::new(1), 3).to_string(), "piece-1-3");
    }
}
