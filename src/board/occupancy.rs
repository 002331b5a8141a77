//! Cell occupancy index.
//!
//! Ring cells are shared by everyone and keyed by absolute ring index.
//! Goal cells and home slots are private, keyed by (owner, cell).

use rustc_hash::FxHashMap;

use super::path::Board;
use crate::core::{Location, PieceId, PieceSet, PlayerId};

/// Two pieces found on one cell, or a piece with no path to stand on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conflict {
    Shared { first: PieceId, second: PieceId },
    Unplaced(PieceId),
}

/// Who stands where.
#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    ring: FxHashMap<usize, PieceId>,
    goal: FxHashMap<(PlayerId, u8), PieceId>,
    home: FxHashMap<(PlayerId, u8), PieceId>,
    conflicts: Vec<Conflict>,
}

impl Occupancy {
    /// Index every piece. Conflicts are collected, not fatal.
    #[must_use]
    pub fn index(board: &Board, pieces: &PieceSet) -> Self {
        let mut occupancy = Self::default();

        for piece in pieces.iter() {
            if !piece.location.is_valid() {
                occupancy.conflicts.push(Conflict::Unplaced(piece.id));
                continue;
            }
            let owner = piece.owner();
            let previous = match piece.location {
                Location::Home(slot) => occupancy.home.insert((owner, slot), piece.id),
                Location::Goal(lane) => occupancy.goal.insert((owner, lane), piece.id),
                Location::Ring(progress) => {
                    match board.path(owner).and_then(|path| path.ring_index(progress)) {
                        Some(cell) => occupancy.ring.insert(cell, piece.id),
                        None => {
                            occupancy.conflicts.push(Conflict::Unplaced(piece.id));
                            continue;
                        }
                    }
                }
            };
            if let Some(first) = previous {
                occupancy.conflicts.push(Conflict::Shared {
                    first,
                    second: piece.id,
                });
            }
        }

        occupancy
    }

    /// Piece on an absolute ring cell.
    #[must_use]
    pub fn on_ring(&self, ring_index: usize) -> Option<PieceId> {
        self.ring.get(&ring_index).copied()
    }

    /// Piece in `owner`'s goal cell.
    #[must_use]
    pub fn in_goal(&self, owner: PlayerId, lane: u8) -> Option<PieceId> {
        self.goal.get(&(owner, lane)).copied()
    }

    #[must_use]
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }
}
