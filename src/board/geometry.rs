//! Static board geometry.
//!
//! The board is an 11x11 grid. Forty cells form the shared ring; each
//! color owns an entry offset into the ring, a 4-cell goal lane and four
//! home slots in its corner.

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// Cells on the shared ring.
pub const RING_LEN: usize = 40;

/// Cells in each goal lane.
pub const GOAL_LEN: usize = 4;

/// Cells on a player's path (ring + goal lane).
pub const PATH_LEN: usize = RING_LEN + GOAL_LEN;

/// Highest reachable progress value.
pub const LAST_PROGRESS: u8 = (PATH_LEN - 1) as u8;

/// Pieces (and home slots) per player.
pub const PIECES_PER_PLAYER: usize = 4;

/// A grid cell, column and row from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: u8,
    pub row: u8,
}

impl Cell {
    #[must_use]
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Center of the cell in board units.
    #[must_use]
    pub fn center(self) -> (f32, f32) {
        (f32::from(self.col) + 0.5, f32::from(self.row) + 0.5)
    }
}

const fn c(col: u8, row: u8) -> Cell {
    Cell::new(col, row)
}

/// The shared ring, clockwise from the top edge.
pub const RING: [Cell; RING_LEN] = [
    c(4, 0), c(5, 0), c(6, 0), c(6, 1), c(6, 2), c(6, 3), c(6, 4), c(7, 4), c(8, 4), c(9, 4),
    c(10, 4), c(10, 5), c(10, 6), c(9, 6), c(8, 6), c(7, 6), c(6, 6), c(6, 7), c(6, 8), c(6, 9),
    c(6, 10), c(5, 10), c(4, 10), c(4, 9), c(4, 8), c(4, 7), c(4, 6), c(3, 6), c(2, 6), c(1, 6),
    c(0, 6), c(0, 5), c(0, 4), c(1, 4), c(2, 4), c(3, 4), c(4, 4), c(4, 3), c(4, 2), c(4, 1),
];

/// Ring index of a color's entry cell.
#[must_use]
pub const fn start_offset(color: Color) -> usize {
    match color {
        Color::Red => 2,
        Color::Yellow => 12,
        Color::Green => 22,
        Color::Blue => 32,
    }
}

/// A color's goal lane, outermost cell first.
#[must_use]
pub const fn goal_lane(color: Color) -> [Cell; GOAL_LEN] {
    match color {
        Color::Red => [c(5, 1), c(5, 2), c(5, 3), c(5, 4)],
        Color::Blue => [c(1, 5), c(2, 5), c(3, 5), c(4, 5)],
        Color::Yellow => [c(9, 5), c(8, 5), c(7, 5), c(6, 5)],
        Color::Green => [c(5, 9), c(5, 8), c(5, 7), c(5, 6)],
    }
}

/// A color's home slots in its corner.
#[must_use]
pub const fn home_slots(color: Color) -> [Cell; PIECES_PER_PLAYER] {
    match color {
        Color::Red => [c(9, 0), c(10, 0), c(9, 1), c(10, 1)],
        Color::Blue => [c(0, 0), c(1, 0), c(0, 1), c(1, 1)],
        Color::Yellow => [c(9, 9), c(10, 9), c(9, 10), c(10, 10)],
        Color::Green => [c(0, 9), c(1, 9), c(0, 10), c(1, 10)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn adjacent(a: Cell, b: Cell) -> bool {
        let dc = (i16::from(a.col) - i16::from(b.col)).abs();
        let dr = (i16::from(a.row) - i16::from(b.row)).abs();
        dc + dr == 1
    }

    #[test]
    fn test_ring_is_a_closed_loop() {
        let unique: HashSet<_> = RING.iter().collect();
        assert_eq!(unique.len(), RING_LEN);
        for i in 0..RING_LEN {
            assert!(adjacent(RING[i], RING[(i + 1) % RING_LEN]), "gap after ring cell {}", i);
        }
    }

    #[test]
    fn test_goal_lane_starts_next_to_last_ring_cell() {
        for color in Color::ALL {
            let last = RING[(start_offset(color) + RING_LEN - 1) % RING_LEN];
            let lane = goal_lane(color);
            assert!(adjacent(last, lane[0]), "{} lane detached", color);
            for pair in lane.windows(2) {
                assert!(adjacent(pair[0], pair[1]));
            }
        }
    }

    #[test]
    fn test_no_cell_is_shared_between_areas() {
        let mut seen: HashSet<Cell> = RING.iter().copied().collect();
        for color in Color::ALL {
            for cell in goal_lane(color).into_iter().chain(home_slots(color)) {
                assert!(seen.insert(cell), "{:?} used twice", cell);
            }
        }
    }

    #[test]
    fn test_cell_center() {
        assert_eq!(Cell::new(4, 0).center(), (4.5, 0.5));
    }
}
