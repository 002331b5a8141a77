//! Per-player paths over the board.
//!
//! A player's path is the shared ring rotated to start at that player's
//! entry cell, followed by the player's private goal lane. Paths are derived
//! from the roster and the static geometry; they are never serialized and
//! must be rebuilt whenever the roster changes.

use serde::{Deserialize, Serialize};

use super::geometry::{goal_lane, start_offset, Cell, PATH_LEN, RING, RING_LEN};
use crate::core::{Color, PlayerId, PlayerMap, Roster};

/// Rotate the shared ring so index 0 is the cell at `start_offset`.
#[must_use]
pub fn build_ring_path(start_offset: usize) -> [Cell; RING_LEN] {
    std::array::from_fn(|i| RING[(start_offset + i) % RING_LEN])
}

/// Build the 44-cell path for a color.
#[must_use]
pub fn build_player_path(color: Color) -> PlayerPath {
    let offset = start_offset(color);
    let mut cells = Vec::with_capacity(PATH_LEN);
    cells.extend_from_slice(&build_ring_path(offset));
    cells.extend_from_slice(&goal_lane(color));
    PlayerPath {
        color,
        start_offset: offset,
        cells,
    }
}

/// The ordered cells one player's pieces travel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPath {
    color: Color,
    start_offset: usize,
    cells: Vec<Cell>,
}

impl PlayerPath {
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Ring index of this player's entry cell.
    #[must_use]
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// Cell at `progress`, if on the path.
    #[must_use]
    pub fn cell(&self, progress: u8) -> Option<Cell> {
        self.cells.get(usize::from(progress)).copied()
    }

    /// Absolute shared-ring index reached at `progress`; `None` in the goal lane.
    #[must_use]
    pub fn ring_index(&self, progress: u8) -> Option<usize> {
        let progress = usize::from(progress);
        (progress < RING_LEN).then(|| (self.start_offset + progress) % RING_LEN)
    }

    /// Ring index of the entry cell.
    #[must_use]
    pub fn entry_ring_index(&self) -> usize {
        self.start_offset
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Derived per-seat paths for the current roster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    paths: Option<PlayerMap<PlayerPath>>,
}

impl Board {
    /// Build the paths for every seated player.
    #[must_use]
    pub fn for_roster(roster: &Roster) -> Self {
        if roster.is_empty() {
            return Self::default();
        }
        let colors: Vec<Color> = roster.iter().map(|p| p.color).collect();
        Self {
            paths: Some(PlayerMap::new(colors.len(), |id| build_player_path(colors[id.index()]))),
        }
    }

    /// Path of a seated player.
    #[must_use]
    pub fn path(&self, player: PlayerId) -> Option<&PlayerPath> {
        self.paths.as_ref().and_then(|paths| paths.get(player))
    }

    /// Number of seats the board was built for.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.paths.as_ref().map_or(0, PlayerMap::player_count)
    }
}
