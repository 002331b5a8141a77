//! Board geometry and the per-player path model.
//!
//! ## Key Types
//!
//! - `Cell`: a grid cell on the 11x11 board
//! - `PlayerPath`: the 44 cells a player's pieces travel
//! - `Board`: derived paths for the seated roster
//! - `Occupancy`: which piece stands on which cell

pub mod geometry;
pub mod occupancy;
pub mod path;

pub use geometry::{Cell, GOAL_LEN, LAST_PROGRESS, PATH_LEN, PIECES_PER_PLAYER, RING_LEN};
pub use occupancy::{Conflict, Occupancy};
pub use path::{build_player_path, build_ring_path, Board, PlayerPath};
