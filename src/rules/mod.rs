//! Move legality.
//!
//! Pure functions over the board and piece positions:
//! - `moves`: every legal move for a player and die face
//! - `mandatory`: which of those moves the player is bound to make
//!
//! Neither module mutates state; the turn machine in `game` calls them.

pub mod mandatory;
pub mod moves;

pub use mandatory::{resolve, Obligation};
pub use moves::{move_for, possible_moves, Move, MoveList, EXIT_FACE};
