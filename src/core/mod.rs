//! Core engine types: players, pieces, turn state, actions, dice, configuration.
//!
//! These are the records every other module shares. They hold data and
//! small invariants only; the turn rules live in `rules` and `game`.

pub mod action;
pub mod config;
pub mod error;
pub mod piece;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, Outcome, Rejection, Severity};
pub use config::{ConfigError, MatchConfig, Timing, DEFAULT_HISTORY_DEPTH};
pub use error::EngineError;
pub use piece::{Location, Piece, PieceId, PieceSet};
pub use player::{Color, Player, PlayerId, PlayerMap, Roster, MAX_PLAYERS, MIN_PLAYERS};
pub use rng::{DiceRng, DiceRngState, DiceSource, ScriptedDice, DIE_FACES};
pub use state::{GamePhase, TurnState, ROLLS_WHILE_ALL_HOME, ROLLS_WITH_PIECE_OUT};
