//! # ludo-engine
//!
//! Rule-enforcement core for a four-color cross-and-circle race game
//! (Ludo / "Mensch ärgere dich nicht" family).
//!
//! ## Design Principles
//!
//! 1. **Headless**: No rendering, input or audio. Hosts drive the game with
//!    actions and receive state through `GameObserver`.
//!
//! 2. **Rules Say No, Faults Say Err**: A refused action is
//!    `Ok(Outcome::Rejected(_))` with an advisory status. `Err` is kept for
//!    broken invariants, bad dice and unreadable saves.
//!
//! 3. **Derived, Not Stored**: Paths are rebuilt from the roster, occupancy
//!    from the pieces. Only locations and turn flags are persisted.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: roster and pieces live in `im`
//!   vectors, so a history snapshot is an O(1) clone.
//!
//! - **Virtual Clock**: dice settling and turn handoffs are follow-ups on a
//!   scheduler the host advances. Nothing sleeps and nothing races.
//!
//! ## Modules
//!
//! - `board`: Geometry, per-player paths, occupancy
//! - `core`: Players, pieces, turn state, actions, dice, configuration
//! - `rules`: Move generation and the mandatory-move resolver
//! - `game`: The turn state machine, scheduler and observer seam
//! - `history`: Undo/redo log and save files
//! - `stats`: Match counters, the win ledger, standings
//!
//! ```
//! use ludo_engine::{Game, GamePhase, MatchConfig, Timing};
//!
//! let mut game = Game::new(MatchConfig::new(2).with_timing(Timing::instant())).unwrap();
//! game.start_match().unwrap();
//! game.roll_for_start().unwrap();
//! game.roll_for_start().unwrap();
//! game.settle().unwrap();
//! assert_eq!(game.phase(), GamePhase::Playing);
//! ```

pub mod board;
pub mod core;
pub mod game;
pub mod history;
pub mod rules;
pub mod stats;

// Re-export commonly used types
pub use crate::board::{Board, Occupancy, PlayerPath, LAST_PROGRESS, PATH_LEN, RING_LEN};

pub use crate::core::{
    Action, Color, DiceRng, DiceSource, EngineError, GamePhase, Location, MatchConfig, Outcome,
    PieceId, PieceSet, PlayerId, Rejection, Roster, ScriptedDice, Severity, Timing, TurnState,
};

pub use crate::rules::{possible_moves, resolve, Move, MoveList, Obligation};

pub use crate::game::{Game, GameBuilder, GameObserver, StateView, StatusLog};

pub use crate::history::{HistoryLog, PersistenceError, SaveFile, Snapshot};

pub use crate::stats::{
    MatchStatistics, Standing, StatisticsSink, WinLedger, WinRecord,
};
