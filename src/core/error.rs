//! Engine errors.
//!
//! Only faults live here: broken invariants, bad configuration and failed
//! persistence. An action that is merely not allowed right now is a
//! regular `Outcome::Rejected`, never an error.

use thiserror::Error;

use super::config::ConfigError;
use super::piece::PieceId;
use super::player::PlayerId;
use crate::history::PersistenceError;

/// Faults surfaced by engine operations. State is unchanged when one is returned.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown piece {0}")]
    UnknownPiece(PieceId),
    #[error("no player at {0}")]
    UnknownPlayer(PlayerId),
    #[error("no free home slot for {0}")]
    NoFreeHomeSlot(PlayerId),
    #[error("die source produced {0}, expected 1-6")]
    InvalidDie(u8),
    #[error("no current player while a match is running")]
    NoCurrentPlayer,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
