//! Dice: deterministic random faces and a scripted source for replays.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rolls
//! - **Serializable**: O(1) state capture and restore
//! - **Pluggable**: the engine rolls through `DiceSource`, so tests and
//!   replays can feed known faces
//!
//! ```
//! use ludo_engine::core::{DiceRng, DiceSource};
//!
//! let mut a = DiceRng::new(7);
//! let mut b = DiceRng::new(7);
//! assert_eq!(a.roll(), b.roll());
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Number of faces on the die.
pub const DIE_FACES: u8 = 6;

/// Anything that can produce die faces (1-6).
pub trait DiceSource {
    /// Roll once.
    fn roll(&mut self) -> u8;

    /// Capture the generator position, if the source has one.
    fn checkpoint(&self) -> Option<DiceRngState> {
        None
    }

    /// Resume from a captured position.
    fn restore(&mut self, _state: &DiceRngState) {}
}

/// Deterministic ChaCha8-backed die.
#[derive(Clone, Debug)]
pub struct DiceRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DiceRng {
    /// Create a new die with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> DiceRngState {
        DiceRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &DiceRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl DiceSource for DiceRng {
    fn roll(&mut self) -> u8 {
        self.inner.gen_range(1..=DIE_FACES)
    }

    fn checkpoint(&self) -> Option<DiceRngState> {
        Some(self.state())
    }

    fn restore(&mut self, state: &DiceRngState) {
        *self = Self::from_state(state);
    }
}

/// Serializable die state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Plays back a fixed list of faces, then falls back to a seeded die.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    faces: VecDeque<u8>,
    fallback: DiceRng,
}

impl ScriptedDice {
    /// Faces are returned in order. Values outside 1-6 are passed through
    /// unchanged so the engine's own check rejects them.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            fallback: DiceRng::new(0),
        }
    }

    /// Queue more faces.
    pub fn push(&mut self, face: u8) {
        self.faces.push_back(face);
    }

    /// Faces not yet rolled.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> u8 {
        self.faces.pop_front().unwrap_or_else(|| self.fallback.roll())
    }
}

impl<T: DiceSource + ?Sized> DiceSource for Box<T> {
    fn roll(&mut self) -> u8 {
        (**self).roll()
    }

    fn checkpoint(&self) -> Option<DiceRngState> {
        (**self).checkpoint()
    }

    fn restore(&mut self, state: &DiceRngState) {
        (**self).restore(state);
    }
}
