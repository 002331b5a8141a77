//! Players, seats and the color palette.
//!
//! ## PlayerId
//!
//! Seat index in turn order (0-based). Seat 0 rolls first in the start phase.
//!
//! ## Color
//!
//! The fixed palette of four colors. A color is the stable identity of a
//! player's pieces, home corner, entry cell and goal lane.
//!
//! ## PlayerMap
//!
//! Per-seat data storage backed by `Vec` for O(1) access.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Minimum number of seats in a match.
pub const MIN_PLAYERS: usize = 2;

/// Maximum number of seats in a match.
pub const MAX_PLAYERS: usize = 4;

/// Seat identifier (turn-order slot).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one, wrapping around.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all seats for a match with `player_count` players.
    ///
    /// ```
    /// use ludo_engine::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// The four-color palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Yellow,
    Green,
}

impl Color {
    /// Every color, in palette order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Yellow, Color::Green];

    /// Seating order used when a match starts; the first `n` are seated.
    pub const SEATING: [Color; 4] = [Color::Blue, Color::Red, Color::Yellow, Color::Green];

    /// Stable small-integer identity (1-4).
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Color::Red => 1,
            Color::Blue => 2,
            Color::Yellow => 3,
            Color::Green => 4,
        }
    }

    /// Look a color up by its stable identity.
    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Colors seated for a match of `player_count` players.
    #[must_use]
    pub fn seating(player_count: usize) -> &'static [Color] {
        &Self::SEATING[..player_count.min(MAX_PLAYERS)]
    }

    /// Human-readable color name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat in turn order.
    pub id: PlayerId,

    /// Palette color.
    pub color: Color,

    /// Display name.
    pub name: String,

    /// True for exactly one player while a match is being played.
    pub active: bool,

    /// Start-phase roll, used only to pick the opening player.
    pub start_roll: Option<u8>,
}

impl Player {
    /// Create an inactive player.
    pub fn new(id: PlayerId, color: Color, name: impl Into<String>) -> Self {
        Self {
            id,
            color,
            name: name.into(),
            active: false,
            start_roll: None,
        }
    }
}

/// All seated players, in turn order.
///
/// Backed by a persistent vector so history snapshots share it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vector<Player>,
}

impl Roster {
    /// Seat one player per name, colors taken from the seating order.
    pub fn seat<S: AsRef<str>>(names: &[S]) -> Self {
        let players = Color::seating(names.len())
            .iter()
            .zip(names)
            .enumerate()
            .map(|(seat, (&color, name))| Player::new(PlayerId(seat as u8), color, name.as_ref()))
            .collect();
        Self { players }
    }

    /// Number of seated players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True before a match has been set up.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Get a player by seat.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Get a mutable player by seat.
    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    /// Iterate in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Seats in turn order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.players.len())
    }

    /// The active player, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.active)
    }

    /// Make `id` the only active player.
    pub fn activate(&mut self, id: PlayerId) {
        for player in self.players.iter_mut() {
            player.active = player.id == id;
        }
    }
}

/// Per-seat data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per seat.
///
/// ```
/// use ludo_engine::core::{PlayerId, PlayerMap};
///
/// let mut sixes: PlayerMap<u32> = PlayerMap::with_value(3, 0);
/// sixes[PlayerId::new(1)] += 1;
/// assert_eq!(sixes[PlayerId::new(1)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= MAX_PLAYERS, "At most 4 players supported");

        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a seat's data, if the seat exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a seat's data mutably, if the seat exists.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
