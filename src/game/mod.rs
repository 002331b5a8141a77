//! The running match: turn machine, follow-up clock and observer seam.
//!
//! - `Game` / `GameBuilder`: owns the state and applies actions
//! - `Scheduler`: delayed follow-ups on a virtual clock
//! - `GameObserver`: outbound state and status callbacks

pub mod engine;
pub mod observer;
pub mod schedule;

pub use engine::{Game, GameBuilder};
pub use observer::{GameObserver, NullObserver, StateView, StatusLog};
pub use schedule::{FollowUp, Scheduler};
