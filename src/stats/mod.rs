//! Match statistics, the cross-match ledger, and derived leaderboards.
//!
//! ## Key Types
//!
//! - `MatchStatistics`: counters for the running match (snapshotted)
//! - `WinLedger`: totals across matches, fed through `StatisticsSink`
//! - `Standing`: one leaderboard row computed from piece positions

pub mod ledger;
pub mod standings;
pub mod tally;

pub use ledger::{
    FastestWin, LedgerError, NullSink, StatisticsSink, WinLedger, WinRecord, WinnerEntry,
    MAX_GAME_TIMES,
};
pub use standings::{achievements, lead_gap, piece_steps, standings, Achievement, Standing, MAX_STEPS};
pub use tally::{format_clock, MatchStatistics, PlayerTally};
