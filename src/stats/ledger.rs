//! Cross-match win ledger.
//!
//! The engine reports each win through `StatisticsSink`. `WinLedger` is the
//! stock sink: totals across matches, a wins table, the last 100 game
//! times and the time records. It lives outside the match lifecycle and is
//! never touched by undo or restart.
//!
//! ## JSON
//!
//! The ledger exports and imports JSON. Missing fields default to zero or
//! empty; an import that breaks the ledger's own invariants is refused.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::Color;

/// Game times kept for the average.
pub const MAX_GAME_TIMES: usize = 100;

/// One finished match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinRecord {
    pub winner: String,
    pub color: Color,
    pub elapsed_secs: u64,
    pub rolls: u64,
    pub moves: u64,
}

/// Receives wins. Append-only from the engine's side.
pub trait StatisticsSink {
    fn record_win(&mut self, record: &WinRecord);
}

/// Sink that drops every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl StatisticsSink for NullSink {
    fn record_win(&mut self, _record: &WinRecord) {}
}

impl<T: StatisticsSink + ?Sized> StatisticsSink for Box<T> {
    fn record_win(&mut self, record: &WinRecord) {
        (**self).record_win(record);
    }
}

impl<T: StatisticsSink> StatisticsSink for std::rc::Rc<std::cell::RefCell<T>> {
    fn record_win(&mut self, record: &WinRecord) {
        self.borrow_mut().record_win(record);
    }
}

/// Ledger import failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid ledger: {0}")]
    Invalid(&'static str),
}

/// Wins by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerEntry {
    pub name: String,
    pub wins: u32,
}

/// Fastest recorded win.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastestWin {
    pub name: String,
    pub secs: u64,
}

/// Totals across matches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinLedger {
    pub total_wins: u32,
    pub games_played: u32,
    pub total_rolls: u64,
    pub total_moves: u64,
    /// Sorted by wins, most first.
    pub winners: Vec<WinnerEntry>,
    /// Most recent game times in seconds, oldest first.
    pub game_times: VecDeque<u64>,
    /// Sum of `game_times`.
    pub total_game_time: u64,
    pub fastest_win: Option<FastestWin>,
    pub longest_game: u64,
}

impl WinLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one win.
    ///
    /// Returns false, and leaves the ledger alone, when the winner name is blank.
    pub fn record(&mut self, record: &WinRecord) -> bool {
        let name = record.winner.trim();
        if name.is_empty() {
            warn!("win recorded without a winner name, ignored");
            return false;
        }

        self.total_wins = self.total_wins.saturating_add(1);
        self.games_played = self.games_played.saturating_add(1);

        let secs = record.elapsed_secs;
        if secs > 0 {
            self.game_times.push_back(secs);
            self.total_game_time = self.total_game_time.saturating_add(secs);
            if self.fastest_win.as_ref().map_or(true, |f| secs < f.secs) {
                self.fastest_win = Some(FastestWin {
                    name: name.to_string(),
                    secs,
                });
            }
            self.longest_game = self.longest_game.max(secs);
            while self.game_times.len() > MAX_GAME_TIMES {
                if let Some(dropped) = self.game_times.pop_front() {
                    self.total_game_time = self.total_game_time.saturating_sub(dropped);
                }
            }
        }

        match self.winners.iter_mut().find(|w| w.name == name) {
            Some(entry) => entry.wins = entry.wins.saturating_add(1),
            None => self.winners.push(WinnerEntry {
                name: name.to_string(),
                wins: 1,
            }),
        }
        // Stable: equal win counts keep first-recorded order
        self.winners.sort_by(|a, b| b.wins.cmp(&a.wins));

        self.total_rolls = self.total_rolls.saturating_add(record.rolls);
        self.total_moves = self.total_moves.saturating_add(record.moves);

        info!(winner = name, secs, total_wins = self.total_wins, "win recorded");
        true
    }

    /// Mean of the kept game times, in whole seconds.
    #[must_use]
    pub fn average_game_time(&self) -> u64 {
        if self.game_times.is_empty() {
            0
        } else {
            self.total_game_time / self.game_times.len() as u64
        }
    }

    /// Wins for `name`.
    #[must_use]
    pub fn wins_for(&self, name: &str) -> u32 {
        self.winners
            .iter()
            .find(|w| w.name == name)
            .map_or(0, |w| w.wins)
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pretty JSON export.
    pub fn to_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and check a JSON export.
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        let ledger: Self = serde_json::from_str(json)?;
        ledger.validate()?;
        Ok(ledger)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.total_wins > self.games_played {
            return Err(LedgerError::Invalid("more wins than games played"));
        }
        if self.game_times.len() > MAX_GAME_TIMES {
            return Err(LedgerError::Invalid("too many game times"));
        }
        let game_time = self
            .game_times
            .iter()
            .try_fold(0u64, |sum, &secs| sum.checked_add(secs))
            .ok_or(LedgerError::Invalid("game time total overflows"))?;
        if game_time != self.total_game_time {
            return Err(LedgerError::Invalid("game time total does not match"));
        }
        if self.winners.iter().any(|w| w.name.trim().is_empty()) {
            return Err(LedgerError::Invalid("blank winner name"));
        }
        let wins = self
            .winners
            .iter()
            .try_fold(0u32, |sum, w| sum.checked_add(w.wins))
            .ok_or(LedgerError::Invalid("winner table overflows"))?;
        if wins > self.total_wins {
            return Err(LedgerError::Invalid("winner table exceeds total wins"));
        }
        Ok(())
    }
}

impl StatisticsSink for WinLedger {
    fn record_win(&mut self, record: &WinRecord) {
        self.record(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win(name: &str, secs: u64) -> WinRecord {
        WinRecord {
            winner: name.to_string(),
            color: Color::Red,
            elapsed_secs: secs,
            rolls: 10,
            moves: 4,
        }
    }

    #[test]
    fn test_record_updates_totals_and_records() {
        let mut ledger = WinLedger::new();
        assert!(ledger.record(&win("Ana", 300)));
        assert!(ledger.record(&win("Ben", 120)));
        assert!(ledger.record(&win("Ben", 600)));

        assert_eq!(ledger.total_wins, 3);
        assert_eq!(ledger.games_played, 3);
        assert_eq!(ledger.total_rolls, 30);
        assert_eq!(ledger.total_moves, 12);
        assert_eq!(ledger.winners[0], WinnerEntry { name: "Ben".into(), wins: 2 });
        assert_eq!(ledger.wins_for("Ana"), 1);
        assert_eq!(ledger.fastest_win, Some(FastestWin { name: "Ben".into(), secs: 120 }));
        assert_eq!(ledger.longest_game, 600);
        assert_eq!(ledger.average_game_time(), 340);
    }

    #[test]
    fn test_blank_name_ignored() {
        let mut ledger = WinLedger::new();
        assert!(!ledger.record(&win("  ", 100)));
        assert_eq!(ledger, WinLedger::default());
    }

    #[test]
    fn test_zero_time_not_kept() {
        let mut ledger = WinLedger::new();
        ledger.record(&win("Ana", 0));
        assert_eq!(ledger.total_wins, 1);
        assert!(ledger.game_times.is_empty());
        assert_eq!(ledger.fastest_win, None);
        assert_eq!(ledger.average_game_time(), 0);
    }

    #[test]
    fn test_game_times_capped() {
        let mut ledger = WinLedger::new();
        for secs in 1..=105 {
            ledger.record(&win("Ana", secs));
        }
        assert_eq!(ledger.game_times.len(), MAX_GAME_TIMES);
        assert_eq!(ledger.game_times.front(), Some(&6));
        assert_eq!(ledger.total_game_time, (6..=105).sum::<u64>());
        assert_eq!(ledger.fastest_win.as_ref().map(|f| f.secs), Some(1));
        assert!(ledger.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let mut ledger = WinLedger::new();
        ledger.record(&win("Ana", 90));
        let json = ledger.to_json().unwrap();
        assert_eq!(WinLedger::from_json(&json).unwrap(), ledger);
    }

    #[test]
    fn test_json_defaults_and_rejects() {
        let ledger = WinLedger::from_json("{}").unwrap();
        assert_eq!(ledger, WinLedger::default());

        assert!(matches!(
            WinLedger::from_json(r#"{"total_wins": 3, "games_played": 1}"#),
            Err(LedgerError::Invalid(_))
        ));
        assert!(matches!(WinLedger::from_json("not json"), Err(LedgerError::Json(_))));
    }

    #[test]
    fn test_json_overflow_rejected() {
        assert!(matches!(
            WinLedger::from_json(r#"{"game_times":[18446744073709551615,2],"total_game_time":1}"#),
            Err(LedgerError::Invalid("game time total overflows"))
        ));
        assert!(matches!(
            WinLedger::from_json(
                r#"{"total_wins":5,"games_played":5,"winners":[{"name":"Ana","wins":4294967295},{"name":"Ben","wins":1}]}"#
            ),
            Err(LedgerError::Invalid("winner table overflows"))
        ));

        // Totals at the ceiling stay there instead of wrapping
        let mut ledger = WinLedger::from_json(
            r#"{"total_rolls":18446744073709551615,"total_game_time":18446744073709551615,"game_times":[18446744073709551615]}"#,
        )
        .unwrap();
        assert!(ledger.record(&win("Ana", 5)));
        assert_eq!(ledger.total_rolls, u64::MAX);
        assert_eq!(ledger.total_game_time, u64::MAX);
    }

    #[test]
    fn test_shared_sink() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let shared = Rc::new(RefCell::new(WinLedger::new()));
        let mut sink: Box<dyn StatisticsSink> = Box::new(Rc::clone(&shared));
        sink.record_win(&win("Ana", 10));
        assert_eq!(shared.borrow().total_wins, 1);
    }
}
