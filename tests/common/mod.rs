//! Shared fixtures: hand-built positions loaded through a save file.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use ludo_engine::core::{
    GamePhase, Location, MatchConfig, PieceId, PieceSet, PlayerId, Roster, ScriptedDice, Timing,
    TurnState,
};
use ludo_engine::game::{Game, GameBuilder, StatusLog};
use ludo_engine::history::{SaveFile, Snapshot};
use ludo_engine::stats::{MatchStatistics, WinLedger};

pub const BLUE: PlayerId = PlayerId::new(0);
pub const RED: PlayerId = PlayerId::new(1);
pub const YELLOW: PlayerId = PlayerId::new(2);

pub fn piece(owner: PlayerId, index: u8) -> PieceId {
    PieceId::new(owner, index)
}

/// `player_count` seats, `current` to roll, listed pieces moved off home.
pub fn position(
    player_count: usize,
    current: PlayerId,
    placed: &[(PieceId, Location)],
) -> Snapshot {
    let mut roster = Roster::seat(&MatchConfig::new(player_count).names);
    roster.activate(current);

    let mut pieces = PieceSet::starting(player_count);
    for &(id, location) in placed {
        assert!(pieces.set_location(id, location), "no such piece {id}");
    }

    let mut turn = TurnState {
        phase: GamePhase::Playing,
        ..TurnState::default()
    };
    turn.begin_turn(current, pieces.has_piece_outside(current));

    Snapshot {
        roster,
        pieces,
        turn,
        stats: MatchStatistics::new(player_count),
    }
}

pub fn encode(snapshot: Snapshot) -> Vec<u8> {
    SaveFile::new(snapshot, None).encode().unwrap()
}

/// A game wired to a status log and a win ledger.
pub struct Harness {
    pub game: Game,
    pub log: Rc<RefCell<StatusLog>>,
    pub ledger: Rc<RefCell<WinLedger>>,
}

impl Harness {
    /// Fresh game in player selection; `faces` feed the die in order.
    pub fn new(player_count: usize, faces: &[u8]) -> Self {
        Self::with_timing(player_count, faces, Timing::instant())
    }

    pub fn with_timing(player_count: usize, faces: &[u8], timing: Timing) -> Self {
        let log = Rc::new(RefCell::new(StatusLog::new()));
        let ledger = Rc::new(RefCell::new(WinLedger::new()));
        let config = MatchConfig::new(player_count).with_timing(timing);
        let game = GameBuilder::new(config)
            .dice(ScriptedDice::new(faces.iter().copied()))
            .observer(Rc::clone(&log))
            .sink(Rc::clone(&ledger))
            .build()
            .unwrap();
        Self { game, log, ledger }
    }

    /// Game resumed at `snapshot`.
    pub fn at(snapshot: Snapshot, faces: &[u8]) -> Self {
        let player_count = snapshot.roster.len();
        let mut harness = Self::new(player_count, faces);
        harness.game.load(&encode(snapshot)).unwrap();
        harness
    }

    /// Like `at`, with the default delays.
    pub fn timed(snapshot: Snapshot, faces: &[u8]) -> Self {
        let mut harness = Self::with_timing(snapshot.roster.len(), faces, Timing::default());
        harness.game.load(&encode(snapshot)).unwrap();
        harness
    }

    /// Roll and let the die settle.
    pub fn roll(&mut self) {
        assert!(self.game.roll().unwrap().is_applied(), "roll refused");
        self.game.settle().unwrap();
    }

    pub fn location(&self, id: PieceId) -> Location {
        self.game.pieces().get(id).unwrap().location
    }

    pub fn last_status(&self) -> (String, ludo_engine::core::Severity) {
        self.log.borrow().last().cloned().unwrap()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.log.borrow().messages.iter().map(|(m, _)| m.clone()).collect()
    }
}
