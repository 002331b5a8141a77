//! The turn state machine.
//!
//! `Game` owns the whole match: roster, pieces, turn flags, statistics,
//! history, the follow-up scheduler, and the three outbound seams (dice,
//! observer, statistics sink). Every public action returns
//! `Result<Outcome, EngineError>`: `Ok(Outcome::Rejected(_))` when the rules
//! say no, `Err(_)` only for faults. Either way a refused action leaves the
//! state untouched.
//!
//! ## Turn flow
//!
//! ```text
//! Selection -> StartPhase -> Playing -> Finished
//!                              |
//!        roll -> (settle) -> forfeit | await selection -> move
//!                                                          |
//!                                     six: roll again, else hand off
//! ```
//!
//! Rolls settle, forfeits hand off and play opens only when the host
//! advances the clock (`advance`, or `settle` to run everything pending).
//! While a follow-up is pending the game is busy and refuses rolls, moves,
//! turn ends, undo and redo.

use tracing::{debug, error, info, instrument, warn};

use super::observer::{GameObserver, NullObserver, StateView};
use super::schedule::{FollowUp, Scheduler};
use crate::board::{Board, PIECES_PER_PLAYER, RING_LEN};
use crate::core::{
    Action, Color, ConfigError, DiceRng, DiceSource, EngineError, GamePhase, Location, MatchConfig,
    Outcome, PieceId, PieceSet, PlayerId, Rejection, Roster, Severity, TurnState, DIE_FACES,
    ROLLS_WHILE_ALL_HOME,
};
use crate::history::{HistoryLog, SaveFile, Snapshot};
use crate::rules::{move_for, possible_moves, resolve, Move, MoveList, Obligation, EXIT_FACE};
use crate::stats::{
    achievements, standings, Achievement, MatchStatistics, NullSink, Standing, StatisticsSink,
    WinLedger, WinRecord,
};

/// Wires a `Game` together.
///
/// ```
/// use ludo_engine::core::{MatchConfig, ScriptedDice, Timing};
/// use ludo_engine::game::GameBuilder;
///
/// let config = MatchConfig::new(2).with_timing(Timing::instant());
/// let game = GameBuilder::new(config)
///     .dice(ScriptedDice::new([6, 3]))
///     .build()
///     .unwrap();
/// assert!(game.roster().is_empty());
/// ```
pub struct GameBuilder {
    config: MatchConfig,
    dice: Option<Box<dyn DiceSource>>,
    observer: Option<Box<dyn GameObserver>>,
    sink: Option<Box<dyn StatisticsSink>>,
}

impl GameBuilder {
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            dice: None,
            observer: None,
            sink: None,
        }
    }

    /// Use this die instead of one seeded from the config.
    #[must_use]
    pub fn dice(mut self, dice: impl DiceSource + 'static) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    #[must_use]
    pub fn observer(mut self, observer: impl GameObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Where wins are reported.
    #[must_use]
    pub fn sink(mut self, sink: impl StatisticsSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Validate the config and build the game in player selection.
    pub fn build(self) -> Result<Game, ConfigError> {
        self.config.validate()?;
        let seed = self.config.seed;
        Ok(Game {
            stats: MatchStatistics::new(self.config.player_count),
            history: HistoryLog::new(self.config.history_depth),
            config: self.config,
            roster: Roster::default(),
            pieces: PieceSet::default(),
            turn: TurnState::default(),
            board: Board::default(),
            scheduler: Scheduler::new(),
            dice: self.dice.unwrap_or_else(|| Box::new(DiceRng::new(seed))),
            observer: self.observer.unwrap_or_else(|| Box::new(NullObserver)),
            sink: self.sink.unwrap_or_else(|| Box::new(NullSink)),
        })
    }
}

/// Outgoing player, optional penalty, incoming player.
#[derive(Clone, Copy, Debug)]
struct HandOff {
    outgoing: PlayerId,
    penalty: Option<(PieceId, u8)>,
    next: PlayerId,
}

/// One match and everything around it.
pub struct Game {
    config: MatchConfig,
    roster: Roster,
    pieces: PieceSet,
    turn: TurnState,
    stats: MatchStatistics,
    /// Derived from `roster`; rebuilt on every roster change.
    board: Board,
    history: HistoryLog,
    scheduler: Scheduler,
    dice: Box<dyn DiceSource>,
    observer: Box<dyn GameObserver>,
    sink: Box<dyn StatisticsSink>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("roster", &self.roster)
            .field("pieces", &self.pieces)
            .field("turn", &self.turn)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Game with the default die, no observer and no sink.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        GameBuilder::new(config).build()
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn pieces(&self) -> &PieceSet {
        &self.pieces
    }

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    #[must_use]
    pub fn stats(&self) -> &MatchStatistics {
        &self.stats
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.turn.phase
    }

    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.turn.current
    }

    /// A follow-up is pending.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.scheduler.is_busy()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Clone of the live state. O(1) for roster and pieces.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            roster: self.roster.clone(),
            pieces: self.pieces.clone(),
            turn: self.turn.clone(),
            stats: self.stats.clone(),
        }
    }

    /// Moves available to the current player for the die showing.
    pub fn legal_moves(&self) -> Result<MoveList, EngineError> {
        match (self.turn.current, self.turn.dice) {
            (Some(player), Some(die)) if self.turn.phase == GamePhase::Playing => {
                possible_moves(&self.board, &self.pieces, player, die)
            }
            _ => Ok(MoveList::new()),
        }
    }

    /// Mandatory subset of `legal_moves`.
    pub fn obligation(&self) -> Result<Obligation, EngineError> {
        let moves = self.legal_moves()?;
        Ok(self.turn.dice.map_or_else(Obligation::default, |die| resolve(&moves, die)))
    }

    /// Progress leaderboard.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        standings(&self.roster, &self.pieces)
    }

    /// Achievements for this match against `ledger`.
    #[must_use]
    pub fn achievements(&self, ledger: &WinLedger) -> Vec<Achievement> {
        achievements(&self.stats, ledger)
    }

    // === Actions ===

    /// Run any action.
    pub fn apply(&mut self, action: Action) -> Result<Outcome, EngineError> {
        match action {
            Action::StartMatch => self.start_match(),
            Action::RollForStart => self.roll_for_start(),
            Action::Roll => self.roll(),
            Action::Select(piece) => self.select_piece(piece),
            Action::EndTurn => self.end_turn(),
            Action::Undo => self.undo(),
            Action::Redo => self.redo(),
            Action::Restart => self.restart(),
        }
    }

    /// Seat the configured players and open the start phase.
    #[instrument(skip(self))]
    pub fn start_match(&mut self) -> Result<Outcome, EngineError> {
        if self.turn.phase != GamePhase::Selection {
            return self.reject(Rejection::MatchRunning);
        }

        let count = self.config.player_count;
        self.scheduler.cancel_all();
        self.roster = Roster::seat(&self.config.names);
        self.pieces = PieceSet::starting(count);
        self.stats = MatchStatistics::new(count);
        self.turn = TurnState {
            phase: GamePhase::StartPhase,
            ..TurnState::default()
        };
        self.board = Board::for_roster(&self.roster);
        self.history.clear();

        info!(players = count, "match started");
        self.status("Rule 1: everyone rolls once to decide who starts", Severity::Info);
        self.notify();
        Ok(Outcome::Applied)
    }

    /// Next seat's start-phase roll. After the last seat, the highest roll
    /// (first seen on a tie) opens play once `start_reveal` has passed.
    #[instrument(skip(self))]
    pub fn roll_for_start(&mut self) -> Result<Outcome, EngineError> {
        if self.turn.phase != GamePhase::StartPhase {
            return self.reject(Rejection::NotStartPhase);
        }

        let seat = PlayerId::new(self.turn.start_rolls_done);
        if self.roster.get(seat).is_none() {
            return Err(EngineError::UnknownPlayer(seat));
        }
        let face = self.draw()?;

        if let Some(player) = self.roster.get_mut(seat) {
            player.start_roll = Some(face);
        }
        self.turn.start_rolls_done += 1;
        let msg = format!("{} rolled {face}", self.name_of(seat));
        self.status(&msg, Severity::Info);

        if usize::from(self.turn.start_rolls_done) == self.roster.len() {
            let (opener, top) = self
                .roster
                .iter()
                .fold(None::<(PlayerId, u8)>, |best, p| match (best, p.start_roll) {
                    (Some((_, top)), Some(roll)) if roll <= top => best,
                    (_, Some(roll)) => Some((p.id, roll)),
                    (best, None) => best,
                })
                .ok_or(EngineError::NoCurrentPlayer)?;

            self.turn.current = Some(opener);
            self.turn.phase = GamePhase::Playing;
            self.roster.activate(opener);
            self.scheduler.schedule(self.config.timing.start_reveal, FollowUp::OpenPlay);

            info!(%opener, roll = top, "start phase decided");
            let msg = format!("{} starts with a {top}", self.name_of(opener));
            self.status(&msg, Severity::Success);
        }

        self.notify();
        Ok(Outcome::Applied)
    }

    /// Throw the die for the current player. The face is known once the
    /// roll settles.
    #[instrument(skip(self))]
    pub fn roll(&mut self) -> Result<Outcome, EngineError> {
        if self.turn.phase != GamePhase::Playing {
            return self.reject(Rejection::NotPlaying);
        }
        if self.is_busy() {
            return self.reject(Rejection::Busy);
        }
        let player = self.current()?;

        if let Some(die) = self.turn.dice {
            if self.turn.has_obligation() {
                return self.reject(Rejection::MandatoryMovePending);
            }
            let moves = possible_moves(&self.board, &self.pieces, player, die)?;
            if !moves.is_empty()
                && (self.turn.has_moved_this_turn || self.turn.rolls_left() == 0)
            {
                return self.reject(Rejection::MoveRequired);
            }
        }
        if self.turn.rolls_left() == 0 {
            return self.reject(Rejection::RollBudgetExhausted);
        }

        self.history.record(self.snapshot());
        self.scheduler.schedule(self.config.timing.roll_settle, FollowUp::SettleRoll);
        debug!(%player, "die thrown");
        Ok(Outcome::Applied)
    }

    /// Move `piece` by the die showing.
    #[instrument(skip(self))]
    pub fn select_piece(&mut self, piece: PieceId) -> Result<Outcome, EngineError> {
        if self.turn.phase != GamePhase::Playing {
            return self.reject(Rejection::NotPlaying);
        }
        if self.is_busy() {
            return self.reject(Rejection::Busy);
        }
        let Some(die) = self.turn.dice else {
            return self.reject(Rejection::RollFirst);
        };
        let player = self.current()?;
        if self.pieces.get(piece).is_none() {
            error!(%piece, "selected piece is not on the board");
            return Err(EngineError::UnknownPiece(piece));
        }
        if piece.owner != player {
            return self.reject(Rejection::NotYourPiece);
        }

        let moves = possible_moves(&self.board, &self.pieces, player, die)?;
        let Some(chosen) = move_for(&moves, piece).copied() else {
            return self.reject(Rejection::PieceCannotMove);
        };

        let obligation = resolve(&moves, die);
        if !obligation.permits(piece) {
            self.turn.touched_piece = Some(piece);
            return self.reject(Rejection::MandatoryMoveRequired);
        }

        let victim = match chosen.captures {
            Some(victim) => {
                let slot = self
                    .pieces
                    .first_free_home_slot(victim.owner, Some(victim))
                    .ok_or(EngineError::NoFreeHomeSlot(victim.owner))?;
                Some((victim, slot))
            }
            None => None,
        };

        self.history.record(self.snapshot());
        self.turn.touched_piece = Some(piece);
        self.execute(player, chosen, victim, die)
    }

    /// Give up the rest of the turn. An abandoned mandatory move is
    /// penalized here like on any other handoff.
    #[instrument(skip(self))]
    pub fn end_turn(&mut self) -> Result<Outcome, EngineError> {
        if self.turn.phase != GamePhase::Playing {
            return self.reject(Rejection::NotPlaying);
        }
        if self.is_busy() {
            return self.reject(Rejection::Busy);
        }
        let plan = self.plan_handoff()?;
        self.history.record(self.snapshot());
        self.apply_handoff(plan);
        Ok(Outcome::Applied)
    }

    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<Outcome, EngineError> {
        if self.is_busy() {
            return self.reject(Rejection::Busy);
        }
        match self.history.undo(self.snapshot()) {
            Some(snapshot) => {
                self.rewind_to(snapshot);
                info!(cursor = self.history.cursor(), "undo");
                self.status("Move undone", Severity::Info);
                self.notify();
                Ok(Outcome::Applied)
            }
            None => self.reject(Rejection::NothingToUndo),
        }
    }

    #[instrument(skip(self))]
    pub fn redo(&mut self) -> Result<Outcome, EngineError> {
        if self.is_busy() {
            return self.reject(Rejection::Busy);
        }
        match self.history.redo() {
            Some(snapshot) => {
                self.rewind_to(snapshot);
                info!(cursor = self.history.cursor(), "redo");
                self.status("Move redone", Severity::Info);
                self.notify();
                Ok(Outcome::Applied)
            }
            None => self.reject(Rejection::NothingToRedo),
        }
    }

    /// Drop the match, its history and anything pending.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Result<Outcome, EngineError> {
        self.scheduler.cancel_all();
        self.roster = Roster::default();
        self.pieces = PieceSet::default();
        self.turn = TurnState::default();
        self.stats = MatchStatistics::new(self.config.player_count);
        self.board = Board::default();
        self.history.clear();

        info!("match reset");
        self.status("Choose the players to start a new match", Severity::Info);
        self.notify();
        Ok(Outcome::Applied)
    }

    /// Encode the live state and dice position.
    ///
    /// Pending follow-ups are not saved: a game saved mid-settle resumes
    /// without the die thrown, and one saved mid-forfeit resumes with the
    /// forfeit still to be ended.
    pub fn save(&self) -> Result<Vec<u8>, EngineError> {
        let bytes = SaveFile::new(self.snapshot(), self.dice.checkpoint()).encode()?;
        debug!(len = bytes.len(), "game saved");
        Ok(bytes)
    }

    /// Replace the live state with a saved one. On failure nothing changes
    /// and an error status is sent.
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn load(&mut self, bytes: &[u8]) -> Result<Outcome, EngineError> {
        let save = match SaveFile::decode(bytes) {
            Ok(save) => save,
            Err(e) => {
                error!(error = %e, "load failed");
                let msg = format!("Could not load the game: {e}");
                self.status(&msg, Severity::Error);
                return Err(e.into());
            }
        };

        self.scheduler.cancel_all();
        if let Some(state) = &save.dice {
            self.dice.restore(state);
        }
        if !save.snapshot.roster.is_empty() {
            self.config.player_count = save.snapshot.roster.len();
            self.config.names = save.snapshot.roster.iter().map(|p| p.name.clone()).collect();
        }
        self.restore(save.snapshot);
        self.history.clear();

        info!(players = self.roster.len(), phase = ?self.turn.phase, "game loaded");
        self.status("Game loaded", Severity::Success);
        self.notify();
        Ok(Outcome::Applied)
    }

    // === Clock ===

    /// Move the clock forward by `dt`, running every follow-up that falls due.
    pub fn advance(&mut self, dt: std::time::Duration) -> Result<(), EngineError> {
        if matches!(self.turn.phase, GamePhase::StartPhase | GamePhase::Playing) {
            let ms = u64::try_from(dt.as_millis()).unwrap_or(u64::MAX);
            self.stats.elapsed_ms = self.stats.elapsed_ms.saturating_add(ms);
        }
        let target = self.scheduler.now() + dt;
        while let Some(task) = self.scheduler.pop_due(target) {
            debug!(?task, "running follow-up");
            self.run(task)?;
        }
        self.scheduler.advance_to(target);
        Ok(())
    }

    /// Advance the clock until nothing is pending.
    pub fn settle(&mut self) -> Result<(), EngineError> {
        while let Some(due) = self.scheduler.next_due() {
            let dt = due.saturating_sub(self.scheduler.now());
            self.advance(dt)?;
        }
        Ok(())
    }

    fn run(&mut self, task: FollowUp) -> Result<(), EngineError> {
        if self.turn.phase != GamePhase::Playing {
            return Ok(());
        }
        match task {
            FollowUp::SettleRoll => self.settle_roll(),
            FollowUp::HandOff => {
                let plan = self.plan_handoff()?;
                self.apply_handoff(plan);
                Ok(())
            }
            FollowUp::OpenPlay => {
                let player = self.current()?;
                self.begin_turn(player);
                self.notify();
                Ok(())
            }
        }
    }

    // === Turn internals ===

    fn settle_roll(&mut self) -> Result<(), EngineError> {
        let player = self.current()?;
        let face = self.draw()?;
        let moves = possible_moves(&self.board, &self.pieces, player, face)?;

        self.turn.dice = Some(face);
        self.turn.rolls_this_turn += 1;
        self.stats.record_roll(player, face);
        debug!(%player, face, rolls = self.turn.rolls_this_turn, "roll settled");

        self.after_roll(player, face, &moves);
        self.notify();
        Ok(())
    }

    fn after_roll(&mut self, player: PlayerId, face: u8, moves: &[Move]) {
        let name = self.name_of(player);

        if moves.is_empty() {
            let outside = self.pieces.has_piece_outside(player);
            let forfeit = if !outside
                && self.turn.rolls_this_turn >= ROLLS_WHILE_ALL_HOME
                && face != EXIT_FACE
            {
                format!("{name} rolled no 6 in three tries (Rule 3). Next player")
            } else if face == EXIT_FACE && !self.turn.has_moved_this_turn {
                format!("{name} rolled a 6 but no piece can move. Next player")
            } else if outside {
                format!("{name} cannot move any piece (Rule 8). Next player")
            } else if self.turn.rolls_left() > 0 {
                let msg = format!(
                    "{name} rolled {face} and needs a 6 to leave home. {} rolls left",
                    self.turn.rolls_left()
                );
                self.status(&msg, Severity::Info);
                return;
            } else {
                format!("{name} has no rolls left. Next player")
            };

            info!(%player, face, "turn forfeited");
            self.status(&forfeit, Severity::Warning);
            self.scheduler.schedule(self.config.timing.handoff, FollowUp::HandOff);
            return;
        }

        let obligation = resolve(moves, face);
        self.turn.mandatory_capture = obligation.capture;
        self.turn.mandatory_from_home = obligation.leave_home;
        if obligation.capture {
            self.status("Rule 10: capturing is mandatory. Pick a piece that captures", Severity::Mandatory);
        } else if obligation.leave_home {
            self.status("Rule 4: on a 6 a piece must leave home", Severity::Mandatory);
        } else {
            let msg = format!("{name} rolled {face}. Pick a piece");
            self.status(&msg, Severity::Info);
        }
    }

    fn execute(
        &mut self,
        player: PlayerId,
        chosen: Move,
        victim: Option<(PieceId, u8)>,
        die: u8,
    ) -> Result<Outcome, EngineError> {
        if let Some((victim, slot)) = victim {
            self.pieces.set_location(victim, Location::Home(slot));
            self.stats.record_capture(player, victim.owner);
            info!(%victim, by = %player, "piece captured");
            let msg = format!("Rule 10: captured a piece of {}", self.name_of(victim.owner));
            self.status(&msg, Severity::Success);
        }

        self.pieces.set_location(chosen.piece, chosen.to);
        self.turn.has_moved_this_turn = true;
        self.stats.record_move(player);
        if chosen.from_home() {
            self.turn.last_move_was_mandatory = chosen.is_capture() || self.turn.mandatory_from_home;
        } else if chosen.is_capture() {
            self.turn.last_move_was_mandatory = true;
        }
        debug!(piece = %chosen.piece, from = ?chosen.from, to = ?chosen.to, "moved");

        match chosen.to {
            Location::Goal(lane) => {
                let msg = format!("Piece entered the goal ({}/4)", lane + 1);
                self.status(&msg, Severity::Info);
            }
            Location::Ring(progress) if usize::from(progress) == RING_LEN - 1 => {
                self.status("Piece waits before the goal lane. Roll exactly 1-4", Severity::Info);
            }
            _ => {}
        }

        if self.pieces.goal_count(player) == PIECES_PER_PLAYER {
            self.declare_winner(player);
        } else if die == EXIT_FACE {
            let outside = self.pieces.has_piece_outside(player);
            self.turn.grant_reroll(outside);
            self.status("Rule 7: rolled a 6, roll again", Severity::Info);
        } else {
            let plan = self.plan_handoff()?;
            self.apply_handoff(plan);
            return Ok(Outcome::Applied);
        }

        self.notify();
        Ok(Outcome::Applied)
    }

    fn declare_winner(&mut self, player: PlayerId) {
        self.turn.phase = GamePhase::Finished;
        self.turn.winner = Some(player);
        self.scheduler.cancel_all();

        let (name, color) = match self.roster.get(player) {
            Some(p) => (p.name.clone(), p.color),
            None => (player.to_string(), Color::SEATING[player.index() % Color::SEATING.len()]),
        };
        let record = WinRecord {
            winner: name.clone(),
            color,
            elapsed_secs: self.stats.elapsed_secs(),
            rolls: u64::from(self.stats.total_rolls),
            moves: u64::from(self.stats.total_moves),
        };
        self.sink.record_win(&record);

        info!(winner = %name, secs = record.elapsed_secs, "match won");
        let msg = format!("Rule 16: {name} wins!");
        self.status(&msg, Severity::Success);
    }

    /// Everything a handoff needs, looked up before anything changes.
    fn plan_handoff(&self) -> Result<HandOff, EngineError> {
        let outgoing = self.current()?;
        let penalty = match self.turn.abandoned_mandatory() {
            Some(piece) => {
                let slot = self
                    .pieces
                    .first_free_home_slot(piece.owner, Some(piece))
                    .ok_or(EngineError::NoFreeHomeSlot(piece.owner))?;
                Some((piece, slot))
            }
            None => None,
        };
        Ok(HandOff {
            outgoing,
            penalty,
            next: outgoing.next(self.roster.len()),
        })
    }

    fn apply_handoff(&mut self, plan: HandOff) {
        if let Some((piece, slot)) = plan.penalty {
            self.pieces.set_location(piece, Location::Home(slot));
            warn!(%piece, "mandatory move abandoned, piece sent home");
            self.status(
                "Rule 13: mandatory move not made. The piece goes back home",
                Severity::Error,
            );
        }

        self.roster.activate(plan.next);
        self.begin_turn(plan.next);
        info!(from = %plan.outgoing, to = %plan.next, "turn handed off");
        self.notify();
    }

    fn begin_turn(&mut self, player: PlayerId) {
        let outside = self.pieces.has_piece_outside(player);
        self.turn.begin_turn(player, outside);
        let rule = if outside {
            "Rule 6: one roll"
        } else {
            "Rule 2: three rolls to get a 6"
        };
        let msg = format!("{}'s turn. {rule}", self.name_of(player));
        self.status(&msg, Severity::Info);
    }

    // === Plumbing ===

    fn current(&self) -> Result<PlayerId, EngineError> {
        let player = self.turn.current.ok_or_else(|| {
            error!("no current player");
            EngineError::NoCurrentPlayer
        })?;
        if self.roster.get(player).is_none() {
            error!(%player, "current player is not seated");
            return Err(EngineError::UnknownPlayer(player));
        }
        Ok(player)
    }

    fn draw(&mut self) -> Result<u8, EngineError> {
        let face = self.dice.roll();
        if (1..=DIE_FACES).contains(&face) {
            Ok(face)
        } else {
            error!(face, "die source out of range");
            Err(EngineError::InvalidDie(face))
        }
    }

    fn name_of(&self, player: PlayerId) -> String {
        self.roster
            .get(player)
            .map_or_else(|| player.to_string(), |p| p.name.clone())
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.roster = snapshot.roster;
        self.pieces = snapshot.pieces;
        self.turn = snapshot.turn;
        self.stats = snapshot.stats;
        self.board = Board::for_roster(&self.roster);
    }

    /// Restore for undo/redo. The match clock keeps running.
    fn rewind_to(&mut self, snapshot: Snapshot) {
        let elapsed = self.stats.elapsed_ms;
        self.restore(snapshot);
        self.stats.elapsed_ms = elapsed;
    }

    fn reject(&mut self, rejection: Rejection) -> Result<Outcome, EngineError> {
        warn!(%rejection, "action rejected");
        self.status(&rejection.to_string(), rejection.severity());
        Ok(Outcome::Rejected(rejection))
    }

    fn status(&mut self, message: &str, severity: Severity) {
        self.observer.on_status(message, severity);
    }

    fn notify(&mut self) {
        let view = StateView {
            roster: &self.roster,
            pieces: &self.pieces,
            turn: &self.turn,
        };
        self.observer.on_state_changed(view);
    }
}
