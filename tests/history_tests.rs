//! Undo/redo through the game: what gets recorded, how far back it goes.

mod common;

use std::time::Duration;

use common::{piece, position, Harness, BLUE, RED};
use ludo_engine::core::{GamePhase, Location, Outcome, Rejection};

/// Rolls and moves are both undoable, and redo walks back to the live state.
#[test]
fn test_undo_roll_and_move() {
    let mut h = Harness::at(position(2, RED, &[]), &[6]);
    h.roll();
    h.game.select_piece(piece(RED, 0)).unwrap();
    let live = h.game.snapshot();

    assert!(h.game.undo().unwrap().is_applied());
    assert_eq!(h.game.turn().dice, Some(6));
    assert_eq!(h.location(piece(RED, 0)), Location::Home(0));

    assert!(h.game.undo().unwrap().is_applied());
    assert_eq!(h.game.turn().dice, None);
    assert_eq!(h.game.stats().total_rolls, 0);
    assert!(!h.game.can_undo());
    assert_eq!(h.game.undo().unwrap(), Outcome::Rejected(Rejection::NothingToUndo));

    h.game.redo().unwrap();
    h.game.redo().unwrap();
    assert_eq!(h.game.snapshot(), live);
    assert_eq!(h.game.redo().unwrap(), Outcome::Rejected(Rejection::NothingToRedo));
}

/// A new action after an undo discards the redo branch.
#[test]
fn test_new_action_truncates_redo() {
    let mut h = Harness::at(position(2, RED, &[]), &[6]);
    h.roll();
    h.game.select_piece(piece(RED, 0)).unwrap();
    h.game.undo().unwrap();
    assert!(h.game.can_redo());

    h.game.select_piece(piece(RED, 3)).unwrap();
    assert!(!h.game.can_redo());
    assert_eq!(h.location(piece(RED, 3)), Location::Ring(0));
    assert_eq!(h.location(piece(RED, 0)), Location::Home(0));
}

/// Undo across a handoff gives the turn back, active flag included.
#[test]
fn test_undo_across_handoff() {
    let mut h = Harness::at(position(2, RED, &[(piece(RED, 0), Location::Ring(3))]), &[2]);
    h.roll();
    h.game.select_piece(piece(RED, 0)).unwrap();
    assert_eq!(h.game.current_player(), Some(BLUE));

    h.game.undo().unwrap();
    assert_eq!(h.game.current_player(), Some(RED));
    assert!(h.game.roster().get(RED).unwrap().active);
    assert!(!h.game.roster().get(BLUE).unwrap().active);
    assert_eq!(h.location(piece(RED, 0)), Location::Ring(3));
}

/// At most twenty steps can be undone.
#[test]
fn test_history_depth_is_twenty() {
    let mut h = Harness::at(position(2, RED, &[]), &[1; 30]);
    for _ in 0..30 {
        h.roll();
    }
    assert_eq!(h.game.history().depth(), 20);

    let mut undone = 0;
    while h.game.undo().unwrap().is_applied() {
        undone += 1;
    }
    assert_eq!(undone, 20);
}

/// The match clock is wall time and is not rewound.
#[test]
fn test_undo_keeps_elapsed_time() {
    let mut h = Harness::at(position(2, RED, &[]), &[3]);
    h.roll();
    h.game.advance(Duration::from_secs(5)).unwrap();

    h.game.undo().unwrap();
    assert_eq!(h.game.turn().dice, None);
    assert_eq!(h.game.stats().elapsed_ms, 5000);
}

/// Undoing the winning move reopens play; the recorded win stays.
#[test]
fn test_undo_after_win() {
    let snapshot = position(
        2,
        RED,
        &[
            (piece(RED, 0), Location::Ring(39)),
            (piece(RED, 1), Location::Goal(1)),
            (piece(RED, 2), Location::Goal(2)),
            (piece(RED, 3), Location::Goal(3)),
        ],
    );
    let mut h = Harness::at(snapshot, &[1]);
    h.roll();
    h.game.select_piece(piece(RED, 0)).unwrap();
    assert_eq!(h.game.phase(), GamePhase::Finished);

    h.game.undo().unwrap();
    assert_eq!(h.game.phase(), GamePhase::Playing);
    assert_eq!(h.game.turn().winner, None);
    assert_eq!(h.ledger.borrow().total_wins, 1);
}

/// Refused actions leave no history behind.
#[test]
fn test_rejections_not_recorded() {
    let mut h = Harness::at(position(2, RED, &[(piece(RED, 0), Location::Ring(3))]), &[2]);
    h.roll();
    let before = h.game.history().len();

    h.game.roll().unwrap();
    h.game.select_piece(piece(BLUE, 0)).unwrap();
    h.game.select_piece(piece(RED, 1)).unwrap();
    assert_eq!(h.game.history().len(), before);
}

/// Undo is refused with nothing recorded, including right after a restart.
#[test]
fn test_restart_clears_history() {
    let mut h = Harness::at(position(2, RED, &[]), &[4]);
    h.roll();
    assert!(h.game.can_undo());

    h.game.restart().unwrap();
    assert!(!h.game.can_undo());
    assert!(!h.game.can_redo());
    assert_eq!(h.game.undo().unwrap(), Outcome::Rejected(Rejection::NothingToUndo));
}
