//! Outbound callbacks: rendering and status text.
//!
//! The engine never draws anything. After each committed change it hands
//! the observer a borrowed view of the state, and it reports guidance and
//! rule messages as `(message, severity)` pairs. Observers must not keep
//! the borrowed view past the call.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{PieceSet, Roster, Severity, TurnState};

/// Read-only view of the live state.
#[derive(Clone, Copy, Debug)]
pub struct StateView<'a> {
    pub roster: &'a Roster,
    pub pieces: &'a PieceSet,
    pub turn: &'a TurnState,
}

/// Receives state changes and status messages.
pub trait GameObserver {
    /// Called after every committed mutation.
    fn on_state_changed(&mut self, _view: StateView<'_>) {}

    /// Advisory text for the acting player.
    fn on_status(&mut self, _message: &str, _severity: Severity) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {}

impl<T: GameObserver + ?Sized> GameObserver for Box<T> {
    fn on_state_changed(&mut self, view: StateView<'_>) {
        (**self).on_state_changed(view);
    }

    fn on_status(&mut self, message: &str, severity: Severity) {
        (**self).on_status(message, severity);
    }
}

impl<T: GameObserver> GameObserver for Rc<RefCell<T>> {
    fn on_state_changed(&mut self, view: StateView<'_>) {
        self.borrow_mut().on_state_changed(view);
    }

    fn on_status(&mut self, message: &str, severity: Severity) {
        self.borrow_mut().on_status(message, severity);
    }
}

/// Keeps every status message and counts state changes.
#[derive(Clone, Debug, Default)]
pub struct StatusLog {
    pub messages: Vec<(String, Severity)>,
    pub changes: usize,
}

impl StatusLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent message.
    #[must_use]
    pub fn last(&self) -> Option<&(String, Severity)> {
        self.messages.last()
    }

    /// True if any message had `severity`.
    #[must_use]
    pub fn saw(&self, severity: Severity) -> bool {
        self.messages.iter().any(|(_, s)| *s == severity)
    }
}

impl GameObserver for StatusLog {
    fn on_state_changed(&mut self, _view: StateView<'_>) {
        self.changes += 1;
    }

    fn on_status(&mut self, message: &str, severity: Severity) {
        self.messages.push((message.to_string(), severity));
    }
}
