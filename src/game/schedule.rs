//! Delayed follow-ups on a virtual clock.
//!
//! Dice settling, forfeited-turn handoffs and the start-phase reveal all
//! happen some time after the action that caused them. They are queued
//! here, stamped with the scheduler's epoch, and run when the host
//! advances the clock. `cancel_all` bumps the epoch, so anything queued
//! before a restart, load or win can never run afterwards.

use std::time::Duration;

/// Work waiting for the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FollowUp {
    /// The die has stopped; read the face and resolve the roll.
    SettleRoll,
    /// Pass the turn after a forfeit.
    HandOff,
    /// Start the opening player's first turn.
    OpenPlay,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    due: Duration,
    seq: u64,
    epoch: u64,
    task: FollowUp,
}

/// Virtual-time task queue.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    epoch: u64,
    seq: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Queue `task` to run `delay` from now.
    pub fn schedule(&mut self, delay: Duration, task: FollowUp) {
        self.seq += 1;
        self.pending.push(Pending {
            due: self.now + delay,
            seq: self.seq,
            epoch: self.epoch,
            task,
        });
    }

    /// Invalidate everything queued so far.
    pub fn cancel_all(&mut self) {
        self.epoch += 1;
        self.pending.clear();
    }

    /// A live follow-up is waiting.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending.iter().any(|p| p.epoch == self.epoch)
    }

    /// When the next live follow-up is due.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.live().map(|(_, p)| p.due).min()
    }

    /// Take the earliest live follow-up due at or before `limit`, moving
    /// the clock to its due time. Stale entries are discarded on the way.
    pub fn pop_due(&mut self, limit: Duration) -> Option<FollowUp> {
        self.pending.retain(|p| p.epoch == self.epoch);
        let (index, _) = self
            .live()
            .filter(|(_, p)| p.due <= limit)
            .min_by_key(|(_, p)| (p.due, p.seq))?;
        let pending = self.pending.swap_remove(index);
        self.now = self.now.max(pending.due);
        Some(pending.task)
    }

    /// Move the clock forward to `to` (never backwards).
    pub fn advance_to(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    fn live(&self) -> impl Iterator<Item = (usize, &Pending)> {
        self.pending
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.epoch == self.epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_runs_in_due_order() {
        let mut sched = Scheduler::new();
        sched.schedule(ms(1500), FollowUp::HandOff);
        sched.schedule(ms(800), FollowUp::SettleRoll);
        assert!(sched.is_busy());
        assert_eq!(sched.next_due(), Some(ms(800)));

        assert_eq!(sched.pop_due(ms(500)), None);
        assert_eq!(sched.pop_due(ms(2000)), Some(FollowUp::SettleRoll));
        assert_eq!(sched.now(), ms(800));
        assert_eq!(sched.pop_due(ms(2000)), Some(FollowUp::HandOff));
        assert_eq!(sched.now(), ms(1500));
        assert!(!sched.is_busy());
    }

    #[test]
    fn test_same_due_keeps_insertion_order() {
        let mut sched = Scheduler::new();
        sched.schedule(Duration::ZERO, FollowUp::OpenPlay);
        sched.schedule(Duration::ZERO, FollowUp::SettleRoll);
        assert_eq!(sched.pop_due(Duration::ZERO), Some(FollowUp::OpenPlay));
        assert_eq!(sched.pop_due(Duration::ZERO), Some(FollowUp::SettleRoll));
    }

    #[test]
    fn test_cancel_all_drops_pending() {
        let mut sched = Scheduler::new();
        sched.schedule(ms(10), FollowUp::HandOff);
        let epoch = sched.epoch();

        sched.cancel_all();
        assert_eq!(sched.epoch(), epoch + 1);
        assert!(!sched.is_busy());
        assert_eq!(sched.next_due(), None);
        assert_eq!(sched.pop_due(ms(100)), None);
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut sched = Scheduler::new();
        sched.advance_to(ms(1000));
        sched.schedule(ms(800), FollowUp::SettleRoll);
        assert_eq!(sched.next_due(), Some(ms(1800)));

        sched.advance_to(ms(500));
        assert_eq!(sched.now(), ms(1000));
    }
}
