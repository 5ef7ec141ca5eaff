//! Deferred transitions and the engine clock.
//!
//! The engine never sleeps. Every pause (mismatch settle, CPU thinking, the
//! CPU's second reveal, the elapsed-time tick) is a `DeferredTask` handed to
//! a `Scheduler`; the driver fires tasks once they are due.
//!
//! ## Ordering
//!
//! Tasks fire by deadline, and tasks sharing a deadline fire in the order
//! they were scheduled. `cancel_all` drops everything pending, which is how a
//! new game guarantees no stale settle can touch the fresh board.
//!
//! ## Implementations
//!
//! - [`ManualScheduler`]: virtual time advanced by the caller (tests, replays)
//! - [`SystemScheduler`]: wall-clock time from `Instant`

mod manual;
mod system;

pub use manual::ManualScheduler;
pub use system::SystemScheduler;

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Handle for cancelling a single scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u64);

/// Work the engine defers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeferredTask {
    /// Turn a mismatched pair back down.
    SettleMismatch { first: CardId, second: CardId },
    /// Start a CPU move.
    CpuMove,
    /// Reveal the second card of a remembered pair.
    CpuReveal(CardId),
    /// Choose and reveal the second card after exploring `first`.
    CpuFollowUp { first: CardId },
    /// Elapsed-time tick in solo games.
    ClockTick,
}

/// Source of time and deferred execution.
pub trait Scheduler {
    /// Time since the scheduler's origin.
    fn now(&self) -> Duration;

    /// Queue `task` to fire `delay` from now.
    fn schedule_after(&mut self, delay: Duration, task: DeferredTask) -> TaskId;

    /// Cancel one task. Returns whether it was still pending.
    fn cancel(&mut self, id: TaskId) -> bool;

    /// Cancel every pending task.
    fn cancel_all(&mut self);

    /// Remove and return the earliest task whose deadline has passed.
    fn pop_due(&mut self) -> Option<DeferredTask>;

    /// Deadline of the earliest pending task.
    fn next_deadline(&self) -> Option<Duration>;

    /// Number of pending tasks.
    fn pending(&self) -> usize;
}

/// Deadline-ordered task storage shared by the scheduler implementations.
#[derive(Clone, Debug, Default)]
pub(crate) struct TaskQueue {
    next_seq: u64,
    tasks: BTreeMap<(Duration, u64), DeferredTask>,
}

impl TaskQueue {
    pub(crate) fn push(&mut self, deadline: Duration, task: DeferredTask) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.insert((deadline, seq), task);
        TaskId(seq)
    }

    pub(crate) fn cancel(&mut self, id: TaskId) -> bool {
        let key = self.tasks.keys().find(|(_, seq)| *seq == id.0).copied();
        match key {
            Some(key) => self.tasks.remove(&key).is_some(),
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.tasks.clear();
    }

    pub(crate) fn pop_due(&mut self, now: Duration) -> Option<DeferredTask> {
        let (&key, _) = self.tasks.first_key_value()?;
        if key.0 > now {
            return None;
        }
        self.tasks.remove(&key)
    }

    pub(crate) fn next_deadline(&self) -> Option<Duration> {
        self.tasks.keys().next().map(|(deadline, _)| *deadline)
    }

    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }
}
