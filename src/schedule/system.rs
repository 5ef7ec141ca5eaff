//! Wall-clock scheduler for interactive front ends.

use std::time::{Duration, Instant};

use super::{DeferredTask, Scheduler, TaskId, TaskQueue};

/// Scheduler driven by `Instant`. The front end polls `Game::run_due` from
/// its event loop; `next_deadline` tells it how long it may sleep.
#[derive(Clone, Debug)]
pub struct SystemScheduler {
    origin: Instant,
    queue: TaskQueue,
}

impl SystemScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            queue: TaskQueue::default(),
        }
    }

    /// Time until the next task is due, zero if one already is.
    #[must_use]
    pub fn time_until_next(&self) -> Option<Duration> {
        self.queue
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.now()))
    }
}

impl Default for SystemScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SystemScheduler {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn schedule_after(&mut self, delay: Duration, task: DeferredTask) -> TaskId {
        let deadline = self.now() + delay;
        self.queue.push(deadline, task)
    }

    fn cancel(&mut self, id: TaskId) -> bool {
        self.queue.cancel(id)
    }

    fn cancel_all(&mut self) {
        self.queue.clear();
    }

    fn pop_due(&mut self) -> Option<DeferredTask> {
        let now = self.now();
        self.queue.pop_due(now)
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_deadline()
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}
