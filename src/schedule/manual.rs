//! Virtual-time scheduler.

use std::time::Duration;

use super::{DeferredTask, Scheduler, TaskId, TaskQueue};

/// Scheduler whose clock only moves when told to.
///
/// ```
/// use std::time::Duration;
/// use memory_engine::schedule::{DeferredTask, ManualScheduler, Scheduler};
///
/// let mut scheduler = ManualScheduler::new();
/// scheduler.schedule_after(Duration::from_millis(500), DeferredTask::CpuMove);
///
/// assert_eq!(scheduler.pop_due(), None);
/// scheduler.advance(Duration::from_millis(500));
/// assert_eq!(scheduler.pop_due(), Some(DeferredTask::CpuMove));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    queue: TaskQueue,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward. Tasks are not fired; the driver pops them.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Set the clock. Time never runs backwards; earlier values are ignored.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule_after(&mut self, delay: Duration, task: DeferredTask) -> TaskId {
        self.queue.push(self.now + delay, task)
    }

    fn cancel(&mut self, id: TaskId) -> bool {
        self.queue.cancel(id)
    }

    fn cancel_all(&mut self) {
        self.queue.clear();
    }

    fn pop_due(&mut self) -> Option<DeferredTask> {
        self.queue.pop_due(self.now)
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_deadline()
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}
