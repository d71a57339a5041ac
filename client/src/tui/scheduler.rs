//! Deferred UI actions for the single-threaded event loop.
//!
//! The main window schedules work to run after a delay (the delayed hide of
//! the progress overlay) and drains due tasks from the tick handler. Every
//! scheduled task gets a unique [`TaskId`]; a holder that re-schedules keeps
//! only the newest id and ignores fires carrying a stale one, so a
//! superseded task can never act on state it no longer owns. Tasks can also
//! be cancelled outright before they fire.
//!
//! Time is passed in by the caller, which keeps the scheduler deterministic
//! under test.

use std::time::{Duration, Instant};

/// Identity of a scheduled task, unique within a scheduler's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// What a fired task should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Tear down the progress overlay.
    HideProgress,
    /// Expire the transient status message on the chat page.
    ClearStatus,
}

#[derive(Debug)]
struct Task {
    id: TaskId,
    kind: TaskKind,
    due: Instant,
}

/// Single-threaded delayed-task queue drained on event-loop ticks.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `kind` to fire `delay` after `now` and returns its id.
    pub fn schedule(&mut self, kind: TaskKind, delay: Duration, now: Instant) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.tasks.push(Task {
            id,
            kind,
            due: now + delay,
        });
        id
    }

    /// Cancels a pending task. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Whether `id` has neither fired nor been cancelled.
    #[must_use]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    /// Removes and returns every task due at `now`, oldest first.
    pub fn due(&mut self, now: Instant) -> Vec<(TaskId, TaskKind)> {
        let mut fired: Vec<(TaskId, TaskKind)> = Vec::new();
        self.tasks.retain(|task| {
            if task.due <= now {
                fired.push((task.id, task.kind));
                false
            } else {
                true
            }
        });
        fired
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no tasks are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn task_fires_only_after_its_delay() {
        let mut scheduler = Scheduler::new();
        let start = Instant::now();
        let id = scheduler.schedule(TaskKind::HideProgress, DELAY, start);

        assert!(scheduler.due(start + Duration::from_millis(499)).is_empty());
        assert!(scheduler.is_pending(id));

        let fired = scheduler.due(start + DELAY);
        assert_eq!(fired, vec![(id, TaskKind::HideProgress)]);
        assert!(!scheduler.is_pending(id));
    }

    #[test]
    fn fired_task_does_not_fire_twice() {
        let mut scheduler = Scheduler::new();
        let start = Instant::now();
        scheduler.schedule(TaskKind::HideProgress, DELAY, start);

        assert_eq!(scheduler.due(start + DELAY).len(), 1);
        assert!(scheduler.due(start + DELAY * 2).is_empty());
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut scheduler = Scheduler::new();
        let start = Instant::now();
        let id = scheduler.schedule(TaskKind::HideProgress, DELAY, start);

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.due(start + DELAY).is_empty());
    }

    #[test]
    fn rescheduling_yields_a_fresh_id() {
        let mut scheduler = Scheduler::new();
        let start = Instant::now();
        let first = scheduler.schedule(TaskKind::HideProgress, DELAY, start);
        let second = scheduler.schedule(TaskKind::HideProgress, DELAY, start);

        assert_ne!(first, second);
        // A holder that kept only `second` treats `first`'s fire as stale.
        let fired = scheduler.due(start + DELAY);
        assert_eq!(fired.len(), 2);
        assert_eq!(fired[0].0, first);
        assert_eq!(fired[1].0, second);
    }

    #[test]
    fn independent_kinds_coexist() {
        let mut scheduler = Scheduler::new();
        let start = Instant::now();
        scheduler.schedule(TaskKind::HideProgress, DELAY, start);
        scheduler.schedule(TaskKind::ClearStatus, Duration::from_secs(4), start);

        let fired = scheduler.due(start + DELAY);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].1, TaskKind::HideProgress);
        assert_eq!(scheduler.len(), 1);
    }
}
