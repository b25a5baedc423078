//! Cancellable scheduled tasks on a host-driven clock.
//!
//! The engine never sleeps. The host advances time with `tick`, and every
//! task whose due time falls inside that window runs, earliest first. Tasks
//! die with the scheduler, so nothing fires after teardown.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
struct Scheduled<T> {
    id: TaskId,
    due: Duration,
    seq: u64,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    tasks: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            tasks: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time on the scheduler's clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Run `task` once `delay` has elapsed from now.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskId {
        let id = TaskId::new();
        self.tasks.push(Scheduled {
            id,
            due: self.now + delay,
            seq: self.next_seq,
            task,
        });
        self.next_seq += 1;
        id
    }

    /// Drop a task before it runs. Returns false if it already ran or never existed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        before != self.tasks.len()
    }

    /// Drop every pending task, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.tasks.len();
        self.tasks.clear();
        count
    }

    /// Remove the earliest task due at or before `until`, moving the clock
    /// to its due time. Ties run in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let position = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;

        let scheduled = self.tasks.remove(position);
        self.now = self.now.max(scheduled.due);
        Some(scheduled.task)
    }

    /// Move the clock forward to `until` without running anything.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_tasks_run_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(300), "late");
        scheduler.schedule(ms(100), "early");
        scheduler.schedule(ms(100), "early-second");

        assert_eq!(scheduler.pop_due(ms(50)), None);
        assert_eq!(scheduler.pop_due(ms(1000)), Some("early"));
        assert_eq!(scheduler.now(), ms(100));
        assert_eq!(scheduler.pop_due(ms(1000)), Some("early-second"));
        assert_eq!(scheduler.pop_due(ms(1000)), Some("late"));
        assert_eq!(scheduler.pop_due(ms(1000)), None);
    }

    #[test]
    fn test_delay_is_relative_to_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(ms(500));
        scheduler.schedule(ms(100), 1);
        assert_eq!(scheduler.pop_due(ms(599)), None);
        assert_eq!(scheduler.pop_due(ms(600)), Some(1));
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(ms(10), 1);
        scheduler.schedule(ms(20), 2);

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert_eq!(scheduler.pop_due(ms(100)), Some(2));
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(10), 1);
        scheduler.schedule(ms(20), 2);
        assert_eq!(scheduler.cancel_all(), 2);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.pop_due(ms(100)), None);
    }

    #[test]
    fn test_clock_never_goes_back() {
        let mut scheduler: Scheduler<()> = Scheduler::new();
        scheduler.advance_to(ms(200));
        scheduler.advance_to(ms(100));
        assert_eq!(scheduler.now(), ms(200));
    }
}
