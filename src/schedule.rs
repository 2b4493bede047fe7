//! One-shot deferred tasks driven by an explicit clock.
//!
//! The engine never spawns threads or sleeps. Deferred work (clearing a new
//! widget's animation flag, polling live payloads) is queued here with a due
//! time, and the host moves the clock forward with [`Scheduler::advance`].
//! Tasks that come due are handed back to the caller to execute.
//!
//! Cancelled tasks stay in the heap and are skipped when popped.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

use crate::model::WidgetId;

/// Identifier of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// What a task does when it comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    /// Clear `is_new` once the entry animation has played.
    ClearNewFlag(WidgetId),
    /// Ask the data feed for a fresh payload.
    RefreshPayload(WidgetId),
}

impl TaskAction {
    pub fn widget(&self) -> WidgetId {
        match self {
            TaskAction::ClearNewFlag(id) | TaskAction::RefreshPayload(id) => *id,
        }
    }
}

/// A task that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub due: Duration,
    pub action: TaskAction,
}

/// Heap entry, ordered so the earliest due time pops first. Equal due times
/// pop in scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    id: TaskId,
    due: Duration,
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.id.cmp(&self.id))
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    queue: BinaryHeap<QueueEntry>,
    /// Live tasks. Anything in `queue` but not here was cancelled.
    active: HashMap<TaskId, TaskAction>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks still waiting.
    pub fn pending(&self) -> usize {
        self.active.len()
    }

    /// Queue `action` to run `delay` from now.
    pub fn schedule_in(&mut self, delay: Duration, action: TaskAction) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due = self.now + delay;
        self.queue.push(QueueEntry { id, due });
        self.active.insert(id, action);
        id
    }

    /// Cancel every task aimed at `widget`. Returns how many were dropped.
    pub fn cancel_for_widget(&mut self, widget: WidgetId) -> usize {
        let before = self.active.len();
        self.active.retain(|_, action| action.widget() != widget);
        before - self.active.len()
    }

    /// Move the clock forward and return every task now due, earliest first.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Task> {
        self.now += elapsed;
        let mut due = Vec::new();
        while let Some(entry) = self.queue.peek().copied() {
            if entry.due > self.now {
                break;
            }
            self.queue.pop();
            if let Some(action) = self.active.remove(&entry.id) {
                due.push(Task {
                    id: entry.id,
                    due: entry.due,
                    action,
                });
            }
        }
        due
    }
}
