//! Deferred continuation queue.
//!
//! Some reactions must only run once the current UI turn's side effects have
//! settled, e.g. marking a widget ready after its initial load. Such work is
//! posted to a [`DeferredQueue`] and drained by the host's event loop after
//! the turn completes.
//!
//! Queued entries are plain data rather than closures. The owner interprets
//! each entry against its *current* state when it runs, never against the
//! state captured when it was posted.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::logging::targets;

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

#[derive(Debug)]
struct TaskData<T> {
    id: TaskId,
    task: T,
}

/// FIFO queue of deferred continuations.
///
/// Entries posted while a batch is being processed are not part of that
/// batch; they run on the next drain, after everything that was already
/// pending.
#[derive(Debug)]
pub struct DeferredQueue<T> {
    tasks: VecDeque<TaskData<T>>,
}

impl<T> DeferredQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    /// Post a continuation to run after the current turn.
    ///
    /// Returns the task ID that can be used to cancel it.
    pub fn post(&mut self, task: T) -> TaskId {
        let id = next_task_id();
        tracing::trace!(target: targets::TASK, task_id = id.as_u64(), "posted deferred task");
        self.tasks.push_back(TaskData { id, task });
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was found and cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if let Some(pos) = self.tasks.iter().position(|t| t.id == id) {
            self.tasks.remove(pos);
            crate::combo_debug!(task_id = id.as_u64(), "cancelled deferred task");
            true
        } else {
            false
        }
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Check whether an equal task is already pending.
    pub fn contains(&self, task: &T) -> bool
    where
        T: PartialEq,
    {
        self.tasks.iter().any(|t| &t.task == task)
    }

    /// Take every task that is pending right now, in posting order.
    pub fn take_batch(&mut self) -> Vec<T> {
        let batch: Vec<T> = self.tasks.drain(..).map(|t| t.task).collect();
        if !batch.is_empty() {
            tracing::trace!(target: targets::TASK, count = batch.len(), "draining deferred tasks");
        }
        batch
    }

    /// Discard all pending tasks.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = DeferredQueue::new();
        queue.post("first");
        queue.post("second");
        queue.post("third");

        assert_eq!(queue.pending_count(), 3);
        assert_eq!(queue.take_batch(), vec!["first", "second", "third"]);
        assert!(!queue.has_pending());
    }

    #[test]
    fn test_cancel() {
        let mut queue = DeferredQueue::new();
        let a = queue.post(1);
        queue.post(2);

        assert!(queue.cancel(a));
        assert!(!queue.cancel(a));
        assert_eq!(queue.take_batch(), vec![2]);
    }

    #[test]
    fn test_posted_after_take_waits_for_next_batch() {
        let mut queue = DeferredQueue::new();
        queue.post('a');

        let batch = queue.take_batch();
        queue.post('b');

        assert_eq!(batch, vec!['a']);
        assert_eq!(queue.take_batch(), vec!['b']);
    }

    #[test]
    fn test_contains_and_unique_ids() {
        let mut queue = DeferredQueue::new();
        let a = queue.post(7);
        let b = queue.post(8);

        assert_ne!(a, b);
        assert!(queue.contains(&7));
        assert!(!queue.contains(&9));

        queue.clear();
        assert!(!queue.contains(&7));
    }
}
