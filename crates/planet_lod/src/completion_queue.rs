//! Cross-thread completion queue.
//!
//! Following the Enqueue → Drain pattern: worker threads enqueue completion
//! actions, the owning thread drains them once per tick.
//!
//! ```text
//! rayon worker            rayon worker             owning thread
//! ┌──────────┐            ┌──────────┐             ┌──────────────────┐
//! │ generate │            │ generate │             │ drain()          │
//! └────┬─────┘            └────┬─────┘             │  swap out queue  │
//!      │ enqueue(commit)       │ enqueue(commit)   │  take commit lock│
//!      └───────────┬───────────┘                   │  run FIFO        │
//!                  ▼                               └──────────────────┘
//!           [ pending actions ] ─────────────────────────────▲
//! ```
//!
//! Actions enqueued while a drain runs (including from inside an action) wait
//! for the next drain. Synchronous commits take [`CompletionQueue::commit_lock`]
//! so they never interleave with drained ones.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// A deferred completion action.
pub type Completion = Box<dyn FnOnce() + Send>;

/// FIFO of completion actions shared between producer threads and the owner.
#[derive(Default)]
pub struct CompletionQueue {
  /// Actions waiting for the next drain
  pending: Mutex<Vec<Completion>>,
  /// Serializes every commit to the mesh sinks
  commit: Mutex<()>,
}

impl CompletionQueue {
  pub fn new() -> Self {
    Self::default()
  }

  /// Queue an action for the next drain. Callable from any thread.
  pub fn enqueue<F>(&self, action: F)
  where
    F: FnOnce() + Send + 'static,
  {
    self.pending_actions().push(Box::new(action));
  }

  /// Run every queued action in FIFO order under the commit lock.
  ///
  /// Returns the number of actions run.
  pub fn drain(&self) -> usize {
    let actions = std::mem::take(&mut *self.pending_actions());
    if actions.is_empty() {
      return 0;
    }

    let count = actions.len();
    let _commit = self.commit_lock();
    for action in actions {
      action();
    }
    count
  }

  /// Lock held while results are committed.
  pub fn commit_lock(&self) -> MutexGuard<'_, ()> {
    self.commit.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Number of actions waiting for the next drain.
  pub fn pending_count(&self) -> usize {
    self.pending_actions().len()
  }

  pub fn is_empty(&self) -> bool {
    self.pending_count() == 0
  }

  // A panicking action must not wedge every later commit.
  fn pending_actions(&self) -> MutexGuard<'_, Vec<Completion>> {
    self.pending.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

#[cfg(test)]
#[path = "completion_queue_test.rs"]
mod completion_queue_test;
