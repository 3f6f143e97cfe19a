//! # Task Scopes
//!
//! Every background task belongs to a `TaskScope`. Cancelling the scope (or
//! dropping it) aborts all of its tasks, so nothing outlives the screen or
//! application that spawned it.
//!
//! ```text
//! app scope       → network monitor
//! view-model scope → weather fetches, quote fetches
//! ```

use std::future::Future;

use log::debug;
use tokio::task::AbortHandle;

pub struct TaskScope {
    name: &'static str,
    handles: Vec<AbortHandle>,
    cancelled: bool,
}

impl TaskScope {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            handles: Vec::new(),
            cancelled: false,
        }
    }

    /// Spawn a task owned by this scope. Must be called inside a tokio runtime.
    ///
    /// Spawning on a cancelled scope is a no-op.
    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.cancelled {
            debug!("Scope '{}' is cancelled, not spawning", self.name);
            return;
        }
        self.handles.retain(|handle| !handle.is_finished());
        let handle = tokio::spawn(future);
        self.handles.push(handle.abort_handle());
    }

    /// Number of tasks that have not finished yet.
    pub fn active(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Abort every task in the scope. Idempotent.
    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;
        let count = self.handles.len();
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        debug!("Scope '{}' cancelled ({} tasks aborted)", self.name, count);
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.cancel();
    }
}
