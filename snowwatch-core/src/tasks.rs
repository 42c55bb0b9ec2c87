//! Async task pool for fetches.
//!
//! Tasks are registered under a key; spawning on an occupied key aborts the
//! previous task. An aborted fetch sends nothing, and the reducer's tag
//! check covers the case where an old response was already on the channel.

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

use crate::action::Action;

/// Identifies a task for cancellation and replacement.
///
/// Tasks with the same key are mutually exclusive.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Spawns fetch futures and routes their resulting actions back to the
/// dispatch loop.
pub struct TaskPool {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl TaskPool {
    /// The `action_tx` side of the dispatch loop's channel; completed tasks
    /// send their action through it.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task, aborting any existing task with the same key.
    ///
    /// The future resolves to the action to dispatch. If the task is aborted
    /// before completion, no action is sent.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let key = key.into();

        // Cancel existing task with this key
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            let action = future.await;
            // Receiver gone means the loop is shutting down
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Abort the task registered under `key`, if any.
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(handle) = self.tasks.remove(key) {
            handle.abort();
        }
    }

    /// Abort everything; used on shutdown.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Whether a task occupies `key` (it may already have completed).
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
