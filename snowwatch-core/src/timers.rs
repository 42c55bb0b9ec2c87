//! Named interval timers feeding the dispatch loop.
//!
//! Two consumers: the animation tick and the periodic weather refresh.
//! Each timer repeatedly emits the action its factory produces.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::action::Action;

/// Identifies a timer for replacement and cancellation.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TimerKey(String);

impl TimerKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl From<&'static str> for TimerKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

/// Long-lived action sources, unlike the one-shot [`TaskPool`] tasks.
///
/// [`TaskPool`]: crate::tasks::TaskPool
pub struct Timers {
    handles: HashMap<TimerKey, JoinHandle<()>>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Timers {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            handles: HashMap::new(),
            action_tx,
        }
    }

    /// Emit `action_fn()` every `period`, starting one full period from now.
    ///
    /// Registering on an occupied key replaces the previous timer.
    pub fn interval<F>(
        &mut self,
        key: impl Into<TimerKey>,
        period: Duration,
        action_fn: F,
    ) -> &mut Self
    where
        F: Fn() -> Action + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;
                if tx.send(action_fn()).is_err() {
                    // Channel closed, the loop is gone
                    break;
                }
            }
        });

        self.handles.insert(key, handle);
        self
    }

    /// Stop the timer registered under `key`, if any.
    pub fn cancel(&mut self, key: &TimerKey) {
        if let Some(handle) = self.handles.remove(key) {
            handle.abort();
        }
    }

    /// Stop everything; used on shutdown.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }

    pub fn is_active(&self, key: &TimerKey) -> bool {
        self.handles.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}
