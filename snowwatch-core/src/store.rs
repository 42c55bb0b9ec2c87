//! Centralized state store with reducer dispatch.
//!
//! The store is the subscription point for the UI: dispatch returns a
//! [`DispatchResult`] and its `changed` flag tells observers to re-render.

use crate::action::Action;
use crate::reducer::DispatchResult;
use crate::state::AppState;

/// A reducer function: handles one action, mutates state, reports the
/// change flag and requested effects.
pub type Reducer = fn(&mut AppState, Action) -> DispatchResult;

/// Holds the application state; `dispatch` is the single point of mutation.
pub struct Store {
    state: AppState,
    reducer: Reducer,
}

impl Store {
    /// Create a new store with initial state and reducer
    pub fn new(state: AppState, reducer: Reducer) -> Self {
        Self { state, reducer }
    }

    /// Dispatch an action to the store
    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        (self.reducer)(&mut self.state, action)
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Middleware trait for observing dispatches
///
/// Implement this to add logging or other cross-cutting concerns around
/// the reducer.
pub trait Middleware {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &Action);

    /// Called after the reducer ran, with its change flag
    fn after(&mut self, action: &Action, state_changed: bool);
}

/// Middleware that logs dispatches through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Also log the action summary before dispatch
    pub log_before: bool,
}

impl LoggingMiddleware {
    /// Log after each dispatch only.
    pub fn new() -> Self {
        Self { log_before: false }
    }

    /// Log the incoming summary as well; noisy, useful when chasing a
    /// dispatch ordering problem.
    pub fn verbose() -> Self {
        Self { log_before: true }
    }
}

impl Middleware for LoggingMiddleware {
    fn before(&mut self, action: &Action) {
        if self.log_before {
            tracing::debug!(action = %action.summary(), "dispatching");
        }
    }

    fn after(&mut self, action: &Action, state_changed: bool) {
        tracing::debug!(action = action.name(), state_changed, "action processed");
    }
}

/// Store wrapped with a middleware observing every dispatch.
pub struct StoreWithMiddleware<M: Middleware> {
    store: Store,
    middleware: M,
}

impl<M: Middleware> StoreWithMiddleware<M> {
    pub fn new(state: AppState, reducer: Reducer, middleware: M) -> Self {
        Self {
            store: Store::new(state, reducer),
            middleware,
        }
    }

    /// Dispatch an action through middleware and store
    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        self.middleware.before(&action);
        let result = self.store.dispatch(action.clone());
        self.middleware.after(&action, result.changed);
        result
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}
