//! Core logic for snowwatch: the city catalog, the weather client, and the
//! state container the terminal UI renders from. No terminal types in here;
//! the `snowwatch` crate owns presentation.
//!
//! # Architecture
//!
//! A small Redux-style loop:
//!
//! - [`Action`] values describe every state transition.
//! - [`reduce`] is the only mutator; it returns a [`DispatchResult`] with a
//!   re-render flag and any [`Effect`]s to execute.
//! - The runtime executes effects by spawning [`OpenWeatherClient`] calls on
//!   a [`TaskPool`]; results come back over the action channel as
//!   `WeatherDid*` actions, so state is only ever touched from the dispatch
//!   loop.
//! - Every fetch carries a [`FetchTag`] and the reducer discards results
//!   whose tag is no longer current. That is what keeps a slow response for
//!   an earlier selection from overwriting a later one.

pub mod action;
pub mod catalog;
pub mod client;
pub mod effect;
pub mod reducer;
pub mod state;
pub mod store;
pub mod tasks;
pub mod timers;
pub mod verdict;

// Domain exports
pub use catalog::{Catalog, City};
pub use verdict::{Classification, Verdict, SNOW};

// Client exports
pub use client::{
    FetchError, FetchErrorKind, FetchFailure, OpenWeatherClient, WeatherConfig, DEFAULT_API_BASE,
};

// Dispatch exports
pub use action::Action;
pub use effect::Effect;
pub use reducer::{reduce, DispatchResult};
pub use state::{AppState, FetchTag};
pub use store::{LoggingMiddleware, Middleware, Reducer, Store, StoreWithMiddleware};

// Async plumbing exports
pub use tasks::{TaskKey, TaskPool};
pub use timers::{TimerKey, Timers};
