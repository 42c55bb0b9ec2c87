//! Terminal front end for snowwatch.
//!
//! `snowwatch-core` owns the state machine and the weather client; this
//! crate owns everything terminal-shaped: the event poller, the dispatch
//! loop, the components, and the sprite art. The binary in `main.rs` wires
//! configuration and the terminal lifecycle around [`runtime::Runtime`].

pub mod components;
pub mod runtime;
pub mod sprites;
pub mod testing;
pub mod ui;

pub use runtime::{spawn_event_poller, EventKind, Runtime, TICK_INTERVAL};
pub use ui::Ui;
