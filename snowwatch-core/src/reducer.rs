//! The reducer: `(state, action) -> DispatchResult`.
//!
//! All state mutation happens here, and nothing else does. No IO; fetches
//! are requested as effects and resolve as `WeatherDid*` actions carrying
//! the tag they were issued with.

use tracing::{debug, warn};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

/// Result of one dispatch: whether observers must re-render, plus any
/// effects for the runtime to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<Effect>,
}

impl DispatchResult {
    /// No state change, no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// State changed with a single effect.
    #[inline]
    pub fn changed_with(effect: Effect) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

impl Default for DispatchResult {
    fn default() -> Self {
        Self::unchanged()
    }
}

/// Tag a new fetch for the current selection and request it as an effect.
fn issue_fetch(state: &mut AppState) -> DispatchResult {
    let tag = state.begin_fetch();
    let city = state.selected_city().clone();
    DispatchResult::changed_with(Effect::FetchWeather { city, tag })
}

/// Handle one action.
pub fn reduce(state: &mut AppState, action: Action) -> DispatchResult {
    match action {
        // ===== City selection =====
        Action::CitySelect(index) => {
            if index >= state.catalog.len() {
                warn!(
                    index,
                    len = state.catalog.len(),
                    "ignoring out-of-range selection"
                );
                return DispatchResult::unchanged();
            }
            // Selection updates before its fetch is issued; the display
            // keeps the current verdict until the result arrives.
            state.selected = index;
            issue_fetch(state)
        }

        // ===== Weather =====
        Action::WeatherFetch => issue_fetch(state),

        Action::WeatherDidLoad {
            tag,
            classification,
        } => {
            if !state.accepts(tag) {
                debug!(seq = tag.seq, city = tag.city, "discarding stale result");
                return DispatchResult::unchanged();
            }
            state.in_flight = None;
            state.last_failure = None;
            state.classification = Some(classification);
            DispatchResult::changed()
        }

        Action::WeatherDidError { tag, failure } => {
            if !state.accepts(tag) {
                debug!(seq = tag.seq, city = tag.city, "discarding stale failure");
                return DispatchResult::unchanged();
            }
            warn!(kind = %failure.kind, error = %failure.message, "weather fetch failed");
            state.in_flight = None;
            // Unknown means not snowing; a verdict the failed fetch was
            // meant to replace must not survive it.
            state.classification = None;
            state.last_failure = Some(failure);
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // Only the spinner and the snowfall animate, so ticks re-render
            // only while loading or snowing.
            if state.is_loading() || state.verdict().is_snowing() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => {
            // Quit is handled in the run loop, not here
            DispatchResult::unchanged()
        }
    }
}
