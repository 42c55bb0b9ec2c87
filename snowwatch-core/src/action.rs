//! Actions: every state transition, one variant each.
//!
//! Naming convention: the prefix groups related actions (City*, Weather*,
//! Ui*) and `Did` marks an async result arriving over the channel.

use crate::client::FetchFailure;
use crate::state::FetchTag;
use crate::verdict::Classification;

/// Application actions.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== City selection =====
    /// Select the catalog entry at this index and fetch its weather.
    /// Selecting the current entry fetches it again.
    CitySelect(usize),

    // ===== Weather =====
    /// Intent: fetch weather for the current selection (startup, manual
    /// refresh key, periodic refresh).
    WeatherFetch,

    /// Result: a fetch resolved to a classification.
    WeatherDidLoad {
        tag: FetchTag,
        classification: Classification,
    },

    /// Result: a fetch resolved to a failure.
    WeatherDidError { tag: FetchTag, failure: FetchFailure },

    // ===== UI =====
    /// Terminal was resized.
    UiTerminalResize(u16, u16),

    /// Periodic tick driving the spinner and snowfall animation.
    Tick,

    /// Exit the application.
    Quit,
}

impl Action {
    /// Stable name for logs and middleware.
    pub fn name(&self) -> &'static str {
        match self {
            Action::CitySelect(_) => "CitySelect",
            Action::WeatherFetch => "WeatherFetch",
            Action::WeatherDidLoad { .. } => "WeatherDidLoad",
            Action::WeatherDidError { .. } => "WeatherDidError",
            Action::UiTerminalResize(_, _) => "UiTerminalResize",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }

    /// Concise form for dispatch logging; keeps payload-heavy variants short.
    pub fn summary(&self) -> String {
        match self {
            Action::WeatherDidLoad {
                tag,
                classification,
            } => {
                format!(
                    "WeatherDidLoad {{ seq: {}, city: {}, classification: {:?} }}",
                    tag.seq,
                    tag.city,
                    classification.as_str()
                )
            }
            Action::WeatherDidError { tag, failure } => {
                // Truncate long error messages
                let msg = if failure.message.len() > 40 {
                    format!("{}...", failure.message.chars().take(37).collect::<String>())
                } else {
                    failure.message.clone()
                };
                format!(
                    "WeatherDidError {{ seq: {}, {}: {:?} }}",
                    tag.seq, failure.kind, msg
                )
            }
            _ => format!("{:?}", self),
        }
    }
}
