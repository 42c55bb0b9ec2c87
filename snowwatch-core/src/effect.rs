//! Side effects described as data.
//!
//! The reducer never performs IO. It returns effects alongside the change
//! flag, and the runtime executes them, feeding results back as actions.

use crate::catalog::City;
use crate::state::FetchTag;

/// Side effects the reducer can request.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch current conditions for `city`, reporting the result under `tag`.
    FetchWeather { city: City, tag: FetchTag },
}
