//! UI components for the snowwatch terminal front end

pub mod city_picker;
pub mod help_line;
pub mod status_line;
pub mod verdict_panel;

use ratatui::{layout::Rect, Frame};
use snowwatch_core::Action;

use crate::runtime::EventKind;

pub use city_picker::{CityPicker, CityPickerProps};
pub use help_line::{HelpLine, HelpLineProps};
pub use status_line::{StatusLine, StatusLineProps, SPINNERS};
pub use verdict_panel::{VerdictPanel, VerdictPanelProps};

/// A pure UI element that renders from props and emits actions.
///
/// Components follow these rules:
/// 1. Props contain all read-only data needed for rendering.
/// 2. `handle_event` returns actions, never mutates external state.
/// 3. `render` is a function of props plus internal UI state such as a
///    scroll offset.
///
/// Internal UI state lives in `&mut self`; data mutations go through
/// actions dispatched to the reducer.
pub trait Component<A = Action> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Returns any type implementing `IntoIterator<Item = A>`:
    /// `None` for no actions, `Some(action)` for one, `vec![...]` for many.
    /// Default implementation returns no actions (render-only components).
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
