//! Component aggregation, layout, and event-to-action mapping.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use snowwatch_core::{Action, AppState};

use crate::components::{
    CityPicker, CityPickerProps, Component, HelpLine, HelpLineProps, StatusLine, StatusLineProps,
    VerdictPanel, VerdictPanelProps,
};
use crate::runtime::EventKind;

/// Width of the selector pane, sized for the longest catalog name.
const PICKER_WIDTH: u16 = 24;

/// The whole frame: selector + verdict panes over status and help lines.
pub struct Ui {
    picker: CityPicker,
    verdict: VerdictPanel,
    status: StatusLine,
    help: HelpLine,
}

impl Ui {
    pub fn new() -> Self {
        Self {
            picker: CityPicker::new(),
            verdict: VerdictPanel,
            status: StatusLine,
            help: HelpLine,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let rows = Layout::vertical([
            Constraint::Min(1),    // selector + verdict
            Constraint::Length(1), // status line
            Constraint::Length(1), // help line
        ])
        .split(area);

        let panes = Layout::horizontal([
            Constraint::Length(PICKER_WIDTH),
            Constraint::Min(1),
        ])
        .split(rows[0]);

        self.picker.render(
            frame,
            panes[0],
            CityPickerProps {
                catalog: &state.catalog,
                selected: state.selected,
                is_focused: true,
                on_select: Action::CitySelect,
            },
        );
        self.verdict
            .render(frame, panes[1], VerdictPanelProps { state });
        self.status
            .render(frame, rows[1], StatusLineProps { state });
        self.help.render(frame, rows[2], HelpLineProps);
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        if let EventKind::Resize(width, height) = event {
            return vec![Action::UiTerminalResize(*width, *height)];
        }

        // Global keys take precedence over the picker.
        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return vec![Action::Quit],
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return vec![Action::Quit]
                }
                KeyCode::Char('r') => return vec![Action::WeatherFetch],
                _ => {}
            }
        }

        let props = CityPickerProps {
            catalog: &state.catalog,
            selected: state.selected,
            is_focused: true,
            on_select: Action::CitySelect,
        };
        self.picker.handle_event(event, props).into_iter().collect()
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}
