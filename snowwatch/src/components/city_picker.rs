//! Scrollable city selector

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use snowwatch_core::Catalog;

use super::Component;
use crate::runtime::EventKind;

/// Props for CityPicker
pub struct CityPickerProps<'a, A> {
    /// Catalog whose display names fill the list
    pub catalog: &'a Catalog,
    /// Currently selected index
    pub selected: usize,
    /// Whether this component has focus
    pub is_focused: bool,
    /// Callback to create the action for a selection
    pub on_select: fn(usize) -> A,
}

/// The always-interactive city list.
///
/// Handles j/k/up/down navigation, g/G and Home/End jumps, and enter to
/// re-select the current city. Every emitted selection triggers a fetch in
/// the reducer, so moving through the list refreshes as it goes.
#[derive(Default)]
pub struct CityPicker {
    /// Scroll offset for viewport
    scroll_offset: usize,
}

impl CityPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure the selected index is visible within the viewport
    fn ensure_visible(&mut self, selected: usize, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }

        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + viewport_height {
            self.scroll_offset = selected.saturating_sub(viewport_height - 1);
        }
    }
}

impl<A> Component<A> for CityPicker {
    type Props<'a> = CityPickerProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused || props.catalog.is_empty() {
            return None;
        }

        let len = props.catalog.len();

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    let new_idx = (props.selected + 1).min(len.saturating_sub(1));
                    if new_idx != props.selected {
                        Some((props.on_select)(new_idx))
                    } else {
                        None
                    }
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    let new_idx = props.selected.saturating_sub(1);
                    if new_idx != props.selected {
                        Some((props.on_select)(new_idx))
                    } else {
                        None
                    }
                }
                KeyCode::Char('g') | KeyCode::Home => {
                    if props.selected != 0 {
                        Some((props.on_select)(0))
                    } else {
                        None
                    }
                }
                KeyCode::Char('G') | KeyCode::End => {
                    let last = len.saturating_sub(1);
                    if props.selected != last {
                        Some((props.on_select)(last))
                    } else {
                        None
                    }
                }
                // Re-emit the current selection to force a fresh fetch
                KeyCode::Enter => Some((props.on_select)(props.selected)),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let viewport_height = area.height.saturating_sub(2) as usize;
        self.ensure_visible(props.selected, viewport_height);

        let items: Vec<ListItem> = props
            .catalog
            .names()
            .enumerate()
            .map(|(i, name)| {
                let style = if i == props.selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::raw(name)).style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Is it snowing in: ")
                .border_style(if props.is_focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                }),
        );

        let mut state = ListState::default().with_selected(Some(props.selected));
        *state.offset_mut() = self.scroll_offset;

        frame.render_stateful_widget(list, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key, RenderHarness};
    use snowwatch_core::Action;

    fn props(catalog: &Catalog, selected: usize) -> CityPickerProps<'_, Action> {
        CityPickerProps {
            catalog,
            selected,
            is_focused: true,
            on_select: Action::CitySelect,
        }
    }

    #[test]
    fn test_navigate_down() {
        let mut picker = CityPicker::new();
        let catalog = Catalog::default();

        let actions: Vec<_> = picker
            .handle_event(&EventKind::Key(key("j")), props(&catalog, 0))
            .into_iter()
            .collect();

        assert_eq!(actions, vec![Action::CitySelect(1)]);
    }

    #[test]
    fn test_navigate_up() {
        let mut picker = CityPicker::new();
        let catalog = Catalog::default();

        let actions: Vec<_> = picker
            .handle_event(&EventKind::Key(key("up")), props(&catalog, 2))
            .into_iter()
            .collect();

        assert_eq!(actions, vec![Action::CitySelect(1)]);
    }

    #[test]
    fn test_navigate_at_bounds() {
        let mut picker = CityPicker::new();
        let catalog = Catalog::default();
        let last = catalog.len() - 1;

        // At top, going up should not emit
        let actions: Vec<_> = picker
            .handle_event(&EventKind::Key(key("k")), props(&catalog, 0))
            .into_iter()
            .collect();
        assert!(actions.is_empty());

        // At bottom, going down should not emit
        let actions: Vec<_> = picker
            .handle_event(&EventKind::Key(key("j")), props(&catalog, last))
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_jump_to_ends() {
        let mut picker = CityPicker::new();
        let catalog = Catalog::default();
        let last = catalog.len() - 1;

        let actions: Vec<_> = picker
            .handle_event(&EventKind::Key(key("G")), props(&catalog, 0))
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::CitySelect(last)]);

        let actions: Vec<_> = picker
            .handle_event(&EventKind::Key(key("home")), props(&catalog, last))
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::CitySelect(0)]);
    }

    #[test]
    fn test_enter_reselects_current() {
        let mut picker = CityPicker::new();
        let catalog = Catalog::default();

        let actions: Vec<_> = picker
            .handle_event(&EventKind::Key(key("enter")), props(&catalog, 3))
            .into_iter()
            .collect();

        assert_eq!(actions, vec![Action::CitySelect(3)]);
    }

    #[test]
    fn test_unfocused_ignores_events() {
        let mut picker = CityPicker::new();
        let catalog = Catalog::default();
        let props = CityPickerProps::<Action> {
            catalog: &catalog,
            selected: 0,
            is_focused: false,
            on_select: Action::CitySelect,
        };

        let actions: Vec<_> = picker
            .handle_event(&EventKind::Key(key("j")), props)
            .into_iter()
            .collect();

        assert!(actions.is_empty());
    }

    #[test]
    fn test_render_lists_cities() {
        let mut render = RenderHarness::new(30, 12);
        let mut picker = CityPicker::new();
        let catalog = Catalog::default();

        let output = render.render_to_string_plain(|frame| {
            let area = frame.area();
            picker.render(frame, area, props(&catalog, 1));
        });

        assert!(output.contains("Is it snowing in:"));
        assert!(output.contains("Portland, OR"));
        assert!(output.contains("Vancouver, WA"));
    }
}
