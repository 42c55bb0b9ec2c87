//! One-line fetch status: spinner, last classification, or last failure

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use snowwatch_core::AppState;

use super::Component;

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Props for StatusLine
pub struct StatusLineProps<'a> {
    pub state: &'a AppState,
}

/// Reports what the app is doing without ever blocking the selector.
#[derive(Default)]
pub struct StatusLine;

impl Component for StatusLine {
    type Props<'a> = StatusLineProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        let line = if state.is_loading() {
            let spinner = SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()];
            Line::from(vec![
                Span::styled(format!(" {} ", spinner), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("checking {}...", state.selected_city().name),
                    Style::default().fg(Color::Gray),
                ),
            ])
        } else if let Some(failure) = &state.last_failure {
            Line::from(vec![
                Span::styled(
                    format!(" {}: ", failure.kind.label()),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(failure.message.clone(), Style::default().fg(Color::Red)),
            ])
        } else if let Some(classification) = &state.classification {
            Line::from(vec![
                Span::styled(
                    format!(" {}: ", state.selected_city().name),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    classification.as_str().to_string(),
                    Style::default().fg(Color::Gray),
                ),
            ])
        } else {
            Line::from(Span::styled(
                " no report yet",
                Style::default().fg(Color::DarkGray),
            ))
        };

        frame.render_widget(Paragraph::new(line), area);
    }
}
