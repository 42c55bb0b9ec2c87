use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;

pub struct HelpLine;

pub struct HelpLineProps;

impl Component for HelpLine {
    type Props<'a> = HelpLineProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, _props: Self::Props<'_>) {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(Color::DarkGray);

        let help = Line::from(vec![
            Span::styled(" j/k", key_style),
            Span::styled(" select  ", text_style),
            Span::styled("enter", key_style),
            Span::styled(" re-check  ", text_style),
            Span::styled("r", key_style),
            Span::styled(" refresh  ", text_style),
            Span::styled("q", key_style),
            Span::styled(" quit ", text_style),
        ])
        .centered();
        frame.render_widget(Paragraph::new(help), area);
    }
}
