//! Binary verdict display: red panic or green calm

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph},
    Frame,
};
use snowwatch_core::{AppState, Verdict};

use super::Component;
use crate::sprites;

const PANIC_BG: Color = Color::Rgb(158, 28, 36);
const CALM_BG: Color = Color::Rgb(22, 101, 52);

/// Props for VerdictPanel
pub struct VerdictPanelProps<'a> {
    pub state: &'a AppState,
}

/// Full-bleed verdict pane.
///
/// Snowing fills the pane red with falling snow, the big "YES!" and the
/// panic label; anything else fills it green with a big "No.". Render-only;
/// all input is handled by the picker and the global key map.
#[derive(Default)]
pub struct VerdictPanel;

impl Component for VerdictPanel {
    type Props<'a> = VerdictPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let verdict = state.verdict();

        let bg = match verdict {
            Verdict::Snowing => PANIC_BG,
            Verdict::NotSnowing => CALM_BG,
        };
        frame.render_widget(Block::default().style(Style::default().bg(bg)), area);

        let blocks = blocks_for_state(state, area.height);
        if blocks.is_empty() {
            return;
        }

        let constraints: Vec<Constraint> = blocks
            .iter()
            .map(|block| Constraint::Length(block.height()))
            .collect();
        let chunks = Layout::vertical(constraints).flex(Flex::Center).split(area);

        for (block, chunk) in blocks.into_iter().zip(chunks.iter().copied()) {
            block.render(frame, chunk);
        }
    }
}

enum PanelBlock {
    Line(Line<'static>),
    Art { art: Text<'static>, height: u16 },
}

impl PanelBlock {
    fn art(art: Text<'static>) -> Self {
        let height = art.lines.len() as u16;
        PanelBlock::Art { art, height }
    }

    fn height(&self) -> u16 {
        match self {
            PanelBlock::Line(_) => 1,
            PanelBlock::Art { height, .. } => *height,
        }
    }

    fn render(self, frame: &mut Frame, area: Rect) {
        match self {
            PanelBlock::Line(line) => {
                frame.render_widget(Paragraph::new(line), area);
            }
            PanelBlock::Art { art, .. } => {
                frame.render_widget(Paragraph::new(art).alignment(Alignment::Center), area);
            }
        }
    }
}

fn blocks_for_state(state: &AppState, height: u16) -> Vec<PanelBlock> {
    match state.verdict() {
        Verdict::Snowing => snowing_blocks(state.tick_count, height),
        Verdict::NotSnowing => calm_blocks(state, height),
    }
}

fn snowing_blocks(tick_count: u32, height: u16) -> Vec<PanelBlock> {
    let panic_label = PanelBlock::Line(
        Line::from(Span::styled(
            "COMMENCE PANIC!",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
    );

    let full_height = sprites::snowfall_height() + 1 + 5 + 1 + 1;
    if height >= full_height {
        return vec![
            PanelBlock::art(sprites::snowfall_frame(tick_count)),
            blank_line(),
            PanelBlock::art(sprites::yes_art()),
            blank_line(),
            panic_label,
        ];
    }

    // Not enough rows for the animation; keep the art if it fits at all.
    if height >= 7 {
        return vec![PanelBlock::art(sprites::yes_art()), blank_line(), panic_label];
    }

    vec![
        PanelBlock::Line(
            Line::from(Span::styled(
                "YES!",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
        ),
        panic_label,
    ]
}

fn calm_blocks(state: &AppState, height: u16) -> Vec<PanelBlock> {
    let mut blocks = if height >= 5 {
        vec![PanelBlock::art(sprites::no_art())]
    } else {
        vec![PanelBlock::Line(
            Line::from(Span::styled(
                "No.",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
        )]
    };

    if state.last_failure.is_some() && height >= 7 {
        blocks.push(blank_line());
        blocks.push(PanelBlock::Line(
            Line::from(vec![
                Span::styled("weather unknown - press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "r",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to retry", Style::default().fg(Color::Gray)),
            ])
            .centered(),
        ));
    }

    blocks
}

fn blank_line() -> PanelBlock {
    PanelBlock::Line(Line::from("").centered())
}
