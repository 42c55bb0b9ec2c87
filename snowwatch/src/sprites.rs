//! Verdict art and snowfall animation frames
//!
//! All art is loaded from text files at compile time using `include_str!`.
//! Snowfall frames share one set of dimensions so the layout does not shift
//! while the animation cycles.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

// ============================================================================
// Art data - embedded at compile time
// ============================================================================

mod art_data {
    pub const YES: &str = include_str!("../sprites/yes.txt");
    pub const NO: &str = include_str!("../sprites/no.txt");

    pub const SNOWFALL: [&str; 3] = [
        include_str!("../sprites/snowfall/frame_0.txt"),
        include_str!("../sprites/snowfall/frame_1.txt"),
        include_str!("../sprites/snowfall/frame_2.txt"),
    ];
}

/// Ticks each snowfall frame stays on screen before advancing.
pub const TICKS_PER_SNOWFALL_FRAME: u32 = 2;

// ============================================================================
// Public API
// ============================================================================

/// Large "YES!" art for the snowing verdict.
pub fn yes_art() -> Text<'static> {
    art_to_text(
        art_data::YES,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
}

/// Large "No." art for the calm verdict.
pub fn no_art() -> Text<'static> {
    art_to_text(
        art_data::NO,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
}

/// Snowfall frame for the given tick count.
///
/// Frames rotate the same flake field downward, so cycling through them
/// reads as continuously falling snow.
pub fn snowfall_frame(tick_count: u32) -> Text<'static> {
    let frame = ((tick_count / TICKS_PER_SNOWFALL_FRAME) as usize) % art_data::SNOWFALL.len();
    art_to_text(
        art_data::SNOWFALL[frame],
        Style::default().fg(Color::White),
    )
}

/// Height in lines of the snowfall animation.
pub fn snowfall_height() -> u16 {
    art_data::SNOWFALL[0].lines().count() as u16
}

/// Convert an art string to styled Text, one Span per line.
///
/// Every line is padded to the widest line in the art. Centered rendering
/// aligns each line on its own, so ragged lines would shear the figure.
fn art_to_text(art: &'static str, style: Style) -> Text<'static> {
    let width = art.lines().map(str::len).max().unwrap_or(0);
    let lines: Vec<Line> = art
        .lines()
        .map(|line| Line::from(Span::styled(format!("{line:<width$}"), style)))
        .collect();
    Text::from(lines)
}

// ============================================================================
// Tests
// ============================================================================
