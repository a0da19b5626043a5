use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::snapshot::Snapshot;

/// Final result of the most recently ended round, shown on the game-over
/// overlay and kept until the next round starts.
#[derive(Debug, Clone, Copy)]
pub struct LastRound {
    pub score: u32,
    pub new_high: bool,
}

/// Supplemental values the HUD needs beyond the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub theme: &'a Theme,
    pub last_round: Option<LastRound>,
}

/// Renders the one-line HUD below the play area and returns the play area.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let left = format!(
        " score {}  hi {}  len {}",
        snapshot.score,
        snapshot.high_score,
        snapshot.snake.len()
    );
    let right = match snapshot.boost_ticks_left {
        Some(ticks) => format!("boost {ticks} "),
        None => String::new(),
    };

    let gap = usize::from(hud_area.width)
        .saturating_sub(left.width())
        .saturating_sub(right.width());

    let line = Line::from(vec![
        Span::styled(left, Style::new().fg(info.theme.hud_accent)),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, Style::new().fg(info.theme.hud_text)),
    ]);
    frame.render_widget(Paragraph::new(line), hud_area);

    play_area
}
