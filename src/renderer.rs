use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{
    GridSize, Theme, GLYPH_FOOD, GLYPH_POWER_UP, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD,
    GLYPH_SNAKE_TAIL,
};
use crate::game::GameStatus;
use crate::powerup::PowerUpKind;
use crate::snake::Position;
use crate::snapshot::Snapshot;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders a full frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, info: &HudInfo<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, info);

    let theme = info.theme;
    let block = Block::bordered().border_style(Style::new().fg(theme.border_fg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, snapshot, theme);
    render_power_up(frame, inner, snapshot, theme);
    render_snake(frame, inner, snapshot, theme);

    match snapshot.status {
        GameStatus::Idle => render_start_menu(frame, play_area, snapshot.high_score, theme),
        GameStatus::Paused => render_pause_menu(frame, play_area),
        GameStatus::GameOver => {
            render_game_over_menu(frame, play_area, info.last_round, snapshot.high_score);
        }
        GameStatus::Running => {}
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, snapshot.food) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
}

fn render_power_up(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let Some((position, kind)) = snapshot.power_up else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, position) else {
        return;
    };

    let color = match kind {
        PowerUpKind::Speed => theme.power_up_speed,
        PowerUpKind::Grow => theme.power_up_grow,
        PowerUpKind::Quad => theme.power_up_quad,
    };
    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_POWER_UP, Style::new().fg(color));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let head = snapshot.head();
    let tail = snapshot.snake.last().copied();

    let buffer = frame.buffer_mut();
    for segment in &snapshot.snake {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, *segment) else {
            continue;
        };

        if Some(*segment) == head {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
            continue;
        }

        if Some(*segment) == tail {
            buffer.set_string(x, y, GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail));
            continue;
        }

        buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body));
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
