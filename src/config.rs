use ratatui::style::Color;

/// Logical grid dimensions passed through the game as a named type.
///
/// The playing field is toroidal: positions are wrapped into
/// `[0, width) × [0, height)`, so the grid has no walls.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns a square grid with `tiles` cells per edge.
    #[must_use]
    pub fn square(tiles: u16) -> Self {
        Self {
            width: tiles,
            height: tiles,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Default square grid edge in cells.
pub const DEFAULT_TILE_COUNT: u16 = 20;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Lower bound for the tick interval, boosted or not.
pub const MIN_TICK_INTERVAL_MS: u64 = 20;

/// Glyph for the snake head.
pub const GLYPH_SNAKE_HEAD: &str = "█";

/// Glyph for body segments.
pub const GLYPH_SNAKE_BODY: &str = "▓";

/// Glyph for the tail segment.
pub const GLYPH_SNAKE_TAIL: &str = "▒";

/// Glyph for food.
pub const GLYPH_FOOD: &str = "●";

/// Glyph for a power-up waiting on the board.
pub const GLYPH_POWER_UP: &str = "◆";

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    /// Speed power-up marker.
    pub power_up_speed: Color,
    /// Growth power-up marker.
    pub power_up_grow: Color,
    /// Quad-bonus power-up marker.
    pub power_up_quad: Color,
    pub border_fg: Color,
    pub hud_text: Color,
    pub hud_accent: Color,
    pub menu_title: Color,
}

/// Classic teal-on-dark theme.
pub const THEME_CLASSIC: Theme = Theme {
    name: "classic",
    snake_head: Color::White,
    snake_body: Color::Cyan,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    power_up_speed: Color::Yellow,
    power_up_grow: Color::Magenta,
    power_up_quad: Color::Green,
    border_fg: Color::White,
    hud_text: Color::DarkGray,
    hud_accent: Color::Cyan,
    menu_title: Color::Green,
};

/// High-contrast neon theme.
pub const THEME_NEON: Theme = Theme {
    name: "neon",
    snake_head: Color::White,
    snake_body: Color::Magenta,
    snake_tail: Color::DarkGray,
    food: Color::Yellow,
    power_up_speed: Color::Cyan,
    power_up_grow: Color::Green,
    power_up_quad: Color::LightRed,
    border_fg: Color::Magenta,
    hud_text: Color::DarkGray,
    hud_accent: Color::Magenta,
    menu_title: Color::Magenta,
};

/// All available themes.
pub const THEMES: &[Theme] = &[THEME_CLASSIC, THEME_NEON];

/// Looks up a theme by its CLI name.
#[must_use]
pub fn theme_by_name(name: &str) -> Option<&'static Theme> {
    THEMES
        .iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(name))
}
