use rand::Rng;

use crate::config::GridSize;
use crate::food::Food;
use crate::snake::{Position, Snake};
use crate::spawn::{random_free_cell, SpawnError};

/// Chance that eating food spawns a power-up.
pub const POWER_UP_SPAWN_CHANCE: f64 = 0.2;

/// Ticks an unclaimed power-up stays on the board.
pub const POWER_UP_LIFETIME_TICKS: u16 = 50;

/// Ticks a speed boost lasts once collected.
pub const SPEED_BOOST_DURATION_TICKS: u16 = 100;

/// Segments appended to the tail by a growth power-up.
pub const GROW_SEGMENTS: usize = 3;

/// Flat score bonus granted by a quad power-up.
pub const QUAD_BONUS_POINTS: u32 = 4;

/// Collectible kinds supported by the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PowerUpKind {
    /// Halves the tick interval for a fixed number of ticks.
    Speed,
    /// Appends [`GROW_SEGMENTS`] segments to the tail.
    Grow,
    /// Grants [`QUAD_BONUS_POINTS`] immediately.
    Quad,
}

impl PowerUpKind {
    fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(0..3u8) {
            0 => Self::Speed,
            1 => Self::Grow,
            _ => Self::Quad,
        }
    }

    /// Short label for the HUD.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Grow => "grow",
            Self::Quad => "quad",
        }
    }
}

/// Power-up waiting on the board to be collected.
///
/// At most one exists at a time. The lifetime is counted in ticks rather
/// than wall-clock time, so an unclaimed power-up survives a pause intact.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PowerUp {
    pub position: Position,
    pub kind: PowerUpKind,
    pub ttl_ticks: u16,
}

impl PowerUp {
    /// Creates a power-up of `kind` at `position` with a full lifetime.
    #[must_use]
    pub fn new(position: Position, kind: PowerUpKind) -> Self {
        Self {
            position,
            kind,
            ttl_ticks: POWER_UP_LIFETIME_TICKS,
        }
    }

    /// Counts down board lifetime by one tick. Returns `true` once the
    /// power-up has expired and should despawn.
    pub fn tick_ttl(&mut self) -> bool {
        self.ttl_ticks = self.ttl_ticks.saturating_sub(1);
        self.ttl_ticks == 0
    }

    /// With probability `chance`, spawns a power-up of a uniformly random
    /// kind on a cell free of both the snake and the food.
    ///
    /// A draw landing on the food cell is rejected and redrawn, so food and
    /// power-up can never share a cell.
    pub fn maybe_spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
        food: &Food,
        chance: f64,
    ) -> Result<Option<Self>, SpawnError> {
        if !rng.gen_bool(chance) {
            return Ok(None);
        }

        let position = random_free_cell(rng, bounds, |cell| {
            snake.occupies(cell) || cell == food.position
        })?;
        Ok(Some(Self::new(position, PowerUpKind::roll(rng))))
    }
}

/// Active speed effect collected from a [`PowerUpKind::Speed`] power-up.
///
/// Tick-counted, so the remaining boost is frozen while the game is paused
/// and reverts after exactly its tick budget of simulation steps.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SpeedBoost {
    pub ticks_left: u16,
}

impl SpeedBoost {
    /// Starts a boost with the full duration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ticks_left: SPEED_BOOST_DURATION_TICKS,
        }
    }

    /// Counts down one tick. Returns `true` once the boost has ended.
    pub fn tick(&mut self) -> bool {
        self.ticks_left = self.ticks_left.saturating_sub(1);
        self.ticks_left == 0
    }
}

impl Default for SpeedBoost {
    fn default() -> Self {
        Self::new()
    }
}
