use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};
use crate::spawn::{random_free_cell, SpawnError};

/// Food entity currently active on the board.
///
/// Exactly one food exists at a time; it is regenerated on consumption.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Creates food at `position`.
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        1
    }

    /// Spawns food in a cell the snake does not occupy.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
    ) -> Result<Self, SpawnError> {
        random_free_cell(rng, bounds, |cell| snake.occupies(cell)).map(Self::at)
    }
}
