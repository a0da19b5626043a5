use rand::Rng;
use thiserror::Error;

use crate::config::GridSize;
use crate::snake::Position;

/// Upper bound on rejection-sampling draws before giving up.
const MAX_SPAWN_ATTEMPTS: u32 = 10_000;

/// Raised when the free-cell guard trips.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum SpawnError {
    /// No free cell was drawn within the attempt budget.
    #[error("no free cell found after {attempts} draws")]
    Exhausted { attempts: u32 },
}

/// Draws a uniformly random grid cell for which `occupied` is false.
///
/// Draws are rejection-sampled: occupied cells are redrawn. Callers must
/// guarantee the grid still has free cells; the attempt cap turns a violated
/// precondition into [`SpawnError::Exhausted`] instead of an endless loop.
pub fn random_free_cell<R, F>(
    rng: &mut R,
    bounds: GridSize,
    occupied: F,
) -> Result<Position, SpawnError>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };

        if !occupied(candidate) {
            return Ok(candidate);
        }
    }

    Err(SpawnError::Exhausted {
        attempts: MAX_SPAWN_ATTEMPTS,
    })
}
