use crate::config::GridSize;
use crate::game::GameStatus;
use crate::input::Direction;
use crate::powerup::PowerUpKind;
use crate::snake::Position;

/// Immutable per-frame view of the simulation.
///
/// The core never depends on a rendering API: anything that can draw a
/// `Snapshot` can present the game, and nothing a sink does can reach back
/// into the state machine.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Body cells, head first.
    pub snake: Vec<Position>,
    /// Applied movement direction; `None` until the first input of a round.
    pub direction: Option<Direction>,
    pub food: Position,
    /// Board power-up, when one is live.
    pub power_up: Option<(Position, PowerUpKind)>,
    /// Remaining speed-boost ticks, when a boost is active.
    pub boost_ticks_left: Option<u16>,
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    pub bounds: GridSize,
}

impl Snapshot {
    /// Returns the head cell.
    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}
