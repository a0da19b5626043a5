use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{GridSize, DEFAULT_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS};
use crate::food::Food;
use crate::input::{direction_change_is_valid, Direction};
use crate::powerup::{
    PowerUp, PowerUpKind, SpeedBoost, GROW_SEGMENTS, POWER_UP_SPAWN_CHANCE, QUAD_BONUS_POINTS,
};
use crate::score::ScoreBoard;
use crate::snake::{Position, Snake};
use crate::snapshot::Snapshot;
use crate::spawn::random_free_cell;

/// Current high-level gameplay state.
///
/// `GameOver` is entered when a round ends; the board is re-initialized at
/// that moment, so starting again needs no further cleanup.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Observable outcome of one tick, consumed by the presentation layer.
///
/// Round end is reported as a value rather than by blocking the simulation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    FoodEaten { score: u32 },
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    BoostExpired,
    GameOver { final_score: u32, new_high: bool },
}

/// Complete mutable game state for one session.
///
/// All mutation happens in [`tick`](Self::tick) and the command methods;
/// input between ticks only writes the pending-direction slot, which the
/// next tick applies atomically.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub power_up: Option<PowerUp>,
    pub speed_boost: Option<SpeedBoost>,
    pub scores: ScoreBoard,
    pub status: GameStatus,
    pub tick_count: u64,
    direction: Option<Direction>,
    pending_direction: Option<Direction>,
    bounds: GridSize,
    base_interval: Duration,
    rng: StdRng,
}

impl GameState {
    /// Creates a state with an entropy-seeded RNG.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::new_with_seed(bounds, rand::random())
    }

    /// Creates a deterministic state for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        debug_assert!(bounds.total_cells() >= 2);

        let mut rng = StdRng::seed_from_u64(seed);
        let snake = Snake::new(center(bounds));
        let food =
            Food::spawn(&mut rng, bounds, &snake).expect("a fresh board always has free cells");

        Self {
            snake,
            food,
            power_up: None,
            speed_boost: None,
            scores: ScoreBoard::default(),
            status: GameStatus::Idle,
            tick_count: 0,
            direction: None,
            pending_direction: None,
            bounds,
            base_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            rng,
        }
    }

    /// Returns the grid dimensions.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Returns the direction currently applied to movement.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Sets the base tick interval used when no speed boost is active.
    pub fn set_base_interval(&mut self, interval: Duration) {
        self.base_interval = interval;
    }

    /// Interval the driving clock should use for the next tick: half the
    /// base interval while a speed boost is live, the base interval
    /// otherwise, floored at [`MIN_TICK_INTERVAL_MS`].
    #[must_use]
    pub fn current_tick_interval(&self) -> Duration {
        let floor = Duration::from_millis(MIN_TICK_INTERVAL_MS);
        if self.speed_boost.is_some() {
            (self.base_interval / 2).max(floor)
        } else {
            self.base_interval.max(floor)
        }
    }

    /// Starts a round from the idle or game-over screen.
    pub fn start(&mut self) {
        if matches!(self.status, GameStatus::Idle | GameStatus::GameOver) {
            self.status = GameStatus::Running;
        }
    }

    /// Toggles between running and paused.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            other => other,
        };
    }

    /// Abandons the current round and returns to a fresh idle board.
    ///
    /// The session high score survives.
    pub fn reset(&mut self) {
        self.reinitialize_board();
        self.status = GameStatus::Idle;
    }

    /// Requests a direction change, applied at the start of the next tick.
    ///
    /// Ignored while the game is not running. Ignored when the request
    /// reverses the direction in effect — the queued one when a change is
    /// already pending, else the applied one — so neither a single input nor
    /// a two-input flurry can fold the snake onto its own neck.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.status != GameStatus::Running {
            return;
        }

        if let Some(current) = self.pending_direction.or(self.direction) {
            if !direction_change_is_valid(current, requested) {
                return;
            }
        }

        self.pending_direction = Some(requested);
    }

    /// Advances the simulation by one tick.
    ///
    /// Does nothing unless running. Until the first direction of a round
    /// arrives the snake holds still, matching the unset-direction policy.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.status != GameStatus::Running {
            return events;
        }

        if let Some(pending) = self.pending_direction.take() {
            self.direction = Some(pending);
        }
        let Some(direction) = self.direction else {
            return events;
        };

        self.tick_count += 1;

        // Age a boost from an earlier tick before this tick can start a new
        // one, so a fresh boost keeps its full budget.
        if let Some(boost) = self.speed_boost.as_mut() {
            if boost.tick() {
                self.speed_boost = None;
                events.push(GameEvent::BoostExpired);
            }
        }

        let new_head = self.snake.head().step(direction).wrapped(self.bounds);
        let ate = new_head == self.food.position;
        if !ate {
            self.snake.pop_tail();
        }
        self.snake.push_head(new_head);

        let mut power_up_spawned = false;
        if ate {
            self.scores.add(self.food.points());
            events.push(GameEvent::FoodEaten {
                score: self.scores.current(),
            });

            // Food never lands on the snake or on a live power-up.
            let live_power_up = self.power_up.map(|p| p.position);
            let respawned = random_free_cell(&mut self.rng, self.bounds, |cell| {
                self.snake.occupies(cell) || Some(cell) == live_power_up
            });
            match respawned {
                Ok(cell) => self.food = Food::at(cell),
                Err(_) => {
                    // The snake covers the board; nowhere left to eat.
                    events.push(self.end_round());
                    return events;
                }
            }

            if self.power_up.is_none() {
                // A board too crowded to place a power-up goes without one.
                if let Ok(Some(power_up)) = PowerUp::maybe_spawn(
                    &mut self.rng,
                    self.bounds,
                    &self.snake,
                    &self.food,
                    POWER_UP_SPAWN_CHANCE,
                ) {
                    events.push(GameEvent::PowerUpSpawned(power_up.kind));
                    self.power_up = Some(power_up);
                    power_up_spawned = true;
                }
            }
        }

        if let Some(power_up) = self.power_up {
            if power_up.position == new_head {
                self.power_up = None;
                events.push(GameEvent::PowerUpCollected(power_up.kind));
                self.apply_power_up(power_up.kind);
            }
        }

        // Board lifetime only ages from the tick after the spawn.
        if !power_up_spawned {
            if let Some(power_up) = self.power_up.as_mut() {
                if power_up.tick_ttl() {
                    let kind = power_up.kind;
                    self.power_up = None;
                    events.push(GameEvent::PowerUpExpired(kind));
                }
            }
        }

        if self.snake.head_overlaps_body() {
            events.push(self.end_round());
        }

        events
    }

    /// Read-only view handed to the presentation layer each frame.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().copied().collect(),
            direction: self.direction,
            food: self.food.position,
            power_up: self.power_up.map(|p| (p.position, p.kind)),
            boost_ticks_left: self.speed_boost.map(|b| b.ticks_left),
            score: self.scores.current(),
            high_score: self.scores.high(),
            status: self.status,
            bounds: self.bounds,
        }
    }

    fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Speed => self.speed_boost = Some(SpeedBoost::new()),
            PowerUpKind::Grow => self.snake.grow_tail(GROW_SEGMENTS),
            PowerUpKind::Quad => self.scores.add(QUAD_BONUS_POINTS),
        }
    }

    /// Ends the round: commits the high score, re-initializes the board and
    /// reports the final score as a value.
    fn end_round(&mut self) -> GameEvent {
        let final_score = self.scores.current();
        let new_high = self.scores.commit_if_high();
        self.reinitialize_board();
        self.status = GameStatus::GameOver;

        GameEvent::GameOver {
            final_score,
            new_high,
        }
    }

    fn reinitialize_board(&mut self) {
        self.snake = Snake::new(center(self.bounds));
        self.food = Food::spawn(&mut self.rng, self.bounds, &self.snake)
            .expect("a fresh board always has free cells");
        self.power_up = None;
        self.speed_boost = None;
        self.direction = None;
        self.pending_direction = None;
        self.tick_count = 0;
        self.scores.reset_round();
    }
}

fn center(bounds: GridSize) -> Position {
    Position {
        x: i32::from(bounds.width / 2),
        y: i32::from(bounds.height / 2),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::GridSize;
    use crate::food::Food;
    use crate::input::Direction;
    use crate::powerup::{
        PowerUp, PowerUpKind, POWER_UP_LIFETIME_TICKS, SPEED_BOOST_DURATION_TICKS,
    };
    use crate::snake::{Position, Snake};

    use super::{GameEvent, GameState, GameStatus};

    fn running_state() -> GameState {
        let mut state = GameState::new_with_seed(GridSize::square(20), 1);
        state.start();
        state
    }

    #[test]
    fn snake_holds_still_until_first_direction() {
        let mut state = running_state();
        let head = state.snake.head();

        for _ in 0..3 {
            assert!(state.tick().is_empty());
        }

        assert_eq!(state.snake.head(), head);
        assert_eq!(state.tick_count, 0);
    }

    #[test]
    fn food_tick_scores_and_grows_keeping_the_tail() {
        let mut state = running_state();
        state.snake = Snake::from_segments(vec![
            Position { x: 10, y: 10 },
            Position { x: 9, y: 10 },
            Position { x: 8, y: 10 },
        ]);
        state.food = Food::at(Position { x: 11, y: 10 });
        state.set_direction(Direction::Right);

        let events = state.tick();

        assert!(events.contains(&GameEvent::FoodEaten { score: 1 }));
        assert_eq!(state.snake.head(), Position { x: 11, y: 10 });
        assert_eq!(state.snake.len(), 4);
        assert!(state.snake.occupies(Position { x: 8, y: 10 }));
        assert_eq!(state.scores.current(), 1);
        assert_ne!(state.food.position, Position { x: 11, y: 10 });
    }

    #[test]
    fn non_consuming_tick_keeps_length() {
        let mut state = running_state();
        state.snake = Snake::from_segments(vec![
            Position { x: 10, y: 10 },
            Position { x: 9, y: 10 },
        ]);
        state.food = Food::at(Position { x: 0, y: 0 });
        state.set_direction(Direction::Right);

        state.tick();

        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.scores.current(), 0);
        assert!(!state.snake.occupies(Position { x: 9, y: 10 }));
    }

    #[test]
    fn head_wraps_around_every_edge() {
        let cases = [
            (Position { x: 19, y: 10 }, Direction::Right, Position { x: 0, y: 10 }),
            (Position { x: 0, y: 10 }, Direction::Left, Position { x: 19, y: 10 }),
            (Position { x: 10, y: 0 }, Direction::Up, Position { x: 10, y: 19 }),
            (Position { x: 10, y: 19 }, Direction::Down, Position { x: 10, y: 0 }),
        ];

        for (start, direction, expected) in cases {
            let mut state = running_state();
            state.snake = Snake::new(start);
            state.food = Food::at(Position { x: 5, y: 5 });
            state.set_direction(direction);

            state.tick();

            assert_eq!(state.snake.head(), expected);
        }
    }

    #[test]
    fn reversal_request_is_silently_ignored() {
        let mut state = running_state();
        state.snake = Snake::new(Position { x: 10, y: 10 });
        state.food = Food::at(Position { x: 0, y: 0 });

        state.set_direction(Direction::Down);
        state.tick();
        state.set_direction(Direction::Up);
        state.tick();

        assert_eq!(state.direction(), Some(Direction::Down));
        assert_eq!(state.snake.head(), Position { x: 10, y: 12 });
    }

    #[test]
    fn pending_slot_rejects_reversal_of_the_queued_direction() {
        let mut state = running_state();
        state.snake = Snake::new(Position { x: 10, y: 10 });
        state.food = Food::at(Position { x: 0, y: 0 });

        state.set_direction(Direction::Right);
        state.tick();

        // Queue Up, then try to reverse the queued turn within the same tick.
        state.set_direction(Direction::Up);
        state.set_direction(Direction::Down);
        state.tick();

        assert_eq!(state.direction(), Some(Direction::Up));
        assert_eq!(state.snake.head(), Position { x: 11, y: 9 });
    }

    #[test]
    fn direction_input_is_ignored_unless_running() {
        let mut state = GameState::new_with_seed(GridSize::square(20), 1);

        state.set_direction(Direction::Left);
        state.start();
        state.tick();

        // The pre-start request must not have been queued.
        assert_eq!(state.direction(), None);
    }

    #[test]
    fn self_collision_ends_the_round_and_auto_resets() {
        let mut state = running_state();
        state.scores.add(3);
        state.snake = Snake::from_segments(vec![
            Position { x: 2, y: 2 },
            Position { x: 1, y: 2 },
            Position { x: 1, y: 3 },
            Position { x: 2, y: 3 },
            Position { x: 3, y: 3 },
            Position { x: 3, y: 2 },
        ]);
        state.food = Food::at(Position { x: 9, y: 9 });
        state.set_direction(Direction::Left);

        let events = state.tick();

        assert!(events.contains(&GameEvent::GameOver {
            final_score: 3,
            new_high: true,
        }));
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.scores.current(), 0);
        assert_eq!(state.scores.high(), 3);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.direction(), None);

        // A new round starts directly from the game-over screen.
        state.start();
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn paused_game_does_not_advance() {
        let mut state = running_state();
        state.snake = Snake::new(Position { x: 10, y: 10 });
        state.food = Food::at(Position { x: 0, y: 0 });
        state.set_direction(Direction::Right);
        state.tick();

        state.toggle_pause();
        let head = state.snake.head();
        assert!(state.tick().is_empty());
        assert_eq!(state.snake.head(), head);

        state.toggle_pause();
        state.tick();
        assert_ne!(state.snake.head(), head);
    }

    #[test]
    fn speed_power_up_halves_the_interval_for_its_full_budget() {
        let mut state = running_state();
        let base = Duration::from_millis(100);
        state.set_base_interval(base);
        state.snake = Snake::new(Position { x: 5, y: 5 });
        state.food = Food::at(Position { x: 0, y: 19 });
        state.power_up = Some(PowerUp::new(Position { x: 6, y: 5 }, PowerUpKind::Speed));
        state.set_direction(Direction::Right);

        let events = state.tick();
        assert!(events.contains(&GameEvent::PowerUpCollected(PowerUpKind::Speed)));
        assert_eq!(state.current_tick_interval(), base / 2);

        for _ in 0..SPEED_BOOST_DURATION_TICKS - 1 {
            assert_eq!(state.current_tick_interval(), base / 2);
            state.tick();
        }

        // The boost ends on its final tick, never earlier, never later.
        assert!(state.tick().contains(&GameEvent::BoostExpired));
        assert_eq!(state.current_tick_interval(), base);
    }

    #[test]
    fn grow_power_up_extends_the_tail() {
        let mut state = running_state();
        state.snake = Snake::from_segments(vec![
            Position { x: 5, y: 5 },
            Position { x: 4, y: 5 },
        ]);
        state.food = Food::at(Position { x: 0, y: 19 });
        state.power_up = Some(PowerUp::new(Position { x: 6, y: 5 }, PowerUpKind::Grow));
        state.set_direction(Direction::Right);

        state.tick();

        assert_eq!(state.snake.len(), 5);
        assert!(state.power_up.is_none());
    }

    #[test]
    fn quad_power_up_grants_a_flat_bonus() {
        let mut state = running_state();
        state.snake = Snake::new(Position { x: 5, y: 5 });
        state.food = Food::at(Position { x: 0, y: 19 });
        state.power_up = Some(PowerUp::new(Position { x: 6, y: 5 }, PowerUpKind::Quad));
        state.set_direction(Direction::Right);

        state.tick();

        assert_eq!(state.scores.current(), 4);
        assert_eq!(state.snake.len(), 1);
    }

    #[test]
    fn unclaimed_power_up_despawns_after_its_lifetime() {
        let mut state = running_state();
        state.snake = Snake::new(Position { x: 5, y: 5 });
        state.food = Food::at(Position { x: 0, y: 0 });
        state.power_up = Some(PowerUp::new(Position { x: 3, y: 9 }, PowerUpKind::Grow));
        state.set_direction(Direction::Right);

        for _ in 0..POWER_UP_LIFETIME_TICKS - 1 {
            state.tick();
            assert!(state.power_up.is_some());
        }

        let events = state.tick();

        assert!(events.contains(&GameEvent::PowerUpExpired(PowerUpKind::Grow)));
        assert!(state.power_up.is_none());
    }

    #[test]
    fn live_power_up_blocks_further_spawns() {
        let mut state = running_state();
        state.snake = Snake::from_segments(vec![
            Position { x: 10, y: 10 },
            Position { x: 9, y: 10 },
        ]);
        state.food = Food::at(Position { x: 11, y: 10 });
        let existing = PowerUp::new(Position { x: 2, y: 2 }, PowerUpKind::Quad);
        state.power_up = Some(existing);
        state.set_direction(Direction::Right);

        let events = state.tick();

        assert!(events.contains(&GameEvent::FoodEaten { score: 1 }));
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::PowerUpSpawned(_))));
        let live = state.power_up.expect("existing power-up must survive");
        assert_eq!(live.position, existing.position);
        assert_eq!(live.ttl_ticks, existing.ttl_ticks - 1);
    }

    #[test]
    fn reset_returns_to_idle_and_keeps_the_high_score() {
        let mut state = running_state();
        state.scores.add(6);
        state.scores.commit_if_high();

        state.reset();

        assert_eq!(state.status, GameStatus::Idle);
        assert_eq!(state.scores.current(), 0);
        assert_eq!(state.scores.high(), 6);
        assert_eq!(state.tick_count, 0);
    }

    #[test]
    fn snapshot_reflects_the_board() {
        let mut state = running_state();
        state.snake = Snake::from_segments(vec![
            Position { x: 4, y: 4 },
            Position { x: 3, y: 4 },
        ]);
        state.food = Food::at(Position { x: 7, y: 7 });
        state.power_up = Some(PowerUp::new(Position { x: 1, y: 1 }, PowerUpKind::Speed));

        let snapshot = state.snapshot();

        assert_eq!(snapshot.head(), Some(Position { x: 4, y: 4 }));
        assert_eq!(snapshot.snake.len(), 2);
        assert_eq!(snapshot.food, Position { x: 7, y: 7 });
        assert_eq!(
            snapshot.power_up,
            Some((Position { x: 1, y: 1 }, PowerUpKind::Speed))
        );
        assert_eq!(snapshot.status, GameStatus::Running);
    }
}
