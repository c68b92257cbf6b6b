use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::{
    config::GameConfig,
    direction::Direction,
    error::GameError,
    grid::{Grid, Position},
    state::{CollisionType, GameState, Phase, Snake},
};

/// Outcome of one call to [`GameEngine::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// The snake moved one cell
    Moved,
    /// The head reached the food; carries the new score
    AteFood { score: u32 },
    /// The head hit a wall or the body; the tick source should stop
    GameOver {
        final_score: u32,
        cause: CollisionType,
    },
    /// No empty cell was left for new food; the tick source should stop
    BoardFull { final_score: u32 },
    /// The game is not running
    Ignored,
}

impl TickResult {
    /// True once the game has ended and ticking must stop
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TickResult::GameOver { .. } | TickResult::BoardFull { .. }
        )
    }
}

/// Why a direction change had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    GameOver,
    /// 180-degree turn while reversals are disabled
    Reversal,
}

/// Outcome of one call to [`GameEngine::set_direction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// First direction of the game; the tick source should start now
    Started,
    Accepted,
    Ignored(IgnoreReason),
}

/// The game engine that owns the state and handles all game logic
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, GameError> {
        let state = Self::initial_state(&config, &mut rng)?;
        Ok(Self { config, state, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.state.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.state.food
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Start a fresh game on a grid of the given size
    ///
    /// On error the current game is left untouched.
    pub fn reset(&mut self, width: usize, height: usize) -> Result<&GameState, GameError> {
        let config = GameConfig {
            grid_width: width,
            grid_height: height,
            ..self.config.clone()
        };
        let state = Self::initial_state(&config, &mut self.rng)?;

        self.config = config;
        self.state = state;
        info!(width, height, "game reset");

        Ok(&self.state)
    }

    /// Start a fresh game on the current grid
    pub fn restart(&mut self) -> Result<&GameState, GameError> {
        self.reset(self.config.grid_width, self.config.grid_height)
    }

    fn initial_state(config: &GameConfig, rng: &mut StdRng) -> Result<GameState, GameError> {
        config.validate()?;

        let grid = Grid::new(config.grid_width, config.grid_height)?;
        let snake = Snake::new(
            Position::new(config.start_row, config.start_col),
            config.spawn_direction,
            config.initial_snake_length,
        );
        let food = grid.random_empty_cell(&snake.occupied_cells(), rng)?;

        Ok(GameState::new(
            grid,
            snake,
            Some(food),
            config.spawn_direction,
        ))
    }

    /// Set the direction the head takes on the next tick
    pub fn set_direction(&mut self, direction: Direction) -> InputOutcome {
        if self.state.is_over() {
            return InputOutcome::Ignored(IgnoreReason::GameOver);
        }

        if !self.config.allow_reversal && direction.is_opposite(self.state.heading) {
            debug!(?direction, heading = ?self.state.heading, "reversal rejected");
            return InputOutcome::Ignored(IgnoreReason::Reversal);
        }

        match self.state.phase {
            Phase::NotStarted => {
                self.state
                    .snake
                    .launch(direction, self.config.spawn_direction);
                self.state.phase = Phase::Running;
                info!(?direction, "game started");
                InputOutcome::Started
            }
            _ => {
                self.state.snake.steer(direction);
                InputOutcome::Accepted
            }
        }
    }

    /// Place the food on a specific empty cell
    pub fn place_food(&mut self, pos: Position) -> Result<(), GameError> {
        if !self.state.grid.contains(pos) {
            return Err(GameError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            });
        }
        if self.state.is_occupied_by_snake(pos) {
            return Err(GameError::OccupiedCell {
                row: pos.row,
                col: pos.col,
            });
        }

        self.state.food = Some(pos);
        Ok(())
    }

    /// Execute one tick of the game
    pub fn advance(&mut self) -> TickResult {
        if !self.state.is_running() {
            return TickResult::Ignored;
        }

        let Some(heading) = self.state.snake.head().direction else {
            return TickResult::Ignored;
        };

        // Collision and food placement see the body as it was before this tick
        let occupied = self.state.snake.occupied_cells();
        let new_head = self.state.snake.head().position.moved_in_direction(heading);

        if let Some(cause) = self.check_collision(&occupied, new_head) {
            self.state.phase = Phase::GameOver;
            self.state.collision = Some(cause);
            info!(score = self.state.score, ?cause, "game over");

            return TickResult::GameOver {
                final_score: self.state.score,
                cause,
            };
        }

        let vacated = self.state.snake.tail().position;
        let tail_moved = self.state.snake.slither();
        self.state.heading = heading;
        self.state.steps = self.state.steps.saturating_add(1);

        let ate_food = self.state.food == Some(new_head);
        if ate_food {
            self.state.food = None;
            self.state.score = self.state.score.saturating_add(1);
            self.state.pending_growth = self
                .state
                .pending_growth
                .saturating_add(self.config.growth_per_food);
            debug!(score = self.state.score, row = new_head.row, col = new_head.col, "food eaten");
        }

        if self.state.pending_growth > 0 {
            self.state.snake.grow_tail(vacated, tail_moved);
            self.state.pending_growth -= 1;
        }

        debug_assert!(self.state.snake.is_contiguous());

        if !ate_food {
            return TickResult::Moved;
        }

        let mut exclude = occupied;
        exclude.insert(new_head);

        match self.state.grid.random_empty_cell(&exclude, &mut self.rng) {
            Ok(food) => {
                self.state.food = Some(food);
                TickResult::AteFood {
                    score: self.state.score,
                }
            }
            Err(err) => {
                warn!(%err, score = self.state.score, "board full, stopping");
                self.state.phase = Phase::GameOver;
                TickResult::BoardFull {
                    final_score: self.state.score,
                }
            }
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(
        &self,
        occupied: &HashSet<Position>,
        pos: Position,
    ) -> Option<CollisionType> {
        // Check wall collision
        if !self.state.grid.contains(pos) {
            return Some(CollisionType::Wall);
        }

        // Check self-collision, including the cell the tail is about to leave
        if occupied.contains(&pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}
