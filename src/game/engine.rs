use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{
    action::Action,
    config::GameConfig,
    events::SessionEvent,
    food::Food,
    grid::{Grid, GridError},
    snake::{MoveOutcome, Snake},
    state::GameState,
};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// What the snake did this tick; `None` when the tick was cut short by quit
    pub move_outcome: Option<MoveOutcome>,
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Whether the food had to be moved off the snake after the eat check
    pub food_displaced: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the session has ended
    pub terminated: bool,
    /// Session events raised during the step, in order
    pub events: Vec<SessionEvent>,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn quit() -> Self {
        Self {
            terminated: true,
            events: Vec::new(),
            info: StepInfo {
                move_outcome: None,
                ate_food: false,
                food_displaced: false,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Self {
            grid: config.grid(),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Start a new session: snake at the center, food somewhere else
    pub fn reset(&mut self) -> Result<GameState, GridError> {
        let snake = Snake::new(self.grid);
        let food = Food::spawn(&self.grid, &snake.occupied(), &mut self.rng)?;

        Ok(GameState::new(self.grid, snake, food))
    }

    /// Execute one tick.
    ///
    /// `actions` are the inputs gathered since the previous tick. A quit
    /// anywhere in the batch ends the session before anything is mutated.
    pub fn step<I>(&mut self, state: &mut GameState, actions: I) -> Result<StepResult, GridError>
    where
        I: IntoIterator<Item = Action>,
    {
        let actions: Vec<Action> = actions.into_iter().collect();
        if actions.contains(&Action::Quit) {
            return Ok(StepResult::quit());
        }

        let mut events = Vec::new();

        for action in actions {
            match action {
                Action::Turn(direction) => state.snake.set_pending_direction(direction),
                Action::Restart => {
                    self.restart(state)?;
                    events.push(SessionEvent::Restarted);
                }
                // Already handled above
                Action::Quit => {}
            }
        }

        state.snake.apply_pending_direction();
        let move_outcome = state.snake.advance();

        if move_outcome == MoveOutcome::Collided {
            state.resets += 1;
            events.push(SessionEvent::Reset);
        }

        let ate_food = state.snake.head() == state.food.position();
        if ate_food {
            state.snake.grow();
            state
                .food
                .relocate(&self.grid, &state.snake.occupied(), &mut self.rng)?;
            state.food_eaten += 1;
            events.push(SessionEvent::FoodEaten {
                length: state.snake.length(),
            });
        }

        // Catches food left under the body, e.g. after a reset
        let food_displaced = state.food_overlaps_snake();
        if food_displaced {
            log::debug!("food at {:?} overlaps the snake, relocating", state.food.position());
            state
                .food
                .relocate(&self.grid, &state.snake.occupied(), &mut self.rng)?;
        }

        state.ticks += 1;

        Ok(StepResult {
            terminated: false,
            events,
            info: StepInfo {
                move_outcome: Some(move_outcome),
                ate_food,
                food_displaced,
            },
        })
    }

    /// Reset the snake in place and move the food off it if needed
    pub fn restart(&mut self, state: &mut GameState) -> Result<(), GridError> {
        state.snake.reset();
        state.resets += 1;
        if state.food_overlaps_snake() {
            state
                .food
                .relocate(&self.grid, &state.snake.occupied(), &mut self.rng)?;
        }
        Ok(())
    }
}
