use super::food::Food;
use super::grid::{Cell, Grid};
use super::snake::Snake;

/// Complete session state: everything the renderer needs to draw a tick
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    pub food: Food,
    pub ticks: u64,
    /// Food eaten since the session started
    pub food_eaten: u32,
    /// Self-collisions and manual restarts
    pub resets: u32,
}

impl GameState {
    /// Create a new game state
    pub fn new(grid: Grid, snake: Snake, food: Food) -> Self {
        Self {
            grid,
            snake,
            food,
            ticks: 0,
            food_eaten: 0,
            resets: 0,
        }
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.contains(cell)
    }

    pub fn food_overlaps_snake(&self) -> bool {
        self.is_occupied_by_snake(self.food.position())
    }

    pub fn view(&self) -> RenderView<'_> {
        RenderView {
            grid: &self.grid,
            snake: &self.snake,
            food: self.food.position(),
            vacated: self.snake.last_removed(),
        }
    }
}

/// Read-only snapshot handed to the renderer after a tick completes
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    pub grid: &'a Grid,
    pub snake: &'a Snake,
    pub food: Cell,
    /// Cell the tail just left; drawn as background
    pub vacated: Option<Cell>,
}

/// What to draw in a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Head,
    Body,
    Food,
    Vacated,
    Empty,
}

impl RenderView<'_> {
    pub fn classify(&self, cell: Cell) -> CellKind {
        if cell == self.snake.head() {
            CellKind::Head
        } else if self.snake.contains(cell) {
            CellKind::Body
        } else if cell == self.food {
            CellKind::Food
        } else if Some(cell) == self.vacated {
            CellKind::Vacated
        } else {
            CellKind::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    #[test]
    fn test_classify_cells() {
        let grid = Grid::new(10, 10, 20);
        let mut snake = Snake::from_segments(
            grid,
            [Cell::new(3, 3), Cell::new(2, 3)],
            Direction::Right,
        )
        .unwrap();
        snake.advance();

        let state = GameState::new(grid, snake, Food::new(Cell::new(7, 7)));
        let view = state.view();

        assert_eq!(view.classify(Cell::new(4, 3)), CellKind::Head);
        assert_eq!(view.classify(Cell::new(3, 3)), CellKind::Body);
        assert_eq!(view.classify(Cell::new(7, 7)), CellKind::Food);
        assert_eq!(view.classify(Cell::new(2, 3)), CellKind::Vacated);
        assert_eq!(view.classify(Cell::new(0, 0)), CellKind::Empty);
    }

    #[test]
    fn test_food_overlap() {
        let grid = Grid::new(10, 10, 20);
        let snake = Snake::new(grid);
        let mut state = GameState::new(grid, snake, Food::new(Cell::new(0, 0)));
        assert!(!state.food_overlaps_snake());

        state.food.place(grid.center());
        assert!(state.food_overlaps_snake());
    }
}
