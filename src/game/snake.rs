use std::collections::{HashSet, VecDeque};

use super::direction::Direction;
use super::grid::{Cell, Grid};

/// What a single call to [`Snake::advance`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Head moved one cell, tail followed
    Moved,
    /// Head moved one cell, tail stayed put
    Grew,
    /// New head would have hit the body; the snake was reset instead
    Collided,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    grid: Grid,
    /// Body segments, with head at index 0
    segments: VecDeque<Cell>,
    /// Target segment count; at most one ahead of `segments.len()` after eating
    length: usize,
    direction: Direction,
    pending_direction: Option<Direction>,
    last_removed: Option<Cell>,
}

impl Snake {
    /// A one-segment snake at the grid center, heading right
    pub fn new(grid: Grid) -> Self {
        let mut segments = VecDeque::with_capacity(16);
        segments.push_back(grid.center());

        Self {
            grid,
            segments,
            length: 1,
            direction: Direction::Right,
            pending_direction: None,
            last_removed: None,
        }
    }

    /// Build a snake from explicit segments, head first. Returns `None` when
    /// `segments` is empty. Cells are wrapped onto the grid.
    pub fn from_segments(
        grid: Grid,
        segments: impl IntoIterator<Item = Cell>,
        direction: Direction,
    ) -> Option<Self> {
        let segments: VecDeque<Cell> = segments.into_iter().map(|c| grid.wrap(c)).collect();
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            grid,
            length: segments.len(),
            segments,
            direction,
            pending_direction: None,
            last_removed: None,
        })
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn segments(&self) -> &VecDeque<Cell> {
        &self.segments
    }

    /// Occupied cells as a set, for food placement
    pub fn occupied(&self) -> HashSet<Cell> {
        self.segments.iter().copied().collect()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    /// Number of segments currently on the grid
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Target length, including growth not yet applied
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Cell vacated by the tail on the last move, if any
    pub fn last_removed(&self) -> Option<Cell> {
        self.last_removed
    }

    /// Queue a turn for the next move. Reversing straight into the neck is
    /// dropped silently.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.pending_direction = Some(direction);
        }
    }

    pub fn apply_pending_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }

    /// Move one cell in the current direction.
    ///
    /// Running into any segment other than the current head resets the snake
    /// and leaves everything else untouched for this tick.
    pub fn advance(&mut self) -> MoveOutcome {
        let new_head = self.grid.wrap_move(self.head(), self.direction);

        if self.segments.iter().skip(1).any(|c| *c == new_head) {
            self.reset();
            return MoveOutcome::Collided;
        }

        self.segments.push_front(new_head);

        if self.segments.len() > self.length {
            self.last_removed = self.segments.pop_back();
            MoveOutcome::Moved
        } else {
            self.last_removed = None;
            MoveOutcome::Grew
        }
    }

    /// Lengthen by one segment, starting with the next move
    pub fn grow(&mut self) {
        self.length += 1;
    }

    pub fn reset(&mut self) {
        self.segments.clear();
        self.segments.push_back(self.grid.center());
        self.length = 1;
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.last_removed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::from_screen(640, 480, 20)
    }

    fn straight_snake(len: i32) -> Snake {
        // Head at (10, 5), body trailing to the left
        Snake::from_segments(
            grid(),
            (0..len).map(|i| Cell::new(10 - i, 5)),
            Direction::Right,
        )
        .unwrap()
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(grid());
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.head(), Cell::new(16, 12));
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.pending_direction(), None);
        assert_eq!(snake.last_removed(), None);
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert!(Snake::from_segments(grid(), Vec::<Cell>::new(), Direction::Up).is_none());
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = straight_snake(3);

        assert_eq!(snake.advance(), MoveOutcome::Moved);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(11, 5));
        assert_eq!(snake.last_removed(), Some(Cell::new(8, 5)));
        assert_eq!(
            snake.segments().iter().copied().collect::<Vec<_>>(),
            vec![Cell::new(11, 5), Cell::new(10, 5), Cell::new(9, 5)]
        );
    }

    #[test]
    fn test_movement_wraps() {
        let mut snake =
            Snake::from_segments(grid(), [Cell::new(0, 0)], Direction::Left).unwrap();
        snake.advance();
        assert_eq!(snake.head(), Cell::new(31, 0));

        snake.set_pending_direction(Direction::Up);
        snake.apply_pending_direction();
        snake.advance();
        assert_eq!(snake.head(), Cell::new(31, 23));
    }

    #[test]
    fn test_growth_is_deferred_to_next_move() {
        let mut snake = straight_snake(2);

        snake.grow();
        assert_eq!(snake.length(), 3);
        assert_eq!(snake.len(), 2);

        assert_eq!(snake.advance(), MoveOutcome::Grew);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.last_removed(), None);

        assert_eq!(snake.advance(), MoveOutcome::Moved);
        assert_eq!(snake.len(), 3);
        assert!(snake.last_removed().is_some());
    }

    #[test]
    fn test_reverse_turn_is_ignored() {
        let mut snake = straight_snake(3);

        snake.set_pending_direction(Direction::Left);
        assert_eq!(snake.pending_direction(), None);
        snake.apply_pending_direction();
        assert_eq!(snake.direction(), Direction::Right);

        // A reversal does not clobber an already queued turn either
        snake.set_pending_direction(Direction::Up);
        snake.set_pending_direction(Direction::Left);
        assert_eq!(snake.pending_direction(), Some(Direction::Up));
    }

    #[test]
    fn test_pending_direction_applied_once() {
        let mut snake = straight_snake(1);

        snake.set_pending_direction(Direction::Down);
        assert_eq!(snake.direction(), Direction::Right);

        snake.apply_pending_direction();
        assert_eq!(snake.direction(), Direction::Down);
        assert_eq!(snake.pending_direction(), None);

        snake.apply_pending_direction();
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn test_self_collision_resets() {
        // Curled so that moving up lands on (5, 5), segment index 3
        let mut snake = Snake::from_segments(
            grid(),
            [
                Cell::new(5, 6),
                Cell::new(6, 6),
                Cell::new(6, 5),
                Cell::new(5, 5),
                Cell::new(4, 5),
            ],
            Direction::Up,
        )
        .unwrap();
        snake.set_pending_direction(Direction::Right);

        assert_eq!(snake.advance(), MoveOutcome::Collided);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.head(), grid().center());
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.pending_direction(), None);
        assert_eq!(snake.last_removed(), None);
    }

    #[test]
    fn test_moving_into_vacating_tail_counts_as_collision() {
        // Tail is still in place when the new head is checked
        let mut snake = Snake::from_segments(
            grid(),
            [
                Cell::new(5, 5),
                Cell::new(5, 6),
                Cell::new(6, 6),
                Cell::new(6, 5),
            ],
            Direction::Right,
        )
        .unwrap();

        assert_eq!(snake.advance(), MoveOutcome::Collided);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_occupied_matches_segments() {
        let snake = straight_snake(4);
        let occupied = snake.occupied();
        assert_eq!(occupied.len(), 4);
        assert!(snake.segments().iter().all(|c| occupied.contains(c)));
        assert!(snake.contains(Cell::new(7, 5)));
        assert!(!snake.contains(Cell::new(6, 5)));
    }
}
