use super::direction::Direction;

/// Input the engine consumes at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Steer towards a direction on the next move
    Turn(Direction),
    /// Put the snake back at the start without ending the session
    Restart,
    /// End the session
    Quit,
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Turn(direction)
    }
}
