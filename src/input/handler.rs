use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Map a key press to a game action; unbound keys map to `None`
    pub fn handle_key_event(&self, key: KeyEvent) -> Option<Action> {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        let action = match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Action::Turn(Direction::Up),
            KeyCode::Down => Action::Turn(Direction::Down),
            KeyCode::Left => Action::Turn(Direction::Left),
            KeyCode::Right => Action::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Action::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => Action::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => Action::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => Action::Turn(Direction::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => Action::Restart,

            _ => return None,
        };

        Some(action)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
