//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end in `modes` drives it one tick at a time.

pub mod action;
pub mod config;
pub mod direction;
pub mod engine;
pub mod events;
pub mod food;
pub mod grid;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::Action;
pub use config::{ConfigError, GameConfig};
pub use direction::Direction;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use events::{LogNotifier, Notifier, SessionEvent, StatusLine};
pub use food::Food;
pub use grid::{Cell, Grid, GridError};
pub use snake::{MoveOutcome, Snake};
pub use state::{CellKind, GameState, RenderView};
