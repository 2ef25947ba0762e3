//! Wrapsnake - a terminal Snake game on a wrap-around grid
//!
//! This library provides:
//! - Core game logic (game module), free of any I/O
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal session (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
