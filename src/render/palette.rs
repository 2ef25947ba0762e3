use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Colors used to draw the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub border: Color,
    pub food: Color,
    pub snake: Color,
    pub head: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0, 0, 0),
            border: Color::Rgb(93, 216, 228),
            food: Color::Rgb(255, 0, 0),
            snake: Color::Rgb(0, 255, 0),
            head: Color::Rgb(144, 238, 144),
        }
    }
}
