use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grid::Grid;
use crate::render::Palette;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cell size must be greater than zero")]
    ZeroCellSize,
    #[error("screen {width}x{height} is smaller than a single {cell_size}px cell")]
    ScreenTooSmall {
        width: u32,
        height: u32,
        cell_size: u32,
    },
    #[error("ticks per second must be greater than zero")]
    ZeroTickRate,
    #[error("a {width}x{height} grid has no room for both the snake and the food")]
    GridTooSmall { width: i32, height: i32 },
    #[error("a {width}x{height} grid is larger than the {max}x{max} limit")]
    GridTooLarge { width: u32, height: u32, max: u32 },
}

/// Largest grid side, in cells, that the board can be drawn with
pub const MAX_GRID_SIDE: u32 = 1024;

/// Configuration for the game
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playing field in pixels
    pub screen_width: u32,
    /// Height of the playing field in pixels
    pub screen_height: u32,
    /// Side of one square cell in pixels
    pub cell_size: u32,
    /// Game speed
    pub ticks_per_second: u32,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 480,
            cell_size: 20,
            ticks_per_second: 8,
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom screen size
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            ..Default::default()
        }
    }

    /// Read a JSON config file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.screen_width < self.cell_size || self.screen_height < self.cell_size {
            return Err(ConfigError::ScreenTooSmall {
                width: self.screen_width,
                height: self.screen_height,
                cell_size: self.cell_size,
            });
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        let width = self.screen_width / self.cell_size;
        let height = self.screen_height / self.cell_size;
        if width > MAX_GRID_SIDE || height > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width,
                height,
                max: MAX_GRID_SIDE,
            });
        }

        let grid = self.grid();
        if grid.cell_count() < 2 {
            return Err(ConfigError::GridTooSmall {
                width: grid.width(),
                height: grid.height(),
            });
        }
        Ok(())
    }

    /// The cell grid covering the screen
    pub fn grid(&self) -> Grid {
        Grid::from_screen(self.screen_width, self.screen_height, self.cell_size)
    }

    /// Time between two ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.ticks_per_second.max(1) as f64)
    }
}
