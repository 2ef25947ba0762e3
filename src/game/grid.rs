//! Grid geometry
//!
//! Maps screen space onto a fixed grid of square cells and defines the
//! wrap-around arithmetic: leaving one edge re-enters at the opposite edge.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use super::direction::Direction;

/// Rejection-sampling attempts before falling back to enumerating free cells
const MAX_SAMPLES: usize = 1024;

/// A cell on the game grid, addressed by column (`x`) and row (`y`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta, without wrapping
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("no free cell left on the {width}x{height} grid")]
    NoFreeCell { width: i32, height: i32 },
}

/// Dimensions of the playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cell_size: u32,
}

impl Grid {
    /// Create a grid of `width` x `height` cells, each `cell_size` pixels wide
    pub fn new(width: i32, height: i32, cell_size: u32) -> Self {
        debug_assert!(width > 0 && height > 0 && cell_size > 0);
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Grid covering a screen; partial cells at the right and bottom edges are dropped.
    /// Sides too long for `i32` saturate; `GameConfig::validate` rejects them first.
    pub fn from_screen(screen_width: u32, screen_height: u32, cell_size: u32) -> Self {
        Self::new(
            i32::try_from(screen_width / cell_size).unwrap_or(i32::MAX),
            i32::try_from(screen_height / cell_size).unwrap_or(i32::MAX),
            cell_size,
        )
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The cell every snake starts from
    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// All cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }

    /// Bring any cell back onto the torus
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell::new(cell.x.rem_euclid(self.width), cell.y.rem_euclid(self.height))
    }

    /// One step in `direction`, wrapping around the edges
    pub fn wrap_move(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        self.wrap(cell.moved_by(dx, dy))
    }

    /// The cell containing the screen-space point `(x, y)`, in pixels
    pub fn cell_at(&self, x: f32, y: f32) -> Cell {
        let size = self.cell_size as f32;
        self.wrap(Cell::new(
            (x / size).floor() as i32,
            (y / size).floor() as i32,
        ))
    }

    /// Top-left pixel of a cell
    pub fn to_pixel(&self, cell: Cell) -> (u32, u32) {
        let cell = self.wrap(cell);
        (
            cell.x as u32 * self.cell_size,
            cell.y as u32 * self.cell_size,
        )
    }

    /// Draw a uniformly random cell that is not in `forbidden`.
    ///
    /// Rejection sampling is capped; once the cap is hit the remaining free
    /// cells are enumerated and one of them is picked, so a nearly full grid
    /// still terminates. A fully covered grid is reported as an error.
    pub fn random_free_cell<R: Rng + ?Sized>(
        &self,
        forbidden: &HashSet<Cell>,
        rng: &mut R,
    ) -> Result<Cell, GridError> {
        let blocked = forbidden.iter().filter(|c| self.contains(**c)).count();
        if blocked >= self.cell_count() {
            return Err(self.no_free_cell());
        }

        for _ in 0..MAX_SAMPLES {
            let cell = Cell::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height));
            if !forbidden.contains(&cell) {
                return Ok(cell);
            }
        }

        log::debug!(
            "free cell sampling exhausted after {} attempts ({} of {} cells blocked)",
            MAX_SAMPLES,
            blocked,
            self.cell_count()
        );

        let free: Vec<Cell> = self.cells().filter(|c| !forbidden.contains(c)).collect();
        free.choose(rng).copied().ok_or_else(|| self.no_free_cell())
    }

    fn no_free_cell(&self) -> GridError {
        GridError::NoFreeCell {
            width: self.width,
            height: self.height,
        }
    }
}
