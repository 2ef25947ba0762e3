use std::collections::HashSet;

use rand::Rng;

use super::grid::{Cell, Grid, GridError};

/// The single food item on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Cell,
}

impl Food {
    pub fn new(position: Cell) -> Self {
        Self { position }
    }

    /// Food placed on a random cell outside `forbidden`
    pub fn spawn<R: Rng + ?Sized>(
        grid: &Grid,
        forbidden: &HashSet<Cell>,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        grid.random_free_cell(forbidden, rng).map(Self::new)
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Move to a uniformly random cell outside `forbidden`
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        forbidden: &HashSet<Cell>,
        rng: &mut R,
    ) -> Result<(), GridError> {
        self.position = grid.random_free_cell(forbidden, rng)?;
        Ok(())
    }

    /// Force the food onto a given cell
    pub fn place(&mut self, position: Cell) {
        self.position = position;
    }
}
