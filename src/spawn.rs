use rand::Rng;

use crate::grid::{Cell, GridSize};
use crate::snake::Snake;

/// Source of uniformly distributed candidate cells.
///
/// Every [`rand::Rng`] is a source; tests substitute scripted sequences.
pub trait CellSource {
    /// Draws one candidate inside `[0, bounds)` on both axes.
    fn next_cell(&mut self, bounds: GridSize) -> Cell;
}

impl<R: Rng + ?Sized> CellSource for R {
    fn next_cell(&mut self, bounds: GridSize) -> Cell {
        Cell {
            x: self.gen_range(0..i32::from(bounds.width)),
            y: self.gen_range(0..i32::from(bounds.height)),
        }
    }
}

/// Placement state for one point entity (apple, bonus apple or bomb).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SpawnField {
    position: Cell,
    bounds: GridSize,
}

impl SpawnField {
    /// Creates a field holding `position` and sampling within `bounds`.
    #[must_use]
    pub fn at(position: Cell, bounds: GridSize) -> Self {
        Self { position, bounds }
    }

    /// Creates a field and places it on a free cell right away.
    #[must_use]
    pub fn placed<S: CellSource + ?Sized>(bounds: GridSize, snake: &Snake, source: &mut S) -> Self {
        let mut field = Self::at(Cell::new(0, 0), bounds);
        field.place(bounds, snake, source);
        field
    }

    /// Draws candidates until one is in bounds and off the snake, then holds it.
    ///
    /// # Panics
    ///
    /// Panics when the snake covers every cell of `bounds`; callers must keep
    /// free cells available.
    pub fn place<S: CellSource + ?Sized>(&mut self, bounds: GridSize, snake: &Snake, source: &mut S) {
        assert!(
            free_cell_exists(bounds, snake),
            "SpawnField::place: no free cells on the board ({}×{})",
            bounds.width,
            bounds.height,
        );

        self.bounds = bounds;
        self.position = loop {
            let candidate = source.next_cell(bounds);
            if candidate.is_within_bounds(bounds) && !snake.occupies(candidate) {
                break candidate;
            }
        };
    }

    /// Changes the sampling domain without moving the held position.
    pub fn reseed_bounds(&mut self, bounds: GridSize) {
        self.bounds = bounds;
    }

    /// Returns true when the held position lies outside the sampling domain.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        !self.position.is_within_bounds(self.bounds)
    }

    #[must_use]
    pub fn position(&self) -> Cell {
        self.position
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }
}

/// Returns true when at least one cell of `bounds` is not covered by the snake.
#[must_use]
pub fn free_cell_exists(bounds: GridSize, snake: &Snake) -> bool {
    if bounds.total_cells() > snake.len() {
        return true;
    }

    (0..i32::from(bounds.height))
        .any(|y| (0..i32::from(bounds.width)).any(|x| !snake.occupies(Cell::new(x, y))))
}
