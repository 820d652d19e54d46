use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::Direction;

/// Grid cell in logical coordinates: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the cell lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns this cell with each coordinate clamped onto the last row/column
    /// of `bounds` when it lies past it.
    #[must_use]
    pub fn clamped(self, bounds: GridSize) -> Self {
        Self {
            x: clamp_axis(self.x, i32::from(bounds.width)),
            y: clamp_axis(self.y, i32::from(bounds.height)),
        }
    }
}

fn clamp_axis(value: i32, upper_bound: i32) -> i32 {
    value.clamp(0, (upper_bound - 1).max(0))
}

/// Logical grid dimensions in cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when `cell` lies inside these bounds.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        cell.is_within_bounds(self)
    }

    /// Returns true when both dimensions are at least those of `other`.
    #[must_use]
    pub fn covers(self, other: GridSize) -> bool {
        self.width >= other.width && self.height >= other.height
    }

    /// Returns the bounds shrunk by one cell on both axes, or `None` once
    /// either dimension has reached `floor`.
    ///
    /// Shrinking is all-or-nothing: both axes lose a cell together.
    #[must_use]
    pub fn shrunk_toward(self, floor: GridSize) -> Option<Self> {
        if self.width > floor.width && self.height > floor.height {
            Some(Self {
                width: self.width - 1,
                height: self.height - 1,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{Cell, GridSize};

    #[test]
    fn containment_is_half_open() {
        let bounds = GridSize::new(23, 18);

        assert!(bounds.contains(Cell::new(0, 0)));
        assert!(bounds.contains(Cell::new(22, 17)));
        assert!(!bounds.contains(Cell::new(23, 0)));
        assert!(!bounds.contains(Cell::new(0, 18)));
        assert!(!bounds.contains(Cell::new(-1, 4)));
    }

    #[test]
    fn offset_follows_direction_delta() {
        let cell = Cell::new(5, 9);

        assert_eq!(cell.offset(Direction::Right), Cell::new(6, 9));
        assert_eq!(cell.offset(Direction::Up), Cell::new(5, 8));
    }

    #[test]
    fn clamping_pulls_overhanging_cells_onto_the_edge() {
        let bounds = GridSize::new(10, 8);

        assert_eq!(Cell::new(12, 3).clamped(bounds), Cell::new(9, 3));
        assert_eq!(Cell::new(4, 8).clamped(bounds), Cell::new(4, 7));
        assert_eq!(Cell::new(4, 4).clamped(bounds), Cell::new(4, 4));
    }

    #[test]
    fn shrinking_stops_at_floor() {
        let floor = GridSize::new(5, 5);

        assert_eq!(
            GridSize::new(7, 6).shrunk_toward(floor),
            Some(GridSize::new(6, 5))
        );
        assert_eq!(GridSize::new(6, 5).shrunk_toward(floor), None);
        assert_eq!(GridSize::new(5, 5).shrunk_toward(floor), None);
    }

    #[test]
    fn total_cells_multiplies_dimensions() {
        assert_eq!(GridSize::new(23, 18).total_cells(), 414);
    }
}
