use std::collections::VecDeque;

use crate::grid::{Cell, GridSize};
use crate::input::{Direction, direction_change_is_valid};

/// Body cells laid out at round start, head first.
pub const START_BODY: [Cell; 3] = [Cell::new(5, 9), Cell::new(4, 9), Cell::new(3, 9)];

/// Heading at round start.
pub const START_HEADING: Direction = Direction::Right;

/// Mutable snake state: body, heading and pending growth.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    heading: Direction,
    pending_growth: u32,
}

impl Snake {
    /// Creates the three-cell horizontal snake every round starts with.
    #[must_use]
    pub fn spawn() -> Self {
        Self {
            body: VecDeque::from(START_BODY.to_vec()),
            heading: START_HEADING,
            pending_growth: 0,
        }
    }

    /// Creates a one-cell snake at `start` with the provided heading.
    #[must_use]
    pub fn new(start: Cell, heading: Direction) -> Self {
        Self {
            body: VecDeque::from([start]),
            heading,
            pending_growth: 0,
        }
    }

    /// Creates a snake from explicit body cells (front is head).
    ///
    /// Returns `None` for an empty body.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, heading: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
            heading,
            pending_growth: 0,
        })
    }

    /// Turns the snake, ignoring a reversal into the neck.
    ///
    /// A one-cell snake has no neck, so any heading is accepted.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.body.len() > 1 && !direction_change_is_valid(self.heading, direction) {
            return;
        }
        self.heading = direction;
    }

    /// Queues one cell of growth; each call is applied on its own step.
    pub fn grow(&mut self) {
        self.pending_growth += 1;
    }

    /// Moves one cell along the heading, keeping the tail when growth is pending.
    pub fn step(&mut self) {
        let next_head = self.next_head_position();
        self.body.push_front(next_head);

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the head position for the next step.
    #[must_use]
    pub fn next_head_position(&self) -> Cell {
        self.head().offset(self.heading)
    }

    /// Returns true if the head lies outside `[0, bounds)` on either axis.
    #[must_use]
    pub fn collides_with_walls(&self, bounds: GridSize) -> bool {
        !self.head().is_within_bounds(bounds)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Clamps every segment into `bounds` after the walls moved in.
    ///
    /// Segments are never dropped, so overlapping cells may appear.
    pub fn clamp_into(&mut self, bounds: GridSize) {
        for segment in &mut self.body {
            *segment = segment.clamped(bounds);
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true for an empty body, which constructors never produce.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current heading.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Returns the number of growth steps still queued.
    #[must_use]
    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}
