use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::input::Direction;

/// Grid position in logical cell coordinates, 0-indexed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            col: self.col + dx,
            row: self.row + dy,
        }
    }
}

/// Ordered occupied cells, head first.
///
/// Growth may transiently place the head on an existing segment; that overlap
/// is the self-collision signal and is not prevented here.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GridBody {
    cells: VecDeque<Cell>,
}

impl GridBody {
    /// Creates a one-cell body at `start`.
    #[must_use]
    pub fn new(start: Cell) -> Self {
        let mut cells = VecDeque::new();
        cells.push_front(start);

        Self { cells }
    }

    /// Creates a body from explicit cells (front is head).
    ///
    /// An empty list yields `None`; a body is never empty.
    #[must_use]
    pub fn from_cells(cells: Vec<Cell>) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }

        Some(Self {
            cells: VecDeque::from(cells),
        })
    }

    /// Inserts a new head; the old head becomes the second segment.
    pub fn push_head(&mut self, cell: Cell) {
        self.cells.push_front(cell);
    }

    /// Removes the tail segment. Never drops the last remaining cell.
    pub fn pop_tail(&mut self) -> Option<Cell> {
        if self.cells.len() <= 1 {
            return None;
        }

        self.cells.pop_back()
    }

    /// Returns true if any segment other than the current head equals `cell`.
    #[must_use]
    pub fn contains_excluding_head(&self, cell: Cell) -> bool {
        self.cells.iter().skip(1).any(|segment| *segment == cell)
    }

    /// Returns true if any segment, head included, equals `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Returns the current head cell.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .cells
            .front()
            .expect("body must always contain at least one segment")
    }

    /// Returns the current tail cell.
    #[must_use]
    pub fn tail(&self) -> Cell {
        *self
            .cells
            .back()
            .expect("body must always contain at least one segment")
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Copies the segments head-to-tail for rendering and food avoidance.
    #[must_use]
    pub fn to_ordered_snapshot(&self) -> Vec<Cell> {
        self.cells.iter().copied().collect()
    }

    /// Clears to a single-cell body at `start`.
    pub fn reset(&mut self, start: Cell) {
        self.cells.clear();
        self.cells.push_front(start);
    }
}
