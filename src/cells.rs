use std::convert::From;

use crate::directions::{Direction, Directions};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate is not representable (above or left of the origin).
    /// The result is not bounds checked against any particular grid.
    pub fn offset(self, direction: Direction) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match direction {
            Direction::Up => y.checked_sub(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            Direction::Down => y.checked_add(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            Direction::Left => x.checked_sub(1).map(|x| Cartesian2DCoordinate::new(x, y)),
            Direction::Right => x.checked_add(1).map(|x| Cartesian2DCoordinate::new(x, y)),
        }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

/// Visitation and connectivity state of one grid position.
///
/// Only the grid (driven by a maze generator) changes a cell, consumers get `&Cell`.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Cell {
    visited: bool,
    open: Directions,
}

impl Cell {
    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// The directions in which a passage leads out of this cell.
    #[inline]
    pub fn open_directions(&self) -> Directions {
        self.open
    }

    #[inline]
    pub fn is_open(&self, direction: Direction) -> bool {
        self.open.has(direction)
    }

    #[inline]
    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }

    #[inline]
    pub(crate) fn open(&mut self, direction: Direction) {
        self.open |= direction.bit();
    }
}
