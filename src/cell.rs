use core::fmt;

use smallvec::SmallVec;

use crate::N_GRID_NEIGHBOURS;

/// A grid coordinate in (row, column) form. Row 0 is the top row and rows grow
/// downward, matching how grids print.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// L1 distance to another cell, which on a 4-connected unit-cost grid is a
    /// lower bound on the path cost between the two.
    pub fn manhattan_distance(&self, other: &Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// The four cardinal neighbour candidates in down, up, right, left order.
    /// Bounds and blocking are the grid's concern. The order is fixed: the
    /// solver's expansion determinism depends on it.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Cell; N_GRID_NEIGHBOURS]> {
        SmallVec::from_buf([
            Cell::new(self.row + 1, self.col),
            Cell::new(self.row - 1, self.col),
            Cell::new(self.row, self.col + 1),
            Cell::new(self.row, self.col - 1),
        ])
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Classification of a single grid cell. Start and End are mutually exclusive
/// with Blocked; [CellGrid](crate::grid::CellGrid) mutators keep it that way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellState {
    #[default]
    Free,
    Blocked,
    Start,
    End,
}

impl CellState {
    pub fn is_blocked(&self) -> bool {
        matches!(self, CellState::Blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Cell::new(1, 2);
        let b = Cell::new(4, 0);
        assert_eq!(a.manhattan_distance(&b), 5);
        assert_eq!(b.manhattan_distance(&a), 5);
        assert_eq!(a.manhattan_distance(&a), 0);
    }

    #[test]
    fn neighbourhood_order_is_down_up_right_left() {
        let c = Cell::new(2, 3);
        let ns = c.neumann_neighborhood();
        assert_eq!(
            ns.as_slice(),
            &[
                Cell::new(3, 3),
                Cell::new(1, 3),
                Cell::new(2, 4),
                Cell::new(2, 2)
            ]
        );
    }
}
