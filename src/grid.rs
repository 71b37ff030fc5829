use core::fmt;

use log::info;
use smallvec::SmallVec;

use crate::cell::{Cell, CellState};
use crate::error::GridError;
use crate::N_GRID_NEIGHBOURS;

/// [CellGrid] is the editable N x N board a search runs on. It stores one
/// [CellState] per cell in row-major order and tracks where the single start
/// and end markers currently sit. The solver only reads it: all mutation goes
/// through the editing API before a run, and the grid must not change while a
/// run is in flight.
#[derive(Clone, Debug)]
pub struct CellGrid {
    size: usize,
    cells: Vec<CellState>,
    start: Option<Cell>,
    end: Option<Cell>,
}

impl CellGrid {
    /// Creates a size x size grid with every cell [CellState::Free] and no
    /// start or end marker.
    pub fn new(size: usize) -> CellGrid {
        CellGrid {
            size,
            cells: vec![CellState::Free; size * size],
            start: None,
            end: None,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.size
            && (cell.col as usize) < self.size
    }

    fn ix(&self, cell: Cell) -> usize {
        cell.row as usize * self.size + cell.col as usize
    }

    fn checked_ix(&self, cell: Cell) -> Result<usize, GridError> {
        if self.in_bounds(cell) {
            Ok(self.ix(cell))
        } else {
            Err(GridError::InvalidCoordinate {
                row: cell.row,
                col: cell.col,
                size: self.size,
            })
        }
    }

    pub fn state(&self, cell: Cell) -> Result<CellState, GridError> {
        self.checked_ix(cell).map(|ix| self.cells[ix])
    }

    /// The cell currently carrying the start marker, if any.
    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    /// The cell currently carrying the end marker, if any.
    pub fn end(&self) -> Option<Cell> {
        self.end
    }

    /// Writes a state into a cell, maintaining the single-start/single-end
    /// invariant. Overwriting is the rule: whatever the cell held before is
    /// gone, and a displaced start or end marker reverts to [CellState::Free].
    fn put(&mut self, cell: Cell, state: CellState) -> Result<(), GridError> {
        let ix = self.checked_ix(cell)?;
        if self.start == Some(cell) {
            self.start = None;
        }
        if self.end == Some(cell) {
            self.end = None;
        }
        match state {
            CellState::Start => {
                if let Some(old) = self.start.take() {
                    info!("start marker moved from {old} to {cell}");
                    let old_ix = self.ix(old);
                    self.cells[old_ix] = CellState::Free;
                }
                self.start = Some(cell);
            }
            CellState::End => {
                if let Some(old) = self.end.take() {
                    info!("end marker moved from {old} to {cell}");
                    let old_ix = self.ix(old);
                    self.cells[old_ix] = CellState::Free;
                }
                self.end = Some(cell);
            }
            CellState::Free | CellState::Blocked => {}
        }
        self.cells[ix] = state;
        Ok(())
    }

    /// Marks a cell as a wall. Blocking the current start or end cell also
    /// removes that marker.
    pub fn set_blocked(&mut self, cell: Cell) -> Result<(), GridError> {
        self.put(cell, CellState::Blocked)
    }

    /// Reverts a blocked cell to free. A cell that is not blocked is left
    /// untouched.
    pub fn clear_blocked(&mut self, cell: Cell) -> Result<(), GridError> {
        let ix = self.checked_ix(cell)?;
        if self.cells[ix].is_blocked() {
            self.cells[ix] = CellState::Free;
        }
        Ok(())
    }

    /// Places the start marker, displacing a previous one if present.
    pub fn set_start(&mut self, cell: Cell) -> Result<(), GridError> {
        self.put(cell, CellState::Start)
    }

    /// Places the end marker, displacing a previous one if present.
    pub fn set_end(&mut self, cell: Cell) -> Result<(), GridError> {
        self.put(cell, CellState::End)
    }

    /// Resets a cell to [CellState::Free], whatever it held.
    pub fn clear(&mut self, cell: Cell) -> Result<(), GridError> {
        self.put(cell, CellState::Free)
    }

    /// In-bounds, non-blocked neighbours of a cell in down, up, right, left
    /// order. The order is deterministic and stable across calls; a blocked
    /// cell never appears in anyone's neighbour list.
    pub fn neighbours(&self, cell: Cell) -> Result<SmallVec<[Cell; N_GRID_NEIGHBOURS]>, GridError> {
        self.checked_ix(cell)?;
        Ok(cell
            .neumann_neighborhood()
            .into_iter()
            .filter(|n| self.in_bounds(*n) && !self.cells[self.ix(*n)].is_blocked())
            .collect())
    }
}

impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.size as i32 {
            for col in 0..self.size as i32 {
                let glyph = match self.cells[self.ix(Cell::new(row, col))] {
                    CellState::Free => '.',
                    CellState::Blocked => '#',
                    CellState::Start => 'S',
                    CellState::End => 'E',
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
