//! # grid_astar
//!
//! An observable [A* search](https://en.wikipedia.org/wiki/A*_search_algorithm)
//! core for square, 4-connected, unit-cost grids. A caller edits a [CellGrid]
//! (walls plus one start and one end marker), then runs [solve], which reports
//! every expansion step through a callback so the search can be rendered or
//! cancelled while in flight. The heuristic is the Manhattan distance, which
//! is admissible and consistent for 4-directional unit moves, and ties between
//! equally promising cells break in first-discovered (FIFO) order, so repeated
//! runs on the same grid are fully deterministic.

pub mod astar;
pub mod cell;
pub mod error;
pub mod grid;

pub use astar::{find_path, solve, ExpandEvent, PathResult, SearchControl};
pub use cell::{Cell, CellState};
pub use error::{GridError, SolveError};
pub use grid::CellGrid;

/// Neighbourhood size bound on a 4-connected grid, used to size the
/// stack-allocated neighbour buffers.
pub const N_GRID_NEIGHBOURS: usize = 4;
