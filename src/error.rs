use thiserror::Error;

use crate::cell::Cell;

/// Grid access errors. Out-of-bounds coordinates are the only way plain grid
/// access can fail.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("coordinate ({row}, {col}) is outside the {size}x{size} grid")]
    InvalidCoordinate { row: i32, col: i32, size: usize },
}

/// Errors raised by [solve](crate::astar::solve) before any expansion takes
/// place. A search that merely fails to reach the end is not an error; it
/// reports [PathResult::NotFound](crate::astar::PathResult::NotFound).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("start and end are both {0}")]
    EqualEndpoints(Cell),
    #[error("endpoint {0} is blocked")]
    BlockedEndpoint(Cell),
}
