//! A* search over a [CellGrid] with per-expansion progress reporting.
//!
//! The bookkeeping follows the textbook formulation: g-scores, f-scores and
//! predecessor links live in one indexed map, the frontier is a binary heap of
//! map indices keyed by (f-score, insertion sequence), and a membership set
//! keeps a cell from entering the heap twice. Two behavioural details are part
//! of the contract and must not be "improved": equal f-scores pop in FIFO
//! insertion order, and the start cell never enters the closed set.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::info;

use crate::cell::Cell;
use crate::error::SolveError;
use crate::grid::CellGrid;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Marks the start cell's absent predecessor in [NodeRecord::parent].
const NO_PARENT: usize = usize::MAX;

/// Verdict returned by the progress callback after every expansion step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchControl {
    Continue,
    Cancel,
}

/// Snapshot handed to the progress callback once per expansion step, after the
/// popped cell's neighbours have been relaxed.
#[derive(Clone, Copy, Debug)]
pub struct ExpandEvent<'a> {
    /// The cell popped from the frontier this step.
    pub current: Cell,
    /// Cells inserted into the frontier during this step, in relaxation order.
    pub opened: &'a [Cell],
    /// The cell entering the closed set once the callback returns. Empty when
    /// `current` is the start cell, which never closes.
    pub closing: &'a [Cell],
}

/// Outcome of a completed run. An exhausted frontier and a cancellation are
/// normal terminations, not errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult {
    /// Shortest path from start to end, both inclusive.
    Found(Vec<Cell>),
    /// The frontier emptied without reaching the end.
    NotFound,
    /// The progress callback requested termination.
    Cancelled,
}

impl PathResult {
    pub fn path(&self) -> Option<&[Cell]> {
        match self {
            PathResult::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }
}

/// Per-cell search bookkeeping, indexed by the cell's slot in the run's
/// [FxIndexMap].
#[derive(Clone, Copy, Debug)]
struct NodeRecord {
    g_score: i32,
    f_score: i32,
    parent: usize,
}

struct FrontierEntry {
    f_score: i32,
    seq: usize,
    index: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f_score.eq(&other.f_score) && self.seq.eq(&other.seq)
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on f-score; ties go to the earliest-inserted entry so that
        // equally promising cells leave the frontier in FIFO order.
        match other.f_score.cmp(&self.f_score) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            s => s,
        }
    }
}

/// Walks the predecessor links back from the end cell's map slot and returns
/// the ordered start-to-end sequence.
fn reverse_path(records: &FxIndexMap<Cell, NodeRecord>, end_index: usize) -> Vec<Cell> {
    let mut path: Vec<Cell> = itertools::unfold(end_index, |ix| {
        records.get_index(*ix).map(|(cell, record)| {
            *ix = record.parent;
            *cell
        })
    })
    .collect();
    path.reverse();
    path
}

fn validate_endpoints(grid: &CellGrid, start: Cell, end: Cell) -> Result<(), SolveError> {
    let start_state = grid.state(start)?;
    let end_state = grid.state(end)?;
    if start == end {
        return Err(SolveError::EqualEndpoints(start));
    }
    if start_state.is_blocked() {
        return Err(SolveError::BlockedEndpoint(start));
    }
    if end_state.is_blocked() {
        return Err(SolveError::BlockedEndpoint(end));
    }
    Ok(())
}

/// Runs an A* search from `start` to `end` on `grid`, invoking `on_expand`
/// once per expansion step so the caller can render progress or cancel.
///
/// The grid is read-only for the duration of the call and must not be mutated
/// from within the callback; the endpoints are validated up front and a
/// violation returns a [SolveError] before any expansion happens. Unit step
/// cost and the Manhattan heuristic make the returned path shortest; the
/// first-inserted-wins tie-break makes the expansion order, and with it the
/// callback event stream, identical across runs on an unmodified grid.
pub fn solve<F>(
    grid: &CellGrid,
    start: Cell,
    end: Cell,
    mut on_expand: F,
) -> Result<PathResult, SolveError>
where
    F: FnMut(ExpandEvent<'_>) -> SearchControl,
{
    validate_endpoints(grid, start, end)?;
    let size = grid.size();
    info!("searching {start} -> {end} on a {size}x{size} grid");

    let mut records: FxIndexMap<Cell, NodeRecord> = FxIndexMap::default();
    let mut frontier = BinaryHeap::new();
    let mut in_frontier: FxHashSet<Cell> = FxHashSet::default();
    let mut visited: FxHashSet<Cell> = FxHashSet::default();
    let mut next_seq: usize = 0;

    let h_start = start.manhattan_distance(&end);
    records.insert(
        start,
        NodeRecord {
            g_score: 0,
            f_score: h_start,
            parent: NO_PARENT,
        },
    );
    frontier.push(FrontierEntry {
        f_score: h_start,
        seq: next_seq,
        index: 0,
    });
    next_seq += 1;
    in_frontier.insert(start);

    let mut opened: Vec<Cell> = Vec::new();
    while let Some(FrontierEntry { index, .. }) = frontier.pop() {
        let (&current, &NodeRecord { g_score, .. }) = records.get_index(index).unwrap();
        in_frontier.remove(&current);

        if current == end {
            info!("path found after {} expansions", visited.len());
            return Ok(PathResult::Found(reverse_path(&records, index)));
        }

        opened.clear();
        for neighbour in grid.neighbours(current)? {
            let tentative = g_score + 1;
            let f;
            let n_ix;
            match records.entry(neighbour) {
                Vacant(e) => {
                    f = tentative + e.key().manhattan_distance(&end);
                    n_ix = e.index();
                    e.insert(NodeRecord {
                        g_score: tentative,
                        f_score: f,
                        parent: index,
                    });
                }
                Occupied(mut e) => {
                    if tentative < e.get().g_score {
                        f = tentative + e.key().manhattan_distance(&end);
                        n_ix = e.index();
                        e.insert(NodeRecord {
                            g_score: tentative,
                            f_score: f,
                            parent: index,
                        });
                    } else {
                        continue;
                    }
                }
            }
            // A cell already waiting in the frontier keeps its existing heap
            // entry; the improved scores take effect through the record only.
            if in_frontier.insert(neighbour) {
                frontier.push(FrontierEntry {
                    f_score: f,
                    seq: next_seq,
                    index: n_ix,
                });
                next_seq += 1;
                opened.push(neighbour);
            }
        }

        // The start cell is exempt from closing, so its event carries an
        // empty closing slice.
        let closing: &[Cell] = if current == start {
            &[]
        } else {
            std::slice::from_ref(&current)
        };
        let verdict = on_expand(ExpandEvent {
            current,
            opened: &opened,
            closing,
        });
        if verdict == SearchControl::Cancel {
            info!(
                "search cancelled at {current} after {} expansions",
                visited.len()
            );
            return Ok(PathResult::Cancelled);
        }
        if current != start {
            visited.insert(current);
        }
    }

    info!(
        "frontier exhausted after {} expansions, no path {start} -> {end}",
        visited.len()
    );
    Ok(PathResult::NotFound)
}

/// [solve] without progress reporting.
pub fn find_path(grid: &CellGrid, start: Cell, end: Cell) -> Result<PathResult, SolveError> {
    solve(grid, start, end, |_| SearchControl::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    #[test]
    fn equal_endpoints_are_rejected() {
        let grid = CellGrid::new(3);
        let c = Cell::new(1, 1);
        assert_eq!(find_path(&grid, c, c), Err(SolveError::EqualEndpoints(c)));
    }

    #[test]
    fn blocked_endpoints_are_rejected() {
        let mut grid = CellGrid::new(3);
        let start = Cell::new(0, 0);
        let end = Cell::new(2, 2);
        grid.set_blocked(end).unwrap();
        assert_eq!(
            find_path(&grid, start, end),
            Err(SolveError::BlockedEndpoint(end))
        );
        grid.clear_blocked(end).unwrap();
        grid.set_blocked(start).unwrap();
        assert_eq!(
            find_path(&grid, start, end),
            Err(SolveError::BlockedEndpoint(start))
        );
    }

    #[test]
    fn out_of_bounds_endpoints_are_rejected() {
        let grid = CellGrid::new(3);
        let err = find_path(&grid, Cell::new(0, 0), Cell::new(5, 5));
        assert_eq!(
            err,
            Err(SolveError::Grid(GridError::InvalidCoordinate {
                row: 5,
                col: 5,
                size: 3
            }))
        );
    }

    #[test]
    fn adjacent_endpoints_give_the_two_cell_path() {
        let grid = CellGrid::new(5);
        let start = Cell::new(2, 2);
        let end = Cell::new(2, 3);
        let result = find_path(&grid, start, end).unwrap();
        assert_eq!(result, PathResult::Found(vec![start, end]));
    }

    #[test]
    fn start_event_has_an_empty_closing_slice() {
        let grid = CellGrid::new(4);
        let start = Cell::new(0, 0);
        let end = Cell::new(3, 3);
        let mut events: Vec<(Cell, Vec<Cell>)> = Vec::new();
        let result = solve(&grid, start, end, |event| {
            events.push((event.current, event.closing.to_vec()));
            SearchControl::Continue
        })
        .unwrap();
        assert!(result.is_found());
        assert!(!events.is_empty());
        assert_eq!(events[0].0, start);
        assert!(events[0].1.is_empty());
        for (current, closing) in &events[1..] {
            assert_eq!(closing.as_slice(), std::slice::from_ref(current));
        }
    }

    #[test]
    fn walled_in_start_reports_not_found_after_one_event() {
        let mut grid = CellGrid::new(4);
        let start = Cell::new(0, 0);
        let end = Cell::new(3, 3);
        grid.set_blocked(Cell::new(0, 1)).unwrap();
        grid.set_blocked(Cell::new(1, 0)).unwrap();
        let mut n_events = 0;
        let mut n_opened = 0;
        let result = solve(&grid, start, end, |event| {
            n_events += 1;
            n_opened += event.opened.len();
            SearchControl::Continue
        })
        .unwrap();
        assert_eq!(result, PathResult::NotFound);
        assert_eq!(n_events, 1);
        assert_eq!(n_opened, 0);
    }
}
