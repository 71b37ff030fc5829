use std::collections::HashMap;

use grid_astar::{solve, Cell, CellGrid, CellState, PathResult, SearchControl};

// Replays an A* run step by step as ASCII frames: `o` marks frontier cells,
// `x` closed cells and `*` the final path. The same callback a renderer would
// hook drives the frames here.

fn render(grid: &CellGrid, overlay: &HashMap<Cell, char>) {
    for row in 0..grid.size() as i32 {
        for col in 0..grid.size() as i32 {
            let cell = Cell::new(row, col);
            let glyph = match grid.state(cell).unwrap() {
                CellState::Start => 'S',
                CellState::End => 'E',
                CellState::Blocked => '#',
                CellState::Free => *overlay.get(&cell).unwrap_or(&'.'),
            };
            print!("{}", glyph);
        }
        println!();
    }
    println!();
}

fn main() {
    let mut grid = CellGrid::new(8);
    for row in 0..6 {
        grid.set_blocked(Cell::new(row, 4)).unwrap();
    }
    let start = Cell::new(3, 1);
    let end = Cell::new(3, 6);
    grid.set_start(start).unwrap();
    grid.set_end(end).unwrap();

    let mut overlay: HashMap<Cell, char> = HashMap::new();
    let mut step = 0;
    let result = solve(&grid, start, end, |event| {
        for cell in event.opened {
            overlay.insert(*cell, 'o');
        }
        for cell in event.closing {
            overlay.insert(*cell, 'x');
        }
        step += 1;
        println!("step {step}: expanded {}", event.current);
        render(&grid, &overlay);
        SearchControl::Continue
    })
    .unwrap();

    match result {
        PathResult::Found(path) => {
            for cell in &path {
                overlay.insert(*cell, '*');
            }
            println!("solved in {step} steps, path has {} cells:", path.len());
            render(&grid, &overlay);
        }
        other => println!("{:?}", other),
    }
}
