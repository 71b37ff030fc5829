use grid_astar::{find_path, Cell, CellGrid, PathResult};

// A path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks a wall
// - S marks the start
// - E marks the end
//
// Cells have a 4-neighbourhood.

fn main() {
    let mut grid = CellGrid::new(3);
    grid.set_blocked(Cell::new(1, 1)).unwrap();
    grid.set_start(Cell::new(0, 0)).unwrap();
    grid.set_end(Cell::new(2, 2)).unwrap();
    println!("{}", grid);
    match find_path(&grid, Cell::new(0, 0), Cell::new(2, 2)).unwrap() {
        PathResult::Found(path) => {
            println!("Path:");
            for cell in path {
                println!("{}", cell);
            }
        }
        other => println!("{:?}", other),
    }
}
