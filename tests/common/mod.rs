#![allow(dead_code)]
use grid_astar::{neighbors, CellGrid, CellState, GridView, Path, Point};

/// Builds a grid from rows of cell symbols, with `.` accepted as an empty cell for readability.
pub fn grid_from_rows(rows: &[&str]) -> CellGrid {
    let height = rows.len();
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let mut grid = CellGrid::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        for (x, symbol) in row.chars().enumerate() {
            let state = match symbol {
                '.' => CellState::Empty,
                s => CellState::from_symbol(s).expect("unknown cell symbol"),
            };
            grid.set(Point::new(x as i32, y as i32), state);
        }
    }
    grid.generate_components(true);
    grid
}

/// Checks the path invariants every search result has to satisfy.
pub fn assert_valid_path(
    grid: &CellGrid,
    path: &Path,
    start: Point,
    destination: Point,
    allow_corner_cutting: bool,
) {
    assert!(!path.is_empty());
    assert_eq!(path.start(), start);
    assert_eq!(path.destination(), destination);
    for pair in path.coords().windows(2) {
        assert!(
            neighbors(grid, pair[0], allow_corner_cutting).contains(&pair[1]),
            "{} -> {} is not a legal move",
            pair[0],
            pair[1]
        );
    }
}

pub fn visualize_grid(grid: &CellGrid, path: Option<&Path>) {
    let mut grid = grid.clone();
    if let Some(path) = path {
        grid.mark_path(path);
    }
    print!("{}", grid);
    println!("{}x{}", grid.width(), grid.height());
}
