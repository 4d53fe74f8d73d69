use grid_util::point::Point;
use smallvec::SmallVec;

use crate::grid::GridView;
use crate::N_SMALLVEC_SIZE;

/// Neighbour offsets in expansion order: the four orthogonal moves followed by the four
/// diagonal ones. Changing the order changes tie-breaking between equally good paths.
pub const OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Whether `a` and `b` are distinct cells in each other's Moore neighbourhood.
pub fn is_adjacent(a: &Point, b: &Point) -> bool {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
}

/// Whether a single move from `from` to the adjacent `to` is allowed. Without corner cutting a
/// diagonal move is vetoed when either of the two orthogonal cells it passes is a wall.
pub fn can_move<G: GridView + ?Sized>(
    grid: &G,
    from: Point,
    to: Point,
    allow_corner_cutting: bool,
) -> bool {
    if !grid.is_passable(to) {
        return false;
    }
    if allow_corner_cutting || from.x == to.x || from.y == to.y {
        return true;
    }
    grid.is_passable(Point::new(from.x, to.y)) && grid.is_passable(Point::new(to.x, from.y))
}

/// Enumerates the cells reachable in one move from `point`, in [OFFSETS] order.
pub fn neighbors<G: GridView + ?Sized>(
    grid: &G,
    point: Point,
    allow_corner_cutting: bool,
) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
    OFFSETS
        .iter()
        .map(|&(dx, dy)| Point::new(point.x + dx, point.y + dy))
        .filter(|&p| can_move(grid, point, p, allow_corner_cutting))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellGrid, CellState};

    #[test]
    fn corner_has_three_neighbours() {
        let grid = CellGrid::new(3, 3);
        let n = neighbors(&grid, Point::new(0, 0), true);
        assert_eq!(
            n.as_slice(),
            &[Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)]
        );
        assert_eq!(neighbors(&grid, Point::new(1, 1), true).len(), 8);
    }

    #[test]
    fn walls_are_skipped() {
        let mut grid = CellGrid::new(3, 3);
        grid.set(Point::new(1, 0), CellState::Wall);
        grid.set(Point::new(2, 2), CellState::Wall);
        let n = neighbors(&grid, Point::new(1, 1), true);
        assert_eq!(n.len(), 6);
        assert!(!n.contains(&Point::new(1, 0)));
        assert!(!n.contains(&Point::new(2, 2)));
    }

    // Corner cutting is on by default: a diagonal move squeezes between two walls.
    #[test]
    fn corner_cutting_switch() {
        //  ___
        // | #|
        // |# |
        //  __
        let mut grid = CellGrid::new(2, 2);
        grid.set(Point::new(1, 0), CellState::Wall);
        grid.set(Point::new(0, 1), CellState::Wall);
        let start = Point::new(0, 0);
        assert_eq!(neighbors(&grid, start, true).as_slice(), &[Point::new(1, 1)]);
        assert!(neighbors(&grid, start, false).is_empty());
    }

    #[test]
    fn single_wall_vetoes_diagonal_without_corner_cutting() {
        let mut grid = CellGrid::new(2, 2);
        grid.set(Point::new(1, 0), CellState::Wall);
        assert!(!can_move(&grid, Point::new(0, 0), Point::new(1, 1), false));
        assert!(can_move(&grid, Point::new(0, 0), Point::new(1, 1), true));
    }

    #[test]
    fn adjacency() {
        let p = Point::new(2, 2);
        assert!(is_adjacent(&p, &Point::new(3, 3)));
        assert!(is_adjacent(&p, &Point::new(2, 1)));
        assert!(!is_adjacent(&p, &p));
        assert!(!is_adjacent(&p, &Point::new(4, 2)));
    }
}
