use grid_util::point::Point;
use itertools::Itertools;

use crate::neighbors::is_adjacent;

pub const ORTHOGONAL_COST: f64 = 1.0;
pub const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// Cost of a single move between two adjacent cells: [ORTHOGONAL_COST] when the cells share a
/// row or column and [DIAGONAL_COST] otherwise. Only meaningful for adjacent pairs.
#[inline]
pub fn step_cost(a: &Point, b: &Point) -> f64 {
    debug_assert!(is_adjacent(a, b), "{} and {} are not adjacent", a, b);
    if a.x != b.x && a.y != b.y {
        DIAGONAL_COST
    } else {
        ORTHOGONAL_COST
    }
}

/// Sum of step costs along a sequence of adjacent cells.
pub fn path_cost(points: &[Point]) -> f64 {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| step_cost(a, b))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthogonal_and_diagonal() {
        let p = Point::new(3, 3);
        assert_eq!(step_cost(&p, &Point::new(4, 3)), 1.0);
        assert_eq!(step_cost(&p, &Point::new(3, 2)), 1.0);
        assert_eq!(step_cost(&p, &Point::new(2, 2)), DIAGONAL_COST);
        assert_eq!(step_cost(&p, &Point::new(4, 4)), DIAGONAL_COST);
    }

    #[test]
    fn cost_of_sequence() {
        let points = [Point::new(0, 0), Point::new(1, 1), Point::new(2, 1)];
        assert!((path_cost(&points) - (1.0 + DIAGONAL_COST)).abs() < 1e-12);
        assert_eq!(path_cost(&points[..1]), 0.0);
        assert_eq!(path_cost(&[]), 0.0);
    }
}
