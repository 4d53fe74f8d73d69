use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::cost::path_cost;
use crate::neighbors::is_adjacent;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Best known predecessor of every reached coordinate, in the order the coordinates were first
/// reached.
pub type PredecessorMap = FxIndexMap<Point, Point>;

/// Route from a start to a destination cell, both included.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    coords: Vec<Point>,
    cost: f64,
}

impl Path {
    fn new(coords: Vec<Point>) -> Path {
        let cost = path_cost(&coords);
        Path { coords, cost }
    }

    pub fn coords(&self) -> &[Point] {
        &self.coords
    }

    pub fn into_coords(self) -> Vec<Point> {
        self.coords
    }

    /// Number of cells on the path, endpoints included.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of moves, one less than [len](Self::len).
    pub fn steps(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn start(&self) -> Point {
        self.coords[0]
    }

    pub fn destination(&self) -> Point {
        self.coords[self.coords.len() - 1]
    }

    /// Whether every consecutive pair of cells is adjacent.
    pub fn is_connected(&self) -> bool {
        self.coords
            .iter()
            .tuple_windows()
            .all(|(a, b)| is_adjacent(a, b))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.coords.iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords.iter()
    }
}

/// Walks `predecessors` back from `destination` until a coordinate without predecessor is
/// reached, which has to be `start`.
///
/// # Panics
/// If the chain does not end at `start` or loops; either means the search corrupted its own
/// bookkeeping.
pub fn reconstruct_path(predecessors: &PredecessorMap, start: Point, destination: Point) -> Path {
    let mut coords = vec![destination];
    let mut current = destination;
    while let Some(&previous) = predecessors.get(&current) {
        assert!(
            coords.len() <= predecessors.len(),
            "predecessor chain from {} loops",
            destination
        );
        coords.push(previous);
        current = previous;
    }
    assert_eq!(
        current, start,
        "predecessor chain from {} ends at {} instead of the start",
        destination, current
    );
    coords.reverse();
    Path::new(coords)
}
