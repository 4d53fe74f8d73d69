use core::fmt;
use grid_util::point::Point;
use log::debug;
use petgraph::unionfind::UnionFind;

use crate::neighbors::neighbors;
use crate::path::Path;

/// Classification of a single grid cell. Everything except [Wall](CellState::Wall) is passable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Wall,
    Start,
    Destination,
    PathMark,
}

impl CellState {
    /// Single-character symbol used when a grid is flattened to text.
    pub fn symbol(self) -> char {
        match self {
            CellState::Empty => ' ',
            CellState::Wall => '#',
            CellState::Start => 'O',
            CellState::Destination => 'X',
            CellState::PathMark => '*',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<CellState> {
        match symbol {
            ' ' => Some(CellState::Empty),
            '#' => Some(CellState::Wall),
            'O' => Some(CellState::Start),
            'X' => Some(CellState::Destination),
            '*' => Some(CellState::PathMark),
            _ => None,
        }
    }

    pub fn is_passable(self) -> bool {
        self != CellState::Wall
    }
}

/// Read-only access to a rectangular grid of cells. This is all the search needs to know about
/// the world; mutation stays with whoever owns the grid.
pub trait GridView {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// State of the cell at `point`, [None] outside the grid.
    fn cell(&self, point: Point) -> Option<CellState>;
    fn start(&self) -> Option<Point>;
    fn destination(&self) -> Option<Point>;

    fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width()
            && (point.y as usize) < self.height()
    }
    fn is_passable(&self, point: Point) -> bool {
        self.cell(point).is_some_and(CellState::is_passable)
    }
    fn cell_count(&self) -> usize {
        self.width() * self.height()
    }
}

/// Owned grid of [CellState] values stored row by row. Keeps at most one Start and one
/// Destination marker, and maintains connected components in a [UnionFind] structure so that
/// reachability can be answered without searching.
#[derive(Clone, Debug)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
    start: Option<Point>,
    destination: Option<Point>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    components_corner_cutting: bool,
}

impl Default for CellGrid {
    fn default() -> CellGrid {
        CellGrid::new(0, 0)
    }
}

impl CellGrid {
    pub fn new(width: usize, height: usize) -> CellGrid {
        CellGrid {
            width,
            height,
            cells: vec![CellState::Empty; width * height],
            start: None,
            destination: None,
            components: UnionFind::new(width * height),
            components_dirty: true,
            components_corner_cutting: true,
        }
    }

    fn ix(&self, point: Point) -> usize {
        point.y as usize * self.width + point.x as usize
    }

    pub fn get(&self, point: Point) -> Option<CellState> {
        self.in_bounds(point).then(|| self.cells[self.ix(point)])
    }

    /// Sets the cell at `point`, returning [false] if it lies outside the grid. Placing a Start
    /// or Destination clears the previous marker of that kind.
    pub fn set(&mut self, point: Point, state: CellState) -> bool {
        if !self.in_bounds(point) {
            return false;
        }
        let ix = self.ix(point);
        let previous = self.cells[ix];
        match previous {
            CellState::Start => self.start = None,
            CellState::Destination => self.destination = None,
            _ => {}
        }
        match state {
            CellState::Start => {
                if let Some(old) = self.start.replace(point) {
                    let old_ix = self.ix(old);
                    self.cells[old_ix] = CellState::Empty;
                }
            }
            CellState::Destination => {
                if let Some(old) = self.destination.replace(point) {
                    let old_ix = self.ix(old);
                    self.cells[old_ix] = CellState::Empty;
                }
            }
            _ => {}
        }
        self.cells[ix] = state;
        if previous.is_passable() != state.is_passable() {
            if state.is_passable() && self.components_corner_cutting {
                // Opening a cell can only join components.
                for n in neighbors(&*self, point, true) {
                    let n_ix = self.ix(n);
                    self.components.union(ix, n_ix);
                }
            } else {
                self.components_dirty = true;
            }
        }
        true
    }

    /// Fills the `width` by `height` rectangle with its top-left corner at `corner`, clipped to
    /// the grid.
    pub fn set_rect(&mut self, corner: Point, width: usize, height: usize, state: CellState) {
        for y in corner.y..corner.y + height as i32 {
            for x in corner.x..corner.x + width as i32 {
                self.set(Point::new(x, y), state);
            }
        }
    }

    /// Marks the interior of `path` with [CellState::PathMark], leaving its endpoints alone.
    pub fn mark_path(&mut self, path: &Path) {
        let coords = path.coords();
        if coords.len() < 3 {
            return;
        }
        for &point in &coords[1..coords.len() - 1] {
            if self.get(point) == Some(CellState::Empty) {
                let ix = self.ix(point);
                self.cells[ix] = CellState::PathMark;
            }
        }
    }

    pub fn clear_path_marks(&mut self) {
        for cell in self.cells.iter_mut() {
            if *cell == CellState::PathMark {
                *cell = CellState::Empty;
            }
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components(self.components_corner_cutting);
        }
    }

    /// Generates a new [UnionFind] structure and links up passable neighbours to the same
    /// components under the given corner cutting rule.
    pub fn generate_components(&mut self, allow_corner_cutting: bool) {
        debug!(
            "Generating components for {}x{} grid (corner cutting: {})",
            self.width, self.height, allow_corner_cutting
        );
        self.components = UnionFind::new(self.width * self.height);
        self.components_dirty = false;
        self.components_corner_cutting = allow_corner_cutting;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let point = Point::new(x, y);
                if !self.is_passable(point) {
                    continue;
                }
                let parent_ix = self.ix(point);
                for n in neighbors(&*self, point, allow_corner_cutting) {
                    let n_ix = self.ix(n);
                    self.components.union(parent_ix, n_ix);
                }
            }
        }
    }

    /// Checks if `start` and `goal` are passable and on the same component. Components must be
    /// up to date, see [update](Self::update).
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        debug_assert!(!self.components_dirty, "components are dirty");
        self.is_passable(*start)
            && self.is_passable(*goal)
            && self.components.equiv(self.ix(*start), self.ix(*goal))
    }
}

impl GridView for CellGrid {
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }
    fn cell(&self, point: Point) -> Option<CellState> {
        self.get(point)
    }
    fn start(&self) -> Option<Point> {
        self.start
    }
    fn destination(&self) -> Option<Point> {
        self.destination
    }
}

impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row.iter().map(|c| c.symbol()).collect();
            writeln!(f, "|{}|", line)?;
        }
        Ok(())
    }
}
