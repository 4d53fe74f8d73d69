//! # grid_astar
//!
//! Heuristic path search on 8-connected grids. A search runs
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) over a read-only [GridView] with
//! orthogonal moves of cost 1 and diagonal moves of cost √2, a selectable [HeuristicMethod] and
//! optional bounded-suboptimal [Weighting]. Every search carries an iteration budget, so it
//! terminates even when the destination cannot be reached.
//!
//! Searches can run to completion in one call through [find_path], or be stepped one iteration
//! at a time through a [PathSearch] handle for progress display, with cooperative cancellation
//! via [CancelToken]. Open nodes are ordered by f-score and, on ties, by the order in which they
//! were discovered, so identical inputs always produce identical paths.
//!
//! ```
//! use grid_astar::{find_path, CellGrid, CellState, SearchConfig};
//! use grid_util::point::Point;
//!
//! let mut grid = CellGrid::new(3, 3);
//! grid.set(Point::new(1, 1), CellState::Wall);
//! let outcome = find_path(&grid, Point::new(0, 0), Point::new(2, 2), SearchConfig::default())
//!     .unwrap();
//! assert_eq!(outcome.path().unwrap().len(), 4);
//! ```
mod config;
mod cost;
mod engine;
mod error;
mod frontier;
mod grid;
mod heuristic;
mod neighbors;
mod path;
mod weighting;

pub use crate::config::{SearchConfig, BUDGET_PER_CELL};
pub use crate::cost::{path_cost, step_cost, DIAGONAL_COST, ORTHOGONAL_COST};
pub use crate::engine::{
    find_path, CancelToken, FailureReason, NoObserver, PathSearch, SearchOutcome, SearchState,
    SearchStats, StepObserver, StepReport,
};
pub use crate::error::{ConfigurationError, Endpoint};
pub use crate::frontier::Frontier;
pub use crate::grid::{CellGrid, CellState, GridView};
pub use crate::heuristic::HeuristicMethod;
pub use crate::neighbors::{can_move, is_adjacent, neighbors, OFFSETS};
pub use crate::path::{reconstruct_path, FxIndexMap, Path, PredecessorMap};
pub use crate::weighting::{pwxd, Weighting};

pub use grid_util::point::Point;

/// Diagonal moves may pass between two orthogonally blocked cells unless a [SearchConfig] says
/// otherwise.
pub const ALLOW_CORNER_CUTTING: bool = true;
pub const N_SMALLVEC_SIZE: usize = 8;
