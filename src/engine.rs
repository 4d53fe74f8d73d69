//! The search state machine. A [PathSearch] is created in the [Ready](SearchState::Ready) state,
//! moves to [Running](SearchState::Running) on its first step and ends in one of
//! [Succeeded](SearchState::Succeeded), [Failed](SearchState::Failed) or
//! [Cancelled](SearchState::Cancelled). It can be driven one iteration at a time with
//! [step](PathSearch::step) or to the end with [run_to_completion](PathSearch::run_to_completion);
//! both execute the same iteration.
//!
//! The search borrows its grid immutably for its whole lifetime, so the grid cannot be edited
//! while a search over it is alive.
use core::fmt;
use fxhash::{FxHashMap, FxHashSet};
use grid_util::point::Point;
use log::{debug, info, trace, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::SearchConfig;
use crate::cost::step_cost;
use crate::error::{ConfigurationError, Endpoint};
use crate::frontier::Frontier;
use crate::grid::GridView;
use crate::neighbors::neighbors;
use crate::path::{reconstruct_path, Path, PredecessorMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    Ready,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl SearchState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SearchState::Succeeded | SearchState::Failed | SearchState::Cancelled
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureReason {
    /// The frontier ran dry before the destination was reached.
    NoPathFound,
    /// The search expanded more nodes than its cycle budget allows.
    BudgetExceeded,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FailureReason::NoPathFound => write!(f, "no path exists"),
            FailureReason::BudgetExceeded => write!(f, "iteration budget exceeded"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    Succeeded(Path),
    Failed(FailureReason),
    Cancelled,
}

impl SearchOutcome {
    pub fn state(&self) -> SearchState {
        match self {
            SearchOutcome::Succeeded(_) => SearchState::Succeeded,
            SearchOutcome::Failed(_) => SearchState::Failed,
            SearchOutcome::Cancelled => SearchState::Cancelled,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Succeeded(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchOutcome::Succeeded(path) => Some(path),
            _ => None,
        }
    }
}

/// Diagnostics of a search, as data. Rendering them is left to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Completed iterations.
    pub cycles: usize,
    pub cycle_budget: usize,
    /// Largest number of open nodes seen at once.
    pub frontier_peak: usize,
    pub path_len: Option<usize>,
    pub path_cost: Option<f64>,
    /// Wall-clock time spent inside iterations.
    pub elapsed: Duration,
}

/// Cooperative cancellation flag. Clones share the flag, so a token can be handed to another
/// thread or to a [StepObserver] and trip the search it was taken from.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

/// Receives the partial search tree after every completed iteration.
pub trait StepObserver {
    fn on_step(&mut self, predecessors: &PredecessorMap, cycles: usize);
}

/// Observer that does nothing; the default for every search.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoObserver;

impl StepObserver for NoObserver {
    #[inline(always)]
    fn on_step(&mut self, _: &PredecessorMap, _: usize) {}
}

impl<F> StepObserver for F
where
    F: FnMut(&PredecessorMap, usize),
{
    fn on_step(&mut self, predecessors: &PredecessorMap, cycles: usize) {
        self(predecessors, cycles)
    }
}

/// What a single [step](PathSearch::step) leaves behind.
#[derive(Debug)]
pub struct StepReport<'a> {
    pub state: SearchState,
    pub cycles: usize,
    pub predecessors: &'a PredecessorMap,
}

/// Handle to one search over a borrowed grid.
pub struct PathSearch<'g, G: GridView + ?Sized, O = NoObserver> {
    grid: &'g G,
    start: Point,
    destination: Point,
    config: SearchConfig,
    budget: usize,
    state: SearchState,
    frontier: Frontier<Point>,
    g_score: FxHashMap<Point, f64>,
    predecessors: PredecessorMap,
    closed: FxHashSet<Point>,
    cycles: usize,
    frontier_peak: usize,
    elapsed: Duration,
    outcome: Option<SearchOutcome>,
    cancel: CancelToken,
    observer: O,
}

impl<'g, G: GridView + ?Sized> PathSearch<'g, G, NoObserver> {
    /// Prepares a search from `start` to `destination`. Fails without side effects if either
    /// endpoint is outside the grid or a wall, or if the configuration is invalid.
    pub fn new(
        grid: &'g G,
        start: Point,
        destination: Point,
        config: SearchConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        check_endpoint(grid, Endpoint::Start, start)?;
        check_endpoint(grid, Endpoint::Destination, destination)?;
        let budget = config.effective_budget(grid.cell_count());

        let mut frontier = Frontier::new();
        frontier.push(start, config.heuristic.estimate(&start, &destination));
        let mut g_score = FxHashMap::default();
        g_score.insert(start, 0.0);

        debug!(
            "Search from {} to {} submitted ({} heuristic, {:?}, budget {})",
            start, destination, config.heuristic, config.weighting, budget
        );
        Ok(PathSearch {
            grid,
            start,
            destination,
            config,
            budget,
            state: SearchState::Ready,
            frontier,
            g_score,
            predecessors: PredecessorMap::default(),
            closed: FxHashSet::default(),
            cycles: 0,
            frontier_peak: 1,
            elapsed: Duration::ZERO,
            outcome: None,
            cancel: CancelToken::new(),
            observer: NoObserver,
        })
    }

    /// Prepares a search between the Start and Destination cells marked on the grid.
    pub fn from_markers(grid: &'g G, config: SearchConfig) -> Result<Self, ConfigurationError> {
        let start = grid.start().ok_or(ConfigurationError::MissingStart)?;
        let destination = grid
            .destination()
            .ok_or(ConfigurationError::MissingDestination)?;
        PathSearch::new(grid, start, destination, config)
    }
}

fn check_endpoint<G: GridView + ?Sized>(
    grid: &G,
    endpoint: Endpoint,
    point: Point,
) -> Result<(), ConfigurationError> {
    if !grid.in_bounds(point) {
        return Err(ConfigurationError::OutOfBounds {
            endpoint,
            point,
            width: grid.width(),
            height: grid.height(),
        });
    }
    if !grid.is_passable(point) {
        return Err(ConfigurationError::Blocked { endpoint, point });
    }
    Ok(())
}

impl<'g, G: GridView + ?Sized, O: StepObserver> PathSearch<'g, G, O> {
    /// Replaces the step observer.
    pub fn with_observer<P: StepObserver>(self, observer: P) -> PathSearch<'g, G, P> {
        PathSearch {
            grid: self.grid,
            start: self.start,
            destination: self.destination,
            config: self.config,
            budget: self.budget,
            state: self.state,
            frontier: self.frontier,
            g_score: self.g_score,
            predecessors: self.predecessors,
            closed: self.closed,
            cycles: self.cycles,
            frontier_peak: self.frontier_peak,
            elapsed: self.elapsed,
            outcome: self.outcome,
            cancel: self.cancel,
            observer,
        }
    }

    /// Makes the search listen to an externally owned token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Requests cancellation. Observed at the start of the next iteration.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn destination(&self) -> Point {
        self.destination
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Partial search tree; empty once the search has terminated.
    pub fn predecessors(&self) -> &PredecessorMap {
        &self.predecessors
    }

    /// Best known cost from the start, for coordinates reached so far.
    pub fn g_score(&self, point: &Point) -> Option<f64> {
        self.g_score.get(point).copied()
    }

    /// Live f-score of an open coordinate.
    pub fn f_score(&self, point: &Point) -> Option<f64> {
        self.frontier.score(point)
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Terminal outcome, [None] while the search is still ready or running.
    pub fn result(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    pub fn into_result(self) -> Option<SearchOutcome> {
        self.outcome
    }

    pub fn stats(&self) -> SearchStats {
        let path = self.outcome.as_ref().and_then(SearchOutcome::path);
        SearchStats {
            cycles: self.cycles,
            cycle_budget: self.budget,
            frontier_peak: self.frontier_peak,
            path_len: path.map(Path::len),
            path_cost: path.map(Path::cost),
            elapsed: self.elapsed,
        }
    }

    /// Runs one iteration. Does nothing once the search has terminated.
    pub fn step(&mut self) -> StepReport<'_> {
        if !self.state.is_terminal() {
            let began = Instant::now();
            self.iterate();
            self.elapsed += began.elapsed();
        }
        StepReport {
            state: self.state,
            cycles: self.cycles,
            predecessors: &self.predecessors,
        }
    }

    /// Steps until the search terminates and returns the terminal state.
    pub fn run_to_completion(&mut self) -> SearchState {
        while !self.state.is_terminal() {
            self.step();
        }
        self.state
    }

    fn iterate(&mut self) {
        if self.cancel.is_cancelled() {
            debug!("Search from {} to {} cancelled", self.start, self.destination);
            self.finish(SearchOutcome::Cancelled);
            return;
        }
        if self.state == SearchState::Ready {
            self.state = SearchState::Running;
        }

        let Some((current, _)) = self.frontier.pop_min() else {
            debug!("{} is not reachable from {}", self.destination, self.start);
            self.finish(SearchOutcome::Failed(FailureReason::NoPathFound));
            return;
        };
        if current == self.destination {
            let path = reconstruct_path(&self.predecessors, self.start, current);
            info!(
                "Path of {} cells (cost {:.3}) from {} to {} found after {} cycles",
                path.len(),
                path.cost(),
                self.start,
                self.destination,
                self.cycles
            );
            self.finish(SearchOutcome::Succeeded(path));
            return;
        }
        if self.config.closed_set {
            self.closed.insert(current);
        }

        let current_g = self.g_score.get(&current).copied().unwrap_or(f64::INFINITY);
        for neighbor in neighbors(self.grid, current, self.config.allow_corner_cutting) {
            if self.config.closed_set && self.closed.contains(&neighbor) {
                continue;
            }
            let tentative_g = current_g + step_cost(&current, &neighbor);
            let known_g = self.g_score.get(&neighbor).copied().unwrap_or(f64::INFINITY);
            if tentative_g < known_g {
                self.predecessors.insert(neighbor, current);
                self.g_score.insert(neighbor, tentative_g);
                let h = self.config.heuristic.estimate(&neighbor, &self.destination);
                self.frontier
                    .push(neighbor, self.config.weighting.combine(tentative_g, h));
            }
        }
        self.frontier_peak = self.frontier_peak.max(self.frontier.len());

        self.cycles += 1;
        trace!(
            "Cycle {}: expanded {}, {} open",
            self.cycles,
            current,
            self.frontier.len()
        );
        if self.cycles > self.budget {
            warn!(
                "Search from {} to {} gave up after {} cycles",
                self.start, self.destination, self.budget
            );
            self.finish(SearchOutcome::Failed(FailureReason::BudgetExceeded));
            return;
        }
        self.observer.on_step(&self.predecessors, self.cycles);
    }

    /// Records the outcome and releases all per-search state.
    fn finish(&mut self, outcome: SearchOutcome) {
        self.state = outcome.state();
        self.outcome = Some(outcome);
        self.frontier.clear();
        self.g_score = FxHashMap::default();
        self.predecessors = PredecessorMap::default();
        self.closed = FxHashSet::default();
    }
}

impl<G: GridView + ?Sized, O> fmt::Debug for PathSearch<'_, G, O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PathSearch")
            .field("start", &self.start)
            .field("destination", &self.destination)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("cycles", &self.cycles)
            .field("open", &self.frontier.len())
            .finish()
    }
}

/// Runs a search from `start` to `destination` to completion.
pub fn find_path<G: GridView + ?Sized>(
    grid: &G,
    start: Point,
    destination: Point,
    config: SearchConfig,
) -> Result<SearchOutcome, ConfigurationError> {
    let mut search = PathSearch::new(grid, start, destination, config)?;
    search.run_to_completion();
    Ok(search
        .into_result()
        .unwrap_or(SearchOutcome::Failed(FailureReason::NoPathFound)))
}
