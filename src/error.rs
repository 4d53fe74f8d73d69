use core::fmt;
use grid_util::point::Point;
use thiserror::Error;

/// Which end of a requested route a [ConfigurationError] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Destination => write!(f, "destination"),
        }
    }
}

/// Raised before a search starts running. A rejected submission leaves nothing behind, so the
/// caller can fix the grid or the [SearchConfig](crate::SearchConfig) and submit again.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("grid has no start cell")]
    MissingStart,
    #[error("grid has no destination cell")]
    MissingDestination,
    #[error("{endpoint} {point} lies outside the {width}x{height} grid")]
    OutOfBounds {
        endpoint: Endpoint,
        point: Point,
        width: usize,
        height: usize,
    },
    #[error("{endpoint} {point} is a wall")]
    Blocked { endpoint: Endpoint, point: Point },
    #[error("unknown heuristic method `{0}`")]
    UnknownHeuristic(String),
    #[error("weighting bound must be finite and at least 1, got {0}")]
    InvalidWeight(f64),
}
