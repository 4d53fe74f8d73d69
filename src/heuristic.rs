use core::fmt;
use core::str::FromStr;
use grid_util::point::Point;

use crate::error::ConfigurationError;

/// Distance estimates available to the search. All of them are computed from the absolute
/// coordinate deltas `dx` and `dy` between the two points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeuristicMethod {
    /// `dx + dy`. Overestimates diagonal moves, so it is not admissible on an 8-grid.
    Manhattan,
    /// Straight-line distance. Admissible but looser than [Octile](Self::Octile).
    Euclidean,
    /// `max(dx, dy)`, diagonal moves counted as cost 1.
    Chebyshev,
    /// Exact distance on an empty 8-grid with diagonal cost √2.
    Octile,
    /// Always zero, turning the search into Dijkstra's algorithm.
    Uniform,
}

impl HeuristicMethod {
    pub const ALL: [HeuristicMethod; 5] = [
        HeuristicMethod::Manhattan,
        HeuristicMethod::Euclidean,
        HeuristicMethod::Chebyshev,
        HeuristicMethod::Octile,
        HeuristicMethod::Uniform,
    ];

    /// Estimated remaining cost between `a` and `b`.
    pub fn estimate(self, a: &Point, b: &Point) -> f64 {
        let dx = (a.x - b.x).abs() as f64;
        let dy = (a.y - b.y).abs() as f64;
        match self {
            HeuristicMethod::Manhattan => dx + dy,
            HeuristicMethod::Euclidean => (dx * dx + dy * dy).sqrt(),
            // D = 1, D2 = 1
            HeuristicMethod::Chebyshev => dx + dy - dx.min(dy),
            // D = 1, D2 = √2
            HeuristicMethod::Octile => {
                dx + dy + (std::f64::consts::SQRT_2 - 2.0) * dx.min(dy)
            }
            HeuristicMethod::Uniform => 0.0,
        }
    }

    /// Whether the estimate never exceeds the true cost under the 8-connected cost model.
    pub fn is_admissible(self) -> bool {
        !matches!(self, HeuristicMethod::Manhattan)
    }

    pub fn name(self) -> &'static str {
        match self {
            HeuristicMethod::Manhattan => "manhattan",
            HeuristicMethod::Euclidean => "euclidean",
            HeuristicMethod::Chebyshev => "chebyshev",
            HeuristicMethod::Octile => "octile",
            HeuristicMethod::Uniform => "uniform",
        }
    }
}

impl fmt::Display for HeuristicMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeuristicMethod {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manhattan" => Ok(HeuristicMethod::Manhattan),
            "euclidean" => Ok(HeuristicMethod::Euclidean),
            "chebyshev" => Ok(HeuristicMethod::Chebyshev),
            "octile" => Ok(HeuristicMethod::Octile),
            "uniform" | "dijkstra" => Ok(HeuristicMethod::Uniform),
            _ => Err(ConfigurationError::UnknownHeuristic(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    const EPS: f64 = 1e-9;

    #[test]
    fn formulas() {
        let a = Point::new(1, 2);
        let b = Point::new(4, 8);
        // dx = 3, dy = 6
        assert!((HeuristicMethod::Manhattan.estimate(&a, &b) - 9.0).abs() < EPS);
        assert!((HeuristicMethod::Euclidean.estimate(&a, &b) - 45f64.sqrt()).abs() < EPS);
        assert!((HeuristicMethod::Chebyshev.estimate(&a, &b) - 6.0).abs() < EPS);
        assert!((HeuristicMethod::Octile.estimate(&a, &b) - (3.0 + 3.0 * SQRT_2)).abs() < EPS);
        assert_eq!(HeuristicMethod::Uniform.estimate(&a, &b), 0.0);
    }

    #[test]
    fn symmetric_and_zero_on_identity() {
        let a = Point::new(7, 0);
        let b = Point::new(2, 5);
        for method in HeuristicMethod::ALL {
            assert_eq!(method.estimate(&a, &a), 0.0);
            assert!((method.estimate(&a, &b) - method.estimate(&b, &a)).abs() < EPS);
            assert!(method.estimate(&a, &b) >= 0.0);
        }
    }

    #[test]
    fn parses_names() {
        assert_eq!("Octile".parse::<HeuristicMethod>(), Ok(HeuristicMethod::Octile));
        assert_eq!(" euclidean ".parse::<HeuristicMethod>(), Ok(HeuristicMethod::Euclidean));
        assert_eq!("dijkstra".parse::<HeuristicMethod>(), Ok(HeuristicMethod::Uniform));
        for method in HeuristicMethod::ALL {
            assert_eq!(method.to_string().parse::<HeuristicMethod>(), Ok(method));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "taxicab".parse::<HeuristicMethod>(),
            Err(ConfigurationError::UnknownHeuristic("taxicab".to_owned()))
        );
    }
}
