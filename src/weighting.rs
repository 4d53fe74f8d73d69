use crate::error::ConfigurationError;

/// How the g- and h-scores of a node are combined into its f-score.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weighting {
    /// Plain A*: `f = g + h`.
    #[default]
    Disabled,
    /// Piecewise downward relaxation (pwXD) with suboptimality bound `w >= 1`. Nodes whose
    /// heuristic still dominates their cost are scored as in plain A*; closer to the goal the
    /// heuristic is inflated so the search commits to promising nodes. Found paths cost at most
    /// `w` times the optimum.
    Bounded(f64),
}

impl Weighting {
    pub fn bounded(w: f64) -> Result<Weighting, ConfigurationError> {
        let weighting = Weighting::Bounded(w);
        weighting.validate()?;
        Ok(weighting)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match *self {
            Weighting::Bounded(w) if !(w.is_finite() && w >= 1.0) => {
                Err(ConfigurationError::InvalidWeight(w))
            }
            _ => Ok(()),
        }
    }

    #[inline]
    pub fn combine(&self, g: f64, h: f64) -> f64 {
        match *self {
            Weighting::Disabled => g + h,
            Weighting::Bounded(w) => pwxd(g, h, w),
        }
    }
}

/// `g + h` while `h > g`, otherwise `(g + (2w - 1) h) / w`. Both branches meet at `g == h` and
/// grow strictly with `g`, so a cheaper path to a node always lowers its f-score.
#[inline]
pub fn pwxd(g: f64, h: f64, w: f64) -> f64 {
    if h > g {
        g + h
    } else {
        (g + (2.0 * w - 1.0) * h) / w
    }
}
