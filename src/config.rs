use crate::error::ConfigurationError;
use crate::heuristic::HeuristicMethod;
use crate::weighting::Weighting;
use crate::ALLOW_CORNER_CUTTING;

/// Cycle budget per grid cell when [SearchConfig::cycle_budget] is left unset.
pub const BUDGET_PER_CELL: usize = 10;

/// Everything that shapes a single search. Passed by value to every submission, so concurrent
/// searches on different settings never interfere.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub heuristic: HeuristicMethod,
    pub weighting: Weighting,
    /// Maximum number of expansions; [None] means [BUDGET_PER_CELL] times the cell count.
    pub cycle_budget: Option<usize>,
    /// Allow diagonal moves between two orthogonally blocked cells.
    pub allow_corner_cutting: bool,
    /// Never re-expand a node once it has been popped from the frontier.
    pub closed_set: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            heuristic: HeuristicMethod::Octile,
            weighting: Weighting::Disabled,
            cycle_budget: None,
            allow_corner_cutting: ALLOW_CORNER_CUTTING,
            closed_set: false,
        }
    }
}

impl SearchConfig {
    pub fn with_heuristic(mut self, heuristic: HeuristicMethod) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Looks the heuristic up by name, see [HeuristicMethod]'s `FromStr`.
    pub fn with_heuristic_named(mut self, name: &str) -> Result<Self, ConfigurationError> {
        self.heuristic = name.parse()?;
        Ok(self)
    }

    pub fn with_weight(mut self, w: f64) -> Result<Self, ConfigurationError> {
        self.weighting = Weighting::bounded(w)?;
        Ok(self)
    }

    pub fn with_cycle_budget(mut self, budget: usize) -> Self {
        self.cycle_budget = Some(budget);
        self
    }

    pub fn without_corner_cutting(mut self) -> Self {
        self.allow_corner_cutting = false;
        self
    }

    pub fn with_closed_set(mut self) -> Self {
        self.closed_set = true;
        self
    }

    /// Budget that applies on a grid with `cell_count` cells.
    pub fn effective_budget(&self, cell_count: usize) -> usize {
        self.cycle_budget
            .unwrap_or_else(|| cell_count.saturating_mul(BUDGET_PER_CELL))
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.weighting.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_scales_with_grid() {
        let config = SearchConfig::default();
        assert_eq!(config.effective_budget(50 * 50), 25_000);
        assert_eq!(config.with_cycle_budget(64).effective_budget(50 * 50), 64);
    }

    #[test]
    fn builder() {
        let config = SearchConfig::default()
            .with_heuristic_named("euclidean")
            .unwrap()
            .with_weight(1.5)
            .unwrap()
            .without_corner_cutting()
            .with_closed_set();
        assert_eq!(config.heuristic, HeuristicMethod::Euclidean);
        assert_eq!(config.weighting, Weighting::Bounded(1.5));
        assert!(!config.allow_corner_cutting);
        assert!(config.closed_set);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_settings() {
        assert!(SearchConfig::default().with_weight(0.5).is_err());
        assert!(SearchConfig::default().with_heuristic_named("straight").is_err());
        let config = SearchConfig {
            weighting: Weighting::Bounded(0.0),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::InvalidWeight(0.0))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_config() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"heuristic":"Euclidean","weighting":{"Bounded":2.0}}"#)
                .unwrap();
        assert_eq!(config.heuristic, HeuristicMethod::Euclidean);
        assert_eq!(config.weighting, Weighting::Bounded(2.0));
        assert!(config.allow_corner_cutting);
    }
}
