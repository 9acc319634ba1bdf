//! Search configuration parameters.

/// Configuration for a UCT search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of simulation iterations to run per search.
    pub iterations: u32,

    /// Exploration weight used during selection. √2 balances
    /// exploitation against exploration; the final action choice always
    /// uses weight zero regardless of this setting.
    pub exploration: f64,

    /// Expected branching factor of the domain. Sizes every node's
    /// children index once at node construction; the index never grows,
    /// so lookups degrade linearly past `branching_estimate * 5/4`
    /// distinct actions at one node.
    pub branching_estimate: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 5000,
            exploration: std::f64::consts::SQRT_2,
            branching_estimate: 10,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 50,
            ..Self::default()
        }
    }

    /// Builder pattern: set the iteration budget.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the selection exploration weight.
    pub fn with_exploration(mut self, weight: f64) -> Self {
        self.exploration = weight;
        self
    }

    /// Builder pattern: set the expected branching factor.
    pub fn with_branching_estimate(mut self, estimate: usize) -> Self {
        self.branching_estimate = estimate;
        self
    }

    /// Bucket count for a node's children index: a quarter above the
    /// branching estimate, never zero.
    pub(crate) fn index_capacity(&self) -> usize {
        (self.branching_estimate * 5 / 4).max(1)
    }
}
