//! Run configuration.
//!
//! [`RunConfig`] holds the parameters of a single optimizer run.

use crate::error::{Error, Result};
use crate::population::Bounds;

/// Configuration of one optimizer run.
///
/// # Defaults
///
/// ```
/// use u_swarmbench::optimizer::RunConfig;
///
/// let config = RunConfig::default();
/// assert_eq!(config.bounds.dim(), 30);
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_iteration, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_swarmbench::optimizer::RunConfig;
/// use u_swarmbench::population::Bounds;
///
/// let config = RunConfig::new(Bounds::uniform(-10.0, 10.0, 2).unwrap())
///     .with_population_size(4)
///     .with_max_iteration(5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Search space. Its length is the problem dimension.
    pub bounds: Bounds,

    /// Number of candidates `N`.
    pub population_size: usize,

    /// Iteration budget. The run performs `max_iteration - 1` update
    /// steps and produces a trace of exactly `max_iteration` entries.
    pub max_iteration: usize,

    /// Random seed. `None` draws one from the thread-local generator.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::uniform(-100.0, 100.0, 30).expect("constant bounds are valid"),
            population_size: 50,
            max_iteration: 1000,
            seed: None,
        }
    }
}

impl RunConfig {
    /// Creates a configuration over `bounds` with default sizes.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    /// Problem dimension.
    pub fn dim(&self) -> usize {
        self.bounds.dim()
    }

    /// Sets the bounds.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iteration(mut self, n: usize) -> Self {
        self.max_iteration = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.max_iteration == 0 {
            return Err(Error::InvalidConfig(
                "max_iteration must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
