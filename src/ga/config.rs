//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{ConfigError, Result};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use hyperopt_search::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.generations, 50);
/// assert_eq!(config.tournament_size, 3);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use hyperopt_search::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(40)
///     .with_generations(100)
///     .with_mutation_rate(0.2)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Number of candidates kept after every generation (`N`).
    ///
    /// Also the number of offspring produced per generation.
    pub population_size: usize,

    /// Number of generations to run (`G`).
    pub generations: usize,

    /// Per-gene probability of reset mutation (`pm`, 0.0–1.0).
    pub mutation_rate: f64,

    /// Candidates drawn (without replacement) per tournament.
    pub tournament_size: usize,

    /// Generations without a new best before stopping early.
    ///
    /// Set to 0 to always run all `generations` (the default).
    pub stagnation_limit: usize,

    /// Whether to evaluate offspring in parallel.
    ///
    /// Only has an effect with the `parallel` cargo feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            generations: 50,
            mutation_rate: 0.1,
            tournament_size: 3,
            stagnation_limit: 0,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.tournament_size == 0 {
            return Err(ConfigError::InvalidSetting(
                "tournament_size must be at least 1".into(),
            ));
        }
        if self.population_size < self.tournament_size {
            return Err(ConfigError::PopulationTooSmall {
                population: self.population_size,
                tournament: self.tournament_size,
            });
        }
        if self.generations == 0 {
            return Err(ConfigError::InvalidSetting(
                "generations must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidSetting(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}
