//! SA configuration.

use crate::error::{ConfigError, Result};

/// Configuration for the Simulated Annealing algorithm.
///
/// Cooling is geometric: after every level of trials the temperature is
/// multiplied by `cooling_rate`.
///
/// # Examples
///
/// ```
/// use hyperopt_search::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(10.0)
///     .with_min_temperature(0.001)
///     .with_cooling_rate(0.95)
///     .with_max_trials_per_level(100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SaConfig {
    /// Initial temperature (`T0`). Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Cooling factor (`α`) in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    /// Minimum temperature. The algorithm stops once T drops to this.
    pub min_temperature: f64,

    /// Levels without a new global best before stopping.
    pub max_stall_cycles: usize,

    /// Perturbation trials at each temperature level.
    pub max_trials_per_level: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1.0,
            cooling_rate: 0.9,
            min_temperature: 0.001,
            max_stall_cycles: 30,
            max_trials_per_level: 50,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, alpha: f64) -> Self {
        self.cooling_rate = alpha;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_max_stall_cycles(mut self, n: usize) -> Self {
        self.max_stall_cycles = n;
        self
    }

    pub fn with_max_trials_per_level(mut self, n: usize) -> Self {
        self.max_trials_per_level = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Upper bound on the number of cooling levels.
    ///
    /// Geometric cooling reaches `min_temperature` after
    /// `ceil(ln(Tmin / T0) / ln(α))` levels.
    pub fn max_levels(&self) -> usize {
        let levels = (self.min_temperature / self.initial_temperature).ln() / self.cooling_rate.ln();
        levels.ceil().max(0.0) as usize
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(ConfigError::InvalidSetting(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if self.min_temperature.is_nan() || self.min_temperature <= 0.0 {
            return Err(ConfigError::InvalidSetting(format!(
                "min_temperature must be positive, got {}",
                self.min_temperature
            )));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(ConfigError::InvalidSetting(
                "min_temperature must be less than initial_temperature".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.cooling_rate) || self.cooling_rate == 0.0 {
            return Err(ConfigError::InvalidSetting(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if self.max_stall_cycles == 0 {
            return Err(ConfigError::InvalidSetting(
                "max_stall_cycles must be at least 1".into(),
            ));
        }
        if self.max_trials_per_level == 0 {
            return Err(ConfigError::InvalidSetting(
                "max_trials_per_level must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
