//! Neighborhood moves for annealing.
//!
//! A move changes exactly one parameter, picked uniformly. The step size
//! shrinks with the temperature: at `T0` steps are full-size, near zero
//! temperature they become tiny.

use rand::seq::IndexedRandom;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::candidate::Candidate;
use crate::error::{ConfigError, Result};
use crate::space::{ParamValue, ParameterSpec, SearchSpace};

const EPSILON: f64 = 1e-9;

/// Produces a neighbor of the current candidate.
///
/// Implementations must return a candidate of [`space`](Self::space) whose
/// values are all in-domain.
pub trait Perturb: Send + Sync {
    /// The space candidates are drawn from.
    fn space(&self) -> &SearchSpace;

    /// Returns a new, unevaluated neighbor of `current`.
    fn perturb<R: Rng>(
        &self,
        current: &Candidate,
        temperature: f64,
        initial_temperature: f64,
        rng: &mut R,
    ) -> Candidate;
}

/// Temperature-scaled single-parameter perturbation.
///
/// - Real: Gaussian noise with `σ = σ_base · T/T0`, clamped to the bounds
///   (applied to `ln(x)` for log-scaled parameters). `σ_base` defaults to
///   10% of the range.
/// - Integer: a uniform step in `[-r, r]` with `r = max(1, round(step_base · T/T0))`;
///   a zero step is forced to ±1 when the domain has more than one value.
///   `step_base` defaults to `max(1, (max - min) / 10)`.
/// - Categorical: a uniform choice among the other options.
///
/// # Examples
///
/// ```
/// use hyperopt_search::random::create_rng;
/// use hyperopt_search::sa::{NeighborhoodPerturbation, Perturb};
/// use hyperopt_search::space::SearchSpace;
///
/// let space = SearchSpace::builder()
///     .real("lr", 0.0001, 0.1)
///     .integer("layers", 1, 15)
///     .build()
///     .unwrap();
/// let perturb = NeighborhoodPerturbation::new(&space)
///     .with_sigma_base("lr", 0.01)
///     .unwrap()
///     .with_step_base("layers", 2)
///     .unwrap();
///
/// let mut rng = create_rng(0);
/// let current = space.sample(&mut rng);
/// let next = perturb.perturb(&current, 0.5, 1.0, &mut rng);
/// assert!(space.contains(&next));
/// ```
#[derive(Debug, Clone)]
pub struct NeighborhoodPerturbation {
    space: SearchSpace,
    scales: Vec<f64>,
}

impl NeighborhoodPerturbation {
    /// Uses the default scales for every parameter.
    pub fn new(space: &SearchSpace) -> Self {
        let scales = space.specs().iter().map(default_scale).collect();
        Self {
            space: space.clone(),
            scales,
        }
    }

    /// Overrides `σ_base` of the Real parameter `name`.
    ///
    /// For log-scaled parameters `sigma` is measured in `ln` units.
    pub fn with_sigma_base(mut self, name: &str, sigma: f64) -> Result<Self> {
        let index = self.index_of(name)?;
        if !matches!(self.space.specs()[index], ParameterSpec::Real { .. }) {
            return Err(ConfigError::InvalidSetting(format!(
                "sigma_base applies to real parameters, '{name}' is {}",
                self.space.specs()[index].kind_name()
            )));
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(ConfigError::InvalidSetting(format!(
                "sigma_base for '{name}' must be positive, got {sigma}"
            )));
        }
        self.scales[index] = sigma;
        Ok(self)
    }

    /// Overrides `step_base` of the Integer parameter `name`.
    pub fn with_step_base(mut self, name: &str, step: i64) -> Result<Self> {
        let index = self.index_of(name)?;
        if !matches!(self.space.specs()[index], ParameterSpec::Integer { .. }) {
            return Err(ConfigError::InvalidSetting(format!(
                "step_base applies to integer parameters, '{name}' is {}",
                self.space.specs()[index].kind_name()
            )));
        }
        if step < 1 {
            return Err(ConfigError::InvalidSetting(format!(
                "step_base for '{name}' must be at least 1, got {step}"
            )));
        }
        self.scales[index] = step as f64;
        Ok(self)
    }

    /// Current `σ_base` / `step_base` of `name`; unused for categoricals.
    pub fn scale(&self, name: &str) -> Option<f64> {
        self.space.index_of(name).map(|i| self.scales[i])
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.space
            .index_of(name)
            .ok_or_else(|| ConfigError::UnknownParameter(name.to_string()))
    }
}

impl Perturb for NeighborhoodPerturbation {
    fn space(&self) -> &SearchSpace {
        &self.space
    }

    fn perturb<R: Rng>(
        &self,
        current: &Candidate,
        temperature: f64,
        initial_temperature: f64,
        rng: &mut R,
    ) -> Candidate {
        let index = rng.random_range(0..self.space.len());
        let factor = temperature / (initial_temperature + EPSILON);
        let spec = &self.space.specs()[index];
        let scale = self.scales[index];

        let value = match (spec, current.value(index)) {
            (ParameterSpec::Real { min, max, log_scale }, ParamValue::Real(x)) => {
                let sigma = scale * factor + EPSILON;
                let noise: f64 = rng.sample::<f64, _>(StandardNormal) * sigma;
                let moved = if *log_scale {
                    (x.ln() + noise).exp()
                } else {
                    x + noise
                };
                ParamValue::Real(moved.clamp(*min, *max))
            }
            (ParameterSpec::Integer { min, max }, ParamValue::Integer(v)) => {
                let range = (scale * factor).round().max(1.0) as i64;
                let mut step = rng.random_range(-range..=range);
                if step == 0 && min < max {
                    step = if rng.random_bool(0.5) { 1 } else { -1 };
                }
                ParamValue::Integer(v.saturating_add(step).clamp(*min, *max))
            }
            (ParameterSpec::Categorical { options }, ParamValue::Categorical(s)) => {
                let others: Vec<&String> = options.iter().filter(|o| *o != s).collect();
                match others.choose(rng) {
                    Some(option) => ParamValue::Categorical((*option).clone()),
                    None => ParamValue::Categorical(s.clone()),
                }
            }
            // candidate from another space: leave it alone
            (_, other) => other.clone(),
        };

        current.with_value(index, value)
    }
}

fn default_scale(spec: &ParameterSpec) -> f64 {
    match spec {
        ParameterSpec::Real {
            min,
            max,
            log_scale: false,
        } => 0.1 * (max - min),
        ParameterSpec::Real {
            min,
            max,
            log_scale: true,
        } => 0.1 * (max.ln() - min.ln()),
        ParameterSpec::Integer { min, max } => (max.abs_diff(*min) / 10).max(1) as f64,
        ParameterSpec::Categorical { .. } => 0.0,
    }
}
