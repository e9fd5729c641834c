//! Metropolis acceptance criterion.
//!
//! Improving moves are always accepted. A worsening move of size `Δ` is
//! accepted with probability `exp(-Δ / T)`, which falls to 0 as `T → 0⁺`
//! and rises to 1 as `T → ∞`.
//!
//! # References
//!
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"

use rand::Rng;

/// Temperatures at or below this never accept a worsening move.
pub const TEMPERATURE_FLOOR: f64 = 1e-9;

/// Probability of moving from a solution scored `current` to one scored
/// `candidate` at `temperature`.
///
/// # Examples
///
/// ```
/// use hyperopt_search::sa::acceptance_probability;
///
/// assert_eq!(acceptance_probability(2.0, 1.0, 0.5), 1.0);
/// let p = acceptance_probability(1.0, 2.0, 1.0);
/// assert!((p - (-1.0f64).exp()).abs() < 1e-12);
/// assert_eq!(acceptance_probability(1.0, 2.0, 0.0), 0.0);
/// ```
pub fn acceptance_probability(current: f64, candidate: f64, temperature: f64) -> f64 {
    if candidate < current {
        return 1.0;
    }
    if temperature.is_nan() || temperature <= TEMPERATURE_FLOOR {
        return 0.0;
    }
    let delta = current - candidate;
    // inf - inf: two failed evaluations
    if delta.is_nan() {
        return 0.0;
    }
    (delta / temperature).exp()
}

/// Draws the Metropolis decision.
///
/// Consumes randomness only for non-improving moves.
pub fn metropolis_accepts<R: Rng>(
    current: f64,
    candidate: f64,
    temperature: f64,
    rng: &mut R,
) -> bool {
    if candidate < current {
        return true;
    }
    let probability = acceptance_probability(current, candidate, temperature);
    probability > 0.0 && rng.random_range(0.0..1.0) < probability
}
