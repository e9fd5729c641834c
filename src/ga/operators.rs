//! Genetic operators over mixed-type candidates.
//!
//! - [`uniform_crossover`]: per-gene fair coin between two parents
//! - [`reset_mutation`]: per-gene redraw from the parameter's domain
//!
//! Both build a new, unevaluated [`Candidate`]; the inputs are untouched.
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use rand::Rng;

use crate::candidate::Candidate;
use crate::space::SearchSpace;

/// Uniform crossover.
///
/// Each gene is copied from `parent1` with probability 0.5, otherwise from
/// `parent2`. Fitness is not inherited.
///
/// # Panics
/// Panics if the parents belong to different spaces.
pub fn uniform_crossover<R: Rng>(parent1: &Candidate, parent2: &Candidate, rng: &mut R) -> Candidate {
    assert!(
        parent1.same_shape(parent2),
        "parents must come from the same search space"
    );

    let genes = parent1
        .values()
        .iter()
        .zip(parent2.values())
        .map(|(a, b)| if rng.random_bool(0.5) { a.clone() } else { b.clone() })
        .collect();
    parent1.with_values(genes)
}

/// Reset mutation.
///
/// Each gene is independently replaced, with probability `rate`, by a fresh
/// uniform draw from its domain in `space`. With `rate == 0.0` the result
/// equals `candidate`'s values; with `rate == 1.0` every gene is redrawn.
pub fn reset_mutation<R: Rng>(
    candidate: &Candidate,
    space: &SearchSpace,
    rate: f64,
    rng: &mut R,
) -> Candidate {
    let genes = candidate
        .values()
        .iter()
        .zip(space.specs())
        .map(|(value, spec)| {
            if rng.random::<f64>() < rate {
                spec.sample(rng)
            } else {
                value.clone()
            }
        })
        .collect();
    candidate.with_values(genes)
}
