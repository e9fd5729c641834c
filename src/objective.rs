//! The scoring contract between the engines and the caller.
//!
//! An [`Objective`] maps a [`Candidate`] to a scalar cost. Lower is better.
//! Objectives must not fail: a configuration that cannot be scored is
//! reported as `f64::INFINITY`, which ranks it behind every real result
//! while still letting the search continue.
//!
//! Any expensive state the objective needs (a dataset, a model, a client)
//! belongs to the objective value itself and is passed in by the caller.

use std::fmt::Display;

use log::warn;

use crate::candidate::Candidate;

/// Scores candidates. Lower is better.
///
/// Implemented for every `Fn(&Candidate) -> f64 + Send + Sync` closure.
///
/// # Thread Safety
///
/// `Objective` must be `Send + Sync` because the GA may evaluate offspring
/// in parallel when the `parallel` feature is enabled.
pub trait Objective: Send + Sync {
    /// Computes the cost of `candidate`.
    ///
    /// Return `f64::INFINITY` if the candidate cannot be evaluated.
    fn score(&self, candidate: &Candidate) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&Candidate) -> f64 + Send + Sync,
{
    fn score(&self, candidate: &Candidate) -> f64 {
        self(candidate)
    }
}

/// Adapts a fallible scoring function into an [`Objective`].
///
/// Errors are logged and turned into `f64::INFINITY`.
pub fn penalize_failures<F, E>(score: F) -> Penalized<F>
where
    F: Fn(&Candidate) -> Result<f64, E> + Send + Sync,
    E: Display,
{
    Penalized { score }
}

/// See [`penalize_failures`].
#[derive(Debug, Clone)]
pub struct Penalized<F> {
    score: F,
}

impl<F, E> Objective for Penalized<F>
where
    F: Fn(&Candidate) -> Result<f64, E> + Send + Sync,
    E: Display,
{
    fn score(&self, candidate: &Candidate) -> f64 {
        match (self.score)(candidate) {
            Ok(value) => value,
            Err(err) => {
                warn!("evaluation failed for {candidate}: {err}");
                f64::INFINITY
            }
        }
    }
}

/// Scores `candidate` unless it already carries a fitness.
///
/// NaN scores are treated as failures so that ordering stays total.
pub(crate) fn evaluate<O: Objective + ?Sized>(objective: &O, candidate: Candidate) -> Candidate {
    if candidate.is_evaluated() {
        return candidate;
    }
    let fitness = score_of(objective, &candidate);
    candidate.with_fitness(fitness)
}

/// Raw score with NaN mapped to `+inf`.
pub(crate) fn score_of<O: Objective + ?Sized>(objective: &O, candidate: &Candidate) -> f64 {
    let fitness = objective.score(candidate);
    if fitness.is_nan() {
        warn!("objective returned NaN for {candidate}; treating as failure");
        f64::INFINITY
    } else {
        fitness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::{ParamValue, SearchSpace};

    fn candidate(x: i64) -> Candidate {
        SearchSpace::builder()
            .integer("x", -10, 10)
            .build()
            .unwrap()
            .candidate([("x", ParamValue::Integer(x))])
            .unwrap()
    }

    #[test]
    fn test_closure_objective() {
        let objective = |c: &Candidate| {
            let x = c.get("x").and_then(ParamValue::as_int).unwrap_or(0) as f64;
            (x - 7.0).powi(2)
        };
        assert_eq!(objective.score(&candidate(7)), 0.0);
        assert_eq!(objective.score(&candidate(5)), 4.0);
    }

    #[test]
    fn test_penalized_failures_become_infinite() {
        let objective = penalize_failures(|c: &Candidate| {
            match c.get("x").and_then(ParamValue::as_int) {
                Some(x) if x >= 0 => Ok(x as f64),
                _ => Err("negative layer count"),
            }
        });
        assert_eq!(objective.score(&candidate(3)), 3.0);
        assert_eq!(objective.score(&candidate(-3)), f64::INFINITY);
    }

    #[test]
    fn test_evaluate_skips_scored_candidates() {
        let objective = |_: &Candidate| -> f64 { panic!("should not be called") };
        let scored = candidate(1).with_fitness(0.5);
        assert_eq!(evaluate(&objective, scored).fitness(), Some(0.5));
    }

    #[test]
    fn test_nan_is_a_failure() {
        let objective = |_: &Candidate| f64::NAN;
        assert_eq!(evaluate(&objective, candidate(1)).fitness(), Some(f64::INFINITY));
    }
}
