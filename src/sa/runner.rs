//! SA execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, trace};

use super::acceptance::metropolis_accepts;
use super::config::SaConfig;
use super::perturb::Perturb;
use crate::candidate::Candidate;
use crate::error::Result;
use crate::objective::{evaluate, Objective};
use crate::random::rng_from_seed;

/// Why the annealing loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Termination {
    /// The temperature cooled to `min_temperature`.
    MinTemperature,
    /// `max_stall_cycles` levels passed without a new global best.
    Stalled,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Progress of one cooling level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LevelStats {
    /// 1-based level number.
    pub level: usize,

    /// Temperature the trials of this level ran at.
    pub temperature: f64,

    /// Accepted moves, improving or not.
    pub accepted: usize,

    /// Accepted moves that did not improve the current score.
    pub worse_accepted: usize,

    /// Score of the current solution at the end of the level.
    pub current_score: f64,

    /// Best score found so far.
    pub best_score: f64,
}

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SaResult {
    /// The best candidate found.
    pub best: Candidate,

    /// Score of the best candidate.
    pub best_score: f64,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Stall counter when the algorithm stopped.
    pub stall_count: usize,

    /// Number of completed cooling levels.
    pub levels: usize,

    /// Total perturbation trials.
    pub trials: usize,

    /// Total objective calls, including the initial candidate.
    pub evaluations: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Which stopping condition fired.
    pub termination: Termination,

    /// Per-level statistics.
    pub trace: Vec<LevelStats>,

    /// Best score before the first level and after every level.
    pub score_history: Vec<f64>,
}

/// Executes the Simulated Annealing algorithm.
///
/// # Usage
///
/// ```
/// use hyperopt_search::candidate::Candidate;
/// use hyperopt_search::sa::{NeighborhoodPerturbation, SaConfig, SaRunner};
/// use hyperopt_search::space::{ParamValue, SearchSpace};
///
/// let space = SearchSpace::builder().integer("x", 0, 10).build().unwrap();
/// let objective = |c: &Candidate| {
///     let x = c.get("x").and_then(ParamValue::as_int).unwrap_or(0) as f64;
///     (x - 7.0).powi(2)
/// };
///
/// let initial = space.candidate([("x", 0i64)]).unwrap();
/// let perturb = NeighborhoodPerturbation::new(&space);
/// let config = SaConfig::default().with_seed(42);
/// let result = SaRunner::run(initial, &perturb, &objective, &config).unwrap();
/// assert!(result.best_score < 49.0);
/// ```
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization starting from `initial`.
    pub fn run<P, O>(
        initial: Candidate,
        perturb: &P,
        objective: &O,
        config: &SaConfig,
    ) -> Result<SaResult>
    where
        P: Perturb,
        O: Objective + ?Sized,
    {
        Self::run_with_cancel(initial, perturb, objective, config, None)
    }

    /// Runs SA with an optional cancellation token.
    ///
    /// The flag is checked before every cooling level.
    pub fn run_with_cancel<P, O>(
        initial: Candidate,
        perturb: &P,
        objective: &O,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult>
    where
        P: Perturb,
        O: Objective + ?Sized,
    {
        config.validate()?;
        perturb.space().check(&initial)?;

        let mut rng = rng_from_seed(config.seed);
        let t0 = config.initial_temperature;

        info!(
            "SA start: T0 {t0}, alpha {}, Tmin {}, {} trials per level",
            config.cooling_rate, config.min_temperature, config.max_trials_per_level
        );

        // Initialize
        let mut evaluations = usize::from(!initial.is_evaluated());
        let mut current = evaluate(objective, initial);
        let mut current_score = current.score();
        let mut best = current.clone();
        let mut best_score = current_score;

        let mut temperature = t0;
        let mut stall = 0usize;
        let mut trials = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut levels: Vec<LevelStats> = Vec::new();
        let mut score_history = vec![best_score];

        let termination = loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break Termination::Cancelled;
                }
            }
            if temperature <= config.min_temperature {
                break Termination::MinTemperature;
            }
            if stall >= config.max_stall_cycles {
                break Termination::Stalled;
            }

            let mut accepted = 0usize;
            let mut worse_accepted = 0usize;

            for _ in 0..config.max_trials_per_level {
                let candidate = perturb.perturb(&current, temperature, t0, &mut rng);
                let candidate = evaluate(objective, candidate);
                let score = candidate.score();
                evaluations += 1;
                trials += 1;

                let improving = score < current_score;
                let accept = metropolis_accepts(current_score, score, temperature, &mut rng);
                trace!(
                    "T {temperature:.6} | {candidate} | current {current_score:.5} | accept {accept}"
                );

                if accept {
                    accepted += 1;
                    if improving {
                        improving_moves += 1;
                    } else {
                        worse_accepted += 1;
                    }
                    current = candidate;
                    current_score = score;

                    if current_score < best_score {
                        best = current.clone();
                        best_score = current_score;
                        stall = 0;
                    }
                }
            }
            accepted_moves += accepted;

            let stats = LevelStats {
                level: levels.len() + 1,
                temperature,
                accepted,
                worse_accepted,
                current_score,
                best_score,
            };
            debug!(
                "level {} | T {:.6} | accepted {} ({} worse) | best {:.5}",
                stats.level, temperature, accepted, worse_accepted, best_score
            );
            levels.push(stats);
            score_history.push(best_score);

            // Cool down; the stall counter advances even after an improving level
            temperature *= config.cooling_rate;
            stall += 1;
        };

        info!(
            "SA done ({termination:?}) after {} levels: best {best_score:.5} ({evaluations} evaluations)",
            levels.len()
        );

        Ok(SaResult {
            best,
            best_score,
            final_temperature: temperature,
            stall_count: stall,
            levels: levels.len(),
            trials,
            evaluations,
            accepted_moves,
            improving_moves,
            termination,
            trace: levels,
            score_history,
        })
    }
}
