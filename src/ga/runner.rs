//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the generational process:
//! evaluation → tournament selection → crossover → mutation →
//! survivor truncation → repeat.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};

use super::config::GaConfig;
use super::operators::{reset_mutation, uniform_crossover};
use super::selection::{select_survivors, tournament};
use crate::candidate::{Candidate, Population};
use crate::error::{ConfigError, Result};
use crate::objective::{evaluate, Objective};
use crate::random::rng_from_seed;
use crate::space::SearchSpace;

/// Progress of one generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,

    /// Fitness of the best survivor.
    pub best_fitness: f64,

    /// Mean of the finite survivor fitness values.
    pub mean_fitness: Option<f64>,

    /// Survivors kept after truncation.
    pub population_size: usize,

    /// Objective calls made during this generation.
    pub evaluations: usize,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GaResult {
    /// The best candidate found during the entire run.
    pub best: Candidate,

    /// Best fitness value (same as `best.score()`).
    pub best_fitness: f64,

    /// Survivors of the last generation, best first.
    pub population: Population,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run stopped on the stagnation limit.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best candidate of each generation.
    pub history: Vec<Candidate>,

    /// Per-generation statistics.
    pub stats: Vec<GenerationStats>,

    /// Total objective calls, including the initial population.
    pub evaluations: usize,
}

impl GaResult {
    /// Best fitness of each generation.
    pub fn fitness_history(&self) -> Vec<f64> {
        self.history.iter().map(Candidate::score).collect()
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use hyperopt_search::candidate::Candidate;
/// use hyperopt_search::ga::{GaConfig, GaRunner};
/// use hyperopt_search::random::create_rng;
/// use hyperopt_search::space::{ParamValue, SearchSpace};
///
/// let space = SearchSpace::builder().integer("x", 0, 10).build().unwrap();
/// let objective = |c: &Candidate| {
///     let x = c.get("x").and_then(ParamValue::as_int).unwrap_or(0) as f64;
///     (x - 7.0).powi(2)
/// };
///
/// let config = GaConfig::default().with_population_size(20).with_generations(30).with_seed(1);
/// let initial = space.sample_many(config.population_size, &mut create_rng(1));
/// let result = GaRunner::run(&space, initial, &objective, &config).unwrap();
/// assert_eq!(result.generations, 30);
/// assert!(result.best_fitness <= 1.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// `initial` must hold exactly `config.population_size` candidates of
    /// `space`; unevaluated ones are scored before the first generation.
    pub fn run<O: Objective + ?Sized>(
        space: &SearchSpace,
        initial: Vec<Candidate>,
        objective: &O,
        config: &GaConfig,
    ) -> Result<GaResult> {
        Self::run_with_cancel(space, initial, objective, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA will
    /// stop before the next generation and return the best candidate found
    /// so far.
    pub fn run_with_cancel<O: Objective + ?Sized>(
        space: &SearchSpace,
        initial: Vec<Candidate>,
        objective: &O,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        config.validate()?;
        if initial.len() != config.population_size {
            return Err(ConfigError::PopulationSizeMismatch {
                expected: config.population_size,
                actual: initial.len(),
            });
        }
        for candidate in &initial {
            space.check(candidate)?;
        }

        let mut rng = rng_from_seed(config.seed);
        let n = config.population_size;

        info!(
            "GA start: population {n}, generations {}, mutation rate {}",
            config.generations, config.mutation_rate
        );

        // 1. Evaluate whatever arrives unevaluated
        let mut evaluations = initial.iter().filter(|c| !c.is_evaluated()).count();
        let mut population = evaluate_all(objective, initial, config.parallel);

        let mut history = Vec::new();
        let mut stats = Vec::new();
        let mut best: Option<Candidate> = None;
        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;

        for generation in 1..=config.generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // 2. Breed N offspring from the current population
            let mut offspring = Vec::with_capacity(n);
            while offspring.len() < n {
                let p1 = tournament(&population, config.tournament_size, &mut rng);
                let p2 = tournament(&population, config.tournament_size, &mut rng);
                let child = uniform_crossover(&population[p1], &population[p2], &mut rng);
                let child = reset_mutation(&child, space, config.mutation_rate, &mut rng);
                offspring.push(child);
            }
            let offspring = evaluate_all(objective, offspring, config.parallel);
            evaluations += n;

            // 3. Survivor selection over P ∪ Pnew
            population.extend(offspring);
            population = select_survivors(population, n);

            // 4. Record
            let survivors = Population::new(population.clone());
            let gen_best = population[0].clone();
            let improved = match &best {
                Some(b) => gen_best.score() < b.score(),
                None => true,
            };
            if improved {
                best = Some(gen_best.clone());
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            let gen_stats = GenerationStats {
                generation,
                best_fitness: gen_best.score(),
                mean_fitness: survivors.mean_fitness(),
                population_size: survivors.len(),
                evaluations: n,
            };
            debug!(
                "generation {generation}/{} | best {:.5} | mean {:?}",
                config.generations, gen_stats.best_fitness, gen_stats.mean_fitness
            );
            history.push(gen_best);
            stats.push(gen_stats);

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        let population = Population::new(population);
        let best = match best {
            Some(best) => best,
            // cancelled before the first generation
            None => population
                .best()
                .cloned()
                .ok_or(ConfigError::PopulationSizeMismatch {
                    expected: n,
                    actual: 0,
                })?,
        };

        info!(
            "GA done after {} generations: best {:.5} ({} evaluations)",
            history.len(),
            best.score(),
            evaluations
        );

        Ok(GaResult {
            best_fitness: best.score(),
            best,
            population,
            generations: history.len(),
            stagnated,
            cancelled,
            history,
            stats,
            evaluations,
        })
    }
}

/// Evaluates every unevaluated candidate.
///
/// All evaluations finish before this returns, so callers always select
/// from a complete snapshot.
#[cfg(feature = "parallel")]
fn evaluate_all<O: Objective + ?Sized>(
    objective: &O,
    candidates: Vec<Candidate>,
    parallel: bool,
) -> Vec<Candidate> {
    use rayon::prelude::*;

    if parallel {
        candidates
            .into_par_iter()
            .map(|c| evaluate(objective, c))
            .collect()
    } else {
        candidates
            .into_iter()
            .map(|c| evaluate(objective, c))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all<O: Objective + ?Sized>(
    objective: &O,
    candidates: Vec<Candidate>,
    _parallel: bool,
) -> Vec<Candidate> {
    candidates
        .into_iter()
        .map(|c| evaluate(objective, c))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
