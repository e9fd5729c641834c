//! Hyperparameter search over mixed-type parameter spaces.
//!
//! Provides two black-box optimizers that minimize a user-supplied
//! objective over a space of integer, real and categorical parameters:
//!
//! - **Genetic Algorithm (GA)**: Generational search with tournament
//!   selection, uniform crossover, reset mutation and elitist truncation.
//! - **Simulated Annealing (SA)**: Single-solution trajectory search with
//!   temperature-scaled neighborhood moves, Metropolis acceptance and
//!   geometric cooling.
//!
//! # Architecture
//!
//! - [`space`]: Parameter domains and the [`SearchSpace`](space::SearchSpace)
//!   they form; sampling and membership checks.
//! - [`candidate`]: Immutable assignments of values plus fitness.
//! - [`objective`]: The scoring contract. Lower is better; failures score
//!   `f64::INFINITY` instead of raising.
//! - [`ga`], [`sa`]: The engines. Both are driven by a `*Config` and a
//!   `*Runner`, and return a `*Result` with the best candidate and a trace.
//! - [`error`]: [`ConfigError`](error::ConfigError) for everything that can
//!   be rejected before the search starts.
//!
//! # Example
//!
//! ```
//! use hyperopt_search::candidate::Candidate;
//! use hyperopt_search::ga::{GaConfig, GaRunner};
//! use hyperopt_search::random::create_rng;
//! use hyperopt_search::sa::{NeighborhoodPerturbation, SaConfig, SaRunner};
//! use hyperopt_search::space::{ParamValue, SearchSpace};
//!
//! let space = SearchSpace::builder()
//!     .log_real("lr", 1e-4, 1e-1)
//!     .integer("layers", 1, 8)
//!     .categorical("activation", ["relu", "tanh"])
//!     .build()
//!     .unwrap();
//!
//! let objective = |c: &Candidate| {
//!     let lr = c.get("lr").and_then(ParamValue::as_real).unwrap_or(1.0);
//!     let layers = c.get("layers").and_then(ParamValue::as_real).unwrap_or(0.0);
//!     (lr.log10() + 2.0).abs() + (layers - 3.0).abs() * 0.1
//! };
//!
//! let mut rng = create_rng(42);
//! let ga = GaConfig::default().with_seed(42);
//! let initial = space.sample_many(ga.population_size, &mut rng);
//! let ga_result = GaRunner::run(&space, initial, &objective, &ga).unwrap();
//!
//! let perturb = NeighborhoodPerturbation::new(&space);
//! let sa = SaConfig::default().with_seed(42);
//! let sa_result = SaRunner::run(ga_result.best.clone(), &perturb, &objective, &sa).unwrap();
//! assert!(sa_result.best_score <= ga_result.best_fitness);
//! ```

pub mod candidate;
pub mod error;
pub mod ga;
pub mod objective;
pub mod random;
pub mod sa;
pub mod space;
