//! Genetic Algorithm.
//!
//! A generational GA over a [`SearchSpace`](crate::space::SearchSpace):
//! every generation breeds `N` offspring by tournament selection, uniform
//! crossover and reset mutation, then keeps the best `N` of parents and
//! offspring combined (elitist truncation).
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, generations, mutation rate)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final optimization result with per-generation history
//!
//! # Submodules
//!
//! - [`operators`]: Uniform crossover and reset mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;

pub use config::GaConfig;
pub use operators::{reset_mutation, uniform_crossover};
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use selection::{select_survivors, tournament};
