//! Simulated Annealing (SA).
//!
//! A single-solution trajectory search inspired by the physical annealing
//! process. Each cooling level runs a fixed number of single-parameter
//! perturbations; worsening moves are accepted with a probability that
//! decreases with the temperature, allowing the search to escape local
//! optima. Cooling is geometric.
//!
//! The run stops when the temperature reaches its floor, when too many
//! levels pass without a new global best, or when cancelled.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod acceptance;
mod config;
mod perturb;
mod runner;

pub use acceptance::{acceptance_probability, metropolis_accepts, TEMPERATURE_FLOOR};
pub use config::SaConfig;
pub use perturb::{NeighborhoodPerturbation, Perturb};
pub use runner::{LevelStats, SaResult, SaRunner, Termination};
