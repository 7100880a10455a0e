//! Genetic algorithm over cube sticker configurations.
//!
//! A deliberately simple, fixed-policy GA meant for visualization:
//!
//! 1. Generation zero is built from tier-weighted random individuals.
//! 2. Each advance keeps the four fittest, breeds two single-point
//!    crossover children from them, injects fresh random individuals and
//!    re-ranks the lot.
//!
//! All randomness comes from a caller-supplied [`rand::Rng`].
//!
//! # Key Types
//!
//! - [`Individual`], [`Population`]: value types rebuilt every generation
//! - [`GaConfig`]: population sizes, mutation rate, run limit, seed
//! - [`EvolutionSession`]: start / step / reset controller with statistics
//!
//! # Submodules
//!
//! - [`operators`]: weighted generation, crossover and swap perturbation
//! - [`selection`]: stable fitness ranking and elite pairing

mod config;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use config::{GaConfig, DEFAULT_FRESH_COUNT, DEFAULT_POPULATION_SIZE};
pub use runner::{
    ensure_advanceable, initialize_population, next_generation, next_generation_with,
    reset_stagnation, EvolutionResult, EvolutionSession, GenerationStats, StepOutcome,
};
pub use types::{Individual, Population};
