//! GA configuration.
//!
//! [`GaConfig`] holds the parameters of a run. The evolutionary policy
//! itself (four elites, two children, tiered generation) is fixed; only the
//! sizes around it are tunable.

use super::selection::{CHILD_COUNT, ELITE_COUNT};
use crate::error::ConfigError;

/// Default number of individuals per generation.
pub const DEFAULT_POPULATION_SIZE: usize = 16;

/// Default number of fresh random individuals injected per generation.
pub const DEFAULT_FRESH_COUNT: usize = 10;

/// Configuration for an evolution run.
///
/// # Defaults
///
/// ```
/// use cube_evolab::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 16);
/// assert_eq!(config.fresh_count, 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use cube_evolab::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_mutation_rate(0.5)
///     .with_max_generations(200)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Individuals kept after every advance.
    pub population_size: usize,

    /// Fresh random individuals generated per advance.
    ///
    /// Together with the four elites and two children these form the
    /// candidate pool, which is then ranked and cut to `population_size`.
    pub fresh_count: usize,

    /// Mutation rate (0.0–1.0).
    ///
    /// Accepted and passed along with every advance, but no operator reads
    /// it: the post-crossover swap uses a fixed probability.
    pub mutation_rate: f64,

    /// Generation limit for [`EvolutionSession::run`](super::EvolutionSession::run).
    pub max_generations: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            fresh_count: DEFAULT_FRESH_COUNT,
            mutation_rate: 0.2,
            max_generations: 1000,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of fresh individuals per generation.
    pub fn with_fresh_count(mut self, n: usize) -> Self {
        self.fresh_count = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Candidates produced per advance: elites, children and fresh ones.
    pub fn candidate_count(&self) -> usize {
        ELITE_COUNT + CHILD_COUNT + self.fresh_count
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_sizes()?;
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        Ok(())
    }

    /// Checks only the parameters a single advance depends on: the
    /// population size and the candidate pool that must fill it.
    pub fn validate_sizes(&self) -> Result<(), ConfigError> {
        if self.population_size < ELITE_COUNT {
            return Err(ConfigError::PopulationTooSmall {
                size: self.population_size,
                minimum: ELITE_COUNT,
            });
        }
        if self.candidate_count() < self.population_size {
            return Err(ConfigError::NotEnoughCandidates {
                candidates: self.candidate_count(),
                population_size: self.population_size,
            });
        }
        Ok(())
    }
}
