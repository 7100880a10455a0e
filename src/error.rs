//! Error types for the fallible edges of the crate.
//!
//! The evolutionary core itself cannot fail. Errors only arise when
//! parsing sticker strings from outside the crate or when validating a
//! [`GaConfig`](crate::ga::GaConfig).

use thiserror::Error;

/// Failure to parse a 54-character sticker string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFaceletsError {
    #[error("expected 54 stickers, found {found}")]
    InvalidLength { found: usize },

    #[error("invalid sticker {sticker:?} at position {position}")]
    InvalidSticker { sticker: char, position: usize },
}

/// Invalid [`GaConfig`](crate::ga::GaConfig) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("population_size must be at least {minimum}, got {size}")]
    PopulationTooSmall { size: usize, minimum: usize },

    #[error("only {candidates} candidates per generation, cannot fill a population of {population_size}")]
    NotEnoughCandidates {
        candidates: usize,
        population_size: usize,
    },

    #[error("max_generations must be at least 1")]
    ZeroGenerations,
}

/// A population that cannot be advanced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvanceError {
    #[error("population needs at least {minimum} individuals to advance, got {found}")]
    TooFewIndividuals { found: usize, minimum: usize },
}
