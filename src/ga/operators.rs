//! Generation and recombination operators.
//!
//! # Weighted generation
//!
//! Fresh individuals are not uniformly random: a target fitness is drawn
//! from three tiers first, then a configuration with exactly that many
//! solved stickers is built.
//!
//! | probability | fitness range |
//! |-------------|---------------|
//! | 0.6         | 10..=30       |
//! | 0.3         | 31..=45       |
//! | 0.1         | 46..=53       |
//!
//! # Crossover
//!
//! Single-point: the head of the first parent up to a uniform cut, the
//! tail of the second from the cut on. A child is then swap-perturbed
//! with a fixed probability of [`PERTURBATION_PROBABILITY`].

use super::types::Individual;
use crate::cube::{Facelets, SOLVED, STICKER_COUNT};
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::RangeInclusive;

/// Chance that a crossover child gets one extra swap.
///
/// Fixed; the mutation rate passed to an advance does not change it.
pub const PERTURBATION_PROBABILITY: f64 = 0.02;

/// One band of the weighted target-fitness distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessTier {
    /// Cumulative probability bound: the tier is chosen when the uniform
    /// draw is below this and above every earlier tier's bound.
    pub threshold: f64,
    /// Smallest fitness in the tier.
    pub base: usize,
    /// Number of distinct fitness values in the tier.
    pub span: usize,
}

impl FitnessTier {
    /// Fitness values this tier can produce.
    pub fn range(&self) -> RangeInclusive<usize> {
        self.base..=self.base + self.span - 1
    }
}

/// The three tiers, in draw order.
pub const FITNESS_TIERS: [FitnessTier; 3] = [
    FitnessTier {
        threshold: 0.6,
        base: 10,
        span: 21,
    },
    FitnessTier {
        threshold: 0.9,
        base: 31,
        span: 15,
    },
    FitnessTier {
        threshold: 1.0,
        base: 46,
        span: 8,
    },
];

/// Draws a target fitness from [`FITNESS_TIERS`].
pub fn sample_target_fitness<R: Rng + ?Sized>(rng: &mut R) -> usize {
    let r: f64 = rng.random();
    let tier = FITNESS_TIERS
        .iter()
        .find(|t| r < t.threshold)
        .unwrap_or(&FITNESS_TIERS[FITNESS_TIERS.len() - 1]);
    tier.base + rng.random_range(0..tier.span)
}

/// Builds a configuration with exactly `matches` stickers in place.
///
/// Positions are shuffled; the first `matches` keep their solved sticker
/// and every other position gets one of the five wrong stickers, chosen
/// uniformly. `matches` above [`STICKER_COUNT`] is treated as a full match.
pub fn scramble_with_matches<R: Rng + ?Sized>(matches: usize, rng: &mut R) -> Facelets {
    let matches = matches.min(STICKER_COUNT);
    let mut positions: [usize; STICKER_COUNT] = std::array::from_fn(|i| i);
    positions.shuffle(rng);

    let mut facelets = SOLVED;
    for &pos in &positions[matches..] {
        let wrong = SOLVED[pos].others();
        facelets.set(pos, wrong[rng.random_range(0..wrong.len())]);
    }
    facelets
}

/// Creates one fresh individual with a tier-weighted fitness.
///
/// The result is never marked bred.
pub fn random_individual<R: Rng + ?Sized>(slot: usize, rng: &mut R) -> Individual {
    let target = sample_target_fitness(rng);
    Individual::new(scramble_with_matches(target, rng), false, slot)
}

/// Joins `head[..cut]` with `tail[cut..]`.
///
/// A `cut` past the end yields a copy of `head`.
pub fn crossover_at(head: &Facelets, tail: &Facelets, cut: usize) -> Facelets {
    let mut child = *head;
    child.copy_tail_from(tail, cut.min(STICKER_COUNT));
    child
}

/// Swaps two uniformly chosen positions. They may coincide.
pub fn swap_perturbation<R: Rng + ?Sized>(facelets: &mut Facelets, rng: &mut R) {
    let i = rng.random_range(0..STICKER_COUNT);
    let j = rng.random_range(0..STICKER_COUNT);
    facelets.swap(i, j);
}

/// Recombines two parents into one bred child.
pub fn crossover<R: Rng + ?Sized>(
    parent1: &Individual,
    parent2: &Individual,
    slot: usize,
    rng: &mut R,
) -> Individual {
    let cut = rng.random_range(0..STICKER_COUNT);
    let mut child = crossover_at(parent1.facelets(), parent2.facelets(), cut);

    if rng.random_bool(PERTURBATION_PROBABILITY) {
        swap_perturbation(&mut child, rng);
    }

    Individual::new(child, true, slot)
}

// ============================================================================
// Tests
// ============================================================================
