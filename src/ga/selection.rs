//! Elite selection.
//!
//! Ranking is a stable sort by fitness, best first. No secondary key
//! exists, so equally fit individuals keep their relative storage order.
//! The top [`ELITE_COUNT`] become parents with a fixed pairing: the best
//! with the fourth, the second with the third.

use super::types::Individual;

/// Individuals carried unchanged into the next generation.
pub const ELITE_COUNT: usize = 4;

/// Children bred per generation, one per elite pair.
pub const CHILD_COUNT: usize = 2;

/// Returns references in rank order, best first. Stable on ties.
pub fn rank_by_fitness(individuals: &[Individual]) -> Vec<&Individual> {
    let mut ranked: Vec<&Individual> = individuals.iter().collect();
    ranked.sort_by(|a, b| b.fitness().cmp(&a.fitness()));
    ranked
}

/// Sorts owned individuals into rank order in place. Stable on ties.
pub fn sort_by_fitness(individuals: &mut [Individual]) {
    individuals.sort_by(|a, b| b.fitness().cmp(&a.fitness()));
}

/// The top four of a population, best first.
#[derive(Debug, Clone, Copy)]
pub struct Elites<'a>([&'a Individual; ELITE_COUNT]);

impl<'a> Elites<'a> {
    /// Picks the elites of `individuals`.
    ///
    /// Returns `None` when fewer than [`ELITE_COUNT`] individuals exist.
    pub fn select(individuals: &'a [Individual]) -> Option<Self> {
        let ranked = rank_by_fitness(individuals);
        match ranked.as_slice() {
            [p1, p2, p3, p4, ..] => Some(Self([*p1, *p2, *p3, *p4])),
            _ => None,
        }
    }

    /// Elites in rank order.
    pub fn members(&self) -> &[&'a Individual; ELITE_COUNT] {
        &self.0
    }

    /// Parent pairs for crossover: `(P1, P4)` and `(P2, P3)`.
    pub fn pairings(&self) -> [(&'a Individual, &'a Individual); CHILD_COUNT] {
        let [p1, p2, p3, p4] = self.0;
        [(p1, p4), (p2, p3)]
    }
}
