//! Individuals and populations.
//!
//! Both are plain values. An advance never edits a population in place;
//! it builds the next one from scratch, so no identity or lineage is kept
//! across generations.

use super::selection::{rank_by_fitness, ELITE_COUNT};
use crate::cube::{compute_fitness, Facelets, MAX_FITNESS};
use std::cmp::Reverse;

/// A candidate configuration with its cached score.
///
/// Fields are private: the fitness is computed once at construction from
/// the facelets, and the only way to get a different sequence is to build
/// a new `Individual`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", from = "IndividualRecord")
)]
pub struct Individual {
    facelets: Facelets,
    moves: Vec<String>,
    fitness: usize,
    bred: bool,
    slot: usize,
}

impl Individual {
    /// Builds an individual and scores it.
    pub fn new(facelets: Facelets, bred: bool, slot: usize) -> Self {
        Self {
            fitness: compute_fitness(&facelets),
            facelets,
            moves: Vec::new(),
            bred,
            slot,
        }
    }

    /// The sticker configuration.
    pub fn facelets(&self) -> &Facelets {
        &self.facelets
    }

    /// Move log. Nothing records moves, so this is always empty.
    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    /// Number of stickers in their solved position.
    pub fn fitness(&self) -> usize {
        self.fitness
    }

    /// Whether the individual is drawn as bred.
    ///
    /// After an advance this is rank-based (everything below the elites),
    /// not a record of how the individual was produced.
    pub fn is_bred(&self) -> bool {
        self.bred
    }

    /// 1-based display position.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// True when every sticker is in place.
    pub fn is_solved(&self) -> bool {
        self.fitness == MAX_FITNESS
    }

    pub(crate) fn relabeled(mut self, slot: usize, bred: bool) -> Self {
        self.slot = slot;
        self.bred = bred;
        self
    }
}

/// Wire shape accepted on deserialization. Any incoming fitness or move
/// log is dropped and the score recomputed.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndividualRecord {
    facelets: Facelets,
    #[serde(default)]
    bred: bool,
    #[serde(default)]
    slot: usize,
}

#[cfg(feature = "serde")]
impl From<IndividualRecord> for Individual {
    fn from(record: IndividualRecord) -> Self {
        Individual::new(record.facelets, record.bred, record.slot)
    }
}

/// An ordered collection of individuals.
///
/// Storage order is display order, not rank order. Use
/// [`ranked`](Population::ranked) for fitness order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Population(Vec<Individual>);

impl Population {
    /// Wraps a list of individuals as-is.
    pub fn new(individuals: Vec<Individual>) -> Self {
        Self(individuals)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Individual] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Individual> {
        self.0
    }

    /// Individuals by fitness, best first. Ties keep storage order.
    pub fn ranked(&self) -> Vec<&Individual> {
        rank_by_fitness(&self.0)
    }

    /// The first `n` individuals of [`ranked`](Population::ranked).
    pub fn top(&self, n: usize) -> Vec<&Individual> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }

    /// The elites that the next advance would carry forward.
    pub fn elites(&self) -> Vec<&Individual> {
        self.top(ELITE_COUNT)
    }

    /// Highest-fitness individual; the earliest one on ties.
    pub fn best(&self) -> Option<&Individual> {
        self.0.iter().min_by_key(|ind| Reverse(ind.fitness()))
    }

    /// Highest fitness, or 0 for an empty population.
    pub fn best_fitness(&self) -> usize {
        self.best().map_or(0, Individual::fitness)
    }

    /// Lowest fitness, or 0 for an empty population.
    pub fn worst_fitness(&self) -> usize {
        self.0.iter().map(Individual::fitness).min().unwrap_or(0)
    }

    /// Mean fitness, or 0.0 for an empty population.
    pub fn average_fitness(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        let total: usize = self.0.iter().map(Individual::fitness).sum();
        total as f64 / self.0.len() as f64
    }

    /// True when any individual has every sticker in place.
    pub fn is_solved(&self) -> bool {
        self.0.iter().any(Individual::is_solved)
    }
}

impl From<Vec<Individual>> for Population {
    fn from(individuals: Vec<Individual>) -> Self {
        Self(individuals)
    }
}

impl FromIterator<Individual> for Population {
    fn from_iter<T: IntoIterator<Item = Individual>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Population {
    type Item = Individual;
    type IntoIter = std::vec::IntoIter<Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
