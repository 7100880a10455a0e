//! Generation advance and the evolution session.
//!
//! [`next_generation`] is one evolutionary step:
//! rank → pick four elites → breed two children → inject fresh individuals
//! → rank again → cut to size → relabel.
//!
//! [`EvolutionSession`] layers controller policy on top: a generation
//! counter, best-fitness-all-time, solved detection and an auto-run loop.

use super::config::GaConfig;
use super::operators::{crossover, random_individual};
use super::selection::{sort_by_fitness, Elites, CHILD_COUNT, ELITE_COUNT};
use super::types::{Individual, Population};
use crate::cube::MAX_FITNESS;
use crate::error::{AdvanceError, ConfigError};
use crate::random::{create_rng, entropy_rng};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Builds generation zero: `size` weighted-random individuals with slots
/// `1..=size` in creation order. Not sorted.
pub fn initialize_population<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Population {
    (1..=size).map(|slot| random_individual(slot, rng)).collect()
}

/// Advances one generation with the default sizes (16 kept, 10 fresh).
///
/// `mutation_rate` is accepted for interface compatibility and has no
/// effect.
///
/// # Panics
/// Panics if `population` holds fewer than four individuals.
pub fn next_generation<R: Rng + ?Sized>(
    population: &Population,
    mutation_rate: f64,
    rng: &mut R,
) -> Population {
    let config = GaConfig::default().with_mutation_rate(mutation_rate);
    next_generation_with(population, &config, rng)
}

/// Advances one generation using the sizes in `config`.
///
/// The elites are the top four of `population`. Children are bred from
/// `(P1, P4)` and `(P2, P3)`. The candidate pool (elites, children and
/// `config.fresh_count` fresh individuals) is stably ranked and the first
/// `config.population_size` kept. Slots are renumbered from 1 in rank
/// order, and everything ranked fifth or lower is flagged bred.
///
/// An individual at full fitness gets no special treatment.
///
/// # Panics
/// Panics if `population` holds fewer than four individuals, or if the
/// sizes in `config` are invalid
/// ([`ConfigError::PopulationTooSmall`],
/// [`ConfigError::NotEnoughCandidates`]).
pub fn next_generation_with<R: Rng + ?Sized>(
    population: &Population,
    config: &GaConfig,
    rng: &mut R,
) -> Population {
    config.validate_sizes().expect("invalid GaConfig");
    let elites = Elites::select(population.as_slice())
        .expect("population must hold at least four individuals to advance");

    let mut candidates: Vec<Individual> = Vec::with_capacity(config.candidate_count());
    candidates.extend(elites.members().iter().map(|&ind| ind.clone()));

    for (k, (a, b)) in elites.pairings().into_iter().enumerate() {
        candidates.push(crossover(a, b, ELITE_COUNT + k + 1, rng));
    }

    let first_fresh = ELITE_COUNT + CHILD_COUNT + 1;
    candidates.extend((0..config.fresh_count).map(|i| random_individual(first_fresh + i, rng)));

    sort_by_fitness(&mut candidates);
    candidates.truncate(config.population_size);

    candidates
        .into_iter()
        .enumerate()
        .map(|(rank, ind)| ind.relabeled(rank + 1, rank >= ELITE_COUNT))
        .collect()
}

/// Stagnation reset hook.
///
/// Called when a run starts. No stagnation state exists, so it does
/// nothing.
pub fn reset_stagnation() {}

/// Checks that `population` has enough individuals to pick the elites.
///
/// The advance functions panic on such input; callers holding untrusted
/// populations check here first.
pub fn ensure_advanceable(population: &Population) -> Result<(), AdvanceError> {
    if population.len() < ELITE_COUNT {
        return Err(AdvanceError::TooFewIndividuals {
            found: population.len(),
            minimum: ELITE_COUNT,
        });
    }
    Ok(())
}

/// Summary of the current generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct GenerationStats {
    /// Generation number; 0 before the first start.
    pub generation: usize,
    /// Best fitness in the current population.
    pub best_fitness: usize,
    /// Best fitness seen since the last start.
    pub best_fitness_all_time: usize,
    /// Mean fitness of the current population.
    pub average_fitness: f64,
    /// Lowest fitness in the current population.
    pub worst_fitness: usize,
}

/// What a call to [`EvolutionSession::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No population yet; call [`EvolutionSession::start`] first.
    NotStarted,
    /// A new generation was produced and nothing is solved.
    Advanced,
    /// The population holds a fully solved individual.
    Solved,
}

/// Result of [`EvolutionSession::run`].
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Best individual of the final population.
    pub best: Individual,

    /// Best fitness seen during the run.
    pub best_fitness: usize,

    /// Generation number reached.
    pub generations: usize,

    /// Whether a fully solved individual appeared.
    pub solved: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness of the population at each generation, starting with
    /// generation one.
    pub fitness_history: Vec<usize>,
}

/// Controller state for a run: the population plus the bookkeeping a
/// front end shows next to it.
///
/// ```
/// use cube_evolab::ga::{EvolutionSession, GaConfig, StepOutcome};
///
/// let mut session = EvolutionSession::new(GaConfig::default().with_seed(1)).unwrap();
/// assert_eq!(session.step(), StepOutcome::NotStarted);
///
/// session.start();
/// assert_eq!(session.generation(), 1);
/// assert_eq!(session.population().len(), 16);
///
/// session.step();
/// assert_eq!(session.population().len(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionSession<R = StdRng> {
    config: GaConfig,
    rng: R,
    population: Population,
    generation: usize,
    best_fitness_all_time: usize,
    solved: bool,
    fitness_history: Vec<usize>,
}

impl EvolutionSession<StdRng> {
    /// Creates a session seeded from `config.seed`, or from entropy when
    /// no seed is set.
    pub fn new(config: GaConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => entropy_rng(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> EvolutionSession<R> {
    /// Creates a session drawing from the given generator.
    pub fn with_rng(config: GaConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            population: Population::default(),
            generation: 0,
            best_fitness_all_time: 0,
            solved: false,
            fitness_history: Vec::new(),
        })
    }

    /// Seeds a fresh population and starts counting from generation one.
    pub fn start(&mut self) {
        reset_stagnation();
        self.population = initialize_population(self.config.population_size, &mut self.rng);
        self.generation = 1;
        self.solved = false;
        self.best_fitness_all_time = self.population.best_fitness();
        self.fitness_history.clear();
        self.fitness_history.push(self.best_fitness_all_time);
        debug!(
            "started: population {}, best {}",
            self.population.len(),
            self.best_fitness_all_time
        );
    }

    /// Produces the next generation unless the current one is solved.
    pub fn step(&mut self) -> StepOutcome {
        if self.population.is_empty() {
            return StepOutcome::NotStarted;
        }
        if self.population.best_fitness() == MAX_FITNESS {
            self.solved = true;
            return StepOutcome::Solved;
        }

        self.population = next_generation_with(&self.population, &self.config, &mut self.rng);
        self.generation += 1;

        let best = self.population.best_fitness();
        self.best_fitness_all_time = self.best_fitness_all_time.max(best);
        self.fitness_history.push(best);
        debug!(
            "generation {}: best {}, average {:.1}",
            self.generation,
            best,
            self.population.average_fitness()
        );

        if best == MAX_FITNESS {
            self.solved = true;
            info!("solved in {} generations", self.generation);
            StepOutcome::Solved
        } else {
            StepOutcome::Advanced
        }
    }

    /// Drops the population and clears all counters.
    pub fn reset(&mut self) {
        self.population = Population::default();
        self.generation = 0;
        self.best_fitness_all_time = 0;
        self.solved = false;
        self.fitness_history.clear();
    }

    /// Runs from a fresh start until solved or `max_generations` is
    /// reached.
    pub fn run(&mut self) -> EvolutionResult {
        self.run_with_cancel(None)
    }

    /// Like [`run`](Self::run), but stops early once `cancel` is set.
    ///
    /// The flag is checked before every generation.
    pub fn run_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> EvolutionResult {
        self.start();
        let mut cancelled = false;

        while self.generation < self.config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if self.step() == StepOutcome::Solved {
                break;
            }
        }

        EvolutionResult {
            best: self
                .population
                .best()
                .cloned()
                .expect("started session has a population"),
            best_fitness: self.best_fitness_all_time,
            generations: self.generation,
            solved: self.solved,
            cancelled,
            fitness_history: self.fitness_history.clone(),
        }
    }

    /// Sets the mutation rate handed to every advance, clamped to 0.0–1.0.
    pub fn set_mutation_rate(&mut self, rate: f64) {
        self.config.mutation_rate = rate.clamp(0.0, 1.0);
    }

    pub fn mutation_rate(&self) -> f64 {
        self.config.mutation_rate
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn best_fitness_all_time(&self) -> usize {
        self.best_fitness_all_time
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Whether [`start`](Self::start) has produced a population.
    pub fn is_running(&self) -> bool {
        self.generation > 0
    }

    /// Best fitness of the population at each generation since the last
    /// start.
    pub fn fitness_history(&self) -> &[usize] {
        &self.fitness_history
    }

    /// The `n` best individuals, best first.
    pub fn top(&self, n: usize) -> Vec<&Individual> {
        self.population.top(n)
    }

    pub fn stats(&self) -> GenerationStats {
        GenerationStats {
            generation: self.generation,
            best_fitness: self.population.best_fitness(),
            best_fitness_all_time: self.best_fitness_all_time,
            average_fitness: self.population.average_fitness(),
            worst_fitness: self.population.worst_fitness(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::{compute_fitness, SOLVED};
    use proptest::prelude::*;

    fn slots(pop: &Population) -> Vec<usize> {
        pop.iter().map(Individual::slot).collect()
    }

    // ---- Initialization ----

    #[test]
    fn test_initialize_default_population() {
        let mut rng = create_rng(42);
        let pop = initialize_population(16, &mut rng);

        assert_eq!(pop.len(), 16);
        assert_eq!(slots(&pop), (1..=16).collect::<Vec<_>>());
        for ind in &pop {
            assert!((10..=53).contains(&ind.fitness()));
            assert!(ind.moves().is_empty());
            assert!(!ind.is_bred());
            assert_eq!(ind.fitness(), compute_fitness(ind.facelets()));
        }
    }

    #[test]
    fn test_initialize_zero() {
        let mut rng = create_rng(42);
        assert!(initialize_population(0, &mut rng).is_empty());
    }

    // ---- Generation advance ----

    #[test]
    fn test_next_generation_shape() {
        let mut rng = create_rng(7);
        let pop = initialize_population(16, &mut rng);
        let next = next_generation(&pop, 0.2, &mut rng);

        assert_eq!(next.len(), 16);
        assert_eq!(slots(&next), (1..=16).collect::<Vec<_>>());
        for (rank, ind) in next.iter().enumerate() {
            assert_eq!(ind.is_bred(), rank >= 4, "rank {rank}");
            assert!(ind.moves().is_empty());
        }
        for w in next.as_slice().windows(2) {
            assert!(w[0].fitness() >= w[1].fitness());
        }
    }

    #[test]
    fn test_next_generation_keeps_elites() {
        let mut rng = create_rng(11);
        let pop = initialize_population(16, &mut rng);
        let next = next_generation(&pop, 0.2, &mut rng);

        for elite in pop.elites() {
            assert!(
                next.iter().any(|ind| ind.facelets() == elite.facelets()
                    && ind.fitness() == elite.fitness()),
                "elite {:?} lost",
                elite.facelets()
            );
        }
    }

    #[test]
    fn test_best_never_drops() {
        let mut rng = create_rng(5);
        let mut pop = initialize_population(16, &mut rng);
        for _ in 0..50 {
            let next = next_generation(&pop, 0.2, &mut rng);
            assert!(next.best_fitness() >= pop.best_fitness());
            pop = next;
        }
    }

    #[test]
    fn test_mutation_rate_is_inert() {
        let pop = initialize_population(16, &mut create_rng(1));
        let low = next_generation(&pop, 0.0, &mut create_rng(2));
        let high = next_generation(&pop, 1.0, &mut create_rng(2));
        assert_eq!(low, high);
    }

    #[test]
    fn test_advance_solved_population() {
        let mut rng = create_rng(13);
        let mut individuals = initialize_population(15, &mut rng).into_vec();
        individuals.push(Individual::new(SOLVED, false, 16));
        let pop = Population::new(individuals);

        let next = next_generation(&pop, 0.2, &mut rng);
        assert_eq!(next.len(), 16);
        assert!(next.is_solved());
        let first = next.iter().next().unwrap();
        assert_eq!(first.fitness(), 54);
        assert_eq!(first.slot(), 1);
    }

    #[test]
    fn test_custom_population_size_truncates() {
        let mut rng = create_rng(21);
        let config = GaConfig::default().with_population_size(8);
        let pop = initialize_population(8, &mut rng);
        let next = next_generation_with(&pop, &config, &mut rng);

        assert_eq!(next.len(), 8);
        assert_eq!(slots(&next), (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_larger_pool_fills_population() {
        let mut rng = create_rng(22);
        let config = GaConfig::default()
            .with_population_size(24)
            .with_fresh_count(18);
        let pop = initialize_population(24, &mut rng);
        let next = next_generation_with(&pop, &config, &mut rng);
        assert_eq!(next.len(), 24);
    }

    #[test]
    fn test_advance_from_exactly_four() {
        let mut rng = create_rng(23);
        let pop = initialize_population(4, &mut rng);
        let next = next_generation(&pop, 0.2, &mut rng);
        assert_eq!(next.len(), 16);
    }

    #[test]
    #[should_panic(expected = "at least four")]
    fn test_advance_too_small_panics() {
        let mut rng = create_rng(24);
        let pop = initialize_population(3, &mut rng);
        let _ = next_generation(&pop, 0.2, &mut rng);
    }

    #[test]
    #[should_panic(expected = "invalid GaConfig")]
    fn test_advance_rejects_unfillable_population_size() {
        // 4 elites + 2 children + 10 fresh cannot fill 20 slots.
        let mut rng = create_rng(25);
        let pop = initialize_population(20, &mut rng);
        let config = GaConfig::default().with_population_size(20);
        let _ = next_generation_with(&pop, &config, &mut rng);
    }

    #[test]
    #[should_panic(expected = "invalid GaConfig")]
    fn test_advance_rejects_population_size_below_elites() {
        let mut rng = create_rng(26);
        let pop = initialize_population(16, &mut rng);
        let config = GaConfig::default().with_population_size(3);
        let _ = next_generation_with(&pop, &config, &mut rng);
    }

    #[test]
    fn test_advance_ignores_max_generations() {
        let mut rng = create_rng(27);
        let pop = initialize_population(16, &mut rng);
        let config = GaConfig::default().with_max_generations(0);
        assert_eq!(next_generation_with(&pop, &config, &mut rng).len(), 16);
    }

    #[test]
    fn test_ensure_advanceable() {
        let mut rng = create_rng(28);
        for size in 0..4 {
            let pop = initialize_population(size, &mut rng);
            assert_eq!(
                ensure_advanceable(&pop),
                Err(AdvanceError::TooFewIndividuals {
                    found: size,
                    minimum: 4
                })
            );
        }
        assert!(ensure_advanceable(&initialize_population(4, &mut rng)).is_ok());
        assert!(ensure_advanceable(&initialize_population(16, &mut rng)).is_ok());
    }

    #[test]
    fn test_reset_stagnation_is_callable() {
        reset_stagnation();
        reset_stagnation();
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_population_invariants(seed in any::<u64>(), steps in 1usize..8) {
            let mut rng = create_rng(seed);
            let mut pop = initialize_population(16, &mut rng);
            for _ in 0..steps {
                let next = next_generation(&pop, 0.5, &mut rng);
                prop_assert_eq!(next.len(), 16);
                prop_assert_eq!(slots(&next), (1..=16).collect::<Vec<_>>());
                for elite in pop.elites() {
                    prop_assert!(next.iter().any(|ind| ind.facelets() == elite.facelets()));
                }
                for ind in &next {
                    prop_assert_eq!(ind.fitness(), compute_fitness(ind.facelets()));
                }
                pop = next;
            }
        }
    }

    // ---- Session ----

    fn seeded(seed: u64) -> EvolutionSession {
        EvolutionSession::new(GaConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn test_session_rejects_bad_config() {
        let config = GaConfig::default().with_population_size(2);
        assert!(EvolutionSession::new(config).is_err());
    }

    #[test]
    fn test_session_start() {
        let mut session = seeded(1);
        assert!(!session.is_running());
        assert_eq!(session.step(), StepOutcome::NotStarted);

        session.start();
        assert!(session.is_running());
        assert_eq!(session.generation(), 1);
        assert_eq!(session.population().len(), 16);
        assert_eq!(
            session.best_fitness_all_time(),
            session.population().best_fitness()
        );
        assert!(!session.is_solved());
        assert_eq!(session.fitness_history().len(), 1);
    }

    #[test]
    fn test_session_step_counts_generations() {
        let mut session = seeded(2);
        session.start();
        for expected in 2..=6 {
            let outcome = session.step();
            if outcome == StepOutcome::Solved {
                break;
            }
            assert_eq!(outcome, StepOutcome::Advanced);
            assert_eq!(session.generation(), expected);
            assert_eq!(session.population().len(), 16);
        }
    }

    #[test]
    fn test_session_best_all_time_monotonic() {
        let mut session = seeded(3);
        session.start();
        let mut last = session.best_fitness_all_time();
        for _ in 0..40 {
            session.step();
            assert!(session.best_fitness_all_time() >= last);
            assert!(session.best_fitness_all_time() >= session.population().best_fitness());
            last = session.best_fitness_all_time();
        }
    }

    #[test]
    fn test_session_solved_does_not_advance() {
        let mut session = seeded(4);
        session.start();
        let mut individuals = session.population.clone().into_vec();
        individuals[7] = Individual::new(SOLVED, false, 8);
        session.population = Population::new(individuals);
        let before = session.population().clone();

        assert_eq!(session.step(), StepOutcome::Solved);
        assert!(session.is_solved());
        assert_eq!(session.generation(), 1);
        assert_eq!(session.population(), &before);
    }

    #[test]
    fn test_session_reset() {
        let mut session = seeded(5);
        session.start();
        session.step();
        session.reset();

        assert!(session.population().is_empty());
        assert_eq!(session.generation(), 0);
        assert_eq!(session.best_fitness_all_time(), 0);
        assert!(!session.is_solved());
        assert!(session.fitness_history().is_empty());
        assert_eq!(session.step(), StepOutcome::NotStarted);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_stats_serialize_camel_case() {
        let mut session = seeded(29);
        session.start();
        let json = serde_json::to_value(session.stats()).unwrap();
        assert_eq!(json["generation"], 1);
        assert_eq!(json["bestFitnessAllTime"], session.best_fitness_all_time());
        assert!(json.get("averageFitness").is_some());
        assert!(json.get("worstFitness").is_some());
        assert!(json.get("best_fitness_all_time").is_none());
    }

    #[test]
    fn test_session_stats() {
        let mut session = seeded(6);
        let empty = session.stats();
        assert_eq!(empty.generation, 0);
        assert_eq!(empty.best_fitness, 0);
        assert_eq!(empty.average_fitness, 0.0);

        session.start();
        let stats = session.stats();
        assert_eq!(stats.generation, 1);
        assert_eq!(stats.best_fitness, session.population().best_fitness());
        assert!(stats.worst_fitness <= stats.best_fitness);
        assert!(stats.average_fitness >= stats.worst_fitness as f64);
        assert!(stats.average_fitness <= stats.best_fitness as f64);
    }

    #[test]
    fn test_session_top() {
        let mut session = seeded(7);
        session.start();
        let top = session.top(4);
        assert_eq!(top.len(), 4);
        assert_eq!(top[0].fitness(), session.population().best_fitness());
        assert!(top.windows(2).all(|w| w[0].fitness() >= w[1].fitness()));
    }

    #[test]
    fn test_session_mutation_rate_clamped() {
        let mut session = seeded(8);
        session.set_mutation_rate(3.0);
        assert!((session.mutation_rate() - 1.0).abs() < 1e-10);
        session.set_mutation_rate(-1.0);
        assert!(session.mutation_rate().abs() < 1e-10);
    }

    #[test]
    fn test_session_reproducible() {
        let mut a = seeded(9);
        let mut b = seeded(9);
        a.start();
        b.start();
        for _ in 0..10 {
            a.step();
            b.step();
        }
        assert_eq!(a.population(), b.population());
    }

    #[test]
    fn test_run_respects_limit() {
        let config = GaConfig::default().with_max_generations(30).with_seed(10);
        let mut session = EvolutionSession::new(config).unwrap();
        let result = session.run();

        assert!(result.generations <= 30);
        assert!(result.solved || result.generations == 30);
        assert!(!result.cancelled);
        assert_eq!(result.fitness_history.len(), result.generations);
        assert_eq!(result.best_fitness, *result.fitness_history.iter().max().unwrap());
        for w in result.fitness_history.windows(2) {
            assert!(w[1] >= w[0], "best fitness dropped: {} -> {}", w[0], w[1]);
        }
    }

    #[test]
    fn test_run_cancelled_before_first_step() {
        let config = GaConfig::default().with_max_generations(500).with_seed(11);
        let mut session = EvolutionSession::new(config).unwrap();
        let cancel = Arc::new(AtomicBool::new(true));
        let result = session.run_with_cancel(Some(cancel));

        assert!(result.cancelled);
        assert_eq!(result.generations, 1);
        assert_eq!(result.fitness_history.len(), 1);
    }

    #[test]
    fn test_run_with_custom_rng() {
        let config = GaConfig::default().with_max_generations(5);
        let mut session = EvolutionSession::with_rng(config, create_rng(12)).unwrap();
        let result = session.run();
        assert!(result.generations <= 5);
        assert_eq!(result.best.fitness(), session.population().best_fitness());
    }
}
