//! WebAssembly bindings.
//!
//! Thin wrappers that let a browser front end drive the GA. Populations
//! cross the boundary as plain JS objects
//! (`{ facelets, moves, fitness, bred, slot }`); incoming fitness values
//! are ignored and recomputed.

use crate::cube::{compute_fitness as score, Facelets};
use crate::ga::selection::ELITE_COUNT;
use crate::ga::{self, EvolutionSession, GaConfig, Population, StepOutcome};
use crate::random::entropy_rng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {e}")))
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Creates generation zero. `size` defaults to 16.
#[wasm_bindgen(js_name = initializePopulation)]
pub fn initialize_population(size: Option<usize>) -> Result<JsValue, JsValue> {
    let size = size.unwrap_or(ga::DEFAULT_POPULATION_SIZE);
    let population = ga::initialize_population(size, &mut entropy_rng());
    to_js(&population)
}

/// Advances one generation. `mutationRate` is accepted and ignored.
#[wasm_bindgen(js_name = nextGeneration)]
pub fn next_generation(population: JsValue, mutation_rate: f64) -> Result<JsValue, JsValue> {
    let population: Population = serde_wasm_bindgen::from_value(population)
        .map_err(|e| JsValue::from_str(&format!("Invalid population: {e}")))?;
    ga::ensure_advanceable(&population).map_err(js_error)?;
    let next = ga::next_generation(&population, mutation_rate, &mut entropy_rng());
    to_js(&next)
}

/// Scores a 54-character sticker string.
#[wasm_bindgen(js_name = computeFitness)]
pub fn compute_fitness(cube: &str) -> Result<usize, JsValue> {
    let facelets: Facelets = cube.parse().map_err(js_error)?;
    Ok(score(&facelets))
}

/// Compatibility no-op.
#[wasm_bindgen(js_name = resetStagnation)]
pub fn reset_stagnation() {
    ga::reset_stagnation();
}

/// A session the page can start, step and reset.
#[wasm_bindgen]
pub struct WasmSession {
    session: EvolutionSession,
}

#[wasm_bindgen]
impl WasmSession {
    /// Creates a session with the default configuration and an optional
    /// seed.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> Result<WasmSession, JsValue> {
        let mut config = GaConfig::default();
        config.seed = seed;
        let session = EvolutionSession::new(config).map_err(js_error)?;
        Ok(WasmSession { session })
    }

    #[wasm_bindgen]
    pub fn start(&mut self) {
        self.session.start();
    }

    /// Returns `"notStarted"`, `"advanced"` or `"solved"`.
    #[wasm_bindgen]
    pub fn step(&mut self) -> String {
        match self.session.step() {
            StepOutcome::NotStarted => "notStarted",
            StepOutcome::Advanced => "advanced",
            StepOutcome::Solved => "solved",
        }
        .to_string()
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.session.reset();
    }

    #[wasm_bindgen(js_name = setMutationRate)]
    pub fn set_mutation_rate(&mut self, rate: f64) {
        self.session.set_mutation_rate(rate);
    }

    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> usize {
        self.session.generation()
    }

    #[wasm_bindgen(getter, js_name = isSolved)]
    pub fn is_solved(&self) -> bool {
        self.session.is_solved()
    }

    /// Current population in storage order.
    #[wasm_bindgen(js_name = getPopulation)]
    pub fn get_population(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.population())
    }

    /// The four elites, best first.
    #[wasm_bindgen(js_name = getTopFour)]
    pub fn get_top_four(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.top(ELITE_COUNT))
    }

    #[wasm_bindgen(js_name = getStats)]
    pub fn get_stats(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.stats())
    }
}
