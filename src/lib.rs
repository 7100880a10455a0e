//! Evolution lab for cube sticker strings.
//!
//! A toy genetic search over 54-sticker configurations of a 3x3x3 cube,
//! built to drive an interactive visualization rather than to solve
//! anything:
//!
//! - **Cube model** ([`cube`]): stickers, fixed-length configurations, the
//!   solved target and the positional fitness scorer.
//! - **Genetic Algorithm** ([`ga`]): tier-weighted random generation,
//!   elitist single-point crossover, the generation advance and a session
//!   controller with solved detection.
//! - **WebAssembly bindings** (`wasm` feature): the same operations exposed
//!   to a browser front end.
//!
//! ```
//! use cube_evolab::cube::{compute_fitness, SOLVED};
//! use cube_evolab::ga::{initialize_population, next_generation};
//! use cube_evolab::random::create_rng;
//!
//! assert_eq!(compute_fitness(&SOLVED), 54);
//!
//! let mut rng = create_rng(42);
//! let population = initialize_population(16, &mut rng);
//! let next = next_generation(&population, 0.2, &mut rng);
//! assert_eq!(next.len(), 16);
//! ```

pub mod cube;
pub mod error;
pub mod ga;
pub mod random;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use cube::compute_fitness;
pub use error::{AdvanceError, ConfigError, ParseFaceletsError};
