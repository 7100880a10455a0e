//! Cube sticker model.
//!
//! A configuration is a flat sequence of 54 face labels, nine per face in
//! the order `U R F D L B`. Nothing here models face turns or adjacency:
//! the only operation that matters to the search is positional comparison
//! against [`SOLVED`].

mod facelets;
mod sticker;

pub use facelets::{compute_fitness, Facelets, FACE_SIZE, MAX_FITNESS, SOLVED, STICKER_COUNT};
pub use sticker::Sticker;
