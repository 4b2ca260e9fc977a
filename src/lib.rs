//! Terminal Flappy Bird: a fixed-tick simulation drawn as colored glyphs.
//!
//! The crate splits into a pure simulation ([`game`]) and a glyph cell
//! buffer with a change-tracking terminal flush ([`screen`]). The binary
//! drives both from a ~10 ms host loop; tests drive the simulation
//! headlessly with a seeded RNG.

pub mod game;
pub mod screen;

pub use game::{Game, Obstacle, Tuning};
pub use screen::ScreenBuf;
