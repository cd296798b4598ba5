//! Core round types: safes, multipliers, state, RNG, configuration, errors.
//!
//! Nothing in here knows about terminals or presentation. The engine in
//! `rules` drives these types; `play` renders them.

pub mod config;
pub mod error;
pub mod rng;
pub mod safe;
pub mod state;

pub use config::RoundConfig;
pub use error::RoundError;
pub use rng::{GameRng, RandomSource, ScriptedRng};
pub use safe::{Cell, Grid, Multiplier, Safe, SafeIndex};
pub use state::{OpenedSafes, RoundState};
