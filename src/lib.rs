//! # safe-cracker
//!
//! A single-player chance game. Nine safes in a 3×3 grid each hide a
//! multiplier; up to four spins open random safes until two multipliers
//! match, and the bet is paid out at the matched multiplier.
//!
//! ## Design Principles
//!
//! 1. **Pure engine**: `RoundEngine` returns outcome values and never
//!    prints. Presentation plugs in through the `Presenter` trait.
//!
//! 2. **Injectable randomness**: every random choice goes through
//!    `RandomSource`. Seeded `GameRng` for play and simulation,
//!    `ScriptedRng` for forcing exact scenarios.
//!
//! 3. **Explicit state**: one `RoundState` value per round, owned by the
//!    engine, mutated only by `spin` and `check_win`.
//!
//! ## Modules
//!
//! - `core`: Safes, multipliers, round state, RNG, constants, errors
//! - `rules`: The round engine
//! - `play`: Round loop, presenter trait, console presenter, grid rendering
//! - `sim`: Headless batch simulation

pub mod core;
pub mod rules;
pub mod play;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    Cell, GameRng, Grid, Multiplier, RandomSource, RoundConfig, RoundError, RoundState, Safe,
    SafeIndex, ScriptedRng,
};

pub use crate::rules::{RoundEngine, RoundResult, SpinResult, Win, WinStatus};

pub use crate::play::{play_round, ConsolePresenter, PlayError, Presenter, Prompt};

pub use crate::sim::{simulate, SimulationReport};
