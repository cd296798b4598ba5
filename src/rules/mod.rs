//! Round rules.
//!
//! `RoundEngine` owns the round lifecycle:
//! - Dealing multipliers
//! - Spinning without repeats
//! - Win detection and payout
//!
//! Presentation lives elsewhere; the engine only returns outcome values.

pub mod engine;

pub use engine::{RoundEngine, RoundResult, SpinResult, Win, WinStatus};
