//! Safes, their positions, and the multiplier catalog.
//!
//! ## Positions
//!
//! `SafeIndex` is 0-based internally. Players see the 1-based label:
//!
//! ```
//! use safe_cracker::core::SafeIndex;
//!
//! let safe = SafeIndex::new(5);
//! assert_eq!(safe.label(), 6);
//! assert_eq!(format!("{}", safe), "6");
//! assert_eq!(SafeIndex::from_label(6), Some(safe));
//! ```

use serde::{Deserialize, Serialize};

use super::config::SAFE_COUNT;

/// Number of multipliers in the catalog.
pub const CATALOG_SIZE: usize = 6;

/// Position of a safe on the board. Always in `0..SAFE_COUNT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct SafeIndex(u8);

impl SafeIndex {
    /// Create a safe index from a 0-based position.
    ///
    /// Panics if the position is off the board.
    #[must_use]
    pub fn new(index: u8) -> Self {
        assert!((index as usize) < SAFE_COUNT, "Safe index out of range");
        Self(index)
    }

    /// Parse a 1-based label as shown on the grid.
    #[must_use]
    pub fn from_label(label: u8) -> Option<Self> {
        (1..=SAFE_COUNT as u8)
            .contains(&label)
            .then(|| Self(label - 1))
    }

    /// 0-based position, usable as an array index.
    #[must_use]
    pub const fn raw(self) -> usize {
        self.0 as usize
    }

    /// 1-based label shown to the player.
    #[must_use]
    pub const fn label(self) -> u8 {
        self.0 + 1
    }

    /// Iterate over every position on the board.
    pub fn all() -> impl Iterator<Item = SafeIndex> {
        (0..SAFE_COUNT as u8).map(SafeIndex)
    }
}

impl TryFrom<u8> for SafeIndex {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if (index as usize) < SAFE_COUNT {
            Ok(Self(index))
        } else {
            Err(format!("safe index {} is off the board", index))
        }
    }
}

impl std::fmt::Display for SafeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A payout factor hidden in a safe.
///
/// Serializes as its display name, e.g. `"x18"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Multiplier {
    X15,
    X16,
    X17,
    X18,
    X19,
    X20,
}

impl Multiplier {
    /// The full catalog in ascending order.
    pub const ALL: [Multiplier; CATALOG_SIZE] = [
        Multiplier::X15,
        Multiplier::X16,
        Multiplier::X17,
        Multiplier::X18,
        Multiplier::X19,
        Multiplier::X20,
    ];

    /// Numeric factor applied to the bet.
    #[must_use]
    pub const fn value(self) -> i64 {
        match self {
            Multiplier::X15 => 15,
            Multiplier::X16 => 16,
            Multiplier::X17 => 17,
            Multiplier::X18 => 18,
            Multiplier::X19 => 19,
            Multiplier::X20 => 20,
        }
    }

    /// Position in `Multiplier::ALL`.
    #[must_use]
    pub const fn catalog_index(self) -> usize {
        self as usize
    }

    /// Look a multiplier up by its numeric factor.
    #[must_use]
    pub fn from_value(value: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.value() == value)
    }
}

impl std::fmt::Display for Multiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.value())
    }
}

/// One safe on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Safe {
    pub index: SafeIndex,
    pub multiplier: Multiplier,
    pub revealed: bool,
}

impl Safe {
    /// A closed safe.
    #[must_use]
    pub const fn new(index: SafeIndex, multiplier: Multiplier) -> Self {
        Self {
            index,
            multiplier,
            revealed: false,
        }
    }

    /// What the player sees for this safe.
    #[must_use]
    pub const fn cell(&self) -> Cell {
        if self.revealed {
            Cell::Revealed(self.multiplier)
        } else {
            Cell::Hidden(self.index)
        }
    }
}

/// Player-visible view of one grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Unopened; shows the position label.
    Hidden(SafeIndex),
    /// Opened; shows the multiplier.
    Revealed(Multiplier),
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Hidden(index) => write!(f, "{}", index),
            Cell::Revealed(multiplier) => write!(f, "{}", multiplier),
        }
    }
}

/// The whole board as the player sees it, in position order.
pub type Grid = [Cell; SAFE_COUNT];
