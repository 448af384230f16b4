//! Stat value objects - the four ability axes and the validated score on each.
//!
//! Provides type safety for stat references instead of using magic strings
//! like "strength" or "will" throughout the wizard.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lowest stat a character may start with.
pub const STAT_MIN: i32 = -1;
/// Highest stat a character may start with.
pub const STAT_MAX: i32 = 5;

/// Raw stat selections as entered during the wizard (axis -> score).
///
/// Unvalidated on purpose: the draft may hold anything until finalization.
pub type StatMap = BTreeMap<StatAxis, i32>;

/// The four ability axes every character has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatAxis {
    /// Strength - physical power
    Strength,
    /// Dexterity - agility and reflexes
    Dexterity,
    /// Intelligence - reasoning and memory
    Intelligence,
    /// Will - force of personality and resolve
    Will,
}

impl StatAxis {
    /// All axes in sheet order.
    pub const ALL: [StatAxis; 4] = [
        Self::Strength,
        Self::Dexterity,
        Self::Intelligence,
        Self::Will,
    ];

    /// Returns the lowercase key used in catalog data and stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Intelligence => "intelligence",
            Self::Will => "will",
        }
    }

    /// Returns the full display name (e.g., "Strength").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Intelligence => "Intelligence",
            Self::Will => "Will",
        }
    }
}

impl fmt::Display for StatAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatAxis {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strength" | "str" => Ok(Self::Strength),
            "dexterity" | "dex" => Ok(Self::Dexterity),
            "intelligence" | "int" => Ok(Self::Intelligence),
            "will" | "wil" => Ok(Self::Will),
            _ => Err(DomainError::parse(format!("Unknown stat axis: {}", s))),
        }
    }
}

/// A validated stat score in the closed range [-1, 5].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Stat(i32);

impl Stat {
    /// Create a stat, rejecting values outside [-1, 5].
    pub fn new(value: i32) -> Result<Self, DomainError> {
        if !(STAT_MIN..=STAT_MAX).contains(&value) {
            return Err(DomainError::validation(format!(
                "Stat value must be between {} and {}, got {}",
                STAT_MIN, STAT_MAX, value
            )));
        }
        Ok(Self(value))
    }

    /// Create the stat for a specific axis, reporting the axis on failure.
    pub fn for_axis(axis: StatAxis, value: i32) -> Result<Self, DomainError> {
        Self::new(value).map_err(|_| DomainError::StatOutOfRange {
            axis,
            value,
            min: STAT_MIN,
            max: STAT_MAX,
        })
    }

    #[inline]
    pub fn value(self) -> i32 {
        self.0
    }
}

impl Default for Stat {
    fn default() -> Self {
        Self(0)
    }
}

impl TryFrom<i32> for Stat {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Stat> for i32 {
    fn from(stat: Stat) -> i32 {
        stat.0
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}
