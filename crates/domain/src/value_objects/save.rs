//! Saves - advantage tiers per stat axis, derived from a class's save profile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::StatAxis;

/// How a save on one axis is rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaveTier {
    Advantaged,
    Normal,
    Disadvantaged,
}

impl SaveTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Advantaged => "Advantaged",
            Self::Normal => "Normal",
            Self::Disadvantaged => "Disadvantaged",
        }
    }
}

impl fmt::Display for SaveTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SaveTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "advantaged" => Ok(Self::Advantaged),
            "normal" => Ok(Self::Normal),
            "disadvantaged" => Ok(Self::Disadvantaged),
            _ => Err(DomainError::parse(format!("Unknown save tier: {}", s))),
        }
    }
}

/// A class's save profile: one tier for each of the four axes.
///
/// The struct shape makes a partial profile unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveProfile {
    pub strength: SaveTier,
    pub dexterity: SaveTier,
    pub intelligence: SaveTier,
    pub will: SaveTier,
}

impl SaveProfile {
    pub fn new(
        strength: SaveTier,
        dexterity: SaveTier,
        intelligence: SaveTier,
        will: SaveTier,
    ) -> Self {
        Self {
            strength,
            dexterity,
            intelligence,
            will,
        }
    }

    /// The tier this profile assigns to `axis`.
    pub fn tier(&self, axis: StatAxis) -> SaveTier {
        match axis {
            StatAxis::Strength => self.strength,
            StatAxis::Dexterity => self.dexterity,
            StatAxis::Intelligence => self.intelligence,
            StatAxis::Will => self.will,
        }
    }
}

/// A derived save: the tier paired with the axis it modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Save {
    pub tier: SaveTier,
    pub stat: StatAxis,
}

impl Save {
    /// Derive the save on `axis` from a class profile.
    pub fn derive(profile: &SaveProfile, axis: StatAxis) -> Self {
        Self {
            tier: profile.tier(axis),
            stat: axis,
        }
    }
}
