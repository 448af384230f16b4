//! Hit dice - the die size and count a class rolls for hit points.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Die sizes a class may use as its hit die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitDie {
    D6,
    D8,
    D10,
    D12,
}

impl HitDie {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::D6 => "d6",
            Self::D8 => "d8",
            Self::D10 => "d10",
            Self::D12 => "d12",
        }
    }

    /// Number of faces on the die.
    pub fn sides(&self) -> u8 {
        match self {
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
        }
    }
}

impl fmt::Display for HitDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HitDie {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "d6" => Ok(Self::D6),
            "d8" => Ok(Self::D8),
            "d10" => Ok(Self::D10),
            "d12" => Ok(Self::D12),
            _ => Err(DomainError::parse(format!("Unknown hit die: {}", s))),
        }
    }
}

/// A hit-dice spec such as `1d10`. Quantity is always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HitDiceRepr", into = "HitDiceRepr")]
pub struct HitDice {
    dice: HitDie,
    quantity: u8,
}

impl HitDice {
    pub fn new(dice: HitDie, quantity: u8) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::validation(
                "Hit dice quantity must be at least 1",
            ));
        }
        Ok(Self { dice, quantity })
    }

    #[inline]
    pub fn dice(&self) -> HitDie {
        self.dice
    }

    #[inline]
    pub fn quantity(&self) -> u8 {
        self.quantity
    }
}

impl fmt::Display for HitDice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.quantity, self.dice)
    }
}

#[derive(Serialize, Deserialize)]
struct HitDiceRepr {
    dice: HitDie,
    quantity: u8,
}

impl TryFrom<HitDiceRepr> for HitDice {
    type Error = DomainError;

    fn try_from(repr: HitDiceRepr) -> Result<Self, Self::Error> {
        Self::new(repr.dice, repr.quantity)
    }
}

impl From<HitDice> for HitDiceRepr {
    fn from(hit_dice: HitDice) -> Self {
        Self {
            dice: hit_dice.dice,
            quantity: hit_dice.quantity,
        }
    }
}
