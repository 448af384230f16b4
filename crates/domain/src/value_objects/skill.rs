//! Skills and the fixed skill-to-axis table.
//!
//! The table is rules configuration: every skill is bound to exactly one stat
//! axis and a finalized character carries a total for all ten.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::StatAxis;

/// Highest skill total (stat + allocated points) allowed at creation.
pub const SKILL_TOTAL_MAX: i32 = 12;

/// Skill points allocated during the wizard (skill -> points).
pub type SkillPointMap = BTreeMap<Skill, u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Arcana,
    Examination,
    Finesse,
    Influence,
    Insight,
    Lore,
    Might,
    Naturecraft,
    Perception,
    Stealth,
}

impl Skill {
    pub const ALL: [Skill; 10] = [
        Self::Arcana,
        Self::Examination,
        Self::Finesse,
        Self::Influence,
        Self::Insight,
        Self::Lore,
        Self::Might,
        Self::Naturecraft,
        Self::Perception,
        Self::Stealth,
    ];

    /// The stat axis this skill adds to its allocated points.
    pub fn axis(&self) -> StatAxis {
        match self {
            Self::Arcana
            | Self::Examination
            | Self::Insight
            | Self::Lore
            | Self::Naturecraft => StatAxis::Intelligence,
            Self::Finesse | Self::Perception | Self::Stealth => StatAxis::Dexterity,
            Self::Influence => StatAxis::Will,
            Self::Might => StatAxis::Strength,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arcana => "arcana",
            Self::Examination => "examination",
            Self::Finesse => "finesse",
            Self::Influence => "influence",
            Self::Insight => "insight",
            Self::Lore => "lore",
            Self::Might => "might",
            Self::Naturecraft => "naturecraft",
            Self::Perception => "perception",
            Self::Stealth => "stealth",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Skill {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|skill| skill.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::parse(format!("Unknown skill: {}", s)))
    }
}
