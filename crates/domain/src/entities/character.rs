//! Character - the finalized, immutable result of the creation wizard.
//!
//! # Design
//!
//! - **Private fields**: everything is read through accessors
//! - **Valid by construction**: [`Character::finalize`] is the only way in;
//!   deserialization replays it so stored records obey the same rules
//! - **Atomic**: finalization either returns a whole character or an error

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AncestryDefinition, BackgroundDefinition, ClassDefinition};
use crate::error::DomainError;
use crate::value_objects::{
    CharacterName, HitDice, Save, Size, Skill, SkillPointMap, Stat, StatAxis, StatMap,
    SKILL_TOTAL_MAX,
};

/// Level every character starts at.
pub const CREATION_LEVEL: u8 = 1;

/// Movement speed every character starts with.
pub const STARTING_SPEED: u32 = 6;

/// Free-form identity fields entered on the Character Details step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterIdentity {
    pub name: CharacterName,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub age: String,
}

impl CharacterIdentity {
    pub fn new(name: CharacterName) -> Self {
        Self {
            name,
            height: String::new(),
            weight: String::new(),
            age: String::new(),
        }
    }

    pub fn with_height(mut self, height: impl Into<String>) -> Self {
        self.height = height.into();
        self
    }

    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = weight.into();
        self
    }

    pub fn with_age(mut self, age: impl Into<String>) -> Self {
        self.age = age.into();
        self
    }
}

/// A finalized character.
///
/// # Invariants
///
/// - every stat is in [-1, 5]
/// - every skill total equals `stat[skill.axis()] + allocated points` and is at most 12
/// - saves, hit dice and hit points come from the class; size from the ancestry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CharacterRepr")]
pub struct Character {
    name: CharacterName,
    level: u8,
    class: ClassDefinition,
    ancestry: AncestryDefinition,
    background: BackgroundDefinition,
    size: Size,
    speed: u32,
    height: String,
    weight: String,
    age: String,
    hit_dice: HitDice,
    hit_points: u32,
    temporary_hit_points: u32,
    stats: BTreeMap<StatAxis, Stat>,
    saves: BTreeMap<StatAxis, Save>,
    skills: BTreeMap<Skill, i32>,
}

impl Character {
    /// Combine the wizard's selections into a finalized character.
    ///
    /// Missing stat axes default to 0 and missing skills to 0 points. Fails on
    /// the first out-of-range stat or the first skill whose total exceeds 12,
    /// naming it; nothing is built in that case.
    pub fn finalize(
        identity: CharacterIdentity,
        level: u8,
        class: &ClassDefinition,
        ancestry: &AncestryDefinition,
        background: &BackgroundDefinition,
        stats: &StatMap,
        skill_points: &SkillPointMap,
    ) -> Result<Self, DomainError> {
        if level == 0 {
            return Err(DomainError::validation("Character level must be at least 1"));
        }

        let mut validated_stats = BTreeMap::new();
        for axis in StatAxis::ALL {
            let value = stats.get(&axis).copied().unwrap_or(0);
            validated_stats.insert(axis, Stat::for_axis(axis, value)?);
        }

        let saves = StatAxis::ALL
            .into_iter()
            .map(|axis| (axis, Save::derive(class.saves(), axis)))
            .collect();

        let skills = compute_skill_totals(&validated_stats, skill_points)?;

        Ok(Self {
            name: identity.name,
            level,
            class: class.clone(),
            ancestry: ancestry.clone(),
            background: background.clone(),
            size: ancestry.size(),
            speed: STARTING_SPEED,
            height: identity.height,
            weight: identity.weight,
            age: identity.age,
            hit_dice: class.hit_dice(),
            hit_points: class.hit_points(),
            temporary_hit_points: 0,
            stats: validated_stats,
            saves,
            skills,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn class(&self) -> &ClassDefinition {
        &self.class
    }

    pub fn ancestry(&self) -> &AncestryDefinition {
        &self.ancestry
    }

    pub fn background(&self) -> &BackgroundDefinition {
        &self.background
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn height(&self) -> &str {
        &self.height
    }

    pub fn weight(&self) -> &str {
        &self.weight
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn hit_dice(&self) -> HitDice {
        self.hit_dice
    }

    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    pub fn temporary_hit_points(&self) -> u32 {
        self.temporary_hit_points
    }

    /// The validated stat on `axis`.
    pub fn stat(&self, axis: StatAxis) -> Stat {
        self.stats.get(&axis).copied().unwrap_or_default()
    }

    pub fn stats(&self) -> &BTreeMap<StatAxis, Stat> {
        &self.stats
    }

    pub fn save(&self, axis: StatAxis) -> Save {
        self.saves
            .get(&axis)
            .copied()
            .unwrap_or_else(|| Save::derive(self.class.saves(), axis))
    }

    pub fn saves(&self) -> &BTreeMap<StatAxis, Save> {
        &self.saves
    }

    /// The total for `skill` (stat + allocated points).
    pub fn skill(&self, skill: Skill) -> i32 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }

    pub fn skills(&self) -> &BTreeMap<Skill, i32> {
        &self.skills
    }
}

fn compute_skill_totals(
    stats: &BTreeMap<StatAxis, Stat>,
    skill_points: &SkillPointMap,
) -> Result<BTreeMap<Skill, i32>, DomainError> {
    let mut totals = BTreeMap::new();
    for skill in Skill::ALL {
        let stat = stats.get(&skill.axis()).copied().unwrap_or_default().value();
        let points = skill_points.get(&skill).copied().unwrap_or(0);
        let total = i64::from(stat) + i64::from(points);
        if total > i64::from(SKILL_TOTAL_MAX) {
            return Err(DomainError::SkillTotalExceeded {
                skill,
                total: i32::try_from(total).unwrap_or(i32::MAX),
                max: SKILL_TOTAL_MAX,
            });
        }
        // Bounded by the check above and the stat floor.
        totals.insert(skill, total as i32);
    }
    Ok(totals)
}

/// Stored shape of a character. Converting back replays [`Character::finalize`]
/// and rejects records whose derived fields disagree with the rules.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CharacterRepr {
    name: CharacterName,
    level: u8,
    class: ClassDefinition,
    ancestry: AncestryDefinition,
    background: BackgroundDefinition,
    #[serde(default)]
    height: String,
    #[serde(default)]
    weight: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    temporary_hit_points: u32,
    stats: BTreeMap<StatAxis, i32>,
    skills: BTreeMap<Skill, i32>,
}

impl TryFrom<CharacterRepr> for Character {
    type Error = DomainError;

    fn try_from(repr: CharacterRepr) -> Result<Self, Self::Error> {
        let mut skill_points = SkillPointMap::new();
        for skill in Skill::ALL {
            let total = repr.skills.get(&skill).copied().unwrap_or(0);
            let stat = repr.stats.get(&skill.axis()).copied().unwrap_or(0);
            let points = u32::try_from(i64::from(total) - i64::from(stat)).map_err(|_| {
                DomainError::validation(format!(
                    "Stored skill {} total {} is below its stat {}",
                    skill, total, stat
                ))
            })?;
            skill_points.insert(skill, points);
        }

        let identity = CharacterIdentity {
            name: repr.name,
            height: repr.height,
            weight: repr.weight,
            age: repr.age,
        };
        let mut character = Character::finalize(
            identity,
            repr.level,
            &repr.class,
            &repr.ancestry,
            &repr.background,
            &repr.stats,
            &skill_points,
        )?;
        character.temporary_hit_points = repr.temporary_hit_points;
        Ok(character)
    }
}
