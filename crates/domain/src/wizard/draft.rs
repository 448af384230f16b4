//! The in-progress draft and the partial updates each step confirms.

use serde::{Deserialize, Serialize};

use crate::value_objects::{SkillPointMap, StatMap};

/// Accumulated wizard selections. Nothing here is validated; partial and
/// even inconsistent drafts are expected until finalization.
///
/// Serialized with the keys stored in draft records (`class`, `ancestry`,
/// `background`, `stats`, `skills`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterDraft {
    #[serde(rename = "class", skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    #[serde(rename = "ancestry", skip_serializing_if = "Option::is_none")]
    pub ancestry_id: Option<String>,
    #[serde(rename = "background", skip_serializing_if = "Option::is_none")]
    pub background_id: Option<String>,
    pub stats: StatMap,
    #[serde(rename = "skills")]
    pub skill_points: SkillPointMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
}

impl CharacterDraft {
    /// Merge a patch into a copy of this draft. `Some` fields replace the
    /// current value wholesale (a new stat map replaces the old one);
    /// `None` fields leave it alone.
    pub fn merged(&self, patch: DraftPatch) -> Self {
        let mut next = self.clone();
        if let Some(class_id) = patch.class_id {
            next.class_id = Some(class_id);
        }
        if let Some(ancestry_id) = patch.ancestry_id {
            next.ancestry_id = Some(ancestry_id);
        }
        if let Some(background_id) = patch.background_id {
            next.background_id = Some(background_id);
        }
        if let Some(stats) = patch.stats {
            next.stats = stats;
        }
        if let Some(skill_points) = patch.skill_points {
            next.skill_points = skill_points;
        }
        if let Some(name) = patch.name {
            next.name = Some(name);
        }
        if let Some(height) = patch.height {
            next.height = Some(height);
        }
        if let Some(weight) = patch.weight {
            next.weight = Some(weight);
        }
        if let Some(age) = patch.age {
            next.age = Some(age);
        }
        next
    }
}

/// A partial draft update confirmed by one step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftPatch {
    pub class_id: Option<String>,
    pub ancestry_id: Option<String>,
    pub background_id: Option<String>,
    pub stats: Option<StatMap>,
    pub skill_points: Option<SkillPointMap>,
    pub name: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub age: Option<String>,
}

impl DraftPatch {
    pub fn class(id: impl Into<String>) -> Self {
        Self {
            class_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn ancestry(id: impl Into<String>) -> Self {
        Self {
            ancestry_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn background(id: impl Into<String>) -> Self {
        Self {
            background_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn stats(stats: StatMap) -> Self {
        Self {
            stats: Some(stats),
            ..Self::default()
        }
    }

    pub fn skills(skill_points: SkillPointMap) -> Self {
        Self {
            skill_points: Some(skill_points),
            ..Self::default()
        }
    }

    /// Identity fields from the Character Details step.
    pub fn details(
        name: impl Into<String>,
        height: impl Into<String>,
        weight: impl Into<String>,
        age: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            height: Some(height.into()),
            weight: Some(weight.into()),
            age: Some(age.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
