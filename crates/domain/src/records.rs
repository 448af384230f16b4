//! Stored shapes: a saved character and the in-progress draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Character;
use crate::ids::CharacterId;
use crate::wizard::{CharacterDraft, WizardStep};

/// A completed character as kept in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub id: CharacterId,
    #[serde(flatten)]
    pub character: Character,
    pub created_at: DateTime<Utc>,
}

impl CharacterRecord {
    pub fn new(id: CharacterId, character: Character, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            character,
            created_at,
        }
    }
}

/// The single in-progress draft and where the user left off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    #[serde(flatten)]
    pub draft: CharacterDraft,
    pub current_step: WizardStep,
    pub last_saved: DateTime<Utc>,
}

impl DraftSnapshot {
    pub fn new(draft: CharacterDraft, current_step: WizardStep, last_saved: DateTime<Utc>) -> Self {
        Self {
            draft,
            current_step,
            last_saved,
        }
    }
}
