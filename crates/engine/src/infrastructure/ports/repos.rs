//! Storage port traits.

use std::collections::BTreeMap;

use nimbleforge_domain::{
    Character, CharacterDraft, CharacterId, CharacterRecord, DraftSnapshot, WizardStep,
};

use super::error::StorageError;

// =============================================================================
// Raw Storage
// =============================================================================

/// String key-value storage, the lowest layer under character persistence.
///
/// Every call is fallible; adapters must report a rejected write instead of
/// logging and carrying on.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// Character Persistence Gateway
// =============================================================================

/// Completed characters plus the single in-progress draft slot.
#[cfg_attr(test, mockall::automock)]
pub trait CharacterStore: Send + Sync {
    // Completed characters (append or delete, never overwritten)
    fn save_character(&self, character: &Character) -> Result<CharacterId, StorageError>;
    fn list_characters(&self) -> Result<BTreeMap<CharacterId, CharacterRecord>, StorageError>;
    fn get_character(&self, id: CharacterId) -> Result<Option<CharacterRecord>, StorageError>;
    fn delete_character(&self, id: CharacterId) -> Result<(), StorageError>;

    // In-progress draft (one slot, always overwritten)
    fn save_draft(&self, draft: &CharacterDraft, step: WizardStep) -> Result<(), StorageError>;
    fn load_draft(&self) -> Result<Option<DraftSnapshot>, StorageError>;
    fn clear_draft(&self) -> Result<(), StorageError>;
    fn has_draft(&self) -> Result<bool, StorageError>;
}
