//! Roster use cases: browse and delete saved characters.

use std::sync::Arc;

use nimbleforge_domain::{CharacterId, CharacterRecord};

use crate::infrastructure::ports::{CharacterStore, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Character not found: {0}")]
    NotFound(CharacterId),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Saved-character operations.
pub struct Roster {
    store: Arc<dyn CharacterStore>,
}

impl Roster {
    pub fn new(store: Arc<dyn CharacterStore>) -> Self {
        Self { store }
    }

    /// Every saved character, oldest first.
    pub fn list(&self) -> Result<Vec<CharacterRecord>, RosterError> {
        let mut records: Vec<CharacterRecord> =
            self.store.list_characters()?.into_values().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(records)
    }

    pub fn get(&self, id: CharacterId) -> Result<CharacterRecord, RosterError> {
        self.store
            .get_character(id)?
            .ok_or(RosterError::NotFound(id))
    }

    pub fn delete(&self, id: CharacterId) -> Result<(), RosterError> {
        self.store.delete_character(id).map_err(|e| match e {
            StorageError::NotFound { .. } => RosterError::NotFound(id),
            other => RosterError::Storage(other),
        })
    }
}
