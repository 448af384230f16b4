//! Character persistence on top of a raw key-value store.
//!
//! Two record spaces share the store:
//! - `nimble-characters`: a JSON object of completed characters keyed by id
//! - `nimble-character-in-progress`: the single draft snapshot

use std::collections::BTreeMap;
use std::sync::Arc;

use nimbleforge_domain::{
    Character, CharacterDraft, CharacterId, CharacterRecord, DraftSnapshot, WizardStep,
};

use crate::infrastructure::ports::{
    CharacterStore, ClockPort, IdGenerator, KeyValueStore, StorageError,
};

pub const CHARACTERS_KEY: &str = "nimble-characters";
pub const DRAFT_KEY: &str = "nimble-character-in-progress";

type Roster = BTreeMap<CharacterId, CharacterRecord>;

/// The persistence gateway used by the wizard and the roster.
pub struct CharacterStorage {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn ClockPort>,
    ids: Arc<dyn IdGenerator>,
}

impl CharacterStorage {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn ClockPort>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self { store, clock, ids }
    }

    fn read_roster(&self) -> Result<Roster, StorageError> {
        match self.store.get(CHARACTERS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                StorageError::serialization(format!("stored characters are unreadable: {}", e))
            }),
            None => Ok(Roster::new()),
        }
    }

    fn write_roster(&self, roster: &Roster) -> Result<(), StorageError> {
        let raw = serde_json::to_string(roster).map_err(StorageError::serialization)?;
        self.store.set(CHARACTERS_KEY, &raw)
    }
}

impl CharacterStore for CharacterStorage {
    fn save_character(&self, character: &Character) -> Result<CharacterId, StorageError> {
        let mut roster = self.read_roster()?;
        let id = CharacterId::from_uuid(self.ids.gen_uuid());
        if roster.contains_key(&id) {
            return Err(StorageError::backend(
                "save_character",
                format!("generated id {} is already taken", id),
            ));
        }

        let record = CharacterRecord::new(id, character.clone(), self.clock.now());
        roster.insert(id, record);
        self.write_roster(&roster)?;

        tracing::info!(
            character_id = %id,
            name = %character.name(),
            total = roster.len(),
            "Character saved"
        );
        Ok(id)
    }

    fn list_characters(&self) -> Result<Roster, StorageError> {
        self.read_roster()
    }

    fn get_character(&self, id: CharacterId) -> Result<Option<CharacterRecord>, StorageError> {
        Ok(self.read_roster()?.remove(&id))
    }

    fn delete_character(&self, id: CharacterId) -> Result<(), StorageError> {
        let mut roster = self.read_roster()?;
        if roster.remove(&id).is_none() {
            return Err(StorageError::not_found("Character", id));
        }
        self.write_roster(&roster)?;
        tracing::info!(character_id = %id, "Character deleted");
        Ok(())
    }

    fn save_draft(&self, draft: &CharacterDraft, step: WizardStep) -> Result<(), StorageError> {
        let snapshot = DraftSnapshot::new(draft.clone(), step, self.clock.now());
        let raw = serde_json::to_string(&snapshot).map_err(StorageError::serialization)?;
        self.store.set(DRAFT_KEY, &raw)?;
        tracing::debug!(step = step.number(), "Draft saved");
        Ok(())
    }

    fn load_draft(&self) -> Result<Option<DraftSnapshot>, StorageError> {
        self.store
            .get(DRAFT_KEY)?
            .map(|raw| {
                serde_json::from_str(&raw).map_err(|e| {
                    StorageError::serialization(format!("stored draft is unreadable: {}", e))
                })
            })
            .transpose()
    }

    fn clear_draft(&self) -> Result<(), StorageError> {
        self.store.remove(DRAFT_KEY)
    }

    fn has_draft(&self) -> Result<bool, StorageError> {
        Ok(self.store.get(DRAFT_KEY)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, SequentialIds};
    use crate::infrastructure::persistence::InMemoryKeyValueStore;
    use crate::infrastructure::ports::MockKeyValueStore;
    use crate::test_fixtures::sample_character;
    use chrono::{TimeZone, Utc};
    use nimbleforge_domain::DraftPatch;

    fn storage_over(store: Arc<dyn KeyValueStore>) -> CharacterStorage {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 4, 10, 30, 0).unwrap());
        CharacterStorage::new(store, Arc::new(clock), Arc::new(SequentialIds::new()))
    }

    fn storage() -> (CharacterStorage, Arc<InMemoryKeyValueStore>) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        (storage_over(store.clone()), store)
    }

    #[test]
    fn saved_characters_are_listed_by_id() {
        let (storage, _) = storage();
        let first = storage.save_character(&sample_character("Ada")).unwrap();
        let second = storage.save_character(&sample_character("Brom")).unwrap();
        assert_ne!(first, second);

        let roster = storage.list_characters().unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[&first].character.name().as_str(), "Ada");
        assert_eq!(roster[&second].id, second);
        assert_eq!(
            roster[&first].created_at,
            Utc.with_ymd_and_hms(2024, 5, 4, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn records_are_stored_with_created_at() {
        let (storage, store) = storage();
        let id = storage.save_character(&sample_character("Ada")).unwrap();

        let raw = store.get(CHARACTERS_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let record = &json[id.to_string()];
        assert_eq!(record["name"], "Ada");
        assert!(record["createdAt"]
            .as_str()
            .unwrap()
            .starts_with("2024-05-04T10:30:00"));
    }

    #[test]
    fn delete_removes_only_that_character() {
        let (storage, _) = storage();
        let keep = storage.save_character(&sample_character("Ada")).unwrap();
        let drop = storage.save_character(&sample_character("Brom")).unwrap();

        storage.delete_character(drop).unwrap();

        let roster = storage.list_characters().unwrap();
        assert!(roster.contains_key(&keep));
        assert!(!roster.contains_key(&drop));
        assert!(storage.get_character(drop).unwrap().is_none());
    }

    #[test]
    fn deleting_unknown_id_is_not_found() {
        let (storage, _) = storage();
        let err = storage.delete_character(CharacterId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn draft_slot_round_trip_and_clear() {
        let (storage, _) = storage();
        assert!(!storage.has_draft().unwrap());
        assert!(storage.load_draft().unwrap().is_none());

        let draft = CharacterDraft::default().merged(DraftPatch::class("fighter"));
        storage.save_draft(&draft, WizardStep::ChooseAncestry).unwrap();
        let newer = draft.merged(DraftPatch::ancestry("human"));
        storage.save_draft(&newer, WizardStep::ChooseBackground).unwrap();

        let snapshot = storage.load_draft().unwrap().unwrap();
        assert_eq!(snapshot.draft, newer);
        assert_eq!(snapshot.current_step, WizardStep::ChooseBackground);
        assert!(storage.has_draft().unwrap());

        storage.clear_draft().unwrap();
        assert!(!storage.has_draft().unwrap());
    }

    #[test]
    fn corrupt_roster_is_a_serialization_error() {
        let (storage, store) = storage();
        store.set(CHARACTERS_KEY, "[1, 2, 3]").unwrap();

        assert!(matches!(
            storage.list_characters(),
            Err(StorageError::Serialization(_))
        ));
        assert!(matches!(
            storage.save_character(&sample_character("Ada")),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn corrupt_draft_is_a_serialization_error() {
        let (storage, store) = storage();
        store.set(DRAFT_KEY, "{\"currentStep\": 99}").unwrap();
        assert!(matches!(
            storage.load_draft(),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn write_failure_surfaces() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set()
            .returning(|_, _| Err(StorageError::backend("set", "disk full")));

        let storage = storage_over(Arc::new(store));
        assert!(matches!(
            storage.save_character(&sample_character("Ada")),
            Err(StorageError::Backend { .. })
        ));
        assert!(storage
            .save_draft(&CharacterDraft::default(), WizardStep::ChooseClass)
            .is_err());
    }
}
