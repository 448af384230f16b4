//! Application state and composition.

use std::sync::Arc;

use nimbleforge_domain::CatalogRegistry;

use crate::infrastructure::{
    catalog_data::{self, CatalogLoadError},
    clock::{SystemClock, UuidGenerator},
    config::AppConfig,
    persistence::{CharacterStorage, JsonFileKeyValueStore},
    ports::{CharacterStore, ClockPort, IdGenerator, KeyValueStore, StorageError},
};
use crate::use_cases;

/// Startup failures. Both are fatal until the data or the file is fixed.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
    #[error("Could not open character storage: {0}")]
    Storage(#[from] StorageError),
}

/// Main application state.
///
/// Holds the shared catalog registry, the character store and the use cases
/// built on top of them.
pub struct App {
    pub config: AppConfig,
    pub catalogs: Arc<CatalogRegistry>,
    pub store: Arc<dyn CharacterStore>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub creation: use_cases::CharacterCreator,
    pub roster: use_cases::Roster,
}

impl App {
    /// Wire the app from explicit parts.
    pub fn new(
        config: AppConfig,
        catalogs: Arc<CatalogRegistry>,
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn ClockPort>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let store: Arc<dyn CharacterStore> = Arc::new(CharacterStorage::new(storage, clock, ids));

        let use_cases = UseCases {
            creation: use_cases::CharacterCreator::new(
                catalogs.clone(),
                store.clone(),
                config.step_rules(),
            ),
            roster: use_cases::Roster::new(store.clone()),
        };

        Self {
            config,
            catalogs,
            store,
            use_cases,
        }
    }

    /// Load the catalogs and open the JSON storage file named by `config`.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let catalogs = Arc::new(catalog_data::load_registry(config.catalog_path.as_deref())?);
        let storage = Arc::new(JsonFileKeyValueStore::open(&config.storage_path)?);
        tracing::info!(path = %storage.path().display(), "Character storage ready");

        Ok(Self::new(
            config,
            catalogs,
            storage,
            Arc::new(SystemClock::new()),
            Arc::new(UuidGenerator::new()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn from_config_uses_builtin_catalog_and_file_storage() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            storage_path: dir.path().join("storage.json"),
            ..AppConfig::default()
        };

        let app = App::from_config(config).unwrap();
        assert_eq!(app.catalogs.classes().len(), 4);
        assert!(app.use_cases.roster.list().unwrap().is_empty());
        assert!(!app.use_cases.creation.has_draft().unwrap());
    }

    #[test]
    fn unreadable_storage_stops_startup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json at all").unwrap();

        let config = AppConfig {
            storage_path: path,
            ..AppConfig::default()
        };
        assert!(matches!(App::from_config(config), Err(AppError::Storage(_))));
    }
}
