//! Catalog data sources: the built-in rules or a JSON document on disk.

use std::fs;
use std::path::Path;

use nimbleforge_domain::{CatalogData, CatalogError, CatalogRegistry};

/// The rules shipped with the engine.
pub const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("Could not read catalog file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub fn builtin_catalog() -> Result<CatalogData, CatalogError> {
    CatalogData::from_json(BUILTIN_CATALOG)
}

pub fn read_catalog_file(path: &Path) -> Result<CatalogData, CatalogLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogLoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(CatalogData::from_json(&raw)?)
}

/// Build the registry from `path`, or from the built-in data when no path is given.
///
/// Any invalid record aborts the whole load.
pub fn load_registry(path: Option<&Path>) -> Result<CatalogRegistry, CatalogLoadError> {
    let data = match path {
        Some(path) => read_catalog_file(path)?,
        None => builtin_catalog()?,
    };
    let registry = CatalogRegistry::from_data(data)?;

    tracing::info!(
        source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "built-in".into()),
        classes = registry.classes().len(),
        ancestries = registry.ancestries().len(),
        backgrounds = registry.backgrounds().len(),
        "Catalogs loaded"
    );
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbleforge_domain::{HitDie, SaveTier, Size, StatAxis};
    use tempfile::TempDir;

    #[test]
    fn builtin_catalog_loads() {
        let registry = load_registry(None).unwrap();
        assert_eq!(registry.classes().len(), 4);
        assert_eq!(registry.ancestries().len(), 2);
        assert_eq!(registry.backgrounds().len(), 9);

        let berserker = registry.classes().get("The Berserker").unwrap();
        assert_eq!(berserker.hit_points(), 20);
        assert_eq!(berserker.hit_dice().dice(), HitDie::D12);
        assert_eq!(berserker.saves().tier(StatAxis::Strength), SaveTier::Advantaged);

        let elf = registry.ancestries().get_by_id("elf").unwrap();
        assert_eq!(elf.size(), Size::Medium);

        assert!(registry.backgrounds().get("Folk Hero").is_some());
        assert!(registry.backgrounds().get("folk-hero").is_none());
    }

    #[test]
    fn file_catalog_replaces_builtin() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(&path, crate::test_fixtures::FIXTURE_CATALOG).unwrap();

        let registry = load_registry(Some(&path)).unwrap();
        assert!(registry.classes().get("Fighter").is_some());
        assert!(registry.classes().get("The Berserker").is_none());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = load_registry(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Read { .. }));
    }

    #[test]
    fn invalid_record_aborts_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(
            &path,
            r#"{ "classes": [], "ancestries": [{ "id": "orc", "name": "Orc", "size": "Large" }] }"#,
        )
        .unwrap();

        let err = load_registry(Some(&path)).unwrap_err();
        assert!(matches!(
            err,
            CatalogLoadError::Catalog(CatalogError::InvalidRecord { kind: "Ancestry", .. })
        ));
    }
}
