//! The catalog registry: all three rules catalogs behind one handle.
//!
//! Built once at startup and shared (usually as `Arc<CatalogRegistry>`) with
//! everything that resolves definitions.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Catalog, CatalogEntry, CatalogError, LoadOutcome, RawRecord};
use crate::entities::{
    AncestryDefinition, BackgroundDefinition, ClassDefinition, RawAncestryRecord,
    RawBackgroundRecord, RawClassRecord,
};

/// Raw catalog input: three arrays of untyped records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogData {
    pub classes: Vec<RawClassRecord>,
    pub ancestries: Vec<RawAncestryRecord>,
    pub backgrounds: Vec<RawBackgroundRecord>,
}

impl CatalogData {
    /// Decode a `{ classes, ancestries, backgrounds }` JSON document.
    ///
    /// Records are decoded one at a time, so a wrongly typed field is
    /// reported against the record's display name.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Ok(Self {
            classes: decode_records(document.classes)?,
            ancestries: decode_records(document.ancestries)?,
            backgrounds: decode_records(document.backgrounds)?,
        })
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CatalogDocument {
    classes: Vec<Value>,
    ancestries: Vec<Value>,
    backgrounds: Vec<Value>,
}

fn decode_records<R>(values: Vec<Value>) -> Result<Vec<R>, CatalogError>
where
    R: RawRecord + DeserializeOwned,
{
    values
        .into_iter()
        .map(|value| {
            let name = value
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or("unknown")
                .to_string();
            serde_json::from_value(value).map_err(|e| CatalogError::InvalidRecord {
                kind: <R::Definition as CatalogEntry>::KIND,
                name,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// What a registry load did to each catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryLoadReport {
    pub classes: LoadOutcome,
    pub ancestries: LoadOutcome,
    pub backgrounds: LoadOutcome,
}

/// Holds the class, ancestry and background catalogs.
#[derive(Debug, Clone, Default)]
pub struct CatalogRegistry {
    classes: Catalog<ClassDefinition>,
    ancestries: Catalog<AncestryDefinition>,
    backgrounds: Catalog<BackgroundDefinition>,
}

impl CatalogRegistry {
    /// An empty registry. Prefer [`CatalogRegistry::from_data`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fully loaded registry. Fails if any record in any catalog is invalid.
    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        let mut registry = Self::new();
        registry.load(data)?;
        Ok(registry)
    }

    /// Load every catalog that is still empty.
    ///
    /// All three batches are validated before any of them is committed, so a
    /// bad background leaves freshly parsed classes unindexed too. Catalogs
    /// that already hold entries are left untouched.
    pub fn load(&mut self, data: CatalogData) -> Result<RegistryLoadReport, CatalogError> {
        let mut classes = Catalog::new();
        let mut ancestries = Catalog::new();
        let mut backgrounds = Catalog::new();

        let classes_outcome = if self.classes.is_empty() {
            classes.load(data.classes)?
        } else {
            LoadOutcome::AlreadyLoaded
        };
        let ancestries_outcome = if self.ancestries.is_empty() {
            ancestries.load(data.ancestries)?
        } else {
            LoadOutcome::AlreadyLoaded
        };
        let backgrounds_outcome = if self.backgrounds.is_empty() {
            backgrounds.load(data.backgrounds)?
        } else {
            LoadOutcome::AlreadyLoaded
        };

        if matches!(classes_outcome, LoadOutcome::Loaded(_)) {
            self.classes = classes;
        }
        if matches!(ancestries_outcome, LoadOutcome::Loaded(_)) {
            self.ancestries = ancestries;
        }
        if matches!(backgrounds_outcome, LoadOutcome::Loaded(_)) {
            self.backgrounds = backgrounds;
        }

        Ok(RegistryLoadReport {
            classes: classes_outcome,
            ancestries: ancestries_outcome,
            backgrounds: backgrounds_outcome,
        })
    }

    pub fn classes(&self) -> &Catalog<ClassDefinition> {
        &self.classes
    }

    pub fn ancestries(&self) -> &Catalog<AncestryDefinition> {
        &self.ancestries
    }

    pub fn backgrounds(&self) -> &Catalog<BackgroundDefinition> {
        &self.backgrounds
    }
}
