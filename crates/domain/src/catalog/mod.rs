//! Rules catalogs: validated, indexed definitions loaded from static data.
//!
//! Each raw record is parsed into a [`ParsedRecord`] before anything is
//! indexed, so a batch either loads completely or not at all.

mod registry;

pub use registry::{CatalogData, CatalogRegistry, RegistryLoadReport};

use std::collections::HashMap;

use thiserror::Error;

/// Errors raised while loading catalog data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A record is missing a required field or holds an unknown value.
    #[error("{kind} data is missing required properties for name \"{name}\": {reason}")]
    InvalidRecord {
        kind: &'static str,
        name: String,
        reason: String,
    },

    /// Two records in one batch share an id or a display name.
    #[error("{kind} \"{key}\" appears more than once in catalog data")]
    Duplicate { kind: &'static str, key: String },

    /// The catalog document could not be decoded at all.
    #[error("Catalog data could not be parsed: {0}")]
    Parse(String),
}

/// A definition that can live in a [`Catalog`].
pub trait CatalogEntry {
    /// Human readable kind, used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

/// An untyped catalog record that parses into a definition.
pub trait RawRecord {
    type Definition: CatalogEntry;

    /// The record's display name, if it has a usable one.
    fn display_name(&self) -> Option<&str>;

    fn parse(self) -> ParsedRecord<Self::Definition>;
}

/// Result of parsing one raw record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRecord<D> {
    Valid(D),
    Invalid { name: String, reason: String },
}

impl<D> ParsedRecord<D> {
    /// Wrap a build result, naming the record "unknown" when it has no name.
    pub fn from_result(name: Option<&str>, result: Result<D, String>) -> Self {
        match result {
            Ok(definition) => Self::Valid(definition),
            Err(reason) => Self::Invalid {
                name: name.unwrap_or("unknown").to_string(),
                reason,
            },
        }
    }
}

/// Outcome of [`Catalog::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The batch was validated and indexed; holds the entry count.
    Loaded(usize),
    /// The catalog already held entries; nothing was touched.
    AlreadyLoaded,
}

/// An indexed set of definitions, kept in load order.
///
/// `get` looks entries up by display name. `get_by_id` resolves the stable id
/// stored in drafts.
#[derive(Debug, Clone)]
pub struct Catalog<D> {
    entries: Vec<D>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
}

impl<D> Default for Catalog<D> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
            by_id: HashMap::new(),
        }
    }
}

impl<D: CatalogEntry> Catalog<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a batch of raw records.
    pub fn from_records<R>(records: impl IntoIterator<Item = R>) -> Result<Self, CatalogError>
    where
        R: RawRecord<Definition = D>,
    {
        let mut catalog = Self::new();
        catalog.load(records)?;
        Ok(catalog)
    }

    /// Validate and index a batch of raw records.
    ///
    /// A second call on a non-empty catalog is a no-op: it neither merges nor
    /// validates the new batch. On the first invalid record the whole batch
    /// is rejected and the catalog stays empty.
    pub fn load<R>(&mut self, records: impl IntoIterator<Item = R>) -> Result<LoadOutcome, CatalogError>
    where
        R: RawRecord<Definition = D>,
    {
        if !self.is_empty() {
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        let mut staged: Vec<D> = Vec::new();
        let mut by_name = HashMap::new();
        let mut by_id = HashMap::new();

        for record in records {
            let definition = match record.parse() {
                ParsedRecord::Valid(definition) => definition,
                ParsedRecord::Invalid { name, reason } => {
                    return Err(CatalogError::InvalidRecord {
                        kind: D::KIND,
                        name,
                        reason,
                    });
                }
            };

            let index = staged.len();
            if by_name.insert(definition.name().to_string(), index).is_some() {
                return Err(CatalogError::Duplicate {
                    kind: D::KIND,
                    key: definition.name().to_string(),
                });
            }
            if by_id.insert(definition.id().to_string(), index).is_some() {
                return Err(CatalogError::Duplicate {
                    kind: D::KIND,
                    key: definition.id().to_string(),
                });
            }
            staged.push(definition);
        }

        self.entries = staged;
        self.by_name = by_name;
        self.by_id = by_id;
        Ok(LoadOutcome::Loaded(self.entries.len()))
    }

    /// Look up an entry by display name. Ids are not accepted here.
    pub fn get(&self, name: &str) -> Option<&D> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    /// Look up an entry by its stable id.
    pub fn get_by_id(&self, id: &str) -> Option<&D> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// All entries, in load order.
    pub fn all(&self) -> &[D] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{BackgroundDefinition, RawBackgroundRecord};

    fn background(id: &str, name: &str) -> RawBackgroundRecord {
        RawBackgroundRecord {
            id: Some(id.into()),
            name: Some(name.into()),
            description: Some(format!("{} description", name)),
            ..Default::default()
        }
    }

    #[test]
    fn load_indexes_by_display_name_not_id() {
        let catalog: Catalog<BackgroundDefinition> =
            Catalog::from_records(vec![background("folk-hero", "Folk Hero")]).unwrap();

        assert!(catalog.get("Folk Hero").is_some());
        assert!(catalog.get("folk-hero").is_none());
        assert_eq!(catalog.get_by_id("folk-hero").unwrap().name(), "Folk Hero");
    }

    #[test]
    fn second_load_is_a_no_op() {
        let mut catalog: Catalog<BackgroundDefinition> = Catalog::new();
        let first = catalog
            .load(vec![background("sage", "Sage"), background("noble", "Noble")])
            .unwrap();
        assert_eq!(first, LoadOutcome::Loaded(2));

        let second = catalog
            .load(vec![
                background("soldier", "Soldier"),
                RawBackgroundRecord::default(),
            ])
            .unwrap();
        assert_eq!(second, LoadOutcome::AlreadyLoaded);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("Soldier").is_none());
        assert_eq!(
            catalog.all().iter().map(|b| b.id()).collect::<Vec<_>>(),
            vec!["sage", "noble"]
        );
    }

    #[test]
    fn invalid_record_rejects_whole_batch() {
        let mut catalog: Catalog<BackgroundDefinition> = Catalog::new();
        let mut broken = background("criminal", "Criminal");
        broken.description = None;

        let err = catalog
            .load(vec![
                background("acolyte", "Acolyte"),
                broken,
                background("sage", "Sage"),
            ])
            .unwrap_err();

        assert_eq!(
            err,
            CatalogError::InvalidRecord {
                kind: "Background",
                name: "Criminal".into(),
                reason: "missing description".into(),
            }
        );
        assert!(catalog.is_empty());
        assert!(catalog.get("Acolyte").is_none());
        assert!(catalog.get("Sage").is_none());
    }

    #[test]
    fn failed_load_leaves_catalog_loadable() {
        let mut catalog: Catalog<BackgroundDefinition> = Catalog::new();
        assert!(catalog.load(vec![RawBackgroundRecord::default()]).is_err());
        assert_eq!(
            catalog.load(vec![background("sage", "Sage")]).unwrap(),
            LoadOutcome::Loaded(1)
        );
    }

    #[test]
    fn nameless_record_is_reported_as_unknown() {
        let err = Catalog::<BackgroundDefinition>::from_records(vec![RawBackgroundRecord {
            id: Some("x".into()),
            description: Some("y".into()),
            ..Default::default()
        }])
        .unwrap_err();
        assert!(err.to_string().contains("\"unknown\""));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Catalog::<BackgroundDefinition>::from_records(vec![
            background("sage", "Sage"),
            background("sage-2", "Sage"),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { .. }));
    }
}
