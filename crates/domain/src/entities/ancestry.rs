//! Ancestry definitions and their raw catalog records.

use serde::{Deserialize, Serialize};

use super::class_definition::non_blank;
use crate::catalog::{CatalogEntry, ParsedRecord, RawRecord};
use crate::error::DomainError;
use crate::value_objects::Size;

/// An immutable ancestry entry from the rules catalog.
///
/// # Invariants
///
/// - `id`, `name` and `description` are non-empty
/// - `size` is a known size category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AncestryDefinitionRepr")]
pub struct AncestryDefinition {
    id: String,
    name: String,
    image: String,
    teasers: Vec<String>,
    description: String,
    size: Size,
}

impl AncestryDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        size: Size,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        let name = name.into();
        let description = description.into();
        if id.trim().is_empty() {
            return Err(DomainError::validation("Ancestry id cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("Ancestry name cannot be empty"));
        }
        if description.trim().is_empty() {
            return Err(DomainError::validation(
                "Ancestry description cannot be empty",
            ));
        }
        Ok(Self {
            id,
            name,
            image: String::new(),
            teasers: Vec::new(),
            description,
            size,
        })
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_teasers(mut self, teasers: Vec<String>) -> Self {
        self.teasers = teasers;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn teasers(&self) -> &[String] {
        &self.teasers
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

impl CatalogEntry for AncestryDefinition {
    const KIND: &'static str = "Ancestry";

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AncestryDefinitionRepr {
    id: String,
    name: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    teasers: Vec<String>,
    description: String,
    size: Size,
}

impl TryFrom<AncestryDefinitionRepr> for AncestryDefinition {
    type Error = DomainError;

    fn try_from(repr: AncestryDefinitionRepr) -> Result<Self, Self::Error> {
        Ok(Self::new(repr.id, repr.name, repr.description, repr.size)?
            .with_image(repr.image)
            .with_teasers(repr.teasers))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAncestryRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub teasers: Vec<String>,
    pub description: Option<String>,
    pub size: Option<String>,
}

impl RawRecord for RawAncestryRecord {
    type Definition = AncestryDefinition;

    fn display_name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    fn parse(self) -> ParsedRecord<AncestryDefinition> {
        ParsedRecord::from_result(self.display_name(), self.build())
    }
}

impl RawAncestryRecord {
    fn build(&self) -> Result<AncestryDefinition, String> {
        let name = non_blank(&self.name).ok_or("missing name")?;
        let description = non_blank(&self.description).ok_or("missing description")?;
        let size = non_blank(&self.size).ok_or("missing size")?;
        let size = size
            .parse::<Size>()
            .map_err(|_| format!("unknown size '{}'", size))?;
        let id = non_blank(&self.id).ok_or("missing id")?;

        let ancestry =
            AncestryDefinition::new(id, name, description, size).map_err(|e| e.to_string())?;
        Ok(ancestry
            .with_image(self.image.clone().unwrap_or_default())
            .with_teasers(self.teasers.clone()))
    }
}
