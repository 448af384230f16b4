use serde::{Deserialize, Serialize};

use super::class_definition::non_blank;
use crate::catalog::{CatalogEntry, ParsedRecord, RawRecord};
use crate::error::DomainError;

/// An immutable background entry from the rules catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "BackgroundDefinitionRepr")]
pub struct BackgroundDefinition {
    id: String,
    name: String,
    description: String,
    teasers: Vec<String>,
    image: String,
}

impl BackgroundDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        let name = name.into();
        let description = description.into();
        if id.trim().is_empty() {
            return Err(DomainError::validation("Background id cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("Background name cannot be empty"));
        }
        if description.trim().is_empty() {
            return Err(DomainError::validation(
                "Background description cannot be empty",
            ));
        }
        Ok(Self {
            id,
            name,
            description,
            teasers: Vec::new(),
            image: String::new(),
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

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn teasers(&self) -> &[String] {
        &self.teasers
    }

    pub fn image(&self) -> &str {
        &self.image
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackgroundDefinitionRepr {
    id: String,
    name: String,
    description: String,
    #[serde(default)]
    teasers: Vec<String>,
    #[serde(default)]
    image: String,
}

impl TryFrom<BackgroundDefinitionRepr> for BackgroundDefinition {
    type Error = DomainError;

    fn try_from(repr: BackgroundDefinitionRepr) -> Result<Self, Self::Error> {
        Ok(Self::new(repr.id, repr.name, repr.description)?
            .with_image(repr.image)
            .with_teasers(repr.teasers))
    }
}

impl CatalogEntry for BackgroundDefinition {
    const KIND: &'static str = "Background";

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawBackgroundRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub teasers: Vec<String>,
    pub image: Option<String>,
}

impl RawRecord for RawBackgroundRecord {
    type Definition = BackgroundDefinition;

    fn display_name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    fn parse(self) -> ParsedRecord<BackgroundDefinition> {
        ParsedRecord::from_result(self.display_name(), self.build())
    }
}

impl RawBackgroundRecord {
    fn build(&self) -> Result<BackgroundDefinition, String> {
        let name = non_blank(&self.name).ok_or("missing name")?;
        let description = non_blank(&self.description).ok_or("missing description")?;
        let id = non_blank(&self.id).ok_or("missing id")?;

        let background =
            BackgroundDefinition::new(id, name, description).map_err(|e| e.to_string())?;
        Ok(background
            .with_image(self.image.clone().unwrap_or_default())
            .with_teasers(self.teasers.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sage() {
        let record: RawBackgroundRecord = serde_json::from_value(serde_json::json!({
            "id": "sage",
            "name": "Sage",
            "description": "You have dedicated your life to scholarly pursuits.",
            "teasers": ["Extensive academic knowledge"],
            "image": "https://placehold.co/300x200?text=Sage"
        }))
        .unwrap();
        let ParsedRecord::Valid(sage) = record.parse() else {
            panic!("expected a valid background");
        };
        assert_eq!(sage.id(), "sage");
        assert_eq!(sage.teasers().len(), 1);
    }

    #[test]
    fn missing_description_names_the_record() {
        let record = RawBackgroundRecord {
            id: Some("noble".into()),
            name: Some("Noble".into()),
            ..Default::default()
        };
        match record.parse() {
            ParsedRecord::Invalid { name, reason } => {
                assert_eq!(name, "Noble");
                assert_eq!(reason, "missing description");
            }
            ParsedRecord::Valid(_) => panic!("expected invalid record"),
        }
    }
}
