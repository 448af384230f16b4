//! Class definitions and their raw catalog records.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntry, ParsedRecord, RawRecord};
use crate::error::DomainError;
use crate::value_objects::{HitDice, HitDie, SaveProfile, SaveTier};

/// An immutable class entry from the rules catalog.
///
/// # Invariants
///
/// - `id` and `name` are non-empty
/// - `hit_points` is positive
/// - the save profile covers all four axes (enforced by `SaveProfile`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ClassDefinitionRepr")]
pub struct ClassDefinition {
    id: String,
    name: String,
    image: String,
    teasers: Vec<String>,
    hit_points: u32,
    hit_dice: HitDice,
    saves: SaveProfile,
}

impl ClassDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        hit_points: u32,
        hit_dice: HitDice,
        saves: SaveProfile,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        let name = name.into();
        if id.trim().is_empty() {
            return Err(DomainError::validation("Class id cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("Class name cannot be empty"));
        }
        if hit_points == 0 {
            return Err(DomainError::validation("Class hit points must be positive"));
        }
        Ok(Self {
            id,
            name,
            image: String::new(),
            teasers: Vec::new(),
            hit_points,
            hit_dice,
            saves,
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

    /// Flavor lines shown when choosing the class.
    pub fn teasers(&self) -> &[String] {
        &self.teasers
    }

    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    pub fn hit_dice(&self) -> HitDice {
        self.hit_dice
    }

    pub fn saves(&self) -> &SaveProfile {
        &self.saves
    }
}

impl CatalogEntry for ClassDefinition {
    const KIND: &'static str = "Class";

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Stored shape of a class. Converting back replays [`ClassDefinition::new`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassDefinitionRepr {
    id: String,
    name: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    teasers: Vec<String>,
    hit_points: u32,
    hit_dice: HitDice,
    saves: SaveProfile,
}

impl TryFrom<ClassDefinitionRepr> for ClassDefinition {
    type Error = DomainError;

    fn try_from(repr: ClassDefinitionRepr) -> Result<Self, Self::Error> {
        Ok(
            Self::new(repr.id, repr.name, repr.hit_points, repr.hit_dice, repr.saves)?
                .with_image(repr.image)
                .with_teasers(repr.teasers),
        )
    }
}

/// A class record as it arrives from catalog data.
///
/// Every field is optional so that a malformed record deserializes and the
/// parse step can name it, instead of serde rejecting the whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawClassRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub teasers: Vec<String>,
    pub hit_points: Option<i64>,
    pub hit_dice: Option<RawHitDice>,
    pub saves: Option<RawSaveProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawHitDice {
    pub dice: Option<String>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSaveProfile {
    pub strength: Option<String>,
    pub dexterity: Option<String>,
    pub intelligence: Option<String>,
    pub will: Option<String>,
}

impl RawSaveProfile {
    fn parse(&self) -> Result<SaveProfile, String> {
        let tier = |axis: &str, value: &Option<String>| -> Result<SaveTier, String> {
            let raw = non_blank(value).ok_or_else(|| format!("missing saves.{}", axis))?;
            raw.parse::<SaveTier>()
                .map_err(|_| format!("unknown save tier '{}' for {}", raw, axis))
        };
        Ok(SaveProfile::new(
            tier("strength", &self.strength)?,
            tier("dexterity", &self.dexterity)?,
            tier("intelligence", &self.intelligence)?,
            tier("will", &self.will)?,
        ))
    }
}

impl RawHitDice {
    fn parse(&self) -> Result<HitDice, String> {
        let die = non_blank(&self.dice).ok_or("missing hitDice.dice")?;
        let die = die
            .parse::<HitDie>()
            .map_err(|_| format!("unknown hit die '{}'", die))?;
        let quantity = self.quantity.ok_or("missing hitDice.quantity")?;
        let quantity = u8::try_from(quantity)
            .map_err(|_| format!("hit dice quantity {} out of range", quantity))?;
        HitDice::new(die, quantity).map_err(|e| e.to_string())
    }
}

impl RawRecord for RawClassRecord {
    type Definition = ClassDefinition;

    fn display_name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    fn parse(self) -> ParsedRecord<ClassDefinition> {
        ParsedRecord::from_result(self.display_name(), self.build())
    }
}

impl RawClassRecord {
    fn build(&self) -> Result<ClassDefinition, String> {
        let name = non_blank(&self.name).ok_or("missing name")?;
        let id = non_blank(&self.id).ok_or("missing id")?;
        let hit_points = self.hit_points.ok_or("missing hitPoints")?;
        let hit_points = u32::try_from(hit_points)
            .ok()
            .filter(|hp| *hp > 0)
            .ok_or_else(|| format!("hit points must be positive, got {}", hit_points))?;
        let hit_dice = self.hit_dice.as_ref().ok_or("missing hitDice")?.parse()?;
        let saves = self.saves.as_ref().ok_or("missing saves")?.parse()?;

        let class = ClassDefinition::new(id, name, hit_points, hit_dice, saves)
            .map_err(|e| e.to_string())?;
        Ok(class
            .with_image(self.image.clone().unwrap_or_default())
            .with_teasers(self.teasers.clone()))
    }
}

/// Returns the trimmed value if present and non-blank.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
