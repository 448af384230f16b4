//! Rules model for Nimble character creation.
//!
//! Pure types only: value objects, catalog definitions, the finalized
//! [`Character`], the wizard reducer and the stored record shapes. Nothing in
//! this crate touches storage, clocks or the environment.

pub mod catalog;
pub mod entities;
pub mod error;
pub mod ids;
pub mod records;
pub mod value_objects;
pub mod wizard;

pub use catalog::{
    Catalog, CatalogData, CatalogEntry, CatalogError, CatalogRegistry, LoadOutcome, ParsedRecord,
    RawRecord, RegistryLoadReport,
};
pub use entities::{
    AncestryDefinition, BackgroundDefinition, Character, CharacterIdentity, ClassDefinition,
    RawAncestryRecord, RawBackgroundRecord, RawClassRecord, CREATION_LEVEL, STARTING_SPEED,
};
pub use error::DomainError;
pub use ids::CharacterId;
pub use records::{CharacterRecord, DraftSnapshot};
pub use value_objects::{
    CharacterName, HitDice, HitDie, Save, SaveProfile, SaveTier, Size, Skill, SkillPointMap, Stat,
    StatAxis, StatMap, SKILL_TOTAL_MAX, STAT_MAX, STAT_MIN,
};
pub use wizard::{
    check_step, CharacterDraft, DraftPatch, StatArray, StepRules, WizardAction, WizardState,
    WizardStep, DEFAULT_SKILL_POINT_BUDGET,
};
