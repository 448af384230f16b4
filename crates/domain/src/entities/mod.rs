//! Rules definitions and the finalized character.

mod ancestry;
mod background;
mod character;
mod class_definition;

pub use ancestry::{AncestryDefinition, RawAncestryRecord};
pub use background::{BackgroundDefinition, RawBackgroundRecord};
pub use character::{Character, CharacterIdentity, CREATION_LEVEL, STARTING_SPEED};
pub use class_definition::{ClassDefinition, RawClassRecord, RawHitDice, RawSaveProfile};
