//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area:
//! creating a character through the wizard, and managing saved characters.

pub mod character_creation;
pub mod roster;

pub use character_creation::{
    CharacterCreation, CharacterCreationError, CharacterCreator, CompletionOutcome,
    ConfirmOutcome, PersistStatus,
};
pub use roster::{Roster, RosterError};
