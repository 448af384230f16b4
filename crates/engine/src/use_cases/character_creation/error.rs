//! Character creation errors.

use nimbleforge_domain::{CharacterId, DomainError, WizardStep};

use crate::infrastructure::ports::StorageError;

/// Errors that can occur while driving the creation wizard.
#[derive(Debug, thiserror::Error)]
pub enum CharacterCreationError {
    /// A rule was broken (stat range or skill cap). Recoverable:
    /// the session stays where it was.
    #[error("Rule violation: {0}")]
    Rules(#[from] DomainError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// The draft names a definition the catalog does not hold.
    #[error("{kind} '{id}' is not in the catalog")]
    UnknownDefinition { kind: &'static str, id: String },
    #[error("No {0} has been chosen")]
    MissingSelection(&'static str),
    #[error("The character can only be completed from Review (currently at {0})")]
    NotAtReview(WizardStep),
    #[error("Navigation not allowed: {0}")]
    Navigation(String),
    #[error("This session already created character {0}")]
    AlreadyCompleted(CharacterId),
}
