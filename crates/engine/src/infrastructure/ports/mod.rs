//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Storage (in-memory, JSON file, or anything else that holds strings by key)
//! - Clock/id generation (for testing)

mod error;
mod repos;
mod testing;

pub use error::StorageError;
pub use repos::{CharacterStore, KeyValueStore};
pub use testing::{ClockPort, IdGenerator};

#[cfg(test)]
pub use repos::{MockCharacterStore, MockKeyValueStore};

#[cfg(test)]
pub use testing::{MockClockPort, MockIdGenerator};
