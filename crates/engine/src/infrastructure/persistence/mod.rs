//! Storage adapters
//!
//! Raw key-value stores plus the character storage policy layer that sits
//! on top of any of them.

mod character_storage;
mod json_file_store;
mod memory_store;

pub use character_storage::{CharacterStorage, CHARACTERS_KEY, DRAFT_KEY};
pub use json_file_store::JsonFileKeyValueStore;
pub use memory_store::InMemoryKeyValueStore;
