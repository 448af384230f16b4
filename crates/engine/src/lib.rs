//! NimbleForge Engine library.
//!
//! Everything around the pure rules model: storage, configuration, catalog
//! data and the character creation sessions.
//!
//! ## Structure
//!
//! - `use_cases/` - Character creation wizard sessions and the roster
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Shared catalog and character fixtures for tests.
#[cfg(test)]
pub mod test_fixtures;

/// End-to-end wizard scenarios against the in-memory store.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
