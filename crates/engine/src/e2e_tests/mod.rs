//! End-to-end wizard tests.
//!
//! These tests drive a complete `App` (fixture catalog, in-memory storage,
//! fixed clock) through the creation wizard exactly as a front end would.
//!
//! ```bash
//! cargo test -p nimbleforge-engine --lib e2e_tests
//! ```

mod e2e_helpers;

pub use e2e_helpers::*;
