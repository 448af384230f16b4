//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies, plus
//! configuration and catalog data loading.

pub mod catalog_data;
pub mod clock;
pub mod config;
pub mod persistence;
pub mod ports;
