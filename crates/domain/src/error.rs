//! Unified error types for the domain layer
//!
//! Provides a common error type for value-object construction, character
//! finalization and wizard transitions, so the engine never has to fall back
//! to `String` or `anyhow` when reporting a broken rule.

use thiserror::Error;

use crate::value_objects::{Skill, StatAxis};

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// A stat value fell outside the closed range the rules allow
    #[error("Stat {axis} value {value} must be between {min} and {max}")]
    StatOutOfRange {
        axis: StatAxis,
        value: i32,
        min: i32,
        max: i32,
    },

    /// A derived skill total broke the creation cap
    #[error("Skill {skill} total (stat + points) is {total}, cannot exceed {max}")]
    SkillTotalExceeded { skill: Skill, total: i32, max: i32 },
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// Use this when domain invariants or constraints are violated:
    /// - Required fields are empty or missing
    /// - Values are outside allowed ranges
    /// - Step preconditions are not satisfied
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Character name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant:
    ///
    /// ```ignore
    /// impl FromStr for Size {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "medium" => Ok(Self::Medium),
    ///             _ => Err(DomainError::parse(format!("Unknown size: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid state transition error
    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }

    /// True for the two rule violations a user can fix by revisiting a step.
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            Self::StatOutOfRange { .. } | Self::SkillTotalExceeded { .. }
        )
    }
}
