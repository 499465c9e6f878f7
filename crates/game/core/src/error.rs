//! Common error infrastructure for ballpark-core.
//!
//! This module provides shared types and traits used across all error types in the crate.
//! Domain-specific errors (e.g. [`SimulationError`](crate::engine::SimulationError),
//! [`RuleConfigError`](crate::config::RuleConfigError)) are defined next to the code that
//! raises them.
//!
//! # Design Principles
//!
//! - **Precondition failures**: Every engine error is raised before any state mutation
//! - **Severity Classification**: Errors are categorized for caller recovery strategies
//! - **Stable codes**: Each variant maps to a static identifier usable in logs and UIs

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The caller can fix the input (assign a slot, pick a rule set) and retry
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request can succeed once the caller changes its input.
    ///
    /// Examples: unassigned lineup slot, missing rule set
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: simulating a finished game, out-of-range rule parameters
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all ballpark-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
