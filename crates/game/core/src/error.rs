//! Common error infrastructure for arena-core.
//!
//! Domain-specific errors (e.g., `StateError`, `ConfigError`) are defined in
//! their respective modules. This module provides the shared severity
//! classification and the trait every error implements.
//!
//! Perception, movement and combat never return errors: malformed inputs are
//! logged and answered with a safe default. Only construction and
//! configuration validation surface typed errors.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the caller can skip the step and continue.
    ///
    /// Examples: knockback destination blocked, target out of range
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: safe zone outside the map, threshold above 1.0
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: referenced unit missing from the state
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

/// Common trait for all arena-core errors.
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
    /// Used as a stable code in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
