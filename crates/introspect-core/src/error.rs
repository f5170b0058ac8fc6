//! Error types for the reflection layer.
//!
//! ```text
//! ConversionError    - a Dynamic could not be turned into the requested Rust type
//! InvokeError        - a call through a MethodWrapper failed (arity, argument, instance)
//! RegistrationError  - a member or type was rejected when it was registered
//! ```
//!
//! Invocation failures are ordinary return values. Nothing in the dispatch
//! path panics on a bad call; callers decide whether an `InvokeError` becomes a
//! user-visible error, a log line or a silent no-op.

use thiserror::Error;

// ============================================================================
// Conversion Errors
// ============================================================================

/// Errors that can occur when converting a [`Dynamic`](crate::Dynamic) into a Rust value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The value holds a different kind of data.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Integer does not fit in the target type.
    #[error("integer overflow: value {value} does not fit in {target_type}")]
    IntegerOverflow { value: i128, target_type: &'static str },

    /// Float cannot be represented in the target type.
    #[error("float conversion error: value {value} cannot be represented as {target_type}")]
    FloatConversion {
        value: f64,
        target_type: &'static str,
    },
}

// ============================================================================
// Invocation Errors
// ============================================================================

/// Errors reported by a single invocation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvokeError {
    /// Fewer arguments than required parameters, and defaults do not cover the gap.
    #[error("missing arguments: {required} required, {supplied} supplied")]
    MissingArguments { required: usize, supplied: usize },

    /// More arguments than the callable has parameters.
    #[error("too many arguments: at most {max} accepted, {supplied} supplied")]
    TooManyArguments { max: usize, supplied: usize },

    /// An argument could not be converted to its parameter type.
    #[error("argument {index}: {source}")]
    ArgumentMismatch {
        index: usize,
        #[source]
        source: ConversionError,
    },

    /// A member callable was invoked without a target instance.
    #[error("no instance supplied for member of '{expected}'")]
    MissingInstance { expected: &'static str },

    /// The target instance is not of the owning type.
    #[error("instance type mismatch: expected '{expected}'")]
    InstanceMismatch { expected: &'static str },

    /// A mutating callable was given a shared instance.
    #[error("instance of '{expected}' is shared but the member requires exclusive access")]
    ReadOnlyInstance { expected: &'static str },

    /// A property without a setter was written.
    #[error("property '{name}' is read-only")]
    ReadOnlyProperty { name: String },

    /// No member or function is registered under the name.
    #[error("no member named '{name}'")]
    UnknownMember { name: String },
}

impl InvokeError {
    /// Whether the failure is about the number of arguments.
    pub fn is_arity(&self) -> bool {
        matches!(
            self,
            InvokeError::MissingArguments { .. } | InvokeError::TooManyArguments { .. }
        )
    }

    /// Whether the failure is about the target instance.
    pub fn is_instance(&self) -> bool {
        matches!(
            self,
            InvokeError::MissingInstance { .. }
                | InvokeError::InstanceMismatch { .. }
                | InvokeError::ReadOnlyInstance { .. }
        )
    }
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while registering types and members.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// More default values than parameters.
    #[error("{defaults} default arguments supplied for {params} parameters")]
    TooManyDefaults { params: usize, defaults: usize },

    /// A parameter has a default while a later one does not.
    #[error("parameter {index} has a default value but a later parameter does not")]
    NonTrailingDefault { index: usize },

    /// A default value does not convert to its parameter type.
    #[error("default for parameter {index}: {source}")]
    DefaultTypeMismatch {
        index: usize,
        #[source]
        source: ConversionError,
    },

    /// Two members of one type share a name.
    #[error("'{owner}' already has a member named '{name}'")]
    DuplicateMember { owner: String, name: String },

    /// A type was registered twice.
    #[error("type '{name}' is already registered")]
    DuplicateType { name: String },

    /// A global function name was registered twice.
    #[error("function '{name}' is already registered")]
    DuplicateFunction { name: String },
}
