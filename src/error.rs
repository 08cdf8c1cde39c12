//! Domain error types.
//!
//! Two tiers, split along the service-boundary line:
//!
//! - [`PromptError`]: failures that genuinely abort an operation — source
//!   parsing, lowering, schema registration, resource-limit violations,
//!   configuration problems. These use `thiserror` and propagate with `?`.
//! - [`crate::context::RenderIssue`]: render-time diagnostics that *never*
//!   propagate (spec.md §7) — validation failures, runtime exceptions
//!   inside a component, and `warn_*` informational notes. These are plain
//!   data, collected into `RenderResult::errors`.
//!
//! At the service boundary (`service.rs`), `PromptError` is converted to
//! `anyhow::Error` for callers that just want a human-readable chain.

use thiserror::Error;

/// Domain-specific error type for prompt source parsing, lowering, and
/// service-level failures.
#[derive(Error, Debug)]
pub enum PromptError {
    /// The bare prompt source could not be preprocessed into a module form.
    #[error("failed to preprocess prompt source: {0}")]
    Preprocess(String),

    /// The JSX-flavored prompt source failed to parse.
    #[error("failed to parse prompt source: {0}")]
    SourceParse(String),

    /// The parsed source could not be lowered into an element tree.
    #[error("failed to lower prompt source: {0}")]
    Lowering(String),

    /// A component type referenced by name has no registered implementation.
    #[error("unknown component type: {0}")]
    UnknownComponent(String),

    /// Prompt source content size exceeds the configured maximum.
    #[error("prompt source size exceeds maximum allowed: {0} bytes")]
    SourceTooLarge(usize),

    /// Batch size exceeds the configured maximum.
    #[error("batch size exceeds maximum allowed: {0} sources")]
    BatchTooLarge(usize),

    /// The service configuration itself is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An input requirement could not be satisfied by the host.
    #[error("input collection aborted for '{0}'")]
    InputAborted(String),
}

/// Stable error codes surfaced in [`crate::context::RenderIssue::code`].
///
/// These strings are part of the wire contract (spec.md §6) — tests assert
/// against them directly, so the `Display` impl must never change them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// A component type has no registered schema.
    MissingSchema,
    /// One or more props failed schema validation.
    PropValidation,
    /// A component's `resolve`/`render` raised an exception.
    RuntimeError,
    /// Informational: a `Prompt` has no `Task` descendant.
    WarnMissingTask,
    /// Informational: `Format.strict` conflicts with visible reasoning.
    WarnConflictingInstructions,
    /// A hoisted/interpolation identifier was invalid.
    InvalidIdentifier,
}

impl ErrorCode {
    /// The stable wire string for this code.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingSchema => "missing_schema",
            ErrorCode::PropValidation => "prop_validation",
            ErrorCode::RuntimeError => "runtime_error",
            ErrorCode::WarnMissingTask => "warn_missing_task",
            ErrorCode::WarnConflictingInstructions => "warn_conflicting_instructions",
            ErrorCode::InvalidIdentifier => "invalid_identifier",
        }
    }

    /// Whether this code is purely informational (never flips `ok` to false).
    pub const fn is_warning(self) -> bool {
        matches!(
            self,
            ErrorCode::WarnMissingTask | ErrorCode::WarnConflictingInstructions
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_match_wire_contract() {
        assert_eq!(ErrorCode::MissingSchema.as_str(), "missing_schema");
        assert_eq!(ErrorCode::PropValidation.as_str(), "prop_validation");
        assert_eq!(ErrorCode::RuntimeError.as_str(), "runtime_error");
        assert_eq!(ErrorCode::WarnMissingTask.as_str(), "warn_missing_task");
        assert_eq!(
            ErrorCode::WarnConflictingInstructions.as_str(),
            "warn_conflicting_instructions"
        );
        assert_eq!(ErrorCode::InvalidIdentifier.as_str(), "invalid_identifier");
    }

    #[test]
    fn only_warn_codes_are_warnings() {
        assert!(ErrorCode::WarnMissingTask.is_warning());
        assert!(ErrorCode::WarnConflictingInstructions.is_warning());
        assert!(!ErrorCode::RuntimeError.is_warning());
        assert!(!ErrorCode::MissingSchema.is_warning());
    }
}
