// File: src/error.rs
// Purpose: Configuration errors raised by the engine

/// Result type for engine operations that can hit a configuration error.
pub type Result<T> = std::result::Result<T, ValidatorError>;

/// A mistake in how rules were wired up.
///
/// These are never produced by bad user input: a failing predicate ends up in the
/// [`FieldErrorMap`](crate::FieldErrorMap) instead. A `ValidatorError` aborts the whole
/// validation call and is meant to surface to whoever configured the rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidatorError {
    #[error("Unknown rule \"{rule}\" referenced by field \"{field}\"")]
    UnknownRule { field: String, rule: String },

    #[error("Rule with name \"{name}\" already exists")]
    DuplicateRule { name: String },

    #[error("Rule \"{rule}\" requires an argument: {expected}")]
    MissingArgument { rule: String, expected: &'static str },

    #[error("Rule \"{rule}\" got invalid argument \"{argument}\": {reason}")]
    InvalidArgument {
        rule: String,
        argument: String,
        reason: String,
    },

    #[error("Empty rule name in expression \"{expression}\"")]
    EmptyRuleName { expression: String },
}

impl ValidatorError {
    pub(crate) fn missing_argument(rule: &str, expected: &'static str) -> Self {
        ValidatorError::MissingArgument {
            rule: rule.to_string(),
            expected,
        }
    }

    pub(crate) fn invalid_argument(rule: &str, argument: &str, reason: impl Into<String>) -> Self {
        ValidatorError::InvalidArgument {
            rule: rule.to_string(),
            argument: argument.to_string(),
            reason: reason.into(),
        }
    }
}
