//! Harness error types

use thiserror::Error;

/// Fixed message shown when a submission contains no function definition.
pub const NO_FUNCTION_MESSAGE: &str =
    "No function definition found. Please define a function using \"def function_name():\"";

/// Errors raised while loading or invoking a submission.
///
/// These never escape the evaluation entrypoints: per-case errors become
/// failed test results, and global errors fail every case with the same
/// text.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HarnessError {
    /// The source failed to compile (syntax error).
    #[error("{message}")]
    Compile { message: String },

    /// The interpreter raised while executing.
    #[error("{message}")]
    Python { message: String, traceback: String },

    /// The submission contains no `def` statement.
    #[error("{}", NO_FUNCTION_MESSAGE)]
    NoFunctionDefinition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_message_only() {
        let err = HarnessError::Python {
            message: "NameError: name 'x' is not defined".to_string(),
            traceback: "Traceback (most recent call last): ...".to_string(),
        };
        assert_eq!(err.to_string(), "NameError: name 'x' is not defined");
    }

    #[test]
    fn test_no_function_message_is_fixed() {
        assert_eq!(
            HarnessError::NoFunctionDefinition.to_string(),
            NO_FUNCTION_MESSAGE
        );
    }
}
