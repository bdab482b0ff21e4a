//! PyKata Runtime - dynamic test harness for Python submissions
//!
//! This library executes user-submitted Python functions inside an
//! embedded interpreter and checks them against literal test cases:
//! - Call-shape inference over free-form literal input text
//! - Linked-structure (tree) construction from nested node literals
//! - Invocation and result marshaling across the interpreter boundary
//! - Pass/fail/error outcome classification
//! - Run mode with stdout capture
//!
//! # Example
//!
//! ```no_run
//! use pykata_runtime::{evaluate, Session, TestCase};
//! use serde_json::json;
//!
//! let session = Session::new();
//! let cases = vec![TestCase {
//!     input: "2, 3".to_string(),
//!     expected: json!(5),
//!     description: None,
//! }];
//! let evaluation = evaluate(&session, "def add(a, b):\n    return a + b", &cases);
//! assert!(evaluation.results[0].passed);
//! ```

/// PyKata runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod capture;
pub mod case;
pub mod classify;
pub mod error;
pub mod evaluate;
pub mod marshal;
pub mod outcome;
pub mod scanner;
pub mod session;
pub mod structure;
pub mod translate;

// Re-export commonly used types
pub use case::{Evaluation, TestCase, TestResult};
pub use classify::{classify, CallShape};
pub use error::{HarnessError, NO_FUNCTION_MESSAGE};
pub use evaluate::{evaluate, evaluate_with, function_name, run};
pub use marshal::Marshaled;
pub use outcome::{OutcomeClassifier, DEFAULT_ERROR_MARKERS, NO_VALUE_DIAGNOSTIC};
pub use session::Session;
pub use translate::LiteralTranslator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoke() {
        assert_eq!(VERSION, "0.1.0");
    }
}
