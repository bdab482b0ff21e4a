//! Test case and result records
//!
//! [`TestCase`] is defined by the catalog crate and re-exported here;
//! [`TestResult`] is the per-case outcome record returned to callers.
//! Results are created once per test case per evaluation run, never
//! mutated afterwards, and collected in test-case order.

use serde::Serialize;
use serde_json::Value;

pub use pykata_catalog::TestCase;

/// Outcome of one test case.
///
/// `input`, `expected` and `description` are always copied verbatim from
/// the corresponding test case, regardless of how execution went, so
/// callers can correlate results to cases positionally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub passed: bool,
    pub input: String,
    pub expected: Value,
    pub actual: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TestResult {
    /// A failed result carrying an error message and no actual value.
    pub(crate) fn failure(case: &TestCase, error: impl Into<String>) -> Self {
        Self {
            passed: false,
            input: case.input.clone(),
            expected: case.expected.clone(),
            actual: None,
            error: Some(error.into()),
            description: case.description.clone(),
        }
    }

    /// A compared result: passed/failed with the marshaled actual value.
    pub(crate) fn compared(case: &TestCase, passed: bool, actual: Value) -> Self {
        Self {
            passed,
            input: case.input.clone(),
            expected: case.expected.clone(),
            actual: Some(actual),
            error: None,
            description: case.description.clone(),
        }
    }
}

/// Result of one evaluation run: per-case results plus run-mode output
/// (always empty for test-mode evaluation).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub results: Vec<TestResult>,
    pub output: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn case() -> TestCase {
        TestCase {
            input: "2, 3".to_string(),
            expected: json!(5),
            description: Some("small positives".to_string()),
        }
    }

    #[test]
    fn test_failure_copies_case_fields() {
        let result = TestResult::failure(&case(), "boom");
        assert!(!result.passed);
        assert_eq!(result.input, "2, 3");
        assert_eq!(result.expected, json!(5));
        assert_eq!(result.actual, None);
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert_eq!(result.description.as_deref(), Some("small positives"));
    }

    #[test]
    fn test_compared_keeps_actual() {
        let result = TestResult::compared(&case(), true, json!(5));
        assert!(result.passed);
        assert_eq!(result.actual, Some(json!(5)));
        assert_eq!(result.error, None);
    }
}
