//! Outcome classification
//!
//! Compares a marshaled actual value against a test case's expected
//! value by canonical serialized form: object keys are emitted sorted
//! and integral floats are normalized to integer form, so `5.0 == 5`
//! and key order never matter.
//!
//! Two guards run before the comparison:
//! - A textual actual containing a known error-marker substring fails
//!   the case unconditionally, even when it equals the expected string.
//!   The marker set is configurable; the defaults are a heuristic and
//!   can false-positive on legitimate strings containing "Error".
//! - An absent value (the interpreter returned nothing) fails with a
//!   fixed diagnostic, distinguishing "no value" from a raised error.

use serde_json::Value;

use crate::case::{TestCase, TestResult};
use crate::marshal::Marshaled;

/// Default substrings that mark an apparently-successful textual result
/// as interpreter error output.
pub const DEFAULT_ERROR_MARKERS: &[&str] = &["Error", "Exception", "Traceback"];

/// Fixed diagnostic for a call that produced no value.
pub const NO_VALUE_DIAGNOSTIC: &str = "Function execution produced no value";

/// Classifies marshaled results into pass/fail test results.
pub struct OutcomeClassifier {
    error_markers: Vec<String>,
}

impl Default for OutcomeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeClassifier {
    /// Classifier with the default error-marker set.
    pub fn new() -> Self {
        Self {
            error_markers: DEFAULT_ERROR_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }

    /// Classifier with a custom error-marker set.
    pub fn with_markers(markers: impl IntoIterator<Item = String>) -> Self {
        Self {
            error_markers: markers.into_iter().collect(),
        }
    }

    /// Produce the test result for one marshaled actual value.
    pub fn classify(&self, case: &TestCase, actual: Marshaled) -> TestResult {
        let value = match actual {
            Marshaled::Absent => return TestResult::failure(case, NO_VALUE_DIAGNOSTIC),
            Marshaled::Raw(text) => Value::String(text),
            Marshaled::Value(value) => value,
        };

        if let Value::String(text) = &value {
            if self.is_error_text(text) {
                return TestResult::failure(case, text.clone());
            }
        }

        let passed = canonical(&value) == canonical(&case.expected);
        TestResult::compared(case, passed, value)
    }

    fn is_error_text(&self, text: &str) -> bool {
        self.error_markers.iter().any(|m| text.contains(m.as_str()))
    }
}

/// Canonical string form of a value: normalized numbers, sorted object
/// keys (serde_json maps are ordered), deterministic formatting.
pub fn canonical(value: &Value) -> String {
    normalize(value).to_string()
}

/// Normalize integral floats to integer form, recursively, so the
/// serialized comparison treats `5.0` and `5` as the same number.
fn normalize(value: &Value) -> Value {
    match value {
        Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                if n.as_i64().is_none() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    return Value::Number((f as i64).into());
                }
            }
            value.clone()
        }
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), normalize(v)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn case(expected: Value) -> TestCase {
        TestCase {
            input: "x".to_string(),
            expected,
            description: None,
        }
    }

    #[test]
    fn test_equal_values_pass() {
        let classifier = OutcomeClassifier::new();
        let result = classifier.classify(&case(json!([1, 2])), Marshaled::Value(json!([1, 2])));
        assert!(result.passed);
        assert_eq!(result.actual, Some(json!([1, 2])));
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_mismatch_fails_without_error() {
        let classifier = OutcomeClassifier::new();
        let result = classifier.classify(&case(json!(5)), Marshaled::Value(json!(6)));
        assert!(!result.passed);
        assert_eq!(result.actual, Some(json!(6)));
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_integral_float_equals_integer() {
        let classifier = OutcomeClassifier::new();
        let result = classifier.classify(&case(json!(5)), Marshaled::Value(json!(5.0)));
        assert!(result.passed);
    }

    #[test]
    fn test_key_order_is_irrelevant() {
        assert_eq!(
            canonical(&json!({"b": 1, "a": 2})),
            canonical(&json!({"a": 2, "b": 1}))
        );
    }

    #[test]
    fn test_error_marker_overrides_equality() {
        // Even when the expected value is the same text, a marker
        // substring demotes the case to failed.
        let classifier = OutcomeClassifier::new();
        let text = "Traceback (most recent call last): boom";
        let result = classifier.classify(
            &case(json!(text)),
            Marshaled::Value(Value::String(text.to_string())),
        );
        assert!(!result.passed);
        assert_eq!(result.error.as_deref(), Some(text));
        assert_eq!(result.actual, None);
    }

    #[test]
    fn test_custom_markers() {
        let classifier = OutcomeClassifier::with_markers(vec!["KABOOM".to_string()]);
        let ok = classifier.classify(
            &case(json!("Error: fine here")),
            Marshaled::Value(json!("Error: fine here")),
        );
        assert!(ok.passed);

        let bad = classifier.classify(
            &case(json!("KABOOM happened")),
            Marshaled::Value(json!("KABOOM happened")),
        );
        assert!(!bad.passed);
    }

    #[test]
    fn test_raw_text_compares_as_string() {
        let classifier = OutcomeClassifier::new();
        let result = classifier.classify(
            &case(json!("TreeNode(3)")),
            Marshaled::Raw("TreeNode(3)".to_string()),
        );
        assert!(result.passed);
    }

    #[test]
    fn test_absent_value_uses_fixed_diagnostic() {
        let classifier = OutcomeClassifier::new();
        let result = classifier.classify(&case(json!(null)), Marshaled::Absent);
        assert!(!result.passed);
        assert_eq!(result.error.as_deref(), Some(NO_VALUE_DIAGNOSTIC));
    }
}
