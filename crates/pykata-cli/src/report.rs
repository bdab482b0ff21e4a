//! Check reporter - display per-case results

use colored::*;
use pykata_runtime::TestResult;

/// Reporter for `pykata check` output.
pub struct CheckReporter {
    /// Disable colored output
    no_color: bool,
}

impl Default for CheckReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckReporter {
    /// Create a reporter with default settings.
    pub fn new() -> Self {
        Self { no_color: false }
    }

    /// Disable colored output.
    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    /// Print per-case lines and a summary; returns the failure count.
    pub fn report(&self, title: &str, results: &[TestResult]) -> usize {
        if self.no_color {
            colored::control::set_override(false);
        }

        println!("{}", title.bold());
        for (index, result) in results.iter().enumerate() {
            self.print_case(index, result);
        }

        let passed = results.iter().filter(|r| r.passed).count();
        let failed = results.len() - passed;

        println!("{}", "─".repeat(50));
        let summary = format!("{passed} passed, {failed} failed, {} total", results.len());
        if failed == 0 {
            println!("{}", summary.green().bold());
        } else {
            println!("{}", summary.red().bold());
        }

        if self.no_color {
            colored::control::unset_override();
        }
        failed
    }

    fn print_case(&self, index: usize, result: &TestResult) {
        let label = result
            .description
            .clone()
            .unwrap_or_else(|| result.input.clone());

        if result.passed {
            println!("{} case {}: {}", "PASS".green().bold(), index + 1, label);
            return;
        }

        println!("{} case {}: {}", "FAIL".red().bold(), index + 1, label);
        println!("  {} {}", "input:".dimmed(), result.input);
        println!("  {} {}", "expected:".dimmed(), result.expected);
        match (&result.error, &result.actual) {
            (Some(error), _) => println!("  {} {}", "error:".red(), error),
            (None, Some(actual)) => println!("  {} {}", "actual:".dimmed(), actual),
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(passed: bool) -> TestResult {
        TestResult {
            passed,
            input: "2, 3".to_string(),
            expected: json!(5),
            actual: passed.then(|| json!(5)),
            error: None,
            description: None,
        }
    }

    #[test]
    fn test_report_counts_failures() {
        let reporter = CheckReporter::new().with_no_color(true);
        let failed = reporter.report("Sample", &[result(true), result(false), result(false)]);
        assert_eq!(failed, 2);
    }

    #[test]
    fn test_report_all_passing() {
        let reporter = CheckReporter::new().with_no_color(true);
        assert_eq!(reporter.report("Sample", &[result(true)]), 0);
    }
}
