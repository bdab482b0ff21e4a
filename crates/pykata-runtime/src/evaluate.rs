//! Evaluation entrypoints
//!
//! `evaluate` loads a submission into the session, discovers the target
//! function, and runs every test case through the shape-dispatched
//! invocation pipeline. `run` executes a submission once with stdout
//! captured. Neither entrypoint lets an error escape: global failures
//! fail every case with the same text, per-case failures fail only
//! their case, and later cases always still run.
//!
//! Cases run strictly in order, one at a time: the structure builder
//! binds interpreter-global names that the rest of that case's steps
//! reference, so there is never more than one case in flight.

use regex::Regex;
use tracing::debug;

use crate::capture::capture_output;
use crate::case::{Evaluation, TestCase, TestResult};
use crate::classify::{classify, CallShape};
use crate::error::HarnessError;
use crate::marshal::{marshal, Marshaled};
use crate::outcome::OutcomeClassifier;
use crate::session::Session;
use crate::structure::invoke_with_structures;
use crate::translate::LiteralTranslator;

/// Evaluate a submission against test cases with the default outcome
/// classifier.
///
/// Always returns one result per test case, in case order. `output` is
/// always empty for test-mode evaluation.
pub fn evaluate(session: &Session, code: &str, test_cases: &[TestCase]) -> Evaluation {
    evaluate_with(session, code, test_cases, &OutcomeClassifier::new())
}

/// Evaluate with a caller-supplied outcome classifier (custom
/// error-marker set).
pub fn evaluate_with(
    session: &Session,
    code: &str,
    test_cases: &[TestCase],
    classifier: &OutcomeClassifier,
) -> Evaluation {
    let function = match load_submission(session, code) {
        Ok(name) => name,
        Err(err) => {
            // Global failure: every case fails with the same text.
            let message = err.to_string();
            return Evaluation {
                results: test_cases
                    .iter()
                    .map(|case| TestResult::failure(case, message.clone()))
                    .collect(),
                output: Vec::new(),
            };
        }
    };

    let translator = LiteralTranslator::new();
    let results = test_cases
        .iter()
        .map(|case| run_case(session, &function, &translator, classifier, case))
        .collect();

    Evaluation {
        results,
        output: Vec::new(),
    }
}

/// Run a submission once (no test cases) and return its captured stdout
/// lines, or a single `Error:` line on failure.
pub fn run(session: &Session, code: &str) -> Vec<String> {
    match capture_output(session, code) {
        Ok(lines) => lines,
        Err(err) => vec![format!("Error: {err}")],
    }
}

/// Execute the submission source and discover the target function name.
fn load_submission(session: &Session, code: &str) -> Result<String, HarnessError> {
    session.exec(code)?;
    function_name(code).ok_or(HarnessError::NoFunctionDefinition)
}

/// Extract the identifier of the first function definition statement.
pub fn function_name(code: &str) -> Option<String> {
    let def = Regex::new(r"def\s+(\w+)\s*\(").ok()?;
    Some(def.captures(code)?.get(1)?.as_str().to_owned())
}

/// Run one test case through classification, invocation, marshaling and
/// outcome classification. Any harness error becomes a failed result;
/// it never aborts the remaining cases.
fn run_case(
    session: &Session,
    function: &str,
    translator: &LiteralTranslator,
    classifier: &OutcomeClassifier,
    case: &TestCase,
) -> TestResult {
    let marshaled = match invoke_case(session, function, translator, case) {
        Ok(marshaled) => marshaled,
        Err(err) => return TestResult::failure(case, err.to_string()),
    };
    classifier.classify(case, marshaled)
}

/// Dispatch one test case to its invocation strategy.
fn invoke_case(
    session: &Session,
    function: &str,
    translator: &LiteralTranslator,
    case: &TestCase,
) -> Result<Marshaled, HarnessError> {
    let input = translator.translate(&case.input);

    match classify(&case.input) {
        CallShape::Mapping => invoke_mapping(session, function, &input),
        CallShape::LinkedStructure => {
            invoke_with_structures(session, function, &input, &case.expected)
        }
        // Multi- and single-argument inputs build the same call text;
        // the distinction only matters for how the text was produced.
        CallShape::MultiArgument | CallShape::SingleArgument => {
            let repr = session.eval_repr(&format!("{function}({input})"))?;
            Ok(marshal(repr))
        }
    }
}

/// Mapping-shaped input: call directly, and when the direct call yields
/// no representable value, re-execute through the assignment-then-
/// reference form. Some composite literals do not survive evaluation as
/// a bare call argument but do survive being bound to a name first.
fn invoke_mapping(
    session: &Session,
    function: &str,
    input: &str,
) -> Result<Marshaled, HarnessError> {
    let direct = marshal(session.eval_repr(&format!("{function}({input})"))?);
    if !matches!(direct, Marshaled::Absent) {
        return Ok(direct);
    }

    debug!(function, "direct mapping call produced no value, retrying via assignment");
    session.exec(&format!(
        "__kata_arg = {input}\n__kata_result = {function}(__kata_arg)"
    ))?;
    let repr = session.eval_repr("__kata_result")?;
    Ok(marshal(repr))
}
