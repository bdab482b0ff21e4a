//! Check command - evaluate a submission against a challenge

use anyhow::{anyhow, Context, Result};
use pykata_catalog::Catalog;
use pykata_runtime::{evaluate, Session};
use std::fs;

use crate::report::CheckReporter;

/// Evaluate the file against the challenge's test cases and report.
pub fn run(catalog: &Catalog, file_path: &str, challenge_id: &str, no_color: bool) -> Result<()> {
    let challenge = catalog
        .find(challenge_id)
        .ok_or_else(|| anyhow!("Unknown challenge '{challenge_id}'. Try `pykata list`."))?;

    let source = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read source file: {file_path}"))?;

    let session = Session::new();
    let evaluation = evaluate(&session, &source, &challenge.test_cases);

    let reporter = CheckReporter::new().with_no_color(no_color);
    let failed = reporter.report(&challenge.title, &evaluation.results);

    if failed > 0 {
        return Err(anyhow!("{failed} test case(s) failed"));
    }
    Ok(())
}
