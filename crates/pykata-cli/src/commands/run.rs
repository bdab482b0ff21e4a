//! Run command - execute a Python file and print its output

use anyhow::{Context, Result};
use pykata_runtime::Session;
use std::fs;

/// Execute the file in run mode and print the captured output lines.
pub fn run(file_path: &str) -> Result<()> {
    let source = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read source file: {file_path}"))?;

    let session = Session::new();
    for line in pykata_runtime::run(&session, &source) {
        println!("{line}");
    }
    Ok(())
}
