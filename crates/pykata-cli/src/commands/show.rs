//! Show command - display one challenge

use anyhow::{anyhow, Result};
use colored::*;
use pykata_catalog::Catalog;

/// Print a challenge's description, hint and starter code.
pub fn run(catalog: &Catalog, id: &str) -> Result<()> {
    let challenge = catalog
        .find(id)
        .ok_or_else(|| anyhow!("Unknown challenge '{id}'. Try `pykata list`."))?;

    println!("{}", challenge.title.bold());
    if let Some(level) = catalog.difficulty_of(id) {
        println!("{} {}", "level:".dimmed(), level);
    }
    println!();
    println!("{}", challenge.description);
    println!();
    println!("{} {}", "hint:".yellow(), challenge.hint);

    if let Some(starter) = &challenge.starter_code {
        println!();
        println!("{}", "starter code:".dimmed());
        println!("{starter}");
    }

    println!(
        "{} test case(s). Check a solution with: pykata check <file> -c {}",
        challenge.test_cases.len(),
        challenge.id
    );
    Ok(())
}
