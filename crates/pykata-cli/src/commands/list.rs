//! List command - show the challenge catalog

use anyhow::Result;
use colored::*;
use pykata_catalog::Catalog;

/// Print the catalog grouped by level and topic.
pub fn run(catalog: &Catalog) -> Result<()> {
    for level in &catalog.levels {
        println!("{}", level.name.bold().underline());
        for topic in &level.topics {
            println!("  {}", topic.name.cyan());
            for challenge in &topic.challenges {
                println!(
                    "    {}  {}",
                    challenge.id.green(),
                    challenge.title.dimmed()
                );
            }
        }
        println!();
    }
    println!("{} challenges total", catalog.len());
    Ok(())
}
