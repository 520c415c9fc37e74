//! Validate command - check version strings against the SemVer grammar.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use strict_semver::Version;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Versions to check
    #[arg(value_name = "VERSION", required = true)]
    pub versions: Vec<String>,
}

pub fn execute(args: ValidateArgs) -> Result<i32> {
    let mut invalid = 0;

    for text in &args.versions {
        match Version::parse(text) {
            Ok(_) => println!("{} {}", text, "valid".green()),
            Err(e) => {
                invalid += 1;
                println!("{} {}", text, "invalid".red().bold());
                println!("  {}", e);
                println!("  {}", pointer(text, e.position()));
            }
        }
    }

    log::debug!("{} of {} versions invalid", invalid, args.versions.len());

    Ok(if invalid > 0 { 1 } else { 0 })
}

/// The input with a caret under the character at `position`
fn pointer(text: &str, position: usize) -> String {
    format!("{}\n  {}{}", text, " ".repeat(position), "^".yellow())
}
