//! Constraint and ordering queries over lists of versions.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use strict_semver::{Expression, Semver, Version};

#[derive(Args, Debug)]
pub struct SatisfiesArgs {
    /// Version to check
    pub version: String,

    /// Constraint expression, e.g. ">=1.0.0 & <2.0.0"
    pub constraint: String,
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Constraint expression
    pub constraint: String,

    /// Candidate versions
    #[arg(value_name = "VERSION", required = true)]
    pub versions: Vec<String>,
}

#[derive(Args, Debug)]
pub struct SortArgs {
    /// Versions to sort; invalid ones are dropped
    #[arg(value_name = "VERSION", required = true)]
    pub versions: Vec<String>,

    /// Sort in descending order
    #[arg(short, long)]
    pub reverse: bool,
}

fn parse_constraint(text: &str) -> Result<Expression> {
    Expression::parse(text).with_context(|| format!("Invalid constraint \"{}\"", text))
}

pub fn satisfies(args: SatisfiesArgs) -> Result<i32> {
    let version = Version::parse(&args.version)
        .with_context(|| format!("Invalid version \"{}\"", args.version))?;
    let constraint = parse_constraint(&args.constraint)?;

    log::debug!("Evaluating {} against {}", constraint, version);

    if version.satisfies(&constraint) {
        println!("{}", "true".green());
        Ok(0)
    } else {
        println!("{}", "false".red());
        Ok(1)
    }
}

pub fn filter(args: FilterArgs) -> Result<i32> {
    let constraint = parse_constraint(&args.constraint)?;
    for version in matching(&constraint, &args.versions) {
        println!("{}", version);
    }
    Ok(0)
}

pub fn sort(args: SortArgs) -> Result<i32> {
    let versions: Vec<&str> = args.versions.iter().map(String::as_str).collect();
    let sorted = if args.reverse {
        Semver::rsort(&versions)
    } else {
        Semver::sort(&versions)
    };

    for version in sorted {
        println!("{}", version);
    }
    Ok(0)
}

fn matching<'a>(constraint: &Expression, versions: &'a [String]) -> Vec<&'a str> {
    versions
        .iter()
        .map(String::as_str)
        .filter(|v| Semver::satisfies_parsed(v, constraint))
        .collect()
}
