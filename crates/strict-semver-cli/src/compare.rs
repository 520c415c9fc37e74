//! Compare command - order two versions.

use anyhow::{Context, Result};
use clap::Args;
use std::cmp::Ordering;
use strict_semver::Version;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Left-hand version
    pub first: String,

    /// Right-hand version
    pub second: String,

    /// Break precedence ties on build metadata
    #[arg(long)]
    pub with_builds: bool,
}

pub fn execute(args: CompareArgs) -> Result<i32> {
    let first = Version::parse(&args.first)
        .with_context(|| format!("Invalid version \"{}\"", args.first))?;
    let second = Version::parse(&args.second)
        .with_context(|| format!("Invalid version \"{}\"", args.second))?;

    let ordering = if args.with_builds {
        first.compare_with_builds(&second)
    } else {
        first.cmp(&second)
    };

    println!("{}", symbol(ordering));
    Ok(0)
}

fn symbol(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    }
}
