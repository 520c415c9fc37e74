//! Bump command - derive the next version from an existing one.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use strict_semver::Version;

/// Which part of the version to increment
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {
    Major,
    Minor,
    Patch,
    PreRelease,
    Build,
}

#[derive(Args, Debug)]
pub struct BumpArgs {
    /// Version to start from
    pub version: String,

    /// Part to increment
    #[arg(value_enum)]
    pub part: Part,

    /// Pre-release to attach after a major, minor or patch bump
    #[arg(long, value_name = "ID")]
    pub pre_release: Option<String>,
}

pub fn execute(args: BumpArgs) -> Result<i32> {
    let version = Version::parse(&args.version)
        .with_context(|| format!("Invalid version \"{}\"", args.version))?;

    let bumped = bump(&version, args.part, args.pre_release.as_deref())?;
    println!("{}", bumped);
    Ok(0)
}

fn bump(version: &Version, part: Part, pre_release: Option<&str>) -> Result<Version> {
    let bumped = match (part, pre_release) {
        (Part::Major, None) => version.increment_major(),
        (Part::Major, Some(pre)) => version.increment_major_with(pre),
        (Part::Minor, None) => version.increment_minor(),
        (Part::Minor, Some(pre)) => version.increment_minor_with(pre),
        (Part::Patch, None) => version.increment_patch(),
        (Part::Patch, Some(pre)) => version.increment_patch_with(pre),
        (Part::PreRelease, None) => version.increment_pre_release(),
        (Part::Build, None) => version.increment_build_metadata(),
        (_, Some(_)) => anyhow::bail!("--pre-release only applies to major, minor and patch bumps"),
    };

    bumped.with_context(|| format!("Failed to bump {}", version))
}
