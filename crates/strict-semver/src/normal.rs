//! The major.minor.patch triple

use std::fmt;

use crate::error::VersionError;

/// The normal version of a release.
///
/// Components are unsigned, so a negative component cannot be constructed.
/// Field order gives the derived ordering: major, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalVersion {
    major: u64,
    minor: u64,
    patch: u64,
}

impl NormalVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        NormalVersion { major, minor, patch }
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Next major version, minor and patch reset to zero
    pub fn increment_major(&self) -> Result<Self, VersionError> {
        Ok(NormalVersion::new(try_increment(self.major, "major")?, 0, 0))
    }

    /// Next minor version, patch reset to zero
    pub fn increment_minor(&self) -> Result<Self, VersionError> {
        Ok(NormalVersion::new(self.major, try_increment(self.minor, "minor")?, 0))
    }

    pub fn increment_patch(&self) -> Result<Self, VersionError> {
        Ok(NormalVersion::new(self.major, self.minor, try_increment(self.patch, "patch")?))
    }
}

fn try_increment(value: u64, component: &'static str) -> Result<u64, VersionError> {
    value.checked_add(1).ok_or(VersionError::Overflow { component })
}

impl fmt::Display for NormalVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
